//! Browser entry points. The page owns rendering, input capture and picking;
//! it hands per-tick input and ray hits to `WasmSandbox` and reads back
//! the block instances.

use glam::{IVec3, Vec3};
use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

use crate::config::SandboxConfig;
use crate::controller::{EditAction, MouseButton, RaycastProvider, Sandbox};
use crate::model::{BlockPosition, MoveIntent, RayHit};
use crate::view::{build_instances, BlockInstance};
use crate::logging;

#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
}

#[wasm_bindgen]
pub struct WasmSandbox {
    sandbox: Sandbox,
}

#[wasm_bindgen]
impl WasmSandbox {
    /// Builds a sandbox from a TOML config string; empty means defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_toml: &str) -> Result<WasmSandbox, JsValue> {
        let config = SandboxConfig::from_toml_str(config_toml)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { sandbox: Sandbox::new(&config) })
    }

    pub fn tick(&mut self, forward: bool, backward: bool, left: bool, right: bool, jump: bool) {
        let intent = MoveIntent {
            forward,
            backward,
            left,
            right,
            jump_requested: jump,
        };
        self.sandbox.step(&intent);
    }

    /// Places a block against the face the page's raycast hit.
    /// Returns false when nothing was placed.
    #[allow(clippy::too_many_arguments)]
    pub fn place(
        &mut self,
        point_x: f32,
        point_y: f32,
        point_z: f32,
        normal_x: i32,
        normal_y: i32,
        normal_z: i32,
        block_x: i32,
        block_y: i32,
        block_z: i32,
    ) -> bool {
        let hit = RayHit {
            point: Vec3::new(point_x, point_y, point_z),
            normal: IVec3::new(normal_x, normal_y, normal_z),
            block: BlockPosition(block_x, block_y, block_z),
            distance: 0.0,
        };
        self.sandbox.edit(EditAction::Place, Some(&hit)).is_some()
    }

    pub fn remove(&mut self, block_x: i32, block_y: i32, block_z: i32) -> bool {
        let block = BlockPosition(block_x, block_y, block_z);
        let hit = RayHit {
            point: block.center(),
            normal: IVec3::Y,
            block,
            distance: 0.0,
        };
        self.sandbox.edit(EditAction::Remove, Some(&hit)).is_some()
    }

    pub fn look(&mut self, dx: f32, dy: f32) {
        self.sandbox.camera.apply_look(dx, dy);
    }

    /// Picks with the built-in camera instead of a page-supplied hit.
    /// `button` is a DOM `MouseEvent.button`: left removes, right places.
    pub fn click(&mut self, button: i16) -> bool {
        let action = match MouseButton::from_web_button(button) {
            MouseButton::Left => EditAction::Remove,
            MouseButton::Right => EditAction::Place,
            MouseButton::Middle => return false,
        };
        let hit = self.sandbox.camera.cast(self.sandbox.world());
        self.sandbox.edit(action, hit.as_ref()).is_some()
    }

    pub fn block_count(&self) -> usize {
        self.sandbox.world().len()
    }

    /// Player eye position as [x, y, z].
    pub fn position(&self) -> Vec<f32> {
        self.sandbox.player().position.to_array().to_vec()
    }

    pub fn grounded(&self) -> bool {
        self.sandbox.player().grounded
    }

    /// 8 floats per block: center xyz, material id, rgba.
    pub fn instances(&self) -> Float32Array {
        let instances: Vec<BlockInstance> = build_instances(self.sandbox.world());
        let mut floats = Vec::with_capacity(instances.len() * 8);
        for instance in &instances {
            floats.extend_from_slice(&instance.position);
            floats.push(instance.material as f32);
            floats.extend_from_slice(&instance.color);
        }
        Float32Array::from(floats.as_slice())
    }
}
