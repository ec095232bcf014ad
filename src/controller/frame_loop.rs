use std::collections::VecDeque;

use glam::Vec3;

use super::input::{InputEvent, InputState};
use super::physics::PlayerController;
use super::targeting::{EditAction, RaycastProvider, TargetResult, Targeting};
use crate::config::SandboxConfig;
use crate::model::{Camera, MoveIntent, PlayerState, RayHit, TerrainGenerator, VoxelWorld};
use crate::model::world::generate;
use crate::view::Renderer;

/// World, player and camera for one session.
///
/// A tick resolves movement completely before it touches the world, and
/// applies at most one edit, so collision scans never see a half-edited world.
pub struct Sandbox {
    world: VoxelWorld,
    player: PlayerController,
    targeting: Targeting,
    pub camera: Camera,
}

impl Sandbox {
    /// Generates the terrain once and spawns the player.
    pub fn new(config: &SandboxConfig) -> Self {
        let mut world = VoxelWorld::new();
        generate(&mut world, config.world.size, &TerrainGenerator::new());
        tracing::info!(size = config.world.size, blocks = world.len(), "world ready");
        Self::with_world(world, config)
    }

    pub fn with_world(world: VoxelWorld, config: &SandboxConfig) -> Self {
        let spawn = Vec3::from_array(config.player.spawn);
        let mut camera = Camera::new(spawn);
        camera.reach = config.targeting.reach;
        Self {
            world,
            player: PlayerController::new(spawn, config.physics),
            targeting: Targeting::new(config.targeting.placement_material),
            camera,
        }
    }

    pub fn world(&self) -> &VoxelWorld {
        &self.world
    }

    pub fn player(&self) -> &PlayerState {
        self.player.state()
    }

    /// Movement only; the camera eye follows the player.
    pub fn step(&mut self, intent: &MoveIntent) {
        self.player.update(intent, &self.world);
        self.camera.eye = self.player.position();
    }

    /// Resolves and applies one edit against a hit supplied from outside.
    pub fn edit(&mut self, action: EditAction, hit: Option<&RayHit>) -> Option<TargetResult> {
        let target = self.targeting.resolve(hit, action, &self.player.bounding_box())?;
        if target.apply(&mut self.world) {
            tracing::debug!(?target, blocks = self.world.len(), "world edited");
            Some(target)
        } else {
            tracing::debug!(?target, "edit rejected by world");
            None
        }
    }

    /// One simulation step, picking with the sandbox camera.
    pub fn tick(
        &mut self,
        intent: &MoveIntent,
        action: Option<EditAction>,
    ) -> Option<TargetResult> {
        self.step(intent);
        let action = action?;
        let hit = self.camera.cast(&self.world);
        self.edit(action, hit.as_ref())
    }

    /// One simulation step, picking with an external raycast provider.
    pub fn tick_with<P>(
        &mut self,
        intent: &MoveIntent,
        action: Option<EditAction>,
        provider: &P,
    ) -> Option<TargetResult>
    where
        P: RaycastProvider + ?Sized,
    {
        self.step(intent);
        let action = action?;
        let hit = provider.cast(&self.world);
        self.edit(action, hit.as_ref())
    }
}

/// Everything the loop needs from the input side for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub intent: MoveIntent,
    pub action: Option<EditAction>,
    /// pointer-lock gate; movement freezes while false
    pub locked: bool,
    pub look: (f32, f32),
}

pub trait InputSource {
    /// Input for the next tick, or None to stop the loop.
    fn poll(&mut self) -> Option<FrameInput>;
}

/// Replays batches of input events, one batch per tick.
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
    state: InputState,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            state: InputState::default(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<FrameInput> {
        let events = self.frames.pop_front()?;
        for event in &events {
            self.state.process_event(event);
        }
        Some(FrameInput {
            intent: self.state.intent(),
            action: self.state.take_action(),
            locked: self.state.pointer_locked,
            look: self.state.consume_look(),
        })
    }
}

/// Counters reported when the loop stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub frames: u64,
    pub ticks: u64,
    pub edits: u64,
}

/// Explicit fixed-tick loop: poll input, simulate if locked, render.
pub struct FrameLoop<I: InputSource, R: Renderer> {
    pub sandbox: Sandbox,
    pub input: I,
    pub renderer: R,
    pub max_frames: Option<u64>,
}

impl<I: InputSource, R: Renderer> FrameLoop<I, R> {
    pub fn new(sandbox: Sandbox, input: I, renderer: R) -> Self {
        Self {
            sandbox,
            input,
            renderer,
            max_frames: None,
        }
    }

    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    /// Runs one frame. Returns false once the input source is exhausted.
    pub fn frame(&mut self, stats: &mut LoopStats) -> bool {
        let Some(input) = self.input.poll() else {
            return false;
        };

        if input.locked {
            self.sandbox.camera.apply_look(input.look.0, input.look.1);
            if self.sandbox.tick(&input.intent, input.action).is_some() {
                stats.edits += 1;
            }
            stats.ticks += 1;
        }

        self.renderer.draw(self.sandbox.world(), self.sandbox.player());
        stats.frames += 1;
        true
    }

    pub fn run(&mut self) -> LoopStats {
        let mut stats = LoopStats::default();
        tracing::info!(blocks = self.sandbox.world().len(), "frame loop started");

        let mut running = true;
        while running {
            running = self.frame(&mut stats);
            if let Some(max) = self.max_frames {
                running &= stats.frames < max;
            }
        }

        tracing::info!(
            frames = stats.frames,
            ticks = stats.ticks,
            edits = stats.edits,
            position = ?self.sandbox.player().position,
            "frame loop stopped"
        );
        stats
    }
}
