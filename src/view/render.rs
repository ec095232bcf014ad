use bytemuck::{Pod, Zeroable};

use crate::model::{Block, PlayerState, VoxelWorld};

/// Per-block instance data, laid out for direct upload as a GPU instance buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BlockInstance {
    pub position: [f32; 3],
    pub material: u32,
    pub color: [f32; 4],
}

impl From<&Block> for BlockInstance {
    fn from(block: &Block) -> Self {
        Self {
            position: block.position.center().to_array(),
            material: block.material.to_u8() as u32,
            color: block.material.color(),
        }
    }
}

/// One instance per block, in the world's enumeration order.
pub fn build_instances(world: &VoxelWorld) -> Vec<BlockInstance> {
    world.all().map(BlockInstance::from).collect()
}

pub fn instance_bytes(instances: &[BlockInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// Draws the world between ticks. Reads only.
pub trait Renderer {
    fn draw(&mut self, world: &VoxelWorld, player: &PlayerState);
}

/// Headless renderer: keeps the latest instance snapshot and logs a summary.
#[derive(Default)]
pub struct SnapshotRenderer {
    pub instances: Vec<BlockInstance>,
    pub frames: u64,
}

impl Renderer for SnapshotRenderer {
    fn draw(&mut self, world: &VoxelWorld, player: &PlayerState) {
        self.instances = build_instances(world);
        self.frames += 1;
        tracing::trace!(
            frame = self.frames,
            blocks = self.instances.len(),
            bytes = instance_bytes(&self.instances).len(),
            position = ?player.position,
            grounded = player.grounded,
            "frame"
        );
    }
}
