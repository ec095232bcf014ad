// terrain.rs - deterministic height-field terrain
//
// One column per (x, z). Each column is filled from y = 0 up to its height:
//   top layer            -> Grass
//   two layers below top -> Dirt
//   everything below     -> Stone
//
// Generation runs once at startup and is never re-invoked during play.

use super::block::{BlockPosition, Material};
use super::voxel_world::VoxelWorld;

/// Column height source. Implementations must be pure: the same (x, z)
/// always yields the same height.
pub trait HeightMap {
    fn height_at(&self, x: i32, z: i32) -> i32;
}

/// Rolling sine/cosine hills, heights in 0..=10.
#[derive(Clone, Copy, Debug)]
pub struct TerrainGenerator {
    pub frequency: f32,
    pub amplitude: f32,
    pub base_height: f32,
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self {
            frequency: 0.2,
            amplitude: 5.0,
            base_height: 5.0,
        }
    }
}

impl TerrainGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HeightMap for TerrainGenerator {
    fn height_at(&self, x: i32, z: i32) -> i32 {
        let h = (x as f32 * self.frequency).sin()
            * (z as f32 * self.frequency).cos()
            * self.amplitude
            + self.base_height;
        h.floor() as i32
    }
}

/// Populates `world` with a `size` x `size` patch of columns spanning
/// x, z in [-size/2, size/2). Columns with non-positive height stay empty.
/// Returns the number of blocks inserted.
pub fn generate<H>(world: &mut VoxelWorld, size: i32, heights: &H) -> usize
where
    H: HeightMap + ?Sized,
{
    let half = size / 2;
    let mut placed = 0;

    for x in -half..size - half {
        for z in -half..size - half {
            let height = heights.height_at(x, z).max(0);
            for y in 0..height {
                if world.place(BlockPosition(x, y, z), Material::for_layer(y, height)) {
                    placed += 1;
                }
            }
        }
    }

    tracing::debug!(size, placed, "terrain generated");
    placed
}
