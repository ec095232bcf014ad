pub mod block;
pub mod voxel_world;
pub mod terrain;

pub use block::{Block, BlockPosition, Material};
pub use voxel_world::VoxelWorld;
pub use terrain::{generate, HeightMap, TerrainGenerator};
