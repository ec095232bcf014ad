// MODEL: Game state and data
pub mod world;
pub mod player;
pub mod camera;

pub use world::{Block, BlockPosition, Material, VoxelWorld, TerrainGenerator, HeightMap};
pub use player::{PlayerState, MoveIntent};
pub use camera::{Camera, RayHit};
