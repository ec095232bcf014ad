// VIEW: Read-only presentation of the world
pub mod render;

pub use render::{build_instances, instance_bytes, BlockInstance, Renderer, SnapshotRenderer};
