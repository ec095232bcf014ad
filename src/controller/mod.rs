// CONTROLLER: Input, game logic, and update loop
pub mod collision;
pub mod input;
pub mod physics;
pub mod targeting;
pub mod frame_loop;

pub use collision::{Aabb, CollisionEngine};
pub use input::{InputEvent, InputState, KeyBindings, MouseButton};
pub use physics::{LandingRollback, PlayerController};
pub use targeting::{EditAction, RaycastProvider, TargetResult, Targeting};
pub use frame_loop::{FrameInput, FrameLoop, InputSource, LoopStats, Sandbox, ScriptedInput};
