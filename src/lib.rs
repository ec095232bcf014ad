// Re-export all public modules so they can be used from main.rs
pub mod logging;
pub mod config;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{ConfigError, SandboxConfig};
pub use controller::{FrameLoop, Sandbox};
