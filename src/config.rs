//! Sandbox configuration.
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! yields the stock game: a 50x50 hill patch, 1.8-tall player, fixed-tick
//! physics constants.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::controller::physics::LandingRollback;
use crate::model::Material;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Largest accepted player width or height, in blocks.
pub const MAX_PLAYER_EXTENT: f32 = 16.0;

/// Longest accepted picking ray, in blocks.
pub const MAX_REACH: f32 = 64.0;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SandboxConfig {
    pub world: WorldConfig,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub targeting: TargetingConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// edge length of the generated square patch, in blocks
    pub size: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { size: 50 }
    }
}

/// Per-tick constants; nothing here is scaled by frame time.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub player_height: f32,
    pub player_width: f32,
    pub landing: LandingRollback,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.15,
            gravity: 0.02,
            jump_impulse: 0.5,
            player_height: 1.8,
            player_width: 1.0,
            landing: LandingRollback::Full,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub spawn: [f32; 3],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { spawn: [0.0, 10.0, 0.0] }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TargetingConfig {
    pub placement_material: Material,
    /// max ray length used by the camera raycast
    pub reach: f32,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            placement_material: Material::Dirt,
            reach: 8.0,
        }
    }
}

impl SandboxConfig {
    pub fn from_toml_str(raw: &str) -> ConfigResult<Self> {
        let config: SandboxConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigResult<()> {
            Err(ConfigError::Invalid { field, reason: reason.into() })
        }

        let p = &self.physics;
        if self.world.size <= 0 {
            return invalid("world.size", format!("must be positive, got {}", self.world.size));
        }
        if !(p.player_height > 0.0 && p.player_height <= MAX_PLAYER_EXTENT) {
            return invalid(
                "physics.player_height",
                format!("must be in (0, {MAX_PLAYER_EXTENT}], got {}", p.player_height),
            );
        }
        if !(p.player_width > 0.0 && p.player_width <= MAX_PLAYER_EXTENT) {
            return invalid(
                "physics.player_width",
                format!("must be in (0, {MAX_PLAYER_EXTENT}], got {}", p.player_width),
            );
        }
        if !(p.move_speed >= 0.0 && p.move_speed.is_finite()) {
            return invalid(
                "physics.move_speed",
                format!("must be finite and not negative, got {}", p.move_speed),
            );
        }
        if !(p.gravity >= 0.0 && p.gravity.is_finite()) {
            return invalid(
                "physics.gravity",
                format!("must be finite and not negative, got {}", p.gravity),
            );
        }
        if !p.jump_impulse.is_finite() {
            return invalid("physics.jump_impulse", "must be finite");
        }
        if !self.player.spawn.iter().all(|c| c.is_finite()) {
            return invalid("player.spawn", "must be finite");
        }
        if !(self.targeting.reach > 0.0 && self.targeting.reach <= MAX_REACH) {
            return invalid(
                "targeting.reach",
                format!("must be in (0, {MAX_REACH}], got {}", self.targeting.reach),
            );
        }
        Ok(())
    }
}
