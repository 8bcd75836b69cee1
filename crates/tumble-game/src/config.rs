//! Game configuration
//!
//! One JSON document drives the whole session. Every section deserializes
//! with defaults, so a file only needs the values it changes:
//!
//! ```json
//! { "physics": { "restitution": 0.8 }, "gameplay": { "shoot_speed": 45.0 } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tumble_physics::{PhysicsConfig, PhysicsConfigError};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid physics config: {0}")]
    Physics(#[from] PhysicsConfigError),

    #[error("{field} = {value} is out of range, expected {expected}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// First-person controller settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Walking speed in m/s
    pub speed: f32,
    /// Eye height above the ground
    pub height: f32,
    /// Upward speed applied on jump
    pub jump_speed: f32,
    /// Horizontal start point; the eye starts `height` above the ground
    pub start_x: f32,
    pub start_z: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 8.0,
            height: 1.75,
            jump_speed: 3.0,
            start_x: 0.0,
            start_z: 5.0,
        }
    }
}

/// Mouse-look settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Degrees per mouse unit
    pub mouse_sensitivity: f32,
    /// Maximum pitch either way, in degrees
    pub pitch_limit: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.15,
            pitch_limit: 89.0,
        }
    }
}

/// Shooting and HUD settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Launch speed of shot spheres
    pub shoot_speed: f32,
    /// Seconds between shots
    pub shoot_cooldown: f32,
    /// Distance in front of the eye where shots appear
    pub muzzle_offset: f32,
    /// Frames averaged for the FPS readout
    pub fps_sample_size: u32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            shoot_speed: 30.0,
            shoot_cooldown: 0.15,
            muzzle_offset: 1.2,
            fps_sample_size: 20,
        }
    }
}

/// Shot sphere settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub radius: f32,
    pub mass: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self { radius: 0.25, mass: 0.8 }
    }
}

/// Spawned crate settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrateConfig {
    /// Smallest half-extent
    pub min_size: f32,
    /// Largest half-extent
    pub max_size: f32,
    pub mass: f32,
    /// Distance along the view ray where crates appear
    pub spawn_distance: f32,
}

impl Default for CrateConfig {
    fn default() -> Self {
        Self {
            min_size: 0.3,
            max_size: 0.6,
            mass: 2.0,
            spawn_distance: 5.0,
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub camera: CameraConfig,
    pub gameplay: GameplayConfig,
    pub sphere: SphereConfig,
    pub crate_box: CrateConfig,
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Pretty JSON, as accepted by [`GameConfig::from_json_str`]
    pub fn to_json_pretty(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every section
    pub fn validate(&self) -> ConfigResult<()> {
        self.physics.validate()?;

        positive("player.speed", self.player.speed)?;
        positive("player.height", self.player.height)?;
        at_least_zero("player.jump_speed", self.player.jump_speed)?;
        finite("player.start_x", self.player.start_x)?;
        finite("player.start_z", self.player.start_z)?;

        finite("camera.mouse_sensitivity", self.camera.mouse_sensitivity)?;
        if !(self.camera.pitch_limit > 0.0 && self.camera.pitch_limit < 90.0) {
            return Err(ConfigError::OutOfRange {
                field: "camera.pitch_limit",
                value: self.camera.pitch_limit,
                expected: "(0, 90)",
            });
        }

        positive("gameplay.shoot_speed", self.gameplay.shoot_speed)?;
        at_least_zero("gameplay.shoot_cooldown", self.gameplay.shoot_cooldown)?;
        at_least_zero("gameplay.muzzle_offset", self.gameplay.muzzle_offset)?;

        positive("sphere.radius", self.sphere.radius)?;
        positive("sphere.mass", self.sphere.mass)?;

        positive("crate_box.min_size", self.crate_box.min_size)?;
        positive("crate_box.mass", self.crate_box.mass)?;
        at_least_zero("crate_box.spawn_distance", self.crate_box.spawn_distance)?;
        if !(self.crate_box.max_size >= self.crate_box.min_size && self.crate_box.max_size.is_finite()) {
            return Err(ConfigError::OutOfRange {
                field: "crate_box.max_size",
                value: self.crate_box.max_size,
                expected: ">= crate_box.min_size",
            });
        }

        Ok(())
    }

    /// Eye position the player starts from and returns to on reset
    pub fn player_start(&self) -> Vec3 {
        Vec3::new(
            self.player.start_x,
            self.physics.ground_height + self.player.height,
            self.player.start_z,
        )
    }
}

fn finite(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, expected: "a finite number" })
    }
}

fn positive(field: &'static str, value: f32) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, expected: "> 0" })
    }
}

fn at_least_zero(field: &'static str, value: f32) -> ConfigResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, expected: ">= 0" })
    }
}
