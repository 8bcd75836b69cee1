//! # Tumble Game
//!
//! First-person sandbox on top of `tumble-physics`: walk around, shoot
//! spheres, toss crates, and watch them settle.
//!
//! ## Modules
//! - `config` - JSON game configuration
//! - `camera` - Yaw/pitch mouse-look camera
//! - `player` - Kinematic walking controller
//! - `input` - Key bindings and per-frame actions
//! - `spawner` - Seeded sphere and crate requests
//! - `session` - Frame loop tying everything together
//! - `hud` - Overlay text

pub mod camera;
pub mod config;
pub mod hud;
pub mod input;
pub mod player;
pub mod session;
pub mod spawner;

pub use camera::Camera;
pub use config::{ConfigError, ConfigResult, GameConfig};
pub use hud::HudInfo;
pub use input::{Actions, InputEvent, InputFrame, InputState, KeyBindings, KeyCode};
pub use player::{PlayerController, Shot};
pub use session::Session;
pub use spawner::Spawner;
