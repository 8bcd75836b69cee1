//! # Tumble Core
//!
//! Foundation shared by every Tumble crate:
//! - **Math**: glam re-exports plus guarded vector helpers (normalize, reflect)
//! - **Time**: clamped frame deltas, frame-rate averaging, cooldowns

pub mod math;
pub mod time;

pub use math::{Aabb, Quat, Vec3, EPSILON, UP};
pub use time::{Cooldown, FrameCounter, Stopwatch};
