//! Spawn request factory
//!
//! Turns player intent into physics spawn requests. Crates get randomized
//! size, toss velocity, and tumble from a seeded generator, so a session
//! replays identically from the same seed.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tumble_physics::SpawnRequest;

use crate::config::{CrateConfig, GameConfig, SphereConfig};
use crate::player::Shot;

/// Horizontal toss speed range for crates
const CRATE_TOSS_HORIZONTAL: f32 = 2.0;
/// Upward toss speed range for crates
const CRATE_TOSS_UP: (f32, f32) = (2.0, 6.0);
/// Largest initial crate spin per axis, deg/s
const CRATE_MAX_SPIN: f32 = 90.0;

/// Builds sphere and crate spawn requests
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: StdRng,
    seed: u64,
    sphere: SphereConfig,
    crate_box: CrateConfig,
}

impl Spawner {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            sphere: config.sphere.clone(),
            crate_box: config.crate_box.clone(),
        }
    }

    /// Seed in use
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the random sequence from the construction seed
    pub fn reseed(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    /// Sphere launched with `shot`
    pub fn sphere(&self, shot: Shot) -> SpawnRequest {
        SpawnRequest::sphere(shot.position, self.sphere.radius, self.sphere.mass).with_velocity(shot.velocity)
    }

    /// Randomly sized crate tossed up from `target`
    pub fn crate_at(&mut self, target: Vec3) -> SpawnRequest {
        let half_size = self.rng.random_range(self.crate_box.min_size..=self.crate_box.max_size);
        let velocity = Vec3::new(
            self.rng.random_range(-CRATE_TOSS_HORIZONTAL..=CRATE_TOSS_HORIZONTAL),
            self.rng.random_range(CRATE_TOSS_UP.0..=CRATE_TOSS_UP.1),
            self.rng.random_range(-CRATE_TOSS_HORIZONTAL..=CRATE_TOSS_HORIZONTAL),
        );
        let rotation = Vec3::new(
            self.rng.random_range(0.0..360.0),
            self.rng.random_range(0.0..360.0),
            self.rng.random_range(0.0..360.0),
        );
        let spin = Vec3::new(
            self.rng.random_range(-CRATE_MAX_SPIN..=CRATE_MAX_SPIN),
            self.rng.random_range(-CRATE_MAX_SPIN..=CRATE_MAX_SPIN),
            self.rng.random_range(-CRATE_MAX_SPIN..=CRATE_MAX_SPIN),
        );

        SpawnRequest::cube(target, half_size, self.crate_box.mass)
            .with_velocity(velocity)
            .with_rotation(rotation)
            .with_spin(spin)
    }

    /// Crate spawn distance from the config
    pub fn crate_distance(&self) -> f32 {
        self.crate_box.spawn_distance
    }
}
