//! Physics world configuration

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsConfigError, PhysicsConfigResult};

/// Physics world configuration
///
/// Deserializes with per-field defaults, so a partial document only overrides
/// the constants it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical acceleration in m/s² (negative pulls down)
    pub gravity: f32,
    /// Y coordinate of the ground plane
    pub ground_height: f32,
    /// Fraction of approach speed kept after a contact, in `[0, 1]`
    pub restitution: f32,
    /// Coulomb friction coefficient, `>= 0`
    pub friction_coefficient: f32,
    /// Largest time step applied in one `step` call, in seconds
    pub max_dt: f32,
    /// Live body cap; the oldest bodies are evicted beyond it
    pub max_objects: usize,
    /// Bodies whose center falls below this Y are removed
    pub despawn_height: f32,
    /// Lifetime in seconds for spawns that don't specify one
    pub default_lifetime: f32,
    /// Upward speed below which a grounded body stops bouncing (0 disables)
    pub rest_speed_threshold: f32,
    /// Per-step multiplier on box spin while grounded
    pub spin_damping: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            ground_height: 0.0,
            restitution: 0.45,
            friction_coefficient: 0.82,
            max_dt: 0.05,
            max_objects: 200,
            despawn_height: -60.0,
            default_lifetime: 120.0,
            rest_speed_threshold: 0.3,
            spin_damping: 0.92,
        }
    }
}

impl PhysicsConfig {
    /// Check every constant is in range
    pub fn validate(&self) -> PhysicsConfigResult<()> {
        let finite = [
            ("gravity", self.gravity),
            ("ground_height", self.ground_height),
            ("despawn_height", self.despawn_height),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(PhysicsConfigError::NotFinite { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(PhysicsConfigError::OutOfRange {
                field: "restitution",
                value: self.restitution,
                expected: "[0, 1]",
            });
        }
        if !(self.friction_coefficient >= 0.0 && self.friction_coefficient.is_finite()) {
            return Err(PhysicsConfigError::OutOfRange {
                field: "friction_coefficient",
                value: self.friction_coefficient,
                expected: ">= 0",
            });
        }
        if !(self.max_dt > 0.0 && self.max_dt.is_finite()) {
            return Err(PhysicsConfigError::OutOfRange {
                field: "max_dt",
                value: self.max_dt,
                expected: "> 0",
            });
        }
        if !(self.default_lifetime > 0.0) {
            return Err(PhysicsConfigError::OutOfRange {
                field: "default_lifetime",
                value: self.default_lifetime,
                expected: "> 0",
            });
        }
        if !(self.rest_speed_threshold >= 0.0 && self.rest_speed_threshold.is_finite()) {
            return Err(PhysicsConfigError::OutOfRange {
                field: "rest_speed_threshold",
                value: self.rest_speed_threshold,
                expected: ">= 0",
            });
        }
        if !(0.0..=1.0).contains(&self.spin_damping) {
            return Err(PhysicsConfigError::OutOfRange {
                field: "spin_damping",
                value: self.spin_damping,
                expected: "[0, 1]",
            });
        }
        if self.max_objects == 0 {
            return Err(PhysicsConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Gravity as an acceleration vector
    pub fn gravity_vector(&self) -> glam::Vec3 {
        glam::Vec3::new(0.0, self.gravity, 0.0)
    }
}
