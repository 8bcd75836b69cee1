//! Math utilities
//!
//! Re-exports from glam and the guarded vector helpers the simulation relies on.
//! Every helper here is a pure function: identical inputs give bit-identical
//! outputs, which keeps stepping reproducible.

pub use glam::{Mat4, Quat, Vec2, Vec3};

/// Length below which a vector is treated as zero
pub const EPSILON: f32 = 1e-6;

/// World up axis. Also the fallback normal for degenerate contacts.
pub const UP: Vec3 = Vec3::Y;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from center and half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents of the AABB
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

/// Normalize `v`, returning `fallback` when its length is below [`EPSILON`].
///
/// Never divides by a near-zero length, so the result is never NaN for
/// finite input.
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let length = v.length();
    if length > EPSILON {
        v / length
    } else {
        fallback
    }
}

/// Normalize `v`, returning the zero vector for degenerate input
pub fn normalize(v: Vec3) -> Vec3 {
    normalize_or(v, Vec3::ZERO)
}

/// Reflect `v` about a unit `normal`: `v - 2 (v . n) n`
pub fn reflect(v: Vec3, normal: Vec3) -> Vec3 {
    v - normal * (2.0 * v.dot(normal))
}

/// Split `v` into its components along and across a unit `normal`.
///
/// Returns `(normal_part, tangent_part)` with `normal_part + tangent_part == v`.
pub fn decompose(v: Vec3, normal: Vec3) -> (Vec3, Vec3) {
    let along = normal * v.dot(normal);
    (along, v - along)
}
