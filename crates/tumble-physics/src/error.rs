//! Physics errors
//!
//! Only the spawn boundary and configuration validation can fail; stepping
//! never does.

use thiserror::Error;

/// Rejected spawn request. No body is created.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpawnError {
    #[error("Mass must be positive and finite, got {0}")]
    InvalidMass(f32),

    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Box half-extents must be positive and finite, got {0:?}")]
    InvalidHalfExtents(glam::Vec3),

    #[error("Lifetime must be positive, got {0}")]
    InvalidLifetime(f32),

    #[error("Non-finite {field}: {value:?}")]
    NonFinite { field: &'static str, value: glam::Vec3 },
}

/// Result type for physics operations
pub type PhysicsResult<T> = Result<T, SpawnError>;

/// Physics configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsConfigError {
    #[error("{field} = {value} is out of range, expected {expected}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("max_objects must be at least 1")]
    ZeroCapacity,
}

/// Result type for configuration validation
pub type PhysicsConfigResult<T> = Result<T, PhysicsConfigError>;
