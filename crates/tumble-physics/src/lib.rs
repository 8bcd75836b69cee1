//! # Tumble Physics
//!
//! Rigid-body simulation for the Tumble sandbox.
//!
//! ## Features
//! - Spheres and axis-aligned boxes with lifetimes
//! - Semi-implicit Euler integration under a capped time step
//! - Sphere-sphere, sphere-ground, and box-ground contacts
//! - Impulse response with restitution and Coulomb-clamped friction
//! - Bounded body count with oldest-first eviction
//!
//! Everything runs on the caller's thread; a [`PhysicsWorld`] is stepped once
//! per frame and read back for drawing.

pub mod body;
pub mod collision;
pub mod config;
pub mod error;
pub mod response;
pub mod world;

pub use body::{BodyId, BodyView, PhysicsObject, Removal, Shape, SpawnRequest};
pub use collision::Contact;
pub use config::PhysicsConfig;
pub use error::{PhysicsConfigError, PhysicsResult, SpawnError};
pub use response::{ContactMaterial, ContactResponse};
pub use world::{PhysicsWorld, StepStats};

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_physics_world() {
        let world = PhysicsWorld::new(PhysicsConfig::default());
        assert_eq!(world.config().gravity, -9.81);
        assert!(world.is_empty());
    }

    #[test]
    fn test_shape_constructors() {
        assert_eq!(Shape::sphere(0.5), Shape::Sphere { radius: 0.5 });
        assert_eq!(Shape::cube(0.5), Shape::Box { half_extents: Vec3::splat(0.5) });
    }
}
