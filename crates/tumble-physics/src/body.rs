//! Dynamic bodies
//!
//! A [`PhysicsObject`] is one live rigid body: a closed [`Shape`], linear state,
//! and a lifetime. Bodies integrate themselves; collision and removal are
//! driven by the world.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use tumble_core::Aabb;
use tumble_core::time::clamp_step;

use crate::error::{PhysicsResult, SpawnError};

/// Stable body identity. Never reused within a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u64);

impl BodyId {
    /// Get the raw ID value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Collision shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
}

impl Shape {
    /// Sphere of the given radius
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Cube with equal half-extents on every axis
    pub fn cube(half_size: f32) -> Self {
        Self::Box { half_extents: Vec3::splat(half_size) }
    }

    /// Axis-aligned bounds when centered at `center`
    pub fn bounds(&self, center: Vec3) -> Aabb {
        match *self {
            Self::Sphere { radius } => Aabb::from_center_half_extents(center, Vec3::splat(radius)),
            Self::Box { half_extents } => Aabb::from_center_half_extents(center, half_extents),
        }
    }

    fn validate(&self) -> PhysicsResult<()> {
        match *self {
            Self::Sphere { radius } => {
                if radius > 0.0 && radius.is_finite() {
                    Ok(())
                } else {
                    Err(SpawnError::InvalidRadius(radius))
                }
            }
            Self::Box { half_extents } => {
                if half_extents.is_finite() && half_extents.min_element() > 0.0 {
                    Ok(())
                } else {
                    Err(SpawnError::InvalidHalfExtents(half_extents))
                }
            }
        }
    }
}

/// Request to add a body to the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub position: Vec3,
    pub velocity: Vec3,
    pub shape: Shape,
    pub mass: f32,
    /// Overrides the world's default lifetime
    pub lifetime: Option<f32>,
    /// Initial Euler rotation in degrees (boxes only)
    pub rotation: Vec3,
    /// Spin rate in degrees per second (boxes only)
    pub spin: Vec3,
}

impl SpawnRequest {
    /// Body at rest with the given shape and mass
    pub fn new(position: Vec3, shape: Shape, mass: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            shape,
            mass,
            lifetime: None,
            rotation: Vec3::ZERO,
            spin: Vec3::ZERO,
        }
    }

    /// Sphere at rest
    pub fn sphere(position: Vec3, radius: f32, mass: f32) -> Self {
        Self::new(position, Shape::sphere(radius), mass)
    }

    /// Cube at rest
    pub fn cube(position: Vec3, half_size: f32, mass: f32) -> Self {
        Self::new(position, Shape::cube(half_size), mass)
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_spin(mut self, spin: Vec3) -> Self {
        self.spin = spin;
        self
    }

    /// Check the request describes a physically valid body
    pub fn validate(&self) -> PhysicsResult<()> {
        if !(self.mass > 0.0 && self.mass.is_finite()) {
            return Err(SpawnError::InvalidMass(self.mass));
        }
        self.shape.validate()?;
        if let Some(lifetime) = self.lifetime {
            if !(lifetime > 0.0) {
                return Err(SpawnError::InvalidLifetime(lifetime));
            }
        }
        let vectors = [
            ("position", self.position),
            ("velocity", self.velocity),
            ("rotation", self.rotation),
            ("spin", self.spin),
        ];
        for (field, value) in vectors {
            if !value.is_finite() {
                return Err(SpawnError::NonFinite { field, value });
            }
        }
        Ok(())
    }
}

/// Why a body left the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Removal {
    /// Lived longer than its lifetime
    Expired,
    /// Fell below the despawn height
    OutOfBounds,
    /// Position or velocity became non-finite
    Corrupted,
    /// Dropped to stay under the body cap
    Evicted,
}

/// A live dynamic body
#[derive(Debug, Clone)]
pub struct PhysicsObject {
    id: BodyId,
    shape: Shape,
    mass: f32,
    age: f32,
    max_lifetime: f32,
    on_ground: bool,
    /// World-space center
    pub position: Vec3,
    /// World-space linear velocity
    pub velocity: Vec3,
    /// Euler rotation in degrees; cosmetic, collision treats boxes as axis-aligned
    pub rotation: Vec3,
    /// Rotation rate in degrees per second
    pub spin: Vec3,
}

impl PhysicsObject {
    /// Build a body from a spawn request, validating it first
    pub fn from_request(
        id: BodyId,
        request: &SpawnRequest,
        default_lifetime: f32,
    ) -> PhysicsResult<Self> {
        request.validate()?;
        let spins = matches!(request.shape, Shape::Box { .. });
        Ok(Self {
            id,
            shape: request.shape,
            mass: request.mass,
            age: 0.0,
            max_lifetime: request.lifetime.unwrap_or(default_lifetime),
            on_ground: false,
            position: request.position,
            velocity: request.velocity,
            rotation: if spins { request.rotation } else { Vec3::ZERO },
            spin: if spins { request.spin } else { Vec3::ZERO },
        })
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// `1 / mass`; mass is validated positive at spawn
    pub fn inverse_mass(&self) -> f32 {
        1.0 / self.mass
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    pub fn max_lifetime(&self) -> f32 {
        self.max_lifetime
    }

    /// Whether a ground contact was resolved during the last step
    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub(crate) fn set_on_ground(&mut self, on_ground: bool) {
        self.on_ground = on_ground;
    }

    /// Current axis-aligned bounds
    pub fn bounds(&self) -> Aabb {
        self.shape.bounds(self.position)
    }

    /// Orientation for drawing
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            self.rotation.z.to_radians(),
        )
    }

    /// Advance by one semi-implicit Euler step.
    ///
    /// `dt` is clamped into `[0, max_dt]` first. Velocity is updated before
    /// position. Returns the step actually applied.
    pub fn integrate(&mut self, dt: f32, gravity: Vec3, max_dt: f32) -> f32 {
        let dt = clamp_step(dt, max_dt);

        self.velocity += gravity * dt;
        self.position += self.velocity * dt;
        if matches!(self.shape, Shape::Box { .. }) {
            self.rotation += self.spin * dt;
        }
        self.age += dt;

        dt
    }

    /// Scale down spin; used while resting on the ground
    pub fn damp_spin(&mut self, factor: f32) {
        self.spin *= factor;
    }

    /// Whether position and velocity are still finite numbers
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Reason this body should leave the world, if any.
    ///
    /// Corruption is checked first, then lifetime, then height.
    pub fn removal(&self, despawn_height: f32) -> Option<Removal> {
        if !self.is_finite() {
            Some(Removal::Corrupted)
        } else if self.age > self.max_lifetime {
            Some(Removal::Expired)
        } else if self.position.y < despawn_height {
            Some(Removal::OutOfBounds)
        } else {
            None
        }
    }

    /// Read-only snapshot for renderers
    pub fn view(&self) -> BodyView {
        BodyView {
            id: self.id,
            position: self.position,
            orientation: self.orientation(),
            shape: self.shape,
        }
    }
}

/// What a renderer needs to draw one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyView {
    pub id: BodyId,
    pub position: Vec3,
    pub orientation: Quat,
    pub shape: Shape,
}
