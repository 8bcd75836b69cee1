//! Collision response
//!
//! Turns a [`Contact`] into position and velocity changes, in this order:
//! 1. Positional correction split by inverse mass
//! 2. Normal impulse with restitution (skipped for separating pairs)
//! 3. Friction impulse bounded by `friction * normal_impulse`
//!
//! The ground is modeled as a participant with zero inverse mass, so ground and
//! body-body contacts share one code path.

use glam::Vec3;
use tumble_core::math::{decompose, EPSILON};

use crate::body::PhysicsObject;
use crate::collision::Contact;
use crate::config::PhysicsConfig;

/// Constants applied to every contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactMaterial {
    /// Fraction of approach speed kept, `[0, 1]`
    pub restitution: f32,
    /// Coulomb coefficient
    pub friction: f32,
    /// Ground contacts only: upward speed below this is zeroed
    pub rest_speed: f32,
}

impl ContactMaterial {
    pub fn new(restitution: f32, friction: f32) -> Self {
        Self {
            restitution,
            friction,
            rest_speed: 0.0,
        }
    }

    pub fn with_rest_speed(mut self, rest_speed: f32) -> Self {
        self.rest_speed = rest_speed;
        self
    }
}

impl From<&PhysicsConfig> for ContactMaterial {
    fn from(config: &PhysicsConfig) -> Self {
        Self::new(config.restitution, config.friction_coefficient)
            .with_rest_speed(config.rest_speed_threshold)
    }
}

/// Impulse magnitudes applied by one resolution
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactResponse {
    pub normal_impulse: f32,
    pub friction_impulse: f32,
}

impl ContactResponse {
    /// Whether any velocity changed
    pub fn is_active(&self) -> bool {
        self.normal_impulse > 0.0
    }
}

/// Resolve a contact between two bodies. `contact.normal` points from `a` to `b`.
pub fn resolve_pair(
    a: &mut PhysicsObject,
    b: &mut PhysicsObject,
    contact: &Contact,
    material: &ContactMaterial,
) -> ContactResponse {
    resolve(Some(a), b, contact, material)
}

/// Resolve a contact between the ground and a body. `contact.normal` points up.
pub fn resolve_ground(
    body: &mut PhysicsObject,
    contact: &Contact,
    material: &ContactMaterial,
) -> ContactResponse {
    let response = resolve(None, body, contact, material);

    if response.is_active() && material.rest_speed > 0.0 {
        let rising = body.velocity.dot(contact.normal);
        if rising > 0.0 && rising < material.rest_speed {
            body.velocity -= contact.normal * rising;
        }
    }

    response
}

fn resolve(
    mut a: Option<&mut PhysicsObject>,
    b: &mut PhysicsObject,
    contact: &Contact,
    material: &ContactMaterial,
) -> ContactResponse {
    let normal = contact.normal;
    let inv_a = a.as_ref().map_or(0.0, |a| a.inverse_mass());
    let inv_b = b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return ContactResponse::default();
    }

    // 1. De-penetration
    if contact.penetration > 0.0 {
        if let Some(a) = a.as_mut() {
            a.position -= normal * (contact.penetration * (inv_a / inv_sum));
        }
        b.position += normal * (contact.penetration * (inv_b / inv_sum));
    }

    // 2. Normal impulse
    let approach = relative_velocity(a.as_deref(), b).dot(normal);
    if approach >= 0.0 {
        return ContactResponse::default();
    }

    let normal_impulse = -(1.0 + material.restitution) * approach / inv_sum;
    apply_impulse(a.as_deref_mut(), b, normal * normal_impulse, inv_a, inv_b);

    // 3. Friction, never reversing the sliding direction
    let (_, tangent) = decompose(relative_velocity(a.as_deref(), b), normal);
    let slide_speed = tangent.length();
    let mut friction_impulse = 0.0;
    if slide_speed > EPSILON {
        let stopping = slide_speed / inv_sum;
        friction_impulse = (material.friction * normal_impulse).min(stopping);
        let direction = tangent / slide_speed;
        apply_impulse(a.as_deref_mut(), b, -direction * friction_impulse, inv_a, inv_b);
    }

    ContactResponse {
        normal_impulse,
        friction_impulse,
    }
}

/// Velocity of `b` relative to `a` (the ground is at rest)
fn relative_velocity(a: Option<&PhysicsObject>, b: &PhysicsObject) -> Vec3 {
    b.velocity - a.map_or(Vec3::ZERO, |a| a.velocity)
}

/// Apply `impulse` to `b` and its reaction to `a`
fn apply_impulse(
    a: Option<&mut PhysicsObject>,
    b: &mut PhysicsObject,
    impulse: Vec3,
    inv_a: f32,
    inv_b: f32,
) {
    if let Some(a) = a {
        a.velocity -= impulse * inv_a;
    }
    b.velocity += impulse * inv_b;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyId, SpawnRequest};
    use crate::collision::{detect_ground, detect_pair};
    use tumble_core::UP;

    fn sphere(id: u64, position: Vec3, velocity: Vec3, mass: f32) -> PhysicsObject {
        let request = SpawnRequest::sphere(position, 0.5, mass).with_velocity(velocity);
        PhysicsObject::from_request(BodyId(id), &request, 120.0).unwrap()
    }

    fn resting_contact() -> Contact {
        Contact {
            normal: UP,
            penetration: 0.0,
            point: Vec3::ZERO,
        }
    }

    #[test]
    fn test_pair_separates_and_conserves_momentum() {
        let mut a = sphere(1, Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.0);
        let mut b = sphere(2, Vec3::new(0.8, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), 3.0);
        let momentum_before = a.velocity * a.mass() + b.velocity * b.mass();

        let contact = detect_pair(&a, &b).unwrap();
        let response = resolve_pair(&mut a, &mut b, &contact, &ContactMaterial::new(0.5, 0.0));

        assert!(response.is_active());
        assert!(detect_pair(&a, &b).is_none() || detect_pair(&a, &b).unwrap().penetration < 1e-5);
        let momentum_after = a.velocity * a.mass() + b.velocity * b.mass();
        assert!((momentum_before - momentum_after).length() < 1e-5);

        // Heavier body moves less during de-penetration
        assert!((a.position.x + 0.15).abs() < 1e-5);
        assert!((b.position.x - 0.85).abs() < 1e-5);
    }

    #[test]
    fn test_equal_mass_elastic_exchange() {
        let mut a = sphere(1, Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), 1.0);
        let mut b = sphere(2, Vec3::new(0.9, 0.0, 0.0), Vec3::ZERO, 1.0);
        let contact = detect_pair(&a, &b).unwrap();
        resolve_pair(&mut a, &mut b, &contact, &ContactMaterial::new(1.0, 0.0));

        assert!(a.velocity.length() < 1e-5);
        assert!((b.velocity.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_separating_pair_gets_no_impulse() {
        let mut a = sphere(1, Vec3::ZERO, Vec3::new(-1.0, 0.0, 0.0), 1.0);
        let mut b = sphere(2, Vec3::new(0.9, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 1.0);
        let contact = detect_pair(&a, &b).unwrap();
        let response = resolve_pair(&mut a, &mut b, &contact, &ContactMaterial::new(1.0, 0.5));

        assert!(!response.is_active());
        assert_eq!(a.velocity.x, -1.0);
        assert_eq!(b.velocity.x, 1.0);
        // Still pushed apart
        assert!(b.position.x - a.position.x >= 1.0 - 1e-5);
    }

    #[test]
    fn test_ground_takes_full_correction() {
        let mut body = sphere(1, Vec3::new(0.0, 0.3, 0.0), Vec3::new(0.0, -5.0, 0.0), 1.0);
        let contact = detect_ground(&body, 0.0).unwrap();
        resolve_ground(&mut body, &contact, &ContactMaterial::new(0.5, 0.0));

        assert!((body.position.y - 0.5).abs() < 1e-6);
        assert!((body.velocity.y - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_resting_body_is_unchanged() {
        let mut body = sphere(1, Vec3::new(0.0, 0.5, 0.0), Vec3::ZERO, 1.0);
        let material = ContactMaterial::new(0.45, 0.82).with_rest_speed(0.3);

        for _ in 0..100 {
            let response = resolve_ground(&mut body, &resting_contact(), &material);
            assert!(!response.is_active());
        }
        assert_eq!(body.position, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(body.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_zero_restitution_kills_normal_velocity() {
        let mut body = sphere(1, Vec3::new(0.0, 0.4, 0.0), Vec3::new(0.0, -7.0, 0.0), 1.0);
        let contact = detect_ground(&body, 0.0).unwrap();
        resolve_ground(&mut body, &contact, &ContactMaterial::new(0.0, 0.0));
        assert!(body.velocity.y.abs() < 1e-6);
    }

    #[test]
    fn test_full_restitution_preserves_normal_speed() {
        let mut body = sphere(1, Vec3::new(0.0, 0.4, 0.0), Vec3::new(0.0, -7.0, 0.0), 1.0);
        let contact = detect_ground(&body, 0.0).unwrap();
        resolve_ground(&mut body, &contact, &ContactMaterial::new(1.0, 0.0).with_rest_speed(0.3));
        assert!((body.velocity.y - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_rest_speed_stops_small_bounces() {
        let mut body = sphere(1, Vec3::new(0.0, 0.45, 0.0), Vec3::new(0.0, -0.4, 0.0), 1.0);
        let contact = detect_ground(&body, 0.0).unwrap();
        resolve_ground(&mut body, &contact, &ContactMaterial::new(0.5, 0.0).with_rest_speed(0.3));
        assert_eq!(body.velocity.y, 0.0);

        // Disabled threshold keeps the tiny bounce
        let mut body = sphere(2, Vec3::new(0.0, 0.45, 0.0), Vec3::new(0.0, -0.4, 0.0), 1.0);
        resolve_ground(&mut body, &contact, &ContactMaterial::new(0.5, 0.0));
        assert!((body.velocity.y - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_friction_slows_sliding() {
        let mut body = sphere(1, Vec3::new(0.0, 0.45, 0.0), Vec3::new(4.0, -2.0, 0.0), 1.0);
        let contact = detect_ground(&body, 0.0).unwrap();
        let response = resolve_ground(&mut body, &contact, &ContactMaterial::new(0.0, 0.5));

        // j = 2, friction impulse = 0.5 * 2 = 1
        assert!((response.normal_impulse - 2.0).abs() < 1e-5);
        assert!((response.friction_impulse - 1.0).abs() < 1e-5);
        assert!((body.velocity.x - 3.0).abs() < 1e-5);
        assert!(body.velocity.z.abs() < 1e-6);
    }

    #[test]
    fn test_friction_never_reverses_sliding() {
        let mut body = sphere(1, Vec3::new(0.0, 0.45, 0.0), Vec3::new(0.5, -10.0, -0.2), 1.0);
        let contact = detect_ground(&body, 0.0).unwrap();
        resolve_ground(&mut body, &contact, &ContactMaterial::new(0.0, 5.0));

        assert!(body.velocity.x.abs() < 1e-5);
        assert!(body.velocity.z.abs() < 1e-5);
    }

    #[test]
    fn test_pair_friction_matches_ground_formula() {
        // A static heavy sphere below acts like ground for the tangential part
        let mut top = sphere(1, Vec3::new(0.0, 0.95, 0.0), Vec3::new(4.0, -2.0, 0.0), 1.0);
        let mut floor = sphere(2, Vec3::ZERO, Vec3::ZERO, 1.0e9);
        let contact = detect_pair(&floor, &top).unwrap();
        resolve_pair(&mut floor, &mut top, &contact, &ContactMaterial::new(0.0, 0.5));

        assert!((top.velocity.x - 3.0).abs() < 1e-3);
        assert!(top.velocity.y.abs() < 1e-3);
    }
}
