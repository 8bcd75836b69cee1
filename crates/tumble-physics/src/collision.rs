//! Collision detection
//!
//! Direct pairwise tests with no broadphase; body counts are capped low enough
//! that the O(n²) pair loop is cheap.
//!
//! Normals point from the first participant toward the second. For ground
//! contacts the ground is the first participant, so the normal is world-up.

use glam::Vec3;
use tumble_core::math::{normalize_or, UP};

use crate::body::{PhysicsObject, Shape};

/// Contact produced by a positive test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal from the first participant to the second
    pub normal: Vec3,
    /// Overlap along the normal
    pub penetration: f32,
    /// World-space contact point
    pub point: Vec3,
}

/// Sphere against sphere.
///
/// Colliding iff the center distance is below the radius sum. Coincident
/// centers fall back to an up normal.
pub fn sphere_sphere(center_a: Vec3, radius_a: f32, center_b: Vec3, radius_b: f32) -> Option<Contact> {
    let offset = center_b - center_a;
    let distance = offset.length();
    let reach = radius_a + radius_b;

    if distance >= reach {
        return None;
    }

    let normal = normalize_or(offset, UP);
    let penetration = reach - distance;
    Some(Contact {
        normal,
        penetration,
        point: center_a + normal * (radius_a - penetration * 0.5),
    })
}

/// Sphere against the ground plane
pub fn sphere_ground(center: Vec3, radius: f32, ground_height: f32) -> Option<Contact> {
    ground_contact(center, center.y - radius, ground_height)
}

/// Axis-aligned box against the ground plane
pub fn box_ground(center: Vec3, half_extents: Vec3, ground_height: f32) -> Option<Contact> {
    ground_contact(center, center.y - half_extents.y, ground_height)
}

fn ground_contact(center: Vec3, lowest: f32, ground_height: f32) -> Option<Contact> {
    if lowest < ground_height {
        Some(Contact {
            normal: UP,
            penetration: ground_height - lowest,
            point: Vec3::new(center.x, ground_height, center.z),
        })
    } else {
        None
    }
}

/// Test two bodies against each other.
///
/// Only sphere pairs collide; boxes interact with the ground alone.
pub fn detect_pair(a: &PhysicsObject, b: &PhysicsObject) -> Option<Contact> {
    match (*a.shape(), *b.shape()) {
        (Shape::Sphere { radius: ra }, Shape::Sphere { radius: rb }) => {
            sphere_sphere(a.position, ra, b.position, rb)
        }
        (Shape::Sphere { .. }, Shape::Box { .. })
        | (Shape::Box { .. }, Shape::Sphere { .. })
        | (Shape::Box { .. }, Shape::Box { .. }) => None,
    }
}

/// Test a body against the ground plane
pub fn detect_ground(body: &PhysicsObject, ground_height: f32) -> Option<Contact> {
    match *body.shape() {
        Shape::Sphere { radius } => sphere_ground(body.position, radius, ground_height),
        Shape::Box { half_extents } => box_ground(body.position, half_extents, ground_height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyId, SpawnRequest};

    #[test]
    fn test_sphere_sphere_separated() {
        let contact = sphere_sphere(Vec3::ZERO, 1.0, Vec3::new(2.5, 0.0, 0.0), 1.0);
        assert!(contact.is_none());
    }

    #[test]
    fn test_sphere_sphere_touching_is_not_contact() {
        let contact = sphere_sphere(Vec3::ZERO, 1.0, Vec3::new(2.0, 0.0, 0.0), 1.0);
        assert!(contact.is_none());
    }

    #[test]
    fn test_sphere_sphere_overlapping() {
        let contact = sphere_sphere(Vec3::ZERO, 1.0, Vec3::new(1.5, 0.0, 0.0), 1.0).unwrap();
        assert!((contact.penetration - 0.5).abs() < 1e-6);
        assert_eq!(contact.normal, Vec3::X);
        assert!((contact.point.x - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_sphere_sphere_normal_points_a_to_b() {
        let contact = sphere_sphere(Vec3::new(0.0, 1.0, 0.0), 0.5, Vec3::new(0.0, 0.2, 0.0), 0.5).unwrap();
        assert!((contact.normal - Vec3::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn test_sphere_sphere_different_radii() {
        let contact = sphere_sphere(Vec3::ZERO, 2.0, Vec3::new(0.0, 0.0, 2.5), 1.0).unwrap();
        assert!((contact.penetration - 0.5).abs() < 1e-6);
        assert!((contact.normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_sphere_sphere_coincident_centers() {
        let contact = sphere_sphere(Vec3::ONE, 0.5, Vec3::ONE, 0.5).unwrap();
        assert_eq!(contact.normal, UP);
        assert!((contact.penetration - 1.0).abs() < 1e-6);
        assert!(contact.point.is_finite());
    }

    #[test]
    fn test_sphere_ground() {
        assert!(sphere_ground(Vec3::new(0.0, 1.0, 0.0), 0.5, 0.0).is_none());
        // Exactly touching is not a contact
        assert!(sphere_ground(Vec3::new(0.0, 0.5, 0.0), 0.5, 0.0).is_none());

        let contact = sphere_ground(Vec3::new(3.0, 0.3, -2.0), 0.5, 0.0).unwrap();
        assert_eq!(contact.normal, UP);
        assert!((contact.penetration - 0.2).abs() < 1e-6);
        assert_eq!(contact.point, Vec3::new(3.0, 0.0, -2.0));
    }

    #[test]
    fn test_sphere_ground_custom_height() {
        let contact = sphere_ground(Vec3::new(0.0, 2.2, 0.0), 0.5, 2.0).unwrap();
        assert!((contact.penetration - 0.3).abs() < 1e-6);
        assert_eq!(contact.point.y, 2.0);
    }

    #[test]
    fn test_box_ground() {
        let half = Vec3::new(0.3, 0.5, 0.3);
        assert!(box_ground(Vec3::new(0.0, 0.6, 0.0), half, 0.0).is_none());

        let contact = box_ground(Vec3::new(0.0, 0.4, 0.0), half, 0.0).unwrap();
        assert!((contact.penetration - 0.1).abs() < 1e-6);
        assert_eq!(contact.normal, UP);
    }

    #[test]
    fn test_detect_pair_ignores_boxes() {
        let sphere = PhysicsObject::from_request(BodyId(1), &SpawnRequest::sphere(Vec3::ZERO, 0.5, 1.0), 10.0).unwrap();
        let other = PhysicsObject::from_request(BodyId(2), &SpawnRequest::sphere(Vec3::new(0.6, 0.0, 0.0), 0.5, 1.0), 10.0).unwrap();
        let crate_body = PhysicsObject::from_request(BodyId(3), &SpawnRequest::cube(Vec3::ZERO, 0.5, 2.0), 10.0).unwrap();

        assert!(detect_pair(&sphere, &other).is_some());
        assert!(detect_pair(&sphere, &crate_body).is_none());
        assert!(detect_pair(&crate_body, &crate_body.clone()).is_none());
    }

    #[test]
    fn test_detect_ground_dispatches_on_shape() {
        let crate_body = PhysicsObject::from_request(BodyId(1), &SpawnRequest::cube(Vec3::new(0.0, 0.2, 0.0), 0.5, 2.0), 10.0).unwrap();
        let contact = detect_ground(&crate_body, 0.0).unwrap();
        assert!((contact.penetration - 0.3).abs() < 1e-6);
    }
}
