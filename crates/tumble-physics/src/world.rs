//! Physics world
//!
//! Owns every live body and advances them one frame at a time:
//! 1. Clamp the frame delta
//! 2. Integrate every body
//! 3. Detect and resolve body pairs
//! 4. Detect and resolve ground contacts
//! 5. Retire expired, fallen, and corrupted bodies
//! 6. Enforce the body cap, oldest first
//!
//! Stepping never fails. Only spawning can be rejected.

use tumble_core::time::clamp_step;

use crate::body::{BodyId, BodyView, PhysicsObject, Removal, SpawnRequest};
use crate::collision::{detect_ground, detect_pair};
use crate::config::PhysicsConfig;
use crate::error::{PhysicsConfigResult, PhysicsResult};
use crate::response::{resolve_ground, resolve_pair, ContactMaterial};

/// Bodies reserved up front; larger caps grow on demand
const INITIAL_CAPACITY: usize = 256;

/// What happened during the last step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Body-body contacts resolved
    pub pair_contacts: usize,
    /// Body-ground contacts resolved
    pub ground_contacts: usize,
    /// Bodies retired for exceeding their lifetime
    pub expired: usize,
    /// Bodies retired for falling below the despawn height
    pub out_of_bounds: usize,
    /// Bodies force-removed for non-finite state
    pub corrupted: usize,
    /// Bodies evicted by the cap, including evictions at spawn since the previous step
    pub evicted: usize,
}

impl StepStats {
    /// All contacts resolved
    pub fn collisions(&self) -> usize {
        self.pair_contacts + self.ground_contacts
    }

    /// All bodies removed
    pub fn removed(&self) -> usize {
        self.expired + self.out_of_bounds + self.corrupted + self.evicted
    }

    fn record(&mut self, removal: Removal) {
        match removal {
            Removal::Expired => self.expired += 1,
            Removal::OutOfBounds => self.out_of_bounds += 1,
            Removal::Corrupted => self.corrupted += 1,
            Removal::Evicted => self.evicted += 1,
        }
    }
}

/// Physics world
pub struct PhysicsWorld {
    config: PhysicsConfig,
    material: ContactMaterial,
    /// Spawn order, oldest first
    bodies: Vec<PhysicsObject>,
    next_id: u64,
    pending_evictions: usize,
    last_step: StepStats,
    step_count: u64,
}

impl PhysicsWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            material: ContactMaterial::from(&config),
            bodies: Vec::with_capacity(config.max_objects.min(INITIAL_CAPACITY)),
            config,
            next_id: 1,
            pending_evictions: 0,
            last_step: StepStats::default(),
            step_count: 0,
        }
    }

    /// Create a world after validating `config`
    pub fn try_new(config: PhysicsConfig) -> PhysicsConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Add a body. It is integrated starting with the next step.
    ///
    /// When the world is full, the oldest bodies are evicted to make room.
    pub fn spawn(&mut self, request: SpawnRequest) -> PhysicsResult<BodyId> {
        let id = BodyId(self.next_id);
        let body = match PhysicsObject::from_request(id, &request, self.config.default_lifetime) {
            Ok(body) => body,
            Err(err) => {
                log::warn!("Rejected spawn: {}", err);
                return Err(err);
            }
        };
        self.next_id += 1;

        log::debug!("Spawned {} {:?} at {:?}", id, body.shape(), body.position);
        self.bodies.push(body);
        let evicted = self.enforce_capacity();
        self.pending_evictions += evicted;

        Ok(id)
    }

    /// Remove every body. Ids are not reused afterwards.
    pub fn reset(&mut self) {
        log::debug!("Reset physics world ({} bodies cleared)", self.bodies.len());
        self.bodies.clear();
        self.pending_evictions = 0;
        self.last_step = StepStats::default();
    }

    /// Advance the simulation by `dt` seconds (clamped to `max_dt`)
    pub fn step(&mut self, dt: f32) {
        let dt = clamp_step(dt, self.config.max_dt);
        let gravity = self.config.gravity_vector();
        let material = self.material;
        let mut stats = StepStats {
            evicted: std::mem::take(&mut self.pending_evictions),
            ..Default::default()
        };

        for body in &mut self.bodies {
            body.integrate(dt, gravity, self.config.max_dt);
            body.set_on_ground(false);
        }

        for i in 0..self.bodies.len() {
            let (head, tail) = self.bodies.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if let Some(contact) = detect_pair(a, b) {
                    resolve_pair(a, b, &contact, &material);
                    stats.pair_contacts += 1;
                }
            }
        }

        let ground_height = self.config.ground_height;
        for body in &mut self.bodies {
            if let Some(contact) = detect_ground(body, ground_height) {
                resolve_ground(body, &contact, &material);
                body.set_on_ground(true);
                body.damp_spin(self.config.spin_damping);
                stats.ground_contacts += 1;
            }
        }

        let despawn_height = self.config.despawn_height;
        self.bodies.retain(|body| match body.removal(despawn_height) {
            None => true,
            Some(reason) => {
                if reason == Removal::Corrupted {
                    log::warn!(
                        "Removed corrupted body {} (position {:?}, velocity {:?})",
                        body.id(),
                        body.position,
                        body.velocity
                    );
                } else {
                    log::debug!("Retired body {} ({:?})", body.id(), reason);
                }
                stats.record(reason);
                false
            }
        });

        stats.evicted += self.enforce_capacity();

        self.step_count += 1;
        self.last_step = stats;
    }

    /// Drop the oldest bodies beyond the cap. Returns how many were dropped.
    fn enforce_capacity(&mut self) -> usize {
        let excess = self.bodies.len().saturating_sub(self.config.max_objects);
        for body in self.bodies.drain(..excess) {
            log::debug!("Evicted body {} ({:?})", body.id(), Removal::Evicted);
        }
        excess
    }

    /// Snapshot of every live body for drawing
    pub fn bodies(&self) -> impl Iterator<Item = BodyView> + '_ {
        self.bodies.iter().map(PhysicsObject::view)
    }

    /// Live bodies, oldest first
    pub fn objects(&self) -> &[PhysicsObject] {
        &self.bodies
    }

    /// Look up a live body
    pub fn get(&self, id: BodyId) -> Option<&PhysicsObject> {
        self.bodies.iter().find(|body| body.id() == id)
    }

    /// Check whether a body is still live
    pub fn contains(&self, id: BodyId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Statistics from the last step
    pub fn last_step(&self) -> &StepStats {
        &self.last_step
    }

    /// Contacts resolved during the last step
    pub fn last_collision_count(&self) -> usize {
        self.last_step.collisions()
    }

    /// Steps taken since creation
    pub fn step_count(&self) -> u64 {
        self.step_count
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpawnError;
    use glam::Vec3;

    fn ball_at(y: f32) -> SpawnRequest {
        SpawnRequest::sphere(Vec3::new(0.0, y, 0.0), 0.5, 1.0)
    }

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let mut world = PhysicsWorld::default();
        let a = world.spawn(ball_at(5.0)).unwrap();
        let b = world.spawn(ball_at(6.0)).unwrap();
        assert_ne!(a, b);
        assert_eq!(world.len(), 2);
        assert!(world.contains(a));
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let config = PhysicsConfig { max_objects: usize::MAX, ..Default::default() };
        let mut world = PhysicsWorld::try_new(config).unwrap();
        world.spawn(ball_at(5.0)).unwrap();
        world.step(1.0 / 60.0);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_rejected_spawn_creates_nothing() {
        let mut world = PhysicsWorld::default();
        let err = world.spawn(SpawnRequest::sphere(Vec3::ZERO, 0.5, -1.0)).unwrap_err();
        assert_eq!(err, SpawnError::InvalidMass(-1.0));
        assert!(world.is_empty());

        // The rejected request does not consume an id
        let id = world.spawn(ball_at(1.0)).unwrap();
        assert_eq!(id, BodyId(1));
    }

    #[test]
    fn test_spawned_body_waits_for_next_step() {
        let mut world = PhysicsWorld::default();
        let id = world.spawn(ball_at(5.0)).unwrap();
        assert_eq!(world.get(id).unwrap().position.y, 5.0);
        assert_eq!(world.get(id).unwrap().age(), 0.0);

        world.step(1.0 / 60.0);
        assert!(world.get(id).unwrap().position.y < 5.0);
    }

    #[test]
    fn test_reset_clears_and_keeps_ids_fresh() {
        let mut world = PhysicsWorld::default();
        let first = world.spawn(ball_at(5.0)).unwrap();
        world.reset();
        assert!(world.is_empty());

        let second = world.spawn(ball_at(5.0)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let config = PhysicsConfig { max_objects: 5, ..Default::default() };
        let mut world = PhysicsWorld::new(config);
        let ids: Vec<_> = (0..8)
            .map(|i| world.spawn(ball_at(10.0 + i as f32 * 2.0)).unwrap())
            .collect();

        assert_eq!(world.len(), 5);
        for id in &ids[..3] {
            assert!(!world.contains(*id));
        }
        for id in &ids[3..] {
            assert!(world.contains(*id));
        }

        world.step(1.0 / 60.0);
        assert_eq!(world.last_step().evicted, 3);
        assert_eq!(world.len(), 5);
    }

    #[test]
    fn test_lifetime_expiry() {
        let mut world = PhysicsWorld::default();
        let short = world.spawn(ball_at(0.5).with_lifetime(0.1)).unwrap();
        let long = world.spawn(SpawnRequest::sphere(Vec3::new(5.0, 0.5, 0.0), 0.5, 1.0)).unwrap();

        for _ in 0..10 {
            world.step(1.0 / 60.0);
        }
        assert!(!world.contains(short));
        assert!(world.contains(long));
    }

    #[test]
    fn test_despawn_height() {
        let config = PhysicsConfig { ground_height: -1000.0, despawn_height: -5.0, ..Default::default() };
        let mut world = PhysicsWorld::new(config);
        world.spawn(ball_at(-4.99)).unwrap();

        world.step(0.05);
        assert!(world.is_empty());
        assert_eq!(world.last_step().out_of_bounds, 1);
    }

    #[test]
    fn test_corrupted_body_is_removed() {
        let config = PhysicsConfig { gravity: 0.0, ..Default::default() };
        let mut world = PhysicsWorld::new(config);
        world.spawn(ball_at(5.0).with_velocity(Vec3::new(f32::MAX, 0.0, 0.0))).unwrap();
        let healthy = world.spawn(SpawnRequest::sphere(Vec3::new(0.0, 5.0, 10.0), 0.5, 1.0)).unwrap();

        // Next integration overflows the position to infinity
        world.bodies[0].position.x = f32::MAX;
        world.step(0.05);

        assert_eq!(world.len(), 1);
        assert!(world.contains(healthy));
        assert_eq!(world.last_step().corrupted, 1);
    }

    #[test]
    fn test_collision_counts() {
        let config = PhysicsConfig { gravity: 0.0, ..Default::default() };
        let mut world = PhysicsWorld::new(config);
        world.spawn(ball_at(5.0).with_velocity(Vec3::X)).unwrap();
        world.spawn(SpawnRequest::sphere(Vec3::new(0.8, 5.0, 0.0), 0.5, 1.0)).unwrap();
        world.spawn(ball_at(0.4)).unwrap();

        world.step(1.0 / 60.0);
        assert_eq!(world.last_step().pair_contacts, 1);
        assert_eq!(world.last_step().ground_contacts, 1);
        assert_eq!(world.last_collision_count(), 2);
        assert_eq!(world.step_count(), 1);
    }

    #[test]
    fn test_snapshot() {
        let mut world = PhysicsWorld::default();
        let id = world.spawn(SpawnRequest::cube(Vec3::new(1.0, 3.0, 0.0), 0.4, 2.0)).unwrap();
        let views: Vec<_> = world.bodies().collect();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].id, id);
        assert_eq!(views[0].position, Vec3::new(1.0, 3.0, 0.0));
    }
}
