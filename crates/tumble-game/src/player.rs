//! First-person player controller
//!
//! The player is kinematic: it never takes part in body collisions. It walks
//! on the ground plane, falls under gravity, and aims through its [`Camera`].

use glam::{Vec2, Vec3};
use tumble_core::math::normalize;

use crate::camera::Camera;
use crate::config::GameConfig;
use crate::input::Actions;

/// Crosshair targets never go lower than this above the ground
const MIN_TARGET_HEIGHT: f32 = 0.5;

/// Launch parameters for a shot sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Walking, jumping, looking player
#[derive(Debug, Clone)]
pub struct PlayerController {
    camera: Camera,
    velocity: Vec3,
    on_ground: bool,
    start: Vec3,
    speed: f32,
    height: f32,
    jump_speed: f32,
    gravity: f32,
    ground_height: f32,
    mouse_sensitivity: f32,
    shoot_speed: f32,
    muzzle_offset: f32,
}

impl PlayerController {
    pub fn new(config: &GameConfig) -> Self {
        let start = config.player_start();
        Self {
            camera: Camera::new(start, config.camera.pitch_limit),
            velocity: Vec3::ZERO,
            on_ground: false,
            start,
            speed: config.player.speed,
            height: config.player.height,
            jump_speed: config.player.jump_speed,
            gravity: config.physics.gravity,
            ground_height: config.physics.ground_height,
            mouse_sensitivity: config.camera.mouse_sensitivity,
            shoot_speed: config.gameplay.shoot_speed,
            muzzle_offset: config.gameplay.muzzle_offset,
        }
    }

    /// Eye position
    pub fn position(&self) -> Vec3 {
        self.camera.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Lowest eye height
    pub fn floor_level(&self) -> f32 {
        self.ground_height + self.height
    }

    /// Turn the view by a mouse delta
    pub fn look(&mut self, mouse_delta: Vec2) {
        self.camera.rotate(
            mouse_delta.x * self.mouse_sensitivity,
            mouse_delta.y * self.mouse_sensitivity,
        );
    }

    /// Horizontal velocity requested by the held movement actions
    pub fn movement(&self, held: Actions) -> Vec3 {
        let forward = self.camera.forward() * Vec3::new(1.0, 0.0, 1.0);
        let right = self.camera.right();

        let mut direction = Vec3::ZERO;
        if held.contains(Actions::FORWARD) {
            direction += forward;
        }
        if held.contains(Actions::BACK) {
            direction -= forward;
        }
        if held.contains(Actions::RIGHT) {
            direction += right;
        }
        if held.contains(Actions::LEFT) {
            direction -= right;
        }

        normalize(direction) * self.speed
    }

    /// Advance by `dt` seconds with the given held actions
    pub fn update(&mut self, dt: f32, held: Actions) {
        let movement = self.movement(held);
        self.velocity.x = movement.x;
        self.velocity.z = movement.z;
        self.velocity.y += self.gravity * dt;

        if held.contains(Actions::JUMP) && self.on_ground {
            self.velocity.y = self.jump_speed;
            self.on_ground = false;
        }

        self.camera.position += self.velocity * dt;

        let floor = self.floor_level();
        if self.camera.position.y <= floor {
            self.camera.position.y = floor;
            self.velocity.y = self.velocity.y.max(0.0);
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }
    }

    /// Where and how fast a sphere leaves the player
    pub fn shoot_sphere(&self) -> Shot {
        let forward = self.camera.forward();
        Shot {
            position: self.position() + forward * self.muzzle_offset,
            velocity: forward * self.shoot_speed,
        }
    }

    /// Point `distance` along the view ray, kept above the ground
    pub fn crosshair_target(&self, distance: f32) -> Vec3 {
        let mut target = self.position() + self.camera.forward() * distance;
        target.y = target.y.max(self.ground_height + MIN_TARGET_HEIGHT);
        target
    }

    /// Back to the start pose, looking straight ahead
    pub fn reset(&mut self) {
        self.camera.position = self.start;
        self.camera.set_orientation(0.0, 0.0);
        self.velocity = Vec3::ZERO;
        self.on_ground = false;
    }
}
