//! First-person camera
//!
//! Yaw turns around +Y, positive pitch looks down. At yaw 0 and pitch 0 the
//! camera faces -Z.

use glam::{Mat4, Vec3};
use tumble_core::UP;

/// Mouse-look camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,
    /// Horizontal angle in degrees
    yaw: f32,
    /// Vertical angle in degrees, within `±pitch_limit`
    pitch: f32,
    pitch_limit: f32,
}

impl Camera {
    pub fn new(position: Vec3, pitch_limit: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            pitch_limit: pitch_limit.abs().max(0.0),
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set both angles; pitch is clamped
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Turn by the given deltas in degrees
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.set_orientation(self.yaw + delta_yaw, self.pitch + delta_pitch);
    }

    /// Unit view direction
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        Vec3::new(sin_yaw * cos_pitch, -sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Unit horizontal right direction
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        Vec3::new(cos_yaw, 0.0, sin_yaw)
    }

    pub fn up(&self) -> Vec3 {
        UP
    }

    /// World-to-view transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), UP)
    }
}
