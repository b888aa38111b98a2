//! 3D Camera
//!
//! Perspective camera described by an eye position, a look-at target and an up
//! vector. The target is not free state: the first-person controller derives
//! it from the eye position and its yaw/pitch every frame.

use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera3D {
    /// Eye position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up direction; mostly +Y with a small sway on X/Z
    pub up: Vec3,
    /// Vertical field of view (degrees)
    pub fovy: f32,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self {
            position: Vec3::new(1.0, 1.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 60.0,
        }
    }
}

impl Camera3D {
    pub fn new(position: Vec3, fovy: f32) -> Self {
        Self {
            position,
            fovy,
            ..Default::default()
        }
    }

    /// Right-handed view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Right-handed perspective with a `[0, 1]` depth range.
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy.to_radians(), aspect, near, far)
    }

    pub fn view_projection(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        self.projection_matrix(aspect, near, far) * self.view_matrix()
    }

    /// Unit vector from the eye toward the target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}
