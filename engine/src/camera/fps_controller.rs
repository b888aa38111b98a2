//! First-Person Camera Controller
//!
//! Turns directional key flags and an absolute cursor position into camera
//! motion:
//!
//! - Movement is driven by yaw only on the horizontal plane; keys combine
//!   additively, so a diagonal moves faster than an axis unless
//!   `normalize_diagonal` is set.
//! - Yaw and pitch accumulate the (inverted) cursor delta, pitch is clamped.
//! - A stride counter advances on every frame a direction key is held and
//!   drives a footstep bob of the eye height and a sway of the up vector.
//!
//! The controller owns its orientation state; the camera only carries the
//! resulting position, target and up vectors.

use glam::{Vec2, Vec3};

use crate::config::CameraConfig;
use crate::input::MovementKeys;

use super::Camera3D;

/// First-person controller state.
///
/// ## Usage
/// ```rust,ignore
/// let mut controller = FirstPersonController::new(CameraConfig::default());
/// let mut camera = Camera3D::new(Vec3::ONE, 60.0);
///
/// // Once per frame
/// controller.update(&mut camera, &keyboard.movement, mouse.position());
/// ```
#[derive(Clone, Debug)]
pub struct FirstPersonController {
    /// Horizontal angle (radians); 0 looks toward -Z
    pub yaw: f32,
    /// Vertical angle (radians); positive looks up
    pub pitch: f32,
    previous_mouse: Option<Vec2>,
    stride: u32,
    settings: CameraConfig,
}

impl Default for FirstPersonController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl FirstPersonController {
    pub fn new(settings: CameraConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            previous_mouse: None,
            stride: 0,
            settings,
        }
    }

    pub fn settings(&self) -> &CameraConfig {
        &self.settings
    }

    /// Number of frames a direction key has been held so far.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    #[inline]
    fn pitch_limit(&self) -> f32 {
        self.settings.pitch_limit_degrees.to_radians()
    }

    /// Unit look vector for the current yaw and pitch.
    pub fn look_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Orient toward a world point; pitch is clamped.
    pub fn look_at(&mut self, from: Vec3, target: Vec3) {
        let to_target = target - from;
        let distance = to_target.length();
        if distance > 0.001 {
            self.yaw = (-to_target.x).atan2(-to_target.z);
            let limit = self.pitch_limit();
            self.pitch = (to_target.y / distance).asin().clamp(-limit, limit);
        }
    }

    /// Rotate by a cursor delta. Moving right turns right, moving down looks down.
    pub fn apply_mouse_delta(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.settings.mouse_sensitivity;
        self.pitch -= delta.y * self.settings.mouse_sensitivity;
        let limit = self.pitch_limit();
        self.pitch = self.pitch.clamp(-limit, limit);
    }

    /// World-space displacement for one frame of the held keys.
    pub fn movement_step(&self, keys: &MovementKeys) -> Vec3 {
        let forward = keys.forward_axis() as f32;
        let right = keys.right_axis() as f32;
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();

        let mut horizontal = Vec2::new(
            -sin_yaw * forward + cos_yaw * right,
            -cos_yaw * forward - sin_yaw * right,
        );
        if self.settings.normalize_diagonal && forward != 0.0 && right != 0.0 {
            horizontal *= std::f32::consts::FRAC_1_SQRT_2;
        }
        let vertical = self.pitch.sin() * forward + keys.up_axis() as f32;

        Vec3::new(horizontal.x, vertical, horizontal.y) / self.settings.movement_divisor
    }

    /// Run one frame of input. Returns whether any direction key was held.
    pub fn update(&mut self, camera: &mut Camera3D, keys: &MovementKeys, mouse_position: Vec2) -> bool {
        let delta = match self.previous_mouse.replace(mouse_position) {
            Some(previous) => mouse_position - previous,
            None => Vec2::ZERO,
        };

        camera.position += self.movement_step(keys);
        self.apply_mouse_delta(delta);

        let moving = keys.any_pressed();
        if moving {
            self.stride = self.stride.wrapping_add(1);
        }

        self.apply_bob(camera);
        self.refresh_target(camera);
        moving
    }

    /// Pin the eye to its bobbing height and sway the up vector.
    pub fn apply_bob(&self, camera: &mut Camera3D) {
        let s = &self.settings;
        let stride = self.stride as f32;
        camera.position.y = s.eye_height - (stride / s.step_trig_divider).sin() / s.step_divider;

        let sway = (stride / (s.step_trig_divider * 2.0)).sin() / s.waving_divider;
        camera.up = Vec3::new(sway, 1.0, -sway);
    }

    /// Re-derive the target from the camera position and current angles.
    pub fn refresh_target(&self, camera: &mut Camera3D) {
        camera.target = camera.position + self.look_direction() * self.settings.focus_distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    fn keys(pressed: &[KeyCode]) -> MovementKeys {
        let mut keys = MovementKeys::new();
        for &key in pressed {
            keys.handle_key(key, true);
        }
        keys
    }

    #[test]
    fn test_default_looks_down_negative_z() {
        let controller = FirstPersonController::default();
        let look = controller.look_direction();
        assert!(look.x.abs() < 1e-6);
        assert!(look.y.abs() < 1e-6);
        assert!((look.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_first_mouse_sample_has_zero_delta() {
        let mut controller = FirstPersonController::default();
        let mut camera = Camera3D::default();
        controller.update(&mut camera, &MovementKeys::new(), Vec2::new(400.0, 225.0));
        assert_eq!(controller.yaw, 0.0);
        assert_eq!(controller.pitch, 0.0);

        controller.update(&mut camera, &MovementKeys::new(), Vec2::new(410.0, 225.0));
        assert!((controller.yaw - (-0.03)).abs() < 1e-6);
    }

    #[test]
    fn test_mouse_delta_inverted() {
        let mut controller = FirstPersonController::default();
        controller.apply_mouse_delta(Vec2::new(100.0, 0.0));
        // Moving right decreases yaw, which turns the look vector toward +X
        assert!((controller.yaw + 0.3).abs() < 1e-6);
        assert!(controller.look_direction().x > 0.0);

        controller.apply_mouse_delta(Vec2::new(0.0, 100.0));
        assert!((controller.pitch + 0.3).abs() < 1e-6);
        assert!(controller.look_direction().y < 0.0);
    }

    #[test]
    fn test_pitch_clamped_to_85_degrees() {
        let mut controller = FirstPersonController::default();
        controller.apply_mouse_delta(Vec2::new(0.0, -100_000.0));
        assert!((controller.pitch - 85f32.to_radians()).abs() < 1e-5);
        controller.apply_mouse_delta(Vec2::new(0.0, 100_000.0));
        assert!((controller.pitch + 85f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn test_forward_step_follows_yaw() {
        let mut controller = FirstPersonController::default();
        let step = controller.movement_step(&keys(&[KeyCode::W]));
        assert!((step - Vec3::new(0.0, 0.0, -0.05)).length() < 1e-6);

        controller.yaw = -std::f32::consts::FRAC_PI_2;
        let step = controller.movement_step(&keys(&[KeyCode::W]));
        assert!((step - Vec3::new(0.05, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_strafe_right_is_positive_x_at_zero_yaw() {
        let controller = FirstPersonController::default();
        let step = controller.movement_step(&keys(&[KeyCode::D]));
        assert!((step - Vec3::new(0.05, 0.0, 0.0)).length() < 1e-6);
        let step = controller.movement_step(&keys(&[KeyCode::A]));
        assert!((step - Vec3::new(-0.05, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_diagonal_unnormalized_by_default() {
        let controller = FirstPersonController::default();
        let step = controller.movement_step(&keys(&[KeyCode::W, KeyCode::D]));
        let len = Vec2::new(step.x, step.z).length();
        assert!((len - 0.05 * std::f32::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_diagonal_normalized_when_enabled() {
        let controller = FirstPersonController::new(CameraConfig {
            normalize_diagonal: true,
            ..Default::default()
        });
        let step = controller.movement_step(&keys(&[KeyCode::W, KeyCode::D]));
        let len = Vec2::new(step.x, step.z).length();
        assert!((len - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_does_not_change_horizontal_stride() {
        let mut controller = FirstPersonController::default();
        controller.pitch = 0.5;
        let step = controller.movement_step(&keys(&[KeyCode::W]));
        assert!((step.z + 0.05).abs() < 1e-6);
        assert!((step.y - 0.5f32.sin() / 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_stride_advances_only_while_moving() {
        let mut controller = FirstPersonController::default();
        let mut camera = Camera3D::default();
        let mouse = Vec2::ZERO;

        assert!(!controller.update(&mut camera, &MovementKeys::new(), mouse));
        assert_eq!(controller.stride(), 0);

        assert!(controller.update(&mut camera, &keys(&[KeyCode::E]), mouse));
        assert!(controller.update(&mut camera, &keys(&[KeyCode::W]), mouse));
        assert_eq!(controller.stride(), 2);
    }

    #[test]
    fn test_bob_sets_eye_height_and_sway() {
        let mut controller = FirstPersonController::default();
        let mut camera = Camera3D::default();
        controller.update(&mut camera, &MovementKeys::new(), Vec2::ZERO);
        assert!((camera.position.y - 0.6).abs() < 1e-6);
        assert_eq!(camera.up, Vec3::Y);

        controller.update(&mut camera, &keys(&[KeyCode::W]), Vec2::ZERO);
        let expected_y = 0.6 - (1.0f32 / 5.0).sin() / 30.0;
        assert!((camera.position.y - expected_y).abs() < 1e-6);
        let sway = (1.0f32 / 10.0).sin() / 200.0;
        assert!((camera.up.x - sway).abs() < 1e-7);
        assert!((camera.up.z + sway).abs() < 1e-7);
    }

    #[test]
    fn test_target_is_focus_distance_ahead() {
        let mut controller = FirstPersonController::default();
        let mut camera = Camera3D::default();
        controller.update(&mut camera, &keys(&[KeyCode::S]), Vec2::ZERO);
        controller.apply_mouse_delta(Vec2::new(37.0, -12.0));
        controller.refresh_target(&mut camera);
        let offset = camera.target - camera.position;
        assert!((offset.length() - 25.0).abs() < 1e-4);
        assert!((offset.normalize() - controller.look_direction()).length() < 1e-5);
    }

    #[test]
    fn test_look_at_round_trip() {
        let mut controller = FirstPersonController::default();
        let from = Vec3::new(1.0, 0.6, 1.0);
        let target = Vec3::new(4.0, 1.6, -3.0);
        controller.look_at(from, target);
        let expected = (target - from).normalize();
        assert!((controller.look_direction() - expected).length() < 1e-5);
    }
}
