//! Maze Configuration
//!
//! Centralized configuration for the window, the maze assets, the first-person
//! camera and collision. Every struct is `#[serde(default)]`, so a config file
//! only needs the fields it changes:
//!
//! ```json
//! { "cube_size": 2.0, "camera": { "mouse_sensitivity": 0.002 } }
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{MazeError, MazeResult};

/// Window title and initial client size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "CHALLENGE 03: 3D MAZE GAME".to_string(),
            width: 800,
            height: 450,
        }
    }
}

/// First-person controller tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial eye position (world units)
    pub start_position: Vec3,
    /// Vertical field of view (degrees)
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
    /// Each held key moves the camera `1 / movement_divisor` units per frame
    pub movement_divisor: f32,
    /// Radians per unit of cursor motion
    pub mouse_sensitivity: f32,
    /// Distance from the eye to the look-at target
    pub focus_distance: f32,
    /// Pitch clamp (degrees, symmetric)
    pub pitch_limit_degrees: f32,
    /// Resting eye height above the floor
    pub eye_height: f32,
    /// Stride counter divisor inside the bob sinusoid
    pub step_trig_divider: f32,
    /// Bob amplitude divisor
    pub step_divider: f32,
    /// Up-vector sway amplitude divisor
    pub waving_divider: f32,
    /// Scale combined strafe+forward movement to unit length
    pub normalize_diagonal: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: Vec3::new(1.0, 1.0, 1.0),
            fovy: 60.0,
            near: 0.01,
            far: 1000.0,
            movement_divisor: 20.0,
            mouse_sensitivity: 0.003,
            focus_distance: 25.0,
            pitch_limit_degrees: 85.0,
            eye_height: 0.6,
            step_trig_divider: 5.0,
            step_divider: 30.0,
            waving_divider: 200.0,
            normalize_diagonal: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Radius of the player's footprint circle
    pub player_radius: f32,
    /// Test every solid cell instead of the neighbourhood window
    pub exhaustive_scan: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            player_radius: 0.1,
            exhaustive_scan: false,
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub window: WindowConfig,
    /// Cubicmap image (white = wall, black = floor)
    pub map_path: PathBuf,
    /// 2x2 texture atlas
    pub atlas_path: PathBuf,
    /// Replace the embedded WGSL shader with a file
    pub shader_path: Option<PathBuf>,
    /// Edge length of one maze cell
    pub cube_size: f32,
    /// World offset of cell (0, 0)
    pub map_position: Vec3,
    /// Frame cap; below 1 means uncapped
    pub target_fps: u32,
    /// Reject pixels that are neither white nor black
    pub strict_palette: bool,
    pub camera: CameraConfig,
    pub collision: CollisionConfig,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            map_path: PathBuf::from("resources/map04.png"),
            atlas_path: PathBuf::from("resources/cubemap_atlas01.png"),
            shader_path: None,
            cube_size: 1.0,
            map_position: Vec3::ZERO,
            target_fps: 60,
            strict_palette: false,
            camera: CameraConfig::default(),
            collision: CollisionConfig::default(),
        }
    }
}

impl MazeConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> MazeResult<Self> {
        let config: MazeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> MazeResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| MazeError::io(path, e))?;
        let config = Self::from_json_str(&json)?;
        info!("[Config] Loaded {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> MazeResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| MazeError::io(path, e))
    }

    /// Config file named by the first command-line argument, or defaults.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> MazeResult<Self> {
        match args.nth(1) {
            Some(path) => Self::load(path),
            None => {
                info!("[Config] No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject values no frame could run with.
    pub fn validate(&self) -> MazeResult<()> {
        if !(self.cube_size > 0.0) || !self.cube_size.is_finite() {
            return Err(MazeError::InvalidCubeSize(self.cube_size));
        }
        if !(self.collision.player_radius > 0.0) {
            return Err(MazeError::Config(format!(
                "player_radius must be positive, got {}",
                self.collision.player_radius
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(MazeError::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        let cam = &self.camera;
        if !(cam.movement_divisor > 0.0) {
            return Err(MazeError::Config(
                "camera.movement_divisor must be positive".to_string(),
            ));
        }
        if !(cam.focus_distance > 0.0) || !cam.focus_distance.is_finite() {
            return Err(MazeError::Config(format!(
                "camera.focus_distance must be positive, got {}",
                cam.focus_distance
            )));
        }
        if !cam.mouse_sensitivity.is_finite() {
            return Err(MazeError::Config(format!(
                "camera.mouse_sensitivity must be finite, got {}",
                cam.mouse_sensitivity
            )));
        }
        if !(cam.fovy > 0.0 && cam.fovy < 180.0) {
            return Err(MazeError::Config(format!(
                "camera.fovy must be in (0, 180), got {}",
                cam.fovy
            )));
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(MazeError::Config(format!(
                "camera clip planes must satisfy 0 < near < far, got {} / {}",
                cam.near, cam.far
            )));
        }
        if !(cam.pitch_limit_degrees > 0.0 && cam.pitch_limit_degrees < 90.0) {
            return Err(MazeError::Config(format!(
                "camera.pitch_limit_degrees must be in (0, 90), got {}",
                cam.pitch_limit_degrees
            )));
        }
        if !(cam.step_trig_divider > 0.0 && cam.step_divider > 0.0 && cam.waving_divider > 0.0) {
            return Err(MazeError::Config(
                "camera bob dividers must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MazeConfig::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 450);
        assert_eq!(config.cube_size, 1.0);
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.camera.movement_divisor, 20.0);
        assert_eq!(config.camera.mouse_sensitivity, 0.003);
        assert_eq!(config.camera.pitch_limit_degrees, 85.0);
        assert_eq!(config.collision.player_radius, 0.1);
        assert!(!config.collision.exhaustive_scan);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MazeConfig::from_json_str(
            r#"{ "cube_size": 2.0, "camera": { "mouse_sensitivity": 0.01 } }"#,
        )
        .unwrap();
        assert_eq!(config.cube_size, 2.0);
        assert_eq!(config.camera.mouse_sensitivity, 0.01);
        assert_eq!(config.camera.focus_distance, 25.0);
        assert_eq!(config.window.title, "CHALLENGE 03: 3D MAZE GAME");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = MazeConfig::default();
        config.cube_size = 0.0;
        assert!(matches!(config.validate(), Err(MazeError::InvalidCubeSize(_))));

        let mut config = MazeConfig::default();
        config.collision.player_radius = -1.0;
        assert!(matches!(config.validate(), Err(MazeError::Config(_))));

        let mut config = MazeConfig::default();
        config.window.height = 0;
        assert!(config.validate().is_err());

        let mut config = MazeConfig::default();
        config.camera.pitch_limit_degrees = 90.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_degenerate_look_target() {
        let mut config = MazeConfig::default();
        config.camera.focus_distance = 0.0;
        assert!(matches!(config.validate(), Err(MazeError::Config(_))));

        config.camera.focus_distance = f32::INFINITY;
        assert!(config.validate().is_err());

        let mut config = MazeConfig::default();
        config.camera.mouse_sensitivity = f32::NAN;
        assert!(config.validate().is_err());

        // Negative sensitivity inverts the look axes and stays valid
        config.camera.mouse_sensitivity = -0.003;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            MazeConfig::from_json_str("{ cube_size: }"),
            Err(MazeError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_from_args_without_path_uses_defaults() {
        let args = vec!["maze_walker".to_string()].into_iter();
        assert_eq!(MazeConfig::from_args(args).unwrap(), MazeConfig::default());
    }
}
