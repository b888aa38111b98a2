//! Maze Scene: per-frame composition of the maze walker.
//!
//! Owns the cubicmap grid, its mesh, the camera, the first-person controller
//! and the collision resolver. [`update`](MazeScene::update) is the single
//! entry point for the frame logic:
//!
//! 1. snapshot the camera position
//! 2. run the controller on the current input
//! 3. resolve the candidate position against the walls
//! 4. re-derive the look target if the move was rolled back
//!
//! No wgpu imports; this module is GPU-agnostic.

use glam::{Mat4, Vec3};
use log::{debug, info};

use crate::camera::{Camera3D, FirstPersonController};
use crate::config::MazeConfig;
use crate::error::MazeResult;
use crate::input::{InputState, KeyCode};
use crate::physics::CollisionResolver;
use crate::render::{CubicmapMesh, generate_cubicmap_mesh, model_matrix};
use crate::world::{CellKind, PixelGrid};

/// What one call to [`MazeScene::update`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// A direction key was held
    pub moving: bool,
    /// The move was rolled back
    pub collided: bool,
    /// Map cell of the resolved position
    pub cell: (u32, u32),
}

/// Complete maze scene.
pub struct MazeScene {
    pub config: MazeConfig,
    pub grid: PixelGrid,
    pub mesh: CubicmapMesh,
    pub camera: Camera3D,
    pub controller: FirstPersonController,
    pub resolver: CollisionResolver,
    frame_count: u64,
}

impl MazeScene {
    /// Load the cubicmap named by the config and build the scene.
    pub fn load(config: MazeConfig) -> MazeResult<Self> {
        let grid = PixelGrid::load(&config.map_path)?;
        Self::from_grid(config, grid)
    }

    /// Build the scene around an already loaded grid.
    pub fn from_grid(config: MazeConfig, grid: PixelGrid) -> MazeResult<Self> {
        config.validate()?;
        grid.check_palette(config.strict_palette)?;

        let mesh = generate_cubicmap_mesh(&grid, config.cube_size)?;

        let camera_config = config.camera.clone();
        let mut camera = Camera3D::new(camera_config.start_position, camera_config.fovy);
        let controller = FirstPersonController::new(camera_config);
        controller.refresh_target(&mut camera);

        let resolver =
            CollisionResolver::from_config(&config.collision, config.cube_size, config.map_position);

        info!(
            "[MazeScene] {}x{} map: {} walls, {} open cells, {} triangles",
            grid.width(),
            grid.height(),
            grid.count(CellKind::Solid),
            grid.count(CellKind::Open),
            mesh.triangle_count()
        );

        Ok(Self {
            config,
            grid,
            mesh,
            camera,
            controller,
            resolver,
            frame_count: 0,
        })
    }

    /// Advance one frame.
    pub fn update(&mut self, input: &InputState) -> FrameReport {
        let previous = self.camera.position;

        let moving = self.controller.update(
            &mut self.camera,
            &input.keyboard.movement,
            input.mouse.position(),
        );
        let candidate = self.camera.position;

        if input.keyboard.just_pressed(KeyCode::Space) {
            let (x, z) = self.resolver.player_cell(&self.grid, candidate);
            info!("[MazeScene] Player map cell position: ({x}, {z})");
        }

        let outcome = self.resolver.resolve(&self.grid, previous, candidate);
        if outcome.collided {
            self.camera.position = outcome.position;
            self.controller.refresh_target(&mut self.camera);
            if let Some((x, z)) = outcome.cell {
                debug!("[MazeScene] Blocked by wall at ({x}, {z})");
            }
        }

        self.frame_count += 1;
        FrameReport {
            moving,
            collided: outcome.collided,
            cell: self.player_cell(),
        }
    }

    /// Map cell under the camera, clamped to the grid.
    pub fn player_cell(&self) -> (u32, u32) {
        self.resolver.player_cell(&self.grid, self.camera.position)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn model_matrix(&self) -> Mat4 {
        model_matrix(self.config.map_position, 1.0)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        let cam = &self.config.camera;
        self.camera.view_projection(aspect, cam.near, cam.far)
    }

    /// projection * view * model for the maze draw.
    pub fn mvp(&self, aspect: f32) -> Mat4 {
        self.view_projection(aspect) * self.model_matrix()
    }

    /// Current camera position.
    pub fn position(&self) -> Vec3 {
        self.camera.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(rows: &[&str], start: Vec3) -> MazeScene {
        let mut config = MazeConfig::default();
        config.camera.start_position = start;
        MazeScene::from_grid(config, PixelGrid::from_layout(rows).unwrap()).unwrap()
    }

    #[test]
    fn test_initial_target_follows_look_direction() {
        let scene = scene(&["###", "#.#", "###"], Vec3::new(1.0, 0.6, 1.0));
        let offset = scene.camera.target - scene.camera.position;
        assert!((offset - Vec3::new(0.0, 0.0, -25.0)).length() < 1e-4);
    }

    #[test]
    fn test_walking_into_wall_is_rolled_back() {
        let mut scene = scene(&["###", "#.#", "###"], Vec3::new(1.0, 0.6, 1.0));
        let mut input = InputState::new();
        input.keyboard.handle_key(KeyCode::W, true);

        let mut blocked = false;
        for _ in 0..20 {
            let report = scene.update(&input);
            blocked |= report.collided;
            input.end_frame();
        }
        assert!(blocked);
        // The wall row starts at z = 0.5; the circle edge never crosses it
        assert!(scene.position().z - 0.1 > 0.5 - 1e-5);
        assert_eq!(scene.player_cell(), (1, 1));
    }

    #[test]
    fn test_rollback_recomputes_target() {
        let mut scene = scene(&["###", "#.#", "###"], Vec3::new(1.0, 0.6, 0.62));
        let mut input = InputState::new();
        input.keyboard.handle_key(KeyCode::W, true);
        let report = scene.update(&input);
        assert!(report.collided);
        let look = (scene.camera.target - scene.camera.position).normalize();
        assert!((look - scene.controller.look_direction()).length() < 1e-5);
    }

    #[test]
    fn test_strict_palette_rejects_gray() {
        let mut config = MazeConfig::default();
        config.strict_palette = true;
        let grid = PixelGrid::from_layout(&["#?#"]).unwrap();
        assert!(MazeScene::from_grid(config, grid).is_err());
    }

    #[test]
    fn test_mvp_is_projection_view_model() {
        let scene = scene(&["."], Vec3::ZERO);
        let aspect = 800.0 / 450.0;
        let expected = scene.camera.projection_matrix(aspect, 0.01, 1000.0)
            * scene.camera.view_matrix();
        assert!(scene.mvp(aspect).abs_diff_eq(expected, 1e-6));
    }
}
