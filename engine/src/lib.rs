//! Maze Walker Engine Library
//!
//! Loads a cubicmap image, extrudes it into a textured 3D maze and walks a
//! first-person camera through it with wall collision.
//!
//! # Modules
//!
//! - [`world`] - Cubicmap pixel grid and raw pixel formats
//! - [`render`] - Cubicmap mesh generation and the wgpu renderer
//! - [`camera`] - Perspective camera and first-person controller
//! - [`physics`] - Circle vs. wall-cell collision
//! - [`input`] - Platform-agnostic keyboard and mouse state
//! - [`timing`] - Frame-rate limiter
//! - [`config`] - JSON-backed runtime configuration
//!
//! # Example
//!
//! ```ignore
//! use maze_walker_engine::{InputState, KeyCode, MazeConfig, MazeScene, PixelGrid};
//!
//! let grid = PixelGrid::from_layout(&["###", "#.#", "###"])?;
//! let mut scene = MazeScene::from_grid(MazeConfig::default(), grid)?;
//!
//! let mut input = InputState::new();
//! input.keyboard.handle_key(KeyCode::W, true);
//! let report = scene.update(&input);
//! if report.collided {
//!     // The move into the wall was rolled back
//! }
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod input;
pub mod physics;
pub mod render;
pub mod timing;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

pub use camera::{Camera3D, FirstPersonController};
pub use config::MazeConfig;
pub use error::{MazeError, MazeResult};
pub use game::{FrameReport, MazeScene};
pub use input::{InputState, KeyCode, KeyboardState, MovementKeys};
pub use physics::CollisionResolver;
pub use render::{CubicmapMesh, generate_cubicmap_mesh};
pub use timing::FrameLimiter;
pub use world::{CellKind, Color, PixelFormat, PixelGrid};
