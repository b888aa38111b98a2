//! Configuration Module
//!
//! Runtime configuration for the maze walker. `Default` reproduces the
//! built-in constants; a JSON file can override any subset of them.

pub mod maze_config;

pub use maze_config::{CameraConfig, CollisionConfig, MazeConfig, WindowConfig};
