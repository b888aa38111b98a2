//! Scene Module
//!
//! High-level scene compositions that wire together all game systems.

pub mod maze_scene;

pub use maze_scene::{FrameReport, MazeScene};
