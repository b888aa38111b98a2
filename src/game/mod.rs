//! Game Module
//!
//! Game-specific systems that build on top of the engine.

pub mod scenes;

pub use scenes::{FrameReport, MazeScene};
