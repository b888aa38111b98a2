//! Camera Module
//!
//! Perspective camera state and the first-person controller that drives it
//! from keyboard and mouse input. Window-system agnostic: the controller sees
//! only key flags and a cursor position.

pub mod camera3d;
pub mod fps_controller;

pub use camera3d::Camera3D;
pub use fps_controller::FirstPersonController;
