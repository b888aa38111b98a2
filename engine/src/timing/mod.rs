//! Timing Module
//!
//! Frame pacing for the render loop.

pub mod frame_limiter;

pub use frame_limiter::FrameLimiter;
