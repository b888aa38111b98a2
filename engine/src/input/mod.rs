//! Input Module
//!
//! Platform-agnostic keyboard and mouse state. This module is decoupled from
//! any specific windowing system; the application converts its events.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut input = InputState::new();
//!
//! input.keyboard.handle_key(KeyCode::W, true);
//! input.mouse.set_captured(true);
//! input.mouse.accumulate_delta(12.0, -3.0);
//!
//! controller.update(&mut camera, &input.keyboard.movement, input.mouse.position());
//! input.end_frame();
//! ```

pub mod keyboard;
pub mod mouse_state;

pub use keyboard::{KeyCode, KeyboardState, MovementKeys};
pub use mouse_state::FpsMouseState;

/// Combined input state for both keyboard and mouse.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: FpsMouseState,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame edges.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
    }

    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.mouse.reset();
    }

    pub fn is_moving(&self) -> bool {
        self.keyboard.movement.any_pressed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_state_default() {
        let input = InputState::new();
        assert!(!input.is_moving());
    }

    #[test]
    fn test_input_state_keyboard_movement() {
        let mut input = InputState::new();
        input.keyboard.handle_key(KeyCode::W, true);
        assert!(input.is_moving());
        input.end_frame();
        assert!(input.is_moving());
    }
}
