//! Captured Mouse State
//!
//! While the cursor is captured the OS pointer does not move, so raw device
//! motion is integrated into a virtual cursor position. The camera controller
//! differentiates that position frame to frame, exactly as it would an
//! absolute pointer.

use glam::Vec2;

/// Virtual cursor driven by raw mouse motion.
///
/// # Example
///
/// ```rust,ignore
/// let mut mouse = FpsMouseState::new();
/// mouse.set_captured(true);
///
/// // In event loop
/// mouse.accumulate_delta(10.0, -5.0);
///
/// // In update loop
/// controller.update(&mut camera, &keys, mouse.position());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FpsMouseState {
    position: Vec2,
    cursor_captured: bool,
}

impl FpsMouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add raw motion to the virtual cursor. Ignored while not captured.
    #[inline]
    pub fn accumulate_delta(&mut self, dx: f32, dy: f32) {
        if self.cursor_captured {
            self.position += Vec2::new(dx, dy);
        }
    }

    /// Integrated cursor position.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn set_captured(&mut self, captured: bool) {
        self.cursor_captured = captured;
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.cursor_captured
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = FpsMouseState::new();
        assert_eq!(state.position(), Vec2::ZERO);
        assert!(!state.is_captured());
    }

    #[test]
    fn test_motion_ignored_until_captured() {
        let mut state = FpsMouseState::new();
        state.accumulate_delta(10.0, 5.0);
        assert_eq!(state.position(), Vec2::ZERO);

        state.set_captured(true);
        state.accumulate_delta(10.0, 5.0);
        state.accumulate_delta(3.0, -2.0);
        assert_eq!(state.position(), Vec2::new(13.0, 3.0));
    }

    #[test]
    fn test_release_keeps_position() {
        let mut state = FpsMouseState::new();
        state.set_captured(true);
        state.accumulate_delta(4.0, 4.0);
        state.set_captured(false);
        state.accumulate_delta(100.0, 100.0);
        assert_eq!(state.position(), Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_reset() {
        let mut state = FpsMouseState::new();
        state.set_captured(true);
        state.accumulate_delta(10.0, 5.0);
        state.reset();
        assert_eq!(state.position(), Vec2::ZERO);
        assert!(!state.is_captured());
    }
}
