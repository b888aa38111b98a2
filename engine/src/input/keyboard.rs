//! Keyboard Input Module
//!
//! Held-key state for movement plus per-frame edge detection for one-shot
//! keys. Decoupled from winit: the application maps its native key codes onto
//! [`KeyCode`] before handing them in.

use std::collections::HashMap;

/// Keys the maze walker reacts to, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    Q,
    E,
    Space,
    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Tracks the six direction keys.
///
/// The flags are independent: opposite keys may be held together and cancel
/// out on their axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    /// W
    pub forward: bool,
    /// S
    pub backward: bool,
    /// A
    pub left: bool,
    /// D
    pub right: bool,
    /// E
    pub up: bool,
    /// Q
    pub down: bool,
}

impl MovementKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update movement state based on key press/release.
    ///
    /// Returns `true` if the key was a movement key.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let flag = match key {
            KeyCode::W => &mut self.forward,
            KeyCode::S => &mut self.backward,
            KeyCode::A => &mut self.left,
            KeyCode::D => &mut self.right,
            KeyCode::E => &mut self.up,
            KeyCode::Q => &mut self.down,
            _ => return false,
        };
        *flag = pressed;
        true
    }

    /// Check if any direction key is currently held.
    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.up || self.down
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Forward/backward direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Right/left direction (-1, 0, or 1).
    pub fn right_axis(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }

    /// Up/down direction (-1, 0, or 1).
    pub fn up_axis(&self) -> i32 {
        (self.up as i32) - (self.down as i32)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct KeyState {
    pressed: bool,
    just_pressed: bool,
    just_released: bool,
}

/// Complete keyboard state: held direction keys and per-key edges.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pub movement: MovementKeys,
    keys: HashMap<KeyCode, KeyState>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event. OS key repeat does not retrigger
    /// `just_pressed`.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::Unknown {
            return;
        }
        let state = self.keys.entry(key).or_default();
        state.just_pressed |= pressed && !state.pressed;
        state.just_released |= !pressed && state.pressed;
        state.pressed = pressed;

        self.movement.handle_key(key, pressed);
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.pressed)
    }

    /// Pressed since the last [`end_frame`](Self::end_frame).
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.just_pressed)
    }

    pub fn just_released(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.just_released)
    }

    /// Clear per-frame edges (call at end of frame).
    pub fn end_frame(&mut self) {
        for state in self.keys.values_mut() {
            state.just_pressed = false;
            state.just_released = false;
        }
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        self.movement.reset();
        self.keys.clear();
    }
}
