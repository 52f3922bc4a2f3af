//! Pointer and keyboard input for dragging items.

pub mod pointer;

pub use pointer::ScreenProjection;

use glam::Vec2;
use std::collections::HashSet;

/// Key that spins a held item counter-clockwise.
pub const ROTATE_CCW_KEY: KeyCode = KeyCode::KeyA;
/// Key that spins a held item clockwise.
pub const ROTATE_CW_KEY: KeyCode = KeyCode::KeyD;
/// Button used to grab and throw items.
pub const GRAB_BUTTON: MouseButton = MouseButton::Left;

/// Manages input state for the current tick.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this tick.
    mouse_pressed: HashSet<MouseButton>,
    /// Mouse buttons released this tick.
    mouse_released: HashSet<MouseButton>,

    /// Pointer position in window coordinates.
    pointer_position: Vec2,

    /// Whether the pointer is over a UI surface that captures clicks.
    pointer_over_ui: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-tick state. Call after each simulation tick consumed the input.
    pub fn begin_frame(&mut self) {
        self.mouse_pressed.clear();
        self.mouse_released.clear();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
                self.mouse_released.insert(button);
            }
        }
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        self.pointer_position = Vec2::new(position.0 as f32, position.1 as f32);
    }

    /// Set by the UI layer whenever the pointer enters or leaves a click-capturing panel.
    pub fn set_pointer_over_ui(&mut self, over_ui: bool) {
        self.pointer_over_ui = over_ui;
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Get the pointer position in window coordinates.
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer_position
    }

    pub fn is_pointer_over_ui(&self) -> bool {
        self.pointer_over_ui
    }

    /// Grab button went down this tick away from any UI surface.
    pub fn is_grab_pressed(&self) -> bool {
        self.mouse_pressed.contains(&GRAB_BUTTON) && !self.pointer_over_ui
    }

    /// Grab button went up this tick away from any UI surface.
    pub fn is_grab_released(&self) -> bool {
        self.mouse_released.contains(&GRAB_BUTTON) && !self.pointer_over_ui
    }

    /// Rotation input: +1 counter-clockwise, -1 clockwise, 0 when idle or both held.
    pub fn rotation_axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.is_key_held(ROTATE_CCW_KEY) {
            axis += 1.0;
        }
        if self.is_key_held(ROTATE_CW_KEY) {
            axis -= 1.0;
        }
        axis
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
