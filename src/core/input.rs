//! Input state tracking

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks keyboard and mouse input state
///
/// Mouse deltas are drag deltas: they accumulate only while a mouse button
/// is held, which is what the orbit camera consumes.
pub struct InputState {
    /// Currently pressed keys
    keys_pressed: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Currently pressed mouse buttons
    mouse_buttons: HashSet<MouseButton>,
    /// Current cursor position
    cursor_position: (f32, f32),
    /// Cursor movement since last frame, accumulated while any button is held
    drag_delta: (f32, f32),
}

impl InputState {
    /// Create new input state
    pub fn new() -> Self {
        Self {
            keys_pressed: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            mouse_buttons: HashSet::new(),
            cursor_position: (0.0, 0.0),
            drag_delta: (0.0, 0.0),
        }
    }

    /// Process a window event
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state,
                    ..
                },
                ..
            } => {
                match state {
                    ElementState::Pressed => {
                        if !self.keys_pressed.contains(key_code) {
                            self.keys_just_pressed.insert(*key_code);
                        }
                        self.keys_pressed.insert(*key_code);
                    }
                    ElementState::Released => {
                        self.keys_pressed.remove(key_code);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = (position.x as f32, position.y as f32);
                if !self.mouse_buttons.is_empty() {
                    self.drag_delta.0 += new_pos.0 - self.cursor_position.0;
                    self.drag_delta.1 += new_pos.1 - self.cursor_position.1;
                }
                self.cursor_position = new_pos;
            }
            WindowEvent::MouseInput { state, button, .. } => {
                match state {
                    ElementState::Pressed => {
                        self.mouse_buttons.insert(*button);
                    }
                    ElementState::Released => {
                        self.mouse_buttons.remove(button);
                    }
                }
            }
            _ => {}
        }
    }

    /// Call at end of frame to reset per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.drag_delta = (0.0, 0.0);
    }

    /// Check if key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if key was just pressed this frame
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Get drag delta since last frame (zero while no button is held)
    pub fn drag_delta(&self) -> (f32, f32) {
        self.drag_delta
    }

    /// Get current cursor position
    pub fn cursor_position(&self) -> (f32, f32) {
        self.cursor_position
    }

    /// Check if mouse button is pressed
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press() {
        let mut input = InputState::new();

        assert!(!input.is_key_pressed(KeyCode::KeyP));

        input.keys_pressed.insert(KeyCode::KeyP);
        input.keys_just_pressed.insert(KeyCode::KeyP);

        assert!(input.is_key_pressed(KeyCode::KeyP));
        assert!(input.is_key_just_pressed(KeyCode::KeyP));

        input.end_frame();

        assert!(input.is_key_pressed(KeyCode::KeyP));
        assert!(!input.is_key_just_pressed(KeyCode::KeyP));
    }

    #[test]
    fn test_drag_accumulates_only_while_button_held() {
        let mut input = InputState::new();

        // No button held: cursor motion does not accumulate
        input.cursor_position = (10.0, 10.0);
        assert_eq!(input.drag_delta(), (0.0, 0.0));

        input.mouse_buttons.insert(MouseButton::Left);
        input.cursor_position = (10.0, 10.0);
        input.drag_delta = (0.0, 0.0);

        // Simulate the CursorMoved bookkeeping
        let new_pos = (14.0, 7.0);
        input.drag_delta.0 += new_pos.0 - input.cursor_position.0;
        input.drag_delta.1 += new_pos.1 - input.cursor_position.1;
        input.cursor_position = new_pos;

        assert_eq!(input.drag_delta(), (4.0, -3.0));

        input.end_frame();
        assert_eq!(input.drag_delta(), (0.0, 0.0));
    }
}
