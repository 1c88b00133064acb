use std::collections::HashSet;

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Directions the keyboard can move the camera in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveDirection {
    pub const ALL: [MoveDirection; 4] = [
        MoveDirection::Forward,
        MoveDirection::Back,
        MoveDirection::Left,
        MoveDirection::Right,
    ];

    /// Arrow keys, with WASD as aliases.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::ArrowUp | KeyCode::KeyW => Some(MoveDirection::Forward),
            KeyCode::ArrowDown | KeyCode::KeyS => Some(MoveDirection::Back),
            KeyCode::ArrowLeft | KeyCode::KeyA => Some(MoveDirection::Left),
            KeyCode::ArrowRight | KeyCode::KeyD => Some(MoveDirection::Right),
            _ => None,
        }
    }
}

/// Live keyboard state: which keys are currently held.
#[derive(Debug, Default)]
pub struct InputTracker {
    pressed: HashSet<KeyCode>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_key_down(&mut self, key: KeyCode) {
        self.pressed.insert(key);
    }

    pub fn on_key_up(&mut self, key: KeyCode) {
        self.pressed.remove(&key);
    }

    /// Unknown keys read as not pressed.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Whether any key bound to `direction` is held.
    pub fn is_direction_held(&self, direction: MoveDirection) -> bool {
        self.pressed
            .iter()
            .any(|key| MoveDirection::from_key(*key) == Some(direction))
    }

    /// Release everything, e.g. when focus is lost and key-up events will not arrive.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn record_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                match event.state {
                    ElementState::Pressed => self.on_key_down(code),
                    ElementState::Released => self.on_key_up(code),
                }
            }
            WindowEvent::Focused(false) => self.clear(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_defaults_to_released() {
        let input = InputTracker::new();
        assert!(!input.is_pressed(KeyCode::ArrowUp));
        assert!(!input.is_direction_held(MoveDirection::Forward));
    }

    #[test]
    fn test_release_clears_only_that_key() {
        let mut input = InputTracker::new();
        input.on_key_down(KeyCode::ArrowUp);
        input.on_key_down(KeyCode::ArrowLeft);
        input.on_key_up(KeyCode::ArrowUp);
        assert!(!input.is_pressed(KeyCode::ArrowUp));
        assert!(input.is_pressed(KeyCode::ArrowLeft));
    }

    #[test]
    fn test_repeat_press_is_idempotent() {
        let mut input = InputTracker::new();
        input.on_key_down(KeyCode::ArrowRight);
        input.on_key_down(KeyCode::ArrowRight);
        input.on_key_up(KeyCode::ArrowRight);
        assert!(!input.is_direction_held(MoveDirection::Right));
    }

    #[test]
    fn test_wasd_aliases() {
        let mut input = InputTracker::new();
        input.on_key_down(KeyCode::KeyA);
        assert!(input.is_direction_held(MoveDirection::Left));
        assert!(!input.is_direction_held(MoveDirection::Right));
    }

    #[test]
    fn test_focus_loss_releases_everything() {
        let mut input = InputTracker::new();
        input.on_key_down(KeyCode::ArrowDown);
        input.record_event(&WindowEvent::Focused(false));
        assert!(!input.is_direction_held(MoveDirection::Back));
    }
}
