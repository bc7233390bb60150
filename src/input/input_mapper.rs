//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to simulation controls like TogglePause, Step, Reseed, etc.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Pause or resume the simulation (Space)
    TogglePause,
    /// Advance one generation while paused (N key)
    Step,
    /// Replace the world with a new random fill (R key)
    Reseed,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Double the tick rate cap (= or keypad +)
    SpeedUp,
    /// Halve the tick rate cap (- or keypad -)
    SlowDown,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for bound keys on press, `None` otherwise
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::Space => Some(InputAction::TogglePause),
            KeyCode::KeyN => Some(InputAction::Step),
            KeyCode::KeyR => Some(InputAction::Reseed),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::Equal | KeyCode::NumpadAdd => Some(InputAction::SpeedUp),
            KeyCode::Minus | KeyCode::NumpadSubtract => Some(InputAction::SlowDown),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_exits() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_unbound_keys_not_mapped() {
        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyS, KeyCode::KeyD] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::Space, ElementState::Released);
        assert_eq!(action, None);
    }

    #[test]
    fn test_simulation_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::Space, ElementState::Pressed),
            Some(InputAction::TogglePause)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyN, ElementState::Pressed),
            Some(InputAction::Step)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyR, ElementState::Pressed),
            Some(InputAction::Reseed)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyF, ElementState::Pressed),
            Some(InputAction::ToggleFullscreen)
        );
    }

    #[test]
    fn test_speed_keys() {
        for key in [KeyCode::Equal, KeyCode::NumpadAdd] {
            assert_eq!(
                InputMapper::map_keyboard(key, ElementState::Pressed),
                Some(InputAction::SpeedUp)
            );
        }
        for key in [KeyCode::Minus, KeyCode::NumpadSubtract] {
            assert_eq!(
                InputMapper::map_keyboard(key, ElementState::Pressed),
                Some(InputAction::SlowDown)
            );
        }
    }
}
