//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to high-level actions like Exit, TogglePause, etc.
//! Mouse drag and wheel input is NOT mapped here - it goes directly to the
//! orbit controller.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Reset camera to starting position (R key)
    ResetCamera,
    /// Toggle camera auto-rotation (Space)
    ToggleAutoRotate,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Freeze or resume the animation clock (P key)
    TogglePause,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `None` for unmapped keys and for releases
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyR => Some(InputAction::ResetCamera),
            KeyCode::Space => Some(InputAction::ToggleAutoRotate),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyP => Some(InputAction::TogglePause),
            _ => None,
        }
    }
}
