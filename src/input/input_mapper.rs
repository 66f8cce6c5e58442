//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to high-level actions like Screenshot, Exit, etc.
//! Drive keys (WASD) are NOT mapped here - they go directly to DriveController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by special input (not driving)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Save a screenshot of the next frame (P)
    Screenshot,
    /// Look at the world origin (1)
    CameraOrigin,
    /// Follow the pickup (2)
    CameraFollow,
    /// Toggle fullscreen mode (F)
    ToggleFullscreen,
    /// Put the pickup back at its spawn point (R)
    ResetVehicle,
}

/// Maps raw input events to semantic actions
///
/// Drive keys (WASD) are NOT mapped here - they go directly to the
/// DriveController. This mapper handles "special" keys only.
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for special keys, `None` for drive keys
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyP => Some(InputAction::Screenshot),
            KeyCode::Digit1 | KeyCode::Numpad1 => Some(InputAction::CameraOrigin),
            KeyCode::Digit2 | KeyCode::Numpad2 => Some(InputAction::CameraFollow),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyR => Some(InputAction::ResetVehicle),
            _ => None, // Drive keys handled by controller
        }
    }
}
