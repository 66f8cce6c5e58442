//! Drive and orbit controller
//!
//! Controls:
//! - W/S: Drive forward/backward
//! - A/D: Steer left/right
//! - Left-click + drag: Orbit the camera
//! - Scroll: Zoom

use pickup_physics::DriveIntent;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Controller for the pickup and the orbit camera
pub struct DriveController {
    // Held drive keys
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,

    // Mouse state
    mouse_pressed: bool,
    cursor: Option<(f64, f64)>,
    anchor: Option<(f64, f64)>,
    pending_orbit: (f32, f32),
    pending_zoom: f32,

    // Input smoothing state
    smooth_orbit: (f32, f32),

    // Configuration
    pub zoom_speed: f32,
    pub smoothing_half_life: f32, // Exponential smoothing half-life in seconds
    pub smoothing_enabled: bool,
}

impl Default for DriveController {
    fn default() -> Self {
        Self::new()
    }
}

impl DriveController {
    pub fn new() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,

            mouse_pressed: false,
            cursor: None,
            anchor: None,
            pending_orbit: (0.0, 0.0),
            pending_zoom: 0.0,

            smooth_orbit: (0.0, 0.0),

            zoom_speed: 0.05,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }

    /// Process keyboard input; returns true if the key drives the pickup
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW => { self.forward = pressed; true }
            KeyCode::KeyS => { self.backward = pressed; true }
            KeyCode::KeyA => { self.left = pressed; true }
            KeyCode::KeyD => { self.right = pressed; true }
            _ => false,
        }
    }

    /// Process mouse button input
    ///
    /// Pressing the left button anchors the drag at the current cursor position.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button != MouseButton::Left {
            return;
        }
        self.mouse_pressed = state == ElementState::Pressed;
        self.anchor = if self.mouse_pressed { self.cursor } else { None };
    }

    /// Process an absolute cursor position in window pixels
    ///
    /// While dragging, the orbit delta is `anchor - current` and the anchor
    /// moves to the current position.
    pub fn process_cursor_moved(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
        if !self.mouse_pressed {
            return;
        }
        if let Some((ax, ay)) = self.anchor {
            self.pending_orbit.0 += (ax - x) as f32;
            self.pending_orbit.1 += (ay - y) as f32;
        }
        self.anchor = Some((x, y));
    }

    /// Process a scroll of `lines` (positive = away from the user)
    pub fn process_scroll(&mut self, lines: f32) {
        self.pending_zoom += -self.zoom_speed * lines;
    }

    /// Drive intents from the currently held keys
    pub fn intent(&self) -> DriveIntent {
        let mut intent = DriveIntent::NONE;
        intent.set(DriveIntent::FORWARD, self.forward);
        intent.set(DriveIntent::BACKWARD, self.backward);
        intent.set(DriveIntent::LEFT, self.left);
        intent.set(DriveIntent::RIGHT, self.right);
        intent
    }

    /// Apply the accumulated orbit and zoom to the camera, then clear them
    pub fn update<C: OrbitControl>(&mut self, camera: &mut C, dt: f32) {
        // Apply exponential smoothing to mouse input
        let orbit = if self.smoothing_enabled && dt > 0.0 {
            // factor = 2^(-dt / half_life), so smaller half_life = faster response
            let factor = 2.0f32.powf(-dt / self.smoothing_half_life);
            self.smooth_orbit.0 = self.smooth_orbit.0 * factor + self.pending_orbit.0 * (1.0 - factor);
            self.smooth_orbit.1 = self.smooth_orbit.1 * factor + self.pending_orbit.1 * (1.0 - factor);
            self.smooth_orbit
        } else {
            self.pending_orbit
        };

        if orbit != (0.0, 0.0) || self.pending_zoom != 0.0 {
            camera.update_orbit(orbit, self.pending_zoom);
        }

        self.pending_orbit = (0.0, 0.0);
        self.pending_zoom = 0.0;
    }

    /// Check if the left mouse button is held
    pub fn is_dragging(&self) -> bool {
        self.mouse_pressed
    }

    /// Builder: set zoom speed per scroll line
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Builder: set smoothing half-life (lower = more responsive)
    pub fn with_smoothing_half_life(mut self, half_life: f32) -> Self {
        self.smoothing_half_life = half_life;
        self
    }

    /// Builder: enable or disable smoothing
    pub fn with_smoothing(mut self, enabled: bool) -> Self {
        self.smoothing_enabled = enabled;
        self
    }
}

/// Trait for orbit camera control
/// Allows the controller to work with different camera implementations
pub trait OrbitControl {
    /// Orbit by a drag delta in pixels and zoom by a relative amount
    /// (`radius *= 1 + zoom`)
    fn update_orbit(&mut self, delta: (f32, f32), zoom: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCamera {
        calls: Vec<((f32, f32), f32)>,
    }

    impl OrbitControl for RecordingCamera {
        fn update_orbit(&mut self, delta: (f32, f32), zoom: f32) {
            self.calls.push((delta, zoom));
        }
    }

    #[test]
    fn test_keys_map_to_intents() {
        let mut controller = DriveController::new();
        assert_eq!(controller.intent(), DriveIntent::NONE);

        assert!(controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed));
        assert!(controller.process_keyboard(KeyCode::KeyA, ElementState::Pressed));
        assert_eq!(controller.intent(), DriveIntent::FORWARD | DriveIntent::LEFT);

        controller.process_keyboard(KeyCode::KeyW, ElementState::Released);
        controller.process_keyboard(KeyCode::KeyS, ElementState::Pressed);
        controller.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        assert_eq!(
            controller.intent(),
            DriveIntent::BACKWARD | DriveIntent::LEFT | DriveIntent::RIGHT
        );
    }

    #[test]
    fn test_unrelated_key_ignored() {
        let mut controller = DriveController::new();
        assert!(!controller.process_keyboard(KeyCode::KeyP, ElementState::Pressed));
        assert_eq!(controller.intent(), DriveIntent::NONE);
    }

    #[test]
    fn test_drag_accumulates_anchor_minus_current() {
        let mut controller = DriveController::new();
        let mut camera = RecordingCamera::default();

        controller.process_cursor_moved(100.0, 100.0);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(110.0, 95.0);
        controller.process_cursor_moved(130.0, 90.0);
        controller.update(&mut camera, 0.016);

        assert_eq!(camera.calls, vec![((-30.0, 10.0), 0.0)]);
    }

    #[test]
    fn test_motion_without_button_does_not_orbit() {
        let mut controller = DriveController::new();
        let mut camera = RecordingCamera::default();

        controller.process_cursor_moved(0.0, 0.0);
        controller.process_cursor_moved(50.0, 50.0);
        controller.update(&mut camera, 0.016);
        assert!(camera.calls.is_empty());

        // Release stops the drag
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_mouse_button(MouseButton::Left, ElementState::Released);
        controller.process_cursor_moved(80.0, 80.0);
        controller.update(&mut camera, 0.016);
        assert!(camera.calls.is_empty());
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_scroll_zooms() {
        let mut controller = DriveController::new().with_zoom_speed(0.1);
        let mut camera = RecordingCamera::default();

        controller.process_scroll(2.0);
        controller.update(&mut camera, 0.016);
        assert_eq!(camera.calls.len(), 1);
        assert!((camera.calls[0].1 + 0.2).abs() < 1e-6);

        // Pending input is cleared after each update
        controller.update(&mut camera, 0.016);
        assert_eq!(camera.calls.len(), 1);
    }

    #[test]
    fn test_smoothing_spreads_drag() {
        let mut controller = DriveController::new().with_smoothing(true).with_smoothing_half_life(0.1);
        let mut camera = RecordingCamera::default();

        controller.process_cursor_moved(0.0, 0.0);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(-10.0, 0.0);
        controller.update(&mut camera, 0.1);

        let ((dx, _), _) = camera.calls[0];
        assert!((dx - 5.0).abs() < 1e-4);
    }
}
