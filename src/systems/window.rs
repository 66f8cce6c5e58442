//! Window management system
//!
//! Handles window creation, fullscreen toggle, and title updates.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use pickup_core::{CameraMode, VehicleState};
use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Update window title with vehicle and camera info
    pub fn update_title(&self, state: &VehicleState, mode: CameraMode) {
        self.window.set_title(&format_title(&self.base_title, state, mode));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Title text: base title, pickup position and heading, camera mode
pub fn format_title(base: &str, state: &VehicleState, mode: CameraMode) -> String {
    let camera = match mode {
        CameraMode::Origin => "origin",
        CameraMode::FollowPickup => "follow",
    };
    format!(
        "{} - ({:.1}, {:.1}, {:.1}) heading {:.0}° [camera: {}]",
        base,
        state.position.x,
        state.position.y,
        state.position.z,
        state.heading.to_degrees(),
        camera
    )
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pickup_core::Vec3;

    #[test]
    fn test_title_formatting() {
        let state = VehicleState::at(Vec3::new(1.0, 2.0, 3.0), std::f32::consts::FRAC_PI_2);
        let title = format_title("Pickup", &state, CameraMode::FollowPickup);
        assert_eq!(title, "Pickup - (1.0, 2.0, 3.0) heading 90° [camera: follow]");
    }

    #[test]
    fn test_title_origin_mode() {
        let title = format_title("Test", &VehicleState::default(), CameraMode::Origin);
        assert!(title.contains("camera: origin"));
    }

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
