//! Simulation system
//!
//! Manages the per-frame update including:
//! - Delta time calculation
//! - Input → vehicle kinematics
//! - Camera follow and orbit

use std::time::Instant;
use pickup_core::{FrameMotion, Scene};
use pickup_input::DriveController;
use pickup_render::camera::OrbitCamera;

/// Result of a simulation update
#[derive(Debug, Clone, Copy)]
pub struct SimulationResult {
    /// Frame time fed to the simulation (after capping)
    pub dt: f32,
    /// How far the pickup moved and turned
    pub motion: FrameMotion,
}

/// Manages the simulation loop
pub struct SimulationSystem {
    last_frame: Instant,
    max_dt: f32,
    log_vehicle_state: bool,
}

impl SimulationSystem {
    /// Create a new simulation system
    ///
    /// `max_dt` caps the frame time so a stall (first frame, window drag)
    /// does not teleport the pickup.
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            max_dt,
            log_vehicle_state: false,
        }
    }

    /// Builder: log the vehicle state every frame at debug level
    pub fn with_vehicle_logging(mut self, enabled: bool) -> Self {
        self.log_vehicle_state = enabled;
        self
    }

    /// Clamp a raw frame time into `[0, max_dt]`; a non-positive `max_dt` gives 0
    pub fn cap_dt(&self, raw_dt: f32) -> f32 {
        raw_dt.min(self.max_dt).max(0.0)
    }

    /// Run one simulation frame using wall-clock time since the last call
    pub fn update(
        &mut self,
        scene: &mut Scene,
        camera: &mut OrbitCamera,
        controller: &mut DriveController,
    ) -> SimulationResult {
        let now = Instant::now();
        let dt = self.cap_dt((now - self.last_frame).as_secs_f32());
        self.last_frame = now;

        self.step(dt, scene, camera, controller)
    }

    /// Run one simulation frame with an explicit time step
    ///
    /// 1. Drive intents from held keys → vehicle kinematics (+ terrain fit)
    /// 2. Camera look-at follows the scene's camera mode
    /// 3. Pending mouse orbit/zoom applied to the camera
    pub fn step(
        &mut self,
        dt: f32,
        scene: &mut Scene,
        camera: &mut OrbitCamera,
        controller: &mut DriveController,
    ) -> SimulationResult {
        let motion = scene.update(dt, controller.intent());

        camera.set_target(scene.camera_target());
        controller.update(camera, dt);

        if self.log_vehicle_state {
            let s = scene.vehicle_state();
            log::debug!(
                "pos ({:.2}, {:.2}, {:.2}) heading {:.3} steer {:.3} pitch {:.3} roll {:.3}",
                s.position.x,
                s.position.y,
                s.position.z,
                s.heading,
                s.steering_angle,
                s.pitch,
                s.roll
            );
        }

        SimulationResult { dt, motion }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(0.1)
    }
}
