//! Orbit camera
//!
//! The eye sits on a sphere around `look_at`, described by a radius and two
//! angles. Yaw is measured from +X toward +Z, pitch from the ground plane up.

use pickup_input::OrbitControl;
use pickup_math::{mat4, Mat4, Vec3};

use crate::pipeline::{look_at_matrix, perspective_matrix};

/// Pitch limit, short of the poles so the up vector stays valid
const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Orbit camera around a look-at point
pub struct OrbitCamera {
    /// Point the camera orbits and looks at
    pub look_at: Vec3,
    /// Vertical field of view (rad)
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Radians per pixel of drag
    pub sensitivity: f32,
    pub min_radius: f32,
    pub max_radius: f32,

    radius: f32,
    yaw: f32,
    pitch: f32,
    aspect: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vec3::new(12.0, 4.0, -12.0), Vec3::ZERO)
    }
}

impl OrbitCamera {
    /// Create a camera at `eye` looking at `look_at`
    pub fn new(eye: Vec3, look_at: Vec3) -> Self {
        let mut camera = Self {
            look_at,
            fov_y: 45f32.to_radians(),
            near: 0.01,
            far: 500.0,
            sensitivity: 0.005,
            min_radius: 2.0,
            max_radius: 200.0,
            radius: 1.0,
            yaw: 0.0,
            pitch: 0.0,
            aspect: 1.0,
        };
        camera.set_eye(eye);
        camera
    }

    /// Place the eye, deriving radius and angles from its offset to `look_at`
    pub fn set_eye(&mut self, eye: Vec3) {
        let offset = eye - self.look_at;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        self.radius = radius;
        self.yaw = offset.z.atan2(offset.x);
        self.pitch = (offset.y / radius).clamp(-1.0, 1.0).asin().clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Move the orbit centre, keeping radius and angles
    pub fn set_target(&mut self, target: Vec3) {
        self.look_at = target;
    }

    /// Rotate around the look-at point and zoom
    ///
    /// `delta` is a drag in pixels; `zoom` scales the radius by `1 + zoom`.
    pub fn update_orbit(&mut self, delta: (f32, f32), zoom: f32) {
        self.yaw += delta.0 * self.sensitivity;
        self.pitch = (self.pitch + delta.1 * self.sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
        self.radius = (self.radius * (1.0 + zoom)).clamp(self.min_radius, self.max_radius);
    }

    /// Update the aspect ratio after a resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// World-space eye position
    pub fn eye(&self) -> Vec3 {
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        self.look_at + Vec3::new(cp * cy, sp, cp * sy) * self.radius
    }

    /// World to view transform
    pub fn view_matrix(&self) -> Mat4 {
        look_at_matrix(self.eye(), self.look_at, Vec3::Y)
    }

    /// View to clip transform (wgpu depth range 0..1)
    pub fn projection_matrix(&self) -> Mat4 {
        perspective_matrix(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Combined `projection * view`
    pub fn view_projection(&self) -> Mat4 {
        mat4::mul(self.projection_matrix(), self.view_matrix())
    }

    /// Builder: set the field of view in degrees
    pub fn with_fov_degrees(mut self, fov: f32) -> Self {
        self.fov_y = fov.to_radians();
        self
    }

    /// Builder: set near and far clip planes
    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Builder: set drag sensitivity (rad per pixel)
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Builder: set the zoom limits; the current radius is clamped into them
    pub fn with_radius_limits(mut self, min: f32, max: f32) -> Self {
        self.min_radius = min;
        self.max_radius = max.max(min);
        self.radius = self.radius.clamp(self.min_radius, self.max_radius);
        self
    }
}

impl OrbitControl for OrbitCamera {
    fn update_orbit(&mut self, delta: (f32, f32), zoom: f32) {
        OrbitCamera::update_orbit(self, delta, zoom);
    }
}
