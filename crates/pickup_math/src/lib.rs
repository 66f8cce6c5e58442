//! 3D Mathematics Library
//!
//! Small vector and matrix toolkit for the pickup scene.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector, used for ground-plane coordinates and mouse deltas
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix for affine transformations

mod vec2;
mod vec3;
pub mod mat4;
pub mod angle;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use mat4::Mat4;
pub use angle::wrap_angle;
