//! Core types for the pickup scene
//!
//! This crate provides the CPU side of everything that ends up on screen:
//!
//! - [`MeshData`] - Indexed triangle meshes (cube, cylinder, ground grid)
//! - [`Ground`] - The wavy ground: height field plus its static mesh
//! - [`Pickup`] - Truck dimensions, colours, and per-part transforms
//! - [`Scene`] - Ground, pickup, vehicle kinematics and camera mode

mod shapes;
mod ground;
mod pickup;
mod scene;

pub use shapes::{MeshData, MeshVertex, Color};
pub use ground::{Ground, GroundSettings, MAX_GROUND_RESOLUTION};
pub use pickup::{Pickup, PickupColors, PickupDimensions, Part, PartGroup, PartTransforms};
pub use scene::{Scene, CameraMode};

// Re-export commonly used types from the lower crates for convenience
pub use pickup_math::{Mat4, Vec2, Vec3};
pub use pickup_physics::{
    DriveConfig, DriveIntent, FrameMotion, HeightField, SteeringPolicy, VehicleState,
    WaveParams, WheelSpinPolicy,
};
