//! Vehicle motion for the pickup scene
//!
//! This crate provides the per-frame simulation state, including:
//! - The sine-wave height field the ground is built from
//! - Drive intents (forward, backward, steer left, steer right)
//! - Steering policies and the turning-rate approximation
//! - Vehicle kinematics (position, heading, steering, wheel spin)
//! - Fitting the vehicle to the terrain under its four wheels

pub mod intent;
pub mod steering;
pub mod terrain;
pub mod terrain_fit;
pub mod vehicle;

// Re-export commonly used types
pub use intent::DriveIntent;
pub use steering::{turning_angle_per_meter, SteeringPolicy};
pub use terrain::{FlatGround, HeightField, HeightSampler, WaveParams};
pub use terrain_fit::{fit_terrain, TerrainPose};
pub use vehicle::{Chassis, DriveConfig, FrameMotion, VehicleKinematics, VehicleState, WheelSpinPolicy};
