//! Pickup input handling
//!
//! Turns held keys into drive intents and mouse drags/scrolls into orbit
//! camera motion.

mod drive_controller;

pub use drive_controller::{DriveController, OrbitControl};
