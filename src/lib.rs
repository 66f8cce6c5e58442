//! Pickup - a pickup truck driving over rolling hills
//!
//! The binary wires these modules into a winit event loop; they are exposed
//! as a library so integration tests can reach the configuration and the
//! per-frame systems.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
