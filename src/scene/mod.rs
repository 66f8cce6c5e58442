//! Scene construction utilities
//!
//! This module turns configuration into a ready-to-drive Scene.

mod scene_builder;

pub use scene_builder::SceneBuilder;
