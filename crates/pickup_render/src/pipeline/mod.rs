//! Rendering pipeline components
//!
//! One render pipeline draws every mesh in the scene: per-vertex colour with
//! ambient plus Lambert diffuse lighting.

pub mod types;
pub mod scene_pipeline;

// Re-export types
pub use types::{vertex_buffer_layout, FrameUniforms, ModelUniforms, MODEL_UNIFORM_STRIDE};

// Re-export pipeline
pub use scene_pipeline::{ScenePipeline, perspective_matrix, look_at_matrix, DEPTH_FORMAT};
