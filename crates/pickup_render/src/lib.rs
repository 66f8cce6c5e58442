//! Pickup Rendering Library
//!
//! This crate provides the wgpu-based rendering of the pickup scene.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::OrbitCamera`] - Orbit camera around a look-at point
//! - [`pipeline::ScenePipeline`] - Lit, per-vertex-coloured triangle meshes
//! - [`renderable::MeshStore`] - GPU meshes keyed by slotmap keys
//! - [`screenshot`] - Offscreen capture to PNG

pub mod context;
pub mod camera;
pub mod pipeline;
pub mod renderable;
pub mod screenshot;

// Re-export core types for convenience
pub use pickup_core::{MeshData, MeshVertex, Scene, Part, PartGroup};
pub use pickup_math::{Mat4, Vec3};

pub use renderable::{DrawCall, GpuMesh, MeshKey, MeshStore, SceneMeshes};
