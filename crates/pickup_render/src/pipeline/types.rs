//! GPU-compatible data types for the scene pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use pickup_core::MeshVertex;
use pickup_math::{mat4, Mat4};

/// Distance between consecutive per-draw uniforms in the model buffer.
///
/// Dynamic uniform offsets must be multiples of
/// `min_uniform_buffer_offset_alignment`, which is 256 on most adapters.
pub const MODEL_UNIFORM_STRIDE: u64 = 256;

/// Per-frame uniforms
/// Layout: 112 bytes total (must match scene.wgsl FrameUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Projection * view (64 bytes)
    pub view_projection: Mat4,
    /// Light direction (normalized, toward the light) + padding (16 bytes)
    pub light_dir: [f32; 3],
    pub _padding: f32,
    /// Eye position + padding (16 bytes)
    pub eye: [f32; 3],
    pub _padding2: f32,
    /// Lighting parameters (16 bytes)
    pub ambient_strength: f32,
    pub diffuse_strength: f32,
    pub _padding3: [f32; 2],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view_projection: mat4::IDENTITY,
            light_dir: [0.5, 1.0, 0.3],
            _padding: 0.0,
            eye: [0.0; 3],
            _padding2: 0.0,
            ambient_strength: 0.35,
            diffuse_strength: 0.65,
            _padding3: [0.0; 2],
        }
    }
}

/// Per-draw uniforms
/// Layout: 128 bytes (must match scene.wgsl ModelUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ModelUniforms {
    /// Object to world
    pub model: Mat4,
    /// Inverse-transpose of the model's linear part, for normals
    pub normal_matrix: Mat4,
}

impl ModelUniforms {
    /// Build uniforms for a model matrix
    ///
    /// The normal matrix is the inverse-transpose of the upper 3x3; for a
    /// singular model it falls back to the model itself.
    pub fn new(model: Mat4) -> Self {
        Self {
            model,
            normal_matrix: normal_matrix(model),
        }
    }
}

impl Default for ModelUniforms {
    fn default() -> Self {
        Self::new(mat4::IDENTITY)
    }
}

/// Inverse-transpose of the upper-left 3x3 of a column-major matrix
fn normal_matrix(m: Mat4) -> Mat4 {
    let a = [
        [m[0][0], m[0][1], m[0][2]],
        [m[1][0], m[1][1], m[1][2]],
        [m[2][0], m[2][1], m[2][2]],
    ];
    // Columns of the inverse-transpose are the cross products of the
    // other two columns, divided by the determinant.
    let cross = |u: [f32; 3], v: [f32; 3]| {
        [
            u[1] * v[2] - u[2] * v[1],
            u[2] * v[0] - u[0] * v[2],
            u[0] * v[1] - u[1] * v[0],
        ]
    };
    let c0 = cross(a[1], a[2]);
    let c1 = cross(a[2], a[0]);
    let c2 = cross(a[0], a[1]);
    let det = a[0][0] * c0[0] + a[0][1] * c0[1] + a[0][2] * c0[2];
    if det.abs() < f32::EPSILON {
        return m;
    }
    let inv = 1.0 / det;
    [
        [c0[0] * inv, c0[1] * inv, c0[2] * inv, 0.0],
        [c1[0] * inv, c1[1] * inv, c1[2] * inv, 0.0],
        [c2[0] * inv, c2[1] * inv, c2[2] * inv, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Get the vertex buffer layout for MeshVertex
pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position: vec3<f32>
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            // normal: vec3<f32>
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
            // color: vec4<f32>
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 24,
                shader_location: 2,
            },
        ],
    }
}
