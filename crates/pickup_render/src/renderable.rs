//! Renderable geometry - bridges the Scene to GPU buffers
//!
//! Meshes are uploaded once and stored in a slotmap. Each frame the scene is
//! turned into a list of draw calls (mesh key + model matrix).

use slotmap::{new_key_type, SlotMap};
use wgpu::util::DeviceExt;

use pickup_core::{MeshData, Part, PartGroup, Scene};
use pickup_math::{mat4, Mat4};

new_key_type! {
    /// Handle to a mesh in a [`MeshStore`]
    pub struct MeshKey;
}

/// Segments used for wheel cylinders
const WHEEL_SEGMENTS: u32 = 32;

/// An indexed mesh resident on the GPU
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    /// Upload mesh data
    pub fn new(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// GPU meshes keyed by [`MeshKey`]
pub type MeshStore = SlotMap<MeshKey, GpuMesh>;

/// A single draw: which mesh, placed where
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    pub mesh: MeshKey,
    pub model: Mat4,
}

/// Mesh keys for everything in the scene
///
/// Colours are baked into the vertices, so each part group gets its own mesh.
#[derive(Clone, Copy, Debug)]
pub struct SceneMeshes {
    pub ground: MeshKey,
    pub base: MeshKey,
    pub cockpit: MeshKey,
    pub wheel: MeshKey,
}

impl SceneMeshes {
    /// Build and upload the scene's meshes
    pub fn upload(device: &wgpu::Device, store: &mut MeshStore, scene: &Scene) -> Self {
        let pickup = scene.pickup();

        let ground = store.insert(GpuMesh::new(device, "Ground", scene.ground().mesh()));
        let base = store.insert(GpuMesh::new(
            device,
            "Base",
            &MeshData::cube(pickup.color(PartGroup::Base)),
        ));
        let cockpit = store.insert(GpuMesh::new(
            device,
            "Cockpit",
            &MeshData::cube(pickup.color(PartGroup::Cockpit)),
        ));
        let wheel = store.insert(GpuMesh::new(
            device,
            "Wheel",
            &MeshData::cylinder(WHEEL_SEGMENTS, pickup.color(PartGroup::Wheel)),
        ));

        log::info!("Uploaded {} meshes", store.len());

        Self { ground, base, cockpit, wheel }
    }

    /// Mesh used for a pickup part
    pub fn for_part(&self, part: Part) -> MeshKey {
        match part.group() {
            PartGroup::Base => self.base,
            PartGroup::Cockpit => self.cockpit,
            PartGroup::Wheel => self.wheel,
        }
    }

    /// Draw calls for the current frame: the ground, then the seven parts
    pub fn draw_list(&self, scene: &Scene) -> Vec<DrawCall> {
        let mut draws = Vec::with_capacity(1 + Part::ALL.len());
        draws.push(DrawCall { mesh: self.ground, model: mat4::IDENTITY });
        draws.extend(
            scene
                .part_transforms()
                .iter()
                .map(|(part, model)| DrawCall { mesh: self.for_part(part), model }),
        );
        draws
    }
}
