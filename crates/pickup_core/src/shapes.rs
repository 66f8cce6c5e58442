//! Mesh primitives
//!
//! Indexed triangle meshes built on the CPU and uploaded once. Triangles wind
//! counter-clockwise when seen from outside.

use bytemuck::{Pod, Zeroable};
use pickup_math::Vec3;
use std::f32::consts::TAU;

/// RGBA colour
pub type Color = [f32; 4];

/// A mesh vertex, laid out for direct upload into a vertex buffer
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
        }
    }
}

/// Indexed triangle mesh
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unit cube centred at the origin (extent -0.5..0.5) with flat face normals
    pub fn cube(color: Color) -> Self {
        // (normal, u, v) with u × v = normal
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (-Vec3::X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (-Vec3::Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (-Vec3::Z, Vec3::Y, Vec3::X),
        ];

        let mut mesh = Self {
            vertices: Vec::with_capacity(24),
            indices: Vec::with_capacity(36),
        };

        for (normal, u, v) in faces {
            let base = mesh.vertices.len() as u32;
            let center = normal * 0.5;
            for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
                mesh.vertices
                    .push(MeshVertex::new(center + u * su + v * sv, normal, color));
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        mesh
    }

    /// Unit cylinder: radius 1, height 1 along Y, centred at the origin, with caps
    pub fn cylinder(segments: u32, color: Color) -> Self {
        let segments = segments.max(3);
        let half = 0.5;
        let ring = |i: u32| {
            let angle = i as f32 / segments as f32 * TAU;
            (angle.cos(), angle.sin())
        };

        let mut mesh = Self::default();

        // Side: one bottom/top vertex pair per ring position, seam duplicated
        for i in 0..=segments {
            let (c, s) = ring(i);
            let normal = Vec3::new(c, 0.0, s);
            mesh.vertices.push(MeshVertex::new(Vec3::new(c, -half, s), normal, color));
            mesh.vertices.push(MeshVertex::new(Vec3::new(c, half, s), normal, color));
        }
        for i in 0..segments {
            let b0 = 2 * i;
            let t0 = b0 + 1;
            let b1 = b0 + 2;
            let t1 = b0 + 3;
            mesh.indices.extend_from_slice(&[b0, t0, b1, b1, t0, t1]);
        }

        // Caps
        for (y, normal) in [(half, Vec3::Y), (-half, -Vec3::Y)] {
            let center = mesh.vertices.len() as u32;
            mesh.vertices.push(MeshVertex::new(Vec3::new(0.0, y, 0.0), normal, color));
            for i in 0..segments {
                let (c, s) = ring(i);
                mesh.vertices.push(MeshVertex::new(Vec3::new(c, y, s), normal, color));
            }
            for i in 0..segments {
                let current = center + 1 + i;
                let next = center + 1 + (i + 1) % segments;
                if normal.y > 0.0 {
                    mesh.indices.extend_from_slice(&[center, next, current]);
                } else {
                    mesh.indices.extend_from_slice(&[center, current, next]);
                }
            }
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = [1.0; 4];

    fn position(mesh: &MeshData, index: u32) -> Vec3 {
        Vec3::from_array(mesh.vertices[index as usize].position)
    }

    /// Every triangle's winding normal must agree with its vertex normals
    fn assert_outward_winding(mesh: &MeshData) {
        for tri in mesh.indices.chunks(3) {
            let (a, b, c) = (position(mesh, tri[0]), position(mesh, tri[1]), position(mesh, tri[2]));
            let face = (b - a).cross(c - a);
            let normal = Vec3::from_array(mesh.vertices[tri[0] as usize].normal);
            assert!(face.dot(normal) > 0.0, "triangle {:?} winds inward", tri);
        }
    }

    #[test]
    fn test_cube_counts() {
        let cube = MeshData::cube(WHITE);
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_cube_extent() {
        let cube = MeshData::cube(WHITE);
        for v in &cube.vertices {
            for c in v.position {
                assert!((c.abs() - 0.5).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_cube_winding() {
        assert_outward_winding(&MeshData::cube(WHITE));
    }

    #[test]
    fn test_cylinder_counts() {
        let cyl = MeshData::cylinder(16, WHITE);
        // side pairs (17 * 2) + two caps (1 + 16 each)
        assert_eq!(cyl.vertices.len(), 34 + 34);
        // 2 per side segment + 1 per cap segment per cap
        assert_eq!(cyl.triangle_count(), 32 + 32);
    }

    #[test]
    fn test_cylinder_winding_and_radius() {
        let cyl = MeshData::cylinder(12, WHITE);
        assert_outward_winding(&cyl);
        for v in &cyl.vertices {
            let r = (v.position[0] * v.position[0] + v.position[2] * v.position[2]).sqrt();
            assert!(r <= 1.0 + 1e-5);
            assert!(v.position[1].abs() <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn test_cylinder_minimum_segments() {
        let cyl = MeshData::cylinder(1, WHITE);
        assert_eq!(cyl.triangle_count(), 3 * 2 + 3 * 2);
    }

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 40);
    }
}
