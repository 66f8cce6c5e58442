//! The wavy ground: height field plus the static grid mesh built from it

use pickup_math::Vec3;
use pickup_physics::HeightField;

use crate::shapes::{MeshData, MeshVertex};

/// Largest grid resolution; `(resolution + 1)²` vertices must be
/// addressable by `u32` indices, and this keeps the mesh a sane size.
pub const MAX_GROUND_RESOLUTION: u32 = 2048;

/// Grid and colour settings for the ground mesh
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundSettings {
    /// The grid spans `[-half_size, half_size]` on both axes
    pub half_size: f32,
    /// Cells per side
    pub resolution: u32,
    /// Base RGB colour; vertices range from 0.5x (lowest) to 1.5x (highest)
    pub color: [f32; 3],
}

impl GroundSettings {
    /// Resolution actually used for the mesh, within `[1, MAX_GROUND_RESOLUTION]`
    pub fn clamped_resolution(&self) -> u32 {
        self.resolution.clamp(1, MAX_GROUND_RESOLUTION)
    }
}

impl Default for GroundSettings {
    fn default() -> Self {
        Self {
            half_size: 50.0,
            resolution: 100,
            color: [0.15, 0.45, 0.15],
        }
    }
}

/// Ground surface the pickup drives on
#[derive(Clone, Debug)]
pub struct Ground {
    field: HeightField,
    settings: GroundSettings,
    mesh: MeshData,
}

impl Ground {
    /// Build the ground and its mesh
    pub fn new(field: HeightField, settings: GroundSettings) -> Self {
        let mesh = build_mesh(&field, &settings);
        log::info!(
            "Ground mesh: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Self { field, settings, mesh }
    }

    /// The height field
    pub fn field(&self) -> &HeightField {
        &self.field
    }

    pub fn settings(&self) -> &GroundSettings {
        &self.settings
    }

    /// The static grid mesh
    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// Ground height at (x, z)
    pub fn height(&self, x: f32, z: f32) -> f32 {
        self.field.height(x, z)
    }
}

impl Default for Ground {
    fn default() -> Self {
        Self::new(HeightField::default(), GroundSettings::default())
    }
}

fn build_mesh(field: &HeightField, settings: &GroundSettings) -> MeshData {
    let resolution = settings.clamped_resolution();
    if resolution != settings.resolution {
        log::warn!(
            "Ground resolution {} out of range, using {}",
            settings.resolution,
            resolution
        );
    }
    let side = resolution + 1;
    let step = 2.0 * settings.half_size / resolution as f32;

    let mut points = Vec::with_capacity(side as usize * side as usize);
    for j in 0..side {
        let z = -settings.half_size + j as f32 * step;
        for i in 0..side {
            let x = -settings.half_size + i as f32 * step;
            points.push(Vec3::new(x, field.height(x, z), z));
        }
    }

    let (min, max) = points
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let range = max - min;

    let base = Vec3::from_array(settings.color);
    let low = base * 0.5;
    let high = base * 1.5;

    let vertices = points
        .iter()
        .map(|p| {
            let t = if range > 0.0 { (p.y - min) / range } else { 0.0 };
            let c = low.lerp(high, t).clamp_scalar(0.0, 1.0);
            MeshVertex::new(*p, field.normal(p.x, p.z), [c.x, c.y, c.z, 1.0])
        })
        .collect();

    let mut indices = Vec::with_capacity(resolution as usize * resolution as usize * 6);
    for j in 0..resolution {
        for i in 0..resolution {
            let a = j * side + i;
            let b = a + 1;
            let c = a + side;
            let d = c + 1;
            // Counter-clockwise seen from +Y
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickup_math::Vec2;
    use pickup_physics::WaveParams;

    fn small() -> GroundSettings {
        GroundSettings {
            half_size: 10.0,
            resolution: 8,
            color: [0.2, 0.4, 0.6],
        }
    }

    #[test]
    fn test_counts() {
        let ground = Ground::new(HeightField::default(), small());
        assert_eq!(ground.mesh().vertices.len(), 81);
        assert_eq!(ground.mesh().indices.len(), 8 * 8 * 6);
        assert!(ground.mesh().indices.iter().all(|&i| i < 81));
    }

    #[test]
    fn test_resolution_clamped_to_indexable_range() {
        let huge = GroundSettings { resolution: 70_000, ..small() };
        assert_eq!(huge.clamped_resolution(), MAX_GROUND_RESOLUTION);
        let side = MAX_GROUND_RESOLUTION as u64 + 1;
        assert!(side * side <= u32::MAX as u64);

        let zero = GroundSettings { resolution: 0, ..small() };
        let ground = Ground::new(HeightField::default(), zero);
        assert_eq!(ground.mesh().vertices.len(), 4);
        assert_eq!(ground.mesh().indices.len(), 6);
    }

    #[test]
    fn test_heights_follow_field() {
        let ground = Ground::new(HeightField::default(), small());
        for v in &ground.mesh().vertices {
            let [x, y, z] = v.position;
            assert_eq!(y, ground.height(x, z));
        }
    }

    #[test]
    fn test_extent() {
        let ground = Ground::new(HeightField::default(), small());
        let first = ground.mesh().vertices[0].position;
        let last = ground.mesh().vertices[80].position;
        assert_eq!((first[0], first[2]), (-10.0, -10.0));
        assert!((last[0] - 10.0).abs() < 1e-5);
        assert!((last[2] - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_color_range() {
        let ground = Ground::new(HeightField::default(), small());
        let greens: Vec<f32> = ground.mesh().vertices.iter().map(|v| v.color[1]).collect();
        let lo = greens.iter().cloned().fold(f32::INFINITY, f32::min);
        let hi = greens.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!((lo - 0.2).abs() < 1e-5);
        assert!((hi - 0.6).abs() < 1e-5);
        // Blue channel 1.5 * 0.6 = 0.9, still within [0, 1]
        for v in &ground.mesh().vertices {
            assert!(v.color.iter().all(|&c| (0.0..=1.0).contains(&c)));
            assert_eq!(v.color[3], 1.0);
        }
    }

    #[test]
    fn test_bright_color_clamped() {
        let settings = GroundSettings { color: [0.9, 0.9, 0.9], ..small() };
        let ground = Ground::new(HeightField::default(), settings);
        assert!(ground.mesh().vertices.iter().all(|v| v.color[0] <= 1.0));
    }

    #[test]
    fn test_flat_field_uses_low_color() {
        let flat = HeightField::new(vec![WaveParams::new(0.0, 1.0, Vec2::new(1.0, 0.0))]);
        let ground = Ground::new(flat, small());
        for v in &ground.mesh().vertices {
            assert!((v.color[1] - 0.2).abs() < 1e-6);
        }
    }

    #[test]
    fn test_triangles_face_up() {
        let ground = Ground::new(HeightField::default(), small());
        let mesh = ground.mesh();
        for tri in mesh.indices.chunks(3) {
            let p = |i: u32| Vec3::from_array(mesh.vertices[i as usize].position);
            let n = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
            assert!(n.y > 0.0);
        }
    }
}
