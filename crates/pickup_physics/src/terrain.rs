//! Ground height field built from a sum of sine waves

use pickup_math::{Vec2, Vec3};

/// Parameters of a single ground wave
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
    /// Peak displacement of the wave
    pub amplitude: f32,
    /// Angular frequency along `direction` (radians per unit)
    pub omega: f32,
    /// Unit direction of travel in the ground plane (x, z)
    pub direction: Vec2,
}

impl WaveParams {
    /// Create a wave; `direction` is normalized
    pub fn new(amplitude: f32, omega: f32, direction: Vec2) -> Self {
        Self {
            amplitude,
            omega,
            direction: direction.normalized(),
        }
    }

    /// Phase of the wave at ground position `p`
    #[inline]
    fn phase(&self, p: Vec2) -> f32 {
        self.omega * p.dot(self.direction)
    }
}

/// Anything that can report a ground height at (x, z)
pub trait HeightSampler {
    fn sample(&self, x: f32, z: f32) -> f32;
}

/// Immutable height field: `height(x, z) = Σ a_i · sin(ω_i · dot((x, z), d_i))`
#[derive(Clone, Debug)]
pub struct HeightField {
    waves: Vec<WaveParams>,
}

impl Default for HeightField {
    fn default() -> Self {
        Self::new(Self::default_waves())
    }
}

impl HeightField {
    /// Create a height field from a set of waves
    pub fn new(waves: Vec<WaveParams>) -> Self {
        Self { waves }
    }

    /// The four waves of the classic rolling-hills ground
    pub fn default_waves() -> Vec<WaveParams> {
        vec![
            WaveParams::new(0.9, 0.35, Vec2::new(0.0, 1.0)),
            WaveParams::new(0.7, 0.4, Vec2::new(1.0, 0.0)),
            WaveParams::new(1.1, 0.1, Vec2::new(-2.0, 1.0)),
            WaveParams::new(0.3, 0.8, Vec2::new(-1.0, -2.5)),
        ]
    }

    /// The waves making up this field
    pub fn waves(&self) -> &[WaveParams] {
        &self.waves
    }

    /// Ground displacement at (x, z)
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let p = Vec2::new(x, z);
        self.waves
            .iter()
            .map(|w| w.amplitude * w.phase(p).sin())
            .sum()
    }

    /// Partial derivatives `(dh/dx, dh/dz)` at (x, z)
    pub fn gradient(&self, x: f32, z: f32) -> Vec2 {
        let p = Vec2::new(x, z);
        self.waves.iter().fold(Vec2::ZERO, |acc, w| {
            let k = w.amplitude * w.omega * w.phase(p).cos();
            acc + w.direction * k
        })
    }

    /// Unit surface normal at (x, z)
    pub fn normal(&self, x: f32, z: f32) -> Vec3 {
        let g = self.gradient(x, z);
        Vec3::new(-g.x, 1.0, -g.y).normalized()
    }

    /// Upper bound on `|height|`: the sum of absolute amplitudes
    pub fn amplitude_bound(&self) -> f32 {
        self.waves.iter().map(|w| w.amplitude.abs()).sum()
    }
}

impl HeightSampler for HeightField {
    fn sample(&self, x: f32, z: f32) -> f32 {
        self.height(x, z)
    }
}

/// A perfectly flat ground at a fixed height
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatGround {
    pub height: f32,
}

impl HeightSampler for FlatGround {
    fn sample(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directions_normalized() {
        let field = HeightField::default();
        assert_eq!(field.waves().len(), 4);
        for w in field.waves() {
            assert!((w.direction.length() - 1.0).abs() < 0.0001);
        }
    }

    #[test]
    fn test_height_deterministic() {
        let field = HeightField::default();
        for &(x, z) in &[(0.0, 0.0), (3.5, -7.25), (-12.0, 40.0)] {
            assert_eq!(field.height(x, z), field.height(x, z));
        }
    }

    #[test]
    fn test_height_at_origin_is_zero() {
        // Every wave passes through zero phase at the origin
        let field = HeightField::default();
        assert_eq!(field.height(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_height_bounded_by_amplitudes() {
        let field = HeightField::default();
        let bound = field.amplitude_bound();
        assert!((bound - 3.0).abs() < 0.0001);

        let mut x = -50.0;
        while x <= 50.0 {
            let mut z = -50.0;
            while z <= 50.0 {
                assert!(field.height(x, z).abs() <= bound + 1e-5);
                z += 1.7;
            }
            x += 1.3;
        }
    }

    #[test]
    fn test_single_wave_values() {
        let field = HeightField::new(vec![WaveParams::new(2.0, 1.0, Vec2::new(1.0, 0.0))]);
        let quarter = std::f32::consts::FRAC_PI_2;
        assert!((field.height(quarter, 0.0) - 2.0).abs() < 0.0001);
        // Constant along z for a wave travelling in x
        assert!((field.height(quarter, 10.0) - 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_gradient_matches_finite_difference() {
        let field = HeightField::default();
        let h = 1e-2;
        for &(x, z) in &[(1.0, 2.0), (-4.0, 6.5), (9.0, -3.0)] {
            let g = field.gradient(x, z);
            let dx = (field.height(x + h, z) - field.height(x - h, z)) / (2.0 * h);
            let dz = (field.height(x, z + h) - field.height(x, z - h)) / (2.0 * h);
            assert!((g.x - dx).abs() < 1e-2, "dx {} vs {}", g.x, dx);
            assert!((g.y - dz).abs() < 1e-2, "dz {} vs {}", g.y, dz);
        }
    }

    #[test]
    fn test_normal_points_up() {
        let field = HeightField::default();
        let n = field.normal(5.0, -2.0);
        assert!(n.y > 0.0);
        assert!((n.length() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_flat_ground() {
        let flat = FlatGround { height: 1.5 };
        assert_eq!(flat.sample(100.0, -3.0), 1.5);
    }
}
