//! Fitting the vehicle to the ground under its wheels
//!
//! The four wheel contact points are projected onto the ground, and a plane
//! `y = a + b·u + c·v` is fitted through the sampled heights by least squares,
//! with `u` along the vehicle's length and `v` across it. The plane gives the
//! vehicle's height at its origin plus a pitch and roll.

use crate::terrain::HeightSampler;
use crate::vehicle::{Chassis, VehicleState};

/// Determinants below this are treated as a degenerate wheel layout
const SINGULAR_EPSILON: f32 = 1e-8;

/// Orientation and height of a vehicle resting on the terrain
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainPose {
    /// Ground height below the vehicle origin
    pub height: f32,
    /// Nose-up tilt (rad)
    pub pitch: f32,
    /// Right-side-up tilt (rad)
    pub roll: f32,
}

impl TerrainPose {
    /// Write height, pitch and roll into a vehicle state
    pub fn apply(&self, state: &mut VehicleState) {
        state.position.y = self.height;
        state.pitch = self.pitch;
        state.roll = self.roll;
    }
}

/// Wheel contact points in the vehicle frame as `(u, v)`
pub fn wheel_contacts(chassis: &Chassis) -> [(f32, f32); 4] {
    let half_track = chassis.track / 2.0;
    [
        (chassis.front_axle_x, -half_track),
        (chassis.front_axle_x, half_track),
        (chassis.rear_axle_x, -half_track),
        (chassis.rear_axle_x, half_track),
    ]
}

/// Fit the vehicle to the terrain at its current position and heading
pub fn fit_terrain<S: HeightSampler + ?Sized>(
    state: &VehicleState,
    chassis: &Chassis,
    ground: &S,
) -> TerrainPose {
    let forward = state.forward();
    let right = state.right();

    let samples = wheel_contacts(chassis).map(|(u, v)| {
        let world = state.position + forward * u + right * v;
        (u, v, ground.sample(world.x, world.z))
    });

    let (a, b, c) = fit_plane(&samples);

    TerrainPose {
        height: a,
        pitch: b.atan(),
        roll: c.atan(),
    }
}

/// Least-squares plane `h = a + b·u + c·v` through `(u, v, h)` samples.
///
/// Falls back to a level plane at the mean height when the layout is
/// degenerate (all points on a line).
fn fit_plane(samples: &[(f32, f32, f32)]) -> (f32, f32, f32) {
    let n = samples.len() as f32;
    if samples.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let (mut su, mut sv, mut sh) = (0.0f32, 0.0f32, 0.0f32);
    let (mut suu, mut svv, mut suv) = (0.0f32, 0.0f32, 0.0f32);
    let (mut suh, mut svh) = (0.0f32, 0.0f32);
    for &(u, v, h) in samples {
        su += u;
        sv += v;
        sh += h;
        suu += u * u;
        svv += v * v;
        suv += u * v;
        suh += u * h;
        svh += v * h;
    }

    // Normal equations:
    // | n   su  sv  | |a|   | sh  |
    // | su  suu suv | |b| = | suh |
    // | sv  suv svv | |c|   | svh |
    let m = [[n, su, sv], [su, suu, suv], [sv, suv, svv]];
    let rhs = [sh, suh, svh];

    let det = det3(m);
    if det.abs() < SINGULAR_EPSILON {
        log::debug!("Degenerate wheel layout, using level plane");
        return (sh / n, 0.0, 0.0);
    }

    let solve = |col: usize| {
        let mut mc = m;
        for row in 0..3 {
            mc[row][col] = rhs[row];
        }
        det3(mc) / det
    };

    (solve(0), solve(1), solve(2))
}

fn det3(m: [[f32; 3]; 3]) -> f32 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::FlatGround;
    use pickup_math::Vec3;

    /// Tilted plane `h = base + sx·x + sz·z`
    struct Slope {
        base: f32,
        sx: f32,
        sz: f32,
    }

    impl HeightSampler for Slope {
        fn sample(&self, x: f32, z: f32) -> f32 {
            self.base + self.sx * x + self.sz * z
        }
    }

    fn chassis() -> Chassis {
        Chassis {
            wheel_base: 2.25,
            width: 1.5,
            front_axle_x: 1.25,
            rear_axle_x: -1.0,
            track: 1.9,
            front_wheel_radius: 0.7,
            rear_wheel_radius: 1.0,
        }
    }

    #[test]
    fn test_flat_ground_is_level() {
        let state = VehicleState::at(Vec3::new(4.0, 10.0, -3.0), 0.8);
        let pose = fit_terrain(&state, &chassis(), &FlatGround { height: 1.5 });
        assert!((pose.height - 1.5).abs() < 1e-5);
        assert!(pose.pitch.abs() < 1e-5);
        assert!(pose.roll.abs() < 1e-5);
    }

    #[test]
    fn test_slope_along_heading_gives_pitch() {
        let ground = Slope { base: 0.5, sx: 0.2, sz: 0.0 };
        let state = VehicleState::at(Vec3::new(2.0, 0.0, 0.0), 0.0);
        let pose = fit_terrain(&state, &chassis(), &ground);

        assert!((pose.height - 0.9).abs() < 1e-4, "height {}", pose.height);
        assert!((pose.pitch - 0.2f32.atan()).abs() < 1e-4);
        assert!(pose.roll.abs() < 1e-4);
    }

    #[test]
    fn test_slope_across_heading_gives_roll() {
        // Ground rises toward +Z, which is the vehicle's right side at heading 0
        let ground = Slope { base: 0.0, sx: 0.0, sz: 0.3 };
        let state = VehicleState::at(Vec3::ZERO, 0.0);
        let pose = fit_terrain(&state, &chassis(), &ground);

        assert!(pose.pitch.abs() < 1e-4);
        assert!((pose.roll - 0.3f32.atan()).abs() < 1e-4);
    }

    #[test]
    fn test_heading_rotates_slope_into_roll() {
        // Facing +Z, a slope rising toward +X is on the vehicle's left side
        let ground = Slope { base: 0.0, sx: 0.25, sz: 0.0 };
        let state = VehicleState::at(Vec3::ZERO, std::f32::consts::FRAC_PI_2);
        let pose = fit_terrain(&state, &chassis(), &ground);

        assert!(pose.pitch.abs() < 1e-4);
        assert!((pose.roll + 0.25f32.atan()).abs() < 1e-4);
    }

    #[test]
    fn test_apply_writes_state() {
        let mut state = VehicleState::default();
        let pose = TerrainPose { height: 2.0, pitch: 0.1, roll: -0.2 };
        pose.apply(&mut state);
        assert_eq!(state.position.y, 2.0);
        assert_eq!(state.pitch, 0.1);
        assert_eq!(state.roll, -0.2);
    }

    #[test]
    fn test_degenerate_layout_uses_mean() {
        let (a, b, c) = fit_plane(&[(0.0, 0.0, 1.0), (0.0, 0.0, 3.0)]);
        assert_eq!((a, b, c), (2.0, 0.0, 0.0));
    }
}
