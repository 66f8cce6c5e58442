//! Steering policies and the turning-rate approximation

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Steering angles below this magnitude are treated as centred
const CENTERED_EPSILON: f32 = 1e-4;

/// How the front-wheel angle follows the steering keys
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SteeringPolicy {
    /// The wheels jump straight to the target angle
    Snap,
    /// The wheels turn toward the target at a bounded rate and return to
    /// centre by exponential decay once the keys are released
    RateLimited {
        /// Maximum steering speed while a key is held (rad/s)
        rate: f32,
        /// Time for the angle to halve after release (seconds)
        return_half_life: f32,
    },
}

impl Default for SteeringPolicy {
    fn default() -> Self {
        SteeringPolicy::RateLimited {
            rate: 90f32.to_radians(),
            return_half_life: 0.15,
        }
    }
}

impl SteeringPolicy {
    /// Advance the steering angle by one frame
    ///
    /// # Arguments
    /// * `current` - Steering angle at the start of the frame (rad)
    /// * `steer` - Steering sign from input: +1 left, -1 right, 0 released
    /// * `max_angle` - Maximum steering angle (rad); the sign is ignored
    /// * `dt` - Frame time in seconds
    ///
    /// The result is always within `±|max_angle|`.
    pub fn step(&self, current: f32, steer: f32, max_angle: f32, dt: f32) -> f32 {
        let max_angle = max_angle.abs();
        let target = steer * max_angle;

        let next = match *self {
            SteeringPolicy::Snap => target,
            SteeringPolicy::RateLimited { rate, return_half_life } => {
                if steer != 0.0 {
                    let max_step = rate * dt;
                    current + (target - current).clamp(-max_step, max_step)
                } else if return_half_life > 0.0 {
                    // factor = 2^(-dt / half_life), so smaller half_life = faster return
                    let decayed = current * 2.0f32.powf(-dt / return_half_life);
                    if decayed.abs() < CENTERED_EPSILON {
                        0.0
                    } else {
                        decayed
                    }
                } else {
                    0.0
                }
            }
        };

        next.clamp(-max_angle, max_angle)
    }
}

/// Approximate how far the vehicle turns per meter travelled, in degrees.
///
/// Uses the turning radius `wheel_base / tan(steering_angle)` and its inner
/// radius (`radius - width`); one full circle of the inner radius is 360°.
/// Returns 0 for a centred wheel. If the inner radius would not be positive
/// the outer radius is used instead.
pub fn turning_angle_per_meter(wheel_base: f32, steering_angle: f32, width: f32) -> f32 {
    let tan = steering_angle.abs().tan();
    if tan < f32::EPSILON {
        return 0.0;
    }

    let turning_radius = wheel_base / tan;
    let inner_radius = turning_radius - width;
    let radius = if inner_radius > 0.0 { inner_radius } else { turning_radius };

    360.0 / (2.0 * radius * PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: f32 = 0.5;

    #[test]
    fn test_snap_jumps_to_target() {
        let policy = SteeringPolicy::Snap;
        assert_eq!(policy.step(0.0, 1.0, MAX, 0.016), MAX);
        assert_eq!(policy.step(MAX, -1.0, MAX, 0.016), -MAX);
        assert_eq!(policy.step(MAX, 0.0, MAX, 0.016), 0.0);
    }

    #[test]
    fn test_rate_limited_moves_at_bounded_speed() {
        let policy = SteeringPolicy::RateLimited { rate: 1.0, return_half_life: 0.1 };
        let next = policy.step(0.0, 1.0, MAX, 0.1);
        assert!((next - 0.1).abs() < 1e-6);

        // Never overshoots the target
        let next = policy.step(0.45, 1.0, MAX, 0.5);
        assert!((next - MAX).abs() < 1e-6);
        assert!(next <= MAX);
    }

    #[test]
    fn test_rate_limited_returns_to_centre() {
        let policy = SteeringPolicy::RateLimited { rate: 1.0, return_half_life: 0.1 };
        let mut angle = MAX;
        let mut previous = angle;
        for _ in 0..20 {
            angle = policy.step(angle, 0.0, MAX, 0.05);
            assert!(angle.abs() <= previous.abs());
            previous = angle;
        }
        assert!(angle.abs() < 0.01);

        // One half-life halves the angle
        let half = policy.step(0.4, 0.0, MAX, 0.1);
        assert!((half - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_rate_limited_snaps_tiny_angles_to_zero() {
        let policy = SteeringPolicy::RateLimited { rate: 1.0, return_half_life: 0.1 };
        assert_eq!(policy.step(5e-5, 0.0, MAX, 0.016), 0.0);
    }

    #[test]
    fn test_negative_max_angle_uses_magnitude() {
        let policy = SteeringPolicy::default();
        assert_eq!(policy.step(0.0, 0.0, -MAX, 0.016), 0.0);
        assert_eq!(SteeringPolicy::Snap.step(0.0, 1.0, -MAX, 0.016), MAX);
        let next = policy.step(0.0, -1.0, -MAX, 10.0);
        assert_eq!(next, -MAX);
    }

    #[test]
    fn test_result_clamped() {
        let policy = SteeringPolicy::RateLimited { rate: 100.0, return_half_life: 0.1 };
        assert_eq!(policy.step(2.0, 1.0, MAX, 1.0), MAX);
        assert_eq!(policy.step(-2.0, 0.0, MAX, 0.0), -MAX);
    }

    #[test]
    fn test_turning_angle_zero_for_straight_wheels() {
        assert_eq!(turning_angle_per_meter(2.25, 0.0, 1.5), 0.0);
    }

    #[test]
    fn test_turning_angle_matches_inner_circle() {
        let angle = 30f32.to_radians();
        let radius = 2.25 / angle.tan() - 1.5;
        let expected = 360.0 / (2.0 * PI * radius);
        let actual = turning_angle_per_meter(2.25, angle, 1.5);
        assert!((actual - expected).abs() < 1e-4);
        // Sharper steering turns faster
        assert!(turning_angle_per_meter(2.25, 35f32.to_radians(), 1.5) > actual);
    }

    #[test]
    fn test_turning_angle_falls_back_to_outer_radius() {
        // Very wide vehicle: inner radius would be negative
        let angle = 60f32.to_radians();
        let radius = 2.0 / angle.tan();
        let expected = 360.0 / (2.0 * PI * radius);
        assert!((turning_angle_per_meter(2.0, angle, 10.0) - expected).abs() < 1e-4);
    }
}
