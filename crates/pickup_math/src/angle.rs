//! Angle helpers

use std::f32::consts::TAU;

/// Wrap an angle into the open interval `(-2π, 2π)`, keeping its sign.
///
/// Used for wheel spin so the accumulated angle never loses precision.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle % TAU
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_keeps_small_angles() {
        assert_eq!(wrap_angle(1.0), 1.0);
        assert_eq!(wrap_angle(-1.0), -1.0);
    }

    #[test]
    fn test_wrap_large_angles() {
        let wrapped = wrap_angle(3.0 * TAU + 0.5);
        assert!((wrapped - 0.5).abs() < 0.001);

        let wrapped = wrap_angle(-3.0 * TAU - 0.5);
        assert!((wrapped + 0.5).abs() < 0.001);
        assert!(wrapped.abs() < TAU);
    }
}
