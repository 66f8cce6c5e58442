//! 4x4 Matrix utilities for 3D affine transformations
//!
//! Matrices are column-major (`m[col][row]`), matching the WGSL `mat4x4<f32>`
//! memory layout, so they can be copied into uniform buffers unchanged.
//!
//! Composition follows the usual convention: `mul(a, b)` applies `b` first,
//! then `a`. A part placed with `translation * rotation * scale` is therefore
//! scaled first and translated last.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Create a rotation matrix in the plane spanned by two axes.
///
/// Rotates axis `p1` toward axis `p2` by `angle` radians
/// (0 = X, 1 = Y, 2 = Z).
///
/// # Example
/// ```
/// use pickup_math::mat4::{plane_rotation, rotation_z};
/// assert_eq!(plane_rotation(0.5, 0, 1), rotation_z(0.5));
/// ```
pub fn plane_rotation(angle: f32, p1: usize, p2: usize) -> Mat4 {
    let cs = angle.cos();
    let sn = angle.sin();

    let mut m = IDENTITY;

    m[p1][p1] = cs;
    m[p2][p2] = cs;
    m[p1][p2] = sn;
    m[p2][p1] = -sn;

    m
}

/// Right-handed rotation about the X axis (Y toward Z)
pub fn rotation_x(angle: f32) -> Mat4 {
    plane_rotation(angle, 1, 2)
}

/// Right-handed rotation about the Y axis (Z toward X)
pub fn rotation_y(angle: f32) -> Mat4 {
    plane_rotation(angle, 2, 0)
}

/// Right-handed rotation about the Z axis (X toward Y)
pub fn rotation_z(angle: f32) -> Mat4 {
    plane_rotation(angle, 0, 1)
}

/// Translation matrix
pub fn translation(offset: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = offset.x;
    m[3][1] = offset.y;
    m[3][2] = offset.z;
    m
}

/// Non-uniform scale matrix
pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = x;
    m[1][1] = y;
    m[2][2] = z;
    m
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Multiply a chain of matrices left to right: `chain(&[a, b, c]) == a * b * c`
pub fn chain(matrices: &[Mat4]) -> Mat4 {
    matrices.iter().fold(IDENTITY, |acc, m| mul(acc, *m))
}

/// Transform a point (w = 1)
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Transform a direction (w = 0, translation ignored)
pub fn transform_direction(m: Mat4, d: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * d.x + m[1][0] * d.y + m[2][0] * d.z,
        m[0][1] * d.x + m[1][1] * d.y + m[2][1] * d.z,
        m[0][2] * d.x + m[1][2] * d.y + m[2][2] * d.z,
    )
}

/// Get the xyz part of a column
pub fn get_column(m: Mat4, col: usize) -> Vec3 {
    Vec3::new(m[col][0], m[col][1], m[col][2])
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if (a[i][j] - b[i][j]).abs() > EPSILON {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(transform_point(IDENTITY, v), v));
    }

    #[test]
    fn test_rotation_axes() {
        // X: Y -> Z
        let r = transform_direction(rotation_x(FRAC_PI_2), Vec3::Y);
        assert!(vec_approx_eq(r, Vec3::Z), "got {:?}", r);

        // Y: X -> -Z
        let r = transform_direction(rotation_y(FRAC_PI_2), Vec3::X);
        assert!(vec_approx_eq(r, -Vec3::Z), "got {:?}", r);

        // Z: X -> Y
        let r = transform_direction(rotation_z(FRAC_PI_2), Vec3::X);
        assert!(vec_approx_eq(r, Vec3::Y), "got {:?}", r);
    }

    #[test]
    fn test_translation_ignored_for_directions() {
        let m = translation(Vec3::new(5.0, 0.0, 0.0));
        assert!(vec_approx_eq(transform_point(m, Vec3::ZERO), Vec3::new(5.0, 0.0, 0.0)));
        assert!(vec_approx_eq(transform_direction(m, Vec3::Y), Vec3::Y));
    }

    #[test]
    fn test_trs_order() {
        // Scale first, then rotate, then translate
        let m = chain(&[
            translation(Vec3::new(0.0, 2.0, 0.0)),
            rotation_z(FRAC_PI_2),
            scale(3.0, 1.0, 1.0),
        ]);
        let p = transform_point(m, Vec3::X);
        assert!(vec_approx_eq(p, Vec3::new(0.0, 5.0, 0.0)), "got {:?}", p);
    }

    #[test]
    fn test_mul_identity() {
        let a = plane_rotation(0.5, 0, 1);
        assert!(mat_approx_eq(mul(IDENTITY, a), a));
        assert!(mat_approx_eq(mul(a, IDENTITY), a));
    }

    #[test]
    fn test_mul_composition() {
        let r45 = rotation_y(FRAC_PI_2 / 2.0);
        let r90 = rotation_y(FRAC_PI_2);
        assert!(mat_approx_eq(mul(r45, r45), r90));
    }

    #[test]
    fn test_transpose_inverts_rotation() {
        let r = rotation_x(0.7);
        assert!(mat_approx_eq(mul(transpose(r), r), IDENTITY));
    }

    #[test]
    fn test_get_column() {
        let m = translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(get_column(m, 3), Vec3::new(1.0, 2.0, 3.0));
    }
}
