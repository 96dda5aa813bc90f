/// Vector and matrix helpers for 3-component math
use nalgebra::{Matrix3, Vector3};

use crate::error::InvalidAxis;

/// Principal axis for an elementary rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl TryFrom<char> for Axis {
    type Error = InvalidAxis;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'x' => Ok(Axis::X),
            'y' => Ok(Axis::Y),
            'z' => Ok(Axis::Z),
            other => Err(InvalidAxis(other)),
        }
    }
}

/// Cross product `a × b` (right-hand rule)
pub fn cross(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    Vector3::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
    )
}

/// Product `m * v` of a row-major 3x3 matrix and a column vector
pub fn mat_vec(m: &Matrix3<f32>, v: &Vector3<f32>) -> Vector3<f32> {
    Vector3::new(
        m[(0, 0)] * v.x + m[(0, 1)] * v.y + m[(0, 2)] * v.z,
        m[(1, 0)] * v.x + m[(1, 1)] * v.y + m[(1, 2)] * v.z,
        m[(2, 0)] * v.x + m[(2, 1)] * v.y + m[(2, 2)] * v.z,
    )
}

pub fn dot(a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

pub fn scale(v: &Vector3<f32>, s: f32) -> Vector3<f32> {
    Vector3::new(v.x * s, v.y * s, v.z * s)
}

/// Rotation of `angle` radians about a single axis
#[rustfmt::skip]
pub fn rotation_matrix(axis: Axis, angle: f32) -> Matrix3<f32> {
    let (s, c) = angle.sin_cos();
    match axis {
        Axis::X => Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, c, -s,
            0.0, s, c,
        ),
        Axis::Y => Matrix3::new(
            c, 0.0, s,
            0.0, 1.0, 0.0,
            -s, 0.0, c,
        ),
        Axis::Z => Matrix3::new(
            c, -s, 0.0,
            s, c, 0.0,
            0.0, 0.0, 1.0,
        ),
    }
}

/// Same as [`rotation_matrix`], with the axis given as `'x'`, `'y'` or `'z'`
pub fn rotation_matrix_for(axis: char, angle: f32) -> Result<Matrix3<f32>, InvalidAxis> {
    Ok(rotation_matrix(Axis::try_from(axis)?, angle))
}
