//! Fixed-size vector and matrix helpers
use nalgebra::{Matrix3, Vector2, Vector3};

use crate::error::RenderError;

/// World- or camera-space point.
pub type Vec3 = Vector3<f64>;
/// Screen-space or normalized-device point.
pub type Vec2 = Vector2<f64>;
/// Row-major 3x3 matrix; camera orientations keep their basis in the columns.
pub type Mat3 = Matrix3<f64>;

/// Builds a [`Vec3`] from untyped data, checking its arity.
pub fn vec3_from_slice(values: &[f64]) -> Result<Vec3, RenderError> {
    match *values {
        [x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(RenderError::InvalidDimension {
            expected: 3,
            found: values.len(),
        }),
    }
}

/// Builds a [`Mat3`] from three rows of three values each.
pub fn mat3_from_rows(rows: &[&[f64]]) -> Result<Mat3, RenderError> {
    if rows.len() != 3 {
        return Err(RenderError::InvalidDimension {
            expected: 3,
            found: rows.len(),
        });
    }

    let mut matrix = Mat3::zeros();
    for (i, row) in rows.iter().enumerate() {
        let row = vec3_from_slice(row)?;
        matrix.set_row(i, &row.transpose());
    }
    Ok(matrix)
}

pub fn transpose(matrix: &Mat3) -> Mat3 {
    matrix.transpose()
}

pub fn vector_subtract(v1: &Vec3, v2: &Vec3) -> Vec3 {
    v1 - v2
}

pub fn multiply_matrices(m1: &Mat3, m2: &Mat3) -> Mat3 {
    m1 * m2
}

pub fn multiply_mat_vec(matrix: &Mat3, vector: &Vec3) -> Vec3 {
    matrix * vector
}

/// Clockwise rotation of `delta` degrees about the Y axis.
pub fn yaw_rotation_matrix(delta: f64) -> Mat3 {
    let (sin, cos) = delta.to_radians().sin_cos();
    Mat3::new(
        cos, 0.0, -sin, //
        0.0, 1.0, 0.0, //
        sin, 0.0, cos,
    )
}

/// Clockwise rotation of `delta` degrees about the X axis.
pub fn pitch_rotation_matrix(delta: f64) -> Mat3 {
    let (sin, cos) = delta.to_radians().sin_cos();
    Mat3::new(
        1.0, 0.0, 0.0, //
        0.0, cos, -sin, //
        0.0, sin, cos,
    )
}
