//! Rotation matrix to quaternion conversion.
//!
//! Quaternions are stored scalar-last as `[x, y, z, w]`.

use glam::{DMat3, DQuat};

/// Convert a 3x3 rotation matrix into a unit quaternion `[x, y, z, w]`.
///
/// The conversion branches on the dominant quaternion component so the divisor never
/// approaches zero. The input is assumed to be a proper rotation; no orthonormality
/// check is performed, only the resulting quaternion is normalized.
///
/// # Arguments
///
/// * `rot` - The rotation matrix in row-major order.
///
/// # Returns
///
/// The quaternion as `[x, y, z, w]`.
///
/// Example:
///
/// ```
/// use kornia_colmap::quaternion::rotation_matrix_to_quaternion;
///
/// let q = rotation_matrix_to_quaternion(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
/// assert_eq!(q, [0.0, 0.0, 0.0, 1.0]);
/// ```
pub fn rotation_matrix_to_quaternion(rot: &[[f64; 3]; 3]) -> [f64; 4] {
    DQuat::from_mat3(&mat3_from_rows(rot)).normalize().to_array()
}

/// Build a glam matrix from row-major rows.
pub(crate) fn mat3_from_rows(rows: &[[f64; 3]; 3]) -> DMat3 {
    // glam is column-major
    DMat3::from_cols_array_2d(rows).transpose()
}

/// The row-major rows of a glam matrix.
pub(crate) fn mat3_to_rows(mat: &DMat3) -> [[f64; 3]; 3] {
    mat.transpose().to_cols_array_2d()
}

/// Reorder a scalar-last quaternion `[x, y, z, w]` into scalar-first `[w, x, y, z]`.
///
/// COLMAP model files store quaternions scalar-first.
pub fn xyzw_to_wxyz(q: &[f64; 4]) -> [f64; 4] {
    [q[3], q[0], q[1], q[2]]
}

/// Reorder a scalar-first quaternion `[w, x, y, z]` into scalar-last `[x, y, z, w]`.
pub fn wxyz_to_xyzw(q: &[f64; 4]) -> [f64; 4] {
    [q[1], q[2], q[3], q[0]]
}
