use glam::{DMat3, DQuat, DVec3};

use crate::error::ColmapError;
use crate::quaternion::{mat3_from_rows, mat3_to_rows, rotation_matrix_to_quaternion};

/// A dense row-major matrix of `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a matrix from its shape and row-major data.
    ///
    /// # Arguments
    ///
    /// * `rows` - The number of rows.
    /// * `cols` - The number of columns.
    /// * `data` - The values in row-major order, `rows * cols` of them.
    pub fn from_shape_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, ColmapError> {
        if data.len() != rows * cols {
            return Err(ColmapError::InvalidDataLength {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            rows: n,
            cols: n,
            data,
        }
    }

    /// The shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The value at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// The row-major data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl From<[[f64; 4]; 4]> for Matrix {
    fn from(rows: [[f64; 4]; 4]) -> Self {
        Self {
            rows: 4,
            cols: 4,
            data: rows.concat(),
        }
    }
}

/// Parse a 4x4 matrix from a line of 16 whitespace separated numbers in row-major order.
///
/// # Arguments
///
/// * `s` - The text to parse.
///
/// # Returns
///
/// The 4x4 matrix, or [`ColmapError::MalformedMatrix`] carrying the actual token count.
///
/// Example:
///
/// ```
/// use kornia_colmap::matrix::matrix_from_string;
///
/// let mat = matrix_from_string("1 0 0 1  0 1 0 2  0 0 1 3  0 0 0 1").unwrap();
/// assert_eq!(mat.shape(), (4, 4));
/// assert_eq!(mat.get(1, 3), Some(2.0));
/// ```
pub fn matrix_from_string(s: &str) -> Result<Matrix, ColmapError> {
    let tokens = s.split_whitespace().collect::<Vec<_>>();
    if tokens.len() != 16 {
        return Err(ColmapError::MalformedMatrix(tokens.len()));
    }

    let data = tokens
        .iter()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| ColmapError::InvalidNumber(token.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Matrix::from_shape_vec(4, 4, data)
}

/// A rigid transform split into a unit quaternion and a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidPose {
    /// Rotation as `[x, y, z, w]`
    pub quaternion: [f64; 4],
    /// Translation as `[x, y, z]`
    pub translation: [f64; 3],
}

impl RigidPose {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            quaternion: [0.0, 0.0, 0.0, 1.0],
            translation: [0.0; 3],
        }
    }

    /// The rotation as a 3x3 matrix.
    pub fn rotation_matrix(&self) -> [[f64; 3]; 3] {
        mat3_to_rows(&DMat3::from_quat(self.rotation()))
    }

    /// The inverse transform, e.g. camera-to-world into world-to-camera.
    pub fn inverse(&self) -> Self {
        let inv_rot = self.rotation().inverse();
        let inv_trans = -(inv_rot * DVec3::from_array(self.translation));
        Self {
            quaternion: inv_rot.to_array(),
            translation: inv_trans.to_array(),
        }
    }

    fn rotation(&self) -> DQuat {
        DQuat::from_array(self.quaternion)
    }
}

/// Options for [`decompose_with`].
#[derive(Debug, Clone)]
pub struct DecomposeOptions {
    /// Reject rotation blocks that are not orthonormal with determinant +1.
    pub validate_rotation: bool,
    /// Absolute tolerance of the rotation check.
    pub tolerance: f64,
}

impl Default for DecomposeOptions {
    fn default() -> Self {
        Self {
            validate_rotation: false,
            tolerance: 1e-6,
        }
    }
}

/// Decompose a 4x4 homogeneous transform into a quaternion and a translation.
///
/// The rotation block is not validated. Use [`decompose_with`] to opt into the check.
///
/// # Arguments
///
/// * `mat` - The 4x4 transform.
///
/// # Returns
///
/// The pose, or [`ColmapError::ShapeError`] if the matrix is not 4x4.
pub fn decompose(mat: &Matrix) -> Result<RigidPose, ColmapError> {
    decompose_with(mat, &DecomposeOptions::default())
}

/// Decompose a 4x4 homogeneous transform with explicit options.
pub fn decompose_with(
    mat: &Matrix,
    options: &DecomposeOptions,
) -> Result<RigidPose, ColmapError> {
    if mat.shape() != (4, 4) {
        return Err(ColmapError::ShapeError {
            rows: mat.rows,
            cols: mat.cols,
        });
    }

    let at = |r: usize, c: usize| mat.data[r * 4 + c];

    let mut rot = [[0.0; 3]; 3];
    for (r, row) in rot.iter_mut().enumerate() {
        for (c, v) in row.iter_mut().enumerate() {
            *v = at(r, c);
        }
    }
    let translation = [at(0, 3), at(1, 3), at(2, 3)];

    if options.validate_rotation {
        check_rotation(&rot, options.tolerance)?;
    }

    Ok(RigidPose {
        quaternion: rotation_matrix_to_quaternion(&rot),
        translation,
    })
}

fn check_rotation(rot: &[[f64; 3]; 3], tolerance: f64) -> Result<(), ColmapError> {
    let rot = mat3_from_rows(rot);

    let gram = rot.transpose() * rot;
    if !gram.abs_diff_eq(DMat3::IDENTITY, tolerance) {
        return Err(ColmapError::NotARotation(format!(
            "R^T R is not the identity: {gram}"
        )));
    }

    let det = rot.determinant();
    if (det - 1.0).abs() > tolerance {
        return Err(ColmapError::NotARotation(format!("determinant is {det}")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_matrix_from_string() -> Result<(), ColmapError> {
        let line = "1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16";
        let mat = matrix_from_string(line)?;
        assert_eq!(mat.shape(), (4, 4));
        assert_eq!(mat.get(0, 0), Some(1.0));
        assert_eq!(mat.get(0, 3), Some(4.0));
        assert_eq!(mat.get(3, 0), Some(13.0));
        assert_eq!(mat.get(3, 3), Some(16.0));
        assert_eq!(mat.get(4, 0), None);
        Ok(())
    }

    #[test]
    fn test_matrix_from_string_arbitrary_whitespace() -> Result<(), ColmapError> {
        let line = "  1.0\t0 0 0\n0 1.0 0 0   0 0 1.0 0 0 0 0 1.0e0 \r\n";
        assert_eq!(matrix_from_string(line)?, Matrix::identity(4));
        Ok(())
    }

    #[test]
    fn test_matrix_from_string_wrong_count() {
        let fifteen = vec!["1"; 15].join(" ");
        let seventeen = vec!["1"; 17].join(" ");
        assert!(matches!(
            matrix_from_string(&fifteen),
            Err(ColmapError::MalformedMatrix(15))
        ));
        assert!(matches!(
            matrix_from_string(&seventeen),
            Err(ColmapError::MalformedMatrix(17))
        ));
        assert!(matches!(
            matrix_from_string(""),
            Err(ColmapError::MalformedMatrix(0))
        ));
    }

    #[test]
    fn test_matrix_from_string_bad_token() {
        let line = "1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 one";
        assert!(matches!(
            matrix_from_string(line),
            Err(ColmapError::InvalidNumber(ref token)) if token == "one"
        ));
    }

    #[test]
    fn test_decompose_identity() -> Result<(), ColmapError> {
        let pose = decompose(&Matrix::identity(4))?;
        for (v, e) in pose.quaternion.iter().zip([0.0, 0.0, 0.0, 1.0]) {
            assert_relative_eq!(*v, e);
        }
        assert_eq!(pose.translation, [0.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_decompose_rotation_z_with_translation() -> Result<(), ColmapError> {
        let mat = Matrix::from([
            [0.0, -1.0, 0.0, 1.0],
            [1.0, 0.0, 0.0, 2.0],
            [0.0, 0.0, 1.0, 3.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let pose = decompose(&mat)?;
        let expected = [0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2];
        for (v, e) in pose.quaternion.iter().zip(expected) {
            assert_relative_eq!(*v, e, epsilon = 1e-12);
        }
        assert_eq!(pose.translation, [1.0, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_decompose_shape_error() -> Result<(), ColmapError> {
        let mat = Matrix::from_shape_vec(3, 4, vec![0.0; 12])?;
        assert!(matches!(
            decompose(&mat),
            Err(ColmapError::ShapeError { rows: 3, cols: 4 })
        ));
        assert!(matches!(
            decompose(&Matrix::identity(3)),
            Err(ColmapError::ShapeError { rows: 3, cols: 3 })
        ));
        Ok(())
    }

    #[test]
    fn test_from_shape_vec_length_mismatch() {
        assert!(matches!(
            Matrix::from_shape_vec(4, 4, vec![0.0; 15]),
            Err(ColmapError::InvalidDataLength {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_decompose_tolerates_scaled_rotation() -> Result<(), ColmapError> {
        let mat = Matrix::from([
            [2.0, 0.0, 0.0, 0.0],
            [0.0, 2.0, 0.0, 0.0],
            [0.0, 0.0, 2.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        // accepted by default
        let pose = decompose(&mat)?;
        assert_relative_eq!(pose.quaternion[3], 1.0, epsilon = 1e-12);

        let options = DecomposeOptions {
            validate_rotation: true,
            ..Default::default()
        };
        assert!(matches!(
            decompose_with(&mat, &options),
            Err(ColmapError::NotARotation(_))
        ));
        Ok(())
    }

    #[test]
    fn test_validation_rejects_reflection() {
        let mat = Matrix::from([
            [-1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let options = DecomposeOptions {
            validate_rotation: true,
            ..Default::default()
        };
        assert!(matches!(
            decompose_with(&mat, &options),
            Err(ColmapError::NotARotation(_))
        ));
    }

    #[test]
    fn test_inverse() -> Result<(), ColmapError> {
        let mat = Matrix::from([
            [0.0, -1.0, 0.0, 1.0],
            [1.0, 0.0, 0.0, 2.0],
            [0.0, 0.0, 1.0, 3.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let pose = decompose(&mat)?;
        let inv = pose.inverse();

        // R^T = rotation of -90 degrees about z, -R^T t = (-2, 1, -3)
        let expected_t = [-2.0, 1.0, -3.0];
        for (v, e) in inv.translation.iter().zip(expected_t) {
            assert_relative_eq!(*v, e, epsilon = 1e-12);
        }
        let expected_q = [0.0, 0.0, -FRAC_1_SQRT_2, FRAC_1_SQRT_2];
        for (v, e) in inv.quaternion.iter().zip(expected_q) {
            assert_relative_eq!(*v, e, epsilon = 1e-12);
        }

        let back = inv.inverse();
        for (v, e) in back.translation.iter().zip(pose.translation) {
            assert_relative_eq!(*v, e, epsilon = 1e-12);
        }
        assert_eq!(RigidPose::identity().inverse().translation, [0.0; 3]);
        Ok(())
    }
}
