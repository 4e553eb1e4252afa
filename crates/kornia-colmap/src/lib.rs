#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia COLMAP
//!
//! Conversion of scene calibration data into COLMAP sparse models.
//!
//! ## Example: intrinsics and poses
//!
//! ```rust
//! use kornia_colmap::{decompose, matrix_from_string, CameraIntrinsics};
//!
//! let json = r#"{"camera": {"w": 640, "h": 480, "fx": 500.0, "fy": 500.0,
//!                           "cx": 320.0, "cy": 240.0, "scale": 6553.5}}"#;
//! let camera = CameraIntrinsics::from_json_str(json)?.to_camera();
//! assert_eq!(camera.params, vec![500.0, 500.0, 320.0, 240.0]);
//!
//! let mat = matrix_from_string("1 0 0 1 0 1 0 2 0 0 1 3 0 0 0 1")?;
//! let pose = decompose(&mat)?;
//! assert_eq!(pose.quaternion, [0.0, 0.0, 0.0, 1.0]);
//! assert_eq!(pose.translation, [1.0, 2.0, 3.0]);
//! # Ok::<(), kornia_colmap::ColmapError>(())
//! ```

/// Binary model files (`cameras.bin`, `images.bin`, `points3D.bin`).
pub mod binary;

/// The camera record.
pub mod camera;

/// Error types.
pub mod error;

/// Replica scene export.
pub mod export;

/// Camera intrinsics from JSON.
pub mod intrinsics;

/// Homogeneous matrices and their decomposition.
pub mod matrix;

/// The fixed catalog of camera models.
pub mod models;

/// Quaternion conversions.
pub mod quaternion;

/// Scene folder plumbing.
pub mod scene;

/// Text model files (`cameras.txt`, `images.txt`).
pub mod text;

/// Pose trajectory files.
pub mod trajectory;

pub use binary::{read_cameras_bin, write_cameras_bin};
pub use camera::Camera;
pub use error::ColmapError;
pub use intrinsics::{convert_intrinsics, write_intrinsics_bin, CameraIntrinsics};
pub use matrix::{
    decompose, decompose_with, matrix_from_string, DecomposeOptions, Matrix, RigidPose,
};
pub use models::{lookup_by_id, lookup_by_name, CameraModel, CameraModelId, CAMERA_MODELS};
pub use trajectory::{read_pose_lines, read_trajectory};
