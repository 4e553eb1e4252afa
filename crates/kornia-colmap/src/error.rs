use std::path::PathBuf;

/// Error types for the COLMAP export module.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ColmapError {
    /// Error reading or writing file
    #[error("error reading or writing file. {0}")]
    Io(#[from] std::io::Error),

    /// Error decoding the intrinsics JSON document
    #[error("failed to decode json. {0}")]
    Json(#[from] serde_json::Error),

    /// The camera model id is not part of the catalog
    #[error("Unknown camera model id: {0}")]
    UnknownModelId(i32),

    /// The camera model name is not part of the catalog
    #[error("Unknown camera model name: {0}")]
    UnknownModelName(String),

    /// A required field is absent from the intrinsics JSON
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A field is present but does not hold the expected type
    #[error("Field {field} is not a valid {expected}")]
    InvalidFieldType {
        /// Name of the offending field
        field: &'static str,
        /// Expected JSON type
        expected: &'static str,
    },

    /// A pose line does not hold exactly 16 tokens
    #[error("Malformed matrix: expected 16 values, got {0}")]
    MalformedMatrix(usize),

    /// A token could not be parsed as a floating point number
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// The matrix passed to decomposition is not 4x4
    #[error("Expected a 4x4 matrix, got {rows}x{cols}")]
    ShapeError {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// The matrix data does not fill the requested shape
    #[error("Data length ({actual}) does not match the matrix size ({expected})")]
    InvalidDataLength {
        /// rows * cols
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// The rotation block failed the opt-in orthonormality check
    #[error("Rotation block is not a proper rotation: {0}")]
    NotARotation(String),

    /// Invalid number of camera parameters for the model
    #[error("Invalid number of camera parameters for {model}: expected {expected}, got {actual}")]
    InvalidNumCameraParams {
        /// Camera model name
        model: &'static str,
        /// Parameter count required by the model
        expected: usize,
        /// Parameter count supplied
        actual: usize,
    },

    /// An id does not fit the positive `i32` range of the model files
    #[error("Invalid {what}: {id}, expected 1..=2147483647")]
    InvalidId {
        /// Kind of id, e.g. `camera id`
        what: &'static str,
        /// The offending id
        id: u32,
    },

    /// Image dimensions must be positive
    #[error("Invalid image size {width}x{height}")]
    InvalidImageSize {
        /// Image width
        width: u64,
        /// Image height
        height: u64,
    },

    /// The number of extracted frames differs from the number of poses
    #[error("Found {frames} frames but {poses} poses")]
    FramePoseMismatch {
        /// Number of frames
        frames: usize,
        /// Number of poses
        poses: usize,
    },

    /// Parse error
    #[error("Parse error {0}")]
    ParseError(String),

    /// Downsampling factor must be at least one
    #[error("Invalid downsample factor: {0}")]
    InvalidDownsampleFactor(usize),

    /// A directory required by the scene layout is absent
    #[error("Directory does not exist: {0}")]
    MissingDirectory(PathBuf),
}
