use crate::error::ColmapError;

/// Represents a Colmap camera model id.
///
/// The discriminants follow the COLMAP numbering and are written verbatim into
/// `cameras.bin`, so they must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CameraModelId {
    /// Simple pinhole camera model
    SimplePinhole = 0,
    /// Pinhole camera model
    Pinhole = 1,
    /// Simplified radial camera model
    SimpleRadial = 2,
    /// Radial camera model
    Radial = 3,
    /// OpenCV camera model
    OpenCV = 4,
    /// OpenCV fisheye camera model
    OpenCVFisheye = 5,
    /// Full OpenCV camera model
    FullOpenCV = 6,
    /// Field of view camera model
    Fov = 7,
    /// Simple radial fisheye camera model
    SimpleRadialFisheye = 8,
    /// Radial fisheye camera model
    RadialFisheye = 9,
    /// Thin prism fisheye camera model
    ThinPrismFisheye = 10,
}

impl CameraModelId {
    /// The numeric id stored on disk.
    pub fn id(self) -> i32 {
        self as i32
    }

    /// The catalog entry of this model.
    pub fn model(self) -> &'static CameraModel {
        // the table is indexed by id
        &CAMERA_MODELS[self as usize]
    }
}

impl TryFrom<i32> for CameraModelId {
    type Error = ColmapError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        lookup_by_id(id).map(|model| model.model_id)
    }
}

/// A camera model of the catalog: id, name and number of intrinsic parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraModel {
    /// Camera model id
    pub model_id: CameraModelId,
    /// Camera model name as used in the COLMAP text files
    pub model_name: &'static str,
    /// Number of intrinsic parameters
    pub num_params: usize,
}

const fn entry(
    model_id: CameraModelId,
    model_name: &'static str,
    num_params: usize,
) -> CameraModel {
    CameraModel {
        model_id,
        model_name,
        num_params,
    }
}

/// The fixed catalog of camera models, ordered by id.
pub static CAMERA_MODELS: [CameraModel; 11] = [
    entry(CameraModelId::SimplePinhole, "SIMPLE_PINHOLE", 3),
    entry(CameraModelId::Pinhole, "PINHOLE", 4),
    entry(CameraModelId::SimpleRadial, "SIMPLE_RADIAL", 4),
    entry(CameraModelId::Radial, "RADIAL", 5),
    entry(CameraModelId::OpenCV, "OPENCV", 8),
    entry(CameraModelId::OpenCVFisheye, "OPENCV_FISHEYE", 8),
    entry(CameraModelId::FullOpenCV, "FULL_OPENCV", 12),
    entry(CameraModelId::Fov, "FOV", 5),
    entry(CameraModelId::SimpleRadialFisheye, "SIMPLE_RADIAL_FISHEYE", 4),
    entry(CameraModelId::RadialFisheye, "RADIAL_FISHEYE", 5),
    entry(CameraModelId::ThinPrismFisheye, "THIN_PRISM_FISHEYE", 12),
];

/// Look up a camera model by its numeric id.
///
/// # Arguments
///
/// * `id` - The COLMAP model id.
///
/// # Returns
///
/// The catalog entry, or [`ColmapError::UnknownModelId`] if the id is not in the catalog.
pub fn lookup_by_id(id: i32) -> Result<&'static CameraModel, ColmapError> {
    CAMERA_MODELS
        .iter()
        .find(|model| model.model_id.id() == id)
        .ok_or(ColmapError::UnknownModelId(id))
}

/// Look up a camera model by its name, e.g. `"PINHOLE"`.
///
/// # Arguments
///
/// * `name` - The COLMAP model name.
///
/// # Returns
///
/// The catalog entry, or [`ColmapError::UnknownModelName`] if the name is not in the catalog.
pub fn lookup_by_name(name: &str) -> Result<&'static CameraModel, ColmapError> {
    CAMERA_MODELS
        .iter()
        .find(|model| model.model_name == name)
        .ok_or_else(|| ColmapError::UnknownModelName(name.to_string()))
}
