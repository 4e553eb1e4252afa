use crate::error::ColmapError;
use crate::models::{CameraModel, CameraModelId};

/// Represents a camera in the Colmap system.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera id
    pub camera_id: u32,
    /// Camera model id
    pub model_id: CameraModelId,
    /// Image width
    pub width: u64,
    /// Image height
    pub height: u64,
    /// Camera parameters, as many as the model requires
    pub params: Vec<f64>,
}

impl Camera {
    /// Create a camera, checking it with [`Camera::validate`].
    ///
    /// # Arguments
    ///
    /// * `camera_id` - The camera id.
    /// * `model_id` - The camera model.
    /// * `width` - The image width in pixels.
    /// * `height` - The image height in pixels.
    /// * `params` - The intrinsic parameters in model order.
    pub fn new(
        camera_id: u32,
        model_id: CameraModelId,
        width: u64,
        height: u64,
        params: Vec<f64>,
    ) -> Result<Self, ColmapError> {
        let camera = Self {
            camera_id,
            model_id,
            width,
            height,
            params,
        };
        camera.validate()?;
        Ok(camera)
    }

    /// Create a pinhole camera from focal lengths and principal point.
    ///
    /// The id and the dimensions are not checked here; the writers call
    /// [`Camera::validate`] before encoding.
    pub fn pinhole(
        camera_id: u32,
        width: u64,
        height: u64,
        fx: f64,
        fy: f64,
        cx: f64,
        cy: f64,
    ) -> Self {
        Self {
            camera_id,
            model_id: CameraModelId::Pinhole,
            width,
            height,
            params: vec![fx, fy, cx, cy],
        }
    }

    /// The catalog entry of the camera model.
    pub fn model(&self) -> &'static CameraModel {
        self.model_id.model()
    }

    /// Check that the camera can be stored in a COLMAP model file.
    ///
    /// The id must be in `1..=i32::MAX`, width and height must be positive and the
    /// parameter count must match the model.
    pub fn validate(&self) -> Result<(), ColmapError> {
        if self.camera_id == 0 || i32::try_from(self.camera_id).is_err() {
            return Err(ColmapError::InvalidId {
                what: "camera id",
                id: self.camera_id,
            });
        }

        if self.width == 0 || self.height == 0 {
            return Err(ColmapError::InvalidImageSize {
                width: self.width,
                height: self.height,
            });
        }

        let model = self.model();
        if self.params.len() != model.num_params {
            return Err(ColmapError::InvalidNumCameraParams {
                model: model.model_name,
                expected: model.num_params,
                actual: self.params.len(),
            });
        }

        Ok(())
    }
}
