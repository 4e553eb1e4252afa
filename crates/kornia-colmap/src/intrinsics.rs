//! Camera intrinsics from the Replica `cam_params.json` file.
//!
//! ```json
//! {
//!   "camera": {
//!     "w": 1200, "h": 680,
//!     "fx": 600.0, "fy": 600.0, "cx": 599.5, "cy": 339.5,
//!     "scale": 6553.5
//!   }
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::binary::write_cameras_bin;
use crate::camera::Camera;
use crate::error::ColmapError;

/// The camera id given to the exported camera.
pub const INTRINSICS_CAMERA_ID: u32 = 1;

#[derive(Deserialize)]
struct IntrinsicsDocument {
    camera: Option<CameraBlock>,
}

#[derive(Deserialize)]
struct CameraBlock {
    w: Option<f64>,
    h: Option<f64>,
    fx: Option<f64>,
    fy: Option<f64>,
    cx: Option<f64>,
    cy: Option<f64>,
    scale: Option<f64>,
}

/// Pinhole intrinsics of a scene camera.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraIntrinsics {
    /// Image width in pixels
    pub width: u64,
    /// Image height in pixels
    pub height: u64,
    /// Focal length in x
    pub fx: f64,
    /// Focal length in y
    pub fy: f64,
    /// Principal point x
    pub cx: f64,
    /// Principal point y
    pub cy: f64,
    /// Depth scale of the source dataset. Required on input, never encoded.
    pub scale: f64,
}

impl CameraIntrinsics {
    /// Parse the intrinsics from a JSON document holding a `camera` block.
    ///
    /// Every one of `w, h, fx, fy, cx, cy, scale` must be present, otherwise
    /// [`ColmapError::MissingField`] names the first absent one.
    pub fn from_json_str(json: &str) -> Result<Self, ColmapError> {
        let document: IntrinsicsDocument = serde_json::from_str(json)?;
        let block = document.camera.ok_or(ColmapError::MissingField("camera"))?;

        let width = dimension(block.w, "w")?;
        let height = dimension(block.h, "h")?;
        let fx = block.fx.ok_or(ColmapError::MissingField("fx"))?;
        let fy = block.fy.ok_or(ColmapError::MissingField("fy"))?;
        let cx = block.cx.ok_or(ColmapError::MissingField("cx"))?;
        let cy = block.cy.ok_or(ColmapError::MissingField("cy"))?;
        let scale = block.scale.ok_or(ColmapError::MissingField("scale"))?;

        Ok(Self {
            width,
            height,
            fx,
            fy,
            cx,
            cy,
            scale,
        })
    }

    /// Read the intrinsics from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ColmapError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The pinhole camera described by these intrinsics, with camera id 1.
    pub fn to_camera(&self) -> Camera {
        Camera::pinhole(
            INTRINSICS_CAMERA_ID,
            self.width,
            self.height,
            self.fx,
            self.fy,
            self.cx,
            self.cy,
        )
    }
}

fn dimension(value: Option<f64>, field: &'static str) -> Result<u64, ColmapError> {
    let value = value.ok_or(ColmapError::MissingField(field))?;
    if value < 1.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(ColmapError::InvalidFieldType {
            field,
            expected: "positive integer",
        });
    }
    Ok(value as u64)
}

/// Write the intrinsics as a single pinhole camera into a `cameras.bin` file.
///
/// # Arguments
///
/// * `intrinsics` - The camera intrinsics.
/// * `path` - The destination, overwritten if it exists.
pub fn write_intrinsics_bin(
    intrinsics: &CameraIntrinsics,
    path: impl AsRef<Path>,
) -> Result<(), ColmapError> {
    write_cameras_bin(path, &[intrinsics.to_camera()])
}

/// Convert an intrinsics JSON file into a `cameras.bin` file.
///
/// Nothing is written when the JSON is invalid.
///
/// # Returns
///
/// The encoded camera.
pub fn convert_intrinsics(
    json_path: impl AsRef<Path>,
    bin_path: impl AsRef<Path>,
) -> Result<Camera, ColmapError> {
    let intrinsics = CameraIntrinsics::from_json_file(json_path)?;
    let camera = intrinsics.to_camera();
    write_cameras_bin(bin_path.as_ref(), std::slice::from_ref(&camera))?;
    log::debug!(
        "wrote {}x{} pinhole camera to {}",
        camera.width,
        camera.height,
        bin_path.as_ref().display()
    );
    Ok(camera)
}
