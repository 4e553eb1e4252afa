//! Export of a Replica scene into a COLMAP sparse model.
//!
//! ```text
//! scene/
//!   results/frame*.jpg     rendered frames
//!   traj.txt               one camera-to-world matrix per frame
//!   images/                extracted frames
//!   images_{n}/            downsampled frames, when requested
//!   sparse/0/              cameras.bin, images.bin, images.txt, points3D.bin
//! ```

use std::path::{Path, PathBuf};

use crate::binary::{write_cameras_bin, write_images_bin, write_points3d_bin};
use crate::error::ColmapError;
use crate::intrinsics::CameraIntrinsics;
use crate::matrix::RigidPose;
use crate::scene::{downsample_frames, extract_frames, list_frames, DownsampleConfig};
use crate::text::{write_images_txt, ImagePose};
use crate::trajectory::read_trajectory;

/// Parameters of a scene export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Frame selection and downsampling.
    pub frames: DownsampleConfig,
    /// Name of the trajectory file inside the scene.
    pub trajectory: String,
    /// Invert the camera-to-world trajectory into world-to-camera poses.
    pub invert_poses: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            frames: DownsampleConfig::default(),
            trajectory: "traj.txt".to_string(),
            invert_poses: true,
        }
    }
}

/// What a scene export produced.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// The directory of the images referenced by the model.
    pub images_dir: PathBuf,
    /// The sparse model directory.
    pub sparse_dir: PathBuf,
    /// Number of registered images.
    pub num_images: usize,
}

/// Pair frame names with their poses.
///
/// Image ids start at 1 and every image refers to `camera_id`.
pub fn image_poses(
    names: &[String],
    poses: &[RigidPose],
    camera_id: u32,
) -> Result<Vec<ImagePose>, ColmapError> {
    if names.len() != poses.len() {
        return Err(ColmapError::FramePoseMismatch {
            frames: names.len(),
            poses: poses.len(),
        });
    }
    Ok(names
        .iter()
        .zip(poses)
        .enumerate()
        .map(|(i, (name, pose))| ImagePose {
            image_id: i as u32 + 1,
            camera_id,
            name: name.clone(),
            pose: *pose,
        })
        .collect())
}

/// Export a Replica scene into `scene/sparse/0`.
///
/// # Arguments
///
/// * `scene` - The scene directory.
/// * `intrinsics` - The intrinsics shared by every frame.
/// * `config` - The export parameters.
pub fn export_replica_scene(
    scene: impl AsRef<Path>,
    intrinsics: &CameraIntrinsics,
    config: &ExportConfig,
) -> Result<ExportSummary, ColmapError> {
    let scene = scene.as_ref();
    let factor = config.frames.factor;
    if factor == 0 {
        return Err(ColmapError::InvalidDownsampleFactor(factor));
    }

    // parse the inputs before touching the output folders
    let trajectory = read_trajectory(scene.join(&config.trajectory))?;

    extract_frames(scene, &config.frames)?;
    let images_dir = if factor > 1 {
        downsample_frames(scene, &config.frames)?.0
    } else {
        scene.join("images")
    };
    let names = list_frames(&images_dir, &config.frames)?;

    let poses = trajectory
        .iter()
        .step_by(factor)
        .map(|pose| match config.invert_poses {
            true => pose.inverse(),
            false => *pose,
        })
        .collect::<Vec<_>>();

    let camera = intrinsics.to_camera();
    let images = image_poses(&names, &poses, camera.camera_id)?;

    let sparse_dir = scene.join("sparse").join("0");
    std::fs::create_dir_all(&sparse_dir)?;
    write_cameras_bin(sparse_dir.join("cameras.bin"), &[camera])?;
    write_images_bin(sparse_dir.join("images.bin"), &images)?;
    write_images_txt(sparse_dir.join("images.txt"), &images)?;
    write_points3d_bin(sparse_dir.join("points3D.bin"))?;

    log::info!(
        "exported {} images of {} into {}",
        images.len(),
        scene.display(),
        sparse_dir.display()
    );

    Ok(ExportSummary {
        images_dir,
        sparse_dir,
        num_images: images.len(),
    })
}
