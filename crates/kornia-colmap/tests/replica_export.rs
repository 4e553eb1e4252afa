//! End to end export of a synthetic Replica scene.

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use kornia_colmap::{
    binary::read_cameras_bin,
    export::{export_replica_scene, ExportConfig},
    scene::DownsampleConfig,
    text::read_images_txt,
    CameraIntrinsics, CameraModelId, ColmapError,
};

const CAM_PARAMS: &str = concat!(
    r#"{"camera": {"w": 1200, "h": 680, "fx": 600.0, "fy": 600.0,"#,
    r#" "cx": 599.5, "cy": 339.5, "scale": 6553.5}}"#
);

fn make_scene(scene: &Path, num_frames: usize) -> std::io::Result<()> {
    let results = scene.join("results");
    fs::create_dir_all(&results)?;
    let mut traj = String::new();
    for i in 0..num_frames {
        fs::write(results.join(format!("frame{i:06}.jpg")), [0u8; 4])?;
        fs::write(results.join(format!("depth{i:06}.png")), [0u8; 4])?;
        // camera-to-world: identity rotation, moving along x
        traj.push_str(&format!("1 0 0 {i} 0 1 0 0 0 0 1 0 0 0 0 1\n"));
    }
    fs::write(scene.join("traj.txt"), traj)
}

#[test]
fn export_full_scene() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempfile::tempdir()?;
    let scene = root.path().join("room0");
    make_scene(&scene, 4)?;

    let intrinsics = CameraIntrinsics::from_json_str(CAM_PARAMS)?;
    let summary = export_replica_scene(&scene, &intrinsics, &ExportConfig::default())?;
    assert_eq!(summary.num_images, 4);
    assert_eq!(summary.images_dir, scene.join("images"));

    let cameras = read_cameras_bin(summary.sparse_dir.join("cameras.bin"))?;
    assert_eq!(cameras.len(), 1);
    assert_eq!(cameras[0].camera_id, 1);
    assert_eq!(cameras[0].model_id, CameraModelId::Pinhole);
    assert_eq!((cameras[0].width, cameras[0].height), (1200, 680));
    assert_eq!(cameras[0].params, vec![600.0, 600.0, 599.5, 339.5]);

    let images = read_images_txt(summary.sparse_dir.join("images.txt"))?;
    assert_eq!(images.len(), 4);
    for (i, image) in images.iter().enumerate() {
        assert_eq!(image.name, format!("frame{i:06}.jpg"));
        // world-to-camera translation of a camera at (i, 0, 0)
        assert_relative_eq!(image.pose.translation[0], -(i as f64));
        assert_relative_eq!(image.pose.quaternion[3], 1.0);
    }

    assert!(summary.sparse_dir.join("images.bin").exists());
    assert_eq!(fs::read(summary.sparse_dir.join("points3D.bin"))?, vec![0u8; 8]);
    Ok(())
}

#[test]
fn export_downsampled_scene() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempfile::tempdir()?;
    let scene = root.path().join("office0");
    make_scene(&scene, 5)?;

    let config = ExportConfig {
        frames: DownsampleConfig::with_factor(2),
        invert_poses: false,
        ..Default::default()
    };
    let intrinsics = CameraIntrinsics::from_json_str(CAM_PARAMS)?;
    let summary = export_replica_scene(&scene, &intrinsics, &config)?;
    assert_eq!(summary.images_dir, scene.join("images_2"));
    assert_eq!(summary.num_images, 3);

    let images = read_images_txt(summary.sparse_dir.join("images.txt"))?;
    let names = images.iter().map(|i| i.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["frame000000.jpg", "frame000002.jpg", "frame000004.jpg"]);
    let xs = images
        .iter()
        .map(|i| i.pose.translation[0])
        .collect::<Vec<_>>();
    assert_eq!(xs, vec![0.0, 2.0, 4.0]);
    Ok(())
}

#[test]
fn export_rejects_malformed_trajectory() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempfile::tempdir()?;
    let scene = root.path().join("room1");
    make_scene(&scene, 2)?;
    fs::write(scene.join("traj.txt"), "1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1 7\n")?;

    let intrinsics = CameraIntrinsics::from_json_str(CAM_PARAMS)?;
    let res = export_replica_scene(&scene, &intrinsics, &ExportConfig::default());
    assert!(matches!(res, Err(ColmapError::MalformedMatrix(17))));
    assert!(!scene.join("sparse").exists());
    Ok(())
}
