use argh::FromArgs;
use std::path::PathBuf;

use kornia_colmap::{
    export::{export_replica_scene, ExportConfig},
    scene::{list_scenes, DownsampleConfig},
    CameraIntrinsics,
};

#[derive(FromArgs)]
/// Convert the Replica scenes into COLMAP sparse models
struct Args {
    /// path to the Replica dataset root, one subdirectory per scene
    #[argh(option)]
    replica_path: PathBuf,

    /// path to the intrinsics json (defaults to <replica_path>/cam_params.json)
    #[argh(option)]
    cam_params: Option<PathBuf>,

    /// keep one frame out of this many
    #[argh(option, default = "1")]
    downsample: usize,

    /// keep the camera-to-world poses of the trajectory as they are
    #[argh(switch)]
    keep_camera_to_world: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let cam_params = args
        .cam_params
        .unwrap_or_else(|| args.replica_path.join("cam_params.json"));
    let intrinsics = CameraIntrinsics::from_json_file(&cam_params)?;
    log::info!(
        "intrinsics: {}x{} fx={} fy={} cx={} cy={}",
        intrinsics.width,
        intrinsics.height,
        intrinsics.fx,
        intrinsics.fy,
        intrinsics.cx,
        intrinsics.cy
    );

    let config = ExportConfig {
        frames: DownsampleConfig::with_factor(args.downsample),
        invert_poses: !args.keep_camera_to_world,
        ..Default::default()
    };

    let scenes = list_scenes(&args.replica_path)?;
    if scenes.is_empty() {
        log::warn!("no scenes found in {}", args.replica_path.display());
        return Ok(());
    }

    for scene in scenes {
        let scene_path = args.replica_path.join(&scene);
        if !scene_path.join(&config.trajectory).exists() {
            log::warn!("skipping {scene}: no {} found", config.trajectory);
            continue;
        }

        let summary = export_replica_scene(&scene_path, &intrinsics, &config)?;
        println!(
            "Processed scene {scene}: {} images, model at {}",
            summary.num_images,
            summary.sparse_dir.display()
        );
    }

    Ok(())
}
