use argh::FromArgs;
use std::path::PathBuf;

use kornia_colmap::scene::downsample_scene;

#[derive(FromArgs)]
/// Downsample a scene by copying every n-th file of its input directory
struct Args {
    /// path to the scene root, which contains the `input` subdirectory
    #[argh(positional)]
    scene_root: PathBuf,

    /// downsample factor
    #[argh(option)]
    downsample: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let new_scene_root = downsample_scene(&args.scene_root, args.downsample)?;
    println!(
        "Downsampling complete. New directory created at: {}",
        new_scene_root.display()
    );

    Ok(())
}
