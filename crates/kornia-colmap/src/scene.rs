//! Scene folder plumbing: frame extraction and downsampling.
//!
//! A Replica scene holds its rendered frames in `results/` as `frame*.jpg`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::ColmapError;

/// Parameters to select and downsample the frames of a scene.
#[derive(Debug, Clone)]
pub struct DownsampleConfig {
    /// Keep one frame out of `factor`.
    pub factor: usize,
    /// File name prefix of the frames.
    pub prefix: String,
    /// File extension of the frames, without the dot.
    pub extension: String,
}

impl Default for DownsampleConfig {
    fn default() -> Self {
        Self {
            factor: 1,
            prefix: "frame".to_string(),
            extension: "jpg".to_string(),
        }
    }
}

impl DownsampleConfig {
    /// Default frame naming with the given factor.
    pub fn with_factor(factor: usize) -> Self {
        Self {
            factor,
            ..Default::default()
        }
    }

    fn matches(&self, name: &str) -> bool {
        name.starts_with(&self.prefix)
            && Path::new(name).extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
    }
}

/// List the names of the immediate subdirectories of `root`, sorted.
pub fn list_scenes(root: impl AsRef<Path>) -> Result<Vec<String>, ColmapError> {
    let mut scenes = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            scenes.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    scenes.sort();
    Ok(scenes)
}

/// List the sorted frame file names of `dir` matching the configured prefix and extension.
pub fn list_frames(
    dir: impl AsRef<Path>,
    config: &DownsampleConfig,
) -> Result<Vec<String>, ColmapError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ColmapError::MissingDirectory(dir.to_path_buf()));
    }
    let mut frames = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if config.matches(&name) {
            frames.push(name);
        }
    }
    frames.sort();
    Ok(frames)
}

/// Copy every `step`-th file of `names` from `src` to `dst`.
fn copy_every(src: &Path, dst: &Path, names: &[String], step: usize) -> Result<usize, ColmapError> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    for name in names.iter().step_by(step) {
        fs::copy(src.join(name), dst.join(name))?;
        copied += 1;
    }
    log::debug!(
        "copied {copied} of {} files from {} to {}",
        names.len(),
        src.display(),
        dst.display()
    );
    Ok(copied)
}

/// Copy the frames of `scene/results` into `scene/images`.
///
/// # Returns
///
/// The number of copied frames.
pub fn extract_frames(
    scene: impl AsRef<Path>,
    config: &DownsampleConfig,
) -> Result<usize, ColmapError> {
    let scene = scene.as_ref();
    let results = scene.join("results");
    let images = scene.join("images");
    let frames = list_frames(&results, config)?;
    let copied = copy_every(&results, &images, &frames, 1)?;
    log::info!("extracted {copied} frames into {}", images.display());
    Ok(copied)
}

/// Copy every `factor`-th frame of `scene/images` into `scene/images_{factor}`.
///
/// # Returns
///
/// The downsampled directory and the number of copied frames.
pub fn downsample_frames(
    scene: impl AsRef<Path>,
    config: &DownsampleConfig,
) -> Result<(PathBuf, usize), ColmapError> {
    if config.factor == 0 {
        return Err(ColmapError::InvalidDownsampleFactor(config.factor));
    }
    let scene = scene.as_ref();
    let images = scene.join("images");
    let downsampled = scene.join(format!("images_{}", config.factor));
    let frames = list_frames(&images, config)?;
    let copied = copy_every(&images, &downsampled, &frames, config.factor)?;
    log::info!(
        "downsampled {} frames to {copied} in {}",
        frames.len(),
        downsampled.display()
    );
    Ok((downsampled, copied))
}

/// Create the sibling scene `{name}_downsample{factor}` holding every `factor`-th file of
/// `scene_root/input`.
///
/// # Arguments
///
/// * `scene_root` - The scene directory, which must contain an `input` subdirectory.
/// * `factor` - Keep one file out of `factor`.
///
/// # Returns
///
/// The root of the new scene.
pub fn downsample_scene(
    scene_root: impl AsRef<Path>,
    factor: usize,
) -> Result<PathBuf, ColmapError> {
    if factor == 0 {
        return Err(ColmapError::InvalidDownsampleFactor(factor));
    }
    let scene_root = scene_root.as_ref();
    let input = scene_root.join("input");
    if !input.is_dir() {
        return Err(ColmapError::MissingDirectory(input));
    }

    // resolves `.` and `..` so the scene name is known
    let scene_root = fs::canonicalize(scene_root)?;
    let name = scene_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ColmapError::MissingDirectory(scene_root.to_path_buf()))?;
    let parent = scene_root.parent().unwrap_or_else(|| Path::new("/"));
    let new_root = parent.join(format!("{name}_downsample{factor}"));

    let mut files = Vec::new();
    for entry in fs::read_dir(&input)? {
        files.push(entry?.file_name().to_string_lossy().into_owned());
    }
    files.sort();

    let copied = copy_every(&input, &new_root.join("input"), &files, factor)?;
    log::info!("copied {copied} files into {}", new_root.display());
    Ok(new_root)
}
