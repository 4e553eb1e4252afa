use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::camera::Camera;
use crate::error::ColmapError;
use crate::matrix::RigidPose;
use crate::models::lookup_by_name;
use crate::quaternion::{wxyz_to_xyzw, xyzw_to_wxyz};

/// Represents the pose of a registered image in the Colmap system.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePose {
    /// Image id
    pub image_id: u32,
    /// Camera id
    pub camera_id: u32,
    /// Image name
    pub name: String,
    /// World-to-camera transform
    pub pose: RigidPose,
}

/// Read the cameras.txt file and return a vector of Camera structs.
///
/// # Arguments
///
/// * `path` - The path to the cameras.txt file.
///
/// # Returns
///
/// A vector of Camera structs.
pub fn read_cameras_txt(path: impl AsRef<Path>) -> Result<Vec<Camera>, ColmapError> {
    // open the file and create a buffered reader
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    // skip the comment header and parse the rest
    let cameras = reader
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.starts_with('#') || l.trim().is_empty()))
        .map(|line| -> Result<Camera, ColmapError> {
            let line = line.map_err(ColmapError::from)?;
            parse_camera_line(&line)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(cameras)
}

/// Write the image poses into an images.txt file.
///
/// Two lines per image, the second one (2D points) left empty.
///
/// # Arguments
///
/// * `path` - The path to the images.txt file.
/// * `images` - The image poses, written in order.
pub fn write_images_txt(path: impl AsRef<Path>, images: &[ImagePose]) -> Result<(), ColmapError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "# Image list with two lines of data per image:")?;
    writeln!(writer, "#   IMAGE_ID, QW, QX, QY, QZ, TX, TY, TZ, CAMERA_ID, NAME")?;
    writeln!(writer, "#   POINTS2D[] as (X, Y, POINT3D_ID)")?;
    writeln!(
        writer,
        "# Number of images: {}, mean observations per image: 0",
        images.len()
    )?;

    for image in images {
        let [qw, qx, qy, qz] = xyzw_to_wxyz(&image.pose.quaternion);
        let [tx, ty, tz] = image.pose.translation;
        writeln!(
            writer,
            "{} {} {} {} {} {} {} {} {} {}",
            image.image_id, qw, qx, qy, qz, tx, ty, tz, image.camera_id, image.name
        )?;
        writeln!(writer)?;
    }
    writer.flush()?;

    Ok(())
}

/// Read the images.txt file and return a vector of ImagePose structs.
///
/// The 2D points of every image are ignored.
pub fn read_images_txt(path: impl AsRef<Path>) -> Result<Vec<ImagePose>, ColmapError> {
    // open the file and create a buffered reader
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let images = reader
        .lines()
        .skip(4)
        .collect::<Result<Vec<_>, _>>()?
        .chunks(2)
        .map(|chunk| match chunk {
            [line1, _] => parse_image_line(line1),
            _ => Err(ColmapError::ParseError(
                "Invalid number of lines".to_string(),
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(images)
}

/// Utility functions for parsing COLMAP text files
fn parse_part<T: std::str::FromStr>(s: &str) -> Result<T, ColmapError>
where
    T::Err: std::fmt::Display,
{
    s.parse::<T>()
        .map_err(|e| ColmapError::ParseError(format!("{}: {}", s, e)))
}

fn parse_array<const N: usize>(parts: &[&str]) -> Result<[f64; N], ColmapError> {
    parts
        .iter()
        .map(|s| parse_part(s))
        .collect::<Result<Vec<_>, _>>()?
        .try_into()
        .map_err(|_| ColmapError::ParseError(format!("Expected {N} values")))
}

/// Parse a camera line and return a Camera struct.
/// NOTE: The number of parameters depends on the camera model.
///       CAMERA_ID, MODEL, WIDTH, HEIGHT, PARAMS[0], PARAMS[1], ...
fn parse_camera_line(line: &str) -> Result<Camera, ColmapError> {
    // split the line into parts by whitespace
    let parts = line.split_whitespace().collect::<Vec<_>>();

    if parts.len() < 5 {
        return Err(ColmapError::ParseError(format!(
            "Invalid number of parts: {}",
            parts.len()
        )));
    }

    let model = lookup_by_name(parts[1])?;

    Camera::new(
        parse_part(parts[0])?,
        model.model_id,
        parse_part(parts[2])?,
        parse_part(parts[3])?,
        parts[4..]
            .iter()
            .map(|s| parse_part(s))
            .collect::<Result<Vec<_>, _>>()?,
    )
}

/// Parse an image line and return an ImagePose struct.
/// #   IMAGE_ID, QW, QX, QY, QZ, TX, TY, TZ, CAMERA_ID, NAME
fn parse_image_line(line: &str) -> Result<ImagePose, ColmapError> {
    // split the line into parts by whitespace
    let parts = line.split_whitespace().collect::<Vec<_>>();

    if parts.len() != 10 {
        return Err(ColmapError::ParseError(format!(
            "Invalid number of parts: {}",
            parts.len()
        )));
    }

    let wxyz = parse_array::<4>(&parts[1..5])?;

    Ok(ImagePose {
        image_id: parse_part(parts[0])?,
        pose: RigidPose {
            quaternion: wxyz_to_xyzw(&wxyz),
            translation: parse_array(&parts[5..8])?,
        },
        camera_id: parse_part(parts[8])?,
        name: parts[9].to_string(),
    })
}
