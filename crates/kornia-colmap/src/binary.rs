//! COLMAP binary model files.
//!
//! All the values are little-endian. `cameras.bin` layout:
//!
//! ```text
//! u64                 number of cameras
//! per camera:
//!   i32               camera id
//!   i32               model id
//!   u64 u64           width, height
//!   f64 * num_params  parameters
//! ```

use std::{
    fs::File,
    io::{BufReader, Read, Write},
    path::Path,
};

use crate::camera::Camera;
use crate::error::ColmapError;
use crate::models::lookup_by_id;
use crate::quaternion::xyzw_to_wxyz;
use crate::text::ImagePose;

/// Write the cameras into a `cameras.bin` file.
///
/// The destination is truncated, so writing the same cameras twice yields identical files.
/// Every camera is validated first; on error the destination is left untouched.
///
/// # Arguments
///
/// * `path` - The path to the cameras.bin file.
/// * `cameras` - The cameras, written in order.
pub fn write_cameras_bin(path: impl AsRef<Path>, cameras: &[Camera]) -> Result<(), ColmapError> {
    let mut buf = Vec::new();
    encode_cameras(&mut buf, cameras)?;
    std::fs::write(path, buf)?;
    Ok(())
}

/// Encode cameras in the `cameras.bin` layout into any writer.
///
/// Nothing is written unless every camera passes [`Camera::validate`].
pub fn encode_cameras<W: Write>(writer: &mut W, cameras: &[Camera]) -> Result<(), ColmapError> {
    for camera in cameras {
        camera.validate()?;
    }

    writer.write_all(&(cameras.len() as u64).to_le_bytes())?;
    for camera in cameras {
        // in range after validate
        writer.write_all(&(camera.camera_id as i32).to_le_bytes())?;
        writer.write_all(&camera.model_id.id().to_le_bytes())?;
        writer.write_all(&camera.width.to_le_bytes())?;
        writer.write_all(&camera.height.to_le_bytes())?;
        for param in &camera.params {
            writer.write_all(&param.to_le_bytes())?;
        }
    }
    Ok(())
}

/// Read a `cameras.bin` file.
///
/// # Arguments
///
/// * `path` - The path to the cameras.bin file.
///
/// # Returns
///
/// The cameras in file order.
pub fn read_cameras_bin(path: impl AsRef<Path>) -> Result<Vec<Camera>, ColmapError> {
    let mut reader = BufReader::new(File::open(path)?);
    decode_cameras(&mut reader)
}

/// Decode cameras in the `cameras.bin` layout from any reader.
pub fn decode_cameras<R: Read>(reader: &mut R) -> Result<Vec<Camera>, ColmapError> {
    let num_cameras = read_u64(reader)?;
    let mut cameras = Vec::new();
    for _ in 0..num_cameras {
        let camera_id = read_i32(reader)?;
        let camera_id = u32::try_from(camera_id)
            .map_err(|_| ColmapError::ParseError(format!("Invalid camera id: {camera_id}")))?;
        let model = lookup_by_id(read_i32(reader)?)?;
        let width = read_u64(reader)?;
        let height = read_u64(reader)?;
        let params = (0..model.num_params)
            .map(|_| read_f64(reader))
            .collect::<Result<Vec<_>, _>>()?;
        cameras.push(Camera {
            camera_id,
            model_id: model.model_id,
            width,
            height,
            params,
        });
    }
    Ok(cameras)
}

/// Write the image poses into an `images.bin` file.
///
/// Every image is written without 2D points. Quaternions are stored scalar-first.
///
/// ```text
/// u64                 number of images
/// per image:
///   i32               image id
///   f64 * 4           qw qx qy qz
///   f64 * 3           tx ty tz
///   i32               camera id
///   u8 *              name, NUL terminated
///   u64               number of 2D points (0)
/// ```
pub fn write_images_bin(path: impl AsRef<Path>, images: &[ImagePose]) -> Result<(), ColmapError> {
    let ids = images
        .iter()
        .map(|image| {
            Ok((
                to_i32(image.image_id, "image id")?,
                to_i32(image.camera_id, "camera id")?,
            ))
        })
        .collect::<Result<Vec<_>, ColmapError>>()?;

    let mut buf = Vec::new();
    buf.extend_from_slice(&(images.len() as u64).to_le_bytes());
    for (image, (image_id, camera_id)) in images.iter().zip(ids) {
        buf.extend_from_slice(&image_id.to_le_bytes());
        for v in xyzw_to_wxyz(&image.pose.quaternion) {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        for v in image.pose.translation {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf.extend_from_slice(&camera_id.to_le_bytes());
        buf.extend_from_slice(image.name.as_bytes());
        buf.push(0);
        buf.extend_from_slice(&0u64.to_le_bytes());
    }

    std::fs::write(path, buf)?;
    Ok(())
}

/// Write an empty `points3D.bin` file.
pub fn write_points3d_bin(path: impl AsRef<Path>) -> Result<(), ColmapError> {
    let mut file = File::create(path)?;
    file.write_all(&0u64.to_le_bytes())?;
    Ok(())
}

fn to_i32(id: u32, what: &'static str) -> Result<i32, ColmapError> {
    match i32::try_from(id) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ColmapError::InvalidId { what, id }),
    }
}

fn read_bytes<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N], ColmapError> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32, ColmapError> {
    Ok(i32::from_le_bytes(read_bytes(reader)?))
}

fn read_u64<R: Read>(reader: &mut R) -> Result<u64, ColmapError> {
    Ok(u64::from_le_bytes(read_bytes(reader)?))
}

fn read_f64<R: Read>(reader: &mut R) -> Result<f64, ColmapError> {
    Ok(f64::from_le_bytes(read_bytes(reader)?))
}
