use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::Path,
};

use crate::error::ColmapError;
use crate::matrix::{decompose, matrix_from_string, RigidPose};

/// Lazy iterator over the lines of a pose trajectory file.
///
/// Each item is one line with the trailing whitespace removed. The content is not
/// validated, use [`matrix_from_string`] on every line for that.
pub struct PoseLines<R> {
    lines: Lines<R>,
}

impl<R: BufRead> Iterator for PoseLines<R> {
    type Item = Result<String, ColmapError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|line| {
            let mut line = line?;
            line.truncate(line.trim_end().len());
            Ok(line)
        })
    }
}

/// Iterate the pose lines of any buffered reader.
pub fn pose_lines<R: BufRead>(reader: R) -> PoseLines<R> {
    PoseLines {
        lines: reader.lines(),
    }
}

/// Open a trajectory file and iterate its pose lines lazily.
///
/// # Arguments
///
/// * `path` - The path to the trajectory file, e.g. `traj.txt`.
pub fn open_pose_lines(
    path: impl AsRef<Path>,
) -> Result<PoseLines<BufReader<File>>, ColmapError> {
    let file = File::open(path)?;
    Ok(pose_lines(BufReader::new(file)))
}

/// Read all the pose lines of a trajectory file in file order.
///
/// # Arguments
///
/// * `path` - The path to the trajectory file.
///
/// # Returns
///
/// One string per line, trailing whitespace stripped.
pub fn read_pose_lines(path: impl AsRef<Path>) -> Result<Vec<String>, ColmapError> {
    open_pose_lines(path)?.collect()
}

/// Read a trajectory file and decompose every line into a [`RigidPose`].
///
/// Blank lines are skipped. The first malformed line aborts the read.
pub fn read_trajectory(path: impl AsRef<Path>) -> Result<Vec<RigidPose>, ColmapError> {
    let path = path.as_ref();
    let mut poses = Vec::new();
    for line in open_pose_lines(path)? {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        poses.push(decompose(&matrix_from_string(&line)?)?);
    }
    log::debug!("read {} poses from {}", poses.len(), path.display());
    Ok(poses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_pose_lines_order_and_stripping() -> Result<(), ColmapError> {
        let text = "a  b\tc  \r\nsecond line\n\nlast";
        let lines = pose_lines(text.as_bytes()).collect::<Result<Vec<_>, _>>()?;
        assert_eq!(lines, vec!["a  b\tc", "second line", "", "last"]);
        Ok(())
    }

    #[test]
    fn test_read_pose_lines() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1")?;
        writeln!(file, "not a matrix ")?;

        let lines = read_pose_lines(file.path())?;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1");
        assert_eq!(lines[1], "not a matrix");
        Ok(())
    }

    #[test]
    fn test_read_pose_lines_missing_file() {
        let res = read_pose_lines("/this/path/does/not/exist.txt");
        assert!(matches!(res, Err(ColmapError::Io(_))));
    }

    #[test]
    fn test_read_trajectory() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1")?;
        writeln!(file, "0 -1 0 1 1 0 0 2 0 0 1 3 0 0 0 1")?;
        writeln!(file)?;

        let poses = read_trajectory(file.path())?;
        assert_eq!(poses.len(), 2);
        assert_eq!(poses[0], RigidPose::identity());
        assert_eq!(poses[1].translation, [1.0, 2.0, 3.0]);
        assert_relative_eq!(
            poses[1].quaternion[2],
            std::f64::consts::FRAC_1_SQRT_2,
            epsilon = 1e-12
        );
        Ok(())
    }

    #[test]
    fn test_read_trajectory_malformed_line() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "1 0 0 0 0 1 0 0 0 0 1 0 0 0 0")?;

        let res = read_trajectory(file.path());
        assert!(matches!(res, Err(ColmapError::MalformedMatrix(15))));
        Ok(())
    }
}
