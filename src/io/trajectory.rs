use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use nalgebra::Vector3;

use crate::geometry::SE3;

/// One pose sample of a trajectory: timestamp in seconds plus the camera
/// pose at that time.
#[derive(Debug, Clone)]
pub struct TrajectoryPoint {
    pub timestamp_s: f64,
    pub pose: SE3,
}

/// Write a trajectory in TUM format: one
/// `timestamp tx ty tz qx qy qz qw` line per pose.
pub fn write_tum<P: AsRef<Path>>(path: P, points: &[TrajectoryPoint]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create trajectory file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for point in points {
        let t = &point.pose.translation;
        let q = point.pose.rotation.quaternion();
        writeln!(
            writer,
            "{:.6} {:.7} {:.7} {:.7} {:.7} {:.7} {:.7} {:.7}",
            point.timestamp_s, t.x, t.y, t.z, q.i, q.j, q.k, q.w
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a TUM-format trajectory. Lines that are empty, start with `#`, or do
/// not carry eight numeric fields are skipped, the same tolerance as the
/// association manifest scan.
pub fn read_tum<P: AsRef<Path>>(path: P) -> Result<Vec<TrajectoryPoint>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open trajectory file {}", path.display()))?;

    let mut points = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(point) = parse_tum_line(&line) {
            points.push(point);
        }
    }
    Ok(points)
}

fn parse_tum_line(line: &str) -> Option<TrajectoryPoint> {
    let mut values = [0.0f64; 8];
    let mut fields = line.split_whitespace();
    for slot in values.iter_mut() {
        *slot = fields.next()?.parse().ok()?;
    }
    Some(TrajectoryPoint {
        timestamp_s: values[0],
        pose: SE3::from_quaternion(
            values[7],
            values[4],
            values[5],
            values[6],
            Vector3::new(values[1], values[2], values[3]),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_write_then_read_preserves_poses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trajectory.txt");
        let points = vec![
            TrajectoryPoint {
                timestamp_s: 0.0,
                pose: SE3::identity(),
            },
            TrajectoryPoint {
                timestamp_s: 0.5,
                pose: SE3::from_quaternion(0.9, 0.0, 0.1, 0.0, Vector3::new(1.0, 2.0, 3.0)),
            },
        ];

        write_tum(&path, &points).unwrap();
        let read = read_tum(&path).unwrap();

        assert_eq!(read.len(), 2);
        assert_relative_eq!(read[1].timestamp_s, 0.5);
        assert_relative_eq!(read[1].pose.translation, Vector3::new(1.0, 2.0, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_read_skips_comments_and_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trajectory.txt");
        std::fs::write(
            &path,
            "# ts tx ty tz qx qy qz qw\n\
             0.1 0 0 0 0 0 0\n\
             0.2 0 bad 0 0 0 0 1\n\
             0.3 1 2 3 0 0 0 1\n",
        )
        .unwrap();

        let read = read_tum(&path).unwrap();
        assert_eq!(read.len(), 1);
        assert_relative_eq!(read[0].timestamp_s, 0.3);
    }
}
