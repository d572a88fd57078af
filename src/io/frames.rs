use std::path::Path;

use anyhow::{Context, Result, bail};
use opencv::core::{Mat, Size};
use opencv::prelude::*;
use opencv::{imgcodecs, imgcodecs::IMREAD_UNCHANGED, imgproc};

/// Read one frame from disk. A missing or undecodable image is fatal to the
/// replay run, so the error names the offending path.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Mat> {
    let path = path.as_ref();
    let path_str = path
        .to_str()
        .with_context(|| format!("Image path is not valid UTF-8: {}", path.display()))?;
    let image = imgcodecs::imread(path_str, IMREAD_UNCHANGED)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    if image.empty() {
        bail!("Failed to load image at: {}", path.display());
    }
    Ok(image)
}

/// Rescale a frame by a constant factor. A factor of 1.0 returns the frame
/// untouched; otherwise both dimensions are scaled and truncated to whole
/// pixels.
pub fn rescale(image: Mat, scale: f64) -> Result<Mat> {
    if scale == 1.0 {
        return Ok(image);
    }
    let width = (image.cols() as f64 * scale) as i32;
    let height = (image.rows() as f64 * scale) as i32;
    let mut resized = Mat::default();
    imgproc::resize(
        &image,
        &mut resized,
        Size::new(width, height),
        0.0,
        0.0,
        imgproc::INTER_LINEAR,
    )?;
    Ok(resized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{CV_8UC1, Vector};

    fn gray_mat(rows: i32, cols: i32) -> Mat {
        Mat::zeros(rows, cols, CV_8UC1).unwrap().to_mat().unwrap()
    }

    #[test]
    fn test_unit_scale_keeps_dimensions() {
        let image = gray_mat(6, 8);
        let out = rescale(image, 1.0).unwrap();

        assert_eq!(out.cols(), 8);
        assert_eq!(out.rows(), 6);
    }

    #[test]
    fn test_half_scale_truncates_dimensions() {
        let image = gray_mat(5, 9);
        let out = rescale(image, 0.5).unwrap();

        assert_eq!(out.cols(), 4);
        assert_eq!(out.rows(), 2);
    }

    #[test]
    fn test_load_image_round_trips_a_written_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let image = gray_mat(6, 8);
        imgcodecs::imwrite(path.to_str().unwrap(), &image, &Vector::new()).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.cols(), 8);
        assert_eq!(loaded.rows(), 6);
    }

    #[test]
    fn test_missing_image_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.png");

        let err = load_image(&missing).unwrap_err();
        assert!(err.to_string().contains("gone.png"));
    }
}
