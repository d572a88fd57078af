//! Engine settings file access.
//!
//! Settings ship as OpenCV-style YAML: a `%YAML:1.0` directive line followed
//! by a flat mapping with dotted keys (`Camera.imageScale: 0.5`). The
//! directive line is not valid YAML for serde, so it is stripped before
//! parsing. Keys the harness does not consume are ignored.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct EngineSettings {
    #[serde(rename = "Camera.imageScale")]
    image_scale: Option<f64>,
}

impl EngineSettings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to open settings file {}", path.display()))?;
        let cleaned = raw
            .lines()
            .filter(|line| !line.trim_start().starts_with('%'))
            .collect::<Vec<_>>()
            .join("\n");
        if cleaned.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&cleaned)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    /// Factor applied to every incoming frame; 1.0 unless the settings file
    /// overrides it.
    pub fn image_scale(&self) -> f64 {
        self.image_scale.unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;

    fn write_settings(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_strips_opencv_yaml_directive() {
        let (_dir, path) = write_settings(
            "%YAML:1.0\nCamera.imageScale: 0.5\nCamera.fps: 30.0\nORBextractor.nFeatures: 1000\n",
        );
        let settings = EngineSettings::load(&path).unwrap();

        assert_relative_eq!(settings.image_scale(), 0.5);
    }

    #[test]
    fn test_image_scale_defaults_to_one() {
        let (_dir, path) = write_settings("%YAML:1.0\n");
        let settings = EngineSettings::load(&path).unwrap();

        assert_relative_eq!(settings.image_scale(), 1.0);
    }

    #[test]
    fn test_missing_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineSettings::load(dir.path().join("absent.yaml")).unwrap_err();

        assert!(err.to_string().contains("absent.yaml"));
    }
}
