//! Recording engine backend.
//!
//! A `SlamEngine` with tracking disabled: it satisfies the whole capability
//! surface while only recording the calls it receives. The replay binary
//! uses it to exercise datasets and pacing without a tracking backend, and
//! the test suite uses it to observe exactly what the harness dispatched.

use std::path::Path;

use anyhow::{Result, bail};
use opencv::core::Mat;
use tracing::info;

use crate::engine::settings::EngineSettings;
use crate::engine::{EngineConfig, SlamEngine};
use crate::geometry::SE3;
use crate::io::trajectory::{self, TrajectoryPoint};

#[derive(Debug)]
pub struct RecordingEngine {
    image_scale: f64,
    tracked: Vec<TrajectoryPoint>,
    shut_down: bool,
}

impl RecordingEngine {
    /// Bring the engine up from its configuration. The vocabulary and
    /// settings files must exist; the image scale comes from the settings.
    pub fn initialize(config: &EngineConfig) -> Result<Self> {
        if !config.vocabulary.is_file() {
            bail!(
                "Vocabulary file not found: {}",
                config.vocabulary.display()
            );
        }
        let settings = EngineSettings::load(&config.settings)?;
        Ok(Self {
            image_scale: settings.image_scale(),
            tracked: Vec::new(),
            shut_down: false,
        })
    }

    /// Every track call recorded so far, in dispatch order.
    pub fn tracked(&self) -> &[TrajectoryPoint] {
        &self.tracked
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl SlamEngine for RecordingEngine {
    fn image_scale(&self) -> f64 {
        self.image_scale
    }

    fn track_monocular(&mut self, _image: &Mat, timestamp_s: f64) -> Result<SE3> {
        let pose = SE3::identity();
        self.tracked.push(TrajectoryPoint {
            timestamp_s,
            pose: pose.clone(),
        });
        Ok(pose)
    }

    fn shutdown(&mut self) {
        if !self.shut_down {
            self.shut_down = true;
            info!(
                "recording engine shut down after {} tracked frames",
                self.tracked.len()
            );
        }
    }

    fn save_keyframe_trajectory(&self, path: &Path) -> Result<()> {
        // Without a mapping backend there is no keyframe selection; every
        // tracked frame is reported.
        trajectory::write_tum(path, &self.tracked)
    }

    fn save_trajectory(&self, path: &Path) -> Result<()> {
        trajectory::write_tum(path, &self.tracked)
    }
}

impl Drop for RecordingEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SensorMode;
    use approx::assert_relative_eq;
    use std::fs;

    fn config_in(dir: &Path, settings_yaml: &str) -> EngineConfig {
        let vocabulary = dir.join("vocabulary.txt");
        let settings = dir.join("settings.yaml");
        fs::write(&vocabulary, "10 6 0 0\n").unwrap();
        fs::write(&settings, settings_yaml).unwrap();
        EngineConfig {
            vocabulary,
            settings,
            sensor: SensorMode::Monocular,
            use_viewer: false,
        }
    }

    #[test]
    fn test_initialize_requires_vocabulary_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "%YAML:1.0\n");
        config.vocabulary = dir.path().join("absent.txt");

        let err = RecordingEngine::initialize(&config).unwrap_err();
        assert!(err.to_string().contains("Vocabulary"));
    }

    #[test]
    fn test_initialize_reads_image_scale_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "%YAML:1.0\nCamera.imageScale: 0.5\n");

        let engine = RecordingEngine::initialize(&config).unwrap();
        assert_relative_eq!(engine.image_scale(), 0.5);
    }

    #[test]
    fn test_tracked_poses_round_trip_through_save() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "%YAML:1.0\n");
        let mut engine = RecordingEngine::initialize(&config).unwrap();

        let image = Mat::default();
        engine.track_monocular(&image, 0.0).unwrap();
        engine.track_monocular(&image, 0.5).unwrap();

        let out = dir.path().join("CameraTrajectory.txt");
        engine.save_trajectory(&out).unwrap();
        let read = trajectory::read_tum(&out).unwrap();

        assert_eq!(read.len(), 2);
        assert_relative_eq!(read[1].timestamp_s, 0.5);
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "%YAML:1.0\n");
        let mut engine = RecordingEngine::initialize(&config).unwrap();

        assert!(!engine.is_shut_down());
        engine.shutdown();
        engine.shutdown();
        assert!(engine.is_shut_down());
    }
}
