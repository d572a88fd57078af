//! SLAM engine capability consumed by the replay harness.
//!
//! The engine is an external, stateful collaborator: the harness initializes
//! it, feeds it frames one at a time, and finally asks it to persist its
//! trajectories. Everything behind `track_monocular` (features, mapping,
//! loop closure, relocalization) is opaque. Keeping the surface behind a
//! trait also lets tests drive the harness with an engine that records calls
//! instead of tracking.

use std::path::{Path, PathBuf};

use anyhow::Result;
use opencv::core::Mat;

use crate::geometry::SE3;

pub mod recording;
pub mod settings;

pub use recording::RecordingEngine;

/// Sensor configuration the engine is brought up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorMode {
    Monocular,
    Stereo,
    RgbD,
}

/// Everything needed to initialize an engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub vocabulary: PathBuf,
    pub settings: PathBuf,
    pub sensor: SensorMode,
    /// Whether the engine should open its own viewer. The harness itself
    /// never renders anything.
    pub use_viewer: bool,
}

/// Capability surface of a visual-SLAM engine.
///
/// Implementations may run internal worker threads; `shutdown` must quiesce
/// them before returning. Implementations are expected to also invoke
/// `shutdown` from `Drop`, so an aborted replay still tears the engine down.
pub trait SlamEngine {
    /// Constant factor the engine wants applied to every incoming frame.
    fn image_scale(&self) -> f64;

    /// Feed one monocular frame with its capture timestamp in seconds;
    /// returns the estimated camera pose.
    fn track_monocular(&mut self, image: &Mat, timestamp_s: f64) -> Result<SE3>;

    /// Stop internal processing. Idempotent.
    fn shutdown(&mut self);

    /// Persist the keyframe-only trajectory.
    fn save_keyframe_trajectory(&self, path: &Path) -> Result<()>;

    /// Persist the full per-frame trajectory.
    fn save_trajectory(&self, path: &Path) -> Result<()>;
}
