//! Paced replay of an association sequence through a SLAM engine.
//!
//! One pass, in manifest order, one frame at a time: load, rescale to the
//! engine's image scale, dispatch with wall-clock timing, then sleep out the
//! remainder of the original inter-frame gap. Pacing is best effort: each
//! delay is computed from the two adjacent timestamps alone, with no
//! compensation for drift accumulated across frames.

pub mod stats;

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::info;

use crate::engine::SlamEngine;
use crate::io::association::AssociationEntry;
use crate::io::frames;

/// Fixed output filename for the keyframe-only trajectory.
pub const KEYFRAME_TRAJECTORY_FILE: &str = "KeyFrameTrajectory.txt";
/// Fixed output filename for the full per-frame trajectory.
pub const CAMERA_TRAJECTORY_FILE: &str = "CameraTrajectory.txt";

/// Target inter-frame delay in seconds for the frame at `index`: the gap to
/// the next entry, the previous gap for the final entry, zero for a
/// single-entry sequence.
pub fn target_frame_delay(entries: &[AssociationEntry], index: usize) -> f64 {
    if index + 1 < entries.len() {
        entries[index + 1].timestamp_s - entries[index].timestamp_s
    } else if index > 0 {
        entries[index].timestamp_s - entries[index - 1].timestamp_s
    } else {
        0.0
    }
}

/// Drive every entry through the engine exactly once, in order, and return
/// the per-frame tracking durations in seconds, indexed by frame position.
///
/// A frame that fails to load aborts the whole run; frames already
/// dispatched stay with the engine.
pub fn replay_sequence<E: SlamEngine>(
    engine: &mut E,
    entries: &[AssociationEntry],
) -> Result<Vec<f64>> {
    let image_scale = engine.image_scale();
    let mut track_times = vec![0.0; entries.len()];

    for (index, entry) in entries.iter().enumerate() {
        let image = frames::load_image(&entry.image_path)?;
        let image = frames::rescale(image, image_scale)?;

        let started = Instant::now();
        engine.track_monocular(&image, entry.timestamp_s)?;
        let elapsed_s = started.elapsed().as_secs_f64();
        track_times[index] = elapsed_s;

        if index % 100 == 0 {
            info!("processed frame {}/{}", index, entries.len());
        }

        let target_s = target_frame_delay(entries, index);
        if elapsed_s < target_s {
            thread::sleep(Duration::from_secs_f64(target_s - elapsed_s));
        }
    }

    Ok(track_times)
}
