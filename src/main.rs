use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use mono_replay::engine::{EngineConfig, RecordingEngine, SensorMode, SlamEngine};
use mono_replay::io::association::load_associations;
use mono_replay::replay::stats::latency_summary;
use mono_replay::replay::{self, CAMERA_TRAJECTORY_FILE, KEYFRAME_TRAJECTORY_FILE};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!(
            "Usage: {} path_to_vocabulary path_to_settings path_to_associations",
            args[0]
        );
        process::exit(1);
    }

    let entries = load_associations(&args[3])?;
    if entries.is_empty() {
        eprintln!("ERROR: No images found in association file.");
        process::exit(1);
    }

    println!("-------");
    println!("Images in sequence: {}", entries.len());
    println!("-------");

    let config = EngineConfig {
        vocabulary: PathBuf::from(&args[1]),
        settings: PathBuf::from(&args[2]),
        sensor: SensorMode::Monocular,
        use_viewer: false,
    };
    let mut engine = RecordingEngine::initialize(&config)?;

    let track_times = replay::replay_sequence(&mut engine, &entries)?;

    engine.shutdown();

    if let Some(summary) = latency_summary(&track_times) {
        println!("-------");
        println!("median tracking time: {:.6}", summary.median_s);
        println!("mean tracking time: {:.6}", summary.mean_s);
    }

    // The write outcome is the engine's to report; a failed save does not
    // fail the replay.
    if let Err(err) = engine.save_keyframe_trajectory(Path::new(KEYFRAME_TRAJECTORY_FILE)) {
        warn!("failed to save keyframe trajectory: {:#}", err);
    }
    if let Err(err) = engine.save_trajectory(Path::new(CAMERA_TRAJECTORY_FILE)) {
        warn!("failed to save camera trajectory: {:#}", err);
    }

    Ok(())
}
