//! Compare an estimated TUM trajectory against ground truth.
//!
//! Prints ATE (after scale-and-translation alignment) and frame-to-frame
//! RPE over the timestamp-associated pose pairs.

use std::process;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use mono_replay::eval::{self, DEFAULT_MAX_TIME_DIFF_S};
use mono_replay::io::trajectory::read_tum;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!(
            "Usage: {} estimate_file groundtruth_file [max_time_diff]",
            args[0]
        );
        process::exit(1);
    }
    let max_diff_s: f64 = match args.get(3) {
        Some(value) => value.parse().context("max_time_diff must be a number")?,
        None => DEFAULT_MAX_TIME_DIFF_S,
    };

    let estimate = read_tum(&args[1])?;
    let groundtruth = read_tum(&args[2])?;
    println!(
        "Estimate: {} poses, ground truth: {} poses",
        estimate.len(),
        groundtruth.len()
    );

    let pairs = eval::associate_by_timestamp(&estimate, &groundtruth, max_diff_s);
    println!(
        "Matched {} pose pairs (max_time_diff={}s)",
        pairs.len(),
        max_diff_s
    );

    match eval::absolute_trajectory_error(&pairs) {
        Some(ate) => {
            println!("ATE rmse: {:.4} m", ate.rmse_m);
            println!("ATE mean: {:.4} m", ate.mean_m);
            println!("ATE std:  {:.4} m", ate.std_m);
        }
        None => println!("ATE: not enough matched pairs"),
    }
    match eval::relative_pose_error(&pairs, 1) {
        Some(rpe) => {
            println!("RPE rmse: {:.4} m", rpe.rmse_m);
            println!("RPE mean: {:.4} m", rpe.mean_m);
            println!("RPE std:  {:.4} m", rpe.std_m);
        }
        None => println!("RPE: not enough matched pairs"),
    }
    Ok(())
}
