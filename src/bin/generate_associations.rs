//! Build an association manifest from an image index CSV.
//!
//! The index carries `timestamp_ns,frame_name` rows (`#` comments allowed).
//! Each surviving row becomes a `<timestamp_s> <image_path>` manifest line;
//! rows whose image is missing on disk are skipped so the manifest only ever
//! names loadable frames.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!(
            "Usage: {} path_to_timestamps_csv path_to_image_dir output_file",
            args[0]
        );
        process::exit(1);
    }

    let entries = read_index(Path::new(&args[1]), Path::new(&args[2]))?;

    let out = File::create(&args[3]).with_context(|| format!("Failed to create {}", args[3]))?;
    let mut writer = BufWriter::new(out);
    for (timestamp_s, image_path) in &entries {
        writeln!(writer, "{:.6} {}", timestamp_s, image_path.display())?;
    }
    writer.flush()?;

    println!("Generated {} associations -> {}", entries.len(), args[3]);
    Ok(())
}

/// Read the image index and resolve each frame against `image_dir`.
/// Timestamps are nanoseconds in the index and seconds in the manifest.
fn read_index(csv_path: &Path, image_dir: &Path) -> Result<Vec<(f64, PathBuf)>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .from_path(csv_path)
        .with_context(|| format!("Failed to open {}", csv_path.display()))?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() < 2 {
            continue;
        }
        let timestamp_ns: f64 = match record[0].trim().parse() {
            Ok(ts) => ts,
            Err(_) => continue,
        };
        let image_path = image_dir.join(record[1].trim());
        if !image_path.is_file() {
            warn!("skipping missing image {}", image_path.display());
            continue;
        }
        entries.push((timestamp_ns / 1e9, image_path));
    }
    Ok(entries)
}
