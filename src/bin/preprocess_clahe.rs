//! Contrast-limited adaptive histogram equalization over a sequence.
//!
//! Low-contrast sequences (underwater, poorly lit) track badly; equalizing
//! the images before replay is the usual mitigation. Every image in the
//! input directory is read as grayscale, equalized, and written under the
//! same name into the output directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use opencv::core::{Mat, Size, Vector};
use opencv::prelude::*;
use opencv::{imgcodecs, imgcodecs::IMREAD_GRAYSCALE, imgproc};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEFAULT_CLIP_LIMIT: f64 = 2.0;
const DEFAULT_TILE_SIZE: i32 = 8;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 5 {
        eprintln!(
            "Usage: {} input_dir output_dir [clip_limit] [tile_size]",
            args[0]
        );
        process::exit(1);
    }
    let clip_limit: f64 = match args.get(3) {
        Some(value) => value.parse().context("clip_limit must be a number")?,
        None => DEFAULT_CLIP_LIMIT,
    };
    let tile_size: i32 = match args.get(4) {
        Some(value) => value.parse().context("tile_size must be an integer")?,
        None => DEFAULT_TILE_SIZE,
    };

    let input_dir = Path::new(&args[1]);
    let output_dir = Path::new(&args[2]);
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let images = list_images(input_dir)?;
    if images.is_empty() {
        eprintln!("ERROR: No images found in {}", input_dir.display());
        process::exit(1);
    }

    println!(
        "Processing {} images (clip_limit={}, tile_size={}x{})",
        images.len(),
        clip_limit,
        tile_size,
        tile_size
    );

    let mut clahe = imgproc::create_clahe(clip_limit, Size::new(tile_size, tile_size))?;
    let mut processed = 0usize;
    for path in &images {
        let path_str = path
            .to_str()
            .with_context(|| format!("Image path is not valid UTF-8: {}", path.display()))?;
        let image = imgcodecs::imread(path_str, IMREAD_GRAYSCALE)?;
        if image.empty() {
            warn!("could not read {}", path.display());
            continue;
        }
        let mut enhanced = Mat::default();
        clahe.apply(&image, &mut enhanced)?;

        let file_name = path
            .file_name()
            .with_context(|| format!("Image path has no file name: {}", path.display()))?;
        let out_path = output_dir.join(file_name);
        let out_str = out_path
            .to_str()
            .with_context(|| format!("Output path is not valid UTF-8: {}", out_path.display()))?;
        imgcodecs::imwrite(out_str, &enhanced, &Vector::new())?;
        processed += 1;
    }

    println!(
        "Processed {}/{} images -> {}",
        processed,
        images.len(),
        output_dir.display()
    );
    Ok(())
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?
    {
        let path = entry?.path();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        if matches!(ext.as_deref(), Some("png" | "jpg" | "jpeg")) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}
