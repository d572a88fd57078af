use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

/// One line of an association manifest: a capture timestamp in seconds and
/// the image path recorded for it. Entries are immutable once parsed and
/// keep their file order; the sequence is never re-sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationEntry {
    pub timestamp_s: f64,
    pub image_path: String,
}

/// Load an association manifest: one `<timestamp> <image_path>` entry per
/// line, fields separated by whitespace. Lines that are empty or start with
/// `#` are ignored.
///
/// The scan is lenient: a line missing its image path, or whose timestamp
/// does not parse, contributes nothing. Timestamps that parse are accepted
/// as-is, including negative ones.
pub fn load_associations<P: AsRef<Path>>(path: P) -> Result<Vec<AssociationEntry>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open association file {}", path.display()))?;

    let mut entries = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let timestamp = fields.next().and_then(|field| field.parse::<f64>().ok());
        let image_path = fields.next();
        // TODO: decide whether a line with a readable path but an unparsable
        // timestamp should be reported instead of silently dropped.
        if let (Some(timestamp_s), Some(image_path)) = (timestamp, image_path) {
            entries.push(AssociationEntry {
                timestamp_s,
                image_path: image_path.to_string(),
            });
        }
    }
    Ok(entries)
}
