//! Tracking-latency statistics.

/// Median and mean of the recorded per-frame tracking durations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySummary {
    pub median_s: f64,
    pub mean_s: f64,
}

/// Summarize per-frame durations. The median is the upper-middle element of
/// the ascending sort (index `n / 2`), not an averaged median. Returns
/// `None` for an empty recording.
pub fn latency_summary(times_s: &[f64]) -> Option<LatencySummary> {
    if times_s.is_empty() {
        return None;
    }
    let mut sorted = times_s.to_vec();
    sorted.sort_by(f64::total_cmp);
    let median_s = sorted[sorted.len() / 2];
    let mean_s = sorted.iter().sum::<f64>() / sorted.len() as f64;
    Some(LatencySummary { median_s, mean_s })
}
