//! Offline trajectory evaluation against ground truth.
//!
//! Estimated and ground-truth trajectories rarely share timestamps, so pose
//! pairs are formed by nearest-timestamp association within a tolerance. ATE
//! is computed after a scale-and-translation alignment of the estimate onto
//! the ground truth (monocular trajectories carry no absolute scale); RPE
//! compares translation increments over a fixed frame delta and needs no
//! alignment.

use nalgebra::Vector3;

use crate::io::trajectory::TrajectoryPoint;

/// Default association tolerance between estimate and ground truth, seconds.
pub const DEFAULT_MAX_TIME_DIFF_S: f64 = 0.1;

/// Error statistics over a set of matched pose pairs.
#[derive(Debug, Clone, Copy)]
pub struct ErrorSummary {
    pub rmse_m: f64,
    pub mean_m: f64,
    pub std_m: f64,
    pub pairs: usize,
}

/// Pair each estimated position with the nearest ground-truth position
/// within `max_diff_s`. Estimates without a close ground-truth sample are
/// dropped.
pub fn associate_by_timestamp(
    estimate: &[TrajectoryPoint],
    groundtruth: &[TrajectoryPoint],
    max_diff_s: f64,
) -> Vec<(Vector3<f64>, Vector3<f64>)> {
    let mut pairs = Vec::new();
    for est in estimate {
        let nearest = groundtruth.iter().min_by(|a, b| {
            let da = (a.timestamp_s - est.timestamp_s).abs();
            let db = (b.timestamp_s - est.timestamp_s).abs();
            da.total_cmp(&db)
        });
        if let Some(gt) = nearest {
            if (gt.timestamp_s - est.timestamp_s).abs() < max_diff_s {
                pairs.push((est.pose.translation, gt.pose.translation));
            }
        }
    }
    pairs
}

/// Absolute trajectory error after scale-and-translation alignment of the
/// estimate onto the ground truth. `None` with fewer than three matched
/// pairs.
pub fn absolute_trajectory_error(pairs: &[(Vector3<f64>, Vector3<f64>)]) -> Option<ErrorSummary> {
    if pairs.len() < 3 {
        return None;
    }
    let n = pairs.len() as f64;

    let mut est_mean = Vector3::zeros();
    let mut gt_mean = Vector3::zeros();
    for (est, gt) in pairs {
        est_mean += *est;
        gt_mean += *gt;
    }
    est_mean /= n;
    gt_mean /= n;

    // Scale from the ratio of RMS spreads about the centroids.
    let mut est_spread = 0.0;
    let mut gt_spread = 0.0;
    for (est, gt) in pairs {
        est_spread += (*est - est_mean).norm_squared();
        gt_spread += (*gt - gt_mean).norm_squared();
    }
    let est_rms = (est_spread / n).sqrt();
    let gt_rms = (gt_spread / n).sqrt();
    let scale = if est_rms > 0.0 { gt_rms / est_rms } else { 1.0 };

    let translation = gt_mean - est_mean * scale;
    let errors: Vec<f64> = pairs
        .iter()
        .map(|(est, gt)| (*est * scale + translation - *gt).norm())
        .collect();
    Some(summarize_errors(&errors))
}

/// Relative pose error of translation increments over `delta` frames.
/// `None` with fewer than `delta + 1` matched pairs or a zero delta.
pub fn relative_pose_error(
    pairs: &[(Vector3<f64>, Vector3<f64>)],
    delta: usize,
) -> Option<ErrorSummary> {
    if delta == 0 || pairs.len() < delta + 1 {
        return None;
    }
    let errors: Vec<f64> = (0..pairs.len() - delta)
        .map(|i| {
            let est_rel = pairs[i + delta].0 - pairs[i].0;
            let gt_rel = pairs[i + delta].1 - pairs[i].1;
            (est_rel - gt_rel).norm()
        })
        .collect();
    Some(summarize_errors(&errors))
}

fn summarize_errors(errors: &[f64]) -> ErrorSummary {
    let n = errors.len() as f64;
    let mean = errors.iter().sum::<f64>() / n;
    let rmse = (errors.iter().map(|e| e * e).sum::<f64>() / n).sqrt();
    let variance = errors.iter().map(|e| (e - mean) * (e - mean)).sum::<f64>() / n;
    ErrorSummary {
        rmse_m: rmse,
        mean_m: mean,
        std_m: variance.sqrt(),
        pairs: errors.len(),
    }
}
