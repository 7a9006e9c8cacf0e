//! Half-point histogram of daily percent changes.

use serde::Serialize;

use crate::observation::DailyObservation;

/// Bucket width in percentage points.
pub const BUCKET_STEP: f64 = 0.5;
/// Largest absolute bucket center; tail moves collapse into the edge buckets.
pub const BUCKET_LIMIT: f64 = 2.5;
/// Number of buckets on the fixed grid (-2.5, -2.0, ..., +2.5).
pub const BUCKET_COUNT: usize = 11;

/// One bin of the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionBucket {
    /// Bin center in percent.
    pub center: f64,
    /// Observations that fell into the bin.
    pub count: usize,
}

/// Rounds a percent change to the bucket grid.
///
/// Ties go up (`1.25 -> 1.5`, `-1.25 -> -1.0`); the result is clamped to
/// `[-2.5, 2.5]`.
pub fn bucket_center(percent_change: f64) -> f64 {
    let rounded = (percent_change / BUCKET_STEP + 0.5).floor() * BUCKET_STEP;
    rounded.clamp(-BUCKET_LIMIT, BUCKET_LIMIT)
}

fn bucket_index(center: f64) -> usize {
    ((center + BUCKET_LIMIT) / BUCKET_STEP).round() as usize
}

/// Tallies observations into the full 11-bucket grid, ascending by center.
///
/// Empty buckets are included. Counts always sum to `observations.len()`.
pub fn bucketize(observations: &[DailyObservation]) -> Vec<DistributionBucket> {
    let mut counts = [0usize; BUCKET_COUNT];
    for obs in observations {
        counts[bucket_index(bucket_center(obs.percent_change()))] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| DistributionBucket {
            center: i as f64 * BUCKET_STEP - BUCKET_LIMIT,
            count,
        })
        .collect()
}
