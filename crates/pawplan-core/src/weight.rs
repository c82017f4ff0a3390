//! Trailing-window z-score detection over weight samples.
//!
//! Stateless: every call recomputes the baseline from the full sample
//! set, so callers can re-run it after each new reading.

use crate::models::{WeightAnomaly, WeightSample};

/// Baseline size: most recent samples excluding the newest.
pub const DEFAULT_WINDOW: usize = 6;
/// Absolute z-score at or above which a reading is anomalous.
pub const DEFAULT_THRESHOLD: f64 = 2.5;
/// Floor for the standard deviation so a flat baseline cannot divide by zero.
const STD_EPSILON: f64 = 1e-6;

/// Analyze with the default window and threshold.
pub fn analyze(samples: &[WeightSample]) -> Option<WeightAnomaly> {
    analyze_with(samples, DEFAULT_WINDOW, DEFAULT_THRESHOLD)
}

/// Compare the newest sample against a baseline of the `window` samples
/// before it. Needs at least 3 samples, else `None`.
pub fn analyze_with(
    samples: &[WeightSample],
    window: usize,
    threshold: f64,
) -> Option<WeightAnomaly> {
    if samples.len() < 3 {
        return None;
    }

    let mut ordered: Vec<&WeightSample> = samples.iter().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));

    let latest = ordered[0].kilograms;
    let baseline: Vec<f64> = ordered
        .iter()
        .skip(1)
        .take(window)
        .map(|sample| sample.kilograms)
        .collect();

    if baseline.is_empty() {
        return None;
    }

    let count = baseline.len() as f64;
    let mean = baseline.iter().sum::<f64>() / count;
    let variance = baseline.iter().map(|kg| (kg - mean).powi(2)).sum::<f64>() / count;
    let std_dev = variance.sqrt().max(STD_EPSILON);
    let z_score = (latest - mean) / std_dev;

    Some(WeightAnomaly {
        is_anomalous: z_score.abs() >= threshold,
        z_score,
        mean,
        std_dev,
    })
}
