//! Weight tracking models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded weight measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightSample {
    /// When the weight was recorded
    pub date: DateTime<Utc>,
    /// Weight in kilograms
    pub kilograms: f64,
}

impl WeightSample {
    /// Create a sample.
    pub fn new(date: DateTime<Utc>, kilograms: f64) -> Self {
        Self { date, kilograms }
    }
}

/// Verdict on the most recent weight against its trailing baseline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightAnomaly {
    /// Whether |z| crossed the anomaly threshold
    pub is_anomalous: bool,
    /// Signed z-score of the latest sample
    pub z_score: f64,
    /// Baseline mean in kilograms
    pub mean: f64,
    /// Baseline population standard deviation, floored to stay non-zero
    pub std_dev: f64,
}
