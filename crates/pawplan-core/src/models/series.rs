//! Schedule rule and suggestion models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A vaccine series rule: primary course offsets plus an annual-style booster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesRule {
    /// Days after the start date for each primary dose; first entry is 0
    pub offsets_days: Vec<u32>,
    /// Months after the last primary dose for the booster, if any
    pub booster_months: Option<u32>,
}

impl SeriesRule {
    /// Create a rule from primary offsets and an optional booster gap.
    pub fn new(offsets_days: Vec<u32>, booster_months: Option<u32>) -> Self {
        Self {
            offsets_days,
            booster_months,
        }
    }

    /// A rule is usable when its offsets are non-empty, start at zero, and
    /// strictly increase.
    pub fn is_valid(&self) -> bool {
        if self.offsets_days.first() != Some(&0) {
            return false;
        }
        self.offsets_days.windows(2).all(|w| w[0] < w[1])
    }

    /// Number of primary doses.
    pub fn dose_count(&self) -> u32 {
        self.offsets_days.len() as u32
    }
}

/// Interval between suggested dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStep {
    /// Fixed number of hours between entries
    Hours(u32),
    /// Calendar days between entries
    Days(u32),
}

/// A bare stepped timestamp from the non-ruled recommender path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DatedSuggestion {
    /// Suggested instant
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_validity() {
        assert!(SeriesRule::new(vec![0, 21, 42], Some(12)).is_valid());
        assert!(SeriesRule::new(vec![0], None).is_valid());

        // Must start at zero
        assert!(!SeriesRule::new(vec![21, 42], Some(12)).is_valid());
        // Must be strictly increasing
        assert!(!SeriesRule::new(vec![0, 21, 21], None).is_valid());
        // Must be non-empty
        assert!(!SeriesRule::new(vec![], Some(12)).is_valid());
    }

    #[test]
    fn test_dose_count() {
        assert_eq!(SeriesRule::new(vec![0, 21, 42], Some(12)).dose_count(), 3);
        assert_eq!(SeriesRule::new(vec![0], None).dose_count(), 1);
    }
}
