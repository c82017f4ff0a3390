//! Series expansion from a single anchor event.
//!
//! Vaccines follow per-name rules (primary offsets + booster months),
//! recovered by normalized and then fuzzy lookup. Medications step by an
//! hour interval. Everything else stays a single event; stepped
//! suggestions for those kinds come from [`suggest_dates`].

use std::collections::HashMap;

use chrono::{DateTime, Days, Duration, Months, Utc};
use strsim::{jaro_winkler, normalized_levenshtein};

use crate::models::{DatedSuggestion, EventKind, ProposedEvent, ScheduleStep, SeriesRule};
use crate::schedule::grouper::normalize_key;
use crate::schedule::rules;
use crate::vocab;

/// Minimum combined similarity for a fuzzy rule lookup to count.
const FUZZY_RULE_THRESHOLD: f64 = 0.90;

/// Inputs for one series recommendation.
#[derive(Debug, Clone)]
pub struct SeriesRequest {
    /// Event category; selects the expansion path
    pub kind: EventKind,
    /// Treatment name as the user wrote it
    pub base_name: String,
    /// Anchor date of the first dose
    pub start: DateTime<Utc>,
    /// Dosage copied onto every emitted event
    pub dosage: Option<String>,
    /// Hours between medication doses, when the caller knows it
    pub hours_interval: Option<u32>,
    /// Explicit number of medication doses
    pub total_doses: Option<u32>,
}

impl SeriesRequest {
    /// Create a request with the required fields.
    pub fn new(kind: EventKind, base_name: String, start: DateTime<Utc>) -> Self {
        Self {
            kind,
            base_name,
            start,
            dosage: None,
            hours_interval: None,
            total_doses: None,
        }
    }
}

/// Recommender over the built-in (plus any custom) rule tables.
pub struct ScheduleRecommender {
    /// Vaccine rules keyed by normalized name
    vaccine_rules: HashMap<String, SeriesRule>,
    /// Per-drug dose intervals in hours, keyed by normalized name
    medication_intervals: HashMap<String, u32>,
}

impl Default for ScheduleRecommender {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleRecommender {
    /// Create a recommender with the default rule tables.
    pub fn new() -> Self {
        Self {
            vaccine_rules: rules::default_vaccine_rules(),
            medication_intervals: rules::default_medication_intervals(),
        }
    }

    /// Add or replace a vaccine rule.
    pub fn add_vaccine_rule(&mut self, name: &str, rule: SeriesRule) {
        self.vaccine_rules.insert(normalize_key(name), rule);
    }

    /// Add or replace a per-drug dose interval.
    pub fn add_medication_interval(&mut self, name: &str, hours: u32) {
        self.medication_intervals.insert(normalize_key(name), hours);
    }

    /// Expand a request into a full series of proposed events.
    pub fn recommend(&self, request: &SeriesRequest) -> Vec<ProposedEvent> {
        match request.kind {
            EventKind::Vaccine => self.recommend_vaccine(request),
            EventKind::Medication => self.recommend_medication(request),
            EventKind::Deworming | EventKind::Grooming | EventKind::Weight => {
                vec![self.single_event(request)]
            }
        }
    }

    /// Convenience wrapper for the vaccine path.
    pub fn recommend_vaccine_series(
        &self,
        base_name: &str,
        start: DateTime<Utc>,
    ) -> Vec<ProposedEvent> {
        self.recommend(&SeriesRequest::new(
            EventKind::Vaccine,
            base_name.into(),
            start,
        ))
    }

    fn recommend_vaccine(&self, request: &SeriesRequest) -> Vec<ProposedEvent> {
        let key = normalize_key(&request.base_name);
        let rule = self
            .vaccine_rules
            .get(&key)
            .or_else(|| self.fuzzy_rule(&key))
            .filter(|rule| rule.is_valid());

        let Some(rule) = rule else {
            return vec![self.single_event(request)];
        };

        let base = request.base_name.trim();
        let total = rule.dose_count();
        let mut events = Vec::with_capacity(rule.offsets_days.len() + 1);
        let mut last_date = request.start;

        for (index, offset) in rule.offsets_days.iter().enumerate() {
            let date = request
                .start
                .checked_add_days(Days::new(*offset as u64))
                .unwrap_or(last_date);
            events.push(ProposedEvent {
                kind: request.kind,
                full_name: format!("{}{}", base, vocab::dose_suffix(index as u32 + 1, total)),
                base_name: base.to_string(),
                date,
                dosage: request.dosage.clone(),
                frequency: None,
                notes: None,
                manufacturer: None,
            });
            last_date = date;
        }

        if let Some(months) = rule.booster_months {
            let date = last_date
                .checked_add_months(Months::new(months))
                .unwrap_or(last_date);
            events.push(ProposedEvent {
                kind: request.kind,
                full_name: base.to_string(),
                base_name: base.to_string(),
                date,
                dosage: request.dosage.clone(),
                frequency: None,
                notes: Some(vocab::BOOSTER_NOTE.into()),
                manufacturer: None,
            });
        }

        events
    }

    fn recommend_medication(&self, request: &SeriesRequest) -> Vec<ProposedEvent> {
        let interval = request
            .hours_interval
            .or_else(|| {
                self.medication_intervals
                    .get(&normalize_key(&request.base_name))
                    .copied()
            })
            .unwrap_or(rules::DEFAULT_MED_INTERVAL_HOURS)
            .max(1);

        // An explicit interval spreads doses over the treatment window;
        // otherwise the fixed default count applies.
        let total = request
            .total_doses
            .or_else(|| {
                request
                    .hours_interval
                    .map(|hours| (rules::TREATMENT_WINDOW_HOURS / hours.max(1)).max(1))
            })
            .unwrap_or(rules::DEFAULT_DOSE_COUNT)
            .max(1);

        let base = request.base_name.trim();
        let frequency = format!("{} {} h", vocab::FREQUENCY_TRIGGER, interval);
        let mut events = Vec::with_capacity(total as usize);
        let mut last_date = request.start;

        for index in 0..total {
            let date = request
                .start
                .checked_add_signed(Duration::hours(index as i64 * interval as i64))
                .unwrap_or(last_date);
            let full_name = if total > 1 {
                format!("{}{}", base, vocab::dose_suffix(index + 1, total))
            } else {
                base.to_string()
            };
            events.push(ProposedEvent {
                kind: request.kind,
                full_name,
                base_name: base.to_string(),
                date,
                dosage: request.dosage.clone(),
                frequency: Some(frequency.clone()),
                notes: None,
                manufacturer: None,
            });
            last_date = date;
        }

        events
    }

    fn single_event(&self, request: &SeriesRequest) -> ProposedEvent {
        let base = request.base_name.trim().to_string();
        ProposedEvent {
            kind: request.kind,
            full_name: base.clone(),
            base_name: base,
            date: request.start,
            dosage: request.dosage.clone(),
            frequency: None,
            notes: None,
            manufacturer: None,
        }
    }

    /// Best fuzzy rule match at or above the threshold.
    fn fuzzy_rule(&self, key: &str) -> Option<&SeriesRule> {
        self.vaccine_rules
            .iter()
            .map(|(name, rule)| (fuzzy_match(key, name), rule))
            .filter(|(score, _)| *score >= FUZZY_RULE_THRESHOLD)
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, rule)| rule)
    }
}

/// Stepped bare dates for non-ruled treatments.
pub fn suggest_dates(start: DateTime<Utc>, step: ScheduleStep, count: u32) -> Vec<DatedSuggestion> {
    let mut suggestions = Vec::with_capacity(count as usize);
    let mut last_date = start;

    for index in 0..count {
        let date = match step {
            ScheduleStep::Hours(hours) => {
                start.checked_add_signed(Duration::hours(index as i64 * hours as i64))
            }
            ScheduleStep::Days(days) => {
                start.checked_add_days(Days::new(index as u64 * days as u64))
            }
        }
        .unwrap_or(last_date);
        suggestions.push(DatedSuggestion { date });
        last_date = date;
    }

    suggestions
}

/// Combined similarity: Jaro-Winkler favors shared prefixes, Levenshtein
/// the overall shape.
fn fuzzy_match(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}
