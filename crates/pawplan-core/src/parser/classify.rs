//! Keyword-based care-event kind classification.

use crate::models::EventKind;
use crate::vocab;

/// First-match-wins keyword classifier over lowercased input.
///
/// Vaccine keywords are checked before deworming, deworming before
/// medication, so "vacuna 500 mg" stays a vaccine. Grooming and weight
/// events are never inferred from text; they only appear as caller
/// defaults.
pub struct KindClassifier {
    /// Vaccine keywords, checked first
    vaccine: Vec<String>,
    /// Deworming keywords (stems allowed, matching is containment)
    deworming: Vec<String>,
    /// Medication signals, checked last
    medication: Vec<String>,
}

impl Default for KindClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl KindClassifier {
    /// Create a classifier with the default Spanish tables.
    pub fn new() -> Self {
        Self {
            vaccine: to_owned(vocab::VACCINE_KEYWORDS),
            deworming: to_owned(vocab::DEWORMING_KEYWORDS),
            medication: to_owned(vocab::MEDICATION_KEYWORDS),
        }
    }

    /// Detect a kind from keywords alone, `None` when nothing matched.
    pub fn detect(&self, text: &str) -> Option<EventKind> {
        let lower = text.to_lowercase();
        if contains_any(&lower, &self.vaccine) {
            return Some(EventKind::Vaccine);
        }
        if contains_any(&lower, &self.deworming) {
            return Some(EventKind::Deworming);
        }
        if contains_any(&lower, &self.medication) {
            return Some(EventKind::Medication);
        }
        None
    }

    /// Detect a kind, falling back to `default` when nothing matched.
    pub fn classify(&self, text: &str, default: EventKind) -> EventKind {
        self.detect(text).unwrap_or(default)
    }

    /// Add a custom vaccine keyword.
    pub fn add_vaccine_keyword(&mut self, word: &str) {
        self.vaccine.push(word.to_lowercase());
    }

    /// Add a custom deworming keyword.
    pub fn add_deworming_keyword(&mut self, word: &str) {
        self.deworming.push(word.to_lowercase());
    }

    /// Add a custom medication signal.
    pub fn add_medication_keyword(&mut self, word: &str) {
        self.medication.push(word.to_lowercase());
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn contains_any(lower: &str, words: &[String]) -> bool {
    words.iter().any(|word| lower.contains(word.as_str()))
}
