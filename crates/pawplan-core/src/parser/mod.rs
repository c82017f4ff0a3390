//! Quick-add interpreter for free-form Spanish care notes.
//!
//! Pipeline: Kind Classification → Temporal Resolution → Entity Extraction → Base Name

pub mod classify;
pub mod extract;
pub mod prescription;
pub mod temporal;

pub use classify::KindClassifier;
pub use prescription::extract_prescription;

use chrono::{DateTime, Duration, Utc};

use crate::models::{EventKind, ProposedEvent, QuickAddResult};
use crate::vocab;

/// Parser that turns one line of text into a proposed care event.
pub struct QuickAddParser {
    classifier: KindClassifier,
}

impl Default for QuickAddParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QuickAddParser {
    /// Create a parser with the default vocabulary.
    pub fn new() -> Self {
        Self {
            classifier: KindClassifier::new(),
        }
    }

    /// Create a parser around a customized classifier.
    pub fn with_classifier(classifier: KindClassifier) -> Self {
        Self { classifier }
    }

    /// Parse free-form text into at most one proposed event.
    ///
    /// Empty or whitespace input yields no events and a warning instead of
    /// an error. When no temporal phrase is found, the event defaults to
    /// one hour after `reference`.
    pub fn parse(
        &self,
        text: &str,
        default_kind: Option<EventKind>,
        reference: DateTime<Utc>,
    ) -> QuickAddResult {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return QuickAddResult {
                events: Vec::new(),
                warnings: vec![vocab::EMPTY_INPUT_WARNING.into()],
            };
        }

        let kind = self
            .classifier
            .classify(trimmed, default_kind.unwrap_or(EventKind::Medication));

        let date = temporal::resolve(trimmed, reference)
            .unwrap_or_else(|| reference + Duration::hours(1));

        let dosage = extract::extract_dosage(trimmed);
        let frequency = extract::extract_frequency(trimmed);
        let manufacturer = extract::extract_manufacturer(trimmed);
        let base_name = base_name(trimmed);

        QuickAddResult {
            events: vec![ProposedEvent {
                kind,
                full_name: base_name.clone(),
                base_name,
                date,
                dosage,
                frequency,
                notes: None,
                manufacturer,
            }],
            warnings: Vec::new(),
        }
    }

    /// Access the classifier for vocabulary customization.
    pub fn classifier_mut(&mut self) -> &mut KindClassifier {
        &mut self.classifier
    }
}

/// Cut the event name at the earliest dosage, recurrence, temporal, or
/// separator marker. Falls back to the whole trimmed input when the cut
/// would leave nothing.
fn base_name(trimmed: &str) -> String {
    let lower = trimmed.to_lowercase();

    let cut = [
        extract::dosage_position(&lower),
        lower.find("dosis"),
        extract::frequency_position(&lower),
        temporal::time_position(&lower),
        temporal::offset_position(&lower),
        temporal::weekday_position(&lower),
        temporal::day_word_position(&lower),
        lower.find("en "),
        lower.find(','),
    ]
    .into_iter()
    .flatten()
    .min();

    if let Some(idx) = cut {
        if idx > 0 && trimmed.is_char_boundary(idx) {
            let head = strip_trailing_connectives(trimmed[..idx].trim());
            if !head.is_empty() {
                return head.to_string();
            }
        }
    }

    trimmed.to_string()
}

fn strip_trailing_connectives(mut head: &str) -> &str {
    while let Some((rest, last)) = head.rsplit_once(' ') {
        let lowered = last.to_lowercase();
        if vocab::TRAILING_CONNECTIVES.contains(&lowered.as_str()) {
            head = rest.trim_end();
        } else {
            break;
        }
    }
    head
}
