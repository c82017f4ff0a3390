//! Care-event models produced by the parsers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The closed set of care-event categories.
///
/// Every switch over this enum is exhaustive, so adding a category is a
/// compile-time checklist of every place that must handle it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Medication,
    Vaccine,
    Deworming,
    Grooming,
    Weight,
}

impl EventKind {
    /// Stable string form used for persistence keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Medication => "medication",
            EventKind::Vaccine => "vaccine",
            EventKind::Deworming => "deworming",
            EventKind::Grooming => "grooming",
            EventKind::Weight => "weight",
        }
    }

    /// Parse the stable string form back into a kind.
    pub fn from_str(s: &str) -> Option<EventKind> {
        match s {
            "medication" => Some(EventKind::Medication),
            "vaccine" => Some(EventKind::Vaccine),
            "deworming" => Some(EventKind::Deworming),
            "grooming" => Some(EventKind::Grooming),
            "weight" => Some(EventKind::Weight),
            _ => None,
        }
    }

    /// Spanish display label.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Medication => "Medicación",
            EventKind::Vaccine => "Vacuna",
            EventKind::Deworming => "Desparasitación",
            EventKind::Grooming => "Higiene",
            EventKind::Weight => "Peso",
        }
    }

    /// Symbol name the app layer maps to an icon.
    pub fn symbol(&self) -> &'static str {
        match self {
            EventKind::Medication => "pills.fill",
            EventKind::Vaccine => "syringe.fill",
            EventKind::Deworming => "ladybug.fill",
            EventKind::Grooming => "scissors",
            EventKind::Weight => "scalemass.fill",
        }
    }
}

/// A suggested care event, not yet persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProposedEvent {
    /// Event category
    pub kind: EventKind,
    /// Display name, including any dose-position suffix
    pub full_name: String,
    /// Name without the dose-position suffix; `full_name` always starts with it
    pub base_name: String,
    /// Scheduled instant
    pub date: DateTime<Utc>,
    /// Dosage text (e.g., "500 mg")
    pub dosage: Option<String>,
    /// Canonical recurrence text (e.g., "cada 8 h")
    pub frequency: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Manufacturer, when a label introduced one
    pub manufacturer: Option<String>,
}

/// Outcome of a quick-add parse: zero or more events plus user-facing warnings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuickAddResult {
    /// Proposed events, in schedule order
    pub events: Vec<ProposedEvent>,
    /// Warnings in the user's language (e.g., empty input)
    pub warnings: Vec<String>,
}

/// Best-effort read of a prescription or label text.
///
/// Every field is optional; `confidence` grows with each signal found.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PrescriptionExtraction {
    /// Detected category, when any kind keyword matched
    pub kind: Option<EventKind>,
    /// Product or treatment name
    pub name: Option<String>,
    /// Dosage text (e.g., "2.5 ml")
    pub dosage: Option<String>,
    /// Canonical recurrence text
    pub frequency: Option<String>,
    /// Manufacturer, when a label introduced one
    pub manufacturer: Option<String>,
    /// Prescription date, explicit or relative to the reference
    pub date: Option<DateTime<Utc>>,
    /// Fraction of signals found (0.0 - 1.0)
    pub confidence: f64,
}
