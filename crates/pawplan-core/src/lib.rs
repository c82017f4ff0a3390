//! Pawplan Core Library
//!
//! Natural-language care-event interpretation and recurring-schedule
//! planning for pet care.
//!
//! # Architecture
//!
//! ```text
//! Free text / OCR text
//!         │
//!         ▼
//! Kind Classifier + Temporal Resolver + Entity Extractors
//!         │
//!         ▼
//!   Quick-Add Parser ──► proposed event(s)
//!                              │
//!                              ▼
//!                    Schedule Recommender ──► dose series + booster
//!
//! Persisted events ──► Dose-Series Grouper (suffix ⇄ base name)
//! Weight samples   ──► Anomaly Detector (trailing-window z-score)
//! ```
//!
//! # Core Principle
//!
//! **Malformed input never errors.** Empty text yields a warning and zero
//! events; anything else degrades to lower-confidence or partially
//! populated results.
//!
//! # Modules
//!
//! - [`models`]: Domain types (EventKind, ProposedEvent, SeriesRule, etc.)
//! - [`parser`]: Kind classifier, temporal resolver, entity extractors,
//!   quick-add and prescription parsing
//! - [`schedule`]: Dose-series grouping and rule-driven recommendation
//! - [`vocab`]: Spanish keyword, unit, and message tables
//! - [`weight`]: Trailing-window z-score anomaly detection

pub mod models;
pub mod parser;
pub mod schedule;
pub mod vocab;
pub mod weight;

// Re-export commonly used types
pub use models::{
    DatedSuggestion, EventKind, PrescriptionExtraction, ProposedEvent, QuickAddResult,
    ScheduleStep, SeriesRule, WeightAnomaly, WeightSample,
};
pub use parser::{extract_prescription, KindClassifier, QuickAddParser};
pub use schedule::{
    default_step, series_key, split_dose_base, suggest_dates, ScheduleRecommender, SeriesRequest,
};
