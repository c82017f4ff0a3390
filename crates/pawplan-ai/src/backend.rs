//! Advanced backend contract and reply parsing.
//!
//! A backend is any strategy object that can answer the two inference
//! operations better than the heuristics. Its replies arrive as model
//! text; the parsers here carve out the JSON and degrade malformed
//! fields instead of failing the whole reply.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pawplan_core::models::{EventKind, PrescriptionExtraction, ProposedEvent, QuickAddResult};
use pawplan_core::schedule::split_dose_base;

/// Backend errors.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("advanced backend unavailable")]
    Unavailable,

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("invalid reply format: {0}")]
    InvalidFormat(String),

    #[error("backend failure: {0}")]
    Failed(#[from] anyhow::Error),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Strategy object tried before the heuristic parsers.
pub trait SmartBackend: Send + Sync {
    /// Parse a short care note into proposed events.
    fn parse_quick_add(
        &self,
        text: &str,
        reference: DateTime<Utc>,
    ) -> BackendResult<QuickAddResult>;

    /// Read a prescription or label text.
    fn extract_prescription(
        &self,
        text: &str,
        reference: DateTime<Utc>,
    ) -> BackendResult<PrescriptionExtraction>;
}

/// Stand-in for a backend that is not wired up on this platform.
pub struct UnavailableBackend;

impl SmartBackend for UnavailableBackend {
    fn parse_quick_add(
        &self,
        _text: &str,
        _reference: DateTime<Utc>,
    ) -> BackendResult<QuickAddResult> {
        Err(BackendError::Unavailable)
    }

    fn extract_prescription(
        &self,
        _text: &str,
        _reference: DateTime<Utc>,
    ) -> BackendResult<PrescriptionExtraction> {
        Err(BackendError::Unavailable)
    }
}

/// Raw quick-add reply as a model emits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickAddReply {
    #[serde(default)]
    pub events: Vec<EventReply>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// A single event in a model reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventReply {
    pub kind: String,
    pub full_name: String,
    pub date: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
}

/// Raw prescription reply as a model emits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionReply {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Parse a model reply into a quick-add result.
pub fn parse_quick_add_reply(
    reply: &str,
    reference: DateTime<Utc>,
) -> BackendResult<QuickAddResult> {
    let parsed: QuickAddReply = serde_json::from_str(json_slice(reply)?)?;
    Ok(to_quick_add_result(&parsed, reference))
}

/// Parse a model reply into a prescription extraction.
pub fn parse_prescription_reply(reply: &str) -> BackendResult<PrescriptionExtraction> {
    let parsed: PrescriptionReply = serde_json::from_str(json_slice(reply)?)?;
    Ok(to_prescription_extraction(&parsed))
}

/// Convert a raw reply into core events. Unknown kinds and unreadable
/// dates degrade the same way the heuristic parser defaults them.
pub fn to_quick_add_result(reply: &QuickAddReply, reference: DateTime<Utc>) -> QuickAddResult {
    let events = reply
        .events
        .iter()
        .map(|event| {
            let full_name = event.full_name.trim().to_string();
            ProposedEvent {
                kind: EventKind::from_str(&event.kind).unwrap_or(EventKind::Medication),
                base_name: split_dose_base(&full_name).to_string(),
                date: parse_instant(&event.date).unwrap_or(reference + Duration::hours(1)),
                dosage: event.dosage.clone(),
                frequency: event.frequency.clone(),
                notes: event.notes.clone(),
                manufacturer: event.manufacturer.clone(),
                full_name,
            }
        })
        .collect();

    QuickAddResult {
        events,
        warnings: reply.warnings.clone(),
    }
}

/// Convert a raw prescription reply, clamping confidence into [0,1].
pub fn to_prescription_extraction(reply: &PrescriptionReply) -> PrescriptionExtraction {
    PrescriptionExtraction {
        kind: reply.kind.as_deref().and_then(EventKind::from_str),
        name: reply
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from),
        dosage: reply.dosage.clone(),
        frequency: reply.frequency.clone(),
        manufacturer: reply.manufacturer.clone(),
        date: reply.date.as_deref().and_then(parse_instant),
        confidence: reply.confidence.unwrap_or(0.0).clamp(0.0, 1.0),
    }
}

/// The JSON object inside a reply that may carry extra prose around it.
fn json_slice(reply: &str) -> BackendResult<&str> {
    let start = reply
        .find('{')
        .ok_or_else(|| BackendError::InvalidFormat("no JSON object found in reply".into()))?;
    let end = reply
        .rfind('}')
        .ok_or_else(|| BackendError::InvalidFormat("no closing brace found in reply".into()))?;

    if end < start {
        return Err(BackendError::InvalidFormat(
            "closing brace precedes opening brace".into(),
        ));
    }

    Ok(&reply[start..=end])
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|date| date.with_timezone(&Utc))
}
