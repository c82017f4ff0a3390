//! Best-effort reading of prescription and product-label text.
//!
//! Input is usually OCR output: short lines, mixed casing, a product name
//! near the top, and scattered dosage/schedule/manufacturer fragments.
//! Nothing here fails; absent fields stay `None` and the confidence score
//! reflects how many signals were found.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::PrescriptionExtraction;
use crate::parser::{extract, temporal, KindClassifier};

static SLASH_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{2,4})\b").expect("valid regex"));

/// Weight of each found signal (kind, name, dosage, frequency, date).
const SIGNAL_WEIGHT: f64 = 0.25;

/// Read prescription text into an extraction with a confidence score.
///
/// Explicit dd/mm/yyyy dates win over relative phrases; relative phrases
/// resolve against `reference`.
pub fn extract_prescription(text: &str, reference: DateTime<Utc>) -> PrescriptionExtraction {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return PrescriptionExtraction::default();
    }

    let classifier = KindClassifier::new();
    let kind = classifier.detect(trimmed);
    let dosage = extract::extract_dosage(trimmed);
    let frequency = extract::extract_frequency(trimmed);
    let manufacturer = extract::extract_manufacturer(trimmed);
    let date = explicit_date(trimmed).or_else(|| temporal::resolve(trimmed, reference));
    let name = product_name(trimmed);

    let signals = [
        kind.is_some(),
        name.is_some(),
        dosage.is_some(),
        frequency.is_some(),
        date.is_some(),
    ]
    .iter()
    .filter(|found| **found)
    .count();

    PrescriptionExtraction {
        kind,
        name,
        dosage,
        frequency,
        manufacturer,
        date,
        confidence: (signals as f64 * SIGNAL_WEIGHT).min(1.0),
    }
}

/// First dd/mm/yyyy (or dd/mm/yy) date at midnight UTC.
fn explicit_date(text: &str) -> Option<DateTime<Utc>> {
    let caps = SLASH_DATE_PATTERN.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let mut year: i32 = caps[3].parse().ok()?;
    if year < 100 {
        year += if year > 50 { 1900 } else { 2000 };
    }
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// The product name: the dosage-bearing line when one exists, else the
/// first non-empty line, cut the same way quick-add names are.
fn product_name(text: &str) -> Option<String> {
    let mut candidates = Vec::new();
    if let Some(line) = text
        .lines()
        .map(str::trim)
        .find(|line| extract::extract_dosage(line).is_some())
    {
        candidates.push(line);
    }
    if let Some(line) = text.lines().map(str::trim).find(|line| !line.is_empty()) {
        candidates.push(line);
    }

    for line in candidates {
        let name = super::base_name(line);
        if !name.is_empty()
            && extract::extract_dosage(&name).is_none()
            && extract::extract_frequency(&name).is_none()
        {
            return Some(name);
        }
    }
    None
}
