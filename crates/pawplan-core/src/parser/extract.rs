//! Dosage, frequency, and manufacturer extraction.
//!
//! Each extractor returns the first match in canonical form:
//! - dosage: `"500 mg"`, comma decimals normalized to dots
//! - frequency: `"cada 8 h"` / `"cada día"` / `"cada 2 semanas"` / `"cada mes"`
//! - manufacturer: the text after a label such as "Laboratorio:"

use once_cell::sync::Lazy;
use regex::Regex;

use crate::vocab;

static DOSAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let units = vocab::DOSE_UNITS.join("|");
    Regex::new(&format!(r"(\d+(?:[.,]\d+)?)\s*({units})\b")).expect("valid regex")
});

static FREQUENCY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"{}\s+(?:(\d+)\s*)?(h\b|horas?\b|d[ií]as?\b|semanas?\b|mes(?:es)?\b)",
        vocab::FREQUENCY_TRIGGER
    ))
    .expect("valid regex")
});

static MANUFACTURER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let labels = vocab::MANUFACTURER_LABELS.join("|");
    Regex::new(&format!(r"(?i)\b(?:{labels})s?\s*(?::\s*|\s+)([^\n,;]+)")).expect("valid regex")
});

/// First dosage mention as "value unit", or `None`.
pub fn extract_dosage(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let caps = DOSAGE_PATTERN.captures(&lower)?;
    let value = caps[1].replace(',', ".");
    Some(format!("{} {}", value, &caps[2]))
}

/// First recurrence mention in canonical form, or `None`.
pub fn extract_frequency(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let caps = FREQUENCY_PATTERN.captures(&lower)?;
    let count: u32 = match caps.get(1) {
        Some(n) => n.as_str().parse().ok()?,
        None => 1,
    };
    Some(canonical_frequency(count, &caps[2]))
}

/// Manufacturer text after a label, original casing preserved.
pub fn extract_manufacturer(text: &str) -> Option<String> {
    let caps = MANUFACTURER_PATTERN.captures(text)?;
    let value = caps[1].trim();
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

/// Byte offset of the first dosage mention in pre-lowercased text.
pub(crate) fn dosage_position(lower: &str) -> Option<usize> {
    DOSAGE_PATTERN.find(lower).map(|m| m.start())
}

/// Byte offset of the first recurrence mention in pre-lowercased text.
pub(crate) fn frequency_position(lower: &str) -> Option<usize> {
    FREQUENCY_PATTERN.find(lower).map(|m| m.start())
}

fn canonical_frequency(count: u32, unit: &str) -> String {
    let trigger = vocab::FREQUENCY_TRIGGER;
    if unit.starts_with('h') {
        format!("{} {} h", trigger, count)
    } else if unit.starts_with('d') {
        if count == 1 {
            format!("{} día", trigger)
        } else {
            format!("{} {} días", trigger, count)
        }
    } else if unit.starts_with('s') {
        if count == 1 {
            format!("{} semana", trigger)
        } else {
            format!("{} {} semanas", trigger, count)
        }
    } else if count == 1 {
        format!("{} mes", trigger)
    } else {
        format!("{} {} meses", trigger, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dosage_basic() {
        assert_eq!(
            extract_dosage("amoxicilina 500 mg cada 8 horas"),
            Some("500 mg".into())
        );
    }

    #[test]
    fn test_dosage_attached_unit() {
        assert_eq!(extract_dosage("tomar 10mg"), Some("10 mg".into()));
    }

    #[test]
    fn test_dosage_comma_decimal() {
        assert_eq!(extract_dosage("jarabe 2,5 ml"), Some("2.5 ml".into()));
    }

    #[test]
    fn test_dosage_prefers_longer_unit() {
        assert_eq!(extract_dosage("500 mcg diarios"), Some("500 mcg".into()));
    }

    #[test]
    fn test_dosage_uppercase_input() {
        assert_eq!(extract_dosage("AMOXICILINA 500 MG"), Some("500 mg".into()));
    }

    #[test]
    fn test_dosage_none() {
        assert_eq!(extract_dosage("vacuna rabia mañana"), None);
    }

    #[test]
    fn test_frequency_hours() {
        assert_eq!(
            extract_frequency("500 mg cada 8 horas"),
            Some("cada 8 h".into())
        );
        assert_eq!(extract_frequency("cada 12h"), Some("cada 12 h".into()));
    }

    #[test]
    fn test_frequency_days() {
        assert_eq!(extract_frequency("pipeta cada día"), Some("cada día".into()));
        assert_eq!(
            extract_frequency("pipeta cada 2 dias"),
            Some("cada 2 días".into())
        );
    }

    #[test]
    fn test_frequency_weeks_and_months() {
        assert_eq!(extract_frequency("baño cada semana"), Some("cada semana".into()));
        assert_eq!(
            extract_frequency("baño cada 3 semanas"),
            Some("cada 3 semanas".into())
        );
        assert_eq!(extract_frequency("pipeta cada mes"), Some("cada mes".into()));
        assert_eq!(
            extract_frequency("refuerzo cada 6 meses"),
            Some("cada 6 meses".into())
        );
    }

    #[test]
    fn test_frequency_none() {
        assert_eq!(extract_frequency("amoxicilina 500 mg"), None);
    }

    #[test]
    fn test_manufacturer_with_colon() {
        assert_eq!(
            extract_manufacturer("Vacuna rabia\nLaboratorio: Zoetis"),
            Some("Zoetis".into())
        );
    }

    #[test]
    fn test_manufacturer_without_colon() {
        assert_eq!(
            extract_manufacturer("pipeta marca Frontline Plus"),
            Some("Frontline Plus".into())
        );
    }

    #[test]
    fn test_manufacturer_stops_at_separator() {
        assert_eq!(
            extract_manufacturer("Fabricante: MSD, lote 1234"),
            Some("MSD".into())
        );
    }

    #[test]
    fn test_manufacturer_none() {
        assert_eq!(extract_manufacturer("amoxicilina 500 mg"), None);
    }

    #[test]
    fn test_positions() {
        let lower = "amoxicilina 500 mg cada 8 horas";
        assert_eq!(dosage_position(lower), Some(12));
        assert_eq!(frequency_position(lower), Some(19));
        assert_eq!(dosage_position("vacuna rabia"), None);
    }
}
