//! Relative date/time resolution for Spanish care-event phrases.
//!
//! Resolution runs in four composable stages over a caller-supplied
//! reference instant:
//!
//! 1. **Day keywords**: "hoy", "mañana"
//! 2. **Offsets**: "en 3 días", "en 2 semanas", "en 1 mes"
//! 3. **Weekdays**: next occurrence strictly after the resolved base
//! 4. **Time of day**: "15:30" or "3 pm", replacing the base's clock time
//!
//! Later stages build on the result of earlier ones, so "mañana a las 3pm"
//! means tomorrow at 15:00. When a stage matches but calendar arithmetic
//! fails, the prior stage's result is kept unchanged.

use chrono::{DateTime, Datelike, Days, Months, Utc, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::vocab;

static OFFSET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\ben\s+(\d+)\s*(d[ií]as?|semanas?|mes(?:es)?)\b").expect("valid regex")
});

static CLOCK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})\b").expect("valid regex"));

static MERIDIEM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})\s*(am|pm)\b").expect("valid regex"));

/// Resolve the temporal phrases in `text` against `reference`.
///
/// Returns `None` when no stage matched; callers pick their own default.
/// Matching is done on the lowercased input.
pub fn resolve(text: &str, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let lower = text.to_lowercase();
    let mut resolved: Option<DateTime<Utc>> = None;

    // Stage 1: day keywords keep the reference clock time.
    if contains_any(&lower, vocab::TODAY_WORDS) {
        resolved = Some(reference);
    } else if contains_any(&lower, vocab::TOMORROW_WORDS) {
        if let Some(date) = reference.checked_add_days(Days::new(1)) {
            resolved = Some(date);
        }
    }

    // Stage 2: "en N días/semanas/meses" from the base so far.
    if let Some(caps) = OFFSET_PATTERN.captures(&lower) {
        if let Ok(count) = caps[1].parse::<u32>() {
            let base = resolved.unwrap_or(reference);
            let rolled = match &caps[2] {
                unit if unit.starts_with('d') => base.checked_add_days(Days::new(count as u64)),
                unit if unit.starts_with('s') => {
                    base.checked_add_days(Days::new(count as u64 * 7))
                }
                _ => base.checked_add_months(Months::new(count)),
            };
            if let Some(date) = rolled {
                resolved = Some(date);
            }
        }
    }

    // Stage 3: weekday names jump to the next occurrence strictly after
    // the base, so "el lunes" said on a Monday means next week.
    if let Some(weekday) = find_weekday(&lower) {
        let base = resolved.unwrap_or(reference);
        if let Some(date) = next_weekday(base, weekday) {
            resolved = Some(date);
        }
    }

    // Stage 4: explicit time of day replaces the base's clock time.
    if let Some((hour, minute)) = find_time(&lower) {
        let base = resolved.unwrap_or(reference);
        if let Some(date) = at_time(base, hour, minute) {
            resolved = Some(date);
        }
    }

    resolved
}

/// Byte offset of the first day keyword, if any.
pub(crate) fn day_word_position(lower: &str) -> Option<usize> {
    vocab::TODAY_WORDS
        .iter()
        .chain(vocab::TOMORROW_WORDS)
        .filter_map(|word| lower.find(word))
        .min()
}

/// Byte offset of the first "en N unidad" phrase, if any.
pub(crate) fn offset_position(lower: &str) -> Option<usize> {
    OFFSET_PATTERN.find(lower).map(|m| m.start())
}

/// Byte offset of the first weekday name, if any.
pub(crate) fn weekday_position(lower: &str) -> Option<usize> {
    vocab::WEEKDAYS
        .iter()
        .filter_map(|(name, _)| lower.find(name))
        .min()
}

/// Byte offset of the first clock or meridiem time, if any.
pub(crate) fn time_position(lower: &str) -> Option<usize> {
    let clock = CLOCK_PATTERN.find(lower).map(|m| m.start());
    let meridiem = MERIDIEM_PATTERN.find(lower).map(|m| m.start());
    match (clock, meridiem) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn contains_any(lower: &str, words: &[&str]) -> bool {
    words.iter().any(|word| lower.contains(word))
}

fn find_weekday(lower: &str) -> Option<Weekday> {
    vocab::WEEKDAYS
        .iter()
        .filter_map(|(name, day)| lower.find(name).map(|pos| (pos, *day)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, day)| day)
}

fn next_weekday(base: DateTime<Utc>, target: Weekday) -> Option<DateTime<Utc>> {
    let current = base.weekday().num_days_from_monday() as i64;
    let wanted = target.num_days_from_monday() as i64;
    let mut ahead = wanted - current;
    if ahead <= 0 {
        ahead += 7;
    }
    base.checked_add_days(Days::new(ahead as u64))
}

/// First valid time mention: "HH:MM" wins over "H am/pm".
fn find_time(lower: &str) -> Option<(u32, u32)> {
    if let Some(caps) = CLOCK_PATTERN.captures(lower) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        if hour < 24 && minute < 60 {
            return Some((hour, minute));
        }
    }

    if let Some(caps) = MERIDIEM_PATTERN.captures(lower) {
        let hour: u32 = caps[1].parse().ok()?;
        if (1..=12).contains(&hour) {
            let hour = match (&caps[2], hour) {
                (m, 12) if m == "am" => 0,
                (m, h) if m == "pm" && h < 12 => h + 12,
                (_, h) => h,
            };
            return Some((hour, 0));
        }
    }

    None
}

fn at_time(base: DateTime<Utc>, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    base.date_naive()
        .and_hms_opt(hour, minute, 0)
        .map(|naive| naive.and_utc())
}
