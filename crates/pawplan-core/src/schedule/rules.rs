//! Built-in schedule rule tables.
//!
//! Vaccine rules follow common Spanish companion-animal protocols: a
//! primary course of day offsets from the anchor date plus an annual
//! booster. Medication intervals are per-drug defaults in hours, used when
//! the caller gives no interval.

use std::collections::HashMap;

use crate::models::{EventKind, ScheduleStep, SeriesRule};

/// Fallback hours between medication doses.
pub const DEFAULT_MED_INTERVAL_HOURS: u32 = 8;

/// Treatment window used to derive a dose count from an explicit interval.
pub const TREATMENT_WINDOW_HOURS: u32 = 72;

/// Doses suggested when neither a count nor an interval is given.
pub const DEFAULT_DOSE_COUNT: u32 = 3;

/// Default vaccine rules keyed by normalized name.
pub(crate) fn default_vaccine_rules() -> HashMap<String, SeriesRule> {
    let mut map = HashMap::new();

    // Canine
    map.insert("rabia".into(), SeriesRule::new(vec![0, 21, 42], Some(12)));
    map.insert(
        "polivalente".into(),
        SeriesRule::new(vec![0, 21, 42], Some(12)),
    );
    map.insert("moquillo".into(), SeriesRule::new(vec![0, 21], Some(12)));
    map.insert("parvovirus".into(), SeriesRule::new(vec![0, 21], Some(12)));
    map.insert(
        "tos de las perreras".into(),
        SeriesRule::new(vec![0], Some(12)),
    );

    // Feline
    map.insert(
        "trivalente felina".into(),
        SeriesRule::new(vec![0, 21], Some(12)),
    );
    map.insert(
        "leucemia felina".into(),
        SeriesRule::new(vec![0, 21], Some(12)),
    );

    map
}

/// Default per-drug dose intervals in hours, keyed by normalized name.
pub(crate) fn default_medication_intervals() -> HashMap<String, u32> {
    let mut map = HashMap::new();

    map.insert("amoxicilina".into(), 8);
    map.insert("metronidazol".into(), 12);
    map.insert("doxiciclina".into(), 12);
    map.insert("prednisona".into(), 12);
    map.insert("meloxicam".into(), 24);
    map.insert("omeprazol".into(), 24);

    map
}

/// Default spacing for stepped suggestions, by kind.
pub fn default_step(kind: EventKind) -> ScheduleStep {
    match kind {
        EventKind::Medication => ScheduleStep::Hours(DEFAULT_MED_INTERVAL_HOURS),
        EventKind::Vaccine => ScheduleStep::Days(21),
        EventKind::Deworming => ScheduleStep::Days(90),
        EventKind::Grooming => ScheduleStep::Days(60),
        EventKind::Weight => ScheduleStep::Days(30),
    }
}
