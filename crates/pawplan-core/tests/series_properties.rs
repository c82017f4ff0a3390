//! Property tests for series expansion and dose-suffix grouping.

use chrono::{DateTime, Duration, Months, TimeZone, Utc};
use proptest::prelude::*;

use pawplan_core::models::{EventKind, SeriesRule};
use pawplan_core::schedule::{split_dose_base, ScheduleRecommender, SeriesRequest};
use pawplan_core::vocab;

fn start_date(day_offset: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::days(day_offset as i64)
}

proptest! {
    /// Splitting a base name is a fixpoint on arbitrary input.
    #[test]
    fn prop_split_dose_base_is_idempotent(name in "\\PC{0,40}") {
        let once = split_dose_base(&name);
        prop_assert_eq!(split_dose_base(once), once);
    }

    /// Any generated suffix round-trips back to its base name.
    #[test]
    fn prop_generated_suffix_round_trips(
        base in "[A-Za-zÁÉÍÓÚÑáéíóúñ][A-Za-z áéíóúñ]{0,24}",
        position in 1u32..=12,
        total in 1u32..=12,
    ) {
        prop_assume!(position <= total);
        let base = base.trim_end().to_string();
        prop_assume!(!base.is_empty());

        let full = format!("{}{}", base, vocab::dose_suffix(position, total));
        prop_assert_eq!(split_dose_base(&full), base.as_str());
    }

    /// Medication series: `total` doses, `interval` hours apart, suffixes
    /// numbered in order, every name starting with the base.
    #[test]
    fn prop_medication_series_shape(
        interval in 1u32..=48,
        total in 2u32..=10,
        day in 0u32..365,
    ) {
        let recommender = ScheduleRecommender::new();
        let start = start_date(day);
        let mut request =
            SeriesRequest::new(EventKind::Medication, "Fármaco X".into(), start);
        request.hours_interval = Some(interval);
        request.total_doses = Some(total);

        let events = recommender.recommend(&request);

        prop_assert_eq!(events.len(), total as usize);
        for (i, event) in events.iter().enumerate() {
            prop_assert_eq!(
                event.date,
                start + Duration::hours(interval as i64 * i as i64)
            );
            let suffix = format!("(dosis {}/{})", i + 1, total);
            prop_assert!(event.full_name.ends_with(&suffix));
            prop_assert!(event.full_name.starts_with(event.base_name.as_str()));
            prop_assert_eq!(split_dose_base(&event.full_name), event.base_name.as_str());
        }
        for pair in events.windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
    }

    /// Vaccine series: one suffixed event per rule offset in order, plus
    /// an unsuffixed booster `booster_months` after the last primary.
    #[test]
    fn prop_vaccine_series_follows_rule(
        deltas in prop::collection::vec(1u32..=60, 0..4),
        booster in prop::option::of(1u32..=24),
        day in 0u32..365,
    ) {
        let mut offsets = vec![0u32];
        let mut total_days = 0u32;
        for delta in deltas {
            total_days += delta;
            offsets.push(total_days);
        }

        let mut recommender = ScheduleRecommender::new();
        recommender.add_vaccine_rule(
            "pauta personalizada",
            SeriesRule::new(offsets.clone(), booster),
        );

        let start = start_date(day);
        let events = recommender.recommend(&SeriesRequest::new(
            EventKind::Vaccine,
            "Pauta Personalizada".into(),
            start,
        ));

        let primaries = offsets.len();
        prop_assert_eq!(events.len(), primaries + booster.is_some() as usize);

        for (i, offset) in offsets.iter().enumerate() {
            prop_assert_eq!(events[i].date, start + Duration::days(*offset as i64));
            let suffix = format!("(dosis {}/{})", i + 1, primaries);
            prop_assert!(events[i].full_name.ends_with(&suffix));
            prop_assert_eq!(split_dose_base(&events[i].full_name), "Pauta Personalizada");
        }

        if let Some(months) = booster {
            let last_primary = events[primaries - 1].date;
            let booster_event = &events[primaries];
            prop_assert_eq!(
                booster_event.date,
                last_primary.checked_add_months(Months::new(months)).unwrap()
            );
            prop_assert_eq!(booster_event.full_name.as_str(), "Pauta Personalizada");
            prop_assert!(booster_event.notes.is_some());
        }
    }
}

/// Fixed-rule scenario: the rabies protocol from the anchor date.
#[test]
fn test_rabies_protocol_dates() {
    let recommender = ScheduleRecommender::new();
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let events = recommender.recommend_vaccine_series("Rabia", start);

    let dates: Vec<DateTime<Utc>> = events.iter().map(|event| event.date).collect();
    assert_eq!(
        dates,
        vec![
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 22, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 12, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 2, 12, 9, 0, 0).unwrap(),
        ]
    );
}
