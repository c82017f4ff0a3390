//! Dose-series grouping and schedule recommendation.

pub mod grouper;
pub mod recommender;
pub mod rules;

pub use grouper::{series_key, split_dose_base};
pub use recommender::{suggest_dates, ScheduleRecommender, SeriesRequest};
pub use rules::default_step;
