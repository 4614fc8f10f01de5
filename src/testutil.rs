//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use crate::log::jsonl::WorkoutEntry;
use crate::plan::day::WorkoutType;
use crate::weather::WeatherCondition;
use chrono::{NaiveDate, Utc};

/// Shorthand for a valid calendar date.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Create a minimal outdoor `WorkoutEntry` for testing.
///
/// Uses clear weather, a fixed description and leaves all optional fields
/// as `None` (except `completed_at` for completed entries).
#[must_use]
pub fn make_test_entry(date: NaiveDate, focus: &str, completed: bool) -> WorkoutEntry {
    let now = Utc::now();
    WorkoutEntry {
        date,
        workout_type: WorkoutType::Outdoor,
        focus: focus.to_string(),
        description: format!("{focus} session"),
        completed,
        completed_at: completed.then_some(now),
        notes: None,
        difficulty: None,
        energy: None,
        weather: WeatherCondition::Clear,
        logged_at: now,
    }
}
