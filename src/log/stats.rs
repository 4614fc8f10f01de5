//! Training statistics
//!
//! Completion rates and breakdowns computed from the training log.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};

use crate::log::jsonl::WorkoutEntry;
use crate::plan::day::WorkoutType;

/// Days in a training week
const WEEK_DAYS: u64 = 7;

/// Completed workouts in one calendar week
#[derive(Debug, Clone, PartialEq)]
pub struct WeekStat {
    /// First day of the week
    pub week_start: NaiveDate,
    /// Last day of the week (inclusive)
    pub week_end: NaiveDate,
    /// Completed workouts in the week
    pub completed: usize,
    /// Completed workouts out of seven, capped at 100
    pub percentage: f64,
}

/// Completed workouts for one focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusCount {
    /// Training focus
    pub focus: String,
    /// Completed workouts with this focus
    pub count: usize,
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

fn completed_between(entries: &[WorkoutEntry], from: NaiveDate, to: NaiveDate) -> usize {
    entries
        .iter()
        .filter(|e| e.completed && e.date >= from && e.date <= to)
        .count()
}

/// Completed entries as a percentage of all logged entries.
#[must_use]
pub fn completion_rate(entries: &[WorkoutEntry]) -> f64 {
    percent(entries.iter().filter(|e| e.completed).count(), entries.len())
}

/// Completed workouts in the seven days ending `today`, out of seven.
#[must_use]
pub fn recent_completion_rate(entries: &[WorkoutEntry], today: NaiveDate) -> f64 {
    let from = today
        .checked_sub_days(Days::new(WEEK_DAYS - 1))
        .unwrap_or(NaiveDate::MIN);
    percent(completed_between(entries, from, today), 7).min(100.0)
}

/// Per-week completion for the last `weeks` full weeks, oldest first.
///
/// Week `i` starts `7 * (i + 1)` days before `today` and spans seven days.
#[must_use]
pub fn weekly_stats(entries: &[WorkoutEntry], today: NaiveDate, weeks: u32) -> Vec<WeekStat> {
    let mut stats: Vec<WeekStat> = (0..u64::from(weeks))
        .filter_map(|i| {
            let week_start = today.checked_sub_days(Days::new(WEEK_DAYS * (i + 1)))?;
            let week_end = week_start.checked_add_days(Days::new(WEEK_DAYS - 1))?;
            let completed = completed_between(entries, week_start, week_end);
            Some(WeekStat {
                week_start,
                week_end,
                completed,
                percentage: percent(completed, 7).min(100.0),
            })
        })
        .collect();
    stats.reverse();
    stats
}

/// Completed workouts per focus, most frequent first, then by name.
#[must_use]
pub fn focus_breakdown(entries: &[WorkoutEntry]) -> Vec<FocusCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries.iter().filter(|e| e.completed) {
        *counts.entry(entry.focus.as_str()).or_default() += 1;
    }

    let mut breakdown: Vec<FocusCount> = counts
        .into_iter()
        .map(|(focus, count)| FocusCount {
            focus: focus.to_string(),
            count,
        })
        .collect();
    breakdown.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.focus.cmp(&b.focus)));
    breakdown
}

/// Completed (outdoor, indoor) workout counts.
#[must_use]
pub fn type_split(entries: &[WorkoutEntry]) -> (usize, usize) {
    entries
        .iter()
        .filter(|e| e.completed)
        .fold((0, 0), |(outdoor, indoor), e| match e.workout_type {
            WorkoutType::Outdoor => (outdoor + 1, indoor),
            WorkoutType::Indoor => (outdoor, indoor + 1),
        })
}

/// Mean difficulty rating of completed workouts that were rated.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_difficulty(entries: &[WorkoutEntry]) -> Option<f64> {
    let ratings: Vec<u8> = entries
        .iter()
        .filter(|e| e.completed)
        .filter_map(|e| e.difficulty)
        .collect();
    if ratings.is_empty() {
        return None;
    }
    let total: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
    Some(f64::from(total) / ratings.len() as f64)
}
