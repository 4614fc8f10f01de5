//! Training cycle scheduler
//!
//! Maps a calendar date onto the cyclic plan and picks the indoor or outdoor
//! variant for the current weather. Everything here is a pure function of its
//! arguments, so the same date always yields the same workout.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::plan::day::{DayPlan, WorkoutType, REST_DAY};
use crate::plan::error::PlanError;
use crate::weather::WeatherCondition;

/// The workout chosen for one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Calendar date the recommendation is for
    pub date: NaiveDate,
    /// Zero-based position in the plan cycle (`None` when the default day was used)
    pub cycle_index: Option<usize>,
    /// Training focus of the resolved day
    pub focus: String,
    /// Workout description
    pub text: String,
    /// Variant that was chosen
    pub workout_type: WorkoutType,
    /// Weather the choice was based on
    pub weather: WeatherCondition,
}

/// Whole calendar days from `start` to `today`; negative before the start.
#[must_use]
pub fn elapsed_days(start: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(start).num_days()
}

/// Position of `today` in a plan of `len` days, always in `[0, len)`.
fn cycle_index(start: NaiveDate, today: NaiveDate, len: usize) -> Result<usize, PlanError> {
    if len == 0 {
        return Err(PlanError::EmptyPlan);
    }
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let index = elapsed_days(start, today).rem_euclid(len);
    Ok(usize::try_from(index).unwrap_or_default())
}

/// Resolve the plan entry that applies on `today`.
pub fn resolve_day_plan(
    start: NaiveDate,
    today: NaiveDate,
    plan: &[DayPlan],
) -> Result<&DayPlan, PlanError> {
    let index = cycle_index(start, today, plan.len())?;
    Ok(&plan[index])
}

/// Resolve the plan entry for `today`, substituting [`DayPlan::recovery`] when
/// the plan cannot be used.
#[must_use]
pub fn resolve_or_default(start: NaiveDate, today: NaiveDate, plan: &[DayPlan]) -> DayPlan {
    match resolve_day_plan(start, today, plan) {
        Ok(day) => day.clone(),
        Err(err) => {
            tracing::warn!("Error getting daily workout: {err}; using recovery day");
            DayPlan::recovery()
        }
    }
}

/// Choose the workout text for the weather.
///
/// Fair weather prefers the outdoor variant, anything else the indoor one.
/// A missing preferred variant falls back to the other; a day with neither is
/// a rest day. The returned type is always the weather-preferred one.
#[must_use]
pub fn select_workout_text(day: &DayPlan, weather: WeatherCondition) -> (String, WorkoutType) {
    let (preferred, other) = if weather.prefers_outdoor() {
        (WorkoutType::Outdoor, WorkoutType::Indoor)
    } else {
        (WorkoutType::Indoor, WorkoutType::Outdoor)
    };

    let text = day
        .workout(preferred)
        .or_else(|| day.workout(other))
        .unwrap_or(REST_DAY);

    (text.to_string(), preferred)
}

/// Resolve the day and pick its workout in one step.
#[must_use]
pub fn recommend(
    start: NaiveDate,
    today: NaiveDate,
    plan: &[DayPlan],
    weather: WeatherCondition,
) -> Recommendation {
    let cycle_index = cycle_index(start, today, plan.len()).ok();
    let day = resolve_or_default(start, today, plan);
    let (text, workout_type) = select_workout_text(&day, weather);

    Recommendation {
        date: today,
        cycle_index,
        focus: day.focus,
        text,
        workout_type,
        weather,
    }
}

/// Recommendations for `days` consecutive dates beginning at `from`.
///
/// The same weather is applied to every date.
#[must_use]
pub fn upcoming(
    start: NaiveDate,
    from: NaiveDate,
    days: u32,
    plan: &[DayPlan],
    weather: WeatherCondition,
) -> Vec<Recommendation> {
    (0..u64::from(days))
        .filter_map(|offset| from.checked_add_days(Days::new(offset)))
        .map(|date| recommend(start, date, plan, weather))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn start() -> NaiveDate {
        date(2024, 9, 1)
    }

    fn sample_plan() -> Vec<DayPlan> {
        vec![
            DayPlan::new("Speed", Some("6x100m"), Some("Treadmill intervals")),
            DayPlan::new("Recovery", Some("Easy jog"), None),
        ]
    }

    fn three_day_plan() -> Vec<DayPlan> {
        vec![
            DayPlan::new("Speed", Some("6x100m"), Some("Treadmill intervals")),
            DayPlan::new("Hurdle Technique", Some("Hurdle drills"), Some("Wall drills")),
            DayPlan::new("Strength", None, Some("Squats and lunges")),
        ]
    }

    fn offset(base: NaiveDate, days: i64) -> NaiveDate {
        base + chrono::Duration::days(days)
    }

    #[test]
    fn test_elapsed_days() {
        assert_eq!(elapsed_days(start(), start()), 0);
        assert_eq!(elapsed_days(start(), date(2024, 9, 2)), 1);
        assert_eq!(elapsed_days(start(), date(2024, 8, 31)), -1);
        assert_eq!(elapsed_days(start(), date(2025, 9, 1)), 365);
    }

    #[test]
    fn test_day_zero_is_first_entry() {
        let plan = three_day_plan();
        let day = resolve_day_plan(start(), start(), &plan).unwrap();
        assert_eq!(day, &plan[0]);
    }

    #[test]
    fn test_resolution_is_periodic() {
        let plan = three_day_plan();
        let n = i64::try_from(plan.len()).unwrap();
        for d in -10..30 {
            let a = resolve_day_plan(start(), offset(start(), d), &plan).unwrap();
            let b = resolve_day_plan(start(), offset(start(), d + n), &plan).unwrap();
            assert_eq!(a, b, "period broken at elapsed day {d}");
        }
    }

    #[test]
    fn test_dates_before_start_stay_in_range() {
        let plan = three_day_plan();
        let n = i64::try_from(plan.len()).unwrap();

        let day_before = resolve_day_plan(start(), offset(start(), -1), &plan).unwrap();
        assert_eq!(day_before, &plan[2]);

        let cycle_before = resolve_day_plan(start(), offset(start(), -n), &plan).unwrap();
        assert_eq!(cycle_before, &plan[0]);
    }

    #[test]
    fn test_far_past_dates_resolve() {
        let plan = three_day_plan();
        assert!(resolve_day_plan(start(), date(1900, 1, 1), &plan).is_ok());
    }

    #[test]
    fn test_empty_plan_is_error() {
        let err = resolve_day_plan(start(), start(), &[]).unwrap_err();
        assert_eq!(err, PlanError::EmptyPlan);
    }

    #[test]
    fn test_empty_plan_falls_back_to_recovery_day() {
        let day = resolve_or_default(start(), date(2025, 3, 14), &[]);
        assert_eq!(day, DayPlan::recovery());
    }

    #[test]
    fn test_rain_on_day_zero_picks_indoor() {
        let plan = sample_plan();
        let day = resolve_day_plan(start(), date(2024, 9, 1), &plan).unwrap();
        let selected = select_workout_text(day, WeatherCondition::Rain);
        assert_eq!(
            selected,
            ("Treadmill intervals".to_string(), WorkoutType::Indoor)
        );
    }

    #[test]
    fn test_snow_without_indoor_falls_back_to_outdoor_text() {
        let plan = sample_plan();
        let day = resolve_day_plan(start(), date(2024, 9, 2), &plan).unwrap();
        let selected = select_workout_text(day, WeatherCondition::Snow);
        assert_eq!(selected, ("Easy jog".to_string(), WorkoutType::Indoor));
    }

    #[test]
    fn test_fair_weather_picks_outdoor() {
        let day = DayPlan::new("Speed", Some("6x100m"), Some("Treadmill intervals"));
        for weather in [WeatherCondition::Clear, WeatherCondition::PartlyCloudy] {
            let (text, kind) = select_workout_text(&day, weather);
            assert_eq!(text, "6x100m");
            assert_eq!(kind, WorkoutType::Outdoor);
        }
    }

    #[test]
    fn test_fair_weather_without_outdoor_falls_back_to_indoor_text() {
        let day = DayPlan::new("Strength", None, Some("Squats"));
        let (text, kind) = select_workout_text(&day, WeatherCondition::Clear);
        assert_eq!(text, "Squats");
        assert_eq!(kind, WorkoutType::Outdoor);
    }

    #[test]
    fn test_unknown_weather_prefers_indoor() {
        let day = DayPlan::new("Speed", Some("6x100m"), Some("Treadmill intervals"));
        let (text, kind) = select_workout_text(&day, WeatherCondition::Unknown);
        assert_eq!(text, "Treadmill intervals");
        assert_eq!(kind, WorkoutType::Indoor);
    }

    #[test]
    fn test_rest_day_only_when_both_missing() {
        let rest = DayPlan::new("Rest", None, Some("  "));
        for weather in WeatherCondition::ALL {
            let (text, kind) = select_workout_text(&rest, weather);
            assert_eq!(text, REST_DAY);
            let expected = if weather.prefers_outdoor() {
                WorkoutType::Outdoor
            } else {
                WorkoutType::Indoor
            };
            assert_eq!(kind, expected);
        }

        let one_sided = DayPlan::new("Speed", Some("6x100m"), None);
        for weather in WeatherCondition::ALL {
            let (text, _) = select_workout_text(&one_sided, weather);
            assert_ne!(text, REST_DAY);
        }
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let plan = three_day_plan();
        let today = date(2026, 2, 17);
        let first = recommend(start(), today, &plan, WeatherCondition::Cloudy);
        for _ in 0..5 {
            assert_eq!(
                recommend(start(), today, &plan, WeatherCondition::Cloudy),
                first
            );
        }
    }

    #[test]
    fn test_recommend_fields() {
        let plan = three_day_plan();
        let rec = recommend(start(), date(2024, 9, 3), &plan, WeatherCondition::Clear);
        assert_eq!(rec.cycle_index, Some(2));
        assert_eq!(rec.focus, "Strength");
        assert_eq!(rec.text, "Squats and lunges");
        assert_eq!(rec.workout_type, WorkoutType::Outdoor);
        assert_eq!(rec.weather, WeatherCondition::Clear);
    }

    #[test]
    fn test_recommend_with_empty_plan_uses_recovery() {
        let rec = recommend(start(), start(), &[], WeatherCondition::Rain);
        assert_eq!(rec.cycle_index, None);
        assert_eq!(rec.focus, "Recovery");
        assert_eq!(rec.text, "Mobility and flexibility routine");
    }

    #[test]
    fn test_upcoming_walks_the_cycle() {
        let plan = three_day_plan();
        let recs = upcoming(start(), start(), 7, &plan, WeatherCondition::Rain);
        assert_eq!(recs.len(), 7);
        let indexes: Vec<_> = recs.iter().map(|r| r.cycle_index.unwrap()).collect();
        assert_eq!(indexes, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(recs[6].date, date(2024, 9, 7));
    }

    #[test]
    fn test_upcoming_zero_days_is_empty() {
        let recs = upcoming(start(), start(), 0, &sample_plan(), WeatherCondition::Clear);
        assert!(recs.is_empty());
    }
}
