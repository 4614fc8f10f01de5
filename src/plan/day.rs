//! Day-plan types
//!
//! A training plan is an ordered, cyclic list of [`DayPlan`] entries. Each
//! entry names a focus and carries optional outdoor and indoor workout text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Text shown when a day has neither an outdoor nor an indoor workout.
pub const REST_DAY: &str = "Rest day";

/// Where a workout is meant to be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    /// Track or field session
    Outdoor,
    /// Gym, treadmill or hallway session
    Indoor,
}

impl WorkoutType {
    /// Lowercase tag used in logs and output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Outdoor => "outdoor",
            Self::Indoor => "indoor",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the cyclic training schedule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayPlan {
    /// Informational day number from the plan file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    /// Training focus, e.g. "Speed Endurance"
    pub focus: String,
    /// Workout for fair weather
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdoor_workout: Option<String>,
    /// Workout for poor or unknown weather
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indoor_workout: Option<String>,
}

impl DayPlan {
    /// Build a day plan without a day number.
    #[must_use]
    pub fn new(focus: &str, outdoor_workout: Option<&str>, indoor_workout: Option<&str>) -> Self {
        Self {
            day: None,
            focus: focus.to_string(),
            outdoor_workout: outdoor_workout.map(str::to_string),
            indoor_workout: indoor_workout.map(str::to_string),
        }
    }

    /// The day used whenever the configured plan cannot be resolved.
    #[must_use]
    pub fn recovery() -> Self {
        Self {
            day: Some(1),
            ..Self::new(
                "Recovery",
                Some("Light jog and stretching"),
                Some("Mobility and flexibility routine"),
            )
        }
    }

    /// Outdoor workout text, treating blank strings as absent
    #[must_use]
    pub fn outdoor(&self) -> Option<&str> {
        non_blank(self.outdoor_workout.as_deref())
    }

    /// Indoor workout text, treating blank strings as absent
    #[must_use]
    pub fn indoor(&self) -> Option<&str> {
        non_blank(self.indoor_workout.as_deref())
    }

    /// Workout text for the given type, without any fallback
    #[must_use]
    pub fn workout(&self, kind: WorkoutType) -> Option<&str> {
        match kind {
            WorkoutType::Outdoor => self.outdoor(),
            WorkoutType::Indoor => self.indoor(),
        }
    }

    /// True when neither variant is present
    #[must_use]
    pub fn is_rest_day(&self) -> bool {
        self.outdoor().is_none() && self.indoor().is_none()
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovery_day_has_both_variants() {
        let day = DayPlan::recovery();
        assert_eq!(day.focus, "Recovery");
        assert_eq!(day.outdoor(), Some("Light jog and stretching"));
        assert_eq!(day.indoor(), Some("Mobility and flexibility routine"));
        assert!(!day.is_rest_day());
    }

    #[test]
    fn test_blank_workouts_count_as_absent() {
        let day = DayPlan::new("Rest", Some("   "), Some(""));
        assert_eq!(day.outdoor(), None);
        assert_eq!(day.indoor(), None);
        assert!(day.is_rest_day());
    }

    #[test]
    fn test_workout_by_type() {
        let day = DayPlan::new("Speed", Some("6x100m"), None);
        assert_eq!(day.workout(WorkoutType::Outdoor), Some("6x100m"));
        assert_eq!(day.workout(WorkoutType::Indoor), None);
    }

    #[test]
    fn test_workout_type_serializes_lowercase() {
        let json = serde_json::to_string(&WorkoutType::Outdoor).unwrap();
        assert_eq!(json, "\"outdoor\"");
        assert_eq!(WorkoutType::Indoor.to_string(), "indoor");
    }
}
