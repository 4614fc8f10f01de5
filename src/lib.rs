//! Hurdles - training hub for a 300m hurdler
//!
//! Hurdles picks the day's workout from a cyclic training plan, choosing the
//! outdoor or indoor variant from the current weather, and keeps a JSONL
//! history of completed workouts, personal records, goals and coach messages.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod doctor;
pub mod log;
pub mod plan;
pub mod weather;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use cli::{render_diagnostic_report, render_recommendation, StatsView};
pub use doctor::{diagnose, DiagnosticReport, DoctorContext};
pub use log::{
    CoachMessage, Goal, GoalBook, MessageLog, PersonalRecord, RecordBook, TrainingLog,
    WorkoutEntry,
};
pub use plan::{
    recommend, resolve_day_plan, select_workout_text, DayPlan, PlanConfig, PlanError,
    Recommendation, WorkoutType,
};
pub use weather::{WeatherCondition, WeatherSource};
