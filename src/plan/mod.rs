//! Training plan
//!
//! This module handles plan configuration, day types and the cycle scheduler.

pub mod config;
pub mod day;
pub mod error;
pub mod scheduler;

pub use config::{FormDrill, GlobalConfig, PlanConfig};
pub use day::{DayPlan, WorkoutType, REST_DAY};
pub use error::PlanError;
pub use scheduler::{recommend, resolve_day_plan, select_workout_text, Recommendation};
