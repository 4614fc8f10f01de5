//! CLI output formatting
//!
//! Provides human-readable terminal display for workouts, history,
//! statistics and doctor reports.

pub mod display;

pub use display::render_diagnostic_report;
pub use display::render_recommendation;
pub use display::StatsView;
