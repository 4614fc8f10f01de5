//! Hurdles doctor: diagnostics and health checks
//!
//! Analyzes `hurdles.toml` and `.hurdles/log.jsonl` to find problems with
//! the plan and suggest fixes. Returns a structured report with categories:
//! errors (must fix), warnings (should fix), info (suggestions).

use chrono::NaiveDate;

use crate::log::WorkoutEntry;
use crate::plan::config::PlanConfig;
use crate::plan::scheduler::resolve_day_plan;

/// Severity level for a diagnostic finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    /// Must fix, something is broken
    Error,
    /// Should fix, the plan will not behave as intended
    Warning,
    /// Informational suggestion
    Info,
}

/// A single diagnostic finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Severity of the finding
    pub severity: Severity,
    /// Short code for the finding (e.g., "H001")
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Suggested fix (optional)
    pub suggestion: Option<String>,
}

/// Diagnostic report from `hurdles doctor`
#[derive(Debug, Clone)]
pub struct DiagnosticReport {
    /// All findings, in order of severity (errors first)
    pub findings: Vec<Finding>,
}

impl DiagnosticReport {
    /// Returns true if the report has no findings at all
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Returns the number of errors
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(&Severity::Error)
    }

    /// Returns the number of warnings
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(&Severity::Warning)
    }

    /// Returns the number of info items
    #[must_use]
    pub fn info_count(&self) -> usize {
        self.count(&Severity::Info)
    }

    fn count(&self, severity: &Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| &f.severity == severity)
            .count()
    }
}

/// Environment facts the checks depend on
#[derive(Debug, Clone, Copy)]
pub struct DoctorContext {
    /// Date the checks run against
    pub today: NaiveDate,
    /// Whether a weather API key is configured
    pub has_api_key: bool,
}

/// Run all diagnostic checks and return a report.
#[must_use]
pub fn diagnose(config: &PlanConfig, log: &[WorkoutEntry], ctx: DoctorContext) -> DiagnosticReport {
    let mut findings = Vec::new();

    check_plan_days(config, &mut findings);
    check_start_date(config, ctx.today, &mut findings);
    check_weather(config, ctx.has_api_key, &mut findings);
    check_log_drift(config, log, &mut findings);

    findings.sort_by_key(|f| match f.severity {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    });

    DiagnosticReport { findings }
}

fn day_label(index: usize, day: Option<u32>) -> String {
    day.map_or_else(|| format!("#{}", index + 1), |d| d.to_string())
}

/// H001-H003: Check the plan days themselves
fn check_plan_days(config: &PlanConfig, findings: &mut Vec<Finding>) {
    if config.days.is_empty() {
        findings.push(Finding {
            severity: Severity::Error,
            code: "H001".to_string(),
            message: "Training plan has no days; every date resolves to the recovery day"
                .to_string(),
            suggestion: Some("Add [[day]] entries to hurdles.toml".to_string()),
        });
        return;
    }

    for (i, day) in config.days.iter().enumerate() {
        let label = day_label(i, day.day);
        match (day.outdoor(), day.indoor()) {
            (None, None) => findings.push(Finding {
                severity: Severity::Warning,
                code: "H002".to_string(),
                message: format!("Day {label} ('{}') has no workouts and will be a rest day", day.focus),
                suggestion: Some(format!(
                    "Add outdoor_workout or indoor_workout to day {label} if it is not meant as rest"
                )),
            }),
            (Some(_), None) | (None, Some(_)) => {
                let missing = if day.outdoor().is_none() { "outdoor" } else { "indoor" };
                findings.push(Finding {
                    severity: Severity::Info,
                    code: "H003".to_string(),
                    message: format!(
                        "Day {label} ('{}') has no {missing} variant; the other one is used in all weather",
                        day.focus
                    ),
                    suggestion: None,
                });
            }
            (Some(_), Some(_)) => {}
        }
    }
}

/// H004: Start date in the future
fn check_start_date(config: &PlanConfig, today: NaiveDate, findings: &mut Vec<Finding>) {
    let start = config.global.start_date;
    if start > today {
        findings.push(Finding {
            severity: Severity::Warning,
            code: "H004".to_string(),
            message: format!("Plan start date {start} is after today ({today})"),
            suggestion: Some(
                "Dates before the start still cycle through the plan; run `hurdles set-start` if this is a typo"
                    .to_string(),
            ),
        });
    }
}

/// H005: Demo weather in use
fn check_weather(config: &PlanConfig, has_api_key: bool, findings: &mut Vec<Finding>) {
    if !has_api_key {
        findings.push(Finding {
            severity: Severity::Info,
            code: "H005".to_string(),
            message: format!(
                "No weather API key in ${}; demo weather always reports clear",
                config.global.weather_api_key_env
            ),
            suggestion: Some(format!(
                "export {}=<your OpenWeatherMap key>",
                config.global.weather_api_key_env
            )),
        });
    }
}

/// H006: Logged workouts that no longer match the plan
fn check_log_drift(config: &PlanConfig, log: &[WorkoutEntry], findings: &mut Vec<Finding>) {
    let start = config.global.start_date;
    let drifted: Vec<&WorkoutEntry> = log
        .iter()
        .filter(|entry| {
            resolve_day_plan(start, entry.date, &config.days)
                .is_ok_and(|day| day.focus != entry.focus)
        })
        .collect();

    if let Some(first) = drifted.first() {
        findings.push(Finding {
            severity: Severity::Warning,
            code: "H006".to_string(),
            message: format!(
                "{} logged workout(s) no longer match the plan (first: {} logged '{}')",
                drifted.len(),
                first.date,
                first.focus
            ),
            suggestion: Some(
                "The plan or start date changed after logging; history keeps the old focus"
                    .to_string(),
            ),
        });
    }
}
