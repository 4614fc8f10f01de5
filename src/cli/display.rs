//! Terminal display for workouts, history and diagnostics
//!
//! Renders scheduler output and log data as human-readable, colored text.
//! Report-style output goes to stderr so stdout stays clean for `--json`.

use colored::{ColoredString, Colorize};

use chrono::NaiveDate;

use crate::doctor::{DiagnosticReport, Severity};
use crate::log::goals::{Goal, GoalPriority};
use crate::log::messages::{CoachMessage, MessagePriority, Sender};
use crate::log::records::{format_time, PersonalRecord};
use crate::log::stats::{FocusCount, WeekStat};
use crate::log::WorkoutEntry;
use crate::plan::config::FormDrill;
use crate::plan::day::WorkoutType;
use crate::plan::scheduler::Recommendation;
use crate::weather::WeatherCondition;

/// Longest workout description shown in tables
const TABLE_TEXT_WIDTH: usize = 48;

/// Truncate to `max` characters, ending in "..." when shortened
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn type_badge(kind: WorkoutType) -> ColoredString {
    match kind {
        WorkoutType::Outdoor => "OUTDOOR".green().bold(),
        WorkoutType::Indoor => "INDOOR".blue().bold(),
    }
}

fn weather_label(weather: WeatherCondition) -> ColoredString {
    match weather {
        WeatherCondition::Clear | WeatherCondition::PartlyCloudy => weather.as_str().yellow(),
        WeatherCondition::Cloudy => weather.as_str().white(),
        WeatherCondition::Rain | WeatherCondition::Snow => weather.as_str().cyan(),
        WeatherCondition::Unknown => weather.as_str().dimmed(),
    }
}

/// Print a section header
pub fn print_header(title: &str) {
    eprintln!("\n{} {}", "===".bold().cyan(), title.bold().cyan());
    eprintln!("{}", "─".repeat(50).dimmed());
}

/// Render today's recommendation, noting whether it is already logged
pub fn render_recommendation(rec: &Recommendation, logged: Option<&WorkoutEntry>) {
    print_header(&format!("Workout for {}", rec.date.format("%A, %B %-d")));

    eprintln!("  {} {}", "Focus:".dimmed(), rec.focus.bold());
    eprintln!("  {} {}", "Weather:".dimmed(), weather_label(rec.weather));
    eprintln!("  {} {}", type_badge(rec.workout_type), rec.text);
    if let Some(index) = rec.cycle_index {
        eprintln!("  {} {}", "Cycle day:".dimmed(), index + 1);
    }

    match logged {
        Some(entry) if entry.completed => {
            eprintln!("  {} already logged as completed", "✓".green().bold());
        }
        Some(_) => eprintln!("  {} logged as skipped", "✗".red().bold()),
        None => eprintln!("  {} not logged yet", "•".dimmed()),
    }
}

/// Render the week's completion rate and the latest headline result
pub fn render_progress(recent_rate: f64, latest_record: Option<&PersonalRecord>) {
    eprintln!("  {} {recent_rate:.0}%", "Last 7 days:".dimmed());
    if let Some(record) = latest_record {
        eprintln!(
            "  {} {} {} ({})",
            "Latest:".dimmed(),
            record.event,
            format_time(record.time_seconds).bold(),
            record.date_achieved
        );
    }
}

/// Render form drills and progression goals
pub fn render_extras(drills: &[FormDrill], goals: &[String]) {
    if !drills.is_empty() {
        eprintln!("\n  {}", "Form drills".bold());
        for drill in drills {
            match &drill.description {
                Some(desc) => eprintln!("    - {} {}", drill.name, desc.dimmed()),
                None => eprintln!("    - {}", drill.name),
            }
        }
    }

    if !goals.is_empty() {
        eprintln!("\n  {}", "Goals".bold());
        for goal in goals {
            eprintln!("    - {goal}");
        }
    }
    eprintln!();
}

/// Render a multi-day schedule as a table on stdout
pub fn render_schedule(recs: &[Recommendation]) {
    for rec in recs {
        println!(
            "{}  {:<8} {:<20} {}",
            rec.date.format("%a %m-%d"),
            rec.workout_type.as_str(),
            truncate(&rec.focus, 20),
            truncate(&rec.text, TABLE_TEXT_WIDTH)
        );
    }
}

/// Render log entries on stdout, one per line
pub fn render_history(entries: &[WorkoutEntry]) {
    if entries.is_empty() {
        eprintln!("{}", "No workouts logged yet.".dimmed());
        return;
    }

    for entry in entries {
        let status = if entry.completed {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };
        let rating = entry
            .difficulty
            .map_or_else(String::new, |d| format!(" [difficulty {d}/5]"));
        println!(
            "{} {} {:<8} {:<20} {}{}",
            status,
            entry.date,
            entry.workout_type.as_str(),
            truncate(&entry.focus, 20),
            truncate(&entry.description, TABLE_TEXT_WIDTH),
            rating.dimmed()
        );
        if let Some(notes) = &entry.notes {
            println!("    {}", notes.dimmed());
        }
    }
}

/// Inputs for [`render_stats`]
pub struct StatsView<'a> {
    /// Total logged days
    pub total: usize,
    /// Completed workouts
    pub completed: usize,
    /// Completed as a share of all logged days
    pub completion_rate: f64,
    /// Completed in the last seven days, out of seven
    pub recent_rate: f64,
    /// Mean difficulty of rated completed workouts
    pub average_difficulty: Option<f64>,
    /// Completed (outdoor, indoor) counts
    pub type_split: (usize, usize),
    /// Per-week completion, oldest first
    pub weeks: &'a [WeekStat],
    /// Completed per focus
    pub focus: &'a [FocusCount],
}

/// Render training statistics
pub fn render_stats(view: &StatsView<'_>) {
    print_header("Training statistics");

    eprintln!(
        "  {} {}/{} ({:.1}%)",
        "Completed:".dimmed(),
        view.completed,
        view.total,
        view.completion_rate
    );
    eprintln!("  {} {:.1}%", "Last 7 days:".dimmed(), view.recent_rate);
    if let Some(avg) = view.average_difficulty {
        eprintln!("  {} {avg:.1}/5", "Avg difficulty:".dimmed());
    }
    eprintln!(
        "  {} {} outdoor | {} indoor",
        "Split:".dimmed(),
        view.type_split.0,
        view.type_split.1
    );

    if !view.weeks.is_empty() {
        eprintln!("\n  {}", "Weekly completion".bold());
        for week in view.weeks {
            let bar = "█".repeat(week.completed.min(7));
            eprintln!(
                "    Week of {}  {:<7} {:>3.0}%",
                week.week_start.format("%b %d"),
                bar.green(),
                week.percentage
            );
        }
    }

    if !view.focus.is_empty() {
        eprintln!("\n  {}", "By focus".bold());
        for item in view.focus {
            eprintln!("    {:<24} {}", item.focus, item.count);
        }
    }
    eprintln!();
}

/// Render personal records
pub fn render_records<'a>(records: impl IntoIterator<Item = &'a PersonalRecord>) {
    let mut any = false;
    for record in records {
        any = true;
        let official = if record.is_official {
            String::new()
        } else {
            " (practice)".to_string()
        };
        let meet = record
            .meet_name
            .as_deref()
            .map_or_else(String::new, |m| format!(" @ {m}"));
        println!(
            "{:<16} {:>8}  {}{}{}",
            record.event,
            format_time(record.time_seconds).bold(),
            record.date_achieved,
            meet,
            official.dimmed()
        );
    }
    if !any {
        eprintln!("{}", "No personal records yet.".dimmed());
    }
}

/// Render tracked goals in the given order
pub fn render_goals(goals: &[&Goal], today: NaiveDate) {
    if goals.is_empty() {
        eprintln!("{}", "No goals yet.".dimmed());
        return;
    }

    for goal in goals {
        let status = if goal.is_achieved {
            "✓".green().bold()
        } else if goal.is_overdue(today) {
            "!".red().bold()
        } else {
            "•".normal()
        };
        let priority = match goal.priority {
            GoalPriority::High => goal.priority.as_str().red(),
            GoalPriority::Medium => goal.priority.as_str().yellow(),
            GoalPriority::Low => goal.priority.as_str().dimmed(),
        };
        println!(
            "{status} #{:<3} {:<7} {:<10} {}",
            goal.id,
            priority,
            truncate(&goal.goal_type, 10),
            goal.description
        );

        let mut detail = Vec::new();
        if let Some(target) = &goal.target_value {
            detail.push(format!("target {target}"));
        }
        if let Some(current) = &goal.current_value {
            detail.push(format!("now {current}"));
        }
        if let Some(by) = goal.target_date {
            detail.push(format!("by {by}"));
        }
        if let Some(done) = goal.date_achieved {
            detail.push(format!("reached {done}"));
        }
        if let Some(category) = &goal.category {
            detail.push(category.clone());
        }
        if !detail.is_empty() {
            println!("       {}", detail.join(" | ").dimmed());
        }
    }
}

/// Render messages in the given order
pub fn render_messages(messages: &[CoachMessage]) {
    if messages.is_empty() {
        eprintln!("{}", "No messages yet.".dimmed());
        return;
    }

    for message in messages {
        let sender = match message.sender {
            Sender::Coach => "coach".magenta().bold(),
            Sender::Athlete => "me".cyan().bold(),
        };
        let unread = if message.is_read {
            String::new()
        } else {
            " (new)".to_string()
        };
        let priority = match message.priority {
            MessagePriority::Low | MessagePriority::Normal => String::new(),
            MessagePriority::High | MessagePriority::Urgent => {
                format!(" [{}]", message.priority.as_str())
            }
        };
        println!(
            "{} {:<6} {}{}{}",
            message.timestamp.format("%Y-%m-%d %H:%M"),
            sender,
            message.category.dimmed(),
            priority.red(),
            unread.green().bold()
        );
        println!("    {}", message.message);
    }
}

/// Render a doctor report
pub fn render_diagnostic_report(report: &DiagnosticReport) {
    print_header("Hurdles doctor");

    if report.is_clean() {
        eprintln!("  {} No issues found", "✓".green().bold());
        eprintln!();
        return;
    }

    for finding in &report.findings {
        let label = match finding.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue().bold(),
        };
        eprintln!("  {label} [{}] {}", finding.code, finding.message);
        if let Some(suggestion) = &finding.suggestion {
            eprintln!("        {} {}", "→".dimmed(), suggestion.dimmed());
        }
    }

    eprintln!("{}", "─".repeat(50).dimmed());
    eprintln!(
        "  {} error(s), {} warning(s), {} info",
        report.error_count(),
        report.warning_count(),
        report.info_count()
    );
    eprintln!();
}
