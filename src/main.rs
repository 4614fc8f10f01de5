//! Hurdles - training hub for a 300m hurdler
//!
//! CLI entry point.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};

use hurdles::cli::display::{self, StatsView};
use hurdles::doctor::{diagnose, DoctorContext};
use hurdles::log::goals::{self, Goal, GoalBook, GoalPriority};
use hurdles::log::messages::{MessageLog, MessagePriority, NewMessage, Sender};
use hurdles::log::records::{best_by_event, latest, PersonalRecord, RecordBook};
use hurdles::log::stats;
use hurdles::log::{TrainingLog, WorkoutEntry};
use hurdles::plan::config::{set_start_date, PlanConfig};
use hurdles::plan::scheduler::{recommend, upcoming, Recommendation};
use hurdles::weather::{source_from_config, FixedWeather, WeatherCondition, WeatherSource};

/// Training hub for a 300m hurdler
///
/// Picks the day's workout from a cyclic plan, choosing the outdoor or
/// indoor variant from the weather, and tracks completions and records.
#[derive(Parser, Debug)]
#[command(name = "hurdles", version, about)]
struct Cli {
    /// Path to the hurdles.toml plan file
    #[arg(long, global = true, default_value = "hurdles.toml")]
    config: PathBuf,

    /// Directory for log files (.hurdles by default)
    #[arg(long, global = true, default_value = ".hurdles")]
    data_dir: PathBuf,

    /// Resolve as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// Use this weather condition instead of asking the weather API
    #[arg(long, global = true)]
    weather: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show today's workout
    Today {
        /// Print the recommendation as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Show the upcoming schedule
    Week {
        /// Number of days to show
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// Print the schedule as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Log today's workout
    Log {
        /// Record the workout as skipped instead of completed
        #[arg(long)]
        skipped: bool,
        /// Notes about the session
        #[arg(long)]
        notes: Option<String>,
        /// Perceived difficulty, 1-5
        #[arg(long)]
        difficulty: Option<u8>,
        /// Energy level before the workout, 1-5
        #[arg(long)]
        energy: Option<u8>,
    },
    /// Show logged workouts, most recent first
    History {
        /// Maximum number of entries to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show completion statistics and best times
    Stats {
        /// Number of past weeks to chart
        #[arg(long, default_value_t = 8)]
        weeks: u32,
    },
    /// Personal records
    #[command(subcommand)]
    Pr(PrCommand),
    /// Tracked training goals
    #[command(subcommand)]
    Goal(GoalCommand),
    /// Messages with the coach
    #[command(subcommand)]
    Message(MessageCommand),
    /// Print the current weather condition
    Weather,
    /// Check the plan and log for problems
    Doctor,
    /// Change the plan start date in the config file
    SetStart {
        /// New start date (YYYY-MM-DD)
        start_date: NaiveDate,
    },
}

#[derive(Subcommand, Debug)]
enum PrCommand {
    /// Record a new time
    Add {
        /// Event name, e.g. "300m Hurdles"
        event: String,
        /// Time in seconds
        time: f64,
        /// Date achieved (defaults to today)
        #[arg(long)]
        on: Option<NaiveDate>,
        /// Meet or competition name
        #[arg(long)]
        meet: Option<String>,
        /// Weather or track conditions
        #[arg(long)]
        conditions: Option<String>,
        /// Notes about the race
        #[arg(long)]
        notes: Option<String>,
        /// Practice result rather than an official meet
        #[arg(long)]
        unofficial: bool,
    },
    /// List all records, best per event first
    List,
}

#[derive(Subcommand, Debug)]
enum GoalCommand {
    /// Add a goal
    Add {
        /// Kind of goal, e.g. "time", "technique", "strength"
        goal_type: String,
        /// What the goal is
        description: String,
        /// Target to reach, e.g. "39.99"
        #[arg(long)]
        target: Option<String>,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        by: Option<NaiveDate>,
        /// Importance
        #[arg(long, value_enum, default_value_t = GoalPriority::Medium)]
        priority: GoalPriority,
        /// Horizon, e.g. "short-term", "season", "career"
        #[arg(long)]
        category: Option<String>,
        /// Notes about the goal
        #[arg(long)]
        notes: Option<String>,
    },
    /// Record progress toward a goal
    Progress {
        /// Goal id
        id: u64,
        /// Current value, e.g. "41.82"
        value: String,
    },
    /// Mark a goal as reached
    Done {
        /// Goal id
        id: u64,
        /// Date reached (defaults to today)
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// List goals, open ones first
    List,
}

#[derive(Subcommand, Debug)]
enum MessageCommand {
    /// Write a message to the coach
    Send {
        /// Message text
        message: String,
        /// Topic, e.g. "technique", "injury", "race strategy"
        #[arg(long, default_value = "general")]
        category: String,
        /// Urgency
        #[arg(long, value_enum, default_value_t = MessagePriority::Normal)]
        priority: MessagePriority,
        /// Record a message received from the coach
        #[arg(long)]
        from_coach: bool,
        /// Attach the message to today's workout
        #[arg(long)]
        workout: bool,
    },
    /// Show recent messages, newest first, and mark coach messages read
    List {
        /// Maximum number of messages to show
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
}

/// Event whose latest result is shown with the daily workout
const HEADLINE_EVENT: &str = "300m Hurdles";

/// Everything a command needs to resolve a workout
struct Session {
    config: PlanConfig,
    today: NaiveDate,
    weather_override: Option<WeatherCondition>,
}

impl Session {
    fn new(cli: &Cli) -> Self {
        Self {
            config: PlanConfig::load_or_default(&cli.config),
            today: cli.date.unwrap_or_else(|| Local::now().date_naive()),
            weather_override: cli.weather.as_deref().map(WeatherCondition::from_tag),
        }
    }

    fn weather_source(&self) -> Box<dyn WeatherSource> {
        match self.weather_override {
            Some(condition) => Box::new(FixedWeather(condition)),
            None => source_from_config(&self.config.global),
        }
    }

    async fn weather(&self) -> WeatherCondition {
        self.weather_source().condition().await
    }

    fn recommend(&self, date: NaiveDate, weather: WeatherCondition) -> Recommendation {
        recommend(self.config.global.start_date, date, &self.config.days, weather)
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Build today's log entry from the recommendation and CLI options.
fn build_entry(
    rec: &Recommendation,
    skipped: bool,
    notes: Option<String>,
    difficulty: Option<u8>,
    energy: Option<u8>,
) -> Result<WorkoutEntry> {
    WorkoutEntry::from_recommendation(rec, !skipped, Utc::now())
        .with_notes(notes)
        .with_ratings(difficulty, energy)
}

async fn run(cli: Cli) -> Result<()> {
    let session = Session::new(&cli);

    match cli.command {
        Command::Today { json } => {
            let rec = session.recommend(session.today, session.weather().await);
            if json {
                return print_json(&rec);
            }
            let log = TrainingLog::new(&cli.data_dir).context("Failed to open training log")?;
            let entries = log.read_all()?;
            let logged = entries.iter().find(|e| e.date == session.today);
            display::render_recommendation(&rec, logged);

            let book = RecordBook::new(&cli.data_dir).context("Failed to open record book")?;
            let records = book.read_all()?;
            display::render_progress(
                stats::recent_completion_rate(&entries, session.today),
                latest(&records, HEADLINE_EVENT),
            );
            display::render_extras(&session.config.drills, &session.config.global.goals);

            let unread = MessageLog::new(&cli.data_dir)
                .context("Failed to open message log")?
                .unread_from(Sender::Coach)?;
            if unread > 0 {
                eprintln!("{unread} unread message(s) from the coach: run `hurdles message list`");
            }
        }
        Command::Week { days, json } => {
            let weather = session.weather().await;
            let recs = upcoming(
                session.config.global.start_date,
                session.today,
                days,
                &session.config.days,
                weather,
            );
            if json {
                return print_json(&recs);
            }
            eprintln!("Schedule assuming {weather} weather:");
            display::render_schedule(&recs);
        }
        Command::Log {
            skipped,
            notes,
            difficulty,
            energy,
        } => {
            let log = TrainingLog::new(&cli.data_dir).context("Failed to open training log")?;
            // A re-log keeps the workout that was recommended when first logged
            let entry = match log.for_date(session.today)? {
                Some(existing) => {
                    let rec = Recommendation {
                        date: existing.date,
                        cycle_index: None,
                        focus: existing.focus,
                        text: existing.description,
                        workout_type: existing.workout_type,
                        weather: existing.weather,
                    };
                    build_entry(&rec, skipped, notes, difficulty, energy)?
                }
                None => {
                    let rec = session.recommend(session.today, session.weather().await);
                    build_entry(&rec, skipped, notes, difficulty, energy)?
                }
            };
            let replaced = log.upsert(&entry).context("Failed to write to JSONL log")?;
            let verb = if replaced { "Updated" } else { "Logged" };
            let status = if entry.completed { "completed" } else { "skipped" };
            eprintln!("{verb} {} as {status}: {}", entry.date, entry.description);
        }
        Command::History { limit } => {
            let log = TrainingLog::new(&cli.data_dir).context("Failed to open training log")?;
            let mut entries = log.read_all()?;
            entries.sort_by(|a, b| b.date.cmp(&a.date));
            entries.truncate(limit);
            display::render_history(&entries);
        }
        Command::Stats { weeks } => {
            let log = TrainingLog::new(&cli.data_dir).context("Failed to open training log")?;
            let entries = log.read_all()?;
            let weekly = stats::weekly_stats(&entries, session.today, weeks);
            let focus = stats::focus_breakdown(&entries);
            display::render_stats(&StatsView {
                total: entries.len(),
                completed: entries.iter().filter(|e| e.completed).count(),
                completion_rate: stats::completion_rate(&entries),
                recent_rate: stats::recent_completion_rate(&entries, session.today),
                average_difficulty: stats::average_difficulty(&entries),
                type_split: stats::type_split(&entries),
                weeks: &weekly,
                focus: &focus,
            });

            let book = RecordBook::new(&cli.data_dir).context("Failed to open record book")?;
            let records = book.read_all()?;
            display::render_records(best_by_event(&records).values().copied());
        }
        Command::Pr(PrCommand::Add {
            event,
            time,
            on,
            meet,
            conditions,
            notes,
            unofficial,
        }) => {
            let book = RecordBook::new(&cli.data_dir).context("Failed to open record book")?;
            let record = PersonalRecord {
                meet_name: meet,
                conditions,
                notes,
                is_official: !unofficial,
                ..PersonalRecord::new(&event, time, on.unwrap_or(session.today))
            };
            let previous_best = book
                .read_all()?
                .into_iter()
                .filter(|r| r.event == record.event)
                .map(|r| r.time_seconds)
                .reduce(f64::min);
            book.add(&record)?;
            match previous_best {
                Some(best) if record.time_seconds < best => {
                    eprintln!("New personal best for {}!", record.event);
                }
                _ => eprintln!("Recorded {} for {}", record.time_seconds, record.event),
            }
        }
        Command::Pr(PrCommand::List) => {
            let book = RecordBook::new(&cli.data_dir).context("Failed to open record book")?;
            let records = book.read_all()?;
            let best = best_by_event(&records);
            display::render_records(best.values().copied());
            let mut rest: Vec<&PersonalRecord> = records
                .iter()
                .filter(|r| !best.values().any(|b| std::ptr::eq(*b, *r)))
                .collect();
            rest.sort_by(|a, b| b.date_achieved.cmp(&a.date_achieved));
            if !rest.is_empty() {
                eprintln!("\nOther results:");
                display::render_records(rest);
            }
        }
        Command::Goal(command) => {
            let book = GoalBook::new(&cli.data_dir).context("Failed to open goal book")?;
            match command {
                GoalCommand::Add {
                    goal_type,
                    description,
                    target,
                    by,
                    priority,
                    category,
                    notes,
                } => {
                    let goal = book.add(Goal {
                        target_value: target,
                        target_date: by,
                        priority,
                        category,
                        notes,
                        ..Goal::new(&goal_type, &description, Utc::now())
                    })?;
                    eprintln!("Added goal #{}: {}", goal.id, goal.description);
                }
                GoalCommand::Progress { id, value } => {
                    let goal = book.update_progress(id, &value)?;
                    eprintln!("Goal #{} progress: {value}", goal.id);
                }
                GoalCommand::Done { id, on } => {
                    let goal = book.mark_achieved(id, on.unwrap_or(session.today))?;
                    eprintln!("Goal #{} reached on {}: {}", goal.id, goal.date_achieved.unwrap_or(session.today), goal.description);
                }
                GoalCommand::List => {
                    let all = book.read_all()?;
                    display::render_goals(&goals::ordered(&all), session.today);
                }
            }
        }
        Command::Message(command) => {
            let log = MessageLog::new(&cli.data_dir).context("Failed to open message log")?;
            match command {
                MessageCommand::Send {
                    message,
                    category,
                    priority,
                    from_coach,
                    workout,
                } => {
                    let sender = if from_coach { Sender::Coach } else { Sender::Athlete };
                    let stored = log.send(
                        NewMessage {
                            priority,
                            category,
                            workout_date: workout.then_some(session.today),
                            ..NewMessage::new(sender, &message)
                        },
                        Utc::now(),
                    )?;
                    eprintln!("Message #{} saved ({})", stored.id, stored.sender);
                }
                MessageCommand::List { limit } => {
                    display::render_messages(&log.recent(limit)?);
                    log.mark_read_from(Sender::Coach)?;
                }
            }
        }
        Command::Weather => {
            println!("{}", session.weather().await);
        }
        Command::Doctor => {
            let config = PlanConfig::from_path(&cli.config).with_context(|| {
                format!("Failed to load config from '{}'", cli.config.display())
            })?;
            let log = TrainingLog::new(&cli.data_dir).context("Failed to open training log")?;
            let entries = log.read_all().context("Failed to read training log")?;
            let report = diagnose(
                &config,
                &entries,
                DoctorContext {
                    today: session.today,
                    has_api_key: config.global.weather_api_key().is_some(),
                },
            );
            display::render_diagnostic_report(&report);
            if report.error_count() > 0 {
                std::process::exit(1);
            }
        }
        Command::SetStart { start_date } => {
            set_start_date(&cli.config, start_date).with_context(|| {
                format!("Failed to update config '{}'", cli.config.display())
            })?;
            eprintln!("Plan start date set to {start_date}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    run(Cli::parse()).await
}
