//! JSONL (JSON Lines) training log
//!
//! Keeps one entry per calendar day in `.hurdles/log.jsonl`. Logging the same
//! day twice replaces the earlier entry.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use crate::plan::day::WorkoutType;
use crate::plan::scheduler::Recommendation;
use crate::weather::WeatherCondition;

/// Record of one day's workout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutEntry {
    /// Training day
    pub date: NaiveDate,
    /// Variant that was recommended
    pub workout_type: WorkoutType,
    /// Training focus, e.g. "Speed Endurance"
    pub focus: String,
    /// Workout description
    pub description: String,
    /// Whether the workout was done
    pub completed: bool,
    /// When the workout was marked complete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Perceived difficulty, 1-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    /// Energy level before the workout, 1-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<u8>,
    /// Weather the recommendation was based on
    pub weather: WeatherCondition,
    /// When the entry was written
    pub logged_at: DateTime<Utc>,
}

impl WorkoutEntry {
    /// Build an entry from the day's recommendation.
    #[must_use]
    pub fn from_recommendation(rec: &Recommendation, completed: bool, now: DateTime<Utc>) -> Self {
        Self {
            date: rec.date,
            workout_type: rec.workout_type,
            focus: rec.focus.clone(),
            description: rec.text.clone(),
            completed,
            completed_at: completed.then_some(now),
            notes: None,
            difficulty: None,
            energy: None,
            weather: rec.weather,
            logged_at: now,
        }
    }

    /// Attach notes; blank notes are dropped.
    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes.filter(|n| !n.trim().is_empty());
        self
    }

    /// Attach difficulty and energy ratings (each 1-5).
    pub fn with_ratings(mut self, difficulty: Option<u8>, energy: Option<u8>) -> Result<Self> {
        self.difficulty = difficulty.map(|v| validate_rating("difficulty", v)).transpose()?;
        self.energy = energy.map(|v| validate_rating("energy", v)).transpose()?;
        Ok(self)
    }
}

fn validate_rating(name: &str, value: u8) -> Result<u8> {
    if !(1..=5).contains(&value) {
        bail!("Invalid {name} rating {value}: expected a value from 1 to 5");
    }
    Ok(value)
}

/// JSONL store for workout entries
///
/// Each line of `log.jsonl` is one [`WorkoutEntry`].
pub struct TrainingLog {
    log_path: PathBuf,
}

impl TrainingLog {
    /// Create a training log in `log_dir` (typically `.hurdles`)
    ///
    /// # Errors
    /// Returns an error if the log directory cannot be created
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Result<Self> {
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let log_path = log_dir.join("log.jsonl");

        Ok(Self { log_path })
    }

    /// Append an entry to the log without checking for an existing date
    pub fn append(&self, entry: &WorkoutEntry) -> Result<()> {
        append_line(&self.log_path, entry)
    }

    /// Insert an entry, replacing any entry for the same date.
    ///
    /// Returns `true` if an existing entry was replaced.
    pub fn upsert(&self, entry: &WorkoutEntry) -> Result<bool> {
        let mut entries = self.read_all()?;
        let replaced = match entries.iter_mut().find(|e| e.date == entry.date) {
            Some(existing) => {
                *existing = entry.clone();
                true
            }
            None => {
                entries.push(entry.clone());
                false
            }
        };
        entries.sort_by_key(|e| e.date);
        rewrite_lines(&self.log_path, &entries)?;
        Ok(replaced)
    }

    /// Read all entries from the log, in file order
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or a line is not valid JSON
    pub fn read_all(&self) -> Result<Vec<WorkoutEntry>> {
        read_lines(&self.log_path)
    }

    /// Entry for a given date, if one was logged
    pub fn for_date(&self, date: NaiveDate) -> Result<Option<WorkoutEntry>> {
        Ok(self.read_all()?.into_iter().find(|e| e.date == date))
    }

    /// Get the path to the log file
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

/// Append `item` as one JSON line, creating the file if needed.
pub(crate) fn append_line<T: Serialize>(path: &Path, item: &T) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let json = serde_json::to_string(item).context("Failed to serialize entry to JSON")?;

    writeln!(file, "{json}").context("Failed to write to log file")?;

    Ok(())
}

/// Replace the file with one JSON line per item.
///
/// Writes a sibling `.tmp` file first and renames it over `path`.
pub(crate) fn rewrite_lines<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let mut content = String::new();
    for item in items {
        let json = serde_json::to_string(item).context("Failed to serialize entry to JSON")?;
        content.push_str(&json);
        content.push('\n');
    }

    let tmp_path = path.with_extension("jsonl.tmp");
    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write log file: {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace log file: {}", path.display()))?;
    Ok(())
}

/// Read every non-blank line as JSON. A missing file reads as empty.
///
/// # Errors
/// Returns an error if the file cannot be read or a line is not valid JSON
pub(crate) fn read_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read log file: {}", path.display()))?;

    let mut items = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let item: T = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse line {} as JSON", line_num + 1))?;

        items.push(item);
    }

    Ok(items)
}
