//! Personal records
//!
//! Race and time-trial results, appended to `.hurdles/records.jsonl`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::log::jsonl::{append_line, read_lines};

/// A timed result for one event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalRecord {
    /// Event name, e.g. "300m Hurdles"
    pub event: String,
    /// Time in seconds
    pub time_seconds: f64,
    /// Date the time was run
    pub date_achieved: NaiveDate,
    /// Meet or competition name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meet_name: Option<String>,
    /// Weather or track conditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Official meet result (as opposed to practice)
    #[serde(default = "default_official")]
    pub is_official: bool,
}

const fn default_official() -> bool {
    true
}

impl PersonalRecord {
    /// Create an official record with no meet details.
    #[must_use]
    pub fn new(event: &str, time_seconds: f64, date_achieved: NaiveDate) -> Self {
        Self {
            event: event.to_string(),
            time_seconds,
            date_achieved,
            meet_name: None,
            conditions: None,
            notes: None,
            is_official: true,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.event.trim().is_empty() {
            bail!("Event name cannot be empty");
        }
        if !self.time_seconds.is_finite() || self.time_seconds <= 0.0 {
            bail!(
                "Invalid time {} for '{}': expected a positive number of seconds",
                self.time_seconds,
                self.event
            );
        }
        Ok(())
    }
}

/// Format seconds as `m:ss.cc`, or `ss.cc` under a minute.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    let seconds = (seconds * 100.0).round() / 100.0;
    if seconds < 60.0 {
        return format!("{seconds:.2}");
    }
    let minutes = (seconds / 60.0).floor();
    let rest = seconds - minutes * 60.0;
    format!("{minutes:.0}:{rest:05.2}")
}

/// JSONL store for personal records
pub struct RecordBook {
    path: PathBuf,
}

impl RecordBook {
    /// Create a record book in `dir` (typically `.hurdles`)
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
        Ok(Self {
            path: dir.join("records.jsonl"),
        })
    }

    /// Validate and append a record
    pub fn add(&self, record: &PersonalRecord) -> Result<()> {
        record.validate()?;
        append_line(&self.path, record)
    }

    /// Read all records, in the order they were added
    pub fn read_all(&self) -> Result<Vec<PersonalRecord>> {
        read_lines(&self.path)
    }

    /// Get the path to the records file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Fastest record per event, ties going to the earlier date.
#[must_use]
pub fn best_by_event(records: &[PersonalRecord]) -> BTreeMap<&str, &PersonalRecord> {
    let mut best: BTreeMap<&str, &PersonalRecord> = BTreeMap::new();
    for record in records {
        best.entry(record.event.as_str())
            .and_modify(|current| {
                let faster = record.time_seconds < current.time_seconds;
                let earlier_tie = (record.time_seconds - current.time_seconds).abs() < f64::EPSILON
                    && record.date_achieved < current.date_achieved;
                if faster || earlier_tie {
                    *current = record;
                }
            })
            .or_insert(record);
    }
    best
}

/// Most recent record for an event
#[must_use]
pub fn latest<'a>(records: &'a [PersonalRecord], event: &str) -> Option<&'a PersonalRecord> {
    records
        .iter()
        .filter(|r| r.event == event)
        .max_by_key(|r| r.date_achieved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::date;
    use tempfile::TempDir;

    #[test]
    fn test_add_and_read_records() {
        let temp_dir = TempDir::new().unwrap();
        let book = RecordBook::new(temp_dir.path()).unwrap();

        let mut record = PersonalRecord::new("300m Hurdles", 42.87, date(2025, 4, 12));
        record.meet_name = Some("County Invitational".to_string());
        book.add(&record).unwrap();
        book.add(&PersonalRecord::new("200m", 24.1, date(2025, 4, 19)))
            .unwrap();

        let records = book.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], record);
        assert!(records[1].is_official);
    }

    #[test]
    fn test_reject_non_positive_time() {
        let temp_dir = TempDir::new().unwrap();
        let book = RecordBook::new(temp_dir.path()).unwrap();

        let err = book
            .add(&PersonalRecord::new("300m Hurdles", 0.0, date(2025, 4, 12)))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid time"));

        let err = book
            .add(&PersonalRecord::new("300m Hurdles", f64::NAN, date(2025, 4, 12)))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid time"));
        assert!(book.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_reject_empty_event() {
        let temp_dir = TempDir::new().unwrap();
        let book = RecordBook::new(temp_dir.path()).unwrap();
        let err = book
            .add(&PersonalRecord::new(" ", 40.0, date(2025, 4, 12)))
            .unwrap_err();
        assert!(err.to_string().contains("Event name"));
    }

    #[test]
    fn test_missing_official_flag_defaults_to_true() {
        let record: PersonalRecord = serde_json::from_str(
            r#"{"event":"300m Hurdles","time_seconds":41.5,"date_achieved":"2025-05-01"}"#,
        )
        .unwrap();
        assert!(record.is_official);
    }

    #[test]
    fn test_best_by_event() {
        let records = vec![
            PersonalRecord::new("300m Hurdles", 43.2, date(2025, 3, 1)),
            PersonalRecord::new("300m Hurdles", 42.1, date(2025, 4, 1)),
            PersonalRecord::new("300m Hurdles", 42.1, date(2025, 3, 20)),
            PersonalRecord::new("200m", 24.0, date(2025, 4, 1)),
        ];

        let best = best_by_event(&records);
        assert_eq!(best.len(), 2);
        assert_eq!(best["300m Hurdles"].date_achieved, date(2025, 3, 20));
        assert!((best["200m"].time_seconds - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_latest_record_for_event() {
        let records = vec![
            PersonalRecord::new("300m Hurdles", 43.2, date(2025, 3, 1)),
            PersonalRecord::new("300m Hurdles", 44.0, date(2025, 5, 1)),
            PersonalRecord::new("200m", 24.0, date(2025, 6, 1)),
        ];

        let newest = latest(&records, "300m Hurdles").unwrap();
        assert_eq!(newest.date_achieved, date(2025, 5, 1));
        assert!(latest(&records, "400m").is_none());
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(42.87), "42.87");
        assert_eq!(format_time(65.4), "1:05.40");
        assert_eq!(format_time(125.0), "2:05.00");
    }

    #[test]
    fn test_format_time_carries_rounding() {
        assert_eq!(format_time(59.999), "1:00.00");
        assert_eq!(format_time(119.999), "2:00.00");
        assert_eq!(format_time(59.994), "59.99");
        assert_eq!(format_time(61.005_1), "1:01.01");
    }
}
