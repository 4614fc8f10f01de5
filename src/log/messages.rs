//! Coach messages
//!
//! A two-way message thread between the athlete and the coach, kept in
//! `.hurdles/messages.jsonl`. Messages from the coach stay unread until the
//! athlete lists them.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::log::jsonl::{read_lines, rewrite_lines};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The athlete using this tool
    Athlete,
    /// The coach
    Coach,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Athlete => f.write_str("athlete"),
            Self::Coach => f.write_str("coach"),
        }
    }
}

/// Message urgency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MessagePriority {
    /// Can wait
    Low,
    /// Default
    #[default]
    Normal,
    /// Needs a reply soon
    High,
    /// Needs a reply today
    Urgent,
}

impl MessagePriority {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

fn default_category() -> String {
    "general".to_string()
}

/// One message in the thread
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoachMessage {
    /// Sequential id, starting at 1
    pub id: u64,
    /// Author
    pub sender: Sender,
    /// Message body
    pub message: String,
    /// When the message was written
    pub timestamp: DateTime<Utc>,
    /// Whether the recipient has seen it
    #[serde(default)]
    pub is_read: bool,
    /// Urgency
    #[serde(default)]
    pub priority: MessagePriority,
    /// Topic, e.g. "technique", "injury", "race strategy"
    #[serde(default = "default_category")]
    pub category: String,
    /// Training day the message is about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_date: Option<NaiveDate>,
}

/// Fields of a message before it is stored
#[derive(Debug, Clone)]
pub struct NewMessage {
    /// Author
    pub sender: Sender,
    /// Message body
    pub message: String,
    /// Urgency
    pub priority: MessagePriority,
    /// Topic
    pub category: String,
    /// Training day the message is about
    pub workout_date: Option<NaiveDate>,
}

impl NewMessage {
    /// A normal-priority general message.
    #[must_use]
    pub fn new(sender: Sender, message: &str) -> Self {
        Self {
            sender,
            message: message.to_string(),
            priority: MessagePriority::Normal,
            category: default_category(),
            workout_date: None,
        }
    }
}

/// JSONL store for the message thread
pub struct MessageLog {
    path: PathBuf,
}

impl MessageLog {
    /// Create a message log in `dir` (typically `.hurdles`)
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
        Ok(Self {
            path: dir.join("messages.jsonl"),
        })
    }

    /// Store a message and return it with its assigned id.
    ///
    /// Messages the athlete writes count as read by their author.
    pub fn send(&self, new: NewMessage, now: DateTime<Utc>) -> Result<CoachMessage> {
        let text = new.message.trim();
        if text.is_empty() {
            bail!("Message cannot be empty");
        }
        let category = new.category.trim();

        let mut messages = self.read_all()?;
        let id = messages.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let message = CoachMessage {
            id,
            sender: new.sender,
            message: text.to_string(),
            timestamp: now,
            is_read: new.sender == Sender::Athlete,
            priority: new.priority,
            category: if category.is_empty() {
                default_category()
            } else {
                category.to_lowercase()
            },
            workout_date: new.workout_date,
        };
        messages.push(message.clone());
        rewrite_lines(&self.path, &messages)?;
        Ok(message)
    }

    /// All messages, oldest first
    pub fn read_all(&self) -> Result<Vec<CoachMessage>> {
        read_lines(&self.path)
    }

    /// The newest `limit` messages, newest first
    pub fn recent(&self, limit: usize) -> Result<Vec<CoachMessage>> {
        let mut messages = self.read_all()?;
        messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        messages.truncate(limit);
        Ok(messages)
    }

    /// Number of unread messages from `sender`
    pub fn unread_from(&self, sender: Sender) -> Result<usize> {
        Ok(self
            .read_all()?
            .iter()
            .filter(|m| m.sender == sender && !m.is_read)
            .count())
    }

    /// Mark every message from `sender` as read.
    ///
    /// Returns how many were newly marked. The file is only rewritten when
    /// something changed.
    pub fn mark_read_from(&self, sender: Sender) -> Result<usize> {
        let mut messages = self.read_all()?;
        let mut marked = 0;
        for message in messages.iter_mut().filter(|m| m.sender == sender && !m.is_read) {
            message.is_read = true;
            marked += 1;
        }
        if marked > 0 {
            rewrite_lines(&self.path, &messages)?;
        }
        Ok(marked)
    }

    /// Get the path to the messages file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
