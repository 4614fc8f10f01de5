//! Training goals
//!
//! Goals with a target, current progress and an achieved flag, kept in
//! `.hurdles/goals.jsonl`. The free-form `goals` list in `hurdles.toml` is
//! only shown with the daily workout; these are the goals that get tracked.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::log::jsonl::{read_lines, rewrite_lines};

/// How much a goal matters this season
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    /// Nice to have
    Low,
    /// Default
    #[default]
    Medium,
    /// Season focus
    High,
}

impl GoalPriority {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A tracked goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    /// Sequential id, assigned when the goal is added
    pub id: u64,
    /// Kind of goal, e.g. "time", "technique", "strength"
    pub goal_type: String,
    /// What the goal is
    pub description: String,
    /// Target to reach, e.g. "39.99" or "15 steps to H1"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<String>,
    /// Deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    /// Latest progress toward the target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<String>,
    /// Whether the goal has been reached
    #[serde(default)]
    pub is_achieved: bool,
    /// When the goal was reached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_achieved: Option<NaiveDate>,
    /// Importance
    #[serde(default)]
    pub priority: GoalPriority,
    /// Horizon, e.g. "short-term", "season", "career"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the goal was added
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// An open, medium-priority goal with no target details.
    #[must_use]
    pub fn new(goal_type: &str, description: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            goal_type: goal_type.to_string(),
            description: description.to_string(),
            target_value: None,
            target_date: None,
            current_value: None,
            is_achieved: false,
            date_achieved: None,
            priority: GoalPriority::Medium,
            category: None,
            notes: None,
            created_at,
        }
    }

    /// Open goal whose deadline has passed
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_achieved && self.target_date.is_some_and(|d| d < today)
    }

    fn validate(&self) -> Result<()> {
        if self.goal_type.trim().is_empty() {
            bail!("Goal type cannot be empty");
        }
        if self.description.trim().is_empty() {
            bail!("Goal description cannot be empty");
        }
        Ok(())
    }
}

/// JSONL store for tracked goals
pub struct GoalBook {
    path: PathBuf,
}

impl GoalBook {
    /// Create a goal book in `dir` (typically `.hurdles`)
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
        Ok(Self {
            path: dir.join("goals.jsonl"),
        })
    }

    /// Validate and store a goal, returning it with its assigned id
    pub fn add(&self, mut goal: Goal) -> Result<Goal> {
        goal.validate()?;
        goal.goal_type = goal.goal_type.trim().to_lowercase();

        let mut goals = self.read_all()?;
        goal.id = goals.iter().map(|g| g.id).max().unwrap_or(0) + 1;
        goals.push(goal.clone());
        rewrite_lines(&self.path, &goals)?;
        Ok(goal)
    }

    /// All goals, in the order they were added
    pub fn read_all(&self) -> Result<Vec<Goal>> {
        read_lines(&self.path)
    }

    /// Record progress on a goal
    pub fn update_progress(&self, id: u64, current_value: &str) -> Result<Goal> {
        let value = current_value.trim();
        if value.is_empty() {
            bail!("Progress value cannot be empty");
        }
        self.modify(id, |goal| goal.current_value = Some(value.to_string()))
    }

    /// Mark a goal as reached on `on`.
    ///
    /// Marking an achieved goal again keeps the original date.
    pub fn mark_achieved(&self, id: u64, on: NaiveDate) -> Result<Goal> {
        self.modify(id, |goal| {
            if !goal.is_achieved {
                goal.is_achieved = true;
                goal.date_achieved = Some(on);
            }
        })
    }

    fn modify(&self, id: u64, change: impl FnOnce(&mut Goal)) -> Result<Goal> {
        let mut goals = self.read_all()?;
        let Some(goal) = goals.iter_mut().find(|g| g.id == id) else {
            bail!("No goal with id {id}");
        };
        change(goal);
        let updated = goal.clone();
        rewrite_lines(&self.path, &goals)?;
        Ok(updated)
    }

    /// Get the path to the goals file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Open goals first (highest priority, then earliest deadline), then
/// achieved goals, most recent first.
#[must_use]
pub fn ordered(goals: &[Goal]) -> Vec<&Goal> {
    let mut sorted: Vec<&Goal> = goals.iter().collect();
    sorted.sort_by(|a, b| {
        a.is_achieved
            .cmp(&b.is_achieved)
            .then_with(|| {
                if a.is_achieved {
                    b.date_achieved.cmp(&a.date_achieved)
                } else {
                    b.priority.cmp(&a.priority).then_with(|| {
                        // goals without a deadline go last
                        match (a.target_date, b.target_date) {
                            (Some(x), Some(y)) => x.cmp(&y),
                            (Some(_), None) => std::cmp::Ordering::Less,
                            (None, Some(_)) => std::cmp::Ordering::Greater,
                            (None, None) => std::cmp::Ordering::Equal,
                        }
                    })
                }
            })
            .then(a.id.cmp(&b.id))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::date;
    use tempfile::TempDir;

    fn goal(description: &str) -> Goal {
        Goal::new("time", description, Utc::now())
    }

    #[test]
    fn test_add_assigns_ids_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let book = GoalBook::new(temp_dir.path()).unwrap();

        let first = book
            .add(Goal {
                target_value: Some("39.99".to_string()),
                target_date: Some(date(2025, 5, 31)),
                priority: GoalPriority::High,
                ..goal("Break 40 seconds in the 300mH")
            })
            .unwrap();
        let second = book
            .add(Goal::new(" Technique ", "15 steps to hurdle 1", Utc::now()))
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.goal_type, "technique");

        let goals = book.read_all().unwrap();
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0], first);
        assert_eq!(book.path(), temp_dir.path().join("goals.jsonl"));
    }

    #[test]
    fn test_reject_blank_description() {
        let temp_dir = TempDir::new().unwrap();
        let book = GoalBook::new(temp_dir.path()).unwrap();

        let err = book.add(goal("  ")).unwrap_err();
        assert!(err.to_string().contains("description"));
        assert!(book.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_progress() {
        let temp_dir = TempDir::new().unwrap();
        let book = GoalBook::new(temp_dir.path()).unwrap();
        let added = book.add(goal("Sub-40")).unwrap();

        let updated = book.update_progress(added.id, " 41.82 ").unwrap();
        assert_eq!(updated.current_value.as_deref(), Some("41.82"));
        assert_eq!(book.read_all().unwrap()[0].current_value.as_deref(), Some("41.82"));

        assert!(book.update_progress(added.id, "").is_err());
    }

    #[test]
    fn test_unknown_id_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let book = GoalBook::new(temp_dir.path()).unwrap();
        book.add(goal("Sub-40")).unwrap();

        let err = book.mark_achieved(9, date(2025, 5, 1)).unwrap_err();
        assert!(err.to_string().contains("No goal with id 9"));
    }

    #[test]
    fn test_mark_achieved_keeps_first_date() {
        let temp_dir = TempDir::new().unwrap();
        let book = GoalBook::new(temp_dir.path()).unwrap();
        let added = book.add(goal("Sub-40")).unwrap();

        let done = book.mark_achieved(added.id, date(2025, 5, 10)).unwrap();
        assert!(done.is_achieved);
        assert_eq!(done.date_achieved, Some(date(2025, 5, 10)));

        let again = book.mark_achieved(added.id, date(2025, 6, 1)).unwrap();
        assert_eq!(again.date_achieved, Some(date(2025, 5, 10)));
    }

    #[test]
    fn test_is_overdue() {
        let mut g = Goal {
            target_date: Some(date(2025, 5, 31)),
            ..goal("Sub-40")
        };
        assert!(!g.is_overdue(date(2025, 5, 31)));
        assert!(g.is_overdue(date(2025, 6, 1)));

        g.is_achieved = true;
        assert!(!g.is_overdue(date(2025, 6, 1)));
        assert!(!goal("no deadline").is_overdue(date(2030, 1, 1)));
    }

    #[test]
    fn test_ordered_open_goals_first() {
        let goals = vec![
            Goal {
                id: 1,
                is_achieved: true,
                date_achieved: Some(date(2025, 3, 1)),
                ..goal("done early")
            },
            Goal {
                id: 2,
                priority: GoalPriority::Low,
                ..goal("low")
            },
            Goal {
                id: 3,
                priority: GoalPriority::High,
                ..goal("high, no deadline")
            },
            Goal {
                id: 4,
                priority: GoalPriority::High,
                target_date: Some(date(2025, 6, 1)),
                ..goal("high, deadline")
            },
            Goal {
                id: 5,
                is_achieved: true,
                date_achieved: Some(date(2025, 4, 1)),
                ..goal("done later")
            },
        ];

        let ids: Vec<u64> = ordered(&goals).iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 5, 1]);
    }
}
