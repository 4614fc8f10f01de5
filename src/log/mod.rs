//! Training history
//!
//! JSONL stores for workout completions, personal records, tracked goals
//! and coach messages, plus statistics computed over the workout log.

pub mod goals;
pub mod jsonl;
pub mod messages;
pub mod records;
pub mod stats;

pub use goals::{Goal, GoalBook, GoalPriority};
pub use jsonl::{TrainingLog, WorkoutEntry};
pub use messages::{CoachMessage, MessageLog, MessagePriority, NewMessage, Sender};
pub use records::{PersonalRecord, RecordBook};
