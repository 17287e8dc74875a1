//! Completed attempt record

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::content::{Level, Quiz};

/// Write-once summary of a finished quiz attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Millisecond timestamp of completion
    pub id: String,
    pub title: String,
    pub level: Level,
    pub points: usize,
    /// Total number of questions in the quiz
    pub questions: usize,
}

impl AttemptRecord {
    /// Build the record for a quiz finished right now
    pub fn new(quiz: &Quiz, points: usize) -> Self {
        Self {
            id: Utc::now().timestamp_millis().to_string(),
            title: quiz.title.clone(),
            level: quiz.level,
            points,
            questions: quiz.total(),
        }
    }
}
