//! Quiz, question and difficulty level definitions

use serde::{Deserialize, Serialize};

/// Difficulty level of a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub title: String,
    pub alternatives: Vec<String>,
    /// Zero-based index into `alternatives`
    pub correct: usize,
}

impl Question {
    /// Check whether the given alternative is the correct one
    pub fn is_correct(&self, alternative: usize) -> bool {
        self.correct == alternative
    }

    /// Check that the question has at least two alternatives and a valid answer
    pub fn validate(&self) -> Result<(), String> {
        if self.alternatives.len() < 2 {
            return Err(format!(
                "question '{}' needs at least 2 alternatives, found {}",
                self.title,
                self.alternatives.len()
            ));
        }
        if self.correct >= self.alternatives.len() {
            return Err(format!(
                "question '{}' marks alternative {} as correct but only has {}",
                self.title,
                self.correct,
                self.alternatives.len()
            ));
        }
        Ok(())
    }
}

/// An ordered list of questions under a title and level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub level: Level,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Number of questions in the quiz
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err(format!("quiz '{}' has an empty id", self.title));
        }
        if self.questions.is_empty() {
            return Err(format!("quiz '{}' has no questions", self.id));
        }
        for question in &self.questions {
            question
                .validate()
                .map_err(|e| format!("quiz '{}': {}", self.id, e))?;
        }
        Ok(())
    }
}
