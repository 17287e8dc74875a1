//! Quiz content provider

use std::{collections::HashSet, path::Path, sync::Arc};
use tracing::{debug, info};

use super::Quiz;
use crate::error::{QuizError, Result};

const BUNDLED_QUIZZES: &str = include_str!("../../data/quizzes.json");

/// Read-only source of quizzes
pub trait QuizContent: Send + Sync {
    /// All quizzes in display order
    fn quizzes(&self) -> &[Arc<Quiz>];

    /// Look up a quiz by id
    fn quiz_by_id(&self, id: &str) -> Option<Arc<Quiz>> {
        self.quizzes().iter().find(|quiz| quiz.id == id).cloned()
    }
}

/// Quizzes loaded once at startup and never mutated
#[derive(Debug, Clone)]
pub struct StaticContent {
    quizzes: Vec<Arc<Quiz>>,
}

impl StaticContent {
    /// Validate and wrap a list of quizzes
    pub fn new(quizzes: Vec<Quiz>) -> Result<Self> {
        let mut seen = HashSet::new();
        for quiz in &quizzes {
            quiz.validate().map_err(QuizError::InvalidContent)?;
            if !seen.insert(quiz.id.clone()) {
                return Err(QuizError::InvalidContent(format!(
                    "duplicate quiz id '{}'",
                    quiz.id
                )));
            }
        }

        debug!("Loaded {} quizzes", quizzes.len());
        Ok(Self {
            quizzes: quizzes.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parse quizzes from a JSON array
    pub fn from_json(json: &str) -> Result<Self> {
        let quizzes: Vec<Quiz> = serde_json::from_str(json).map_err(QuizError::ContentParse)?;
        Self::new(quizzes)
    }

    /// Load quizzes from a JSON file on disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| QuizError::ContentIo {
            path: path.to_path_buf(),
            source,
        })?;
        let content = Self::from_json(&json)?;
        info!("Quiz content loaded from {}", path.display());
        Ok(content)
    }

    /// The quizzes compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_QUIZZES)
    }
}

impl QuizContent for StaticContent {
    fn quizzes(&self) -> &[Arc<Quiz>] {
        &self.quizzes
    }
}
