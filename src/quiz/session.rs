//! Discrete quiz session state machine

use std::sync::Arc;
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    content::{Level, Question, Quiz, QuizContent},
    error::{QuizError, Result},
    history::AttemptRecord,
    services::ConfirmDialog,
};

/// Feedback state of the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    #[default]
    Neutral,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Active,
    Finished,
}

/// Result of a confirm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The selection was scored
    Scored { correct: bool },
    /// Nothing was selected; the skip dialog must be shown instead
    SkipRequested,
    /// The session is not waiting for an answer
    Rejected,
}

/// Result of an advance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at this index
    NextQuestion(usize),
    /// The last question was left; the attempt is complete
    Finished(AttemptRecord),
}

/// Progress through one quiz. Owns every discrete field; nothing else
/// mutates the index, the score or the reply status.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Arc<Quiz>,
    current: usize,
    selected: Option<usize>,
    points: usize,
    reply: ReplyStatus,
    phase: Phase,
}

impl QuizSession {
    /// Start a session for `quiz_id`, failing if the provider does not know it
    pub fn load(content: &dyn QuizContent, quiz_id: &str) -> Result<Self> {
        let quiz = content
            .quiz_by_id(quiz_id)
            .ok_or_else(|| QuizError::UnknownQuiz(quiz_id.to_string()))?;
        Self::new(quiz)
    }

    /// Start a session for an already loaded quiz. The quiz must be valid;
    /// in particular it needs at least one question.
    pub fn new(quiz: Arc<Quiz>) -> Result<Self> {
        quiz.validate().map_err(QuizError::InvalidContent)?;
        info!("Starting quiz '{}' ({} questions)", quiz.title, quiz.total());
        Ok(Self {
            quiz,
            current: 0,
            selected: None,
            points: 0,
            reply: ReplyStatus::Neutral,
            phase: Phase::Active,
        })
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.quiz.questions[self.current]
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn reply_status(&self) -> ReplyStatus {
        self.reply
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn total(&self) -> usize {
        self.quiz.total()
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.total()
    }

    /// Active and waiting for an answer
    pub fn awaiting_answer(&self) -> bool {
        self.phase == Phase::Active && self.reply == ReplyStatus::Neutral
    }

    /// Select an alternative of the current question. Returns false when
    /// the session is not waiting for an answer or the index is out of range.
    pub fn select_alternative(&mut self, index: usize) -> bool {
        if !self.awaiting_answer() {
            debug!("Selection {} rejected in reply state {:?}", index, self.reply);
            return false;
        }
        if index >= self.current_question().alternatives.len() {
            debug!("Selection {} out of range for question {}", index, self.current);
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Score the selection, or ask for a skip when nothing is selected
    pub fn confirm(&mut self) -> ConfirmOutcome {
        if !self.awaiting_answer() {
            return ConfirmOutcome::Rejected;
        }

        let Some(selected) = self.selected.take() else {
            return ConfirmOutcome::SkipRequested;
        };

        let correct = self.current_question().is_correct(selected);
        if correct {
            self.points += 1;
            self.reply = ReplyStatus::Correct;
        } else {
            self.reply = ReplyStatus::Incorrect;
        }
        debug!(
            "Question {} answered with {}: correct={}, points={}",
            self.current, selected, correct, self.points
        );
        ConfirmOutcome::Scored { correct }
    }

    /// Dialog for skipping the current question, if a skip is allowed now
    pub fn request_skip(&self) -> Option<ConfirmDialog> {
        self.awaiting_answer().then(ConfirmDialog::skip)
    }

    /// Stopping always needs confirmation
    pub fn request_stop(&self) -> ConfirmDialog {
        ConfirmDialog::stop()
    }

    /// Leave the current question. Returns `None` once finished.
    pub fn advance(&mut self) -> Option<Advance> {
        if self.phase == Phase::Finished {
            return None;
        }

        if self.is_last_question() {
            self.phase = Phase::Finished;
            info!(
                "Quiz '{}' finished with {}/{} points",
                self.quiz.title,
                self.points,
                self.total()
            );
            return Some(Advance::Finished(AttemptRecord::new(&self.quiz, self.points)));
        }

        self.current += 1;
        self.selected = None;
        self.reply = ReplyStatus::Neutral;
        debug!("Advanced to question {}", self.current);
        Some(Advance::NextQuestion(self.current))
    }

    /// Serializable view of the discrete state
    pub fn snapshot(&self, revision: u64) -> SessionSnapshot {
        let question = self.current_question();
        SessionSnapshot {
            revision,
            quiz_id: self.quiz.id.clone(),
            title: self.quiz.title.clone(),
            level: self.quiz.level,
            question_index: self.current,
            total: self.total(),
            question: question.title.clone(),
            alternatives: question.alternatives.clone(),
            selected: self.selected,
            points: self.points,
            reply_status: self.reply,
            phase: self.phase,
        }
    }
}

/// Point-in-time copy of a session, published after every handled event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Bumped once per handled event
    pub revision: u64,
    pub quiz_id: String,
    pub title: String,
    pub level: Level,
    pub question_index: usize,
    pub total: usize,
    pub question: String,
    pub alternatives: Vec<String>,
    pub selected: Option<usize>,
    pub points: usize,
    pub reply_status: ReplyStatus,
    pub phase: Phase,
}
