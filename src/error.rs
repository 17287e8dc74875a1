//! Error types shared by the quiz engine and its host

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by content loading, history persistence and session plumbing.
///
/// Scoring, advancing and gesture interpretation never fail; inputs that
/// arrive in the wrong sub-state are rejected without touching the session.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum QuizError {
    /// A quiz id that the content provider does not know. Ids come from
    /// internal navigation, so this is a caller bug rather than user input.
    #[error("unknown quiz id '{0}'")]
    UnknownQuiz(String),

    #[error("invalid quiz content: {0}")]
    InvalidContent(String),

    #[error("failed to read quiz content from {path:?}")]
    ContentIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse quiz content: {0}")]
    ContentParse(#[source] serde_json::Error),

    #[error("history I/O error at {path:?}: {source}")]
    HistoryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode history record: {0}")]
    HistoryEncode(#[source] serde_json::Error),

    #[error("history storage unavailable: {0}")]
    HistoryUnavailable(String),

    #[error("quiz session is closed")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, QuizError>;
