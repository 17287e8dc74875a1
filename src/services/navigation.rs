//! Navigation requests the quiz core makes of its host

use serde::{Deserialize, Serialize};

/// Which question a confirmation dialog asks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    Skip,
    Stop,
}

/// A blocking Yes/No dialog. The host delivers the answer back to the
/// session that asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmDialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl ConfirmDialog {
    fn new(kind: DialogKind, title: &str, message: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.to_string(),
            confirm_label: "Yes".to_string(),
            cancel_label: "No".to_string(),
        }
    }

    pub fn skip() -> Self {
        Self::new(DialogKind::Skip, "Skip", "Do you really want to skip this question?")
    }

    pub fn stop() -> Self {
        Self::new(DialogKind::Stop, "Stop", "Do you want to stop now?")
    }
}

/// Payload of the completion view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionSummary {
    pub points: usize,
    pub total: usize,
    /// Set when the attempt could not be written to history
    pub warning: Option<String>,
}

/// The three transitions a hosting navigator must implement
pub trait Navigator: Send + Sync {
    /// Go to the completion view
    fn finish(&self, summary: CompletionSummary);

    /// Go back to the home view
    fn home(&self);

    /// Show a blocking confirmation dialog
    fn confirm(&self, dialog: ConfirmDialog);
}
