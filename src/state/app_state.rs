//! Main application state management

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Instant,
};
use tracing::info;

use super::ViewState;
use crate::{
    content::QuizContent,
    error::Result,
    history::HistoryRecorder,
    quiz::{QuizSession, SessionSnapshot},
    services::Cues,
    tasks::{spawn_session, SessionDeps, SessionHandle},
};

/// Shared state of the quiz host: content, history and the live session
pub struct AppState {
    pub content: Arc<dyn QuizContent>,
    pub history: Arc<dyn HistoryRecorder>,
    pub cues: Arc<dyn Cues>,
    /// Navigation target for sessions; tracks the current view and dialog
    pub views: Arc<ViewState>,
    session: Mutex<Option<SessionHandle>>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        content: Arc<dyn QuizContent>,
        history: Arc<dyn HistoryRecorder>,
        cues: Arc<dyn Cues>,
    ) -> Self {
        Self {
            content,
            history,
            cues,
            views: Arc::new(ViewState::new()),
            session: Mutex::new(None),
            start_time: Instant::now(),
        }
    }

    /// Load a quiz and make it the live session, discarding any previous one.
    /// The previous session loses its navigator before it is told to close.
    pub fn start_session(&self, quiz_id: &str) -> Result<SessionSnapshot> {
        let session = QuizSession::load(self.content.as_ref(), quiz_id)?;

        let deps = SessionDeps {
            navigator: Arc::new(self.views.enter_quiz()),
            cues: Arc::clone(&self.cues),
            history: Arc::clone(&self.history),
        };
        let handle = spawn_session(session, deps);
        let snapshot = handle.snapshot();

        let previous = self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            info!("Replacing live session for quiz '{}'", previous.snapshot().quiz_id);
            previous.close();
        }

        Ok(snapshot)
    }

    /// The live session, if one is still running
    pub fn session(&self) -> Option<SessionHandle> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|handle| !handle.is_closed())
            .cloned()
    }

    /// Discard the live session without recording it
    pub fn close_session(&self) {
        self.views.revoke();
        let previous = self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = previous {
            handle.close();
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
