//! The host's current view and open dialog

use std::sync::{Arc, Mutex, PoisonError};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::services::{CompletionSummary, ConfirmDialog, Navigator};

/// Screen the host is showing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Home,
    Quiz,
    Finish {
        points: usize,
        total: usize,
        warning: Option<String>,
    },
}

/// Where the host should be, driven by at most one session at a time
#[derive(Debug)]
pub struct ViewState {
    view: watch::Sender<View>,
    dialog: watch::Sender<Option<ConfirmDialog>>,
    /// Generation of the session allowed to navigate
    generation: Mutex<u64>,
}

impl ViewState {
    pub fn new() -> Self {
        let (view, _) = watch::channel(View::Home);
        let (dialog, _) = watch::channel(None);
        Self {
            view,
            dialog,
            generation: Mutex::new(0),
        }
    }

    pub fn current(&self) -> View {
        self.view.borrow().clone()
    }

    pub fn dialog(&self) -> Option<ConfirmDialog> {
        self.dialog.borrow().clone()
    }

    /// Close the open dialog, returning it
    pub fn take_dialog(&self) -> Option<ConfirmDialog> {
        self.dialog.send_replace(None)
    }

    /// Show the quiz view for a new session. Navigators handed out earlier
    /// stop having any effect.
    pub fn enter_quiz(self: &Arc<Self>) -> SessionNavigator {
        let mut generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
        *generation += 1;
        self.dialog.send_replace(None);
        self.view.send_replace(View::Quiz);
        SessionNavigator {
            views: Arc::clone(self),
            generation: *generation,
        }
    }

    /// Stop every session navigator from changing the view
    pub fn revoke(&self) {
        *self.generation.lock().unwrap_or_else(PoisonError::into_inner) += 1;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Navigator of one session. Requests are dropped once a newer session
/// has entered the quiz view or the session was revoked.
#[derive(Debug, Clone)]
pub struct SessionNavigator {
    views: Arc<ViewState>,
    generation: u64,
}

impl SessionNavigator {
    fn navigate(&self, action: impl FnOnce(&ViewState)) {
        let current = self
            .views
            .generation
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *current != self.generation {
            debug!(
                "Dropping navigation from superseded session {} (current {})",
                self.generation, *current
            );
            return;
        }
        action(&self.views);
    }
}

impl Navigator for SessionNavigator {
    fn finish(&self, summary: CompletionSummary) {
        self.navigate(|views| {
            info!("Navigating to finish view: {}/{}", summary.points, summary.total);
            views.dialog.send_replace(None);
            views.view.send_replace(View::Finish {
                points: summary.points,
                total: summary.total,
                warning: summary.warning,
            });
        });
    }

    fn home(&self) {
        self.navigate(|views| {
            info!("Navigating to home view");
            views.dialog.send_replace(None);
            views.view.send_replace(View::Home);
        });
    }

    fn confirm(&self, dialog: ConfirmDialog) {
        self.navigate(|views| {
            info!("Showing {:?} dialog", dialog.kind);
            views.dialog.send_replace(Some(dialog));
        });
    }
}
