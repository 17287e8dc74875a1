//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    animation::PanPhase,
    content::{Level, Quiz},
    quiz::{DragOutcome, SessionSnapshot},
    services::ConfirmDialog,
    state::View,
};

/// Response for every session endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub view: View,
    pub dialog: Option<ConfirmDialog>,
    pub session: Option<SessionSnapshot>,
}

impl SessionResponse {
    pub fn new(
        status: &str,
        message: impl Into<String>,
        view: View,
        dialog: Option<ConfirmDialog>,
        session: Option<SessionSnapshot>,
    ) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            view,
            dialog,
            session,
        }
    }
}

/// One entry of the quiz list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub level: Level,
    pub questions: usize,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id.clone(),
            title: quiz.title.clone(),
            level: quiz.level,
            questions: quiz.total(),
        }
    }
}

/// Body of POST /session/dialog
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DialogAnswer {
    pub confirmed: bool,
}

/// Body of POST /session/gesture
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GestureRequest {
    pub phase: PanPhase,
    #[serde(default)]
    pub translation_x: f64,
}

/// What a gesture sample did to the card
#[derive(Debug, Clone, Serialize)]
pub struct GestureResponse {
    pub outcome: String,
    pub drag_offset: f64,
    pub skip_requested: bool,
}

impl GestureResponse {
    pub fn from_outcome(outcome: &DragOutcome, drag_offset: f64) -> Self {
        let (label, skip_requested) = match outcome {
            DragOutcome::Ignored => ("ignored", false),
            DragOutcome::Dragging { .. } => ("dragging", false),
            DragOutcome::Released { skip_requested, .. } => ("released", *skip_requested),
        };
        Self {
            outcome: label.to_string(),
            drag_offset,
            skip_requested,
        }
    }
}

/// Body of POST /session/scroll
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScrollRequest {
    pub offset_y: f64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
}

impl HealthResponse {
    pub fn ok(uptime: String) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
        }
    }
}
