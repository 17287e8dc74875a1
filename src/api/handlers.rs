//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tokio::time::Instant;
use tracing::{error, info, warn};

use crate::{
    animation::PanEvent,
    error::QuizError,
    history::AttemptRecord,
    quiz::{QuizFrame, SessionEvent, SessionSnapshot},
    state::{AppState, View},
    tasks::SessionHandle,
};
use super::responses::{
    DialogAnswer, GestureRequest, GestureResponse, HealthResponse, QuizSummary, ScrollRequest,
    SessionResponse,
};

type ApiResult<T> = Result<Json<T>, StatusCode>;

fn live_session(state: &AppState) -> Result<SessionHandle, StatusCode> {
    state.session().ok_or_else(|| {
        warn!("No live quiz session");
        StatusCode::CONFLICT
    })
}

fn respond(state: &AppState, message: &str, session: Option<SessionSnapshot>) -> Json<SessionResponse> {
    let view = state.views.current();
    let status = if view == View::Quiz { "active" } else { "inactive" };
    Json(SessionResponse::new(
        status,
        message,
        view,
        state.views.dialog(),
        session,
    ))
}

async fn dispatch(state: &AppState, event: SessionEvent, message: &str) -> ApiResult<SessionResponse> {
    let handle = live_session(state)?;
    match handle.dispatch(event).await {
        Ok(snapshot) => Ok(respond(state, message, Some(snapshot))),
        Err(e) => {
            error!("Failed to deliver {:?}: {}", event, e);
            Err(StatusCode::CONFLICT)
        }
    }
}

/// Handle GET /quizzes - List available quizzes
pub async fn quizzes_handler(State(state): State<Arc<AppState>>) -> Json<Vec<QuizSummary>> {
    Json(
        state
            .content
            .quizzes()
            .iter()
            .map(|quiz| QuizSummary::from(quiz.as_ref()))
            .collect(),
    )
}

/// Handle POST /quizzes/:id/start - Load a quiz into a new session
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
) -> ApiResult<SessionResponse> {
    match state.start_session(&quiz_id) {
        Ok(snapshot) => {
            info!("Quiz '{}' started", quiz_id);
            Ok(respond(&state, "Quiz started", Some(snapshot)))
        }
        Err(QuizError::UnknownQuiz(id)) => {
            error!("Refusing to start unknown quiz '{}'", id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) => {
            error!("Failed to start quiz '{}': {}", quiz_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /session - Current view, dialog and session state
pub async fn session_handler(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let snapshot = state.session().map(|handle| handle.snapshot());
    respond(&state, "Current session", snapshot)
}

/// Handle POST /session/select/:index - Select an alternative
pub async fn select_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> ApiResult<SessionResponse> {
    dispatch(&state, SessionEvent::Select(index), "Alternative selected").await
}

/// Handle POST /session/confirm - Confirm the selection
pub async fn confirm_handler(State(state): State<Arc<AppState>>) -> ApiResult<SessionResponse> {
    dispatch(&state, SessionEvent::Confirm, "Answer confirmed").await
}

/// Handle POST /session/stop - Stop button
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> ApiResult<SessionResponse> {
    dispatch(&state, SessionEvent::Stop, "Stop requested").await
}

/// Handle POST /session/back - Hardware back
pub async fn back_handler(State(state): State<Arc<AppState>>) -> ApiResult<SessionResponse> {
    dispatch(&state, SessionEvent::Back, "Back requested").await
}

/// Handle POST /session/dialog - Answer the open dialog
pub async fn dialog_handler(
    State(state): State<Arc<AppState>>,
    Json(answer): Json<DialogAnswer>,
) -> ApiResult<SessionResponse> {
    let handle = live_session(&state)?;
    let Some(dialog) = state.views.take_dialog() else {
        warn!("Dialog answer received with no dialog open");
        return Err(StatusCode::CONFLICT);
    };

    let event = SessionEvent::DialogAnswered {
        confirmed: answer.confirmed,
    };
    match handle.dispatch(event).await {
        Ok(snapshot) => {
            let message = format!(
                "{} dialog answered {}",
                dialog.title,
                if answer.confirmed { &dialog.confirm_label } else { &dialog.cancel_label }
            );
            Ok(respond(&state, &message, Some(snapshot)))
        }
        Err(e) => {
            error!("Failed to deliver dialog answer: {}", e);
            Err(StatusCode::CONFLICT)
        }
    }
}

/// Handle POST /session/gesture - Raw pan sample on the question card
pub async fn gesture_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GestureRequest>,
) -> ApiResult<GestureResponse> {
    let handle = live_session(&state)?;
    let outcome = handle.pan(PanEvent {
        phase: request.phase,
        translation_x: request.translation_x,
        at: Instant::now(),
    });
    let drag_offset = handle.motion().drag.get();
    Ok(Json(GestureResponse::from_outcome(&outcome, drag_offset)))
}

/// Handle POST /session/scroll - Vertical scroll of the question view
pub async fn scroll_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScrollRequest>,
) -> ApiResult<QuizFrame> {
    let handle = live_session(&state)?;
    handle.scroll(request.offset_y);
    Ok(Json(handle.frame()))
}

/// Handle GET /session/frame - Presentational values for the current frame
pub async fn frame_handler(State(state): State<Arc<AppState>>) -> ApiResult<QuizFrame> {
    let handle = live_session(&state)?;
    Ok(Json(handle.frame()))
}

/// Handle GET /history - Recorded attempts
pub async fn history_handler(State(state): State<Arc<AppState>>) -> ApiResult<Vec<AttemptRecord>> {
    match state.history.records().await {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            error!("Failed to read history: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime()))
}
