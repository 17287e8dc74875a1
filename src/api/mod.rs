//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/quizzes", get(quizzes_handler))
        .route("/quizzes/:id/start", post(start_handler))
        .route("/session", get(session_handler))
        .route("/session/select/:index", post(select_handler))
        .route("/session/confirm", post(confirm_handler))
        .route("/session/stop", post(stop_handler))
        .route("/session/back", post(back_handler))
        .route("/session/dialog", post(dialog_handler))
        .route("/session/gesture", post(gesture_handler))
        .route("/session/scroll", post(scroll_handler))
        .route("/session/frame", get(frame_handler))
        .route("/history", get(history_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
