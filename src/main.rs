//! Swipe Quiz - a gesture-driven multiple-choice quiz engine
//!
//! This is the main entry point for the swipe-quiz server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use swipe_quiz::{
    api::create_router,
    config::Config,
    content::{QuizContent, StaticContent},
    history::{HistoryRecorder, JsonlHistory, MemoryHistory},
    services::LogCues,
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("swipe_quiz={},tower_http=info", config.log_level()))
        .init();

    info!("Starting swipe-quiz server v{}", env!("CARGO_PKG_VERSION"));

    let content = match &config.content {
        Some(path) => StaticContent::from_file(path)?,
        None => StaticContent::bundled()?,
    };
    info!("Serving {} quizzes", content.quizzes().len());

    let history: Arc<dyn HistoryRecorder> = if config.no_history {
        info!("History kept in memory only");
        Arc::new(MemoryHistory::new())
    } else {
        info!("Recording history to {}", config.history.display());
        Arc::new(JsonlHistory::new(&config.history))
    };

    let state = Arc::new(AppState::new(
        Arc::new(content),
        history,
        Arc::new(LogCues),
    ));

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /quizzes               - List quizzes");
    info!("  POST /quizzes/:id/start     - Start a quiz");
    info!("  GET  /session               - Current view and session");
    info!("  POST /session/select/:index - Select an alternative");
    info!("  POST /session/confirm       - Confirm the answer");
    info!("  POST /session/stop          - Stop the quiz");
    info!("  POST /session/back          - Hardware back");
    info!("  POST /session/dialog        - Answer the open dialog");
    info!("  POST /session/gesture       - Pan sample on the card");
    info!("  POST /session/scroll        - Scroll the question view");
    info!("  GET  /session/frame         - Presentational frame");
    info!("  GET  /history               - Recorded attempts");
    info!("  GET  /health                - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // An unfinished attempt is never persisted
    state.close_session();
    info!("Server shutdown complete");
    Ok(())
}
