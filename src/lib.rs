//! Swipe Quiz - a gesture-driven multiple-choice quiz engine
//!
//! One question at a time, scored on confirm, skipped by swiping the card
//! left, with a shake-and-haptic sequence for wrong answers. The discrete
//! session runs on its own event loop; animations run on separate tasks and
//! only report back through that loop's queue.

pub mod animation;
pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod history;
pub mod quiz;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{QuizError, Result};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
