//! State management module
//!
//! The host-side state: loaded content, history, the live session and the
//! view the navigator last asked for.

pub mod app_state;
pub mod view_state;

// Re-export main types
pub use app_state::AppState;
pub use view_state::{SessionNavigator, View, ViewState};
