//! Background tasks module
//!
//! This module contains the per-session event loop that runs alongside the
//! HTTP server.

pub mod session_loop;

// Re-export main types
pub use session_loop::{spawn_session, SessionDeps, SessionHandle, SessionMotion};
