//! Collaborator services module
//!
//! The side effects the quiz core asks for: cues, haptics and navigation.

pub mod cues;
pub mod navigation;

// Re-export main types
pub use cues::{Cue, Cues, Haptic, LogCues};
pub use navigation::{CompletionSummary, ConfirmDialog, DialogKind, Navigator};
