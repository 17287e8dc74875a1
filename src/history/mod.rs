//! Attempt history module
//!
//! Completed attempts are appended once and never rewritten.

pub mod record;
pub mod recorder;

// Re-export main types
pub use record::AttemptRecord;
pub use recorder::{HistoryRecorder, JsonlHistory, MemoryHistory};
