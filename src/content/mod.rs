//! Quiz content module
//!
//! Immutable quiz definitions and the provider that looks them up by id.

pub mod model;
pub mod provider;

// Re-export main types
pub use model::{Level, Question, Quiz};
pub use provider::{QuizContent, StaticContent};
