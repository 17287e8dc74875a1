//! Quiz interaction core
//!
//! The discrete session, the skip gesture and the answer feedback. The
//! session is the single source of truth; the other two only reach it by
//! sending [`SessionEvent`]s.

pub mod event;
pub mod feedback;
pub mod presentation;
pub mod session;
pub mod skip;

// Re-export main types
pub use event::{QueuedEvent, SessionEvent};
pub use feedback::FeedbackOrchestrator;
pub use presentation::{MotionSample, QuizFrame};
pub use session::{Advance, ConfirmOutcome, Phase, QuizSession, ReplyStatus, SessionSnapshot};
pub use skip::{DragOutcome, SkipGesture};
