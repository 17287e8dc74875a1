//! Events consumed by a session's event loop

use tokio::sync::oneshot;

use super::SessionSnapshot;

/// Everything a session reacts to, from user input or the animation domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// Tap on an alternative
    Select(usize),
    /// Confirm button
    Confirm,
    /// Stop button
    Stop,
    /// Hardware back
    Back,
    /// Answer to the open confirmation dialog
    DialogAnswered { confirmed: bool },
    /// A released drag crossed the skip area
    SkipRequested,
    /// The wrong-answer shake for this question came back to rest
    ShakeSettled { question: usize },
    /// Discard the session without recording anything
    Close,
}

/// An event on the session queue, with an optional slot for the snapshot
/// published right after it was handled
#[derive(Debug)]
pub struct QueuedEvent {
    pub event: SessionEvent,
    pub reply: Option<oneshot::Sender<SessionSnapshot>>,
}

impl QueuedEvent {
    pub fn with_reply(event: SessionEvent) -> (Self, oneshot::Receiver<SessionSnapshot>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                event,
                reply: Some(tx),
            },
            rx,
        )
    }
}

impl From<SessionEvent> for QueuedEvent {
    fn from(event: SessionEvent) -> Self {
        Self { event, reply: None }
    }
}
