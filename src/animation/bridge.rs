//! Message bridge from the animation domain into a session's event queue

use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

/// Cloneable sender for events consumed by a single session task
#[derive(Debug)]
pub struct Bridge<E> {
    tx: UnboundedSender<E>,
}

impl<E> Clone for Bridge<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<E: std::fmt::Debug> Bridge<E> {
    pub fn new(tx: UnboundedSender<E>) -> Self {
        Self { tx }
    }

    /// Queue an event for the session. Returns false once the session is gone.
    pub fn run_on_session(&self, event: impl Into<E>) -> bool {
        match self.tx.send(event.into()) {
            Ok(()) => true,
            Err(e) => {
                warn!("Dropping event for closed session: {:?}", e.0);
                false
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
