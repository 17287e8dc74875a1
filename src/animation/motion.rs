//! Continuously updated motion values

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::watch;

/// A shared `f64` driven by animations and read by presentation.
///
/// Clones refer to the same value. Starting an animation or calling
/// [`MotionValue::set`] supersedes whatever animation was running; the
/// superseded animation stops writing and completes with `finished = false`.
#[derive(Debug, Clone)]
pub struct MotionValue {
    inner: Arc<MotionInner>,
}

#[derive(Debug)]
struct MotionInner {
    tx: watch::Sender<f64>,
    generation: AtomicU64,
}

impl MotionValue {
    pub fn new(initial: f64) -> Self {
        let (tx, _) = watch::channel(initial);
        Self {
            inner: Arc::new(MotionInner {
                tx,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Current value
    pub fn get(&self) -> f64 {
        *self.inner.tx.borrow()
    }

    /// Jump to a value, cancelling any running animation
    pub fn set(&self, value: f64) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.tx.send_replace(value);
    }

    /// Observe every change of the value
    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.inner.tx.subscribe()
    }

    /// Claim the value for a new animation, superseding the previous one
    pub(crate) fn claim(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Write on behalf of an animation; refused once it has been superseded
    pub(crate) fn write_if_current(&self, generation: u64, value: f64) -> bool {
        self.inner.tx.send_if_modified(|current| {
            if self.inner.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = value;
            true
        });
        self.inner.generation.load(Ordering::SeqCst) == generation
    }
}

impl Default for MotionValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}
