//! Wrong-answer shake, haptics and the reply overlay

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::sync::watch;
use tracing::debug;

use super::{QueuedEvent, ReplyStatus, SessionEvent};
use crate::{
    animation::{
        interpolate, timing::DEFAULT_DURATION, Animation, Bridge, Easing, Extrapolation,
        MotionValue, Timing,
    },
    services::{Cues, Haptic},
};

/// Peak shake magnitude; each half unit is one excursion of the card
pub const SHAKE_PEAK: f64 = 3.0;
pub const SHAKE_OUT_DURATION: Duration = Duration::from_millis(400);

/// Exit transition of an answered question card
pub const QUESTION_EXIT_DURATION: Duration = DEFAULT_DURATION;

const SHAKE_INPUT: [f64; 7] = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0];
const SHAKE_OUTPUT: [f64; 7] = [0.0, -15.0, 0.0, 15.0, 0.0, -15.0, 0.0];

/// Horizontal card offset for a shake magnitude
pub fn shake_offset(shake: f64) -> f64 {
    interpolate(shake, &SHAKE_INPUT, &SHAKE_OUTPUT, Extrapolation::Extend)
}

/// Bounce out to the peak, then ease back to rest
pub fn shake_sequence() -> Animation {
    Animation::sequence([
        Timing::to(SHAKE_PEAK)
            .duration(SHAKE_OUT_DURATION)
            .easing(Easing::Bounce),
        Timing::to(0.0),
    ])
}

/// Reply overlay. Every change bumps the epoch so a delayed clear can tell
/// whether it still applies.
struct Overlay {
    status: watch::Sender<ReplyStatus>,
    epoch: AtomicU64,
}

impl Overlay {
    fn show(&self, status: ReplyStatus) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.status.send_replace(status);
    }

    fn clear_if_current(&self, epoch: u64) -> bool {
        self.status.send_if_modified(|status| {
            if self.epoch.load(Ordering::SeqCst) != epoch || *status == ReplyStatus::Neutral {
                return false;
            }
            *status = ReplyStatus::Neutral;
            true
        })
    }
}

/// Drives feedback for answered questions.
///
/// An incorrect answer fires a haptic pulse and runs the shake; when the
/// final return to zero completes, exactly one `ShakeSettled` is sent to the
/// session. A cancelled shake sends nothing. On a question change the
/// answered card plays its exit, and the overlay clears when that exit
/// completes.
pub struct FeedbackOrchestrator {
    shake: MotionValue,
    exit: MotionValue,
    overlay: Arc<Overlay>,
    cues: Arc<dyn Cues>,
    bridge: Bridge<QueuedEvent>,
}

impl FeedbackOrchestrator {
    pub fn new(cues: Arc<dyn Cues>, bridge: Bridge<QueuedEvent>) -> Self {
        let (status, _) = watch::channel(ReplyStatus::Neutral);
        Self {
            shake: MotionValue::default(),
            exit: MotionValue::default(),
            overlay: Arc::new(Overlay {
                status,
                epoch: AtomicU64::new(0),
            }),
            cues,
            bridge,
        }
    }

    pub fn shake(&self) -> &MotionValue {
        &self.shake
    }

    pub fn overlay(&self) -> watch::Receiver<ReplyStatus> {
        self.overlay.status.subscribe()
    }

    /// React to a scored answer on `question`
    pub fn on_reply(&self, status: ReplyStatus, question: usize) {
        self.exit.set(0.0);
        self.overlay.show(status);
        if status != ReplyStatus::Incorrect {
            return;
        }

        self.cues.haptic(Haptic::Error);
        let shake = shake_sequence();
        debug!("Shaking question {} for {:?}", question, shake.duration());
        let completion = self.shake.animate(shake);
        let bridge = self.bridge.clone();
        tokio::spawn(async move {
            if completion.finished().await {
                bridge.run_on_session(SessionEvent::ShakeSettled { question });
            } else {
                debug!("Shake for question {} was cancelled", question);
            }
        });
    }

    /// The displayed question changed. The answered card exits and the
    /// overlay clears when it is gone, unless a newer reply replaced it.
    pub fn on_question_changed(&self) {
        let epoch = self.overlay.epoch.load(Ordering::SeqCst);
        self.exit.set(1.0);
        let completion = self
            .exit
            .animate(Timing::to(0.0).duration(QUESTION_EXIT_DURATION));
        let overlay = Arc::clone(&self.overlay);
        tokio::spawn(async move {
            if completion.finished().await && overlay.clear_if_current(epoch) {
                debug!("Reply overlay cleared");
            }
        });
    }

    /// Abandon running animations and drop the overlay now
    pub fn cancel(&self) {
        self.shake.set(0.0);
        self.exit.set(0.0);
        self.overlay.show(ReplyStatus::Neutral);
    }
}
