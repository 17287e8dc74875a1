//! Swipe-left-to-skip gesture

use tracing::{debug, info};

use super::{QueuedEvent, SessionEvent};
use crate::animation::{Bridge, Completion, MotionValue, PanEvent, PanGesture, PanSignal, Timing};

/// Drag offset divided by this gives the card tilt in degrees
pub const CARD_INCLINATION: f64 = 10.0;

/// Releasing further left than this asks to skip
pub const CARD_SKIP_AREA: f64 = -200.0;

/// Card tilt for a drag offset
pub fn rotation_deg(drag: f64) -> f64 {
    drag / CARD_INCLINATION
}

/// Whether a release at this translation asks for a skip
pub fn crosses_skip_area(translation_x: f64) -> bool {
    translation_x < CARD_SKIP_AREA
}

/// What a pan sample did
#[derive(Debug)]
pub enum DragOutcome {
    /// Not an activated pan; nothing changed
    Ignored,
    /// The card follows the finger
    Dragging { offset: f64 },
    /// The finger lifted; the card is springing back to rest
    Released {
        skip_requested: bool,
        snap_back: Completion,
    },
}

/// Interprets pan samples on the question card.
///
/// Only leftward drags move the card. A release past the skip area sends
/// one `SkipRequested` to the session; the card always snaps back to 0.
pub struct SkipGesture {
    pan: PanGesture,
    drag: MotionValue,
    bridge: Bridge<QueuedEvent>,
}

impl SkipGesture {
    pub fn new(pan: PanGesture, bridge: Bridge<QueuedEvent>) -> Self {
        Self {
            pan,
            drag: MotionValue::default(),
            bridge,
        }
    }

    pub fn drag(&self) -> &MotionValue {
        &self.drag
    }

    pub fn handle(&mut self, event: PanEvent) -> DragOutcome {
        match self.pan.handle(event) {
            None => DragOutcome::Ignored,
            Some(PanSignal::Update { translation_x }) => {
                let offset = translation_x.min(0.0);
                self.drag.set(offset);
                DragOutcome::Dragging { offset }
            }
            Some(PanSignal::End { translation_x }) => {
                let skip_requested = crosses_skip_area(translation_x);
                if skip_requested {
                    info!("Card released at {:.0}, requesting skip", translation_x);
                    self.bridge.run_on_session(SessionEvent::SkipRequested);
                } else {
                    debug!("Card released at {:.0}, inside skip area", translation_x);
                }
                let snap_back = self.drag.animate(Timing::to(0.0));
                DragOutcome::Released {
                    skip_requested,
                    snap_back,
                }
            }
        }
    }
}
