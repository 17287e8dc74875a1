//! Pan gesture recognizer with long-press activation

use std::time::Duration;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::debug;

/// Hold time before a pan activates by default
pub const DEFAULT_ACTIVATION_DELAY: Duration = Duration::from_millis(200);

/// Raw touch phase reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanPhase {
    Begin,
    Update,
    End,
}

/// Raw touch sample: phase, horizontal translation since begin, and when
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanEvent {
    pub phase: PanPhase,
    pub translation_x: f64,
    pub at: Instant,
}

impl PanEvent {
    pub fn begin(at: Instant) -> Self {
        Self {
            phase: PanPhase::Begin,
            translation_x: 0.0,
            at,
        }
    }

    pub fn update(translation_x: f64, at: Instant) -> Self {
        Self {
            phase: PanPhase::Update,
            translation_x,
            at,
        }
    }

    pub fn end(translation_x: f64, at: Instant) -> Self {
        Self {
            phase: PanPhase::End,
            translation_x,
            at,
        }
    }
}

/// What an activated pan reports
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanSignal {
    Update { translation_x: f64 },
    End { translation_x: f64 },
}

/// Turns raw touch samples into pan signals once the touch has been held
/// for the activation delay. Touches released earlier produce nothing.
#[derive(Debug, Clone)]
pub struct PanGesture {
    activation_delay: Duration,
    began_at: Option<Instant>,
    active: bool,
}

impl PanGesture {
    pub fn activate_after_long_press(activation_delay: Duration) -> Self {
        Self {
            activation_delay,
            began_at: None,
            active: false,
        }
    }

    fn held_long_enough(&self, began: Instant, at: Instant) -> bool {
        at.saturating_duration_since(began) >= self.activation_delay
    }

    pub fn handle(&mut self, event: PanEvent) -> Option<PanSignal> {
        match event.phase {
            PanPhase::Begin => {
                self.began_at = Some(event.at);
                self.active = false;
                None
            }
            PanPhase::Update => {
                let began = self.began_at?;
                if !self.active && self.held_long_enough(began, event.at) {
                    debug!("Pan activated after {:?}", event.at - began);
                    self.active = true;
                }
                self.active.then_some(PanSignal::Update {
                    translation_x: event.translation_x,
                })
            }
            PanPhase::End => {
                let began = self.began_at.take()?;
                let active = std::mem::take(&mut self.active) || self.held_long_enough(began, event.at);
                if !active {
                    debug!("Pan released before activation, ignoring");
                }
                active.then_some(PanSignal::End {
                    translation_x: event.translation_x,
                })
            }
        }
    }
}

impl Default for PanGesture {
    fn default() -> Self {
        Self::activate_after_long_press(DEFAULT_ACTIVATION_DELAY)
    }
}
