//! Sound and haptic cues

use serde::Serialize;
use tracing::info;

/// Audio cue played after an answer. Right and wrong answers share the
/// affirmative cue; a wrong one is told apart by the haptic and the shake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Correct,
}

/// Haptic pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Haptic {
    Error,
}

/// Fire-and-forget feedback channel. Implementations must not block the
/// caller; playback that takes time belongs on a spawned task.
pub trait Cues: Send + Sync {
    fn play(&self, cue: Cue);
    fn haptic(&self, pulse: Haptic);
}

/// Reports cues through the log for headless hosts
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCues;

impl Cues for LogCues {
    fn play(&self, cue: Cue) {
        info!("Playing {:?} cue", cue);
    }

    fn haptic(&self, pulse: Haptic) {
        info!("Haptic {:?} pulse", pulse);
    }
}
