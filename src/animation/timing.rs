//! Timing transitions, sequences and their completion signal

use std::time::Duration;
use tokio::{
    sync::oneshot,
    time::{interval, Instant, MissedTickBehavior},
};
use tracing::trace;

use super::MotionValue;

/// Interval between animation frames
pub const FRAME: Duration = Duration::from_millis(16);

/// Duration of a timing transition when none is given
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// Easing curves over normalised progress `t` in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Quadratic ease-in-out, the default timing curve
    #[default]
    EaseInOut,
    /// Decaying bounce that settles on the target
    Bounce,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::Bounce => bounce(t),
        }
    }
}

fn bounce(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;

    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

/// A single transition towards a target value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub to: f64,
    pub duration: Duration,
    pub easing: Easing,
}

impl Timing {
    /// Transition to `to` over the default duration and curve
    pub fn to(to: f64) -> Self {
        Self {
            to,
            duration: DEFAULT_DURATION,
            easing: Easing::default(),
        }
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// One or more timing steps run back to back on the same value
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    steps: Vec<Timing>,
}

impl Animation {
    pub fn sequence(steps: impl IntoIterator<Item = Timing>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn steps(&self) -> &[Timing] {
        &self.steps
    }

    /// Total running time of all steps
    pub fn duration(&self) -> Duration {
        self.steps.iter().map(|step| step.duration).sum()
    }
}

impl From<Timing> for Animation {
    fn from(step: Timing) -> Self {
        Self { steps: vec![step] }
    }
}

/// Resolves once when an animation ends.
///
/// `true` means the last step reached its target; `false` means the animation
/// was superseded or its task went away.
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<bool>,
}

impl Completion {
    pub async fn finished(self) -> bool {
        self.rx.await.unwrap_or(false)
    }
}

impl MotionValue {
    /// Run an animation on its own task and return its completion signal
    pub fn animate(&self, animation: impl Into<Animation>) -> Completion {
        let animation = animation.into();
        let generation = self.claim();
        let (tx, rx) = oneshot::channel();
        let value = self.clone();

        tokio::spawn(async move {
            let finished = run_steps(&value, generation, animation.steps()).await;
            trace!("Animation {} ended, finished={}", generation, finished);
            let _ = tx.send(finished);
        });

        Completion { rx }
    }
}

async fn run_steps(value: &MotionValue, generation: u64, steps: &[Timing]) -> bool {
    let mut ticker = interval(FRAME);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    for step in steps {
        let from = value.get();
        let started = Instant::now();

        loop {
            ticker.tick().await;
            let elapsed = started.elapsed();

            if step.duration.is_zero() || elapsed >= step.duration {
                if !value.write_if_current(generation, step.to) {
                    return false;
                }
                break;
            }

            let progress = elapsed.as_secs_f64() / step.duration.as_secs_f64();
            let current = from + (step.to - from) * step.easing.apply(progress);
            if !value.write_if_current(generation, current) {
                return false;
            }
        }
    }
    true
}
