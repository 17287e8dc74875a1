//! Animation and gesture engine
//!
//! Continuous values run on their own tokio tasks, ticking once per frame.
//! They never call into a quiz session directly: completions are reported
//! through single-shot channels and anything the session must react to is
//! sent through a [`Bridge`].

pub mod bridge;
pub mod gesture;
pub mod interpolate;
pub mod motion;
pub mod timing;

// Re-export main types
pub use bridge::Bridge;
pub use gesture::{PanEvent, PanGesture, PanPhase, PanSignal};
pub use interpolate::{interpolate, Extrapolation};
pub use motion::MotionValue;
pub use timing::{Animation, Completion, Easing, Timing};
