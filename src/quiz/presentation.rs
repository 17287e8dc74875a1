//! Presentational values derived from motion values

use serde::Serialize;

use super::{feedback::shake_offset, skip::rotation_deg, ReplyStatus};
use crate::animation::{interpolate, Extrapolation};

/// Raw motion values at one instant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionSample {
    pub shake: f64,
    pub drag: f64,
    pub scroll_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardTransform {
    pub translate_x: f64,
    pub rotate_z_deg: f64,
}

/// Progress bar pinned to the top once the header scrolls away
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressBarStyle {
    pub opacity: f64,
    pub translate_y: f64,
    /// One-based number of the question on screen
    pub current: usize,
    pub total: usize,
}

/// Everything a renderer needs for one frame of the quiz view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuizFrame {
    pub card: CardTransform,
    pub header_opacity: f64,
    pub progress_bar: ProgressBarStyle,
    pub overlay: ReplyStatus,
}

impl QuizFrame {
    pub fn compose(sample: MotionSample, overlay: ReplyStatus, question_index: usize, total: usize) -> Self {
        let clamp = Extrapolation::Clamp;
        Self {
            card: CardTransform {
                translate_x: shake_offset(sample.shake) + sample.drag,
                rotate_z_deg: rotation_deg(sample.drag),
            },
            header_opacity: interpolate(sample.scroll_y, &[50.0, 90.0], &[1.0, 0.0], clamp),
            progress_bar: ProgressBarStyle {
                opacity: interpolate(sample.scroll_y, &[50.0, 80.0], &[0.0, 1.0], clamp),
                translate_y: interpolate(sample.scroll_y, &[50.0, 80.0], &[-40.0, 0.0], clamp),
                current: question_index + 1,
                total,
            },
            overlay,
        }
    }
}
