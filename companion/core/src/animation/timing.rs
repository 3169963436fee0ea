//! Keyframe Timing
//!
//! Easing functions and keyframe tracks. A [`Track`] is a list of values
//! spaced evenly over one cycle; sampling it at a progress in `0.0..=1.0`
//! interpolates between the two surrounding keyframes with an easing curve.

use serde::{Deserialize, Serialize};

/// Easing curves between keyframes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EasingFunction {
    /// Fast start, slow end
    EaseOut,

    /// Slow start and end
    #[default]
    EaseInOut,
}

impl EasingFunction {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::EaseOut => 1.0 - (1.0 - t).powi(2),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Evenly spaced keyframe values for one property over one cycle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Keyframe values; the first is at progress 0.0 and the last at 1.0
    pub keyframes: Vec<f32>,
}

impl Track {
    /// Build a track from keyframe values
    #[must_use]
    pub fn new(keyframes: Vec<f32>) -> Self {
        Self { keyframes }
    }

    /// A track that holds one value
    #[must_use]
    pub fn constant(value: f32) -> Self {
        Self {
            keyframes: vec![value],
        }
    }

    /// Value at `progress` (0.0 to 1.0) through the cycle
    #[must_use]
    pub fn sample(&self, progress: f32, easing: EasingFunction) -> f32 {
        match self.keyframes.as_slice() {
            [] => 0.0,
            [only] => *only,
            frames => {
                let segments = (frames.len() - 1) as f32;
                let position = progress.clamp(0.0, 1.0) * segments;
                let index = (position.floor() as usize).min(frames.len() - 2);
                let local = easing.apply(position - index as f32);
                let (from, to) = (frames[index], frames[index + 1]);
                from + (to - from) * local
            }
        }
    }

    /// Value at rest (first keyframe)
    #[must_use]
    pub fn rest(&self) -> f32 {
        self.keyframes.first().copied().unwrap_or(0.0)
    }
}
