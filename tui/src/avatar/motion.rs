//! Motion Player
//!
//! Plays the container motion for the current cue: remembers which cue is
//! showing and how long it has been showing, and samples the cue's
//! [`MotionCurve`] into a whole-cell offset each frame.

use std::time::Duration;

use lion_core::{AnimationCue, MotionCurve, Transform};

/// Layout units of vertical motion per terminal row (rows are ~2.5x taller than wide)
const UNITS_PER_ROW: f32 = 2.5;

/// Degrees of rotation that shift the lion by one column
const DEGREES_PER_COLUMN: f32 = 5.0;

/// Scale above which the lion is drawn emphasised
const EMPHASIS_SCALE: f32 = 1.05;

/// Plays cue motion over time
pub struct MotionPlayer {
    /// Cue currently showing
    cue: AnimationCue,
    /// Curve for that cue (None = stand still)
    curve: Option<MotionCurve>,
    /// Time since the cue started
    elapsed: Duration,
}

impl MotionPlayer {
    /// Start idle
    pub fn new() -> Self {
        Self {
            cue: AnimationCue::Idle,
            curve: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Switch to a cue; playing the same cue again keeps its phase
    pub fn play(&mut self, cue: AnimationCue) {
        if self.cue != cue {
            self.cue = cue;
            self.curve = MotionCurve::for_cue(cue);
            self.elapsed = Duration::ZERO;
        }
    }

    /// Play a cue from the start even if it is already showing
    pub fn restart(&mut self, cue: AnimationCue) {
        self.cue = cue;
        self.curve = MotionCurve::for_cue(cue);
        self.elapsed = Duration::ZERO;
    }

    /// Advance time
    pub fn update(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    /// Current cue
    pub fn cue(&self) -> AnimationCue {
        self.cue
    }

    /// Time since the current cue started
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether the cue's motion has played out
    pub fn is_finished(&self) -> bool {
        self.curve
            .as_ref()
            .map_or(true, |curve| curve.is_finished(self.elapsed))
    }

    /// Sampled transform
    pub fn transform(&self) -> Transform {
        self.curve
            .as_ref()
            .map_or(Transform::IDENTITY, |curve| curve.sample(self.elapsed))
    }

    /// Whole-cell (dx, dy) offset for the current transform
    pub fn cell_offset(&self) -> (i16, i16) {
        to_cells(&self.transform())
    }

    /// Whether the lion is currently scaled up
    pub fn emphasized(&self) -> bool {
        self.transform().scale > EMPHASIS_SCALE
    }
}

impl Default for MotionPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a transform onto terminal cells
///
/// Rotation can't be drawn with block characters, so it becomes a small
/// sideways sway.
pub fn to_cells(t: &Transform) -> (i16, i16) {
    let dx = t.x + t.rotate / DEGREES_PER_COLUMN;
    let dy = t.y / UNITS_PER_ROW;
    (dx.round() as i16, dy.round() as i16)
}
