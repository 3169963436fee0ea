//! Animation Cues
//!
//! The core never plays animations itself. It only decides WHICH cue the
//! lion should show and for how long; surfaces turn the cue into motion
//! (see [`crate::presentation::MotionCurve`]).
//!
//! A cue is transient: it carries a deadline and reverts to
//! [`AnimationCue::Idle`] once the deadline passes. Cues have priorities so
//! a short bounce can't cut a growth celebration short.

mod timing;

pub use timing::{EasingFunction, Track};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long an activity bounce lasts
pub const BOUNCE_DURATION_MS: i64 = 1_000;
/// How long the devotional-complete celebration lasts
pub const DEVOTIONAL_CELEBRATION_MS: i64 = 2_000;
/// How long a growth-stage celebration lasts
pub const GROWTH_CELEBRATION_MS: i64 = 3_000;
/// How long the lion plays after being clicked
pub const PLAY_DURATION_MS: i64 = 2_000;

/// Transient animation cue for the lion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationCue {
    /// Resting, breathing gently
    #[default]
    Idle,
    /// Short hop after an activity
    Bounce,
    /// Spin and grow after a milestone
    Celebrate,
    /// Dozing
    Sleep,
    /// Wiggling after being clicked
    Play,
}

impl AnimationCue {
    /// Priority used when two cues compete
    #[must_use]
    pub fn priority(self) -> AnimationPriority {
        match self {
            Self::Idle => AnimationPriority::Background,
            Self::Sleep | Self::Bounce | Self::Play => AnimationPriority::Normal,
            Self::Celebrate => AnimationPriority::High,
        }
    }

    /// Stable identifier (also the sprite animation name)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Bounce => "bounce",
            Self::Celebrate => "celebrate",
            Self::Sleep => "sleep",
            Self::Play => "play",
        }
    }
}

impl std::fmt::Display for AnimationCue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Animation priority for interruption handling
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum AnimationPriority {
    /// Idle loop, always interruptible
    #[default]
    Background,
    /// Gestures in response to user input
    Normal,
    /// Milestones (growth, completed devotionals)
    High,
}

/// The cue currently showing and when it ends
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCue {
    /// Cue being shown
    pub cue: AnimationCue,
    /// When the cue reverts to idle (`None` while idle)
    pub until: Option<DateTime<Utc>>,
}

impl ActiveCue {
    /// Show `cue` for `duration` starting at `now`.
    ///
    /// A running cue with higher priority is left alone; equal or lower
    /// priority cues are replaced. Returns whether the cue changed.
    pub fn trigger(&mut self, cue: AnimationCue, duration: Duration, now: DateTime<Utc>) -> bool {
        if self.is_running(now) && self.cue.priority() > cue.priority() {
            return false;
        }
        self.cue = cue;
        self.until = Some(now.checked_add_signed(duration).unwrap_or(DateTime::<Utc>::MAX_UTC));
        true
    }

    /// Revert to idle if the deadline has passed. Returns whether it reverted.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        match self.until {
            Some(until) if now >= until => {
                *self = Self::default();
                true
            }
            _ => false,
        }
    }

    /// Whether a non-idle cue is still within its deadline
    #[must_use]
    pub fn is_running(&self, now: DateTime<Utc>) -> bool {
        self.cue != AnimationCue::Idle && self.until.is_some_and(|until| now < until)
    }

    /// Whether the lion is idle
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.cue == AnimationCue::Idle
    }
}
