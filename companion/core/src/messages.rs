//! Companion Messages
//!
//! Messages sent from the Companion to UI surfaces. Surfaces hold no pet
//! logic of their own: they render what these messages say and keep a
//! local copy of the latest [`PetSnapshot`].
//!
//! A full [`CompanionMessage::Snapshot`] is sent when a surface connects;
//! after that only the parts that changed are sent.

use serde::{Deserialize, Serialize};

use crate::animation::AnimationCue;
use crate::devotional::Devotional;
use crate::growth::GrowthStage;
use crate::mood::{InactivityLevel, Mood};
use crate::pet::PetSnapshot;
use crate::stats::PetStats;

/// Streak length above which the badge appears
pub const STREAK_BADGE_THRESHOLD: u32 = 7;

/// Messages from Companion to UI Surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CompanionMessage {
    // ============================================
    // Pet State
    // ============================================
    /// Everything at once (on connect)
    Snapshot {
        /// Current pet state
        snapshot: PetSnapshot,
    },

    /// One or more stats changed
    StatsChanged {
        /// New stat values
        stats: PetStats,
    },

    /// Mood changed
    MoodChanged {
        /// Previous mood
        from: Mood,
        /// New mood
        to: Mood,
        /// Status line for the new mood
        message: String,
    },

    /// Growth stage changed
    GrowthChanged {
        /// Previous stage
        from: GrowthStage,
        /// New stage
        to: GrowthStage,
        /// Encouragement for the new stage
        message: String,
    },

    /// Animation cue changed
    Animation {
        /// Cue to show
        cue: AnimationCue,
        /// How long it lasts (0 for idle)
        duration_ms: u32,
    },

    /// Lion became lonely, abandoned, or was visited again
    InactivityChanged {
        /// New level
        level: InactivityLevel,
    },

    /// Devotional streak changed
    StreakChanged {
        /// New streak
        streak: u32,
        /// Badge text when the streak is long enough
        badge: Option<String>,
    },

    // ============================================
    // Devotional View
    // ============================================
    /// Devotional view opened, closed, or paged
    Devotional {
        /// Whether the view is open
        open: bool,
        /// Reading currently selected
        entry: Option<Devotional>,
        /// One-based position and total
        position: (usize, usize),
    },

    // ============================================
    // System Messages
    // ============================================
    /// Notification for the user
    Notify {
        /// Notification level
        level: NotifyLevel,
        /// Title (optional)
        title: Option<String>,
        /// Message content
        message: String,
    },

    /// Request surface to quit
    Quit {
        /// Optional goodbye message
        message: Option<String>,
    },
}

impl CompanionMessage {
    /// Short name for logging
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Snapshot { .. } => "snapshot",
            Self::StatsChanged { .. } => "stats",
            Self::MoodChanged { .. } => "mood",
            Self::GrowthChanged { .. } => "growth",
            Self::Animation { .. } => "animation",
            Self::InactivityChanged { .. } => "inactivity",
            Self::StreakChanged { .. } => "streak",
            Self::Devotional { .. } => "devotional",
            Self::Notify { .. } => "notify",
            Self::Quit { .. } => "quit",
        }
    }
}

/// Notification levels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// Warning
    Warning,
    /// Error
    Error,
    /// Success
    Success,
}

/// Badge shown next to a long streak
#[must_use]
pub fn streak_badge(streak: u32) -> Option<&'static str> {
    (streak > STREAK_BADGE_THRESHOLD).then_some("⭐ Amazing dedication!")
}
