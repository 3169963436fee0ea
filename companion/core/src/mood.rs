//! Mood Derivation
//!
//! Mood is never stored as an independent source of truth. It is derived
//! from two inputs:
//!
//! - the stats, through the overall-health thresholds
//! - how long the pet has been left alone ([`InactivityLevel`])
//!
//! Both inputs feed one rule ([`Mood::resolve`]): the effective mood is the
//! sadder of the two. Loneliness can pull the mood down but never lifts it,
//! and it disappears as soon as the user does anything.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::stats::PetStats;

/// Discrete pet mood, ordered from saddest to happiest
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
    /// Overall health of 30 or less, or abandoned for over a day
    VerySad,
    /// Overall health above 30, or left alone for over 12 hours
    Sad,
    /// Overall health above 50
    Neutral,
    /// Overall health above 70
    Happy,
    /// Overall health above 85
    VeryHappy,
}

impl Mood {
    /// Map overall health to a mood. Every comparison is strict, so a health
    /// of exactly 85.0 is `Happy`, not `VeryHappy`.
    #[must_use]
    pub fn from_health(health: f64) -> Self {
        if health > 85.0 {
            Self::VeryHappy
        } else if health > 70.0 {
            Self::Happy
        } else if health > 50.0 {
            Self::Neutral
        } else if health > 30.0 {
            Self::Sad
        } else {
            Self::VerySad
        }
    }

    /// Mood implied by the stats alone
    #[must_use]
    pub fn from_stats(stats: &PetStats) -> Self {
        Self::from_health(stats.overall_health())
    }

    /// Combine the stats mood with the inactivity level
    #[must_use]
    pub fn resolve(stats: &PetStats, inactivity: InactivityLevel) -> Self {
        let from_stats = Self::from_stats(stats);
        match inactivity.mood_ceiling() {
            Some(ceiling) => from_stats.min(ceiling),
            None => from_stats,
        }
    }

    /// Whether this is one of the two sad moods
    #[must_use]
    pub fn is_sad(self) -> bool {
        matches!(self, Self::Sad | Self::VerySad)
    }

    /// Status line shown under the pet
    #[must_use]
    pub fn message(self, name: &str) -> String {
        match self {
            Self::VeryHappy => format!("{name} is glowing with joy! ✨"),
            Self::Happy => format!("{name} is happy and content! 😊"),
            Self::Neutral => format!("{name} is doing okay."),
            Self::Sad => format!("{name} misses you... 😔"),
            Self::VerySad => format!("{name} is very sad and hungry... 😢"),
        }
    }

    /// Stable identifier (matches the serde form)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryHappy => "very-happy",
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Sad => "sad",
            Self::VerySad => "very-sad",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long the pet has gone without any activity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InactivityLevel {
    /// Someone has been around recently
    #[default]
    Active,
    /// No activity for more than the lonely threshold (12h by default)
    Lonely,
    /// No activity for more than the abandoned threshold (24h by default)
    Abandoned,
}

impl InactivityLevel {
    /// Classify an idle duration against the two thresholds
    #[must_use]
    pub fn classify(idle: Duration, thresholds: &InactivityThresholds) -> Self {
        if idle > thresholds.abandoned {
            Self::Abandoned
        } else if idle > thresholds.lonely {
            Self::Lonely
        } else {
            Self::Active
        }
    }

    /// Happiest mood allowed at this level
    #[must_use]
    pub fn mood_ceiling(self) -> Option<Mood> {
        match self {
            Self::Active => None,
            Self::Lonely => Some(Mood::Sad),
            Self::Abandoned => Some(Mood::VerySad),
        }
    }
}

/// Idle durations after which the pet gets lonely / feels abandoned
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InactivityThresholds {
    /// Idle time after which the pet is lonely
    pub lonely: Duration,
    /// Idle time after which the pet feels abandoned
    pub abandoned: Duration,
}

impl Default for InactivityThresholds {
    fn default() -> Self {
        Self {
            lonely: Duration::hours(12),
            abandoned: Duration::hours(24),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(Mood::from_health(85.0), Mood::Happy);
        assert_eq!(Mood::from_health(85.1), Mood::VeryHappy);
        assert_eq!(Mood::from_health(70.0), Mood::Neutral);
        assert_eq!(Mood::from_health(70.5), Mood::Happy);
        assert_eq!(Mood::from_health(50.0), Mood::Sad);
        assert_eq!(Mood::from_health(30.0), Mood::VerySad);
        assert_eq!(Mood::from_health(30.25), Mood::Sad);
        assert_eq!(Mood::from_health(0.0), Mood::VerySad);
    }

    #[test]
    fn test_mood_ordering() {
        assert!(Mood::VerySad < Mood::Sad);
        assert!(Mood::Sad < Mood::Neutral);
        assert!(Mood::Happy < Mood::VeryHappy);
    }

    #[test]
    fn test_default_stats_are_neutral() {
        // health = 66.25
        assert_eq!(Mood::from_stats(&PetStats::default()), Mood::Neutral);
    }

    #[test]
    fn test_inactivity_only_lowers_mood() {
        let thriving = PetStats::new(100, 100, 100, 100, 100, 100);
        assert_eq!(
            Mood::resolve(&thriving, InactivityLevel::Lonely),
            Mood::Sad
        );
        assert_eq!(
            Mood::resolve(&thriving, InactivityLevel::Abandoned),
            Mood::VerySad
        );

        let starving = PetStats::new(0, 0, 0, 0, 0, 0);
        assert_eq!(
            Mood::resolve(&starving, InactivityLevel::Lonely),
            Mood::VerySad
        );
        assert_eq!(
            Mood::resolve(&starving, InactivityLevel::Active),
            Mood::VerySad
        );
    }

    #[test]
    fn test_classify_inactivity() {
        let t = InactivityThresholds::default();
        assert_eq!(
            InactivityLevel::classify(Duration::hours(12), &t),
            InactivityLevel::Active
        );
        assert_eq!(
            InactivityLevel::classify(Duration::hours(12) + Duration::seconds(1), &t),
            InactivityLevel::Lonely
        );
        assert_eq!(
            InactivityLevel::classify(Duration::hours(24), &t),
            InactivityLevel::Lonely
        );
        assert_eq!(
            InactivityLevel::classify(Duration::hours(25), &t),
            InactivityLevel::Abandoned
        );
    }

    #[test]
    fn test_messages_use_name() {
        assert_eq!(Mood::Neutral.message("Leo"), "Leo is doing okay.");
        assert!(Mood::Sad.message("Judah").starts_with("Judah misses you"));
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&Mood::VeryHappy).unwrap();
        assert_eq!(json, "\"very-happy\"");
    }
}
