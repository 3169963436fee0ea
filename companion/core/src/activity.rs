//! Activities
//!
//! The four things a user can do with the lion, and the stat deltas each one
//! applies. Parsing an unknown activity name is an error, not a silent no-op.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats::Stat;

/// Extra food granted when a devotional reading is completed
pub const DEVOTIONAL_FOOD_BONUS: u8 = 25;
/// Extra water granted when a devotional reading is completed
pub const DEVOTIONAL_WATER_BONUS: u8 = 20;

/// A button-triggered activity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    /// Pray together
    Pray,
    /// Read scripture (also feeds the lion)
    Read,
    /// Sing a song
    Sing,
    /// Help someone
    Help,
}

impl Activity {
    /// All activities in button order
    pub const ALL: [Activity; 4] = [
        Activity::Pray,
        Activity::Read,
        Activity::Sing,
        Activity::Help,
    ];

    /// Stat increases applied by this activity
    #[must_use]
    pub fn deltas(self) -> &'static [(Stat, u8)] {
        match self {
            Self::Pray => &[(Stat::Faith, 10), (Stat::Peace, 8)],
            Self::Read => &[
                (Stat::Faith, 8),
                (Stat::Joy, 6),
                (Stat::Food, 15),
                (Stat::Water, 10),
            ],
            Self::Sing => &[(Stat::Joy, 12), (Stat::Love, 5)],
            Self::Help => &[(Stat::Love, 10), (Stat::Peace, 6)],
        }
    }

    /// Delta for one stat (0 if this activity does not touch it)
    #[must_use]
    pub fn delta_for(self, stat: Stat) -> u8 {
        self.deltas()
            .iter()
            .find(|(s, _)| *s == stat)
            .map_or(0, |(_, d)| *d)
    }

    /// Button label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pray => "Pray",
            Self::Read => "Read",
            Self::Sing => "Sing",
            Self::Help => "Help",
        }
    }

    /// Button icon
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Pray => "🙏",
            Self::Read => "📖",
            Self::Sing => "🎵",
            Self::Help => "🤝",
        }
    }

    /// Stable identifier
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pray => "pray",
            Self::Read => "read",
            Self::Sing => "sing",
            Self::Help => "help",
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised when interpreting activity requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivityError {
    /// The name does not match any known activity
    #[error("unknown activity '{0}' (expected one of: pray, read, sing, help)")]
    Unknown(String),
}

impl FromStr for Activity {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pray" => Ok(Self::Pray),
            "read" => Ok(Self::Read),
            "sing" => Ok(Self::Sing),
            "help" => Ok(Self::Help),
            _ => Err(ActivityError::Unknown(s.to_string())),
        }
    }
}
