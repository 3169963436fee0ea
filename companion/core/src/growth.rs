//! Growth Stages
//!
//! The lion grows up as its faith grows. The stage is a pure function of
//! faith, so it can move backwards if faith ever drops; no activity lowers
//! faith today, which keeps growth forward-only in practice.
//!
//! | Stage | Faith |
//! |-------|-------|
//! | Newborn | 0-19 |
//! | Playful | 20-39 |
//! | Growing | 40-59 |
//! | Flourishing | 60-79 |
//! | Mature | 80-100 |

use serde::{Deserialize, Serialize};

/// Faith needed to leave the newborn stage
pub const THRESHOLD_PLAYFUL: u8 = 20;
/// Faith needed to start growing
pub const THRESHOLD_GROWING: u8 = 40;
/// Faith needed to flourish
pub const THRESHOLD_FLOURISHING: u8 = 60;
/// Faith needed to reach maturity
pub const THRESHOLD_MATURE: u8 = 80;

/// Growth stage of the lion
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    /// Tiny cub just starting out
    Newborn,
    /// Curious and bouncy
    Playful,
    /// Mane starting to show
    Growing,
    /// Fuller mane, tail tuft
    Flourishing,
    /// Full mane and crown
    Mature,
}

impl GrowthStage {
    /// All stages in order
    pub const ALL: [GrowthStage; 5] = [
        GrowthStage::Newborn,
        GrowthStage::Playful,
        GrowthStage::Growing,
        GrowthStage::Flourishing,
        GrowthStage::Mature,
    ];

    /// Stage for a given faith level
    #[must_use]
    pub fn from_faith(faith: u8) -> Self {
        if faith < THRESHOLD_PLAYFUL {
            Self::Newborn
        } else if faith < THRESHOLD_GROWING {
            Self::Playful
        } else if faith < THRESHOLD_FLOURISHING {
            Self::Growing
        } else if faith < THRESHOLD_MATURE {
            Self::Flourishing
        } else {
            Self::Mature
        }
    }

    /// Whether reaching this stage is worth a celebration
    #[must_use]
    pub fn celebrates_arrival(self) -> bool {
        self != Self::Newborn
    }

    /// Encouraging line for this stage
    #[must_use]
    pub fn message(self, name: &str) -> String {
        match self {
            Self::Newborn => {
                "Your little lion is just beginning their faith journey! 🍼".to_string()
            }
            Self::Playful => {
                format!("{name} is getting more playful and curious about God's word! 🎾")
            }
            Self::Growing => format!("Look! {name} is growing stronger in faith! 🌱"),
            Self::Flourishing => format!("{name} is flourishing with joy and wisdom! 🌟"),
            Self::Mature => format!("{name} has become a wise and gentle lion of faith! 👑"),
        }
    }

    /// Stable identifier
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newborn => "newborn",
            Self::Playful => "playful",
            Self::Growing => "growing",
            Self::Flourishing => "flourishing",
            Self::Mature => "mature",
        }
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
