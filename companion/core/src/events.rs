//! Surface Events
//!
//! Events sent from UI surfaces to the Companion. Surfaces report what the
//! user did; the Companion decides what it means for the pet.

use serde::{Deserialize, Serialize};

/// Events from UI Surface to Companion
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    // ============================================
    // Connection Events
    // ============================================
    /// Surface connected; the Companion answers with a full snapshot
    Connected {
        /// Surface type identifier
        surface_type: SurfaceType,
    },

    // ============================================
    // Activities
    // ============================================
    /// User pressed an activity button. The name is parsed by the
    /// Companion so unknown names can be reported back.
    Activity {
        /// Activity name (`pray`, `read`, `sing`, `help`)
        name: String,
    },

    /// User clicked/tapped the lion
    PetClicked,

    // ============================================
    // Devotional View
    // ============================================
    /// Open the devotional view
    OpenDevotional,

    /// Close the devotional view without completing
    CloseDevotional,

    /// Page to the next reading
    NextDevotional,

    /// Page to the previous reading
    PreviousDevotional,

    /// Finish the current reading
    CompleteDevotional,

    // ============================================
    // Lifecycle Events
    // ============================================
    /// User requested quit
    QuitRequested,
}

impl SurfaceEvent {
    /// Convenience constructor for an activity event
    #[must_use]
    pub fn activity(name: impl Into<String>) -> Self {
        Self::Activity { name: name.into() }
    }
}

/// Type of UI surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceType {
    /// Terminal UI (ratatui/crossterm)
    Tui,
    /// Headless (simulation/testing)
    Headless,
    /// Custom surface type
    Custom(String),
}

impl SurfaceType {
    /// Human-readable name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tui => "Terminal",
            Self::Headless => "Headless",
            Self::Custom(name) => name,
        }
    }
}
