//! Lion Core - Headless Pet Model for Bible Lion
//!
//! This crate holds everything about Leo the lion that isn't drawing:
//! the six stats, the mood and growth stage derived from them, the
//! activities that feed them, devotional readings, and the timers that
//! make the lion hungry and lonely. It can drive a TUI or run headless.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      UI Surfaces                         │
//! │   ┌───────────┐                   ┌──────────────────┐   │
//! │   │    TUI    │                   │ lion-sim (head-  │   │
//! │   │ (ratatui) │                   │ less, JSON out)  │   │
//! │   └─────┬─────┘                   └────────┬─────────┘   │
//! │         └──────────────┬───────────────────┘             │
//! │                 SurfaceEvent (up)                        │
//! │               CompanionMessage (down)                    │
//! └────────────────────────┼─────────────────────────────────┘
//!                          │
//! ┌────────────────────────┼─────────────────────────────────┐
//! │                   LION CORE                              │
//! │  ┌─────────────────────┴──────────────────────────────┐  │
//! │  │                   Companion                        │  │
//! │  │  ┌────────┐  ┌───────────┐  ┌────────────┐  ┌───┐  │  │
//! │  │  │  Pet   │  │ Scheduler │  │ Devotional │  │ ⏱ │  │  │
//! │  │  │        │  │           │  │   Reader   │  │   │  │  │
//! │  │  └────────┘  └───────────┘  └────────────┘  └───┘  │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Companion`]: owns the pet and turns surface events into messages
//! - [`Pet`]: stats, streak, derived mood/growth, animation cue
//! - [`CompanionMessage`]: messages sent from the Companion to surfaces
//! - [`SurfaceEvent`]: events sent from surfaces to the Companion
//! - [`Clock`]: injectable time source ([`ManualClock`] in tests)
//!
//! # Quick Start
//!
//! ```ignore
//! use lion_core::{Companion, LionConfig, SurfaceEvent, SurfaceType, SystemClock};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (tx, mut rx) = mpsc::channel(100);
//!     let mut companion = Companion::new(&LionConfig::default(), SystemClock, tx);
//!     companion.start();
//!
//!     companion
//!         .handle_event(SurfaceEvent::Connected { surface_type: SurfaceType::Headless })
//!         .await?;
//!     companion.handle_event(SurfaceEvent::activity("pray")).await?;
//!     companion.tick().await?;
//!
//!     while let Ok(msg) = rx.try_recv() {
//!         // Render message
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]

pub mod activity;
pub mod animation;
pub mod clock;
pub mod companion;
pub mod config;
pub mod devotional;
pub mod events;
pub mod growth;
pub mod messages;
pub mod mood;
pub mod pet;
pub mod presentation;
pub mod scheduler;
pub mod stats;

// Re-exports for convenience
pub use activity::{Activity, ActivityError};
pub use animation::{ActiveCue, AnimationCue, AnimationPriority, EasingFunction, Track};
pub use clock::{Clock, ManualClock, SystemClock};
pub use companion::Companion;
pub use devotional::{builtin_devotionals, Devotional, DevotionalReader};
pub use events::{SurfaceEvent, SurfaceType};
pub use growth::GrowthStage;
pub use messages::{streak_badge, CompanionMessage, NotifyLevel};
pub use mood::{InactivityLevel, InactivityThresholds, Mood};
pub use pet::{derive, Derived, DerivedChange, Pet, PetSnapshot};
pub use presentation::{
    BlinkTimer, ColorGradient, LionLook, ManeStyle, MotionCurve, MouthShape, Rgb, SizeClass,
    Sparkle, SparkleField, Transform,
};
pub use scheduler::{Firing, PeriodicTask, Scheduler, TaskKind};
pub use stats::{PetStats, Stat, STAT_MAX};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, LionConfig, LionToml,
};
