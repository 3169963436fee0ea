//! Lion TUI - Terminal interface for Bible Lion
//!
//! This crate provides a full-screen terminal UI for Leo, a lion cub who
//! grows through prayer, reading, song and kindness.
//!
//! # Architecture
//!
//! - **Compositor**: Layered rendering with z-ordering (card, lion, modal)
//! - **Avatar**: Lion sprites per size class, cue motion, blink and sparkles
//! - **Widgets**: Stat bars, activity buttons, devotional card
//! - **CompanionClient**: The embedded `lion-core` Companion
//!
//! All pet logic lives in `lion-core`; this crate only draws
//! [`DisplayState`](display::DisplayState) and forwards input.

pub mod app;
pub mod avatar;
pub mod companion_client;
pub mod compositor;
pub mod display;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use companion_client::CompanionClient;
