//! Widgets
//!
//! Pet-specific ratatui widgets. Each one draws from display state only.

mod activity_bar;
mod devotional_card;
mod stat_bar;
mod text_block;

pub use activity_bar::{ActivityBar, Button};
pub use devotional_card::DevotionalCard;
pub use stat_bar::{StatBar, StatPanel};
pub use text_block::{TextBlock, TextBlockState};
