//! Theme and Colors
//!
//! Leo's palette for the terminal. The lion's own colours come from
//! `lion_core::presentation` as [`Rgb`] values and are converted here;
//! everything else (stat bars, notifications, chrome) is defined locally.

use ratatui::style::Color;

use lion_core::presentation::palette;
use lion_core::{NotifyLevel, Rgb, Stat};

/// Convert a core colour to a terminal colour
pub const fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

// ============================================================================
// Lion Accents
// ============================================================================

/// Eyes - dark, expressive
pub const LION_EYES: Color = Color::Rgb(40, 30, 20);

/// Mouth
pub const LION_MOUTH: Color = Color::Rgb(120, 60, 30);

/// Nose (pink-400)
pub const LION_NOSE: Color = rgb(palette::PINK_400);

/// Inner ears (pink-300)
pub const LION_INNER_EAR: Color = rgb(palette::PINK_300);

/// Sparkles and crown (yellow-300)
pub const SPARKLE: Color = rgb(palette::YELLOW_300);

/// Sleep "z" marks
pub const SLEEP_BLUE: Color = Color::Rgb(150, 180, 255);

// ============================================================================
// Stat Colors
// ============================================================================

/// Faith bar - purple
pub const FAITH_PURPLE: Color = Color::Rgb(168, 130, 255);

/// Joy bar - warm yellow
pub const JOY_YELLOW: Color = Color::Rgb(255, 223, 128);

/// Love bar - pink
pub const LOVE_PINK: Color = Color::Rgb(255, 150, 190);

/// Peace bar - soft blue
pub const PEACE_BLUE: Color = Color::Rgb(130, 190, 255);

/// Food bar - orange
pub const FOOD_ORANGE: Color = Color::Rgb(255, 160, 80);

/// Water bar - cyan
pub const WATER_CYAN: Color = Color::Rgb(100, 210, 230);

/// Bar colour for a stat
pub fn stat_color(stat: Stat) -> Color {
    match stat {
        Stat::Faith => FAITH_PURPLE,
        Stat::Joy => JOY_YELLOW,
        Stat::Love => LOVE_PINK,
        Stat::Peace => PEACE_BLUE,
        Stat::Food => FOOD_ORANGE,
        Stat::Water => WATER_CYAN,
    }
}

// ============================================================================
// UI Colors
// ============================================================================

/// Leo's signature amber (titles, name, accents)
pub const LION_AMBER: Color = rgb(palette::AMBER_500);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Card border while the lion is content
pub const CARD_BORDER: Color = rgb(palette::AMBER_300);

/// Card border on the dim half of the sad pulse
pub const CARD_BORDER_DIM: Color = Color::Rgb(120, 110, 100);

/// Warning yellow
pub const WARNING_YELLOW: Color = Color::Rgb(255, 200, 80);

/// Error red
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Success green
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 230, 120);

/// Info blue
pub const INFO_BLUE: Color = Color::Rgb(130, 190, 255);

/// Text colour for a notification level
pub fn notify_color(level: NotifyLevel) -> Color {
    match level {
        NotifyLevel::Info => INFO_BLUE,
        NotifyLevel::Warning => WARNING_YELLOW,
        NotifyLevel::Error => ERROR_RED,
        NotifyLevel::Success => SUCCESS_GREEN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_conversion() {
        assert_eq!(rgb(Rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
        assert_eq!(LION_NOSE, rgb(palette::PINK_400));
    }

    #[test]
    fn test_every_stat_has_a_distinct_color() {
        let colors: Vec<Color> = Stat::ALL.iter().map(|s| stat_color(*s)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
