//! StatBar Widget
//!
//! One labelled meter per stat: `Faith  ███████░░░  75`.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use lion_core::{PetStats, Stat, STAT_MAX};

use crate::theme::{stat_color, DIM_GRAY};

/// Width reserved for the label column
const LABEL_WIDTH: usize = 7;

/// Width reserved for the value column (" 100")
const VALUE_WIDTH: u16 = 4;

/// A single stat meter
pub struct StatBar {
    label: &'static str,
    value: u8,
    color: Color,
}

impl StatBar {
    /// Meter for one stat of `stats`
    pub fn new(stat: Stat, stats: &PetStats) -> Self {
        Self {
            label: stat.label(),
            value: stats.get(stat),
            color: stat_color(stat),
        }
    }

    /// Filled cells out of `width`, rounded to nearest
    pub fn filled(value: u8, width: u16) -> u16 {
        let value = u32::from(value.min(STAT_MAX));
        let width = u32::from(width);
        let max = u32::from(STAT_MAX);
        u16::try_from((value * width + max / 2) / max).unwrap_or(0)
    }
}

impl Widget for StatBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width <= VALUE_WIDTH {
            return;
        }

        let pad = LABEL_WIDTH.saturating_sub(self.label.width());
        let label = format!("{}{}", self.label, " ".repeat(pad));
        let (x, _) = buf.set_stringn(
            area.x,
            area.y,
            &label,
            usize::from(area.width),
            Style::default().fg(self.color),
        );

        let bar_width = (area.x + area.width).saturating_sub(x + VALUE_WIDTH);
        let filled = Self::filled(self.value, bar_width);
        let bar: String = "█".repeat(usize::from(filled))
            + &"░".repeat(usize::from(bar_width.saturating_sub(filled)));
        buf.set_string(x, area.y, &bar, Style::default().fg(self.color));

        buf.set_string(
            x + bar_width,
            area.y,
            format!("{:>4}", self.value),
            Style::default().fg(DIM_GRAY),
        );
    }
}

/// All six meters stacked, needs first
pub struct StatPanel<'a> {
    stats: &'a PetStats,
}

impl<'a> StatPanel<'a> {
    /// Panel for a set of stats
    pub fn new(stats: &'a PetStats) -> Self {
        Self { stats }
    }
}

impl Widget for StatPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (i, stat) in Stat::ALL.iter().enumerate() {
            let y = area.y + i as u16;
            if y >= area.y + area.height {
                break;
            }
            StatBar::new(*stat, self.stats).render(Rect::new(area.x, y, area.width, 1), buf);
        }
    }
}
