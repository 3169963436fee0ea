//! DevotionalCard Widget
//!
//! The devotional modal: a rounded card with the reading's title in the
//! border, the scripture reference, the wrapped body, and a footer with the
//! page position and keys.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, StatefulWidget, Widget};

use crate::display::DisplayDevotional;
use crate::theme::{CARD_BORDER, DIM_GRAY, FAITH_PURPLE, LION_AMBER};

use super::text_block::{TextBlock, TextBlockState};

/// Widest the card gets
const MAX_WIDTH: u16 = 60;

/// Tallest the card gets
const MAX_HEIGHT: u16 = 14;

/// Key help shown under the reading
const FOOTER_KEYS: &str = "Enter: Amen · n/b: page · Esc: close";

/// The devotional modal
pub struct DevotionalCard<'a> {
    devotional: &'a DisplayDevotional,
}

impl<'a> DevotionalCard<'a> {
    /// Card for the current reading
    pub fn new(devotional: &'a DisplayDevotional) -> Self {
        Self { devotional }
    }

    /// Centred card area within the screen
    pub fn area(screen: Rect) -> Rect {
        let width = MAX_WIDTH.min(screen.width.saturating_sub(4));
        let height = MAX_HEIGHT.min(screen.height.saturating_sub(2));
        Rect::new(
            screen.x + (screen.width.saturating_sub(width)) / 2,
            screen.y + (screen.height.saturating_sub(height)) / 2,
            width,
            height,
        )
    }

    /// Footer text for a position
    pub fn footer(position: (usize, usize)) -> String {
        let (current, total) = position;
        if total == 0 {
            FOOTER_KEYS.to_string()
        } else {
            format!("({current}/{total}) {FOOTER_KEYS}")
        }
    }
}

impl StatefulWidget for DevotionalCard<'_> {
    type State = TextBlockState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let title = self
            .devotional
            .entry
            .as_ref()
            .map_or_else(|| " Devotional ".to_string(), |e| format!(" {} ", e.title));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CARD_BORDER))
            .title(title)
            .title_style(Style::default().fg(LION_AMBER).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 4 || inner.height < 3 {
            return;
        }

        let Some(entry) = &self.devotional.entry else {
            buf.set_stringn(
                inner.x + 1,
                inner.y,
                "No readings yet.",
                usize::from(inner.width - 2),
                Style::default().fg(DIM_GRAY),
            );
            return;
        };

        let text_width = inner.width - 2;
        let x = inner.x + 1;

        buf.set_stringn(
            x,
            inner.y,
            &entry.verse,
            usize::from(text_width),
            Style::default()
                .fg(FAITH_PURPLE)
                .add_modifier(Modifier::ITALIC),
        );

        // Verse, blank line, body, footer
        let body = Rect::new(x, inner.y + 2, text_width, inner.height.saturating_sub(3));
        TextBlock::new(&entry.content).render(body, buf, state);

        buf.set_stringn(
            x,
            inner.y + inner.height - 1,
            Self::footer(self.devotional.position),
            usize::from(text_width),
            Style::default().fg(DIM_GRAY),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lion_core::builtin_devotionals;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_area_is_centred_and_bounded() {
        let area = DevotionalCard::area(Rect::new(0, 0, 100, 40));
        assert_eq!(area, Rect::new(20, 13, 60, 14));

        let small = DevotionalCard::area(Rect::new(0, 0, 30, 10));
        assert_eq!(small, Rect::new(2, 1, 26, 8));
    }

    #[test]
    fn test_footer_shows_position() {
        assert_eq!(
            DevotionalCard::footer((2, 3)),
            "(2/3) Enter: Amen · n/b: page · Esc: close"
        );
        assert_eq!(DevotionalCard::footer((0, 0)), FOOTER_KEYS);
    }

    #[test]
    fn test_renders_reading() {
        let devotional = DisplayDevotional {
            open: true,
            entry: builtin_devotionals().into_iter().next(),
            position: (1, 3),
        };
        let area = Rect::new(0, 0, 60, 14);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState::default();
        DevotionalCard::new(&devotional).render(area, &mut buf, &mut state);

        let out = text(&buf);
        assert!(out.contains("Light in Darkness"));
        assert!(out.contains("John 1:5"));
        assert!(out.contains("The light shines in the darkness"));
        assert!(out.contains("(1/3)"));
        assert!(out.starts_with('╭'));
    }

    #[test]
    fn test_empty_reader_says_so() {
        let devotional = DisplayDevotional {
            open: true,
            entry: None,
            position: (0, 0),
        };
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        DevotionalCard::new(&devotional).render(area, &mut buf, &mut TextBlockState::default());
        assert!(text(&buf).contains("No readings yet."));
    }
}
