//! TextBlock Widget
//!
//! A borderless, scrollable, word-wrapped text region. Used for the body of
//! a devotional reading.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::StatefulWidget;
use textwrap::wrap;

/// State for a scrollable text block
#[derive(Debug, Default)]
pub struct TextBlockState {
    /// Scroll offset (lines from top)
    pub scroll_offset: usize,
    /// Total content lines at the last render
    pub total_lines: usize,
}

impl TextBlockState {
    /// Scroll by delta (positive = down)
    pub fn scroll(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
    }

    /// Back to the first line
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
    }
}

/// A borderless, scrollable text block
pub struct TextBlock<'a> {
    content: &'a str,
    style: Style,
}

impl<'a> TextBlock<'a> {
    /// Wrap `content`
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            style: Style::default(),
        }
    }

    /// Text style
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Content wrapped to `width`, blank lines kept
    pub fn lines(&self, width: u16) -> Vec<String> {
        let width = usize::from(width.max(1));
        self.content
            .lines()
            .flat_map(|line| {
                if line.trim().is_empty() {
                    vec![String::new()]
                } else {
                    wrap(line, width)
                        .into_iter()
                        .map(|cow| cow.into_owned())
                        .collect()
                }
            })
            .collect()
    }
}

impl StatefulWidget for TextBlock<'_> {
    type State = TextBlockState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let wrapped = self.lines(area.width);
        state.total_lines = wrapped.len();

        let max_scroll = state.total_lines.saturating_sub(usize::from(area.height));
        state.scroll_offset = state.scroll_offset.min(max_scroll);

        for (i, line) in wrapped
            .iter()
            .skip(state.scroll_offset)
            .take(usize::from(area.height))
            .enumerate()
        {
            let y = area.y + i as u16;
            buf.set_stringn(area.x, y, line, usize::from(area.width), self.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_wraps_to_width() {
        let block = TextBlock::new("the lord is my shepherd");
        assert_eq!(block.lines(10), vec!["the lord", "is my", "shepherd"]);
    }

    #[test]
    fn test_keeps_blank_lines() {
        let block = TextBlock::new("first\n\nsecond");
        assert_eq!(block.lines(20), vec!["first", "", "second"]);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState::default();
        state.scroll(10);

        TextBlock::new("one two three four five six").render(area, &mut buf, &mut state);

        assert_eq!(state.total_lines, 3);
        assert_eq!(state.scroll_offset, 1);
        assert_eq!(row(&buf, 0), "three four");
        assert_eq!(row(&buf, 1), "five six");

        state.scroll(-5);
        assert_eq!(state.scroll_offset, 0);
    }
}
