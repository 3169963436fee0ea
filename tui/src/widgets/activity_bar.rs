//! ActivityBar Widget
//!
//! The row of activity buttons under the lion. Every button names its
//! hotkey, and [`ActivityBar::layout`] gives the click targets so a mouse
//! click sends the same event as the key.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use lion_core::{Activity, SurfaceEvent};

use crate::input::activity_hotkey;
use crate::theme::{CARD_BORDER_DIM, DIM_GRAY, LION_AMBER};

/// Gap between buttons
const GAP: u16 = 1;

/// One clickable button
#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    /// Text shown, hotkey included
    pub label: String,
    /// Event sent when pressed
    pub event: SurfaceEvent,
}

impl Button {
    fn activity(activity: Activity) -> Self {
        Self {
            label: format!(
                "[{}] {} {}",
                activity_hotkey(activity),
                activity.icon(),
                activity.label()
            ),
            event: SurfaceEvent::activity(activity.as_str()),
        }
    }

    fn devotional() -> Self {
        Self {
            label: "[d] ✝ Devotional".to_string(),
            event: SurfaceEvent::OpenDevotional,
        }
    }

    /// Display width in cells
    pub fn width(&self) -> u16 {
        u16::try_from(self.label.width()).unwrap_or(u16::MAX)
    }
}

/// The button row
pub struct ActivityBar {
    buttons: Vec<Button>,
    enabled: bool,
}

impl Default for ActivityBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityBar {
    /// The four activities plus the devotional button
    pub fn new() -> Self {
        let mut buttons: Vec<Button> = Activity::ALL.into_iter().map(Button::activity).collect();
        buttons.push(Button::devotional());
        Self {
            buttons,
            enabled: true,
        }
    }

    /// Dim the buttons (while the devotional modal has focus)
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Buttons in display order
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Where each button lands inside `area`, wrapping onto more rows when
    /// the line is too narrow. Buttons that do not fit are left out.
    pub fn layout(&self, area: Rect) -> Vec<(Rect, SurfaceEvent)> {
        let mut targets = Vec::with_capacity(self.buttons.len());
        let (mut x, mut y) = (area.x, area.y);
        let right = area.x + area.width;
        let bottom = area.y + area.height;

        for button in &self.buttons {
            let width = button.width();
            if width > area.width {
                continue;
            }
            if x + width > right {
                x = area.x;
                y += 1;
            }
            if y >= bottom {
                break;
            }
            targets.push((Rect::new(x, y, width, 1), button.event.clone()));
            x += width + GAP;
        }
        targets
    }

    /// Rows needed to show every button at `width`
    pub fn height_for(&self, width: u16) -> u16 {
        let rows = self
            .layout(Rect::new(0, 0, width, u16::MAX))
            .iter()
            .map(|(rect, _)| rect.y)
            .max();
        rows.map_or(1, |last| last + 1)
    }
}

impl Widget for ActivityBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (key_style, text_style) = if self.enabled {
            (
                Style::default().fg(LION_AMBER).add_modifier(Modifier::BOLD),
                Style::default(),
            )
        } else {
            (
                Style::default().fg(CARD_BORDER_DIM),
                Style::default().fg(DIM_GRAY),
            )
        };

        for ((rect, _), button) in self.layout(area).into_iter().zip(&self.buttons) {
            // "[p]" in accent, the rest plain
            let (key, rest) = button.label.split_at(3);
            let (x, _) = buf.set_stringn(rect.x, rect.y, key, usize::from(rect.width), key_style);
            let left = rect.width.saturating_sub(x - rect.x);
            buf.set_stringn(x, rect.y, rest, usize::from(left), text_style);
        }
    }
}
