//! Sprite Definitions
//!
//! Blocky pixel art using Unicode block elements and colours. Each cell has
//! its own foreground colour; body and head cells can also take their
//! colour from a diagonal gradient so the lion shades from top-left to
//! bottom-right the way the card art does.

use std::collections::HashMap;

use ratatui::style::Color;

use lion_core::ColorGradient;

use crate::theme::rgb;

/// A single colored cell in a sprite
#[derive(Clone, Debug, PartialEq)]
pub struct ColoredCell {
    /// The character to display
    pub ch: char,
    /// Foreground color
    pub fg: Color,
}

impl ColoredCell {
    /// Create a new colored cell
    pub const fn new(ch: char, fg: Color) -> Self {
        Self { ch, fg }
    }

    /// Empty/transparent cell
    pub const fn empty() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
        }
    }

    /// Check if cell is empty/transparent
    pub fn is_empty(&self) -> bool {
        self.ch == ' '
    }
}

/// One rendered lion pose
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// 2D grid of colored cells (row-major)
    pub cells: Vec<Vec<ColoredCell>>,
    /// Width in terminal cells
    pub width: u16,
    /// Height in terminal cells
    pub height: u16,
}

impl Frame {
    /// Create a frame from a grid of colored cells
    pub fn new(cells: Vec<Vec<ColoredCell>>) -> Self {
        let height = u16::try_from(cells.len()).unwrap_or(u16::MAX);
        let width = cells
            .iter()
            .map(|row| u16::try_from(row.len()).unwrap_or(u16::MAX))
            .max()
            .unwrap_or(0);
        Self {
            cells,
            width,
            height,
        }
    }

    /// Get cell at position (returns empty if out of bounds)
    pub fn get(&self, x: u16, y: u16) -> &ColoredCell {
        static EMPTY: ColoredCell = ColoredCell::empty();
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .unwrap_or(&EMPTY)
    }

    /// Characters of one row, for tests and the dev overlay
    pub fn row_text(&self, y: u16) -> String {
        self.cells
            .get(y as usize)
            .map(|row| row.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }

    /// Whether any cell in the frame shows `ch`
    pub fn contains(&self, ch: char) -> bool {
        self.cells.iter().flatten().any(|c| c.ch == ch)
    }
}

/// How a palette key is coloured
#[derive(Clone, Copy, Debug)]
pub enum Paint {
    /// Same colour everywhere
    Solid(Color),
    /// Colour by diagonal position within the frame
    Gradient(ColorGradient),
    /// Key is not drawn (a feature this lion doesn't have yet)
    Hidden,
}

/// One palette entry: pattern key, character drawn, paint
pub type PaletteEntry = (char, char, Paint);

// ============================================================================
// Sprite Builder
// ============================================================================

/// Build a frame from a pattern and palette
///
/// Each character in the pattern is a palette key. ' ' is always
/// transparent, [`Paint::Hidden`] keys become transparent too, and unknown
/// keys are drawn as-is in the default colour.
///
/// ```ignore
/// let palette = [('H', '█', Paint::Solid(HEAD)), ('E', 'o', Paint::Solid(EYES))];
/// let frame = build_frame(&[" HHH ", " HEH "], &palette);
/// ```
pub fn build_frame(pattern: &[&str], palette: &[PaletteEntry]) -> Frame {
    let map: HashMap<char, (char, Paint)> = palette
        .iter()
        .map(|&(key, ch, paint)| (key, (ch, paint)))
        .collect();

    let rows = pattern.len().max(1);
    let cols = pattern
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .max(1);
    let span = (rows + cols).saturating_sub(2).max(1) as f32;

    let cells = pattern
        .iter()
        .enumerate()
        .map(|(y, line)| {
            line.chars()
                .enumerate()
                .map(|(x, key)| match map.get(&key) {
                    _ if key == ' ' => ColoredCell::empty(),
                    Some((_, Paint::Hidden)) => ColoredCell::empty(),
                    Some((ch, Paint::Solid(color))) => ColoredCell::new(*ch, *color),
                    Some((ch, Paint::Gradient(gradient))) => {
                        let t = (x + y) as f32 / span;
                        ColoredCell::new(*ch, rgb(gradient.at(t)))
                    }
                    None => ColoredCell::new(key, Color::Reset),
                })
                .collect()
        })
        .collect();

    Frame::new(cells)
}
