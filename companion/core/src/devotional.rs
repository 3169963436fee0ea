//! Devotional Readings
//!
//! A small fixed library of readings plus a reader that tracks which one is
//! showing and whether the reading view is open. Completing a reading is a
//! pet operation ([`crate::Pet::complete_devotional`]); this module only owns
//! the content and the pagination.

use serde::{Deserialize, Serialize};

/// One devotional reading
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Devotional {
    /// Short title
    pub title: String,
    /// Scripture reference, e.g. "John 1:5"
    pub verse: String,
    /// Body text
    pub content: String,
    /// Illustration reference (URL or asset key)
    pub image: String,
}

impl Devotional {
    /// Build a devotional from string slices
    #[must_use]
    pub fn new(title: &str, verse: &str, content: &str, image: &str) -> Self {
        Self {
            title: title.to_string(),
            verse: verse.to_string(),
            content: content.to_string(),
            image: image.to_string(),
        }
    }
}

/// The built-in readings
#[must_use]
pub fn builtin_devotionals() -> Vec<Devotional> {
    vec![
        Devotional::new(
            "Light in Darkness",
            "John 1:5",
            "The light shines in the darkness, and the darkness has not overcome it.",
            "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=400&h=200&fit=crop",
        ),
        Devotional::new(
            "God's Love",
            "1 John 4:19",
            "We love because he first loved us. God's love fills our hearts with joy.",
            "https://images.unsplash.com/photo-1518837695005-2083093ee35b?w=400&h=200&fit=crop",
        ),
        Devotional::new(
            "Be Kind",
            "Ephesians 4:32",
            "Be kind to one another, tenderhearted, forgiving one another.",
            "https://images.unsplash.com/photo-1469474968028-56623f02e42e?w=400&h=200&fit=crop",
        ),
    ]
}

/// Pagination and visibility for the devotional view
#[derive(Clone, Debug)]
pub struct DevotionalReader {
    entries: Vec<Devotional>,
    index: usize,
    open: bool,
}

impl Default for DevotionalReader {
    fn default() -> Self {
        Self::new(builtin_devotionals())
    }
}

impl DevotionalReader {
    /// Reader over the given entries, starting closed at the first entry
    #[must_use]
    pub fn new(entries: Vec<Devotional>) -> Self {
        Self {
            entries,
            index: 0,
            open: false,
        }
    }

    /// Open the reading view
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the reading view
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether the reading view is open
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The reading currently selected
    #[must_use]
    pub fn current(&self) -> Option<&Devotional> {
        self.entries.get(self.index)
    }

    /// Advance to the next reading, wrapping at the end
    pub fn next(&mut self) -> Option<&Devotional> {
        if !self.entries.is_empty() {
            self.index = (self.index + 1) % self.entries.len();
        }
        self.current()
    }

    /// Go back to the previous reading, wrapping at the start
    pub fn previous(&mut self) -> Option<&Devotional> {
        if !self.entries.is_empty() {
            self.index = (self.index + self.entries.len() - 1) % self.entries.len();
        }
        self.current()
    }

    /// One-based position and total, for the progress bar
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        if self.entries.is_empty() {
            (0, 0)
        } else {
            (self.index + 1, self.entries.len())
        }
    }

    /// All readings
    #[must_use]
    pub fn entries(&self) -> &[Devotional] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_library() {
        let entries = builtin_devotionals();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].verse, "John 1:5");
        assert_eq!(entries[1].title, "God's Love");
        assert_eq!(entries[2].verse, "Ephesians 4:32");
    }

    #[test]
    fn test_open_close() {
        let mut reader = DevotionalReader::default();
        assert!(!reader.is_open());
        reader.open();
        assert!(reader.is_open());
        reader.close();
        assert!(!reader.is_open());
    }

    #[test]
    fn test_next_wraps() {
        let mut reader = DevotionalReader::default();
        assert_eq!(reader.position(), (1, 3));
        reader.next();
        reader.next();
        assert_eq!(reader.position(), (3, 3));
        let wrapped = reader.next().map(|d| d.title.clone());
        assert_eq!(wrapped.as_deref(), Some("Light in Darkness"));
        assert_eq!(reader.position(), (1, 3));
    }

    #[test]
    fn test_previous_wraps() {
        let mut reader = DevotionalReader::default();
        let last = reader.previous().map(|d| d.verse.clone());
        assert_eq!(last.as_deref(), Some("Ephesians 4:32"));
        assert_eq!(reader.position(), (3, 3));
    }

    #[test]
    fn test_empty_reader() {
        let mut reader = DevotionalReader::new(Vec::new());
        assert!(reader.current().is_none());
        assert!(reader.next().is_none());
        assert!(reader.previous().is_none());
        assert_eq!(reader.position(), (0, 0));
    }
}
