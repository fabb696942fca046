//! Line module - one line of extracted text and its derived classification

use serde::{Deserialize, Serialize};

/// A single line of extracted text
///
/// `raw` keeps leading padding (centred headings are detected from it);
/// `trimmed` is the same text without surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line as it appeared in the text, without the line terminator
    pub raw: String,

    /// Line with surrounding whitespace removed
    pub trimmed: String,

    /// Zero-based position in the document's line sequence
    pub index: usize,
}

impl Line {
    /// Create a line at the given position
    pub fn new(raw: impl Into<String>, index: usize) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim().to_string();
        Self {
            raw,
            trimmed,
            index,
        }
    }

    /// Split text into its ordered line sequence
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_domain::Line;
    ///
    /// let lines = Line::split("  Title\n\nBody text.");
    /// assert_eq!(lines.len(), 3);
    /// assert_eq!(lines[0].trimmed, "Title");
    /// assert_eq!(lines[2].index, 2);
    /// ```
    pub fn split(text: &str) -> Vec<Line> {
        text.lines()
            .enumerate()
            .map(|(index, raw)| Line::new(raw, index))
            .collect()
    }

    /// Whether the line holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.trimmed.is_empty()
    }

    /// Number of characters in the trimmed line
    pub fn len(&self) -> usize {
        self.trimmed.chars().count()
    }

    /// Whether the trimmed line is empty
    pub fn is_empty(&self) -> bool {
        self.trimmed.is_empty()
    }

    /// Number of leading whitespace characters in the raw line
    pub fn leading_whitespace(&self) -> usize {
        self.raw.chars().take_while(|c| c.is_whitespace()).count()
    }
}

/// Label for a line of extracted text
///
/// Classification is derived on demand and never stored on the [`Line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineClass {
    /// Empty line, a natural paragraph boundary
    Blank,

    /// Page number or page range
    PageNumber,

    /// Heading, title, running head or boilerplate
    Header,

    /// Footnote or reference note
    Footnote,

    /// Body text
    Paragraph,
}

impl LineClass {
    /// Get the class name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LineClass::Blank => "blank",
            LineClass::PageNumber => "page_number",
            LineClass::Header => "header",
            LineClass::Footnote => "footnote",
            LineClass::Paragraph => "paragraph",
        }
    }

    /// Whether lines of this class carry body text
    pub fn is_content(&self) -> bool {
        matches!(self, LineClass::Paragraph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_keeps_padding_in_raw() {
        let line = Line::new("      CONTENTS   ", 4);
        assert_eq!(line.trimmed, "CONTENTS");
        assert_eq!(line.leading_whitespace(), 6);
        assert_eq!(line.len(), 8);
        assert_eq!(line.index, 4);
    }

    #[test]
    fn test_blank_line() {
        assert!(Line::new(" \t ", 0).is_blank());
        assert!(!Line::new(" x ", 0).is_blank());
    }

    #[test]
    fn test_split_counts_chars_not_bytes() {
        let lines = Line::split("café\nnaïve");
        assert_eq!(lines[0].len(), 4);
        assert_eq!(lines[1].len(), 5);
    }

    #[test]
    fn test_only_paragraph_is_content() {
        assert!(LineClass::Paragraph.is_content());
        assert!(!LineClass::Header.is_content());
        assert!(!LineClass::PageNumber.is_content());
        assert!(!LineClass::Footnote.is_content());
        assert!(!LineClass::Blank.is_content());
    }
}
