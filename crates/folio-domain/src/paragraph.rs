//! Paragraph module - assembled prose with its source line span

use serde::{Deserialize, Serialize};

/// A paragraph of body text
///
/// Content never carries leading or trailing whitespace, double spaces or
/// line breaks; the pipeline normalizes every fragment before it lands here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Normalized paragraph text
    pub content: String,

    /// Index of the first source line
    pub start_line_index: usize,

    /// Index of the last source line
    pub end_line_index: usize,
}

impl Paragraph {
    /// Create a paragraph covering the given line span
    pub fn new(content: impl Into<String>, start_line_index: usize, end_line_index: usize) -> Self {
        Self {
            content: content.into(),
            start_line_index,
            end_line_index,
        }
    }

    /// Number of characters in the content
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether the content is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Check the whitespace invariant
    pub fn is_normalized(&self) -> bool {
        self.content.trim() == self.content
            && !self.content.contains("  ")
            && !self.content.contains('\n')
            && !self.content.contains('\r')
    }
}
