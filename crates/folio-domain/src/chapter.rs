//! Chapter module - the final structure of a document

use crate::extraction::ExtractionMethod;
use serde::{Deserialize, Serialize};

/// Separator placed between paragraphs inside a chapter's content
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// A titled run of paragraphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Heading text, or a generated title when the heading carried none
    pub title: String,

    /// Paragraphs joined by [`PARAGRAPH_SEPARATOR`]
    pub content: String,

    /// Position of the first paragraph in the document's paragraph sequence
    pub start_index: usize,

    /// Position of the last paragraph (inclusive)
    pub end_index: usize,
}

impl Chapter {
    /// Build a chapter from its paragraphs
    pub fn from_paragraphs<S: AsRef<str>>(
        title: impl Into<String>,
        paragraphs: &[S],
        start_index: usize,
        end_index: usize,
    ) -> Self {
        let content = paragraphs
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR);

        Self {
            title: title.into(),
            content,
            start_index,
            end_index,
        }
    }

    /// Re-split the content into its paragraphs
    pub fn paragraphs(&self) -> Vec<&str> {
        self.content
            .split(PARAGRAPH_SEPARATOR)
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Number of characters in the content
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether the chapter has no content
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A paragraph flattened out of its chapter, for catalog persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedParagraph {
    /// Zero-based position across the whole document
    pub order: usize,

    /// Index of the owning chapter in [`BookStructure::chapters`]
    pub chapter_index: usize,

    /// Paragraph text
    pub content: String,
}

/// The recovered structure of one document
///
/// Built once at the end of the pipeline and never mutated; persistence
/// layers turn it into catalog rows.
///
/// # Examples
///
/// ```
/// use folio_domain::{BookStructure, Chapter, ExtractionMethod};
///
/// let chapters = vec![
///     Chapter::from_paragraphs("One", &["First."], 0, 0),
///     Chapter::from_paragraphs("Two", &["Second."], 1, 1),
/// ];
/// let book = BookStructure::new(None, None, chapters, ExtractionMethod::Primary);
/// assert!(book.has_chapters());
/// assert_eq!(book.paragraphs().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BookStructureFields")]
pub struct BookStructure {
    title: Option<String>,
    author: Option<String>,
    chapters: Vec<Chapter>,
    has_chapters: bool,
    extraction_method: ExtractionMethod,
}

/// Deserialization shape; `has_chapters` is always recomputed
#[derive(Deserialize)]
struct BookStructureFields {
    title: Option<String>,
    author: Option<String>,
    chapters: Vec<Chapter>,
    extraction_method: ExtractionMethod,
}

impl From<BookStructureFields> for BookStructure {
    fn from(fields: BookStructureFields) -> Self {
        BookStructure::new(
            fields.title,
            fields.author,
            fields.chapters,
            fields.extraction_method,
        )
    }
}

impl BookStructure {
    /// Assemble the final structure
    pub fn new(
        title: Option<String>,
        author: Option<String>,
        chapters: Vec<Chapter>,
        extraction_method: ExtractionMethod,
    ) -> Self {
        let has_chapters = chapters.len() > 1;
        Self {
            title,
            author,
            chapters,
            has_chapters,
            extraction_method,
        }
    }

    /// Detected document title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Detected author byline
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Chapters in document order
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// True iff more than one chapter was recovered
    pub fn has_chapters(&self) -> bool {
        self.has_chapters
    }

    /// Strategy that produced the underlying text
    pub fn extraction_method(&self) -> ExtractionMethod {
        self.extraction_method
    }

    /// Flatten every chapter into an ordered paragraph list
    pub fn paragraphs(&self) -> Vec<OrderedParagraph> {
        self.chapters
            .iter()
            .enumerate()
            .flat_map(|(chapter_index, chapter)| {
                chapter
                    .paragraphs()
                    .into_iter()
                    .map(move |content| (chapter_index, content))
            })
            .enumerate()
            .map(|(order, (chapter_index, content))| OrderedParagraph {
                order,
                chapter_index,
                content: content.to_string(),
            })
            .collect()
    }

    /// Serialize to pretty JSON for a downstream persistence layer
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
