//! Folio Structure
//!
//! Recovers the logical structure of a book from extracted text.
//!
//! # Overview
//!
//! Text pulled out of a PDF, either from its embedded text layer or from
//! OCR, is a flat stream of lines: page numbers, running heads, hard line
//! wraps and hyphenated words all mixed into the prose. This crate turns
//! that stream into paragraphs grouped into titled chapters, with a
//! best-effort guess at the document's title and author.
//!
//! # Architecture
//!
//! ```text
//! RawSource → ExtractionStrategySelector → text + method
//!           → normalize → LineClassifier → ParagraphAssembler
//!           → PageBreakStitcher → ChapterDetector → TitleAuthorSniffer
//!           → BookStructure
//! ```
//!
//! # Key Features
//!
//! - **Fallback extraction**: OCR runs only when the text layer is too thin
//! - **Line classification**: page numbers, headings, footnotes and body text
//! - **Paragraph repair**: dehyphenation and page-break stitching
//! - **Chapter detection**: a strict mode for machine text, a lenient one for OCR
//! - **Configuration**: every threshold in [`StructureConfig`], loadable from TOML
//!
//! # Example Usage
//!
//! ```no_run
//! use folio_domain::RawSource;
//! use folio_structure::{StructureConfig, StructureExtractor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StructureConfig::from_toml(
//!     r#"
//!     [fallback]
//!     provider = "local-ocr"
//!     "#,
//! )?;
//! let extractor = StructureExtractor::from_config(config)?;
//!
//! let bytes = std::fs::read("book.pdf")?;
//! let book = extractor.extract(&RawSource::from(bytes)).await?;
//!
//! println!("Title: {:?}", book.title());
//! for chapter in book.chapters() {
//!     println!("{} ({} chars)", chapter.title, chapter.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assembler;
mod chapters;
mod classifier;
mod config;
mod error;
mod normalize;
mod pipeline;
mod selector;
mod sniffer;
mod stitcher;


pub use assembler::ParagraphAssembler;
pub use chapters::{ChapterDetector, DetectionMode, FRONT_MATTER_TITLE, FULL_TEXT_TITLE};
pub use classifier::LineClassifier;
pub use config::{FallbackConfig, SentenceBreakPolicy, StructureConfig};
pub use error::StructureError;
pub use normalize::{normalize_document, normalize_whitespace, respace_ocr};
pub use pipeline::{split_paragraphs, StructureExtractor};
pub use selector::ExtractionStrategySelector;
pub use sniffer::TitleAuthorSniffer;
pub use stitcher::PageBreakStitcher;
