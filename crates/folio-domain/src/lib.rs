//! Folio Domain Layer
//!
//! This crate contains the domain model shared by every Folio crate: the
//! records produced while recovering the logical structure of a scanned or
//! printed document, and the trait seam behind which extraction providers live.
//!
//! ## Key Concepts
//!
//! - **RawSource**: The immutable bytes of one source document
//! - **ExtractionResult**: Plain text plus the method that produced it
//! - **Line / LineClass**: One line of extracted text and its derived label
//! - **Paragraph**: Whitespace-clean prose with the line span it came from
//! - **Chapter / BookStructure**: The final, immutable structure of a document
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure data and invariants only
//! - Extraction backends live in `folio-extract`
//! - The structure pipeline lives in `folio-structure`
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chapter;
pub mod extraction;
pub mod line;
pub mod paragraph;
pub mod traits;

// Re-exports for convenience
pub use chapter::{BookStructure, Chapter, OrderedParagraph, PARAGRAPH_SEPARATOR};
pub use extraction::{ExtractionMethod, ExtractionResult, ProviderKind, RawSource};
pub use line::{Line, LineClass};
pub use paragraph::Paragraph;
