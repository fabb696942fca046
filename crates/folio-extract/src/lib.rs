//! Folio Extraction Provider Layer
//!
//! Pluggable text extraction backends behind the `TextExtractor` trait from
//! `folio-domain`.
//!
//! # Architecture
//!
//! The primary extractor reads the document's embedded text layer. When that
//! yields too little text, the structure pipeline escalates to one secondary
//! provider, chosen once from configuration.
//!
//! # Providers
//!
//! - `PdfTextExtractor`: Embedded text layer via `pdf-extract` (primary)
//! - `VisionApiProvider`: Remote document text detection (secondary)
//! - `LocalOcrProvider`: `pdftoppm` + `tesseract` on the local machine (secondary)
//! - `MockExtractor`: Deterministic mock for testing
//!
//! # Examples
//!
//! ```
//! use folio_extract::MockExtractor;
//! use folio_domain::{traits::TextExtractor, RawSource};
//!
//! # tokio_test::block_on(async {
//! let extractor = MockExtractor::new("Hello from the scanner!");
//! let text = extractor.extract(&RawSource::from(vec![0u8; 4])).await.unwrap();
//! assert_eq!(text, "Hello from the scanner!");
//! # });
//! ```

#![warn(missing_docs)]

pub mod local_ocr;
pub mod pdf_text;
pub mod provider;
pub mod vision;

use folio_domain::traits::TextExtractor;
use folio_domain::RawSource;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;

pub use local_ocr::LocalOcrProvider;
pub use pdf_text::PdfTextExtractor;
pub use provider::SecondaryProvider;
pub use vision::VisionApiProvider;

/// Errors that can occur while extracting text
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Unexpected response from a remote provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider requires credentials that were not configured
    #[error("Missing credentials for {0}")]
    MissingCredentials(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// External tool is not installed or not on PATH
    #[error("Tool unavailable: {0}")]
    ToolUnavailable(String),

    /// External tool exited unsuccessfully
    #[error("Tool failed: {0}")]
    ToolFailed(String),

    /// The document could not be parsed as a PDF
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("Extraction error: {0}")]
    Other(String),
}

/// Mock extractor for deterministic testing
///
/// Returns a fixed text without touching the document bytes, and counts how
/// often it was asked. Clones share the counter.
///
/// # Examples
///
/// ```
/// use folio_extract::MockExtractor;
///
/// let ok = MockExtractor::new("text");
/// let broken = MockExtractor::failing("scanner offline");
/// assert_eq!(ok.call_count(), 0);
/// assert_eq!(broken.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockExtractor {
    response: Result<String, String>,
    call_count: Arc<AtomicUsize>,
}

impl MockExtractor {
    /// Create a mock that always returns `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that always fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times extract was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new("Default mock text")
    }
}

impl TextExtractor for MockExtractor {
    type Error = ExtractError;

    fn name(&self) -> &str {
        "mock"
    }

    async fn extract(&self, _source: &RawSource) -> Result<String, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.response.clone().map_err(ExtractError::Other)
    }
}
