//! Embedded text layer extraction
//!
//! Reads the text a PDF carries in its content streams. This is the fast,
//! structural path: it returns almost nothing for image-only scans, which is
//! exactly the signal the strategy selector uses to escalate to OCR.

use crate::ExtractError;
use folio_domain::traits::TextExtractor;
use folio_domain::RawSource;
use tracing::debug;

/// Primary extractor backed by `pdf-extract`
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new primary extractor
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    type Error = ExtractError;

    fn name(&self) -> &str {
        "pdf-text"
    }

    async fn extract(&self, source: &RawSource) -> Result<String, Self::Error> {
        let bytes = source.shared();

        // CPU bound, and panics on some malformed files: a panic surfaces
        // here as a join error.
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
        })
        .await
        .map_err(|e| ExtractError::Pdf(format!("Text layer extraction aborted: {}", e)))??;

        debug!("Embedded text layer yielded {} chars", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_non_pdf_bytes() {
        let extractor = PdfTextExtractor::new();
        let result = extractor
            .extract(&RawSource::from(b"This is not a PDF".to_vec()))
            .await;
        assert!(matches!(result, Err(ExtractError::Pdf(_))));
    }

    #[test]
    fn test_name() {
        assert_eq!(PdfTextExtractor.name(), "pdf-text");
    }
}
