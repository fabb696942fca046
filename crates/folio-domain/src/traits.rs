//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the structure pipeline and the
//! extraction infrastructure. Implementations live in `folio-extract`.

use crate::extraction::RawSource;
use std::fmt::Display;
use std::future::Future;

/// Trait for turning a document's bytes into plain text
///
/// Implemented once per backend: the embedded text layer (primary), a remote
/// vision API and a local OCR engine (secondary).
pub trait TextExtractor {
    /// Error type for extraction operations
    type Error: Display;

    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Extract the plain text of a document
    fn extract(
        &self,
        source: &RawSource,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
