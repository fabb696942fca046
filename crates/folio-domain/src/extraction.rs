//! Extraction module - raw input bytes and the text recovered from them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The bytes of one source document
///
/// Supplied by an upload handler or downloader that has already validated
/// the content type and size. Cloning is cheap: the buffer is shared, never
/// copied, so it can be handed to blocking extraction tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSource {
    bytes: Arc<[u8]>,
}

impl RawSource {
    /// Wrap a byte buffer
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Borrow the document bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the document bytes
    pub fn shared(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Size of the document in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer holds no bytes at all
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for RawSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for RawSource {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

/// Which extraction strategy produced a document's text
///
/// The method also selects the chapter detection mode: primary text is
/// treated as clean machine text, secondary text as noisy OCR output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMethod {
    /// Fast structural extraction of the embedded text layer
    Primary,

    /// OCR or vision-assisted extraction used when the primary output was thin
    SecondaryFallback,
}

impl ExtractionMethod {
    /// Get the method tag as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::Primary => "primary",
            ExtractionMethod::SecondaryFallback => "secondary-fallback",
        }
    }

    /// Parse a method tag
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "primary" => Some(ExtractionMethod::Primary),
            "secondary-fallback" | "secondary" => Some(ExtractionMethod::SecondaryFallback),
            _ => None,
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExtractionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid extraction method: {}", s))
    }
}

/// Plain text recovered from a [`RawSource`], tagged with its method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted plain text
    pub text: String,

    /// Strategy that produced `text`
    pub method: ExtractionMethod,
}

impl ExtractionResult {
    /// Create a result produced by the primary extractor
    pub fn primary(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            method: ExtractionMethod::Primary,
        }
    }

    /// Create a result produced by the secondary (OCR) extractor
    pub fn secondary(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            method: ExtractionMethod::SecondaryFallback,
        }
    }

    /// Number of characters in the trimmed text
    ///
    /// This is the length compared against the fallback threshold.
    pub fn char_len(&self) -> usize {
        self.text.trim().chars().count()
    }
}

/// Secondary extraction provider selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Remote document text detection API
    #[default]
    VisionApi,

    /// Locally installed rasterizer and OCR engine
    LocalOcr,
}

impl ProviderKind {
    /// Get the provider name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::VisionApi => "vision-api",
            ProviderKind::LocalOcr => "local-ocr",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vision-api" | "vision" => Ok(ProviderKind::VisionApi),
            "local-ocr" | "tesseract" => Ok(ProviderKind::LocalOcr),
            _ => Err(format!("Unsupported provider: {}", s)),
        }
    }
}
