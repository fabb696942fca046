//! Configuration for structure recovery
//!
//! Every threshold and word list the heuristics use lives here, so a
//! configuration value fully determines the output for a given text.

use crate::error::StructureError;
use folio_domain::ProviderKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// When a sentence-terminal line closes a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceBreakPolicy {
    /// Always close on `.`, `!` or `?`
    Always,
    /// Only blank lines close paragraphs
    Never,
    /// Close on sentence punctuation only when the document does not
    /// separate paragraphs with blank lines
    #[default]
    Auto,
}

/// Secondary extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Enable the secondary provider
    pub enabled: bool,

    /// Primary text shorter than this (in characters) triggers the fallback
    pub threshold_chars: usize,

    /// Secondary provider to use
    pub provider: ProviderKind,

    /// Credentials for the vision API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Maximum time for the secondary extraction (seconds)
    pub timeout_secs: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold_chars: 100,
            provider: ProviderKind::VisionApi,
            api_key: None,
            timeout_secs: 120,
        }
    }
}

impl FallbackConfig {
    /// Get the secondary extraction timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration for the structure pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// Assumed page width in columns, used for centring detection
    pub page_width: usize,

    /// Share of uppercase letters above which a short line is a heading
    pub uppercase_ratio_threshold: f64,

    /// Lines at least this long are never headings
    pub max_header_length: usize,

    /// Leading whitespace, as a share of the page width, that marks a centred heading
    pub centering_threshold: f64,

    /// When sentence punctuation closes a paragraph
    pub sentence_breaks: SentenceBreakPolicy,

    /// Blank separators per content line at or above which the document is
    /// treated as blank-line separated
    pub blank_separator_ratio: f64,

    /// Paragraphs shorter than this (in characters) are dropped
    pub min_paragraph_chars: usize,

    /// Words that, ending a paragraph, mark it as cut by a page break
    pub dangling_words: Vec<String>,

    /// Minimum chapter length for machine text
    pub structural_chapter_floor: usize,

    /// Minimum chapter length for OCR text
    pub ocr_chapter_floor: usize,

    /// A heading repeated this many times is a running head, not a chapter
    pub running_header_min_repeats: usize,

    /// Non-blank lines scanned for a title
    pub title_scan_lines: usize,

    /// Non-blank lines scanned for an author
    pub author_scan_lines: usize,

    /// Secondary extraction settings
    pub fallback: FallbackConfig,
}

const DEFAULT_DANGLING_WORDS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "the", "a", "an", "in", "on", "at", "to", "for",
    "with", "by", "from", "of", "up", "about", "into", "through", "over", "under", "between",
    "however", "therefore", "moreover", "furthermore", "thus", "hence", "that", "which", "who",
    "whose", "whom", "when", "where", "while", "because", "although", "though", "if", "as",
    "than", "then", "this", "these", "those", "his", "her", "its", "their", "our", "my", "your",
    "is", "was", "were", "are", "be", "been", "not",
];

impl Default for StructureConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            page_width: 80,
            uppercase_ratio_threshold: 0.7,
            max_header_length: 60,
            centering_threshold: 0.25,
            sentence_breaks: SentenceBreakPolicy::Auto,
            blank_separator_ratio: 0.05,
            min_paragraph_chars: 2,
            dangling_words: DEFAULT_DANGLING_WORDS.iter().map(|w| w.to_string()).collect(),
            structural_chapter_floor: 200,
            ocr_chapter_floor: 100,
            running_header_min_repeats: 3,
            title_scan_lines: 10,
            author_scan_lines: 20,
            fallback: FallbackConfig::default(),
        }
    }
}

impl StructureConfig {
    /// Strict preset: fewer headings, larger chapters
    pub fn strict() -> Self {
        Self {
            uppercase_ratio_threshold: 0.8,
            max_header_length: 50,
            structural_chapter_floor: 400,
            ocr_chapter_floor: 200,
            ..Self::default()
        }
    }

    /// Lenient preset: more headings, short chapters kept, earlier OCR fallback
    pub fn lenient() -> Self {
        Self {
            uppercase_ratio_threshold: 0.6,
            max_header_length: 80,
            structural_chapter_floor: 100,
            ocr_chapter_floor: 50,
            fallback: FallbackConfig {
                threshold_chars: 500,
                ..FallbackConfig::default()
            },
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), StructureError> {
        let fail = |msg: &str| Err(StructureError::Config(msg.to_string()));

        if self.page_width == 0 {
            return fail("page_width must be greater than 0");
        }
        if self.max_header_length == 0 {
            return fail("max_header_length must be greater than 0");
        }
        if !(self.uppercase_ratio_threshold > 0.0 && self.uppercase_ratio_threshold <= 1.0) {
            return fail("uppercase_ratio_threshold must be in (0.0, 1.0]");
        }
        if !(self.centering_threshold > 0.0 && self.centering_threshold < 1.0) {
            return fail("centering_threshold must be in (0.0, 1.0)");
        }
        if !(self.blank_separator_ratio >= 0.0 && self.blank_separator_ratio <= 1.0) {
            return fail("blank_separator_ratio must be in [0.0, 1.0]");
        }
        if self.running_header_min_repeats < 2 {
            return fail("running_header_min_repeats must be at least 2");
        }
        if self.title_scan_lines == 0 || self.author_scan_lines == 0 {
            return fail("title_scan_lines and author_scan_lines must be greater than 0");
        }
        if self.fallback.enabled && self.fallback.threshold_chars == 0 {
            return fail("fallback.threshold_chars must be greater than 0 when fallback is enabled");
        }
        if self.fallback.timeout_secs == 0 {
            return fail("fallback.timeout_secs must be greater than 0");
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, StructureError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, StructureError> {
        toml::to_string_pretty(self)
            .map_err(|e| StructureError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
