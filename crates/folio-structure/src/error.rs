//! Error types for structure recovery

use thiserror::Error;

/// Errors that can occur while recovering a document's structure
#[derive(Error, Debug)]
pub enum StructureError {
    /// Neither extraction strategy produced any text
    #[error("No extractable text in document: {reason}")]
    EmptyInput {
        /// What each strategy reported
        reason: String,
    },

    /// Text was extracted but none of it is body text
    #[error("No paragraphs found in {lines} lines of extracted text")]
    NoParagraphs {
        /// Number of lines examined
        lines: usize,
    },

    /// Secondary extraction provider failure
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for StructureError {
    fn from(e: toml::de::Error) -> Self {
        StructureError::Config(format!("Failed to parse TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_readable() {
        let err = StructureError::NoParagraphs { lines: 12 };
        assert_eq!(err.to_string(), "No paragraphs found in 12 lines of extracted text");

        let err = StructureError::EmptyInput {
            reason: "primary returned 0 chars".to_string(),
        };
        assert!(err.to_string().contains("primary returned 0 chars"));
    }
}
