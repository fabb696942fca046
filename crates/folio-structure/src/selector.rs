//! Choosing between primary and secondary extraction

use crate::config::FallbackConfig;
use crate::error::StructureError;
use folio_domain::traits::TextExtractor;
use folio_domain::{ExtractionResult, RawSource};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Runs the primary extractor and escalates to a secondary one when the
/// primary text is too short
///
/// The secondary is only invoked after the primary has finished and fallen
/// under the threshold; the two never run concurrently.
pub struct ExtractionStrategySelector<P, S>
where
    P: TextExtractor,
    S: TextExtractor,
{
    primary: P,
    secondary: Option<S>,
    fallback: FallbackConfig,
}

impl<P, S> ExtractionStrategySelector<P, S>
where
    P: TextExtractor + Sync,
    S: TextExtractor + Sync,
{
    /// Create a selector
    pub fn new(primary: P, secondary: Option<S>, fallback: FallbackConfig) -> Self {
        Self {
            primary,
            secondary,
            fallback,
        }
    }

    /// Fallback settings in use
    pub fn fallback(&self) -> &FallbackConfig {
        &self.fallback
    }

    /// Extract text, tagged with the strategy that produced it
    ///
    /// A primary text of at least `threshold_chars` characters is returned
    /// as is. Below that, the secondary runs (if enabled and present) and
    /// the longer text wins, ties going to the primary. A failed or timed
    /// out secondary falls back to the primary text; if that is empty too,
    /// the document has no extractable text.
    pub async fn select(&self, source: &RawSource) -> Result<ExtractionResult, StructureError> {
        let primary = match self.primary.extract(source).await {
            Ok(text) => ExtractionResult::primary(text),
            Err(e) => {
                warn!("Primary extractor '{}' failed: {}", self.primary.name(), e);
                ExtractionResult::primary(String::new())
            }
        };
        let primary_len = primary.char_len();

        if primary_len >= self.fallback.threshold_chars {
            debug!(
                "Primary text accepted ({} chars, threshold {})",
                primary_len, self.fallback.threshold_chars
            );
            return Ok(primary);
        }

        let secondary = match (&self.secondary, self.fallback.enabled) {
            (Some(secondary), true) => secondary,
            _ => {
                debug!("Primary text short ({} chars), fallback unavailable", primary_len);
                return non_empty(primary, "primary extraction produced no text");
            }
        };

        info!(
            "Primary text too short ({} < {} chars), trying {}",
            primary_len,
            self.fallback.threshold_chars,
            secondary.name()
        );

        let failure = match timeout(self.fallback.timeout(), secondary.extract(source)).await {
            Ok(Ok(text)) => {
                let candidate = ExtractionResult::secondary(text);
                let chosen = if candidate.char_len() > primary_len {
                    candidate
                } else {
                    primary
                };
                info!(
                    "Using {} extraction ({} chars)",
                    chosen.method,
                    chosen.char_len()
                );
                return non_empty(chosen, "neither extraction produced text");
            }
            Ok(Err(e)) => StructureError::Provider(format!("{} failed: {}", secondary.name(), e)),
            Err(_) => StructureError::Provider(format!(
                "{} timed out after {}s",
                secondary.name(),
                self.fallback.timeout_secs
            )),
        };

        warn!("{}", failure);
        non_empty(
            primary,
            &format!("primary extraction produced no text; {}", failure),
        )
    }
}

fn non_empty(result: ExtractionResult, reason: &str) -> Result<ExtractionResult, StructureError> {
    if result.char_len() == 0 {
        return Err(StructureError::EmptyInput {
            reason: reason.to_string(),
        });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_domain::ExtractionMethod;
    use folio_extract::{ExtractError, MockExtractor};
    use std::time::Duration;

    fn source() -> RawSource {
        RawSource::from(b"%PDF-1.4 test".to_vec())
    }

    fn fallback(threshold_chars: usize) -> FallbackConfig {
        FallbackConfig {
            threshold_chars,
            timeout_secs: 1,
            ..FallbackConfig::default()
        }
    }

    /// Never answers within any reasonable timeout
    struct StalledExtractor;

    impl TextExtractor for StalledExtractor {
        type Error = ExtractError;

        fn name(&self) -> &str {
            "stalled"
        }

        async fn extract(&self, _source: &RawSource) -> Result<String, Self::Error> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok("late".to_string())
        }
    }

    #[tokio::test]
    async fn test_threshold_met_skips_secondary() {
        let secondary = MockExtractor::new("x".repeat(500));
        let selector = ExtractionStrategySelector::new(
            MockExtractor::new("a".repeat(100)),
            Some(secondary.clone()),
            fallback(100),
        );

        let result = selector.select(&source()).await.unwrap();
        assert_eq!(result.method, ExtractionMethod::Primary);
        assert_eq!(secondary.call_count(), 0);
    }

    #[tokio::test]
    async fn test_one_below_threshold_invokes_secondary() {
        let secondary = MockExtractor::new("x".repeat(500));
        let selector = ExtractionStrategySelector::new(
            MockExtractor::new("a".repeat(99)),
            Some(secondary.clone()),
            fallback(100),
        );

        let result = selector.select(&source()).await.unwrap();
        assert_eq!(result.method, ExtractionMethod::SecondaryFallback);
        assert_eq!(result.char_len(), 500);
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn test_threshold_counts_trimmed_chars() {
        let secondary = MockExtractor::new("x".repeat(500));
        let padded = format!("   {}   \n\n", "é".repeat(99));
        let selector =
            ExtractionStrategySelector::new(MockExtractor::new(padded), Some(secondary.clone()), fallback(100));

        selector.select(&source()).await.unwrap();
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn test_longer_text_wins_ties_to_primary() {
        let selector = ExtractionStrategySelector::new(
            MockExtractor::new("short primary"),
            Some(MockExtractor::new("short seconds")),
            fallback(100),
        );
        let result = selector.select(&source()).await.unwrap();
        assert_eq!(result.method, ExtractionMethod::Primary);
        assert_eq!(result.text, "short primary");

        let selector = ExtractionStrategySelector::new(
            MockExtractor::new("a much longer primary text"),
            Some(MockExtractor::new("tiny")),
            fallback(100),
        );
        let result = selector.select(&source()).await.unwrap();
        assert_eq!(result.method, ExtractionMethod::Primary);
    }

    #[tokio::test]
    async fn test_secondary_failure_keeps_short_primary() {
        let selector = ExtractionStrategySelector::new(
            MockExtractor::new("a few words"),
            Some(MockExtractor::failing("no credentials")),
            fallback(100),
        );
        let result = selector.select(&source()).await.unwrap();
        assert_eq!(result.text, "a few words");
        assert_eq!(result.method, ExtractionMethod::Primary);
    }

    #[tokio::test]
    async fn test_secondary_failure_with_empty_primary_is_empty_input() {
        let selector = ExtractionStrategySelector::new(
            MockExtractor::new("   "),
            Some(MockExtractor::failing("no credentials")),
            fallback(100),
        );
        let err = selector.select(&source()).await.unwrap_err();
        match err {
            StructureError::EmptyInput { reason } => assert!(reason.contains("no credentials")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_primary_failure_is_treated_as_empty() {
        let selector = ExtractionStrategySelector::new(
            MockExtractor::failing("not a pdf"),
            Some(MockExtractor::new("recognized text")),
            fallback(100),
        );
        let result = selector.select(&source()).await.unwrap();
        assert_eq!(result.method, ExtractionMethod::SecondaryFallback);
        assert_eq!(result.text, "recognized text");
    }

    #[tokio::test]
    async fn test_disabled_fallback_never_calls_secondary() {
        let secondary = MockExtractor::new("x".repeat(500));
        let config = FallbackConfig {
            enabled: false,
            ..fallback(100)
        };
        let selector =
            ExtractionStrategySelector::new(MockExtractor::new("short"), Some(secondary.clone()), config);

        let result = selector.select(&source()).await.unwrap();
        assert_eq!(result.text, "short");
        assert_eq!(secondary.call_count(), 0);
    }

    #[tokio::test]
    async fn test_no_secondary_and_no_text() {
        let selector: ExtractionStrategySelector<MockExtractor, MockExtractor> =
            ExtractionStrategySelector::new(MockExtractor::new(""), None, fallback(100));
        assert!(matches!(
            selector.select(&source()).await,
            Err(StructureError::EmptyInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_secondary_timeout_counts_as_failure() {
        let selector = ExtractionStrategySelector::new(
            MockExtractor::new("short but present"),
            Some(StalledExtractor),
            fallback(100),
        );
        let result = selector.select(&source()).await.unwrap();
        assert_eq!(result.text, "short but present");
        assert_eq!(result.method, ExtractionMethod::Primary);
    }
}
