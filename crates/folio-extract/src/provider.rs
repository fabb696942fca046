//! Secondary provider selection
//!
//! The provider is chosen once, from configuration, and then used through
//! the same `TextExtractor` capability as any other backend.

use crate::{ExtractError, LocalOcrProvider, VisionApiProvider};
use folio_domain::traits::TextExtractor;
use folio_domain::{ProviderKind, RawSource};

/// One of the secondary (OCR) backends
pub enum SecondaryProvider {
    /// Remote vision API
    VisionApi(VisionApiProvider),

    /// Local pdftoppm + tesseract
    LocalOcr(LocalOcrProvider),
}

impl SecondaryProvider {
    /// Build the provider named by configuration
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_domain::ProviderKind;
    /// use folio_extract::SecondaryProvider;
    ///
    /// let provider = SecondaryProvider::from_kind(ProviderKind::LocalOcr, None);
    /// assert_eq!(provider.kind(), ProviderKind::LocalOcr);
    /// ```
    pub fn from_kind(kind: ProviderKind, api_key: Option<String>) -> Self {
        match kind {
            ProviderKind::VisionApi => SecondaryProvider::VisionApi(VisionApiProvider::new(api_key)),
            ProviderKind::LocalOcr => SecondaryProvider::LocalOcr(LocalOcrProvider::new()),
        }
    }

    /// Which backend this is
    pub fn kind(&self) -> ProviderKind {
        match self {
            SecondaryProvider::VisionApi(_) => ProviderKind::VisionApi,
            SecondaryProvider::LocalOcr(_) => ProviderKind::LocalOcr,
        }
    }
}

impl TextExtractor for SecondaryProvider {
    type Error = ExtractError;

    fn name(&self) -> &str {
        self.kind().as_str()
    }

    async fn extract(&self, source: &RawSource) -> Result<String, Self::Error> {
        match self {
            SecondaryProvider::VisionApi(provider) => provider.extract(source).await,
            SecondaryProvider::LocalOcr(provider) => provider.extract(source).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kind() {
        let vision = SecondaryProvider::from_kind(ProviderKind::VisionApi, Some("k".to_string()));
        assert_eq!(vision.kind(), ProviderKind::VisionApi);
        assert_eq!(vision.name(), "vision-api");

        let local = SecondaryProvider::from_kind(ProviderKind::LocalOcr, None);
        assert_eq!(local.name(), "local-ocr");
    }

    #[tokio::test]
    async fn test_vision_without_key_fails() {
        let provider = SecondaryProvider::from_kind(ProviderKind::VisionApi, None);
        let result = provider.extract(&RawSource::from(vec![1u8])).await;
        assert!(matches!(result, Err(ExtractError::MissingCredentials(_))));
    }
}
