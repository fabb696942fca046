//! Vision API Provider Implementation
//!
//! Sends the document to a remote document-text-detection endpoint
//! (Cloud Vision `files:annotate`) and joins the per-page text.
//!
//! # Features
//!
//! - Async HTTP communication via `reqwest`
//! - Pages requested in batches of five, the synchronous API limit
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use folio_extract::VisionApiProvider;
//!
//! let provider = VisionApiProvider::new(Some("api-key".to_string()))
//!     .with_max_pages(50);
//! ```

use crate::ExtractError;
use base64::Engine;
use folio_domain::traits::TextExtractor;
use folio_domain::RawSource;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com";

/// Default timeout for a single API request (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default cap on pages sent for recognition
pub const DEFAULT_MAX_PAGES: usize = 100;

/// Pages per synchronous request
const PAGES_PER_REQUEST: usize = 5;

/// Remote vision API provider
pub struct VisionApiProvider {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
    max_retries: u32,
    max_pages: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateFileBatch {
    requests: Vec<AnnotateFileRequest>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateFileRequest {
    input_config: InputConfig,
    features: Vec<Feature>,
    pages: Vec<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InputConfig {
    content: String,
    mime_type: &'static str,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct AnnotateFileBatchResponse {
    #[serde(default)]
    responses: Vec<AnnotateFileResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateFileResponse {
    #[serde(default)]
    responses: Vec<PageResponse>,
    #[serde(default)]
    total_pages: Option<usize>,
    #[serde(default)]
    error: Option<ApiStatus>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse {
    #[serde(default)]
    full_text_annotation: Option<TextAnnotation>,
    #[serde(default)]
    error: Option<ApiStatus>,
}

#[derive(Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ApiStatus {
    #[serde(default)]
    message: String,
}

impl VisionApiProvider {
    /// Create a new provider against the default endpoint
    ///
    /// A missing key is not rejected here; extraction fails with
    /// [`ExtractError::MissingCredentials`] so the caller can fall back.
    pub fn new(api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Point the provider at another endpoint (proxies, emulators)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the maximum number of pages sent for recognition
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Whether an API key is configured
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Recognize the text of every page, up to the page cap
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - No API key is configured
    /// - Network communication fails after all retries
    /// - The API reports an error for the whole file
    pub async fn recognize(&self, pdf_bytes: &[u8]) -> Result<String, ExtractError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ExtractError::MissingCredentials("vision-api".to_string()))?;

        let content = base64::engine::general_purpose::STANDARD.encode(pdf_bytes);
        let mut pages_text = Vec::new();
        let mut total_pages = self.max_pages;
        let mut first_page = 1;

        while first_page <= total_pages.min(self.max_pages) {
            let last_page = (first_page + PAGES_PER_REQUEST - 1).min(total_pages.min(self.max_pages));
            let pages: Vec<usize> = (first_page..=last_page).collect();

            let batch = AnnotateFileBatch {
                requests: vec![AnnotateFileRequest {
                    input_config: InputConfig {
                        content: content.clone(),
                        mime_type: "application/pdf",
                    },
                    features: vec![Feature {
                        kind: "DOCUMENT_TEXT_DETECTION",
                    }],
                    pages,
                }],
            };

            let response = self.send(api_key, &batch).await?;
            let file = response.responses.into_iter().next().ok_or_else(|| {
                ExtractError::InvalidResponse("Empty response list".to_string())
            })?;

            if let Some(error) = file.error {
                return Err(ExtractError::InvalidResponse(error.message));
            }
            if let Some(reported) = file.total_pages {
                total_pages = reported;
            }

            for (offset, page) in file.responses.into_iter().enumerate() {
                if let Some(error) = page.error {
                    warn!("Vision API failed on page {}: {}", first_page + offset, error.message);
                    continue;
                }
                if let Some(annotation) = page.full_text_annotation {
                    pages_text.push(annotation.text);
                }
            }

            debug!("Recognized pages {}..={} of {}", first_page, last_page, total_pages);
            first_page = last_page + 1;
        }

        // Form feeds mark page boundaries, matching the other extractors
        Ok(pages_text.join("\x0C"))
    }

    async fn send(
        &self,
        api_key: &str,
        batch: &AnnotateFileBatch,
    ) -> Result<AnnotateFileBatchResponse, ExtractError> {
        let url = format!("{}/v1/files:annotate", self.endpoint);

        // Retry logic with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .query(&[("key", api_key)])
                .json(batch)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json::<AnnotateFileBatchResponse>().await.map_err(|e| {
                            ExtractError::InvalidResponse(format!("Failed to parse response: {}", e))
                        });
                    } else if status == reqwest::StatusCode::UNAUTHORIZED
                        || status == reqwest::StatusCode::FORBIDDEN
                    {
                        return Err(ExtractError::MissingCredentials(format!(
                            "vision-api rejected the key (HTTP {})",
                            status
                        )));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(ExtractError::RateLimited);
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(ExtractError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(ExtractError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| ExtractError::Communication("Max retries exceeded".to_string())))
    }
}

impl TextExtractor for VisionApiProvider {
    type Error = ExtractError;

    fn name(&self) -> &str {
        "vision-api"
    }

    async fn extract(&self, source: &RawSource) -> Result<String, Self::Error> {
        self.recognize(source.as_bytes()).await
    }
}
