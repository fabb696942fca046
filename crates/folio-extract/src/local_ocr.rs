//! Local OCR provider
//!
//! Rasterizes each page with `pdftoppm` and recognizes it with `tesseract`.
//! Both tools must be on PATH (or configured with explicit paths).

use crate::ExtractError;
use folio_domain::traits::TextExtractor;
use folio_domain::RawSource;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Default rasterization resolution (dots per inch)
pub const DEFAULT_DPI: u32 = 300;

/// Default tesseract language
pub const DEFAULT_LANGUAGE: &str = "eng";

/// OCR provider driving locally installed tools
#[derive(Debug, Clone)]
pub struct LocalOcrProvider {
    pdftoppm_path: String,
    tesseract_path: String,
    language: String,
    dpi: u32,
}

impl Default for LocalOcrProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalOcrProvider {
    /// Create a provider using tools from PATH
    pub fn new() -> Self {
        Self {
            pdftoppm_path: "pdftoppm".to_string(),
            tesseract_path: "tesseract".to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            dpi: DEFAULT_DPI,
        }
    }

    /// Set the tesseract language pack (e.g. "eng", "deu+eng")
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the rasterization resolution
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi.max(72);
        self
    }

    /// Use explicit tool paths instead of PATH lookup
    pub fn with_tool_paths(
        mut self,
        pdftoppm_path: impl Into<String>,
        tesseract_path: impl Into<String>,
    ) -> Self {
        self.pdftoppm_path = pdftoppm_path.into();
        self.tesseract_path = tesseract_path.into();
        self
    }

    /// Rasterize and recognize every page of a PDF
    pub async fn recognize(&self, pdf_bytes: &[u8]) -> Result<String, ExtractError> {
        let temp_dir = tempfile::Builder::new().prefix("folio_ocr_").tempdir()?;
        let input_path = temp_dir.path().join("input.pdf");
        tokio::fs::write(&input_path, pdf_bytes).await?;

        info!("Rasterizing document at {} dpi", self.dpi);
        let output = Command::new(&self.pdftoppm_path)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(&input_path)
            .arg(temp_dir.path().join("page"))
            .output()
            .await
            .map_err(|e| tool_error(&self.pdftoppm_path, e))?;

        if !output.status.success() {
            return Err(ExtractError::ToolFailed(format!(
                "pdftoppm exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let pages = page_images(temp_dir.path()).await?;
        if pages.is_empty() {
            return Err(ExtractError::ToolFailed(
                "pdftoppm produced no page images".to_string(),
            ));
        }

        info!("OCR processing {} pages", pages.len());
        let mut pages_text = Vec::with_capacity(pages.len());

        for (page_number, image_path) in pages {
            let output = Command::new(&self.tesseract_path)
                .arg(&image_path)
                .arg("stdout")
                .arg("-l")
                .arg(&self.language)
                .output()
                .await
                .map_err(|e| tool_error(&self.tesseract_path, e))?;

            if !output.status.success() {
                warn!("tesseract failed for page {}", page_number);
                continue;
            }

            let text = String::from_utf8_lossy(&output.stdout).replace('\x0C', "");
            debug!("Page {} recognized: {} chars", page_number, text.len());
            pages_text.push(text);
        }

        Ok(pages_text.join("\x0C"))
    }
}

/// Page images written by pdftoppm (`page-1.png`, `page-02.png`, ...), in page order
async fn page_images(dir: &Path) -> Result<Vec<(usize, PathBuf)>, ExtractError> {
    let mut images = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("png") {
            continue;
        }
        if let Some(number) = page_number(&path) {
            images.push((number, path));
        }
    }

    images.sort_by_key(|(number, _)| *number);
    Ok(images)
}

fn page_number(path: &Path) -> Option<usize> {
    let stem = path.file_stem()?.to_str()?;
    let (_, digits) = stem.rsplit_once('-')?;
    digits.parse().ok()
}

fn tool_error(tool: &str, error: std::io::Error) -> ExtractError {
    if error.kind() == ErrorKind::NotFound {
        ExtractError::ToolUnavailable(format!("{} (is it installed?)", tool))
    } else {
        ExtractError::Io(error)
    }
}

impl TextExtractor for LocalOcrProvider {
    type Error = ExtractError;

    fn name(&self) -> &str {
        "local-ocr"
    }

    async fn extract(&self, source: &RawSource) -> Result<String, Self::Error> {
        self.recognize(source.as_bytes()).await
    }
}
