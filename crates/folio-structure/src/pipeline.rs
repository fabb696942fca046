//! The structure pipeline
//!
//! ```text
//! bytes → selector → normalize → classify → assemble → stitch → chapters → sniff
//! ```
//!
//! Only extraction is asynchronous; every later stage is a pure function of
//! the extracted text and the configuration.

use crate::assembler::ParagraphAssembler;
use crate::chapters::{ChapterDetector, DetectionMode};
use crate::classifier::LineClassifier;
use crate::config::StructureConfig;
use crate::error::StructureError;
use crate::selector::ExtractionStrategySelector;
use crate::sniffer::TitleAuthorSniffer;
use crate::stitcher::PageBreakStitcher;
use folio_domain::traits::TextExtractor;
use folio_domain::{BookStructure, ExtractionResult, Line, LineClass, Paragraph, RawSource};
use folio_extract::{PdfTextExtractor, SecondaryProvider};
use tracing::{debug, info};

/// Recovers the structure of a document
///
/// # Examples
///
/// ```
/// use folio_domain::ExtractionResult;
/// use folio_structure::{StructureConfig, StructureExtractor};
///
/// let extractor = StructureExtractor::from_config(StructureConfig::default()).unwrap();
/// let text = "1\n\nCHAPTER ONE\n\nIt was a dark night.\nThe wind howled through the trees.\n\n\
///             2\n\nCHAPTER TWO\n\nShe walked alone.";
///
/// let book = extractor.structure_text(ExtractionResult::primary(text)).unwrap();
/// assert!(book.has_chapters());
/// assert_eq!(book.chapters()[1].content, "She walked alone.");
/// ```
pub struct StructureExtractor<P = PdfTextExtractor, S = SecondaryProvider>
where
    P: TextExtractor,
    S: TextExtractor,
{
    selector: ExtractionStrategySelector<P, S>,
    config: StructureConfig,
}

impl StructureExtractor<PdfTextExtractor, SecondaryProvider> {
    /// Create an extractor with the embedded text layer as primary and the
    /// configured OCR provider as secondary
    pub fn from_config(config: StructureConfig) -> Result<Self, StructureError> {
        config.validate()?;
        let secondary = config.fallback.enabled.then(|| {
            SecondaryProvider::from_kind(config.fallback.provider, config.fallback.api_key.clone())
        });
        Ok(Self::new(PdfTextExtractor::new(), secondary, config))
    }
}

impl<P, S> StructureExtractor<P, S>
where
    P: TextExtractor + Sync,
    S: TextExtractor + Sync,
{
    /// Create an extractor from explicit backends
    pub fn new(primary: P, secondary: Option<S>, config: StructureConfig) -> Self {
        Self {
            selector: ExtractionStrategySelector::new(primary, secondary, config.fallback.clone()),
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &StructureConfig {
        &self.config
    }

    /// Extract and structure a document
    pub async fn extract(&self, source: &RawSource) -> Result<BookStructure, StructureError> {
        info!("Structuring document ({} bytes)", source.len());
        let extraction = self.selector.select(source).await?;
        self.structure_text(extraction)
    }

    /// Structure already extracted text
    ///
    /// The extraction method picks the chapter detection mode: OCR text is
    /// respaced and detected leniently.
    pub fn structure_text(
        &self,
        extraction: ExtractionResult,
    ) -> Result<BookStructure, StructureError> {
        structure(&self.config, extraction)
    }
}

fn structure(
    config: &StructureConfig,
    extraction: ExtractionResult,
) -> Result<BookStructure, StructureError> {
    if extraction.char_len() == 0 {
        return Err(StructureError::EmptyInput {
            reason: format!("{} extraction returned no text", extraction.method),
        });
    }

    let detector = ChapterDetector::new(config, DetectionMode::from(extraction.method));
    let lines = Line::split(&detector.prepare_text(&extraction.text));
    let classes = classify(config, &lines);

    let paragraphs = paragraphs_of(config, &detector, &lines, &classes)?;
    let (title, author) = TitleAuthorSniffer::new(config).sniff(&lines);
    let chapters = detector.detect(&lines, &classes, &paragraphs, title.as_deref());

    info!(
        "Structured {} lines into {} paragraphs and {} chapters ({} extraction)",
        lines.len(),
        paragraphs.len(),
        chapters.len(),
        extraction.method
    );

    Ok(BookStructure::new(title, author, chapters, extraction.method))
}

fn classify(config: &StructureConfig, lines: &[Line]) -> Vec<LineClass> {
    let classifier = LineClassifier::new(config);
    let page_width = classifier.page_width_for(lines);
    classifier.with_page_width(page_width).classify_all(lines)
}

/// Assemble, stitch and filter paragraphs
fn paragraphs_of(
    config: &StructureConfig,
    detector: &ChapterDetector,
    lines: &[Line],
    classes: &[LineClass],
) -> Result<Vec<Paragraph>, StructureError> {
    let assembled = ParagraphAssembler::new(config).assemble(lines, classes);
    if assembled.is_empty() {
        return Err(StructureError::NoParagraphs { lines: lines.len() });
    }

    let barriers = detector.barriers(lines, classes);
    let stitched = PageBreakStitcher::new(config).stitch_with_barriers(assembled, &barriers);

    let before = stitched.len();
    let paragraphs: Vec<Paragraph> = stitched
        .into_iter()
        .filter(|paragraph| paragraph.len() >= config.min_paragraph_chars)
        .collect();
    if paragraphs.len() < before {
        debug!(
            "Dropped {} paragraphs under {} chars",
            before - paragraphs.len(),
            config.min_paragraph_chars
        );
    }

    if paragraphs.is_empty() {
        return Err(StructureError::NoParagraphs { lines: lines.len() });
    }
    Ok(paragraphs)
}

/// Split already extracted text into paragraphs
///
/// Runs normalization, classification, assembly and stitching without
/// chapter or title detection. Text is treated as clean machine text.
///
/// # Examples
///
/// ```
/// use folio_structure::{split_paragraphs, StructureConfig};
///
/// let text = "Page 1\n\nThe rain kept falling on the roofs of\n\n2\n\nthe old town until dawn.";
/// let paragraphs = split_paragraphs(text, &StructureConfig::default()).unwrap();
/// assert_eq!(paragraphs.len(), 1);
/// assert_eq!(paragraphs[0].content, "The rain kept falling on the roofs of the old town until dawn.");
/// ```
pub fn split_paragraphs(
    text: &str,
    config: &StructureConfig,
) -> Result<Vec<Paragraph>, StructureError> {
    if text.trim().is_empty() {
        return Err(StructureError::EmptyInput {
            reason: "text is empty".to_string(),
        });
    }

    let detector = ChapterDetector::new(config, DetectionMode::Structural);
    let lines = Line::split(&detector.prepare_text(text));
    let classes = classify(config, &lines);
    paragraphs_of(config, &detector, &lines, &classes)
}
