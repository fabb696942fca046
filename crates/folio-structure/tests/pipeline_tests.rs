//! Integration tests for the public structure API

use folio_domain::{ExtractionResult, Line, LineClass};
use folio_structure::{
    split_paragraphs, ChapterDetector, DetectionMode, LineClassifier, StructureConfig,
    StructureError, StructureExtractor,
};
use folio_extract::MockExtractor;
use proptest::prelude::*;

fn extractor() -> StructureExtractor<MockExtractor, MockExtractor> {
    StructureExtractor::new(MockExtractor::default(), None, StructureConfig::default())
}

#[test]
fn test_presets_change_detection_floor() {
    let strict = ChapterDetector::new(&StructureConfig::strict(), DetectionMode::Structural);
    let lenient = ChapterDetector::new(&StructureConfig::lenient(), DetectionMode::OcrLenient);
    assert!(strict.floor() > lenient.floor());
}

#[test]
fn test_structure_text_with_known_method() {
    let text = "CHAPTER ONE\n\nThe harbour was quiet.\n\nCHAPTER TWO\n\nThe boats came home.";
    let book = extractor()
        .structure_text(ExtractionResult::primary(text))
        .unwrap();

    assert_eq!(book.chapters().len(), 2);
    assert_eq!(book.chapters()[0].title, "Chapter 1");
    assert_eq!(book.chapters()[1].content, "The boats came home.");
}

#[test]
fn test_config_round_trip_drives_pipeline() {
    let toml = StructureConfig::lenient().to_toml().unwrap();
    let config = StructureConfig::from_toml(&toml).unwrap();
    let paragraphs = split_paragraphs("A line of text that ends here.", &config).unwrap();
    assert_eq!(paragraphs.len(), 1);
}

#[test]
fn test_headers_only_document() {
    let result = extractor().structure_text(ExtractionResult::primary("PREFACE\n\n12\n\nINDEX"));
    assert!(matches!(result, Err(StructureError::NoParagraphs { .. })));
}

proptest! {
    #[test]
    fn bare_page_numbers_are_classified(n in 0u32..10_000) {
        let classifier = LineClassifier::new(&StructureConfig::default());
        let line = Line::new(n.to_string(), 0);
        prop_assert_eq!(classifier.classify(&line), LineClass::PageNumber);
    }

    #[test]
    fn dash_wrapped_page_numbers_are_classified(n in 0u32..10_000, dash in "[-–—]", pad in " {0,2}") {
        let classifier = LineClassifier::new(&StructureConfig::default());
        let line = Line::new(format!("{dash}{pad}{n}{pad}{dash}"), 0);
        prop_assert_eq!(classifier.classify(&line), LineClass::PageNumber);
    }

    #[test]
    fn paragraphs_are_always_normalized(text in "[a-zA-Z0-9 .,!?\\-\n\t]{1,400}") {
        match split_paragraphs(&text, &StructureConfig::default()) {
            Ok(paragraphs) => {
                prop_assert!(!paragraphs.is_empty());
                for paragraph in &paragraphs {
                    prop_assert!(paragraph.is_normalized(), "{:?}", paragraph.content);
                    prop_assert!(paragraph.start_line_index <= paragraph.end_line_index);
                }
            }
            Err(StructureError::NoParagraphs { .. }) | Err(StructureError::EmptyInput { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn chapters_resplit_into_substantial_paragraphs(text in "[a-zA-Z .\n]{1,600}") {
        let config = StructureConfig::default();
        if let Ok(book) = extractor().structure_text(ExtractionResult::primary(text)) {
            prop_assert_eq!(book.has_chapters(), book.chapters().len() > 1);
            for chapter in book.chapters() {
                prop_assert!(chapter.start_index <= chapter.end_index);
                for paragraph in chapter.paragraphs() {
                    prop_assert!(paragraph.chars().count() >= config.min_paragraph_chars);
                }
            }
        }
    }
}
