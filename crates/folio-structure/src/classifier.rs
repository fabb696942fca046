//! Line classification
//!
//! Every line gets exactly one [`LineClass`]. Rules are checked in a fixed
//! order and the first match wins, so the order below is part of the
//! behaviour:
//!
//! 1. blank
//! 2. boilerplate (copyright, ISBN, contents, URLs) → header
//! 3. page numbers and page ranges
//! 4. very short roman numerals or rules → header
//! 5. short lines: content cues win, otherwise numbers and capitals are headers
//! 6. mostly uppercase → header
//! 7. centred → header
//! 8. footnotes
//! 9. chapter keywords and special sections → header
//! 10. everything else is body text

use crate::config::StructureConfig;
use crate::normalize::is_sentence_terminal;
use folio_domain::{Line, LineClass};
use regex::Regex;
use std::sync::LazyLock;

/// Spelled-out numbers accepted after a chapter keyword
pub(crate) const NUMBER_WORDS: &str = "one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety|hundred";

const FUNCTION_WORDS: &[&str] = &[
    "the", "an", "and", "or", "but", "of", "to", "in", "on", "at", "is", "was", "it", "he", "she",
    "we", "they", "you", "for", "with", "not", "as", "by", "his", "her",
];

static EXCLUSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:copyright\b|©|\(c\)\s)",
        r"|all rights reserved",
        r"|\bisbn\b",
        r"|^published by\b",
        r"|^printed in\b",
        r"|^first published\b",
        r"|^library of congress",
        r"|^(?:table of )?contents$",
        r"|^(?:https?://|www\.)\S+$",
    ))
    .unwrap()
});

static PAGE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:\d{1,4}",
        r"|(?:page|pg\.?|p\.)\s*\d{1,4}(?:\s+of\s+\d{1,4})?",
        r"|\[\d{1,4}\]",
        r"|\(\d{1,4}\)",
        r"|[-–—]\s*\d{1,4}\s*[-–—]",
        r"|\d{1,4}\s*[-–/]\s*\d{1,4})$",
    ))
    .unwrap()
});

static ROMAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^[ivxlcdm]+\.?$").unwrap());

static NUMBER_OR_RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\d\-–—|.]+$").unwrap());

static FOOTNOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:[*†‡§]+\s*\S",
        r"|[¹²³⁴⁵⁶⁷⁸⁹⁰]+\s*\S",
        r"|\[\d{1,3}\]\s+\S",
        r"|(?i:ibid\.?|op\.\s*cit\.?)(?:[\s,]|$))",
    ))
    .unwrap()
});

/// `chapter|part|section|book` + number, with an optional trailing title
static KEYWORD_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:chapter|part|section|book)\s+(?P<number>{number})\b(?:(?P<sep>[\s.:\-–—]+)(?P<title>\S.*?))?\s*$",
        number = heading_number_pattern()
    ))
    .unwrap()
});

/// Digits, an uppercase roman numeral or a spelled-out number
///
/// Roman numerals are case-sensitive so words like "did" or "mix" are not
/// read as numbers.
pub(crate) fn heading_number_pattern() -> String {
    format!(
        r"(?:\d{{1,3}}|(?-i:[IVXLCDM]+)|(?:{words})(?:[-\s](?:one|two|three|four|five|six|seven|eight|nine))?)",
        words = NUMBER_WORDS
    )
}

/// A chapter-keyword heading split into its number and optional title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct KeywordHeading<'a> {
    pub number: &'a str,
    pub title: Option<&'a str>,
}

/// Match `text` against a keyword-heading pattern with `number`, `sep` and
/// `title` groups
///
/// A title separated from the number by whitespace alone must not start
/// lowercase: "Book I read twice" is prose.
pub(crate) fn keyword_parts<'a>(pattern: &Regex, text: &'a str) -> Option<KeywordHeading<'a>> {
    let caps = pattern.captures(text.trim())?;
    let number = caps.name("number")?.as_str();
    let title = caps.name("title").map(|title| title.as_str());

    if let (Some(sep), Some(title)) = (caps.name("sep"), title) {
        if sep.as_str().trim().is_empty() && title.starts_with(char::is_lowercase) {
            return None;
        }
    }
    Some(KeywordHeading { number, title })
}

/// Parse `text` as a `chapter|part|section|book` heading
pub(crate) fn keyword_heading(text: &str) -> Option<KeywordHeading<'_>> {
    keyword_parts(&KEYWORD_HEADING, text)
}

/// Standalone name of a front or back matter section
pub(crate) static SPECIAL_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(prologue|epilogue|introduction|conclusion|preface|foreword|afterword",
        r"|acknowledge?ments|bibliography|index|appendix(?:\s+[a-z0-9]{1,3})?)[.:]?$",
    ))
    .unwrap()
});

/// Whether text is a page number or page range
pub(crate) fn is_page_number(text: &str) -> bool {
    PAGE_NUMBER.is_match(text.trim())
}

/// Whether text is front-matter boilerplate
pub(crate) fn is_boilerplate(text: &str) -> bool {
    EXCLUSION.is_match(text.trim())
}

/// Whether text is a keyword heading or a special section name
pub(crate) fn is_heading_keyword(text: &str) -> bool {
    let text = text.trim();
    keyword_heading(text).is_some() || SPECIAL_SECTION.is_match(text)
}

/// Share of uppercase among the letters of `text`, if it has any letters
pub(crate) fn uppercase_ratio(text: &str) -> Option<f64> {
    let (letters, upper) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(letters, upper), c| {
            (letters + 1, upper + usize::from(c.is_uppercase()))
        });
    (letters > 0).then(|| upper as f64 / letters as f64)
}

/// Whether text has letters and none of them is lowercase
pub(crate) fn is_all_caps(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic()) && !text.chars().any(|c| c.is_lowercase())
}

fn alphabetic_runs(text: &str) -> usize {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|run| !run.is_empty())
        .count()
}

fn has_content_cue(text: &str) -> bool {
    let quoted = text.starts_with(['"', '\'', '\u{201C}', '\u{2018}']);
    let starts_lower = text.chars().next().is_some_and(|c| c.is_lowercase());
    let function_word = text
        .split(|c: char| !c.is_alphabetic())
        .any(|word| FUNCTION_WORDS.contains(&word.to_lowercase().as_str()));

    quoted
        || is_sentence_terminal(text)
        || starts_lower
        || function_word
        || alphabetic_runs(text) >= 2
}

/// Rule-based line classifier
///
/// # Examples
///
/// ```
/// use folio_domain::{Line, LineClass};
/// use folio_structure::{LineClassifier, StructureConfig};
///
/// let classifier = LineClassifier::new(&StructureConfig::default());
/// assert_eq!(classifier.classify(&Line::new("Page 12 of 300", 0)), LineClass::PageNumber);
/// assert_eq!(classifier.classify(&Line::new("CHAPTER ONE", 1)), LineClass::Header);
/// ```
#[derive(Debug, Clone)]
pub struct LineClassifier {
    page_width: usize,
    uppercase_ratio_threshold: f64,
    max_header_length: usize,
    centering_threshold: f64,
}

impl LineClassifier {
    /// Create a classifier from configuration
    pub fn new(config: &StructureConfig) -> Self {
        Self {
            page_width: config.page_width.max(1),
            uppercase_ratio_threshold: config.uppercase_ratio_threshold,
            max_header_length: config.max_header_length,
            centering_threshold: config.centering_threshold,
        }
    }

    /// Use a specific page width for centring detection
    pub fn with_page_width(mut self, page_width: usize) -> Self {
        self.page_width = page_width.max(1);
        self
    }

    /// Page width in use
    pub fn page_width(&self) -> usize {
        self.page_width
    }

    /// Estimate the page width of a document
    ///
    /// With at least 20 non-blank lines, the 95th percentile of raw line
    /// lengths; never narrower than the configured width.
    pub fn page_width_for(&self, lines: &[Line]) -> usize {
        let mut lengths: Vec<usize> = lines
            .iter()
            .filter(|line| !line.is_blank())
            .map(|line| line.raw.chars().count())
            .collect();

        if lengths.len() < 20 {
            return self.page_width;
        }

        lengths.sort_unstable();
        let rank = ((lengths.len() - 1) as f64 * 0.95).round() as usize;
        lengths[rank].max(self.page_width)
    }

    /// Classify a single line
    pub fn classify(&self, line: &Line) -> LineClass {
        let text = line.trimmed.as_str();
        let len = line.len();

        if line.is_blank() {
            return LineClass::Blank;
        }
        if is_boilerplate(text) {
            return LineClass::Header;
        }
        if is_page_number(text) {
            return LineClass::PageNumber;
        }
        if len < 3 && (ROMAN.is_match(text) || NUMBER_OR_RULE.is_match(text)) {
            return LineClass::Header;
        }
        if len < 10 {
            return self.classify_short(text);
        }

        let short_enough = len < self.max_header_length;
        if short_enough
            && uppercase_ratio(text).is_some_and(|ratio| ratio > self.uppercase_ratio_threshold)
        {
            return LineClass::Header;
        }

        let indent = line.leading_whitespace() as f64 / self.page_width as f64;
        if short_enough && indent > self.centering_threshold {
            return LineClass::Header;
        }

        if FOOTNOTE.is_match(text) {
            return LineClass::Footnote;
        }
        if short_enough && is_heading_keyword(text) {
            return LineClass::Header;
        }

        LineClass::Paragraph
    }

    fn classify_short(&self, text: &str) -> LineClass {
        // "Chapter 1" and "Preface" carry no content cue but are headings
        if is_heading_keyword(text) {
            return LineClass::Header;
        }
        if has_content_cue(text) {
            return LineClass::Paragraph;
        }
        if ROMAN.is_match(text) || NUMBER_OR_RULE.is_match(text) || is_all_caps(text) {
            return LineClass::Header;
        }
        LineClass::Paragraph
    }

    /// Classify every line of a document, in order
    pub fn classify_all(&self, lines: &[Line]) -> Vec<LineClass> {
        lines.iter().map(|line| self.classify(line)).collect()
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(&StructureConfig::default())
    }
}
