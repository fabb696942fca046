//! Chapter boundary detection
//!
//! The detector walks the document as a sequence of units: the stitched
//! paragraphs interleaved, by source line, with the heading and page-number
//! lines the assembler left out. Units that look like headings open a new
//! section; everything else accumulates into the open one.
//!
//! Sections shorter than a substance floor are dropped. A document with no
//! usable heading becomes a single chapter.

use crate::classifier::{
    heading_number_pattern, is_all_caps, is_boilerplate, keyword_heading, keyword_parts,
    uppercase_ratio, KeywordHeading, NUMBER_WORDS, SPECIAL_SECTION,
};
use crate::config::StructureConfig;
use crate::normalize::{normalize_document, normalize_whitespace, respace_ocr};
use folio_domain::{Chapter, ExtractionMethod, Line, LineClass, Paragraph};
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;
use tracing::debug;

/// Title of the chapter holding content before the first heading
pub const FRONT_MATTER_TITLE: &str = "Front Matter";

/// Title of the single chapter of a document without headings
pub const FULL_TEXT_TITLE: &str = "Full Text";

static NUMBERED_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}[.):]?\s+(\p{Lu}.*)$").unwrap());

static ROMAN_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[IVXLCDM]{2,}[.):]?|[IVXLCDM][.):])\s+(\p{Lu}.*)$").unwrap()
});

static BARE_ROMAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[IVXLCDM]+\.?$").unwrap());

/// Keyword heading with OCR debris after the number, such as `Chapter 7,`
static LOOSE_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:chapter|part|section|book)\s+(?P<number>(?:{number})[.,:;)'’]?)(?:(?P<sep>[\s.:\-–—]+)(?P<title>\S.*))?$",
        number = heading_number_pattern()
    ))
    .unwrap()
});

/// How aggressively headings are recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMode {
    /// Clean machine text: explicit heading shapes only
    Structural,

    /// OCR text: respaced first, looser heading shapes, lower floor
    OcrLenient,
}

impl From<ExtractionMethod> for DetectionMode {
    fn from(method: ExtractionMethod) -> Self {
        match method {
            ExtractionMethod::Primary => DetectionMode::Structural,
            ExtractionMethod::SecondaryFallback => DetectionMode::OcrLenient,
        }
    }
}

/// Title of a recognized heading
#[derive(Debug, Clone, PartialEq, Eq)]
enum HeadingTitle {
    /// Text taken from the heading itself
    Text(String),

    /// Untitled heading, named "Chapter N" after its own number when it
    /// has one, otherwise after its ordinal
    Generated(Option<usize>),
}

impl From<KeywordHeading<'_>> for HeadingTitle {
    fn from(heading: KeywordHeading<'_>) -> Self {
        match heading.title {
            Some(title) => HeadingTitle::Text(title.trim().to_string()),
            None => HeadingTitle::Generated(heading_number(heading.number)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitKind {
    Body(usize),
    Header,
    PageNumber,
}

#[derive(Debug)]
struct Unit<'a> {
    text: &'a str,
    line_index: usize,
    kind: UnitKind,
}

/// A run of paragraphs under one heading
#[derive(Debug)]
struct Section {
    title: Option<String>,
    headed: bool,
    paragraphs: Vec<usize>,
}

impl Section {
    fn front_matter() -> Self {
        Self {
            title: Some(FRONT_MATTER_TITLE.to_string()),
            headed: false,
            paragraphs: Vec::new(),
        }
    }

    fn headed(title: HeadingTitle, ordinal: usize) -> Self {
        let title = match title {
            HeadingTitle::Text(text) => text,
            HeadingTitle::Generated(number) => format!("Chapter {}", number.unwrap_or(ordinal)),
        };
        Self {
            title: Some(title),
            headed: true,
            paragraphs: Vec::new(),
        }
    }
}

/// Partitions paragraphs into chapters
#[derive(Debug, Clone)]
pub struct ChapterDetector {
    mode: DetectionMode,
    floor: usize,
    max_header_length: usize,
    uppercase_ratio_threshold: f64,
    running_header_min_repeats: usize,
}

impl ChapterDetector {
    /// Create a detector for the given mode
    pub fn new(config: &StructureConfig, mode: DetectionMode) -> Self {
        let floor = match mode {
            DetectionMode::Structural => config.structural_chapter_floor,
            DetectionMode::OcrLenient => config.ocr_chapter_floor,
        };

        Self {
            mode,
            floor,
            max_header_length: config.max_header_length,
            uppercase_ratio_threshold: config.uppercase_ratio_threshold,
            running_header_min_repeats: config.running_header_min_repeats,
        }
    }

    /// Detection mode in use
    pub fn mode(&self) -> DetectionMode {
        self.mode
    }

    /// Configured substance floor for this mode
    pub fn floor(&self) -> usize {
        self.floor
    }

    /// Normalize extracted text for this mode
    ///
    /// OCR text additionally goes through [`respace_ocr`].
    pub fn prepare_text(&self, text: &str) -> String {
        let normalized = normalize_document(text);
        match self.mode {
            DetectionMode::Structural => normalized,
            DetectionMode::OcrLenient => respace_ocr(&normalized),
        }
    }

    /// Line indices of headings, which page-break stitching must not cross
    pub fn barriers(&self, lines: &[Line], classes: &[LineClass]) -> BTreeSet<usize> {
        let running = self.running_heads(lines, classes);
        let candidates: Vec<(&Line, LineClass)> = lines
            .iter()
            .zip(classes.iter().copied())
            .filter(|(line, class)| {
                !line.is_blank() && *class != LineClass::Footnote && !running.contains(line.trimmed.as_str())
            })
            .collect();

        let mut barriers = BTreeSet::new();
        for (position, (line, class)) in candidates.iter().enumerate() {
            let kind = match class {
                LineClass::PageNumber => UnitKind::PageNumber,
                LineClass::Header => UnitKind::Header,
                _ => UnitKind::Body(0),
            };
            let unit = Unit {
                text: &line.trimmed,
                line_index: line.index,
                kind,
            };
            if self.heading(&unit).is_some() {
                barriers.insert(line.index);
            }
            if self.mode == DetectionMode::OcrLenient && is_small_number(&line.trimmed) {
                if let Some((next, next_class)) = candidates.get(position + 1) {
                    let next_kind = if next_class.is_content() {
                        UnitKind::Body(0)
                    } else {
                        UnitKind::Header
                    };
                    let next_unit = Unit {
                        text: &next.trimmed,
                        line_index: next.index,
                        kind: next_kind,
                    };
                    if self.pairs_as_title(&next_unit) {
                        barriers.insert(line.index);
                        barriers.insert(next.index);
                    }
                }
            }
        }
        barriers
    }

    /// Partition paragraphs into chapters
    ///
    /// `lines` and `classes` are the classified document the paragraphs were
    /// assembled from. `fallback_title` names the single chapter of a
    /// document without usable headings.
    pub fn detect(
        &self,
        lines: &[Line],
        classes: &[LineClass],
        paragraphs: &[Paragraph],
        fallback_title: Option<&str>,
    ) -> Vec<Chapter> {
        let units = self.units(lines, classes, paragraphs);

        let mut sections = Vec::new();
        let mut open = Section::front_matter();
        let mut boundaries = 0usize;
        let mut position = 0;

        while position < units.len() {
            let unit = &units[position];
            position += 1;

            let title = match self.heading(unit) {
                Some(title) => Some(title),
                None if self.mode == DetectionMode::OcrLenient && is_small_number(unit.text) => {
                    match units.get(position) {
                        Some(next) if self.pairs_as_title(next) => {
                            position += 1;
                            Some(HeadingTitle::Text(next.text.to_string()))
                        }
                        _ => None,
                    }
                }
                None => None,
            };

            match (title, unit.kind) {
                (Some(title), _) => {
                    if open.headed && open.paragraphs.is_empty() {
                        // Heading directly after a heading: keep the more specific title
                        if let HeadingTitle::Text(text) = title {
                            open.title = Some(text);
                        }
                        continue;
                    }
                    boundaries += 1;
                    sections.push(std::mem::replace(
                        &mut open,
                        Section::headed(title, boundaries),
                    ));
                }
                (None, UnitKind::Body(index)) => open.paragraphs.push(index),
                (None, _) => {}
            }
        }
        sections.push(open);

        let chapters = self.seal(sections, paragraphs);

        if boundaries == 0 || chapters.is_empty() {
            let title = fallback_title.unwrap_or(FULL_TEXT_TITLE);
            debug!(
                "No usable chapter headings ({} boundaries), returning one chapter titled '{}'",
                boundaries, title
            );
            return single_chapter(title, paragraphs);
        }

        debug!(
            "Detected {} chapters from {} headings ({:?} mode)",
            chapters.len(),
            boundaries,
            self.mode
        );
        chapters
    }

    fn seal(&self, sections: Vec<Section>, paragraphs: &[Paragraph]) -> Vec<Chapter> {
        let total: usize = paragraphs.iter().map(Paragraph::len).sum();
        let floor = if total >= self.floor { self.floor } else { 0 };

        sections
            .into_iter()
            .filter_map(|section| {
                let (first, last) = match (section.paragraphs.first(), section.paragraphs.last()) {
                    (Some(first), Some(last)) => (*first, *last),
                    _ => return None,
                };
                let texts: Vec<&str> = section
                    .paragraphs
                    .iter()
                    .map(|&index| paragraphs[index].content.as_str())
                    .collect();
                let title = section.title.unwrap_or_else(|| FULL_TEXT_TITLE.to_string());
                let chapter = Chapter::from_paragraphs(title, &texts, first, last);

                if chapter.len() < floor {
                    debug!(
                        "Dropping section '{}': {} chars is under the {} char floor",
                        chapter.title,
                        chapter.len(),
                        floor
                    );
                    return None;
                }
                Some(chapter)
            })
            .collect()
    }

    fn units<'a>(
        &self,
        lines: &'a [Line],
        classes: &[LineClass],
        paragraphs: &'a [Paragraph],
    ) -> Vec<Unit<'a>> {
        let running = self.running_heads(lines, classes);

        let mut units: Vec<Unit<'a>> = lines
            .iter()
            .zip(classes)
            .filter_map(|(line, class)| {
                let kind = match class {
                    LineClass::Header => UnitKind::Header,
                    LineClass::PageNumber => UnitKind::PageNumber,
                    _ => return None,
                };
                let text = line.trimmed.as_str();
                if running.contains(text) || is_boilerplate(text) {
                    return None;
                }
                Some(Unit {
                    text,
                    line_index: line.index,
                    kind,
                })
            })
            .chain(paragraphs.iter().enumerate().map(|(index, paragraph)| Unit {
                text: paragraph.content.as_str(),
                line_index: paragraph.start_line_index,
                kind: UnitKind::Body(index),
            }))
            .collect();

        units.sort_by_key(|unit| unit.line_index);
        units
    }

    /// Header texts repeated often enough to be running heads
    fn running_heads<'a>(&self, lines: &'a [Line], classes: &[LineClass]) -> BTreeSet<&'a str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (line, class) in lines.iter().zip(classes) {
            if *class == LineClass::Header {
                *counts.entry(line.trimmed.as_str()).or_default() += 1;
            }
        }

        counts
            .into_iter()
            .filter(|(_, count)| *count >= self.running_header_min_repeats)
            .map(|(text, _)| text)
            .collect()
    }

    fn heading(&self, unit: &Unit) -> Option<HeadingTitle> {
        let text = unit.text.trim();
        if text.is_empty() || text.chars().count() >= self.max_header_length {
            return None;
        }
        if unit.kind == UnitKind::PageNumber && self.mode == DetectionMode::Structural {
            return None;
        }
        if is_boilerplate(text) {
            return None;
        }

        if let Some(title) = structural_heading(text, unit.kind) {
            return Some(title);
        }
        if self.mode == DetectionMode::OcrLenient {
            return self.ocr_heading(text);
        }
        None
    }

    fn ocr_heading(&self, text: &str) -> Option<HeadingTitle> {
        if let Some(heading) = keyword_parts(&LOOSE_KEYWORD, text) {
            return Some(heading.into());
        }

        let trailing_comma = text.ends_with([',', ';']);
        if is_all_caps(text) && text.chars().count() >= 3 && !trailing_comma {
            return Some(HeadingTitle::Text(text.to_string()));
        }

        let letters = text.chars().filter(|c| c.is_alphabetic()).count();
        let shouting = uppercase_ratio(text).is_some_and(|r| r > self.uppercase_ratio_threshold);
        if letters >= 3 && shouting && !trailing_comma {
            return Some(HeadingTitle::Text(text.to_string()));
        }

        None
    }

    /// Whether a unit can serve as the title after a standalone number
    fn pairs_as_title(&self, unit: &Unit) -> bool {
        let text = unit.text.trim();
        unit.kind != UnitKind::PageNumber
            && text.chars().count() < self.max_header_length
            && text.chars().next().is_some_and(|c| c.is_uppercase())
            && self.heading(unit).is_none()
    }
}

fn structural_heading(text: &str, kind: UnitKind) -> Option<HeadingTitle> {
    if let Some(heading) = keyword_heading(text) {
        return Some(heading.into());
    }
    if SPECIAL_SECTION.is_match(text) {
        return Some(HeadingTitle::Text(title_case(text)));
    }
    if let Some(caps) = NUMBERED_TITLE
        .captures(text)
        .or_else(|| ROMAN_TITLE.captures(text))
    {
        return Some(HeadingTitle::Text(caps[1].trim().to_string()));
    }
    if kind == UnitKind::Header && BARE_ROMAN.is_match(text) {
        return Some(HeadingTitle::Generated(roman_value(text.trim_end_matches('.'))));
    }
    if is_all_caps(text) && text.chars().count() >= 4 && !text.ends_with([',', ';']) {
        return Some(HeadingTitle::Text(text.to_string()));
    }
    None
}

fn is_small_number(text: &str) -> bool {
    let text = text.trim();
    text.chars().all(|c| c.is_ascii_digit())
        && text
            .parse::<u32>()
            .is_ok_and(|number| (1..=200).contains(&number))
}

/// Value of the number in a keyword heading: digits, roman or spelled out
fn heading_number(token: &str) -> Option<usize> {
    let token = token.trim_end_matches(|c: char| !c.is_alphanumeric());
    if let Ok(number) = token.parse() {
        return Some(number);
    }
    roman_value(token).or_else(|| spelled_value(token))
}

fn roman_value(token: &str) -> Option<usize> {
    if token.is_empty() {
        return None;
    }

    let mut total = 0usize;
    let mut previous = 0;
    for c in token.chars().rev() {
        let value = match c {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => return None,
        };
        if value < previous {
            total = total.checked_sub(value)?;
        } else {
            total += value;
            previous = value;
        }
    }
    Some(total)
}

/// "twelve" is 12, "twenty-one" is 21
fn spelled_value(token: &str) -> Option<usize> {
    let words: Vec<&str> = NUMBER_WORDS.split('|').collect();
    let total = token
        .split(['-', ' '])
        .filter(|word| !word.is_empty())
        .try_fold(0, |total, word| {
            let position = words.iter().position(|w| w.eq_ignore_ascii_case(word))?;
            let value = match position {
                0..=18 => position + 1,
                19..=26 => (position - 17) * 10,
                _ => 100,
            };
            Some(total + value)
        })?;
    (total > 0).then_some(total)
}

fn title_case(text: &str) -> String {
    normalize_whitespace(text.trim_end_matches(['.', ':']))
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn single_chapter(title: &str, paragraphs: &[Paragraph]) -> Vec<Chapter> {
    if paragraphs.is_empty() {
        return Vec::new();
    }
    let texts: Vec<&str> = paragraphs.iter().map(|p| p.content.as_str()).collect();
    vec![Chapter::from_paragraphs(title, &texts, 0, paragraphs.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::ParagraphAssembler;
    use crate::classifier::LineClassifier;
    use crate::stitcher::PageBreakStitcher;

    fn detect(text: &str, mode: DetectionMode) -> Vec<Chapter> {
        let config = StructureConfig::default();
        let detector = ChapterDetector::new(&config, mode);
        let lines = Line::split(&detector.prepare_text(text));
        let classes = LineClassifier::new(&config).classify_all(&lines);
        let paragraphs = ParagraphAssembler::new(&config).assemble(&lines, &classes);
        let barriers = detector.barriers(&lines, &classes);
        let paragraphs = PageBreakStitcher::new(&config).stitch_with_barriers(paragraphs, &barriers);
        detector.detect(&lines, &classes, &paragraphs, None)
    }

    fn titles(chapters: &[Chapter]) -> Vec<&str> {
        chapters.iter().map(|c| c.title.as_str()).collect()
    }

    fn filler(sentences: usize) -> String {
        (0..sentences)
            .map(|i| format!("This is sentence number {} of a reasonably long chapter body.", i))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_keyword_headings_split_chapters() {
        let text = "1\n\nCHAPTER ONE\n\nIt was a dark night.\nThe wind howled through the trees.\n\n2\n\nCHAPTER TWO\n\nShe walked alone.";
        let chapters = detect(text, DetectionMode::Structural);

        assert_eq!(titles(&chapters), vec!["Chapter 1", "Chapter 2"]);
        assert_eq!(
            chapters[0].content,
            "It was a dark night. The wind howled through the trees."
        );
        assert_eq!(chapters[1].content, "She walked alone.");
        assert_eq!((chapters[1].start_index, chapters[1].end_index), (1, 1));
    }

    #[test]
    fn test_short_section_is_dropped() {
        let text = format!(
            "Chapter 1: Arrival\n\n{}\n\nChapter 2: Interlude\n\nA short pause.\n\nChapter 3: Departure\n\n{}",
            filler(5),
            filler(5)
        );
        let chapters = detect(&text, DetectionMode::Structural);

        assert_eq!(titles(&chapters), vec!["Arrival", "Departure"]);
        assert!(chapters.iter().all(|c| !c.content.contains("A short pause.")));
        assert!(chapters.iter().all(|c| c.len() >= 200));
    }

    #[test]
    fn test_ocr_floor_is_lower() {
        let short_body = "x".repeat(150);
        let text = format!(
            "Chapter 1: Arrival\n\n{}\n\nChapter 2: Interlude\n\n{} ends.\n\nChapter 3: Departure\n\n{}",
            filler(5),
            short_body,
            filler(5)
        );
        assert_eq!(detect(&text, DetectionMode::Structural).len(), 2);
        assert_eq!(detect(&text, DetectionMode::OcrLenient).len(), 3);
    }

    #[test]
    fn test_no_headings_single_chapter() {
        let chapters = detect(&filler(3), DetectionMode::Structural);
        assert_eq!(titles(&chapters), vec![FULL_TEXT_TITLE]);
        assert_eq!(chapters[0].start_index, 0);
    }

    #[test]
    fn test_fallback_title_names_single_chapter() {
        let config = StructureConfig::default();
        let detector = ChapterDetector::new(&config, DetectionMode::Structural);
        let paragraphs = vec![Paragraph::new("Only text.", 0, 0)];
        let lines = Line::split("Only text.");
        let classes = vec![LineClass::Paragraph];

        let chapters = detector.detect(&lines, &classes, &paragraphs, Some("The Book"));
        assert_eq!(titles(&chapters), vec!["The Book"]);
    }

    #[test]
    fn test_front_matter_kept_when_substantial() {
        let text = format!("{}\n\nCHAPTER ONE\n\n{}", filler(5), filler(5));
        let chapters = detect(&text, DetectionMode::Structural);
        assert_eq!(titles(&chapters), vec![FRONT_MATTER_TITLE, "Chapter 1"]);
    }

    #[test]
    fn test_consecutive_headings_keep_specific_title() {
        let text = format!("CHAPTER ONE\n\nTHE BEGINNING\n\n{}\n\nPROLOGUE AGAIN\n\nCHAPTER TWO\n\n{}", filler(5), filler(5));
        let chapters = detect(&text, DetectionMode::Structural);
        assert_eq!(titles(&chapters), vec!["THE BEGINNING", "PROLOGUE AGAIN"]);
    }

    #[test]
    fn test_special_sections_are_title_cased() {
        let text = format!("PROLOGUE\n\n{}\n\nEPILOGUE\n\n{}", filler(5), filler(5));
        let chapters = detect(&text, DetectionMode::Structural);
        assert_eq!(titles(&chapters), vec!["Prologue", "Epilogue"]);
    }

    #[test]
    fn test_running_heads_are_not_boundaries() {
        let page = format!("THE GREAT NOVEL\n\n{}\n\n", filler(2));
        let text = page.repeat(4);
        let chapters = detect(&text, DetectionMode::Structural);
        assert_eq!(titles(&chapters), vec![FULL_TEXT_TITLE]);
    }

    #[test]
    fn test_page_numbers_are_not_structural_boundaries() {
        let text = format!("{}\n\n12\n\n{}", filler(5), filler(5));
        let chapters = detect(&text, DetectionMode::Structural);
        assert_eq!(chapters.len(), 1);
    }

    #[test]
    fn test_ocr_number_title_pair() {
        let text = format!("3\n\nThe Crossing\n\n{}\n\n4\n\nThe Return\n\n{}", filler(3), filler(3));
        let chapters = detect(&text, DetectionMode::OcrLenient);
        assert_eq!(titles(&chapters), vec!["The Crossing", "The Return"]);
        assert!(!chapters[0].content.contains("The Crossing"));
    }

    #[test]
    fn test_ocr_misread_keyword() {
        let text = format!("CHAPTFR 1\n\n{}\n\nChaptcr 2\n\n{}", filler(3), filler(3));
        let chapters = detect(&text, DetectionMode::OcrLenient);
        assert_eq!(titles(&chapters), vec!["Chapter 1", "Chapter 2"]);
    }

    #[test]
    fn test_ocr_keyword_needs_a_number() {
        let text = format!(
            "CHAPTER 1\n\n{}\n\nPart of me wanted to stay.\n\n{}",
            filler(3),
            filler(3)
        );
        let chapters = detect(&text, DetectionMode::OcrLenient);
        assert_eq!(titles(&chapters), vec!["Chapter 1"]);
        assert!(chapters[0].content.contains("Part of me wanted to stay."));
    }

    #[test]
    fn test_ocr_keyword_with_trailing_debris() {
        let text = format!("{}\n\nChapter 7,\n\n{}", filler(5), filler(5));
        assert_eq!(
            titles(&detect(&text, DetectionMode::OcrLenient)),
            vec![FRONT_MATTER_TITLE, "Chapter 7"]
        );
        assert_eq!(detect(&text, DetectionMode::Structural).len(), 1);
    }

    #[test]
    fn test_ocr_short_all_caps_heading() {
        let text = format!("{}\n\nEND\n\n{}", filler(5), filler(5));
        assert_eq!(
            titles(&detect(&text, DetectionMode::OcrLenient)),
            vec![FRONT_MATTER_TITLE, "END"]
        );
        assert_eq!(
            titles(&detect(&text, DetectionMode::Structural)),
            vec![FULL_TEXT_TITLE]
        );
    }

    #[test]
    fn test_ocr_mostly_uppercase_heading() {
        let text = format!("{}\n\nTHE GREAT WINTEr\n\n{}", filler(5), filler(5));
        assert_eq!(
            titles(&detect(&text, DetectionMode::OcrLenient)),
            vec![FRONT_MATTER_TITLE, "THE GREAT WINTEr"]
        );
        assert_eq!(
            titles(&detect(&text, DetectionMode::Structural)),
            vec![FULL_TEXT_TITLE]
        );
    }

    #[test]
    fn test_roman_letter_words_are_not_numbers() {
        let text = format!(
            "CHAPTER ONE\n\n{}\n\nBook did not arrive on time.\n\n{}",
            filler(3),
            filler(3)
        );
        let chapters = detect(&text, DetectionMode::Structural);
        assert_eq!(titles(&chapters), vec!["Chapter 1"]);
        assert!(chapters[0].content.contains("Book did not arrive on time."));
    }

    #[test]
    fn test_generated_titles_use_heading_numbers() {
        let text = format!(
            "PROLOGUE\n\n{}\n\nCHAPTER ONE\n\n{}\n\nCHAPTER TWO\n\n{}",
            filler(5),
            filler(5),
            filler(5)
        );
        let chapters = detect(&text, DetectionMode::Structural);
        assert_eq!(titles(&chapters), vec!["Prologue", "Chapter 1", "Chapter 2"]);

        let text = format!("CHAPTER TWELVE\n\n{}\n\nCHAPTER THIRTEEN\n\n{}", filler(5), filler(5));
        let chapters = detect(&text, DetectionMode::Structural);
        assert_eq!(titles(&chapters), vec!["Chapter 12", "Chapter 13"]);

        let text = format!("Chapter IV\n\n{}\n\nChapter V\n\n{}", filler(5), filler(5));
        let chapters = detect(&text, DetectionMode::Structural);
        assert_eq!(titles(&chapters), vec!["Chapter 4", "Chapter 5"]);
    }

    #[test]
    fn test_heading_number_values() {
        assert_eq!(heading_number("12"), Some(12));
        assert_eq!(heading_number("7,"), Some(7));
        assert_eq!(heading_number("XIV"), Some(14));
        assert_eq!(heading_number("MCMXC"), Some(1990));
        assert_eq!(heading_number("Twelve"), Some(12));
        assert_eq!(heading_number("twenty-one"), Some(21));
        assert_eq!(heading_number("NINETY NINE"), Some(99));
        assert_eq!(heading_number("did"), None);
    }

    #[test]
    fn test_numbered_and_roman_titles() {
        let text = format!("1. The Start\n\n{}\n\nII. The Middle\n\n{}", filler(5), filler(5));
        let chapters = detect(&text, DetectionMode::Structural);
        assert_eq!(titles(&chapters), vec!["The Start", "The Middle"]);
    }

    #[test]
    fn test_barriers() {
        let config = StructureConfig::default();
        let detector = ChapterDetector::new(&config, DetectionMode::Structural);
        let lines = Line::split("It ended with the\n\nCHAPTER TWO\n\nbeginning.");
        let classes = LineClassifier::new(&config).classify_all(&lines);
        assert_eq!(detector.barriers(&lines, &classes), BTreeSet::from([2]));
    }

    #[test]
    fn test_mode_from_method() {
        assert_eq!(DetectionMode::from(ExtractionMethod::Primary), DetectionMode::Structural);
        assert_eq!(
            DetectionMode::from(ExtractionMethod::SecondaryFallback),
            DetectionMode::OcrLenient
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ACKNOWLEDGEMENTS"), "Acknowledgements");
        assert_eq!(title_case("appendix b:"), "Appendix B");
    }
}
