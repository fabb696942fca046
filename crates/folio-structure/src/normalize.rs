//! Text normalization
//!
//! Three passes of increasing aggressiveness:
//! - [`normalize_whitespace`] for fragments and paragraph content
//! - [`normalize_document`] for whole extracted texts, before line splitting
//! - [`respace_ocr`] for OCR output, which often loses spaces and misreads headings

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Characters that may follow sentence punctuation without ending the sentence shape
const CLOSING_MARKS: &[char] = &['"', '\'', '\u{201D}', '\u{2019}', ')', ']', '\u{BB}'];

const ZERO_WIDTH: &[char] = &['\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{FEFF}'];

const SOFT_HYPHEN: char = '\u{00AD}';

static CHAPTER_MISREAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([cgo0][hbn][ae@][pf][tli1][ecof3][rkbn])(\P{L}|$)").unwrap()
});

static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\p{Ll})(\p{Lu})").unwrap());

static DIGIT_LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d)(\p{L}+)").unwrap());

static LETTER_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\p{L})(\d)").unwrap());

static NUMERAL_ONE_MISREAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\s*(?:chapter|part|book|section)\s+)[l|](\s|$)").unwrap()
});

static SPLIT_ROMAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*(?:(?i:chapter|part|book|section)\s+)?)((?:[IVXLC] ){1,7}[IVXLC])\s*$")
        .unwrap()
});

/// Collapse runs of whitespace to single spaces and trim both ends
///
/// # Examples
///
/// ```
/// use folio_structure::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  a \t b\n c  "), "a b c");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a whole extracted text before it is split into lines
///
/// Line endings are unified, form feeds (page separators) become blank
/// lines, tabs are expanded, invisible characters are removed and trailing
/// padding is trimmed. Leading padding survives: it marks centred headings.
pub fn normalize_document(text: &str) -> String {
    let unified = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\x0C', "\n\n");

    unified
        .lines()
        .map(|line| {
            line.chars()
                .filter(|c| !ZERO_WIDTH.contains(c))
                .collect::<String>()
                .replace('\t', "    ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Repair spacing and heading misreads typical of OCR output
///
/// Applied line by line:
/// - misreads of "chapter" (`CHAPTFR`, `Chaptcr`, `0HAPTER`) are corrected
/// - a space is inserted at lowercase→uppercase transitions
/// - a space is inserted at digit↔letter transitions, except ordinals (`2nd`)
/// - `l` or `|` read in place of the numeral one after a heading keyword becomes `1`
/// - split roman numerals on heading lines are collapsed (`X I V` → `XIV`)
pub fn respace_ocr(text: &str) -> String {
    text.lines()
        .map(respace_ocr_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn respace_ocr_line(line: &str) -> String {
    let line = CHAPTER_MISREAD.replace_all(line, |caps: &Captures| {
        let word = &caps[1];
        let fixed = if word.eq_ignore_ascii_case("chapter") {
            word.to_string()
        } else if word.chars().any(|c| c.is_lowercase()) {
            "Chapter".to_string()
        } else {
            "CHAPTER".to_string()
        };
        format!("{}{}", fixed, &caps[2])
    });

    let line = LOWER_UPPER.replace_all(&line, "$1 $2");

    let line = DIGIT_LETTERS.replace_all(&line, |caps: &Captures| {
        let letters = &caps[2];
        if is_ordinal_suffix(letters) {
            format!("{}{}", &caps[1], letters)
        } else {
            format!("{} {}", &caps[1], letters)
        }
    });

    let line = LETTER_DIGIT.replace_all(&line, "$1 $2");
    let line = NUMERAL_ONE_MISREAD.replace(&line, "${1}1${2}");

    SPLIT_ROMAN
        .replace(&line, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].replace(' ', ""))
        })
        .into_owned()
}

fn is_ordinal_suffix(letters: &str) -> bool {
    matches!(letters, "st" | "nd" | "rd" | "th")
}

/// Whether text ends a sentence: `.`, `!` or `?`, optionally followed by
/// closing quotes or brackets
pub(crate) fn is_sentence_terminal(text: &str) -> bool {
    text.trim_end()
        .trim_end_matches(CLOSING_MARKS)
        .ends_with(['.', '!', '?'])
}

/// Whether text ends with a hyphen that splits a word across lines
///
/// The hyphen (or soft hyphen) must follow a letter, so dashes and list
/// bullets are not mistaken for broken words.
pub(crate) fn ends_with_continuation_hyphen(text: &str) -> bool {
    let trimmed = text.trim_end();
    let Some(before) = trimmed
        .strip_suffix('-')
        .or_else(|| trimmed.strip_suffix(SOFT_HYPHEN))
    else {
        return false;
    };
    before.chars().last().is_some_and(|c| c.is_alphabetic())
}

/// Join a continuation onto text ending in a word-splitting hyphen
pub(crate) fn join_hyphenated(head: &str, tail: &str) -> String {
    let trimmed = head.trim_end();
    let stem = trimmed
        .strip_suffix('-')
        .or_else(|| trimmed.strip_suffix(SOFT_HYPHEN))
        .unwrap_or(trimmed);
    normalize_whitespace(&format!("{}{}", stem, tail.trim_start()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("hello   world"), "hello world");
        assert_eq!(normalize_whitespace("\u{A0}nbsp\u{A0}\u{A0}space "), "nbsp space");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_normalize_document_line_endings_and_page_feeds() {
        let text = "page one\r\nmore\x0Cpage two\rend";
        assert_eq!(normalize_document(text), "page one\nmore\n\npage two\nend");
    }

    #[test]
    fn test_normalize_document_keeps_leading_padding() {
        let text = "\t\tCENTRED   \nbody\u{200B}text \t";
        assert_eq!(normalize_document(text), "        CENTRED\nbodytext");
    }

    #[test]
    fn test_respace_case_transitions() {
        assert_eq!(respace_ocr("theEnd ofTheRoad"), "the End of The Road");
    }

    #[test]
    fn test_respace_digits_keeps_ordinals() {
        assert_eq!(respace_ocr("page12 and 3cats"), "page 12 and 3 cats");
        assert_eq!(respace_ocr("the 2nd and 21st"), "the 2nd and 21st");
    }

    #[test]
    fn test_chapter_misreads() {
        assert_eq!(respace_ocr("CHAPTFR 3"), "CHAPTER 3");
        assert_eq!(respace_ocr("Chaptcr 4"), "Chapter 4");
        assert_eq!(respace_ocr("0HAPTER 5"), "CHAPTER 5");
        assert_eq!(respace_ocr("CHAP1ER6"), "CHAPTER 6");
        assert_eq!(respace_ocr("in this chapter we"), "in this chapter we");
    }

    #[test]
    fn test_numeral_one_misread() {
        assert_eq!(respace_ocr("Chapter l"), "Chapter 1");
        assert_eq!(respace_ocr("PART |"), "PART 1");
        assert_eq!(respace_ocr("Chapter lonely"), "Chapter lonely");
    }

    #[test]
    fn test_split_roman_numerals() {
        assert_eq!(respace_ocr("X I V"), "XIV");
        assert_eq!(respace_ocr("CHAPTER I I"), "CHAPTER II");
        assert_eq!(respace_ocr("I I am here"), "I I am here");
    }

    #[test]
    fn test_sentence_terminal() {
        assert!(is_sentence_terminal("Hello world."));
        assert!(is_sentence_terminal("Really?  "));
        assert!(is_sentence_terminal("\u{201C}Go!\u{201D}"));
        assert!(is_sentence_terminal("(as noted.)"));
        assert!(!is_sentence_terminal("and then,"));
        assert!(!is_sentence_terminal(""));
    }

    #[test]
    fn test_continuation_hyphen() {
        assert!(ends_with_continuation_hyphen("exam-"));
        assert!(ends_with_continuation_hyphen("soft\u{00AD}"));
        assert!(!ends_with_continuation_hyphen("- "));
        assert!(!ends_with_continuation_hyphen("1995-"));
        assert!(!ends_with_continuation_hyphen("wait--"));
    }

    #[test]
    fn test_join_hyphenated() {
        assert_eq!(join_hyphenated("exam-", "ple is hard"), "example is hard");
        assert_eq!(join_hyphenated("a long word, exam-", "  ple"), "a long word, example");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn whitespace_normalization_is_idempotent(s in "\\PC*") {
            let once = normalize_whitespace(&s);
            prop_assert_eq!(normalize_whitespace(&once), once.clone());
            prop_assert!(!once.contains("  "));
            prop_assert_eq!(once.trim(), once.as_str());
        }

        #[test]
        fn document_normalization_is_idempotent(s in "[a-zA-Z \\t\\r\\n\\x0C.]{0,120}") {
            let once = normalize_document(&s);
            prop_assert_eq!(normalize_document(&once), once);
        }
    }
}
