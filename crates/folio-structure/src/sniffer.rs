//! Best-effort title and author detection from the opening lines

use crate::classifier::{is_all_caps, is_boilerplate, is_heading_keyword, is_page_number};
use crate::config::StructureConfig;
use crate::normalize::normalize_whitespace;
use folio_domain::Line;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Byline patterns, tried in order; group 1 is the name
static BYLINES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)^by\s+(.+)$").unwrap(),
        Regex::new(r"(?i)^author\s*:\s*(.+)$").unwrap(),
        Regex::new(r"(?i)^written\s+by\s+(.+)$").unwrap(),
        Regex::new(r"(?i)^(.+?),\s*author$").unwrap(),
    ]
});

static BY_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^(?:written\s+)?by\s").unwrap());

static NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\d\s\p{P}]+$").unwrap());

const NAME_STOPWORDS: &[&str] = &["The", "A", "An", "Of", "And", "In", "On"];

/// Scans the first lines of a document for its title and author
#[derive(Debug, Clone)]
pub struct TitleAuthorSniffer {
    title_scan_lines: usize,
    author_scan_lines: usize,
}

impl TitleAuthorSniffer {
    /// Create a sniffer from configuration
    pub fn new(config: &StructureConfig) -> Self {
        Self {
            title_scan_lines: config.title_scan_lines,
            author_scan_lines: config.author_scan_lines,
        }
    }

    /// Sniff both title and author
    pub fn sniff(&self, lines: &[Line]) -> (Option<String>, Option<String>) {
        let title = self.title(lines);
        let author = self.author(lines, title.as_deref());
        debug!("Sniffed title {:?}, author {:?}", title, author);
        (title, author)
    }

    /// Find the document title
    ///
    /// The first line of 2 to 15 words that is not boilerplate, a page
    /// number, a byline, a chapter heading or a sentence ending in a full
    /// stop. All-caps lines are accepted
    /// right away when short and free of digits; longer ones are kept only
    /// as a fallback.
    pub fn title(&self, lines: &[Line]) -> Option<String> {
        let mut all_caps_fallback = None;

        for line in non_blank(lines).take(self.title_scan_lines) {
            let text = normalize_whitespace(&line.trimmed);
            if is_page_number(&text)
                || is_boilerplate(&text)
                || BY_PREFIX.is_match(&text)
                || is_heading_keyword(&text)
                || NUMERIC.is_match(&text)
                || ends_with_full_stop(&text)
            {
                continue;
            }

            let words = text.split(' ').count();
            if !(2..=15).contains(&words) || !text.chars().any(|c| c.is_alphabetic()) {
                continue;
            }

            if !is_all_caps(&text) {
                return Some(text);
            }
            if words <= 8 && !text.chars().any(|c| c.is_ascii_digit()) {
                return Some(text);
            }
            all_caps_fallback.get_or_insert(text);
        }

        all_caps_fallback
    }

    /// Find the document author
    ///
    /// Explicit bylines first, each pattern over all scanned lines before
    /// the next. Failing that, a short run of capitalized words among the
    /// third to tenth lines is taken as a name.
    pub fn author(&self, lines: &[Line], title: Option<&str>) -> Option<String> {
        let scanned: Vec<String> = non_blank(lines)
            .take(self.author_scan_lines)
            .map(|line| normalize_whitespace(&line.trimmed))
            .collect();

        for pattern in BYLINES.iter() {
            let name = scanned
                .iter()
                .filter_map(|text| pattern.captures(text))
                .map(|caps| clean_name(&caps[1]))
                .find(|name| name.chars().any(|c| c.is_alphabetic()));
            if name.is_some() {
                return name;
            }
        }

        scanned
            .iter()
            .take(10)
            .skip(2)
            .find(|text| Some(text.as_str()) != title && looks_like_name(text))
            .cloned()
    }
}

impl Default for TitleAuthorSniffer {
    fn default() -> Self {
        Self::new(&StructureConfig::default())
    }
}

fn non_blank(lines: &[Line]) -> impl Iterator<Item = &Line> {
    lines.iter().filter(|line| !line.is_blank())
}

fn ends_with_full_stop(text: &str) -> bool {
    text.trim_end_matches(['"', '\'', '\u{201D}', '\u{2019}', ')'])
        .ends_with('.')
}

fn clean_name(raw: &str) -> String {
    normalize_whitespace(raw.trim_end_matches(['.', ',', ';', ':']))
}

fn looks_like_name(text: &str) -> bool {
    let words: Vec<&str> = text.split(' ').collect();
    if !(2..=4).contains(&words.len()) {
        return false;
    }
    if is_heading_keyword(text) || is_boilerplate(text) || is_page_number(text) {
        return false;
    }
    words.iter().all(|word| {
        word.chars().next().is_some_and(|c| c.is_uppercase())
            && word.chars().all(|c| c.is_alphabetic() || matches!(c, '.' | '-' | '\''))
            && !NAME_STOPWORDS.contains(word)
    })
}
