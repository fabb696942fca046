//! Paragraph assembly from classified lines

use crate::config::{SentenceBreakPolicy, StructureConfig};
use crate::normalize::{
    ends_with_continuation_hyphen, is_sentence_terminal, join_hyphenated, normalize_whitespace,
};
use folio_domain::{Line, LineClass, Paragraph};
use tracing::debug;

/// The paragraph being built
#[derive(Debug, Default)]
struct OpenParagraph {
    text: String,
    start: usize,
    end: usize,
    pending_hyphen: bool,
}

impl OpenParagraph {
    fn push(&mut self, fragment: &str, index: usize) {
        if self.text.is_empty() {
            self.text = fragment.to_string();
            self.start = index;
        } else if self.pending_hyphen {
            self.text = join_hyphenated(&self.text, fragment);
        } else {
            self.text.push(' ');
            self.text.push_str(fragment);
        }
        self.end = index;
        self.pending_hyphen = ends_with_continuation_hyphen(fragment);
    }

    fn close_into(&mut self, paragraphs: &mut Vec<Paragraph>) {
        let open = std::mem::take(self);
        let content = normalize_whitespace(&open.text);
        if !content.is_empty() {
            paragraphs.push(Paragraph::new(content, open.start, open.end));
        }
    }
}

/// Groups body lines into paragraphs
///
/// Blank lines and every non-body line close the open paragraph. Words split
/// by a hyphen at a line end are rejoined. Depending on the
/// [`SentenceBreakPolicy`], a line ending a sentence also closes it.
#[derive(Debug, Clone)]
pub struct ParagraphAssembler {
    policy: SentenceBreakPolicy,
    blank_separator_ratio: f64,
}

impl ParagraphAssembler {
    /// Create an assembler from configuration
    pub fn new(config: &StructureConfig) -> Self {
        Self {
            policy: config.sentence_breaks,
            blank_separator_ratio: config.blank_separator_ratio,
        }
    }

    /// Override the sentence break policy
    pub fn with_policy(mut self, policy: SentenceBreakPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Whether sentence punctuation closes paragraphs in this document
    ///
    /// Under [`SentenceBreakPolicy::Auto`] this holds only when blank lines
    /// following body text are rare, i.e. the document does not separate its
    /// paragraphs with blank lines.
    pub fn sentence_breaks_active(&self, classes: &[LineClass]) -> bool {
        match self.policy {
            SentenceBreakPolicy::Always => true,
            SentenceBreakPolicy::Never => false,
            SentenceBreakPolicy::Auto => {
                let content = classes.iter().filter(|c| c.is_content()).count();
                if content == 0 {
                    return false;
                }
                let separators = classes
                    .windows(2)
                    .filter(|pair| pair[0] == LineClass::Paragraph && pair[1] == LineClass::Blank)
                    .count();
                (separators as f64 / content as f64) < self.blank_separator_ratio
            }
        }
    }

    /// Assemble paragraphs from lines and their classes
    ///
    /// `classes` must hold one entry per line, in the same order.
    pub fn assemble(&self, lines: &[Line], classes: &[LineClass]) -> Vec<Paragraph> {
        let sentence_breaks = self.sentence_breaks_active(classes);
        let mut paragraphs = Vec::new();
        let mut open = OpenParagraph::default();

        for (line, class) in lines.iter().zip(classes) {
            match class {
                LineClass::Paragraph => {
                    let fragment = normalize_whitespace(&line.trimmed);
                    open.push(&fragment, line.index);
                    if sentence_breaks && is_sentence_terminal(&fragment) {
                        open.close_into(&mut paragraphs);
                    }
                }
                LineClass::Blank
                | LineClass::Header
                | LineClass::PageNumber
                | LineClass::Footnote => open.close_into(&mut paragraphs),
            }
        }
        open.close_into(&mut paragraphs);

        debug!(
            "Assembled {} paragraphs from {} lines (sentence breaks: {})",
            paragraphs.len(),
            lines.len(),
            sentence_breaks
        );

        paragraphs
    }
}

impl Default for ParagraphAssembler {
    fn default() -> Self {
        Self::new(&StructureConfig::default())
    }
}
