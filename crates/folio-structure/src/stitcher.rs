//! Page-break stitching
//!
//! A page break in the middle of a sentence leaves two paragraphs where the
//! author wrote one. The stitcher folds over the assembled paragraphs and
//! rejoins a paragraph with its predecessor when the seam looks unfinished.

use crate::config::StructureConfig;
use crate::normalize::{ends_with_continuation_hyphen, join_hyphenated, normalize_whitespace};
use folio_domain::Paragraph;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Punctuation that ends a paragraph for stitching purposes
const CLAUSE_END: &[char] = &['.', '!', '?', ';', ':'];

const CLOSING_MARKS: &[char] = &['"', '\'', '\u{201D}', '\u{2019}', ')', ']', '\u{BB}'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seam {
    /// Join with a single space
    Space,
    /// Remove the trailing hyphen and join without a space
    Hyphen,
}

/// Rejoins paragraphs split by page breaks
#[derive(Debug, Clone)]
pub struct PageBreakStitcher {
    dangling_words: HashSet<String>,
}

impl PageBreakStitcher {
    /// Create a stitcher from configuration
    pub fn new(config: &StructureConfig) -> Self {
        Self {
            dangling_words: config
                .dangling_words
                .iter()
                .map(|word| word.to_lowercase())
                .collect(),
        }
    }

    /// Stitch paragraphs with no barriers
    pub fn stitch(&self, paragraphs: Vec<Paragraph>) -> Vec<Paragraph> {
        self.stitch_with_barriers(paragraphs, &BTreeSet::new())
    }

    /// Stitch paragraphs, never merging across a barrier line
    ///
    /// Barriers are the line indices of headings. A merge is refused when
    /// either paragraph starts at a barrier or one lies between them.
    pub fn stitch_with_barriers(
        &self,
        paragraphs: Vec<Paragraph>,
        barriers: &BTreeSet<usize>,
    ) -> Vec<Paragraph> {
        let before = paragraphs.len();

        let stitched = paragraphs
            .into_iter()
            .fold(Vec::<Paragraph>::with_capacity(before), |mut out, candidate| {
                let seam = out
                    .last()
                    .filter(|previous| !crosses_barrier(previous, &candidate, barriers))
                    .and_then(|previous| self.seam(previous, &candidate));

                match (seam, out.last_mut()) {
                    (Some(seam), Some(previous)) => merge(previous, candidate, seam),
                    _ => out.push(candidate),
                }
                out
            });

        if stitched.len() < before {
            debug!(
                "Stitched {} page-break seams ({} -> {} paragraphs)",
                before - stitched.len(),
                before,
                stitched.len()
            );
        }

        stitched
    }

    fn seam(&self, previous: &Paragraph, candidate: &Paragraph) -> Option<Seam> {
        if ends_with_continuation_hyphen(&previous.content) {
            return Some(Seam::Hyphen);
        }

        let unfinished = !previous
            .content
            .trim_end_matches(CLOSING_MARKS)
            .ends_with(CLAUSE_END);
        let continues_lowercase = candidate
            .content
            .chars()
            .next()
            .is_some_and(|c| c.is_lowercase());

        if unfinished && continues_lowercase {
            return Some(Seam::Space);
        }
        if self.ends_with_dangling_word(&previous.content) {
            return Some(Seam::Space);
        }
        None
    }

    fn ends_with_dangling_word(&self, text: &str) -> bool {
        text.split_whitespace().last().is_some_and(|word| {
            word.chars().all(|c| c.is_alphabetic())
                && self.dangling_words.contains(&word.to_lowercase())
        })
    }
}

impl Default for PageBreakStitcher {
    fn default() -> Self {
        Self::new(&StructureConfig::default())
    }
}

fn crosses_barrier(previous: &Paragraph, candidate: &Paragraph, barriers: &BTreeSet<usize>) -> bool {
    let from = previous.start_line_index.min(candidate.start_line_index);
    let to = previous.start_line_index.max(candidate.start_line_index);
    barriers.range(from..=to).next().is_some()
}

fn merge(previous: &mut Paragraph, candidate: Paragraph, seam: Seam) {
    previous.content = match seam {
        Seam::Space => normalize_whitespace(&format!("{} {}", previous.content, candidate.content)),
        Seam::Hyphen => join_hyphenated(&previous.content, &candidate.content),
    };
    previous.start_line_index = previous.start_line_index.min(candidate.start_line_index);
    previous.end_line_index = previous.end_line_index.max(candidate.end_line_index);
}
