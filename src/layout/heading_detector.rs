//! Heading detection on segmented page text.
//!
//! Extracted text carries no font information, so headings are recognised
//! purely from their wording:
//!
//! - **Chapters** (level 1): the first block of a page opens with
//!   `Chapter N` / `Part IV`. Extraction often glues the first body sentence
//!   onto the heading, so the candidate is trimmed at a sentence boundary or
//!   just before a word that typically opens body text.
//! - **Sections** (levels 2 and 3): one of the first few blocks passes an
//!   ordered list of rejection rules. Level 3 is used for `A.` / `1.` style
//!   numbered headings.
//!
//! Misclassification is possible in both directions and is not reported.

use crate::config::StructureConfig;
use crate::text::cleanup::{char_len, char_to_byte, clean_heading_candidate, normalise};
use crate::text::patterns::{
    RE_BAD_HEADING, RE_BODY_START_WORD, RE_BULLET_PREFIX, RE_CHAPTER_HEADING, RE_CHAPTER_PREFIX,
    RE_HEADING_WORD, RE_SENTENCE_BOUNDARY, RE_SUBSECTION,
};
use serde::{Deserialize, Serialize};

/// Lowercased phrases that are never section headings.
const EXCLUDED_HEADINGS: &[&str] = &["without:"];

/// Characters after the colon before body-start words are looked for.
const TITLE_SPAN_AFTER_COLON: usize = 15;

/// Body-start search position when the heading has no colon.
const TITLE_SPAN_WITHOUT_COLON: usize = 20;

/// Hierarchy level of a detected heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Chapter or part heading
    Chapter,
    /// Section heading
    Section,
    /// Numbered subsection heading
    Subsection,
}

impl HeadingLevel {
    /// Numeric level as used in the output documents (1, 2 or 3).
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_oxide::layout::heading_detector::HeadingLevel;
    ///
    /// assert_eq!(HeadingLevel::Chapter.as_u8(), 1);
    /// assert_eq!(HeadingLevel::Subsection.as_u8(), 3);
    /// ```
    pub fn as_u8(&self) -> u8 {
        match self {
            HeadingLevel::Chapter => 1,
            HeadingLevel::Section => 2,
            HeadingLevel::Subsection => 3,
        }
    }

    /// Inverse of [`HeadingLevel::as_u8`]. Level 0 and unknown levels map to `None`.
    pub fn from_u8(level: u8) -> Option<Self> {
        match level {
            1 => Some(HeadingLevel::Chapter),
            2 => Some(HeadingLevel::Section),
            3 => Some(HeadingLevel::Subsection),
            _ => None,
        }
    }
}

/// A heading found at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedHeading {
    /// Cleaned heading text
    pub text: String,
    /// Heading level
    pub level: HeadingLevel,
    /// Leading blocks consumed by the heading (1 for chapters, 0 for sections,
    /// which are stripped by prefix comparison instead)
    pub consumed_blocks: usize,
}

/// A section heading rejection rule: returns true when the candidate is rejected.
type RejectionRule = fn(&HeadingDetector, &str, &[&str]) -> bool;

/// Section heading rejection rules, evaluated top-down; the first hit wins.
const SECTION_REJECTIONS: &[(&str, RejectionRule)] = &[
    ("empty", reject_empty),
    ("excluded phrase", reject_excluded),
    ("inline bullet", reject_inline_bullet),
    ("chapter label", reject_chapter_label),
    ("bullet prefix", reject_bullet_prefix),
    ("url or email", reject_url),
    ("length", reject_length),
    ("sentence punctuation", reject_terminal_punct),
    ("too few words", reject_few_words),
    ("mostly lowercase", reject_lowercase),
    ("short colon fragment", reject_colon_fragment),
];

fn reject_empty(_: &HeadingDetector, text: &str, _: &[&str]) -> bool {
    text.is_empty()
}

fn reject_excluded(_: &HeadingDetector, text: &str, _: &[&str]) -> bool {
    EXCLUDED_HEADINGS.contains(&text.to_lowercase().as_str())
}

fn reject_inline_bullet(_: &HeadingDetector, text: &str, _: &[&str]) -> bool {
    text.contains('•') || text.contains('●')
}

fn reject_chapter_label(_: &HeadingDetector, text: &str, _: &[&str]) -> bool {
    RE_CHAPTER_HEADING.is_match(text)
}

fn reject_bullet_prefix(_: &HeadingDetector, text: &str, _: &[&str]) -> bool {
    RE_BULLET_PREFIX.is_match(text)
}

fn reject_url(_: &HeadingDetector, text: &str, _: &[&str]) -> bool {
    RE_BAD_HEADING.is_match(text)
}

fn reject_length(detector: &HeadingDetector, text: &str, _: &[&str]) -> bool {
    let len = char_len(text);
    len < detector.min_heading_chars || len > detector.max_heading_chars
}

fn reject_terminal_punct(_: &HeadingDetector, text: &str, _: &[&str]) -> bool {
    text.ends_with(&['.', '!', '?'][..])
}

fn reject_few_words(_: &HeadingDetector, _: &str, words: &[&str]) -> bool {
    words.len() < 3
}

fn reject_lowercase(detector: &HeadingDetector, _: &str, words: &[&str]) -> bool {
    let lower = words
        .iter()
        .filter(|w| !w.chars().any(|c| c.is_ascii_uppercase()))
        .count();
    let ratio = lower as f32 / words.len().max(1) as f32;
    ratio > detector.max_lowercase_ratio
}

fn reject_colon_fragment(_: &HeadingDetector, text: &str, words: &[&str]) -> bool {
    words.len() <= 3 && text.ends_with(':')
}

/// Detects chapter and section headings at the top of a page.
#[derive(Debug, Clone)]
pub struct HeadingDetector {
    /// Leading blocks examined for a section heading
    pub section_scan_depth: usize,
    /// Minimum section heading length in characters
    pub min_heading_chars: usize,
    /// Maximum section heading length in characters
    pub max_heading_chars: usize,
    /// Largest accepted fraction of all-lowercase words
    pub max_lowercase_ratio: f32,
}

impl Default for HeadingDetector {
    fn default() -> Self {
        Self::from_config(&StructureConfig::default())
    }
}

impl HeadingDetector {
    /// Create a detector with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector from pipeline configuration.
    pub fn from_config(config: &StructureConfig) -> Self {
        Self {
            section_scan_depth: config.section_scan_depth,
            min_heading_chars: config.min_heading_chars,
            max_heading_chars: config.max_heading_chars,
            max_lowercase_ratio: config.max_lowercase_ratio,
        }
    }

    /// Detect the heading of a page: a chapter if the first block is one,
    /// otherwise the first valid section heading.
    pub fn detect(&self, blocks: &[String]) -> Option<DetectedHeading> {
        self.detect_chapter(blocks)
            .or_else(|| self.detect_section(blocks))
    }

    /// Detect a chapter heading in the first block.
    ///
    /// Only the first block is ever used; continuation blocks are body text.
    pub fn detect_chapter(&self, blocks: &[String]) -> Option<DetectedHeading> {
        let first = clean_heading_candidate(blocks.first()?);
        if first.is_empty() || !RE_CHAPTER_PREFIX.is_match(&first) {
            return None;
        }

        let candidate = trim_heading_at_sentence_end(&first);
        if !RE_CHAPTER_HEADING.is_match(&candidate) {
            log::debug!("Chapter label without title rejected: {:?}", candidate);
            return None;
        }

        Some(DetectedHeading {
            text: candidate,
            level: HeadingLevel::Chapter,
            consumed_blocks: 1,
        })
    }

    /// Detect a section heading among the first `section_scan_depth` blocks.
    pub fn detect_section(&self, blocks: &[String]) -> Option<DetectedHeading> {
        blocks
            .iter()
            .take(self.section_scan_depth)
            .map(|block| clean_heading_candidate(block))
            .filter(|candidate| !candidate.is_empty())
            .find(|candidate| self.is_valid_section_heading(candidate))
            .map(|candidate| {
                let level = if RE_SUBSECTION.is_match(&candidate) {
                    HeadingLevel::Subsection
                } else {
                    HeadingLevel::Section
                };
                DetectedHeading {
                    text: candidate,
                    level,
                    consumed_blocks: 0,
                }
            })
    }

    /// Whether `text` qualifies as a section heading.
    pub fn is_valid_section_heading(&self, text: &str) -> bool {
        self.section_rejection(text).is_none()
    }

    /// Name of the first rejection rule that fires, if any.
    pub fn section_rejection(&self, text: &str) -> Option<&'static str> {
        let norm = text.trim();
        let words: Vec<&str> = RE_HEADING_WORD.find_iter(norm).map(|m| m.as_str()).collect();
        SECTION_REJECTIONS
            .iter()
            .find(|(_, rule)| rule(self, norm, &words))
            .map(|(name, _)| *name)
    }
}

/// Cut a chapter heading where body text begins.
///
/// Rules, first match wins:
///
/// 1. a sentence terminator followed by whitespace and an uppercase letter:
///    keep everything up to and including the terminator
/// 2. a body-start word ("Because", "The", "You", ...) reaching past the
///    title span (15 characters after the colon, or character 20): cut
///    just before it
///
/// The heuristic is lossy; short titles that contain such words can be cut.
///
/// # Examples
///
/// ```
/// use folio_oxide::layout::heading_detector::trim_heading_at_sentence_end;
///
/// assert_eq!(
///     trim_heading_at_sentence_end("Chapter 3: The Big Plan. This explains everything."),
///     "Chapter 3: The Big Plan."
/// );
/// assert_eq!(
///     trim_heading_at_sentence_end("Chapter 4: Growth Because you asked for it"),
///     "Chapter 4: Growth"
/// );
/// ```
pub fn trim_heading_at_sentence_end(heading: &str) -> String {
    if let Some(m) = RE_SENTENCE_BOUNDARY.find(heading) {
        return heading[..m.start() + 1].trim().to_string();
    }

    let search_start_chars = match heading.find(':') {
        Some(colon) => char_len(&heading[..colon]) + TITLE_SPAN_AFTER_COLON,
        None => TITLE_SPAN_WITHOUT_COLON,
    };

    if let Some(search_start) = char_to_byte(heading, search_start_chars) {
        if let Some(m) = RE_BODY_START_WORD
            .find_iter(heading)
            .find(|m| m.end() > search_start)
        {
            return heading[..m.start()].trim().to_string();
        }
    }

    heading.to_string()
}

/// Remove a section heading from the leading block so it is not repeated in
/// the body.
pub fn strip_leading_heading(blocks: Vec<String>, heading: &str) -> Vec<String> {
    let Some(first) = blocks.first() else {
        return blocks;
    };
    let first = clean_heading_candidate(first);
    if !first.is_empty() && normalise(&first).starts_with(&normalise(heading)) {
        blocks.into_iter().skip(1).collect()
    } else {
        blocks
    }
}
