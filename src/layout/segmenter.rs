//! Block segmentation and coalescing.
//!
//! Extracted page text arrives with paragraphs split at arbitrary points:
//! column breaks, page furniture and short fragments all show up as separate
//! blank-line delimited chunks. This module splits on blank lines and then
//! re-joins chunks that belong together.
//!
//! Coalescing is a single left-to-right pass. For each candidate, in order:
//!
//! 1. bullets, numbered items and chapter headings start their own block
//! 2. fragments of three words or fewer are appended to the previous block
//! 3. a candidate following a block that does not end a sentence (and is not
//!    a bullet) continues that block
//! 4. anything else starts a new block
//!
//! Segmenting the output again (joined with blank lines) is a no-op.

use crate::text::cleanup::{collapse_horizontal_whitespace, word_count};
use crate::text::patterns::{
    BULLET_GLYPHS, RE_BLANK_LINE, RE_BULLET_TOKEN, RE_CHAPTER_BLOCK, RE_NUMBERED_MARKER,
    RE_TERMINAL_PUNCT,
};

/// Largest candidate treated as an extraction fragment.
const FRAGMENT_MAX_WORDS: usize = 3;

/// What to do with the next candidate block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coalesce {
    /// Start a new block
    Emit,
    /// Append to the previous block
    Append,
}

/// Split raw page text into cleaned, coalesced blocks.
///
/// # Examples
///
/// ```
/// use folio_oxide::layout::segmenter::segment;
///
/// let blocks = segment("The opening phase sets up\n\nthe whole game for both sides.\n\n• Develop pieces");
/// assert_eq!(
///     blocks,
///     vec![
///         "The opening phase sets up the whole game for both sides.".to_string(),
///         "• Develop pieces".to_string(),
///     ]
/// );
/// ```
pub fn segment(raw_text: &str) -> Vec<String> {
    let text = collapse_horizontal_whitespace(raw_text);
    let candidates = RE_BLANK_LINE
        .split(&text)
        .map(str::trim)
        .filter(|p| !p.is_empty());
    coalesce_blocks(candidates)
}

/// Coalesce already-split paragraph candidates.
pub fn coalesce_blocks<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut merged: Vec<String> = Vec::new();

    for raw in candidates {
        let block = collapse_horizontal_whitespace(raw.as_ref()).trim().to_string();
        if block.is_empty() {
            continue;
        }

        let action = match merged.last() {
            None => Coalesce::Emit,
            Some(prev) => decide(prev, &block),
        };

        match (action, merged.last_mut()) {
            (Coalesce::Append, Some(prev)) => {
                prev.push(' ');
                prev.push_str(&block);
            },
            _ => merged.push(block),
        }
    }

    merged
}

fn decide(prev: &str, block: &str) -> Coalesce {
    if starts_own_block(block) {
        return Coalesce::Emit;
    }

    if word_count(block) <= FRAGMENT_MAX_WORDS {
        return Coalesce::Append;
    }

    if !ends_sentence(prev) && !is_bullet_block(prev) {
        return Coalesce::Append;
    }

    Coalesce::Emit
}

/// Bullets, numbered items and chapter headings are never merged into a
/// preceding block.
pub fn starts_own_block(block: &str) -> bool {
    RE_BULLET_TOKEN.is_match(block)
        || RE_CHAPTER_BLOCK.is_match(block)
        || block.trim_start().starts_with(&BULLET_GLYPHS[..])
        || RE_NUMBERED_MARKER.is_match(block)
}

/// A block that starts with or contains a bullet marker.
pub fn is_bullet_block(block: &str) -> bool {
    RE_BULLET_TOKEN.is_match(block) || block.trim_start().starts_with(&BULLET_GLYPHS[..])
}

/// Ends in `.`, `!`, `?`, `:` or a closing quote.
pub fn ends_sentence(block: &str) -> bool {
    RE_TERMINAL_PUNCT.is_match(block)
}
