//! Small text normalization helpers shared by the segmenter, the heading
//! detector and render preparation.

use crate::text::patterns::{
    RE_HORIZONTAL_WS, RE_IMAGE_HINT, RE_IMAGE_HINT_MULTILINE, RE_WHITESPACE,
};

/// Collapse runs of spaces and tabs to a single space. Newlines are kept.
pub fn collapse_horizontal_whitespace(text: &str) -> String {
    RE_HORIZONTAL_WS.replace_all(text, " ").into_owned()
}

/// Collapse every whitespace run (newlines included) to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").into_owned()
}

/// Normalize text for heading comparisons: collapsed, trimmed, lowercased.
///
/// # Examples
///
/// ```
/// use folio_oxide::text::cleanup::normalise;
///
/// assert_eq!(normalise("  Opening\n  Principles "), "opening principles");
/// ```
pub fn normalise(text: &str) -> String {
    collapse_whitespace(text).trim().to_lowercase()
}

/// Prepare a block for heading detection.
///
/// Removes inline `[... Image: ...]` hints and collapses whitespace.
pub fn clean_heading_candidate(text: &str) -> String {
    let without_hints = RE_IMAGE_HINT.replace_all(text, "");
    collapse_whitespace(without_hints.trim())
}

/// Clean a body block before render preparation.
///
/// Strips image hints (including ones spanning lines), collapses horizontal
/// whitespace and spells out the rupee sign, which the render fonts lack.
pub fn clean_body_block(text: &str) -> String {
    let text = RE_IMAGE_HINT_MULTILINE.replace_all(text, "");
    let text = collapse_horizontal_whitespace(text.trim());
    text.replace('₹', "Rs.")
}

/// Whitespace-separated word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Length in characters (not bytes).
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the `n`th character, or `None` past the end.
pub fn char_to_byte(text: &str, n: usize) -> Option<usize> {
    text.char_indices().nth(n).map(|(i, _)| i)
}

/// Title-case every alphabetic run: first letter upper, the rest lower.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
