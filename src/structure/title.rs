//! Document title derivation.
//!
//! Titles come from file metadata, the first page, or the file name, in that
//! order. Each candidate is cleaned of file extensions, volume prefixes and
//! underscores before use.

use crate::model::PageText;
use crate::text::cleanup::{char_len, collapse_whitespace, title_case};
use lazy_static::lazy_static;
use regex::Regex;

/// Title used when no candidate survives cleaning.
pub const UNTITLED: &str = "Untitled Ebook";

/// Minimum length of a first-page line accepted as title.
const MIN_FIRST_PAGE_TITLE_CHARS: usize = 4;

lazy_static! {
    static ref RE_FILE_EXTENSION: Regex =
        Regex::new(r"(?i)\.(pdf|docx|doc|txt|ppt|pptx|xlsx)\b").unwrap();
    static ref RE_VOLUME_PREFIX: Regex =
        Regex::new(r"(?i)^\s*(Ebook|Book|Vol|Part|Volume)\s*\d+\s*[:\-]?\s*").unwrap();
}

/// Clean a raw title candidate. Returns an empty string if nothing is left.
///
/// # Examples
///
/// ```
/// use folio_oxide::structure::title::clean_title_candidate;
///
/// assert_eq!(clean_title_candidate("Ebook 01 - chess_for_kids.pdf"), "Chess For Kids");
/// ```
pub fn clean_title_candidate(value: &str) -> String {
    let cleaned = RE_FILE_EXTENSION.replace_all(value, "");
    let cleaned = cleaned.replace('_', " ");
    let cleaned = RE_VOLUME_PREFIX.replace(&cleaned, "");
    let cleaned = collapse_whitespace(&cleaned);
    let cleaned = cleaned.trim_matches(|c: char| matches!(c, ' ' | '-' | '_' | '\t' | '\n' | '\r'));
    title_case(cleaned)
}

/// Pick the document title from the available sources.
pub fn derive_document_title(
    metadata_title: Option<&str>,
    pages: &[PageText],
    file_stem: Option<&str>,
) -> String {
    if let Some(title) = metadata_title
        .map(|t| clean_title_candidate(t.trim()))
        .filter(|t| !t.is_empty())
    {
        log::debug!("Title from metadata: {:?}", title);
        return title;
    }

    let first_page = pages.first().map(|p| p.text.as_str()).unwrap_or_default();
    if let Some(title) = first_page
        .lines()
        .map(clean_title_candidate)
        .find(|line| char_len(line) >= MIN_FIRST_PAGE_TITLE_CHARS)
    {
        log::debug!("Title from first page: {:?}", title);
        return title;
    }

    file_stem
        .map(clean_title_candidate)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| {
            log::warn!("No usable title found, using {:?}", UNTITLED);
            UNTITLED.to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title_candidate() {
        assert_eq!(clean_title_candidate("my_great_book.PDF"), "My Great Book");
        assert_eq!(clean_title_candidate("Vol 3: the endgame"), "The Endgame");
        assert_eq!(clean_title_candidate("  __ - "), "");
    }

    #[test]
    fn test_title_prefers_metadata() {
        let pages = vec![PageText::new(1, "First Page Heading")];
        let title = derive_document_title(Some("chess masterclass"), &pages, Some("file"));
        assert_eq!(title, "Chess Masterclass");
    }

    #[test]
    fn test_title_from_first_page() {
        let pages = vec![PageText::new(1, "\nab\nWinning With The King\nmore")];
        let title = derive_document_title(Some("   "), &pages, Some("file"));
        assert_eq!(title, "Winning With The King");
    }

    #[test]
    fn test_title_from_stem_then_default() {
        assert_eq!(derive_document_title(None, &[], Some("book_2_openings")), "Openings");
        assert_eq!(derive_document_title(None, &[], Some("rook_endings")), "Rook Endings");
        assert_eq!(derive_document_title(None, &[], Some("Ebook 7")), UNTITLED);
        assert_eq!(derive_document_title(None, &[], None), UNTITLED);
    }
}
