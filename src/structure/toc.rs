//! Table-of-contents handling.
//!
//! Source documents often carry their own table of contents, which is
//! dropped during structuring; a fresh one is built from the detected
//! chapters instead.

use crate::structure::types::Section;
use crate::text::cleanup::collapse_whitespace;
use crate::text::patterns::{RE_CHAPTER_PREFIX, RE_SOURCE_TOC};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Whether a page's first block marks a source table of contents.
pub fn is_source_toc(first_block: &str) -> bool {
    RE_SOURCE_TOC.is_match(first_block.trim())
}

/// One line of the generated table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// 1-based position
    pub number: usize,
    /// Chapter title
    pub title: String,
    /// Link target, `chapter_<number>`
    pub destination: String,
}

/// Build TOC entries from detected chapters.
///
/// Only titles that start with a chapter/part label are listed. Titles equal
/// to the document title and repeated titles are skipped.
pub fn build_toc_entries(chapters: &[Section], document_title: &str) -> Vec<TocEntry> {
    let title_norm = collapse_whitespace(document_title).trim().to_lowercase();
    let mut seen: HashSet<String> = HashSet::new();
    let mut entries = Vec::new();

    for chapter in chapters {
        let title = collapse_whitespace(&chapter.title).trim().to_string();
        if title.is_empty() || title.to_lowercase() == title_norm || seen.contains(&title) {
            continue;
        }
        if !RE_CHAPTER_PREFIX.is_match(&title) {
            log::debug!("TOC skips non-chapter title {:?}", title);
            continue;
        }
        seen.insert(title.clone());
        let number = entries.len() + 1;
        entries.push(TocEntry {
            number,
            title,
            destination: format!("chapter_{}", number),
        });
    }

    entries
}
