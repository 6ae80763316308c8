//! Types of the structured document.
//!
//! Field names are part of the output contract: downstream rendering and
//! verification read these documents as JSON.

use serde::{Deserialize, Serialize};

/// Chapter id used for pages before the first chapter heading.
pub const FRONT_MATTER_ID: &str = "front_matter";

/// Section id used for pages before the first heading of any kind.
pub const INITIAL_SECTION_ID: &str = "section_0";

/// A chapter (level 1), section (level 2) or subsection (level 3) with the
/// page range it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// `chapter_N` or `section_N`
    pub id: String,
    /// Heading text
    pub title: String,
    /// First page tagged with this id
    pub start_page: u32,
    /// Last page tagged with this id
    pub end_page: u32,
    /// 1, 2 or 3
    pub level: u8,
}

impl Section {
    /// Create a record covering a single page.
    pub fn on_page(id: impl Into<String>, title: impl Into<String>, page: u32, level: u8) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_page: page,
            end_page: page,
            level,
        }
    }

    /// Number of pages covered. A record whose end precedes its start
    /// counts as a single page.
    pub fn page_count(&self) -> u32 {
        self.end_page.saturating_sub(self.start_page) + 1
    }

    /// Whether `page` lies within the range.
    pub fn contains_page(&self, page: u32) -> bool {
        (self.start_page..=self.end_page).contains(&page)
    }
}

/// A source page tagged with its place in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredPage {
    /// Source page number
    pub page_number: u32,
    /// Active chapter id, or [`FRONT_MATTER_ID`]
    pub chapter_id: String,
    /// Active section id, or [`INITIAL_SECTION_ID`]
    pub section_id: String,
    /// Heading detected on this page
    pub heading: Option<String>,
    /// Level of `heading`, 0 when there is none
    pub heading_level: u8,
    /// Body blocks with the heading removed
    pub content_blocks: Vec<String>,
    /// Unmodified page text
    pub raw_text: String,
}

impl StructuredPage {
    /// Whether this page precedes the first chapter.
    pub fn is_front_matter(&self) -> bool {
        self.chapter_id == FRONT_MATTER_ID
    }
}

/// The structured document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Document title supplied by the caller
    pub document_title: String,
    /// Level-1 records in detection order
    pub chapters: Vec<Section>,
    /// Level-2 and level-3 records in detection order
    pub sections: Vec<Section>,
    /// Pages in input order, source table-of-contents pages removed
    pub pages: Vec<StructuredPage>,
}

impl StructuredDocument {
    /// Look up a chapter by id.
    pub fn chapter(&self, id: &str) -> Option<&Section> {
        self.chapters.iter().find(|c| c.id == id)
    }

    /// Look up a section by id.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Pages belonging to a chapter, in order.
    pub fn pages_in_chapter<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a StructuredPage> + 'a {
        self.pages.iter().filter(move |p| p.chapter_id == id)
    }
}
