//! Chapter/section hierarchy construction.
//!
//! Pages are processed in input order by folding a [`StructureState`]
//! accumulator through [`StructureBuilder::process_page`]. Ids are handed out
//! in first-encountered order and never reused. Once every page is tagged,
//! each record's page range is widened to cover all pages carrying its id.

use crate::config::StructureConfig;
use crate::error::{Error, Result};
use crate::layout::heading_detector::{
    strip_leading_heading, DetectedHeading, HeadingDetector, HeadingLevel,
};
use crate::layout::segmenter::segment;
use crate::model::PageText;
use crate::structure::toc::is_source_toc;
use crate::structure::types::{
    Section, StructuredDocument, StructuredPage, FRONT_MATTER_ID, INITIAL_SECTION_ID,
};
use std::collections::HashMap;

/// Running state of one structuring pass.
#[derive(Debug, Clone)]
pub struct StructureState {
    chapter_index: usize,
    section_index: usize,
    current_chapter_id: String,
    current_section_id: String,
    chapters: Vec<Section>,
    sections: Vec<Section>,
    pages: Vec<StructuredPage>,
}

impl Default for StructureState {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureState {
    /// State before the first page: front matter, no headings seen.
    pub fn new() -> Self {
        Self {
            chapter_index: 0,
            section_index: 0,
            current_chapter_id: FRONT_MATTER_ID.to_string(),
            current_section_id: INITIAL_SECTION_ID.to_string(),
            chapters: Vec::new(),
            sections: Vec::new(),
            pages: Vec::new(),
        }
    }

    /// Pages tagged so far.
    pub fn pages(&self) -> &[StructuredPage] {
        &self.pages
    }

    /// Allocate ids and records for a heading found on `page_number`.
    fn open_heading(&mut self, heading: &DetectedHeading, page_number: u32) {
        match heading.level {
            HeadingLevel::Chapter => {
                // A chapter also opens a level-2 section with the same title.
                self.chapter_index += 1;
                self.section_index += 1;
                self.current_chapter_id = format!("chapter_{}", self.chapter_index);
                self.current_section_id = format!("section_{}", self.section_index);
                self.chapters.push(Section::on_page(
                    &self.current_chapter_id,
                    &heading.text,
                    page_number,
                    HeadingLevel::Chapter.as_u8(),
                ));
                self.sections.push(Section::on_page(
                    &self.current_section_id,
                    &heading.text,
                    page_number,
                    HeadingLevel::Section.as_u8(),
                ));
            },
            HeadingLevel::Section | HeadingLevel::Subsection => {
                self.section_index += 1;
                self.current_section_id = format!("section_{}", self.section_index);
                self.sections.push(Section::on_page(
                    &self.current_section_id,
                    &heading.text,
                    page_number,
                    heading.level.as_u8(),
                ));
            },
        }
    }

    /// Widen page ranges and assemble the document.
    pub fn finish(mut self, document_title: &str) -> StructuredDocument {
        extend_ranges(&mut self.chapters, &self.pages, |p| &p.chapter_id);
        extend_ranges(&mut self.sections, &self.pages, |p| &p.section_id);

        log::info!(
            "Structured {} pages into {} chapters and {} sections",
            self.pages.len(),
            self.chapters.len(),
            self.sections.len()
        );

        StructuredDocument {
            document_title: document_title.to_string(),
            chapters: self.chapters,
            sections: self.sections,
            pages: self.pages,
        }
    }
}

/// Builds a [`StructuredDocument`] from extracted pages.
#[derive(Debug, Clone, Default)]
pub struct StructureBuilder {
    detector: HeadingDetector,
}

impl StructureBuilder {
    /// Create a builder with default heading thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from pipeline configuration.
    pub fn from_config(config: &StructureConfig) -> Self {
        Self {
            detector: HeadingDetector::from_config(config),
        }
    }

    /// Structure a whole document in one pass.
    pub fn build(&self, pages: &[PageText], document_title: &str) -> StructuredDocument {
        pages
            .iter()
            .fold(StructureState::new(), |state, page| self.process_page(state, page))
            .finish(document_title)
    }

    /// Fold step: segment one page, detect its heading and tag it.
    ///
    /// Pages without text and source table-of-contents pages leave the state
    /// unchanged.
    pub fn process_page(&self, mut state: StructureState, page: &PageText) -> StructureState {
        let blocks = segment(&page.text);
        let Some(first) = blocks.first() else {
            log::debug!("Skipping empty page {}", page.page_number);
            return state;
        };

        if is_source_toc(first) {
            log::info!("Skipping source TOC page {}", page.page_number);
            return state;
        }

        let (heading, heading_level, content_blocks) = match self.detector.detect(&blocks) {
            Some(detected) => {
                log::debug!(
                    "Page {}: level {} heading {:?}",
                    page.page_number,
                    detected.level.as_u8(),
                    detected.text
                );
                state.open_heading(&detected, page.page_number);
                let content = if detected.consumed_blocks > 0 {
                    blocks.into_iter().skip(detected.consumed_blocks).collect()
                } else {
                    strip_leading_heading(blocks, &detected.text)
                };
                (Some(detected.text), detected.level.as_u8(), content)
            },
            None => (None, 0, blocks),
        };

        state.pages.push(StructuredPage {
            page_number: page.page_number,
            chapter_id: state.current_chapter_id.clone(),
            section_id: state.current_section_id.clone(),
            heading,
            heading_level,
            content_blocks,
            raw_text: page.text.clone(),
        });

        state
    }
}

/// Structure pages with default settings.
///
/// # Examples
///
/// ```
/// use folio_oxide::model::PageText;
/// use folio_oxide::structure::build_structure;
///
/// let pages = vec![
///     PageText::new(1, "Welcome to the academy."),
///     PageText::new(2, "Chapter 1: Opening Principles\n\n• Develop your pieces first"),
///     PageText::new(3, "Keep the king safe."),
/// ];
/// let doc = build_structure(&pages, "Chess Basics");
///
/// assert_eq!(doc.chapters.len(), 1);
/// assert_eq!(doc.chapters[0].start_page, 2);
/// assert_eq!(doc.chapters[0].end_page, 3);
/// assert_eq!(doc.pages[0].chapter_id, "front_matter");
/// ```
pub fn build_structure(pages: &[PageText], document_title: &str) -> StructuredDocument {
    StructureBuilder::new().build(pages, document_title)
}

/// Check the structured document's invariants.
///
/// A title made only of whitespace counts as missing.
pub fn validate_structure(document: &StructuredDocument) -> Result<()> {
    if document.document_title.trim().is_empty() {
        return Err(Error::MissingTitle);
    }
    if document.pages.is_empty() {
        return Err(Error::EmptyDocument);
    }
    Ok(())
}

/// Set each record's range to the min/max page number tagged with its id.
fn extend_ranges<F>(items: &mut [Section], pages: &[StructuredPage], page_key: F)
where
    F: Fn(&StructuredPage) -> &String,
{
    let mut by_id: HashMap<&str, (u32, u32)> = HashMap::new();
    for page in pages {
        let range = by_id
            .entry(page_key(page).as_str())
            .or_insert((page.page_number, page.page_number));
        range.0 = range.0.min(page.page_number);
        range.1 = range.1.max(page.page_number);
    }

    for item in items.iter_mut() {
        if let Some(&(start, end)) = by_id.get(item.id.as_str()) {
            item.start_page = start;
            item.end_page = end;
        }
    }
}
