//! Document hierarchy.
//!
//! Builds the chapter/section hierarchy of a document from its extracted
//! pages. Headings are detected per page; every page is tagged with the
//! chapter and section active at that point, and each chapter and section
//! records the page range it spans.
//!
//! ## Example
//!
//! ```
//! use folio_oxide::model::PageText;
//! use folio_oxide::structure::{build_structure, validate_structure};
//!
//! let pages = vec![
//!     PageText::new(1, "Table of Contents\n\nChapter 1 ..... 2"),
//!     PageText::new(2, "Chapter 1: Opening Principles\n\n• Control the center"),
//! ];
//! let doc = build_structure(&pages, "Chess Basics");
//! validate_structure(&doc).unwrap();
//!
//! assert_eq!(doc.pages.len(), 1);
//! assert_eq!(doc.pages[0].chapter_id, "chapter_1");
//! ```

pub mod builder;
pub mod title;
pub mod toc;
pub mod types;

// Re-export main types
pub use builder::{build_structure, validate_structure, StructureBuilder, StructureState};
pub use title::{clean_title_candidate, derive_document_title};
pub use toc::{build_toc_entries, is_source_toc, TocEntry};
pub use types::{Section, StructuredDocument, StructuredPage, FRONT_MATTER_ID, INITIAL_SECTION_ID};
