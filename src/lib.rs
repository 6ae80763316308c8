// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::type_complexity)]
#![allow(clippy::should_implement_trait)]

//! # Folio Oxide
//!
//! Rule-based document structuring for automated ebook publishing.
//!
//! Extracted page text carries no font or geometry information, so every
//! decision here is made from wording alone: blank-line blocks, chapter
//! labels, capitalisation and a handful of trigger phrases.
//!
//! ## Stages
//!
//! - **Block segmentation**: raw page text → cleaned, coalesced blocks
//!   ([`layout::segmenter`])
//! - **Hierarchy**: chapter and section headings, page tagging and page
//!   ranges ([`structure`])
//! - **Layout alignment**: one of four page arrangements per page, given the
//!   planned image slots ([`layout::alignment`])
//! - **Feature blocks**: MISTAKE / CHECKLIST / TIP / QUOTE callouts
//!   ([`layout::feature_blocks`])
//! - **Render preparation**: paragraph re-flow, audience boxes, generated
//!   table of contents and chapter summaries ([`converters`])
//!
//! ## Quick Start
//!
//! ```
//! use folio_oxide::model::{ImagePlan, PageText};
//! use folio_oxide::pipeline::StructurePipeline;
//!
//! # fn main() -> folio_oxide::Result<()> {
//! let pages = vec![
//!     PageText::new(1, "Chapter 1: Opening Principles\n\n• Control the center\n\n• Develop knights"),
//!     PageText::new(2, "Mistake 1: moving the queen early\n\nit gets chased around the board"),
//! ];
//!
//! let output = StructurePipeline::new().run(&pages, "Chess Basics", &ImagePlan::default())?;
//! assert_eq!(output.structured_document.chapters.len(), 1);
//! assert_eq!(output.aligned_layout.pages.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 (<http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license (<http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Input records
pub mod model;

// Text primitives
pub mod text;

// Segmentation, headings, alignment, feature blocks
pub mod layout;

// Document hierarchy
pub mod structure;

// Render preparation
pub mod converters;

// Orchestration
pub mod pipeline;

// Re-exports
pub use config::StructureConfig;
pub use error::{Error, Result};
pub use layout::{AlignedLayout, AlignedPage, ClassifiedLine, FeatureBlock, FeatureKind, LayoutType};
pub use model::{ContentBlock, ImagePlan, ImageSlot, PageText};
pub use pipeline::{PipelineOutput, StructurePipeline};
pub use structure::{Section, StructuredDocument, StructuredPage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
