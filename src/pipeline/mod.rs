//! Document structuring pipeline.
//!
//! Runs the rule-based stages in order, validating after each one:
//!
//! ```text
//! PageText[] + document title
//!     ↓
//! [StructureBuilder] (segment → detect headings → tag pages → extend ranges)
//!     ↓
//! StructuredDocument ── validate_structure
//!     ↓
//! [resolve] (+ ImagePlan)
//!     ↓
//! AlignedLayout ── validate_layout
//!     ↓
//! [RenderPlanner] (feature blocks, audience boxes, TOC, summaries)
//!     ↓
//! RenderPlan
//! ```
//!
//! Every stage is a pure function of its inputs; the pipeline holds only
//! configuration and can be reused for any number of documents.

use crate::config::StructureConfig;
use crate::converters::render_plan::{RenderPlan, RenderPlanner};
use crate::error::Result;
use crate::layout::alignment::{resolve, validate_layout, AlignedLayout};
use crate::layout::feature_blocks::{ClassifiedLine, FeatureBlockClassifier};
use crate::model::{ImagePlan, PageText};
use crate::structure::builder::{validate_structure, StructureBuilder};
use crate::structure::types::StructuredDocument;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Everything the pipeline produces for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Chapter/section hierarchy
    pub structured_document: StructuredDocument,
    /// Per-page layout
    pub aligned_layout: AlignedLayout,
    /// Renderer input
    pub render_plan: RenderPlan,
}

/// The structuring pipeline.
#[derive(Debug, Clone)]
pub struct StructurePipeline {
    config: StructureConfig,
    builder: StructureBuilder,
    classifier: FeatureBlockClassifier,
}

impl StructurePipeline {
    /// Create a new pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(StructureConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: StructureConfig) -> Self {
        Self {
            builder: StructureBuilder::from_config(&config),
            classifier: FeatureBlockClassifier::from_config(&config),
            config,
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &StructureConfig {
        &self.config
    }

    /// Build and validate the document hierarchy.
    pub fn structure(&self, pages: &[PageText], document_title: &str) -> Result<StructuredDocument> {
        log::info!("Structuring {} pages of {:?}", pages.len(), document_title);
        let document = self.builder.build(pages, document_title);
        validate_structure(&document)?;
        Ok(document)
    }

    /// Resolve and validate page layouts.
    pub fn align(&self, document: &StructuredDocument, images: &ImagePlan) -> Result<AlignedLayout> {
        let layout = resolve(&document.pages, &images.by_page());
        validate_layout(&layout)?;
        Ok(layout)
    }

    /// Classify body blocks into feature blocks, bullets and paragraphs.
    pub fn classify<S: AsRef<str>>(&self, blocks: &[S]) -> Vec<ClassifiedLine> {
        self.classifier.classify_blocks(blocks)
    }

    /// Prepare the render plan for an aligned document.
    pub fn render_plan(&self, document: &StructuredDocument, layout: &AlignedLayout) -> RenderPlan {
        RenderPlanner::with_classifier(self.classifier.clone()).plan(document, layout)
    }

    /// Run every stage.
    pub fn run(
        &self,
        pages: &[PageText],
        document_title: &str,
        images: &ImagePlan,
    ) -> Result<PipelineOutput> {
        let structured_document = self.structure(pages, document_title)?;
        let aligned_layout = self.align(&structured_document, images)?;
        let render_plan = self.render_plan(&structured_document, &aligned_layout);
        Ok(PipelineOutput {
            structured_document,
            aligned_layout,
            render_plan,
        })
    }
}

impl Default for StructurePipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize any pipeline artifact as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Deserialize a pipeline artifact from JSON.
///
/// Use [`crate::layout::aligned_layout_from_json`] for aligned layouts to get
/// [`crate::Error::InvalidLayoutType`] on unknown layout names.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}
