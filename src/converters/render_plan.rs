//! Render plan assembly.
//!
//! Turns an aligned layout into the flat item sequence a renderer walks:
//! table of contents, chapter breaks, headings, paragraphs, callouts and
//! figures. Headings too weak to render are folded back into the body, and a
//! SUMMARY callout closes every chapter.

use crate::converters::audience::{
    group_audience_boxes, is_target_audience_section, AudienceCategory, AudienceItem,
};
use crate::converters::paragraphs::{
    merge_into_paragraphs, normalize_content_structure, should_render_heading,
    split_for_side_by_side, strip_feature_trigger,
};
use crate::layout::alignment::{AlignedLayout, AlignedPage, LayoutType};
use crate::layout::feature_blocks::{ClassifiedLine, FeatureBlock, FeatureBlockClassifier};
use crate::model::{ContentBlock, ImageSlot};
use crate::structure::toc::{build_toc_entries, TocEntry};
use crate::structure::types::StructuredDocument;
use crate::text::cleanup::{clean_body_block, normalise};
use serde::{Deserialize, Serialize};

/// Items of the SUMMARY callout closing each chapter.
const SUMMARY_ITEMS: &[&str] = &[
    "Action Item: Review your progress against this chapter.",
    "Next Step: Plan your implementation.",
];

/// The SUMMARY callout emitted at chapter boundaries.
pub fn summary_block() -> FeatureBlock {
    FeatureBlock::summary(SUMMARY_ITEMS.iter().copied())
}

/// One renderable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderItem {
    /// Generated table of contents
    TableOfContents {
        /// Entries in chapter order
        entries: Vec<TocEntry>,
    },
    /// Start a new page
    PageBreak,
    /// Chapter or section heading
    Heading {
        /// Heading text
        text: String,
        /// 1, 2 or 3
        level: u8,
        /// Link target
        anchor: String,
    },
    /// Body paragraph
    Paragraph {
        /// Paragraph text
        text: String,
    },
    /// List entry
    Bullet {
        /// Text without the bullet glyph
        text: String,
    },
    /// Callout box, trigger labels removed from its items
    Feature(FeatureBlock),
    /// Target-audience box
    AudienceBox {
        /// Box category
        category: AudienceCategory,
        /// Box title
        title: String,
        /// Bullets
        items: Vec<String>,
    },
    /// Image, with the paragraphs placed beside it in side-by-side layouts
    Figure {
        /// Planned slot
        slot: ImageSlot,
        /// Page layout
        layout_type: LayoutType,
        /// Paragraphs beside the image
        beside: Vec<String>,
    },
}

/// Render plan for a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    /// Document title, for the cover
    pub document_title: String,
    /// Items in render order
    pub items: Vec<RenderItem>,
}

impl RenderPlan {
    /// Number of chapter headings in the plan.
    pub fn chapter_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, RenderItem::Heading { level: 1, .. }))
            .count()
    }
}

/// Builds [`RenderPlan`]s.
#[derive(Debug, Clone, Default)]
pub struct RenderPlanner {
    classifier: FeatureBlockClassifier,
}

/// Per-document state while walking pages.
#[derive(Debug, Default)]
struct PlanState {
    items: Vec<RenderItem>,
    previous_heading: String,
    chapters_rendered: usize,
}

impl RenderPlanner {
    /// Create a planner with default classifier limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a planner using the given classifier.
    pub fn with_classifier(classifier: FeatureBlockClassifier) -> Self {
        Self { classifier }
    }

    /// Assemble the plan for `layout`, taking chapters and title from `document`.
    pub fn plan(&self, document: &StructuredDocument, layout: &AlignedLayout) -> RenderPlan {
        let mut state = PlanState::default();
        state.items.push(RenderItem::TableOfContents {
            entries: build_toc_entries(&document.chapters, &document.document_title),
        });

        let mut state = layout
            .pages
            .iter()
            .fold(state, |state, page| self.plan_page(state, page));

        if state.chapters_rendered > 0 {
            state.items.push(RenderItem::Feature(summary_block()));
        }

        log::info!(
            "Render plan: {} items, {} chapters",
            state.items.len(),
            state.chapters_rendered
        );

        RenderPlan {
            document_title: document.document_title.clone(),
            items: state.items,
        }
    }

    fn plan_page(&self, mut state: PlanState, page: &AlignedPage) -> PlanState {
        let heading = page.heading.trim();
        let mut body: Vec<String> = merge_into_paragraphs(
            &page
                .body_blocks
                .iter()
                .map(|b| clean_body_block(b))
                .filter(|b| !b.is_empty())
                .collect::<Vec<_>>(),
        );

        let mut rendered_heading = false;
        if !heading.is_empty() && heading != state.previous_heading {
            if should_render_heading(heading, page.heading_level) {
                let anchor = if page.heading_level == 1 {
                    if state.chapters_rendered > 0 {
                        state.items.push(RenderItem::Feature(summary_block()));
                    }
                    if !matches!(state.items.last(), Some(RenderItem::PageBreak)) {
                        state.items.push(RenderItem::PageBreak);
                    }
                    state.chapters_rendered += 1;
                    format!("chapter_{}", state.chapters_rendered)
                } else {
                    format!("section_{}", page.page_number)
                };
                state.items.push(RenderItem::Heading {
                    text: heading.to_string(),
                    level: page.heading_level,
                    anchor,
                });
                rendered_heading = true;
            } else {
                log::debug!("Page {}: heading {:?} folded into body", page.page_number, heading);
                body.insert(0, heading.to_string());
            }
            state.previous_heading = heading.to_string();
        }

        if rendered_heading {
            let heading_norm = normalise(heading);
            body.retain(|b| normalise(b) != heading_norm);
        }

        let image = page.images.first().cloned();
        match image {
            Some(slot) if page.layout_type.is_side_by_side() => {
                let (beside, below) = split_for_side_by_side(&body);
                state.items.push(RenderItem::Figure {
                    slot,
                    layout_type: page.layout_type,
                    beside: beside.to_vec(),
                });
                state.items.extend(self.body_items(below));
            },
            Some(slot) => {
                let mut items = self.body_items(&body);
                let at = items
                    .iter()
                    .position(|item| matches!(item, RenderItem::Paragraph { .. }))
                    .map_or(0, |i| i + 1);
                items.insert(
                    at,
                    RenderItem::Figure {
                        slot,
                        layout_type: page.layout_type,
                        beside: Vec::new(),
                    },
                );
                state.items.extend(items);
            },
            None => state.items.extend(self.body_items(&body)),
        }

        state
    }

    /// Body paragraphs to render items: audience boxes for target-audience
    /// sections, callouts and bullets otherwise.
    fn body_items(&self, paragraphs: &[String]) -> Vec<RenderItem> {
        let blocks: Vec<ContentBlock> = paragraphs.iter().map(|p| ContentBlock::new(p.as_str())).collect();
        let blocks = normalize_content_structure(&blocks);

        if is_target_audience_section(&blocks) {
            return group_audience_boxes(&blocks)
                .into_iter()
                .map(|item| match item {
                    AudienceItem::Box { category, items } => RenderItem::AudienceBox {
                        category,
                        title: category.title().to_string(),
                        items,
                    },
                    AudienceItem::Bullet { text } => RenderItem::Bullet { text },
                    AudienceItem::Paragraph { text } => RenderItem::Paragraph { text },
                })
                .collect();
        }

        self.classifier
            .classify_blocks(&blocks)
            .into_iter()
            .filter_map(|line| match line {
                ClassifiedLine::Feature(block) => {
                    let items: Vec<String> = block
                        .items
                        .iter()
                        .map(|item| strip_feature_trigger(item))
                        .filter(|item| !item.is_empty())
                        .collect();
                    (!items.is_empty()).then(|| {
                        RenderItem::Feature(FeatureBlock {
                            kind: block.kind,
                            items,
                        })
                    })
                },
                ClassifiedLine::Bullet { content, .. } => Some(RenderItem::Bullet { text: content }),
                ClassifiedLine::Paragraph { text } => Some(RenderItem::Paragraph { text }),
            })
            .collect()
    }
}

/// Build a render plan with default settings.
pub fn build_render_plan(document: &StructuredDocument, layout: &AlignedLayout) -> RenderPlan {
    RenderPlanner::new().plan(document, layout)
}
