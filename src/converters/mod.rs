//! Render preparation.
//!
//! Converts an aligned layout into renderer-ready items:
//! - **Paragraphs**: bullet normalization and paragraph re-flow
//! - **Audience**: box grouping for target-audience sections
//! - **Render plan**: the ordered item sequence, with a generated table of
//!   contents, chapter breaks and SUMMARY callouts
//!
//! No output format is produced here; renderers walk the [`RenderPlan`].

pub mod audience;
pub mod paragraphs;
pub mod render_plan;

// Re-export main types
pub use audience::{
    group_audience_boxes, is_target_audience_section, AudienceCategory, AudienceItem,
};
pub use paragraphs::{
    merge_into_paragraphs, normalize_content_structure, should_render_heading,
    split_for_side_by_side, strip_feature_trigger,
};
pub use render_plan::{build_render_plan, summary_block, RenderItem, RenderPlan, RenderPlanner};
