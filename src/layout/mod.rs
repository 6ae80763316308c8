//! Layout analysis on extracted page text.
//!
//! This module provides the rule-based stages that turn raw page text into
//! laid-out pages:
//! - Block segmentation and coalescing
//! - Chapter and section heading detection
//! - Page layout resolution against planned image slots
//! - Feature block (callout) classification

pub mod alignment;
pub mod feature_blocks;
pub mod heading_detector;
pub mod segmenter;

// Re-export main types
pub use alignment::{
    aligned_layout_from_json, resolve, resolve_layout_type, validate_layout, AlignedLayout,
    AlignedPage, LayoutType, MAX_IMAGES_PER_PAGE,
};
pub use feature_blocks::{
    classify, ClassifiedLine, FeatureBlock, FeatureBlockClassifier, FeatureKind,
};
pub use heading_detector::{DetectedHeading, HeadingDetector, HeadingLevel};
pub use segmenter::{coalesce_blocks, segment};
