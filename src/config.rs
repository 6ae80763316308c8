//! Configuration for the structuring pipeline.
//!
//! Every tunable threshold the heuristics rely on lives here. The defaults are the
//! values the pipeline is calibrated for; changing them changes output.

/// Thresholds shared by the heading detector and the feature-block classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureConfig {
    /// Number of leading blocks examined for a section heading.
    pub section_scan_depth: usize,

    /// Minimum length (in characters) of a section heading.
    pub min_heading_chars: usize,

    /// Maximum length (in characters) of a section heading.
    pub max_heading_chars: usize,

    /// Largest fraction of all-lowercase words a section heading may have.
    pub max_lowercase_ratio: f32,

    /// Buffered items after which an open feature block stops absorbing lines.
    pub feature_buffer_limit: usize,

    /// A quoted line must be longer than this to open a QUOTE block.
    pub quote_min_chars: usize,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            section_scan_depth: 3,
            min_heading_chars: 12,
            max_heading_chars: 90,
            max_lowercase_ratio: 0.75,
            feature_buffer_limit: 8,
            quote_min_chars: 60,
        }
    }

    /// Set the number of leading blocks scanned for section headings.
    pub fn with_section_scan_depth(mut self, depth: usize) -> Self {
        self.section_scan_depth = depth;
        self
    }

    /// Set the accepted section heading length range.
    pub fn with_heading_length(mut self, min_chars: usize, max_chars: usize) -> Self {
        self.min_heading_chars = min_chars;
        self.max_heading_chars = max_chars;
        self
    }

    /// Set the maximum lowercase-word ratio for section headings.
    pub fn with_max_lowercase_ratio(mut self, ratio: f32) -> Self {
        self.max_lowercase_ratio = ratio;
        self
    }

    /// Set the feature block buffer limit.
    pub fn with_feature_buffer_limit(mut self, limit: usize) -> Self {
        self.feature_buffer_limit = limit;
        self
    }

    /// Set the minimum quote length.
    pub fn with_quote_min_chars(mut self, chars: usize) -> Self {
        self.quote_min_chars = chars;
        self
    }
}
