//! Error types for the structuring pipeline.
//!
//! Only violated invariants are errors. A heading that was missed or a
//! sentence that was promoted to a heading is a heuristic outcome and is
//! never reported here.

/// Result type alias for structuring operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while structuring or aligning a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The structured document has an empty `document_title`.
    #[error("Missing document title: document_title is required")]
    MissingTitle,

    /// No pages survived segmentation and table-of-contents elimination.
    #[error("Empty document: structured document must contain pages")]
    EmptyDocument,

    /// A layout type outside the closed set of four values.
    #[error("Invalid layout type: {0}")]
    InvalidLayoutType(String),

    /// An aligned layout without any pages.
    #[error("Empty layout: aligned layout must contain pages")]
    EmptyLayout,

    /// JSON serialization or deserialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
