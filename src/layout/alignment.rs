//! Page layout resolution.
//!
//! Combines each structured page with the image slots planned for it and
//! picks one of four fixed arrangements. Text is never reflowed here; the
//! resolver only decides where things go.

use crate::error::{Error, Result};
use crate::model::ImageSlot;
use crate::structure::types::StructuredPage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Images kept per page; further planned slots are dropped.
pub const MAX_IMAGES_PER_PAGE: usize = 1;

/// Arrangement of text and image on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    /// Text only
    FullWidthText,
    /// Image on the left, text on the right
    ImageLeftTextRight,
    /// Image on the right, text on the left
    ImageRightTextLeft,
    /// Image only
    ImageFullWidth,
}

impl LayoutType {
    /// All layout types.
    pub const ALL: [LayoutType; 4] = [
        LayoutType::FullWidthText,
        LayoutType::ImageLeftTextRight,
        LayoutType::ImageRightTextLeft,
        LayoutType::ImageFullWidth,
    ];

    /// Serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutType::FullWidthText => "full_width_text",
            LayoutType::ImageLeftTextRight => "image_left_text_right",
            LayoutType::ImageRightTextLeft => "image_right_text_left",
            LayoutType::ImageFullWidth => "image_full_width",
        }
    }

    /// Whether the layout places an image beside the text.
    pub fn is_side_by_side(&self) -> bool {
        matches!(self, LayoutType::ImageLeftTextRight | LayoutType::ImageRightTextLeft)
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        LayoutType::ALL
            .into_iter()
            .find(|layout| layout.as_str() == s)
            .ok_or_else(|| Error::InvalidLayoutType(s.to_string()))
    }
}

/// A page ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPage {
    /// Source page number
    pub page_number: u32,
    /// Heading text, empty when the page has none
    pub heading: String,
    /// Heading level, 0 when the page has none
    pub heading_level: u8,
    /// Trimmed, non-empty body blocks
    pub body_blocks: Vec<String>,
    /// Chosen arrangement
    pub layout_type: LayoutType,
    /// At most [`MAX_IMAGES_PER_PAGE`] slots
    pub images: Vec<ImageSlot>,
}

/// The aligned document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignedLayout {
    /// Pages in structured order
    pub pages: Vec<AlignedPage>,
}

/// Choose the layout for a page.
///
/// ```
/// use folio_oxide::layout::alignment::{resolve_layout_type, LayoutType};
/// use folio_oxide::model::ImageSlot;
///
/// let body = vec!["Some text".to_string()];
/// let slot = ImageSlot::planned("p2_hero", 2, "left-mid");
/// assert_eq!(resolve_layout_type(&body, &[]), LayoutType::FullWidthText);
/// assert_eq!(resolve_layout_type(&body, &[slot.clone()]), LayoutType::ImageLeftTextRight);
/// assert_eq!(resolve_layout_type(&[], &[slot]), LayoutType::ImageFullWidth);
/// ```
pub fn resolve_layout_type(body_blocks: &[String], images: &[ImageSlot]) -> LayoutType {
    let Some(first) = images.first() else {
        return LayoutType::FullWidthText;
    };
    if body_blocks.is_empty() {
        return LayoutType::ImageFullWidth;
    }
    if first.approximate_zone.to_lowercase().contains("left") {
        LayoutType::ImageLeftTextRight
    } else {
        LayoutType::ImageRightTextLeft
    }
}

/// Align one structured page with its planned slots.
pub fn align_page(page: &StructuredPage, planned: &[ImageSlot]) -> AlignedPage {
    let heading = page.heading.as_deref().unwrap_or_default().trim().to_string();
    let body_blocks: Vec<String> = page
        .content_blocks
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect();

    if planned.len() > MAX_IMAGES_PER_PAGE {
        log::debug!(
            "Page {}: dropping {} extra image slots",
            page.page_number,
            planned.len() - MAX_IMAGES_PER_PAGE
        );
    }
    let images: Vec<ImageSlot> = planned.iter().take(MAX_IMAGES_PER_PAGE).cloned().collect();
    let layout_type = resolve_layout_type(&body_blocks, &images);
    log::debug!("Page {}: layout {}", page.page_number, layout_type);

    AlignedPage {
        page_number: page.page_number,
        heading,
        heading_level: page.heading_level,
        body_blocks,
        layout_type,
        images,
    }
}

/// Align every page. Pages without an entry in `planned_images` get no images.
pub fn resolve(
    pages: &[StructuredPage],
    planned_images: &BTreeMap<u32, Vec<ImageSlot>>,
) -> AlignedLayout {
    let pages: Vec<AlignedPage> = pages
        .iter()
        .map(|page| {
            let planned = planned_images
                .get(&page.page_number)
                .map(Vec::as_slice)
                .unwrap_or_default();
            align_page(page, planned)
        })
        .collect();

    log::info!(
        "Aligned {} pages, {} with images",
        pages.len(),
        pages.iter().filter(|p| !p.images.is_empty()).count()
    );

    AlignedLayout { pages }
}

/// Check the aligned layout's invariants.
pub fn validate_layout(layout: &AlignedLayout) -> Result<()> {
    if layout.pages.is_empty() {
        return Err(Error::EmptyLayout);
    }
    for page in layout.pages.iter().filter(|p| p.images.len() > MAX_IMAGES_PER_PAGE) {
        log::warn!(
            "Page {} carries {} images, renderers use only the first {}",
            page.page_number,
            page.images.len(),
            MAX_IMAGES_PER_PAGE
        );
    }
    Ok(())
}

/// Parse an aligned layout from JSON.
///
/// Unknown `layout_type` values are reported as
/// [`Error::InvalidLayoutType`] rather than a generic JSON error.
pub fn aligned_layout_from_json(json: &str) -> Result<AlignedLayout> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let pages = value.get("pages").and_then(|p| p.as_array());
    for page in pages.into_iter().flatten() {
        match page.get("layout_type") {
            Some(serde_json::Value::String(s)) => {
                LayoutType::from_str(s)?;
            },
            Some(other) => return Err(Error::InvalidLayoutType(other.to_string())),
            None => {},
        }
    }
    Ok(serde_json::from_value(value)?)
}
