//! Input records produced by external collaborators.
//!
//! Page text comes from an extractor, image slots from an image planner.
//! Both are immutable once handed to the pipeline.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Raw text of one extracted page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-based page number in the source document
    pub page_number: u32,
    /// Extracted text, blank lines separating paragraphs
    pub text: String,
}

impl PageText {
    /// Create a page record.
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

/// A unit of body content.
///
/// Upstream stages hand blocks over either as bare strings or as
/// `{"text": ..., ...}` objects. Both forms deserialize into this type; any
/// keys besides `text` are kept in `metadata` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentBlock {
    /// Block text
    pub text: String,
    /// Extra keys carried by the structured form
    pub metadata: Option<Map<String, Value>>,
}

impl ContentBlock {
    /// Create a plain text block.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: None,
        }
    }

    /// Copy of this block with different text and the same metadata.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: self.metadata.clone(),
        }
    }
}

impl AsRef<str> for ContentBlock {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<&str> for ContentBlock {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for ContentBlock {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl Serialize for ContentBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.metadata {
            None => serializer.serialize_str(&self.text),
            Some(metadata) => {
                let mut map = serializer.serialize_map(Some(metadata.len() + 1))?;
                map.serialize_entry("text", &self.text)?;
                for (key, value) in metadata {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            },
        }
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawBlock {
            Text(String),
            Object(Map<String, Value>),
        }

        match RawBlock::deserialize(deserializer)? {
            RawBlock::Text(text) => Ok(Self::new(text)),
            RawBlock::Object(mut map) => {
                let text = match map.remove("text") {
                    Some(Value::String(s)) => s,
                    Some(Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                };
                let metadata = if map.is_empty() { None } else { Some(map) };
                Ok(Self { text, metadata })
            },
        }
    }
}

/// Render status of a planned image slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStatus {
    /// Slot planned, image not generated yet
    #[default]
    Planned,
    /// Image generated successfully
    Rendered,
    /// Image generation failed
    Failed,
}

fn default_slot_type() -> String {
    "generic".to_string()
}

/// An image placement planned for a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSlot {
    /// Unique slot identifier
    pub slot_id: String,
    /// Page the slot belongs to
    pub page_number: u32,
    /// Planner category (e.g. "hero")
    #[serde(default)]
    pub category: String,
    /// Free-form description of the image
    #[serde(default)]
    pub description: String,
    /// Zone hint, matched by the substrings "left"/"right"
    #[serde(default)]
    pub approximate_zone: String,
    /// Planner priority, lower first
    #[serde(default)]
    pub priority: i32,
    /// Render status
    #[serde(default)]
    pub render_status: RenderStatus,
    /// Slot type
    #[serde(rename = "type", default = "default_slot_type")]
    pub slot_type: String,
    /// Caption shown under the image
    #[serde(default)]
    pub caption: String,
}

impl ImageSlot {
    /// Create a planned slot with the given zone hint.
    pub fn planned(slot_id: impl Into<String>, page_number: u32, zone: impl Into<String>) -> Self {
        Self {
            slot_id: slot_id.into(),
            page_number,
            category: String::new(),
            description: String::new(),
            approximate_zone: zone.into(),
            priority: 0,
            render_status: RenderStatus::Planned,
            slot_type: default_slot_type(),
            caption: String::new(),
        }
    }
}

/// Image slots planned for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageImages {
    /// Page number
    pub page_number: u32,
    /// Slots in planner order
    #[serde(default)]
    pub images: Vec<ImageSlot>,
}

/// The image planner's output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImagePlan {
    /// Per-page slot lists
    #[serde(default)]
    pub pages: Vec<PageImages>,
}

impl ImagePlan {
    /// Index the plan by page number. A page listed twice keeps its last entry.
    pub fn by_page(&self) -> BTreeMap<u32, Vec<ImageSlot>> {
        self.pages
            .iter()
            .map(|p| (p.page_number, p.images.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_block_from_string() {
        let block: ContentBlock = serde_json::from_str("\"Plain paragraph\"").unwrap();
        assert_eq!(block.text, "Plain paragraph");
        assert!(block.metadata.is_none());
    }

    #[test]
    fn test_content_block_from_object_keeps_metadata() {
        let block: ContentBlock =
            serde_json::from_str(r#"{"text": "Styled", "style": "callout"}"#).unwrap();
        assert_eq!(block.text, "Styled");
        let metadata = block.metadata.as_ref().unwrap();
        assert_eq!(metadata.get("style"), Some(&Value::String("callout".to_string())));

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["text"], "Styled");
        assert_eq!(json["style"], "callout");
    }

    #[test]
    fn test_content_block_object_without_text() {
        let block: ContentBlock = serde_json::from_str(r#"{"kind": "spacer"}"#).unwrap();
        assert_eq!(block.text, "");
    }

    #[test]
    fn test_plain_block_serializes_as_string() {
        let json = serde_json::to_string(&ContentBlock::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }

    #[test]
    fn test_image_slot_defaults() {
        let slot: ImageSlot = serde_json::from_str(
            r#"{"slot_id": "page3_hero", "page_number": 3, "approximate_zone": "top"}"#,
        )
        .unwrap();
        assert_eq!(slot.slot_type, "generic");
        assert_eq!(slot.render_status, RenderStatus::Planned);
        assert_eq!(slot.caption, "");
    }

    #[test]
    fn test_image_slot_type_field_name() {
        let slot = ImageSlot::planned("s1", 2, "left-mid");
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["type"], "generic");
        assert_eq!(json["render_status"], "planned");
    }

    #[test]
    fn test_image_plan_by_page() {
        let plan = ImagePlan {
            pages: vec![
                PageImages {
                    page_number: 1,
                    images: vec![],
                },
                PageImages {
                    page_number: 4,
                    images: vec![ImageSlot::planned("a", 4, "right")],
                },
            ],
        };
        let by_page = plan.by_page();
        assert_eq!(by_page.len(), 2);
        assert_eq!(by_page[&4][0].slot_id, "a");
    }
}
