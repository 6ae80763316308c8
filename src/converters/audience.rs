//! Target-audience section grouping.
//!
//! "Who this ebook is for" pages are rendered as boxes instead of running
//! text. Label lines switch the current box category; every other line
//! inside a box becomes one of its bullets.

use crate::text::patterns::{RE_BULLET_LINE, RE_FEATURE_PREFIX};
use serde::{Deserialize, Serialize};

/// Leading blocks checked for the section marker.
const DETECTION_BLOCKS: usize = 2;

/// Phrases marking a target-audience section.
const SECTION_MARKERS: &[&str] = &["target audience", "who this ebook is for"];

/// Category triggers, checked in order against the lowercased line.
const CATEGORY_TRIGGERS: &[(AudienceCategory, &[&str])] = &[
    (
        AudienceCategory::For,
        &["primary audience", "who this ebook is for", "target reader"],
    ),
    (
        AudienceCategory::Not,
        &["not cover", "what this ebook will not", "without:"],
    ),
    (
        AudienceCategory::Achieve,
        &["core goal", "will cover", "what you will achieve"],
    ),
];

/// Box category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceCategory {
    /// Running text outside any box
    Intro,
    /// Intended readers
    For,
    /// Readers the book is not meant for
    Not,
    /// Outcomes
    Achieve,
}

impl AudienceCategory {
    /// Box title.
    pub fn title(&self) -> &'static str {
        match self {
            AudienceCategory::Not => "Who This Is NOT For",
            AudienceCategory::Achieve => "What You Will Achieve",
            AudienceCategory::For | AudienceCategory::Intro => "Who This Ebook Is For",
        }
    }
}

/// Output of [`group_audience_boxes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AudienceItem {
    /// A titled box of bullets
    Box {
        /// Box category
        category: AudienceCategory,
        /// Bullet texts, markers removed
        items: Vec<String>,
    },
    /// Bullet outside a box
    Bullet {
        /// Text, marker removed
        text: String,
    },
    /// Plain line outside a box
    Paragraph {
        /// Line text
        text: String,
    },
}

/// Whether the blocks open a target-audience section.
pub fn is_target_audience_section<S: AsRef<str>>(blocks: &[S]) -> bool {
    let sample: String = blocks
        .iter()
        .take(DETECTION_BLOCKS)
        .map(|b| b.as_ref().to_lowercase())
        .collect();
    SECTION_MARKERS.iter().any(|m| sample.contains(m))
}

/// Group a target-audience section into boxes.
///
/// A line mentioning "chapter" closes the current box and is kept as a
/// paragraph.
pub fn group_audience_boxes<S: AsRef<str>>(blocks: &[S]) -> Vec<AudienceItem> {
    let mut out = Vec::new();
    let mut category = AudienceCategory::Intro;
    let mut bullets: Vec<String> = Vec::new();

    let flush = |out: &mut Vec<AudienceItem>, category: AudienceCategory, bullets: &mut Vec<String>| {
        if !bullets.is_empty() {
            out.push(AudienceItem::Box {
                category,
                items: std::mem::take(bullets),
            });
        }
    };

    let lines = blocks.iter().flat_map(|b| b.as_ref().split('\n'));
    for line in lines.map(str::trim).filter(|l| !l.is_empty()) {
        let lower = line.to_lowercase();

        if let Some(next) = category_trigger(&lower) {
            flush(&mut out, category, &mut bullets);
            category = next;
            continue;
        }
        if lower.contains("chapter") {
            flush(&mut out, category, &mut bullets);
            category = AudienceCategory::Intro;
            out.push(AudienceItem::Paragraph {
                text: line.to_string(),
            });
            continue;
        }

        let clean = RE_FEATURE_PREFIX.replace(line, "").trim().to_string();
        if category != AudienceCategory::Intro {
            bullets.push(clean);
        } else if RE_BULLET_LINE.is_match(line) {
            out.push(AudienceItem::Bullet { text: clean });
        } else {
            out.push(AudienceItem::Paragraph {
                text: line.to_string(),
            });
        }
    }

    flush(&mut out, category, &mut bullets);
    out
}

fn category_trigger(lower: &str) -> Option<AudienceCategory> {
    CATEGORY_TRIGGERS
        .iter()
        .find(|(_, phrases)| phrases.iter().any(|p| lower.contains(p)))
        .map(|(category, _)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_section_in_first_two_blocks() {
        assert!(is_target_audience_section(&["Target Audience", "..."]));
        assert!(is_target_audience_section(&["Intro", "Who This Ebook Is For"]));
        assert!(!is_target_audience_section(&["Intro", "More", "Target audience"]));
    }

    #[test]
    fn test_groups_into_boxes() {
        let blocks = [
            "Target Audience",
            "Our primary audience:\n● Club players rated 1200-1800\n● Coaches",
            "This book will not cover:\n- Opening theory",
            "Core goal\n1. Win more endgames",
            "Chapter 1 starts with the basics.",
        ];
        let items = group_audience_boxes(&blocks);

        assert_eq!(
            items,
            vec![
                AudienceItem::Paragraph {
                    text: "Target Audience".to_string()
                },
                AudienceItem::Box {
                    category: AudienceCategory::For,
                    items: vec!["Club players rated 1200-1800".to_string(), "Coaches".to_string()],
                },
                AudienceItem::Box {
                    category: AudienceCategory::Not,
                    items: vec!["Opening theory".to_string()],
                },
                AudienceItem::Box {
                    category: AudienceCategory::Achieve,
                    items: vec!["Win more endgames".to_string()],
                },
                AudienceItem::Paragraph {
                    text: "Chapter 1 starts with the basics.".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_intro_bullets_outside_boxes() {
        let items = group_audience_boxes(&["• A quick note"]);
        assert_eq!(
            items,
            vec![AudienceItem::Bullet {
                text: "A quick note".to_string()
            }]
        );
    }

    #[test]
    fn test_box_titles() {
        assert_eq!(AudienceCategory::For.title(), "Who This Ebook Is For");
        assert_eq!(AudienceCategory::Not.title(), "Who This Is NOT For");
        assert_eq!(AudienceCategory::Achieve.title(), "What You Will Achieve");
    }
}
