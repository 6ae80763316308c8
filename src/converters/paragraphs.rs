//! Body text normalization for rendering.
//!
//! Aligned body blocks still carry extraction noise: mixed bullet glyphs,
//! bullets glued into running text and paragraphs broken across lines. The
//! functions here turn them into one clean item per paragraph or list entry.

use crate::model::ContentBlock;
use crate::text::cleanup::{char_len, collapse_whitespace};
use crate::text::patterns::{
    QUOTE_OPENERS, RE_CHAPTER_PREFIX, RE_CHECKLIST_LABEL, RE_FEATURE_TRIGGER, RE_GLYPH_ARTIFACT,
    RE_INLINE_BULLET, RE_LEADING_BULLET, RE_LEADING_BULLET_SPACED, RE_LIST_ITEM, RE_TIP_LABEL,
    RE_TRAILING_INLINE_BULLET,
};

/// Shorter non-chapter headings are folded into the body.
const MIN_RENDERED_HEADING_CHARS: usize = 12;

/// Lines longer than this never start a heading-like block.
const MAX_HEADING_START_CHARS: usize = 100;

/// Blocks placed beside an image in side-by-side layouts.
const SIDE_BY_SIDE_BLOCKS: usize = 3;

const LEADING_BULLET_CHARS: &[char] = &['●', '▪', '►', '*', ' '];

/// Normalize bullets and split blocks into one block per line.
///
/// Doubled glyph artifacts are stripped, leading bullet variants become
/// `"• "`, bullets surrounded by spaces move onto their own line. Metadata of
/// structured blocks is copied to every line split from them.
pub fn normalize_content_structure(blocks: &[ContentBlock]) -> Vec<ContentBlock> {
    let mut normalized = Vec::new();

    for block in blocks {
        if block.text.trim().is_empty() {
            continue;
        }

        let text = RE_GLYPH_ARTIFACT.replace(&block.text, "");
        let text = RE_LEADING_BULLET.replace(&text, "• ");
        let text = RE_INLINE_BULLET.replace_all(&text, "${1}\n•${2}");

        for line in text.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
            let line = if RE_LEADING_BULLET.is_match(line) {
                format!("• {}", line.trim_start_matches(LEADING_BULLET_CHARS))
            } else {
                line.to_string()
            };
            normalized.push(block.with_text(line));
        }
    }

    normalized
}

/// Whether a line is a bullet or `1.` numbered list item.
pub fn looks_like_list_item(text: &str) -> bool {
    RE_LIST_ITEM.is_match(text.trim())
}

/// Whether a line should stand alone instead of joining a paragraph.
pub fn looks_like_heading_start(text: &str) -> bool {
    let t = text.trim();
    if t.is_empty() || char_len(t) > MAX_HEADING_START_CHARS {
        return false;
    }
    if RE_CHAPTER_PREFIX.is_match(t)
        || RE_TIP_LABEL.is_match(t)
        || t.starts_with(&QUOTE_OPENERS[..])
        || RE_CHECKLIST_LABEL.is_match(t)
    {
        return true;
    }

    let starts_upper = t.chars().next().is_some_and(char::is_uppercase);
    t.split_whitespace().count() <= 2
        && starts_upper
        && (t.ends_with(':') || !t.ends_with(&['.', '!', '?'][..]))
}

/// Re-flow body blocks into paragraphs.
///
/// Bullets glued to text are split onto their own lines first. Consecutive
/// regular lines are joined with single spaces; list items and heading-like
/// lines stand alone. An empty block ends the current paragraph.
///
/// ```
/// use folio_oxide::converters::paragraphs::merge_into_paragraphs;
///
/// let merged = merge_into_paragraphs(&["The king is a fighting\npiece in endgames.", "key ideas ● Activate it"]);
/// assert_eq!(
///     merged,
///     vec![
///         "The king is a fighting piece in endgames. key ideas".to_string(),
///         "• Activate it".to_string(),
///     ]
/// );
/// ```
pub fn merge_into_paragraphs<S: AsRef<str>>(blocks: &[S]) -> Vec<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    fn flush(current: &mut Vec<String>, paragraphs: &mut Vec<String>) {
        if current.is_empty() {
            return;
        }
        let merged = collapse_whitespace(&current.join(" ")).trim().to_string();
        if !merged.is_empty() {
            paragraphs.push(merged);
        }
        current.clear();
    }

    for block in blocks {
        let stripped = block.as_ref().trim();
        if stripped.is_empty() {
            flush(&mut current, &mut paragraphs);
            continue;
        }

        let split = RE_TRAILING_INLINE_BULLET.replace_all(stripped, "${1}\n• ");
        let split = RE_LEADING_BULLET_SPACED.replace(&split, "• ");

        for line in split.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
            if looks_like_list_item(line) || looks_like_heading_start(line) {
                flush(&mut current, &mut paragraphs);
                paragraphs.push(line.to_string());
            } else {
                current.push(line.to_string());
            }
        }
    }

    flush(&mut current, &mut paragraphs);
    paragraphs
}

/// Remove a leading "Mistake 2:" / "Tip -" / "Checklist:" / "Note:" label.
pub fn strip_feature_trigger(item: &str) -> String {
    RE_FEATURE_TRIGGER.replace(item, "").trim().to_string()
}

/// Whether a page heading is rendered as a heading.
///
/// Level-1 headings need a chapter/part label; other headings need at
/// least 12 characters unless they carry one.
pub fn should_render_heading(heading: &str, level: u8) -> bool {
    let h = heading.trim();
    if h.is_empty() {
        return false;
    }
    let is_chapter = RE_CHAPTER_PREFIX.is_match(h);
    if level == 1 {
        return is_chapter;
    }
    char_len(h) >= MIN_RENDERED_HEADING_CHARS || is_chapter
}

/// Split blocks into the part placed beside an image and the remainder.
pub fn split_for_side_by_side<T>(blocks: &[T]) -> (&[T], &[T]) {
    blocks.split_at(blocks.len().min(SIDE_BY_SIDE_BLOCKS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};

    fn texts(blocks: &[ContentBlock]) -> Vec<&str> {
        blocks.iter().map(|b| b.text.as_str()).collect()
    }

    #[test]
    fn test_normalize_strips_artifacts_and_unifies_bullets() {
        let blocks = vec![
            ContentBlock::new("■■ Common Mistake"),
            ContentBlock::new("► Trade when ahead"),
            ContentBlock::new("   "),
        ];
        let normalized = normalize_content_structure(&blocks);
        assert_eq!(texts(&normalized), vec!["Common Mistake", "• Trade when ahead"]);
    }

    #[test]
    fn test_normalize_splits_inline_bullets() {
        let blocks = vec![ContentBlock::new("Remember: ● pins ● forks • skewers")];
        let normalized = normalize_content_structure(&blocks);
        assert_eq!(texts(&normalized), vec!["Remember:", "• pins", "• forks", "• skewers"]);
    }

    #[test]
    fn test_normalize_keeps_metadata() {
        let mut metadata = Map::new();
        metadata.insert("style".to_string(), Value::String("callout".to_string()));
        let block = ContentBlock {
            text: "first\nsecond".to_string(),
            metadata: Some(metadata),
        };
        let normalized = normalize_content_structure(&[block]);
        assert_eq!(normalized.len(), 2);
        assert!(normalized.iter().all(|b| b.metadata.is_some()));
    }

    #[test]
    fn test_heading_start_detection() {
        assert!(looks_like_heading_start("Chapter 2: Tactics"));
        assert!(looks_like_heading_start("Tip: stay calm"));
        assert!(looks_like_heading_start("\"Quoted opener"));
        assert!(looks_like_heading_start("Key Ideas:"));
        assert!(looks_like_heading_start("Summary"));
        assert!(!looks_like_heading_start("Done."));
        assert!(!looks_like_heading_start("the pawn structure decides plans"));
    }

    #[test]
    fn test_merge_keeps_list_items_separate() {
        let merged = merge_into_paragraphs(&[
            "Develop your pieces quickly",
            "and castle early in the game.",
            "",
            "1. Move a center pawn",
            "- Bring out knights",
        ]);
        assert_eq!(
            merged,
            vec![
                "Develop your pieces quickly and castle early in the game.".to_string(),
                "1. Move a center pawn".to_string(),
                "- Bring out knights".to_string(),
            ]
        );
    }

    #[test]
    fn test_merge_empty() {
        let empty: [&str; 0] = [];
        assert!(merge_into_paragraphs(&empty).is_empty());
    }

    #[test]
    fn test_strip_feature_trigger() {
        assert_eq!(strip_feature_trigger("Mistake 2: moving the queen early"), "moving the queen early");
        assert_eq!(strip_feature_trigger("tip - breathe"), "breathe");
        assert_eq!(strip_feature_trigger("Checklist"), "");
        assert_eq!(strip_feature_trigger("Common mistake here"), "Common mistake here");
    }

    #[test]
    fn test_should_render_heading() {
        assert!(should_render_heading("Chapter 1: Openings", 1));
        assert!(!should_render_heading("Opening Principles", 1));
        assert!(should_render_heading("Opening Principles", 2));
        assert!(!should_render_heading("Short Head", 2));
        assert!(should_render_heading("Part II", 2));
        assert!(!should_render_heading("   ", 2));
    }

    #[test]
    fn test_split_for_side_by_side() {
        let blocks = ["a", "b"];
        assert_eq!(split_for_side_by_side(&blocks), (&blocks[..], &[][..]));

        let blocks = ["a", "b", "c", "d", "e"];
        let (beside, below) = split_for_side_by_side(&blocks);
        assert_eq!(beside, &["a", "b", "c"]);
        assert_eq!(below, &["d", "e"]);
    }
}
