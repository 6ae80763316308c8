//! Feature block classification.
//!
//! Body lines are scanned in order for trigger words that open a callout
//! ("Mistake 1: ...", "Tip: ...", a long quotation). Following lines are
//! absorbed into the open callout until another trigger arrives, a new
//! capitalised paragraph starts, or the buffer exceeds its limit. Lines
//! outside any callout come out as bullets or paragraphs.
//!
//! The classifier only groups lines. Trigger words stay in the first item;
//! stripping them is a rendering concern.

use crate::config::StructureConfig;
use crate::text::cleanup::char_len;
use crate::text::patterns::{
    QUOTE_OPENERS, RE_BULLET_LINE, RE_FEATURE_PREFIX, RE_NUMBERED_MARKER,
};
use serde::{Deserialize, Serialize};

/// Kind of callout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeatureKind {
    /// Common mistake warning
    Mistake,
    /// Checklist or action steps
    Checklist,
    /// Tip or note
    Tip,
    /// Pull quote
    Quote,
    /// Chapter summary, never produced by the classifier
    Summary,
}

impl FeatureKind {
    /// Box title shown by renderers.
    pub fn title(&self) -> &'static str {
        match self {
            FeatureKind::Mistake => "Common Mistake",
            FeatureKind::Checklist => "Quick Checklist",
            FeatureKind::Tip => "Pro Tip",
            FeatureKind::Quote => "Insight",
            FeatureKind::Summary => "Key Takeaways",
        }
    }
}

/// Trigger prefixes per kind, checked in this order against the lowercased
/// line with any leading bullet or number removed.
const TRIGGERS: &[(FeatureKind, &[&str])] = &[
    (FeatureKind::Mistake, &["mistake", "common mistake", "trap", "avoid"]),
    (FeatureKind::Checklist, &["checklist", "action step", "do this", "verify"]),
    (FeatureKind::Tip, &["tip", "note", "remember", "pro tip"]),
];

/// A run of lines grouped under one callout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureBlock {
    /// Callout kind
    pub kind: FeatureKind,
    /// Lines in arrival order, the trigger line first
    pub items: Vec<String>,
}

impl FeatureBlock {
    /// A SUMMARY block with the given items.
    pub fn summary<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: FeatureKind::Summary,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Classifier output for one line or callout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifiedLine {
    /// A completed callout
    Feature(FeatureBlock),
    /// A bullet line; `content` is the text after the glyph
    Bullet {
        /// Original line
        text: String,
        /// Text after the bullet glyph
        content: String,
    },
    /// Any other line
    Paragraph {
        /// Original line
        text: String,
    },
}

/// Scanner state threaded through [`FeatureBlockClassifier::step`].
#[derive(Debug, Clone, Default)]
pub struct ScanState {
    open: Option<(FeatureKind, Vec<String>)>,
    output: Vec<ClassifiedLine>,
}

impl ScanState {
    /// Emit the open callout, if any.
    fn flush(&mut self) {
        if let Some((kind, items)) = self.open.take() {
            if !items.is_empty() {
                log::debug!("{:?} block with {} items", kind, items.len());
                self.output.push(ClassifiedLine::Feature(FeatureBlock { kind, items }));
            }
        }
    }

    /// Flush and return everything classified so far.
    pub fn finish(mut self) -> Vec<ClassifiedLine> {
        self.flush();
        self.output
    }
}

/// Groups body lines into callouts.
#[derive(Debug, Clone)]
pub struct FeatureBlockClassifier {
    /// An open callout holding more items than this stops absorbing lines
    pub buffer_limit: usize,
    /// Quoted lines longer than this (in characters) open a QUOTE
    pub quote_min_chars: usize,
}

impl Default for FeatureBlockClassifier {
    fn default() -> Self {
        Self::from_config(&StructureConfig::default())
    }
}

impl FeatureBlockClassifier {
    /// Create a classifier with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier from pipeline configuration.
    pub fn from_config(config: &StructureConfig) -> Self {
        Self {
            buffer_limit: config.feature_buffer_limit,
            quote_min_chars: config.quote_min_chars,
        }
    }

    /// Classify a sequence of lines.
    pub fn classify<I, S>(&self, lines: I) -> Vec<ClassifiedLine>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .fold(ScanState::default(), |state, line| self.step(state, line.as_ref()))
            .finish()
    }

    /// Classify blocks, each split into lines first.
    pub fn classify_blocks<I, S>(&self, blocks: I) -> Vec<ClassifiedLine>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        blocks
            .into_iter()
            .fold(ScanState::default(), |state, block| {
                block
                    .as_ref()
                    .split('\n')
                    .fold(state, |state, line| self.step(state, line))
            })
            .finish()
    }

    /// Feed one line to the scanner.
    pub fn step(&self, mut state: ScanState, line: &str) -> ScanState {
        let line = line.trim();
        if line.is_empty() {
            return state;
        }

        if let Some(kind) = self.trigger(line) {
            state.flush();
            state.open = Some((kind, vec![line.to_string()]));
            return state;
        }

        if let Some((_, items)) = state.open.as_mut() {
            if items.len() <= self.buffer_limit && continues_callout(line) {
                items.push(line.to_string());
                return state;
            }
            state.flush();
        }

        state.output.push(plain_line(line));
        state
    }

    /// Kind of callout `line` opens, if any.
    pub fn trigger(&self, line: &str) -> Option<FeatureKind> {
        let key = RE_FEATURE_PREFIX.replace(line, "").trim().to_lowercase();
        let keyword = TRIGGERS
            .iter()
            .find(|(_, prefixes)| prefixes.iter().any(|p| key.starts_with(p)))
            .map(|(kind, _)| *kind);
        if keyword.is_some() {
            return keyword;
        }

        if line.starts_with(&QUOTE_OPENERS[..]) && char_len(line) > self.quote_min_chars {
            return Some(FeatureKind::Quote);
        }
        None
    }
}

/// Classify lines with default limits.
///
/// ```
/// use folio_oxide::layout::feature_blocks::{classify, ClassifiedLine, FeatureKind};
///
/// let out = classify(["Mistake 1: doing X", "keep doing X", "Normal text"]);
/// assert_eq!(out.len(), 2);
/// match &out[0] {
///     ClassifiedLine::Feature(block) => {
///         assert_eq!(block.kind, FeatureKind::Mistake);
///         assert_eq!(block.items.len(), 2);
///     },
///     other => panic!("unexpected {:?}", other),
/// }
/// assert_eq!(out[1], ClassifiedLine::Paragraph { text: "Normal text".to_string() });
/// ```
pub fn classify<I, S>(lines: I) -> Vec<ClassifiedLine>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    FeatureBlockClassifier::new().classify(lines)
}

/// Whether a line belongs to the open callout: list items and lines that do
/// not start a new capitalised paragraph.
fn continues_callout(line: &str) -> bool {
    RE_BULLET_LINE.is_match(line)
        || RE_NUMBERED_MARKER.is_match(line)
        || !line.chars().next().is_some_and(char::is_uppercase)
}

fn plain_line(line: &str) -> ClassifiedLine {
    match RE_BULLET_LINE.captures(line) {
        Some(caps) => {
            let content = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            let content = if content.is_empty() { line } else { content };
            ClassifiedLine::Bullet {
                text: line.to_string(),
                content: content.to_string(),
            }
        },
        None => ClassifiedLine::Paragraph {
            text: line.to_string(),
        },
    }
}
