//! Compiled pattern tables shared by every stage.
//!
//! All patterns are compiled once on first use and only ever read afterwards.
//! The literal sources are part of the behavior: changing one changes which
//! blocks become headings, bullets or feature callouts.

use lazy_static::lazy_static;
use regex::Regex;

/// Glyphs treated as bullet markers at the start of a block.
pub const BULLET_GLYPHS: [char; 6] = ['●', '•', '▪', '►', '-', '*'];

/// Opening quotation marks that can start a QUOTE feature block.
pub const QUOTE_OPENERS: [char; 4] = ['"', '“', '‘', '\''];

lazy_static! {
    /// Runs of horizontal whitespace
    pub static ref RE_HORIZONTAL_WS: Regex = Regex::new(r"[ \t]+").unwrap();

    /// Any whitespace run
    pub static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    /// Blank-line paragraph boundary
    pub static ref RE_BLANK_LINE: Regex = Regex::new(r"\n\s*\n").unwrap();

    /// Heading of a source table of contents page
    pub static ref RE_SOURCE_TOC: Regex = Regex::new(r"(?i)^Table\s+of\s+Contents\b").unwrap();

    /// "Chapter 3" / "Part IV" at the very start of a block
    pub static ref RE_CHAPTER_PREFIX: Regex =
        Regex::new(r"(?i)^(Chapter|Part)\s+(\d+|[IVXLC]+)\b").unwrap();

    /// Complete chapter heading: label, number, optional colon, title text
    pub static ref RE_CHAPTER_HEADING: Regex =
        Regex::new(r"(?i)^(Chapter|Part)\s+(\d+|[IVXLC]+)\s*:?\s+.+$").unwrap();

    /// Chapter heading spanning lines, used when deciding block boundaries
    pub static ref RE_CHAPTER_BLOCK: Regex =
        Regex::new(r"(?is)^(Chapter|Part)\s+(\d+|[IVXLC]+)\s*:?\s+.+$").unwrap();

    /// Bullet token at the start of a block or after whitespace
    pub static ref RE_BULLET_TOKEN: Regex = Regex::new(r"(?:^|\s)[•●]\s+").unwrap();

    /// Numbered list marker such as "1." or "2)"
    pub static ref RE_NUMBERED_MARKER: Regex = Regex::new(r"^\d+[.)]\s").unwrap();

    /// Bullet glyph or "a)" / "1)" style list prefix
    pub static ref RE_BULLET_PREFIX: Regex =
        Regex::new(r"^[-*•▪●►]|^[^A-Za-z0-9]*[A-Za-z0-9]?\)").unwrap();

    /// Inline "[... Image: ...]" placement hint left by upstream stages
    pub static ref RE_IMAGE_HINT: Regex = Regex::new(r"(?i)\[\s*.*?Image:.*?\]").unwrap();

    /// Image hint spanning lines, possibly prefixed by a camera/picture emoji
    pub static ref RE_IMAGE_HINT_MULTILINE: Regex =
        Regex::new(r"(?is)\[\s*.*?[📷🖼️📸]*\s*Image:.*?\]").unwrap();

    /// URLs and e-mail addresses never form headings
    pub static ref RE_BAD_HEADING: Regex = Regex::new(r"(?i)(www\.|http|@|mailto:)").unwrap();

    /// "A." or "1." subsection marker
    pub static ref RE_SUBSECTION: Regex = Regex::new(r"^([A-Z]\.|[0-9]+\.)\s+").unwrap();

    /// Alphabetic word used for heading statistics
    pub static ref RE_HEADING_WORD: Regex = Regex::new(r"[A-Za-z][A-Za-z'\-]*").unwrap();

    /// Sentence terminator followed by the start of a new sentence
    pub static ref RE_SENTENCE_BOUNDARY: Regex = Regex::new(r"[.!?]\s+[A-Z]").unwrap();

    /// Words that almost always open a body sentence rather than continue a title
    pub static ref RE_BODY_START_WORD: Regex = Regex::new(concat!(
        r"\b(?:If|One|Many|By|You|We|This|That|When|So|But|And|Or|Most|",
        r"Some|However|Whether|Running|People|Everyone|For|Let|Think|",
        r"Here|Now|Once|What|Why|How|Because|It|They|She|He|Our|Your|",
        r"In|On|At|The|A|An|As|Do|Did|Has|Have|Had|Are|Is|Was|Were|",
        r"Not|No|From|To|With|About|After|Before|During|Until|Since)\b",
    ))
    .unwrap();

    /// Block ends a sentence (trailing whitespace ignored)
    pub static ref RE_TERMINAL_PUNCT: Regex = Regex::new(r#"[.!?:"]\s*$"#).unwrap();

    /// Leading bullet/number characters removed before trigger matching
    pub static ref RE_FEATURE_PREFIX: Regex = Regex::new(r"^[●•▪►*?\-\d.]+\s*").unwrap();

    /// Bullet line with its content captured
    pub static ref RE_BULLET_LINE: Regex = Regex::new(r"^[●•▪►*?\-]\s*(.*)").unwrap();

    /// Trigger label at the start of a feature item ("Mistake 2:", "Tip -")
    pub static ref RE_FEATURE_TRIGGER: Regex =
        Regex::new(r"(?i)^(Mistake \d+|Tip|Checklist|Note)[:\s\-]*").unwrap();

    /// Doubled glyph artifacts in front of headings ("■■ Common Mistake")
    pub static ref RE_GLYPH_ARTIFACT: Regex = Regex::new(r"^[■●►]{2,}\s*").unwrap();

    /// Leading bullet variant to unify
    pub static ref RE_LEADING_BULLET: Regex = Regex::new(r"^[●▪►*]\s*").unwrap();

    /// Bullet surrounded by whitespace in the middle of a line
    pub static ref RE_INLINE_BULLET: Regex = Regex::new(r"(\s+)[●•▪►*](\s+)").unwrap();

    /// Bullet glued to the preceding text
    pub static ref RE_TRAILING_INLINE_BULLET: Regex = Regex::new(r"([^\n])\s*[●•▪►*]\s+").unwrap();

    /// Leading bullet followed by whitespace
    pub static ref RE_LEADING_BULLET_SPACED: Regex = Regex::new(r"^[●•▪►*]\s+").unwrap();

    /// List item: bullet glyph or "1." followed by whitespace
    pub static ref RE_LIST_ITEM: Regex = Regex::new(r"^(?:[●•▪►*?\-]|\d+\.)\s+").unwrap();

    /// "Tip:" / "Tip -" label at line start
    pub static ref RE_TIP_LABEL: Regex = Regex::new(r"(?i)^Tip[:\-\s]").unwrap();

    /// "Checklist:" label anywhere in the line
    pub static ref RE_CHECKLIST_LABEL: Regex = Regex::new(r"(?i)Checklist[:\-\s]").unwrap();
}
