use std::sync::OnceLock;

use regex::Regex;

/// List items: `- ` unordered markers and `<digits>. ` ordered markers.
///
/// List continuation is deliberately a union of loose conditions rather than
/// a sub-grammar: a repeated marker, an indented fence opening an embedded
/// code block, or any space-indented continuation line all extend the block.
pub struct ListItem;

impl ListItem {
    pub const UNORDERED_MARKER: &'static str = "- ";

    /// Whether a line is an unordered list item.
    #[must_use]
    pub fn is_unordered(line: &str) -> bool {
        line.len() > Self::UNORDERED_MARKER.len() && line.starts_with(Self::UNORDERED_MARKER)
    }

    /// Whether a line is an ordered list item (`1. text`).
    #[must_use]
    pub fn is_ordered(line: &str) -> bool {
        static ORDERED: OnceLock<Regex> = OnceLock::new();
        ORDERED
            .get_or_init(|| Regex::new(r"^\d+\. .+").expect("invalid ordered-item regex"))
            .is_match(line)
    }

    /// Whether a line is a code fence indented one to four spaces, signalling
    /// an embedded code block inside a list item.
    #[must_use]
    pub fn is_indented_fence(line: &str) -> bool {
        static INDENTED_FENCE: OnceLock<Regex> = OnceLock::new();
        INDENTED_FENCE
            .get_or_init(|| Regex::new(r"^ {1,4}```").expect("invalid indented-fence regex"))
            .is_match(line)
    }

    /// Whether a line continues the previous item as indented text.
    #[must_use]
    pub fn is_continuation(line: &str) -> bool {
        line.starts_with(' ')
    }
}
