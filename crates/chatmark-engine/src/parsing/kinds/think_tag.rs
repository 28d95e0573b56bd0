/// The model reasoning-trace region, delimited by `<think>` tags.
///
/// Some local models (DeepSeek R1 family) emit their chain of thought between
/// these markers before the actual answer.
pub struct ThinkTag;

impl ThinkTag {
    pub const OPEN: &'static str = "<think>";
    pub const CLOSE: &'static str = "</think>";

    /// Whether a line opens a think region.
    #[must_use]
    pub fn opens(line: &str) -> bool {
        line.starts_with(Self::OPEN)
    }

    /// Whether a line closes a think region.
    #[must_use]
    pub fn closes(line: &str) -> bool {
        line.starts_with(Self::CLOSE)
    }

    /// Text remaining on the opening line after the marker.
    #[must_use]
    pub fn strip_open(line: &str) -> &str {
        line.strip_prefix(Self::OPEN).unwrap_or(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_marker_at_line_start() {
        assert!(ThinkTag::opens("<think>"));
        assert!(ThinkTag::opens("<think>leading text"));
        assert!(!ThinkTag::opens(" <think>"));
    }

    #[test]
    fn close_marker_at_line_start() {
        assert!(ThinkTag::closes("</think>"));
        assert!(!ThinkTag::closes("<think>"));
    }

    #[test]
    fn strip_open_keeps_trailing_text() {
        assert_eq!(ThinkTag::strip_open("<think>rest"), "rest");
        assert_eq!(ThinkTag::strip_open("no marker"), "no marker");
    }
}
