/// Fenced code block delimiters, with the language tag carried on the
/// opening fence.
pub struct CodeFence;

impl CodeFence {
    pub const MARKER: &'static str = "```";

    /// Whether a line is a fence (opening or closing).
    #[must_use]
    pub fn is_fence(line: &str) -> bool {
        line.starts_with(Self::MARKER)
    }

    /// Language tag on an opening fence, if present.
    ///
    /// Returns `None` for a bare fence or a non-fence line; the tag is
    /// trimmed so that a stray trailing space does not defeat highlighter
    /// dispatch.
    #[must_use]
    pub fn language(line: &str) -> Option<&str> {
        let tag = line.strip_prefix(Self::MARKER)?.trim();
        if tag.is_empty() { None } else { Some(tag) }
    }
}
