/// Blockquote lines, prefixed with `>`.
///
/// The parser keeps the prefix in block content; it is stripped only at
/// render time, where each line gains a vertical-bar glyph instead.
pub struct BlockQuote;

impl BlockQuote {
    pub const PREFIX: char = '>';

    /// Whether a line opens a blockquote: a `>` with something after it.
    #[must_use]
    pub fn opens(line: &str) -> bool {
        line.len() > 1 && line.starts_with(Self::PREFIX)
    }

    /// Continuation predicate: any further `>`-prefixed line extends the block.
    #[must_use]
    pub fn continues(line: &str) -> bool {
        line.starts_with(Self::PREFIX)
    }

    /// Quote text with the `>` prefix and one optional following space removed.
    #[must_use]
    pub fn strip_prefix(line: &str) -> &str {
        match line.strip_prefix(Self::PREFIX) {
            Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
            None => line,
        }
    }
}
