/// Horizontal rules: a line opening with `---`.
pub struct RuleLine;

impl RuleLine {
    pub const MARKER: &'static str = "---";

    #[must_use]
    pub fn is_rule(line: &str) -> bool {
        line.starts_with(Self::MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_dashes_is_a_rule() {
        assert!(RuleLine::is_rule("---"));
        assert!(RuleLine::is_rule("----"));
    }

    #[test]
    fn fewer_dashes_is_not() {
        assert!(!RuleLine::is_rule("--"));
        assert!(!RuleLine::is_rule("text ---"));
    }
}
