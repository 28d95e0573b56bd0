use std::sync::OnceLock;

use regex::Regex;

use super::BlockKind;
use super::kinds::{BlockQuote, CodeFence, Heading, ListItem, RuleLine, ThinkTag};

/// Classifier priority, highest first. The first matching kind wins; there is
/// no backtracking across kinds. `Paragraph` matches any line (including the
/// empty one) and must stay last so classification is total.
pub const CLASSIFIER_ORDER: [BlockKind; 10] = [
    BlockKind::Think,
    BlockKind::Header,
    BlockKind::CodeBlock,
    BlockKind::Blockquote,
    BlockKind::UnorderedList,
    BlockKind::OrderedList,
    BlockKind::Image,
    BlockKind::Link,
    BlockKind::HorizontalRule,
    BlockKind::Paragraph,
];

/// Classifies one line into its best-matching block kind.
///
/// Pure and stateless: only local facts about the line are consulted.
/// Multi-line grouping is the builder's job.
pub fn classify_line(line: &str) -> BlockKind {
    for kind in CLASSIFIER_ORDER {
        if matches_kind(kind, line) {
            return kind;
        }
    }
    // CLASSIFIER_ORDER ends with the catch-all Paragraph.
    BlockKind::Paragraph
}

fn matches_kind(kind: BlockKind, line: &str) -> bool {
    match kind {
        BlockKind::Think => ThinkTag::opens(line),
        BlockKind::Header => Heading::level(line).is_some(),
        BlockKind::CodeBlock => CodeFence::is_fence(line),
        BlockKind::Blockquote => BlockQuote::opens(line),
        BlockKind::UnorderedList => ListItem::is_unordered(line),
        BlockKind::OrderedList => ListItem::is_ordered(line),
        BlockKind::Image => image_pattern().is_match(line),
        BlockKind::Link => link_pattern().is_match(line),
        BlockKind::HorizontalRule => RuleLine::is_rule(line),
        BlockKind::Paragraph => true,
        // Only ever produced by the builder when a list captures a fence.
        BlockKind::ListWithEmbeddedCode => false,
    }
}

fn image_pattern() -> &'static Regex {
    static IMAGE: OnceLock<Regex> = OnceLock::new();
    IMAGE.get_or_init(|| Regex::new(r"^!\[.*?\]\(.*?\)").expect("invalid image regex"))
}

fn link_pattern() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| Regex::new(r"^\[.*?\]\(.*?\)").expect("invalid link regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_is_last_in_priority_order() {
        assert_eq!(CLASSIFIER_ORDER.last(), Some(&BlockKind::Paragraph));
    }

    #[test]
    fn every_line_classifies_to_something() {
        for line in ["", "plain", "\t", "  indented", "!", "["] {
            // Must not panic, and the fallback is Paragraph.
            assert_eq!(classify_line(line), BlockKind::Paragraph);
        }
    }

    #[test]
    fn classifies_each_kind() {
        assert_eq!(classify_line("<think>"), BlockKind::Think);
        assert_eq!(classify_line("## Title"), BlockKind::Header);
        assert_eq!(classify_line("```bash"), BlockKind::CodeBlock);
        assert_eq!(classify_line("> quoted"), BlockKind::Blockquote);
        assert_eq!(classify_line("- item"), BlockKind::UnorderedList);
        assert_eq!(classify_line("1. item"), BlockKind::OrderedList);
        assert_eq!(classify_line("![alt](url)"), BlockKind::Image);
        assert_eq!(classify_line("[text](url)"), BlockKind::Link);
        assert_eq!(classify_line("---"), BlockKind::HorizontalRule);
        assert_eq!(classify_line("anything else"), BlockKind::Paragraph);
    }

    #[test]
    fn image_beats_link() {
        // `![..](..)` also contains a link pattern; image is tried first.
        assert_eq!(classify_line("![alt](http://x)"), BlockKind::Image);
    }

    #[test]
    fn unordered_item_beats_horizontal_rule_check() {
        // `- item` must not be eaten by any later pattern.
        assert_eq!(classify_line("- item"), BlockKind::UnorderedList);
        // A bare rule is not a list item.
        assert_eq!(classify_line("---"), BlockKind::HorizontalRule);
    }
}
