use std::sync::OnceLock;

use regex::Regex;

use crate::markup;

use super::{Block, BlockKind};

/// Rewrites inline markdown into style directives, in one fixed pass.
///
/// Order is load-bearing: escaping runs first so literal brackets in source
/// text are not corrupted by inserted directives; links are rewritten before
/// emphasis so URLs containing `*` are not mangled; bold runs before italic
/// so `**x**` is not read as nested italics. Because escaping runs first, the
/// link pattern matches the doubled-bracket form `[[text]](url)`.
pub fn rewrite(content: &str) -> String {
    let content = markup::escape(content);
    let content = link_pattern().replace_all(&content, "[link=$2]$1[/]");
    let content = bold_pattern().replace_all(&content, "[bold]$1[/]");
    let content = italic_pattern().replace_all(&content, "[italic]$1[/]");
    code_pattern()
        .replace_all(&content, "[grey70 on grey11] $1 [/]")
        .into_owned()
}

/// Header variant: escape, then strip emphasis markers without substituting
/// directives. Header rendering applies one style to the whole line, so
/// nested spans would only fight it.
pub fn rewrite_heading(content: &str) -> String {
    let content = markup::escape(content);
    let content = bold_pattern().replace_all(&content, "$1");
    italic_pattern().replace_all(&content, "$1").into_owned()
}

/// Post-pass over a parsed block. Code blocks and unordered lists are left
/// verbatim; headers get the stripped variant; everything else is rewritten.
pub fn apply(block: Block) -> Block {
    match block.kind {
        BlockKind::CodeBlock | BlockKind::UnorderedList => block,
        BlockKind::Header => Block {
            content: rewrite_heading(&block.content),
            ..block
        },
        _ => Block {
            content: rewrite(&block.content),
            ..block
        },
    }
}

fn link_pattern() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| Regex::new(r"\[\[(.*?)\]\]\((.*?)\)").expect("invalid link regex"))
}

fn bold_pattern() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    BOLD.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("invalid bold regex"))
}

fn italic_pattern() -> &'static Regex {
    static ITALIC: OnceLock<Regex> = OnceLock::new();
    ITALIC.get_or_init(|| Regex::new(r"\*(.*?)\*").expect("invalid italic regex"))
}

fn code_pattern() -> &'static Regex {
    static CODE: OnceLock<Regex> = OnceLock::new();
    CODE.get_or_init(|| Regex::new(r"`(.*?)`").expect("invalid code-span regex"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(rewrite("no markup here"), "no markup here");
    }

    #[test]
    fn rewrite_is_idempotent_modulo_escaping() {
        let once = rewrite("just words");
        assert_eq!(rewrite(&once), once);
    }

    #[test]
    fn literal_brackets_are_escaped() {
        assert_eq!(rewrite("array[0] = x"), "array[[0]] = x");
    }

    #[test]
    fn link_becomes_hyperlink_directive() {
        assert_eq!(
            rewrite("see [ducks](https://duckduckgo.com) now"),
            "see [link=https://duckduckgo.com]ducks[/] now"
        );
    }

    #[test]
    fn bold_before_italic() {
        assert_eq!(rewrite("**strong**"), "[bold]strong[/]");
        assert_eq!(rewrite("*slanted*"), "[italic]slanted[/]");
    }

    #[test]
    fn url_with_asterisk_survives_emphasis() {
        // Link rewriting runs first, so the `[x](..)` syntax is never
        // half-consumed by the emphasis patterns.
        assert_eq!(rewrite("[x](http://a/*b)"), "[link=http://a/*b]x[/]");
    }

    #[test]
    fn code_span_becomes_muted_directive() {
        assert_eq!(rewrite("`ls -la`"), "[grey70 on grey11] ls -la [/]");
    }

    #[test]
    fn heading_strips_emphasis_markers() {
        assert_eq!(rewrite_heading("**Header 4**"), "Header 4");
        assert_eq!(rewrite_heading("*soft* title"), "soft title");
    }

    #[test]
    fn apply_skips_code_and_unordered_lists() {
        let code = Block {
            kind: BlockKind::CodeBlock,
            content: "let x = arr[0];".into(),
            language: Some("rust".into()),
            lines: 0..3,
        };
        assert_eq!(apply(code.clone()), code);

        let list = Block {
            kind: BlockKind::UnorderedList,
            content: "- **kept**".into(),
            language: None,
            lines: 0..1,
        };
        assert_eq!(apply(list.clone()), list);
    }

    #[test]
    fn apply_rewrites_ordered_lists() {
        let list = Block {
            kind: BlockKind::OrderedList,
            content: "1. **bold item**".into(),
            language: None,
            lines: 0..1,
        };
        assert_eq!(apply(list).content, "1. [bold]bold item[/]");
    }
}
