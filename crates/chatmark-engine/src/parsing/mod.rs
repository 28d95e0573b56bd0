//! Markdown block parsing: line classification, multi-line accumulation,
//! and the inline style-directive rewrite.
//!
//! The parser is total: every line of the input lands in exactly one block,
//! malformed input degrades to paragraphs, and unterminated regions close at
//! end of input. Each call re-parses the whole document from scratch; there
//! is no incremental state.

mod builder;
pub mod classify;
pub mod inline;
pub mod kinds;

use std::ops::Range;

pub use classify::{CLASSIFIER_ORDER, classify_line};

/// The closed set of block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Think,
    Header,
    Paragraph,
    Blockquote,
    CodeBlock,
    Image,
    Link,
    UnorderedList,
    OrderedList,
    ListWithEmbeddedCode,
    HorizontalRule,
}

/// One classified, contiguous unit of parsed document content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Newline-joined text, post inline transform for the kinds that get one.
    pub content: String,
    /// Fenced-code language tag; populated only for `CodeBlock`.
    pub language: Option<String>,
    /// Line-index range this block was built from.
    pub lines: Range<usize>,
}

/// Splits a document into lines, normalizing `\r\n` to `\n`.
fn split_lines(document: &str) -> Vec<&str> {
    document
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Parses a full document into its ordered block list.
///
/// An empty document yields an empty list; an unterminated final line still
/// yields its block. The result is deterministic and owned by the caller.
pub fn parse_document(document: &str) -> Vec<Block> {
    if document.is_empty() {
        return Vec::new();
    }

    let lines = split_lines(document);
    builder::build_blocks(&lines)
        .into_iter()
        .map(inline::apply)
        .collect()
}
