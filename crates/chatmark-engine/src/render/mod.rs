//! Block rendering: one fragment per block, selected by an exhaustive match
//! over the block kind. A missing arm is a compile error, never a silent
//! fallback.

pub mod fragment;
pub mod highlight;

pub use fragment::{Fragment, Panel};

use crate::markup;
use crate::parsing::kinds::BlockQuote;
use crate::parsing::{Block, BlockKind};

/// Title shown on the reasoning-trace panel.
const THINK_TITLE: &str = "Thinking";

/// Renders the whole block list in order.
pub fn render_blocks(blocks: &[Block]) -> Vec<Fragment> {
    blocks.iter().map(render_block).collect()
}

/// Parse + render in one call: document text in, fragments out.
pub fn render_document(document: &str) -> Vec<Fragment> {
    render_blocks(&crate::parsing::parse_document(document))
}

/// Maps one block to its renderable fragment.
pub fn render_block(block: &Block) -> Fragment {
    match block.kind {
        BlockKind::Think => Fragment::Panel(Panel::new(
            Some(THINK_TITLE.to_string()),
            markup::span("italic grey58", &block.content),
        )),
        BlockKind::Header => Fragment::Text(markup::span("underline blue", &block.content)),
        BlockKind::Paragraph => {
            if block.content.is_empty() {
                // Preserved as an empty line for vertical spacing.
                Fragment::Text(String::new())
            } else {
                Fragment::Text(markup::span("grey70", &block.content))
            }
        }
        BlockKind::Blockquote => Fragment::Text(render_quote(&block.content)),
        BlockKind::CodeBlock => {
            let language = block.language.as_deref();
            let body = highlight::highlight(&markup::escape(&block.content), language);
            Fragment::Panel(
                Panel::new(block.language.clone(), body).with_pad_left(4),
            )
        }
        BlockKind::Image
        | BlockKind::Link
        | BlockKind::UnorderedList
        | BlockKind::OrderedList
        | BlockKind::ListWithEmbeddedCode => {
            Fragment::Text(markup::span("grey70", &block.content))
        }
        BlockKind::HorizontalRule => Fragment::Rule,
    }
}

/// Blockquote lines lose their `>` prefix and gain a vertical-bar glyph.
fn render_quote(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            format!(
                "[grey23]\u{2502}[/] {}",
                markup::span("grey42", BlockQuote::strip_prefix(line))
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
