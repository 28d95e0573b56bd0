use super::classify::classify_line;
use super::kinds::{BlockQuote, CodeFence, Heading, ListItem, ThinkTag};
use super::{Block, BlockKind};

/// Folds classified lines into blocks with a single forward cursor.
///
/// Each multi-line kind has its own continuation predicate; the cursor never
/// revisits a consumed line, so the emitted blocks' line ranges partition the
/// input exactly. Reaching end of input mid-accumulation closes the open
/// block rather than erroring.
pub fn build_blocks(lines: &[&str]) -> Vec<Block> {
    let mut out = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let kind = classify_line(lines[cursor]);
        let block = accumulate(kind, lines, cursor);
        cursor = block.lines.end;
        out.push(block);
    }

    out
}

fn accumulate(kind: BlockKind, lines: &[&str], start: usize) -> Block {
    match kind {
        BlockKind::Think => accumulate_think(lines, start),
        BlockKind::CodeBlock => accumulate_code(lines, start),
        BlockKind::Blockquote => accumulate_quote(lines, start),
        BlockKind::UnorderedList | BlockKind::OrderedList => accumulate_list(kind, lines, start),
        BlockKind::Header => Block {
            kind,
            content: Heading::strip_marker(lines[start]).to_string(),
            language: None,
            lines: start..start + 1,
        },
        _ => Block {
            kind,
            content: lines[start].to_string(),
            language: None,
            lines: start..start + 1,
        },
    }
}

/// Think: verbatim lines until the close marker. The close-marker line is
/// consumed with the block but stripped from content, as is the open marker.
fn accumulate_think(lines: &[&str], start: usize) -> Block {
    let mut content = Vec::new();
    let opener_rest = ThinkTag::strip_open(lines[start]);
    if !opener_rest.is_empty() {
        content.push(opener_rest);
    }

    let mut end = start + 1;
    while end < lines.len() && !ThinkTag::closes(lines[end]) {
        content.push(lines[end]);
        end += 1;
    }
    if end < lines.len() {
        end += 1; // consume the close-marker line
    }

    Block {
        kind: BlockKind::Think,
        content: content.join("\n"),
        language: None,
        lines: start..end,
    }
}

/// Code: verbatim lines until the next fence. Both fence lines are consumed
/// with the block and stripped from content; the language tag comes from the
/// opening fence.
fn accumulate_code(lines: &[&str], start: usize) -> Block {
    let language = CodeFence::language(lines[start]).map(str::to_string);

    let mut content = Vec::new();
    let mut end = start + 1;
    while end < lines.len() && !CodeFence::is_fence(lines[end]) {
        content.push(lines[end]);
        end += 1;
    }
    if end < lines.len() {
        end += 1; // consume the closing fence
    }

    Block {
        kind: BlockKind::CodeBlock,
        content: content.join("\n"),
        language,
        lines: start..end,
    }
}

/// Blockquote: consecutive `>`-prefixed lines, prefixes kept in content.
fn accumulate_quote(lines: &[&str], start: usize) -> Block {
    let mut end = start;
    while end < lines.len() && BlockQuote::continues(lines[end]) {
        end += 1;
    }

    Block {
        kind: BlockKind::Blockquote,
        content: lines[start..end].join("\n"),
        language: None,
        lines: start..end,
    }
}

/// Lists: a union of continuation conditions, not a sub-grammar. A repeated
/// marker, an indented fence, or any space-indented line extends the block.
/// Capturing an indented fence reclassifies the block as holding embedded
/// code; the fence content stays verbatim in the list text.
fn accumulate_list(kind: BlockKind, lines: &[&str], start: usize) -> Block {
    let same_marker: fn(&str) -> bool = match kind {
        BlockKind::UnorderedList => ListItem::is_unordered,
        _ => ListItem::is_ordered,
    };

    let mut embedded_code = false;
    let mut end = start;
    while end < lines.len()
        && (same_marker(lines[end])
            || ListItem::is_indented_fence(lines[end])
            || ListItem::is_continuation(lines[end]))
    {
        if ListItem::is_indented_fence(lines[end]) {
            embedded_code = true;
        }
        end += 1;
    }

    Block {
        kind: if embedded_code {
            BlockKind::ListWithEmbeddedCode
        } else {
            kind
        },
        content: lines[start..end].join("\n"),
        language: None,
        lines: start..end,
    }
}
