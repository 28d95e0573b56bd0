//! End-to-end pipeline tests: a realistic model answer in, the ordered
//! fragment list out.

use chatmark_engine::{Block, BlockKind, Fragment, parse_document, render_blocks};

/// A markdown exercise covering every block kind the parser knows.
const EXERCISE: &str = "<think>\nSo the user wants to see every construct.\nLet me lay them out in order.\n</think>\n\n# Header 1\n## Header 2\n#### **Header 4**\n\n> paragraph 1\n\n```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n\n```bash\ncargo new demo\ncargo run\n```\n\n---\n\nJust some **text** with **bold** words\nand a [link](https://duckduckgo.com) inline\n\n*italic*\n\n- test\n- test2\n\n> quoted multiline\n> second line\n\n1. first\n2. second\n\n- Here some code:\n  ```python\n  x = 1\n  ```\n- after";

fn kinds(blocks: &[Block]) -> Vec<BlockKind> {
    blocks.iter().map(|b| b.kind).collect()
}

#[test]
fn exercise_document_parses_to_expected_kinds() {
    let blocks = parse_document(EXERCISE);
    assert_eq!(
        kinds(&blocks),
        vec![
            BlockKind::Think,
            BlockKind::Paragraph,
            BlockKind::Header,
            BlockKind::Header,
            BlockKind::Header,
            BlockKind::Paragraph,
            BlockKind::Blockquote,
            BlockKind::Paragraph,
            BlockKind::CodeBlock,
            BlockKind::Paragraph,
            BlockKind::CodeBlock,
            BlockKind::Paragraph,
            BlockKind::HorizontalRule,
            BlockKind::Paragraph,
            BlockKind::Paragraph,
            BlockKind::Paragraph,
            BlockKind::Paragraph,
            BlockKind::Paragraph,
            BlockKind::Paragraph,
            BlockKind::UnorderedList,
            BlockKind::Paragraph,
            BlockKind::Blockquote,
            BlockKind::Paragraph,
            BlockKind::OrderedList,
            BlockKind::Paragraph,
            BlockKind::ListWithEmbeddedCode,
        ]
    );
}

#[test]
fn exercise_line_ranges_partition_the_source() {
    let blocks = parse_document(EXERCISE);
    let line_count = EXERCISE.split('\n').count();

    let mut next = 0;
    for block in &blocks {
        assert_eq!(block.lines.start, next, "gap before block {block:?}");
        next = block.lines.end;
    }
    assert_eq!(next, line_count);
}

#[test]
fn exercise_renders_one_fragment_per_block() {
    let blocks = parse_document(EXERCISE);
    let fragments = render_blocks(&blocks);
    assert_eq!(fragments.len(), blocks.len());
}

#[test]
fn code_languages_reach_their_highlighters() {
    let blocks = parse_document(EXERCISE);
    let fragments = render_blocks(&blocks);

    let panels: Vec<_> = fragments
        .iter()
        .filter_map(|f| match f {
            Fragment::Panel(p) => Some(p),
            _ => None,
        })
        .collect();

    // Think panel plus two fenced code panels.
    assert_eq!(panels.len(), 3);
    assert_eq!(panels[0].title.as_deref(), Some("Thinking"));
    assert_eq!(panels[1].title.as_deref(), Some("rust"));
    assert!(panels[1].body.contains("[blue]fn[/]"));
    assert_eq!(panels[2].title.as_deref(), Some("bash"));
    assert!(panels[2].body.starts_with("[grey27]>[/] cargo new demo"));
}

#[test]
fn bold_and_link_are_rewritten_in_paragraphs() {
    let blocks = parse_document(EXERCISE);
    let bold_paragraph = blocks
        .iter()
        .find(|b| b.content.contains("[bold]text[/]"))
        .expect("bold paragraph missing");
    assert_eq!(bold_paragraph.kind, BlockKind::Paragraph);

    assert!(
        blocks
            .iter()
            .any(|b| b.content.contains("[link=https://duckduckgo.com]link[/]"))
    );
}

#[test]
fn literal_brackets_survive_to_the_fragment() {
    let fragments = render_blocks(&parse_document("see [chapter 3] for details"));
    assert_eq!(
        fragments,
        vec![Fragment::Text(
            "[grey70]see [[chapter 3]] for details[/]".into()
        )]
    );
}

#[test]
fn header_with_bold_markers_is_stripped_not_styled() {
    let blocks = parse_document("#### **Header 4**");
    assert_eq!(blocks[0].content, "Header 4");
}
