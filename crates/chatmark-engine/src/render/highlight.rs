//! Keyword-list syntax highlighting for fenced code blocks.
//!
//! Dispatch is by exact language tag. Recognized languages get three passes
//! over the (already bracket-escaped) code: keywords, accented identifiers,
//! and a method-after-dot heuristic. `bash` takes the console-transcript
//! path instead. Unknown tags fall back to a uniform color with no
//! tokenization.

use std::sync::OnceLock;

use regex::Regex;

use crate::markup;

const CSHARP_KEYWORDS: &[&str] = &[
    "using",
    "namespace",
    "var",
    "string",
    "int",
    "double",
    "void",
    "class",
    "static",
    "public",
    "return",
    "new",
];
const CSHARP_ACCENTS: &[&str] = &["Console"];

const PYTHON_KEYWORDS: &[&str] = &[
    "def", "return", "import", "from", "class", "if", "elif", "else", "for", "while", "in", "not",
    "and", "or", "lambda", "None", "True", "False",
];
const PYTHON_ACCENTS: &[&str] = &["self", "print"];

const RUST_KEYWORDS: &[&str] = &[
    "fn", "let", "mut", "pub", "use", "mod", "struct", "enum", "impl", "match", "if", "else",
    "for", "while", "loop", "return", "trait",
];
const RUST_ACCENTS: &[&str] = &["Self", "Some", "None", "Ok", "Err"];

/// Console-transcript prompt glyph, muted.
const PROMPT: &str = "[grey27]>[/] ";

/// Highlights escaped code for the given language tag.
pub fn highlight(code: &str, language: Option<&str>) -> String {
    match language {
        Some("csharp") => keyword_highlight(code, csharp_keywords(), csharp_accents()),
        Some("python") => keyword_highlight(code, python_keywords(), python_accents()),
        Some("rust") => keyword_highlight(code, rust_keywords(), rust_accents()),
        Some("bash") => console_transcript(code),
        _ => markup::span("green", code),
    }
}

fn keyword_highlight(code: &str, keywords: &Regex, accents: &Regex) -> String {
    let code = keywords.replace_all(code, "[blue]$0[/]");
    let code = accents.replace_all(&code, "[purple]$0[/]");
    method_pattern()
        .replace_all(&code, "$1[green]$2[/]$3")
        .into_owned()
}

/// Shell transcripts: every non-empty line gets a prompt glyph; blank lines
/// are dropped entirely. This differs from Paragraph's empty-line policy on
/// purpose (per-kind policy, kept asymmetric).
fn console_transcript(code: &str) -> String {
    code.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("{PROMPT}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn word_list_pattern(words: &[&str]) -> Regex {
    Regex::new(&format!(r"\b(?:{})\b", words.join("|"))).expect("invalid keyword regex")
}

fn csharp_keywords() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| word_list_pattern(CSHARP_KEYWORDS))
}

fn csharp_accents() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| word_list_pattern(CSHARP_ACCENTS))
}

fn python_keywords() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| word_list_pattern(PYTHON_KEYWORDS))
}

fn python_accents() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| word_list_pattern(PYTHON_ACCENTS))
}

fn rust_keywords() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| word_list_pattern(RUST_KEYWORDS))
}

fn rust_accents() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| word_list_pattern(RUST_ACCENTS))
}

fn method_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\.)([A-Za-z_][A-Za-z0-9_]*)(\()").expect("invalid method regex")
    })
}
