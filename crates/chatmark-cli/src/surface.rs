//! The terminal output surface: interprets the engine's style-directive
//! markup and paints it with ANSI styling via crossterm.
//!
//! Directive vocabulary: `bold`, `italic`, `underline`, named colors
//! (`blue`, `green`, `white`, `purple`, `greyNN`, ...), `on <color>`
//! backgrounds, and `link=<url>` (painted as an OSC 8 hyperlink). Unknown
//! directives are painted as literal text: malformed markup must never crash
//! rendering.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor},
    terminal,
};

use chatmark_engine::markup::Token;
use chatmark_engine::{Fragment, Panel, markup};

const BORDER_COLOR: Color = Color::AnsiValue(237); // grey23
const FALLBACK_WIDTH: usize = 80;

const RULE_GLYPH: char = '\u{2500}';
const TOP_LEFT: char = '\u{256d}';
const TOP_RIGHT: char = '\u{256e}';
const BOTTOM_LEFT: char = '\u{2570}';
const BOTTOM_RIGHT: char = '\u{256f}';
const VERTICAL: char = '\u{2502}';

pub struct Surface<W: Write> {
    out: W,
    width: usize,
}

impl Surface<io::Stdout> {
    /// Surface over stdout, sized to the terminal (80 columns if unknown).
    pub fn stdout() -> Self {
        let width = terminal::size()
            .map(|(cols, _)| cols as usize)
            .unwrap_or(FALLBACK_WIDTH);
        Self {
            out: io::stdout(),
            width,
        }
    }
}

impl<W: Write> Surface<W> {
    pub fn with_width(out: W, width: usize) -> Self {
        Self { out, width }
    }

    /// Paints the fragment list in order and flushes.
    pub fn render(&mut self, fragments: &[Fragment]) -> io::Result<()> {
        for fragment in fragments {
            match fragment {
                Fragment::Text(text) => self.paint_text(text)?,
                Fragment::Panel(panel) => self.paint_panel(panel)?,
                Fragment::Rule => self.paint_rule()?,
            }
        }
        self.out.flush()
    }

    fn paint_text(&mut self, text: &str) -> io::Result<()> {
        for line in layout_lines(text) {
            for (style, run) in &line {
                self.paint_run(style, run)?;
            }
            queue!(self.out, Print("\n"))?;
        }
        Ok(())
    }

    fn paint_panel(&mut self, panel: &Panel) -> io::Result<()> {
        let lines = layout_lines(&panel.body);
        let content_width = lines.iter().map(|line| line_width(line)).max().unwrap_or(0);
        let title_width = panel
            .title
            .as_ref()
            .map(|t| t.chars().count() + 3)
            .unwrap_or(0);
        let inner = (panel.pad_left + content_width + 1).max(title_width);

        // Top border, with the title woven in when present.
        let top = match panel.title.as_deref() {
            Some(title) if !title.is_empty() => {
                let fill = inner - (title.chars().count() + 3);
                format!(
                    "{TOP_LEFT}{RULE_GLYPH} {title} {}{TOP_RIGHT}",
                    RULE_GLYPH.to_string().repeat(fill)
                )
            }
            _ => format!(
                "{TOP_LEFT}{}{TOP_RIGHT}",
                RULE_GLYPH.to_string().repeat(inner)
            ),
        };
        self.paint_border(&top)?;

        for line in &lines {
            self.paint_border(&VERTICAL.to_string())?;
            queue!(self.out, Print(" ".repeat(panel.pad_left)))?;
            for (style, run) in line {
                self.paint_run(style, run)?;
            }
            let fill = inner - panel.pad_left - line_width(line);
            queue!(self.out, Print(" ".repeat(fill)))?;
            self.paint_border(&VERTICAL.to_string())?;
            queue!(self.out, Print("\n"))?;
        }

        let bottom = format!(
            "{BOTTOM_LEFT}{}{BOTTOM_RIGHT}",
            RULE_GLYPH.to_string().repeat(inner)
        );
        self.paint_border(&bottom)?;
        queue!(self.out, Print("\n"))
    }

    fn paint_rule(&mut self) -> io::Result<()> {
        let rule = RULE_GLYPH.to_string().repeat(self.width);
        self.paint_border(&rule)?;
        queue!(self.out, Print("\n"))
    }

    fn paint_border(&mut self, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(BORDER_COLOR),
            Print(text),
            ResetColor
        )
    }

    fn paint_run(&mut self, style: &SpanStyle, text: &str) -> io::Result<()> {
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        if style.underline {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        if let Some(fg) = style.fg {
            queue!(self.out, SetForegroundColor(fg))?;
        }
        if let Some(bg) = style.bg {
            queue!(self.out, SetBackgroundColor(bg))?;
        }

        match &style.link {
            Some(url) => queue!(
                self.out,
                Print(format!("\x1b]8;;{url}\x1b\\")),
                Print(text),
                Print("\x1b]8;;\x1b\\"),
            )?,
            None => queue!(self.out, Print(text))?,
        }

        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))
    }
}

/// Resolved style of one markup span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SpanStyle {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
    italic: bool,
    underline: bool,
    link: Option<String>,
}

/// Lays markup out into lines of styled runs.
///
/// The directive stack carries across line breaks, so a span opened on one
/// line still styles the next. An unrecognized directive is demoted to
/// literal text under the current style.
fn layout_lines(text: &str) -> Vec<Vec<(SpanStyle, String)>> {
    let mut stack = vec![SpanStyle::default()];
    let mut lines: Vec<Vec<(SpanStyle, String)>> = vec![Vec::new()];

    for token in markup::tokens(text) {
        match token {
            Token::Open(directive) => {
                let top = stack.last().cloned().unwrap_or_default();
                match directive_style(&top, &directive) {
                    Some(style) => stack.push(style),
                    None => push_run(&mut lines, &top, &format!("[{directive}]")),
                }
            }
            Token::Close => {
                if stack.len() > 1 {
                    stack.pop();
                }
            }
            Token::Text(text) => {
                let top = stack.last().cloned().unwrap_or_default();
                for (i, part) in text.split('\n').enumerate() {
                    if i > 0 {
                        lines.push(Vec::new());
                    }
                    if !part.is_empty() {
                        push_run(&mut lines, &top, part);
                    }
                }
            }
        }
    }

    lines
}

fn push_run(lines: &mut Vec<Vec<(SpanStyle, String)>>, style: &SpanStyle, text: &str) {
    if let Some(line) = lines.last_mut() {
        line.push((style.clone(), text.to_string()));
    }
}

fn line_width(line: &[(SpanStyle, String)]) -> usize {
    line.iter().map(|(_, text)| text.chars().count()).sum()
}

/// Applies one directive on top of the inherited style.
///
/// Returns `None` for any unknown word, which demotes the whole directive to
/// literal text.
fn directive_style(base: &SpanStyle, directive: &str) -> Option<SpanStyle> {
    if directive.trim().is_empty() {
        return None;
    }

    let mut style = base.clone();
    let mut words = directive.split_whitespace();
    while let Some(word) = words.next() {
        if let Some(url) = word.strip_prefix("link=") {
            style.link = Some(url.to_string());
            style.underline = true;
        } else {
            match word {
                "bold" => style.bold = true,
                "italic" => style.italic = true,
                "underline" => style.underline = true,
                "on" => style.bg = Some(color_by_name(words.next()?)?),
                _ => style.fg = Some(color_by_name(word)?),
            }
        }
    }
    Some(style)
}

fn color_by_name(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "purple" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        _ => return grey_by_name(name),
    };
    Some(color)
}

/// Maps `greyNN`/`grayNN` percentage names onto the xterm grayscale ramp
/// (indices 232..=255 cover levels 8..=238 in steps of 10).
fn grey_by_name(name: &str) -> Option<Color> {
    let percent: f32 = name
        .strip_prefix("grey")
        .or_else(|| name.strip_prefix("gray"))?
        .parse()
        .ok()?;
    let step = ((percent * 2.55 - 8.0) / 10.0).round().clamp(0.0, 23.0);
    Some(Color::AnsiValue(232 + step as u8))
}
