//! Terminal output using crossterm
//!
//! Renders a styled document with the theme's colours, or prints its style
//! runs as a table.

use std::io::Write;

use crossterm::{
    queue,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use unicode_width::UnicodeWidthChar;

use crate::document::StyledDocument;
use crate::error::Result;
use crate::syntax::StyleHost;
use crate::theme::{Color, FontWeight, Theme, ThemeEntry};

/// Widest preview shown in the run table, in columns
const PREVIEW_WIDTH: usize = 32;

/// Output options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Prefix each line with its number
    pub line_numbers: bool,
    /// Emit ANSI colours and attributes
    pub color: bool,
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Writes styled text to a terminal-like sink
pub struct Renderer<'a, W: Write> {
    out: W,
    theme: &'a Theme,
    options: RenderOptions,
    /// Width of the line number gutter
    gutter: usize,
    line: usize,
    at_line_start: bool,
}

impl<'a, W: Write> Renderer<'a, W> {
    pub fn new(out: W, theme: &'a Theme, options: RenderOptions) -> Self {
        Self {
            out,
            theme,
            options,
            gutter: 0,
            line: 0,
            at_line_start: true,
        }
    }

    /// Render the whole document
    pub fn render(&mut self, doc: &StyledDocument) -> Result<()> {
        let lines = doc.bytes().iter().filter(|&&b| b == b'\n').count() + 1;
        self.gutter = lines.to_string().len();
        self.line = 0;
        self.at_line_start = true;

        let theme = self.theme;
        for (range, style) in doc.runs() {
            let entry = theme.entry(style);
            let text = doc.text(range.start, range.end);
            for piece in text.split_inclusive(|&b| b == b'\n') {
                self.write_piece(piece, entry)?;
            }
        }
        if self.options.color {
            queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Write text holding at most one trailing newline
    fn write_piece(&mut self, piece: &[u8], entry: &ThemeEntry) -> Result<()> {
        if self.at_line_start {
            self.write_line_number()?;
            self.at_line_start = false;
        }

        let (body, newline) = match piece.split_last() {
            Some((b'\n', body)) => (body, true),
            _ => (piece, false),
        };

        if !body.is_empty() {
            if self.options.color {
                self.set_style(entry)?;
            }
            queue!(self.out, Print(String::from_utf8_lossy(body)))?;
            if self.options.color {
                queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
            }
        }
        if newline {
            queue!(self.out, Print('\n'))?;
            self.at_line_start = true;
        }
        Ok(())
    }

    fn set_style(&mut self, entry: &ThemeEntry) -> Result<()> {
        queue!(
            self.out,
            SetForegroundColor(term_color(entry.foreground)),
            SetBackgroundColor(term_color(entry.background))
        )?;
        if entry.font.weight >= FontWeight::Bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if entry.font.italic {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        Ok(())
    }

    fn write_line_number(&mut self) -> Result<()> {
        if !self.options.line_numbers {
            return Ok(());
        }
        self.line += 1;
        let number = format!("{:>width$} ", self.line, width = self.gutter);
        if self.options.color {
            queue!(
                self.out,
                SetAttribute(Attribute::Dim),
                Print(number),
                SetAttribute(Attribute::NormalIntensity)
            )?;
        } else {
            queue!(self.out, Print(number))?;
        }
        Ok(())
    }
}

/// Print one row per style run: offset, length, style name and a preview
pub fn write_run_table<W: Write>(mut out: W, doc: &StyledDocument) -> Result<()> {
    writeln!(out, "{:>8} {:>6}  {:<12} TEXT", "OFFSET", "LENGTH", "STYLE")?;
    for (range, style) in doc.runs() {
        let text = String::from_utf8_lossy(doc.text(range.start, range.end));
        writeln!(
            out,
            "{:>8} {:>6}  {:<12} {}",
            range.start,
            range.len(),
            style.description(),
            preview(&text, PREVIEW_WIDTH)
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Escape control characters and cut to `width` display columns
fn preview(text: &str, width: usize) -> String {
    let escaped: String = text.chars().flat_map(char::escape_debug).collect();
    let mut shown = String::new();
    let mut used = 0;
    for ch in escaped.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            shown.push_str("...");
            return shown;
        }
        used += w;
        shown.push(ch);
    }
    shown
}
