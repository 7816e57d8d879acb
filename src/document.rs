//! Styled document
//!
//! An in-memory host for the lexer: the text plus one style code per byte,
//! as an editor widget would keep them. Edits mark everything from the edit
//! position onwards as dirty; `restyle_dirty` restyles from the start of the
//! first dirty line, one line at a time, resuming each line from the style
//! recorded just before it.

use std::ops::Range;

use tracing::trace;

use crate::syntax::{CustomLexer, StyleCode, StyleHost, StyleRun};

/// Text with a per-byte style record
#[derive(Debug, Clone, Default)]
pub struct StyledDocument {
    /// Document bytes
    text: Vec<u8>,
    /// Style per byte (None = never styled)
    styles: Vec<Option<StyleCode>>,
    /// First byte whose style is out of date
    dirty_from: usize,
}

impl StyledDocument {
    /// Create an unstyled document
    pub fn new(text: impl Into<Vec<u8>>) -> Self {
        let text = text.into();
        let styles = vec![None; text.len()];
        Self {
            text,
            styles,
            dirty_from: 0,
        }
    }

    /// The whole text
    pub fn bytes(&self) -> &[u8] {
        &self.text
    }

    /// First byte that needs restyling, if any
    pub fn dirty_from(&self) -> Option<usize> {
        (self.dirty_from < self.text.len()).then_some(self.dirty_from)
    }

    /// Insert `text` at `pos` (clamped to the end)
    pub fn insert(&mut self, pos: usize, text: &[u8]) {
        let pos = pos.min(self.text.len());
        self.text.splice(pos..pos, text.iter().copied());
        self.styles.splice(pos..pos, std::iter::repeat(None).take(text.len()));
        self.invalidate_from(pos);
    }

    /// Delete the bytes in `range` (clamped to the text)
    pub fn delete(&mut self, range: Range<usize>) {
        let end = range.end.min(self.text.len());
        let start = range.start.min(end);
        self.text.drain(start..end);
        self.styles.drain(start..end);
        self.invalidate_from(start);
    }

    /// Mark everything from `pos` onwards as needing restyling
    pub fn invalidate_from(&mut self, pos: usize) {
        self.dirty_from = self.dirty_from.min(pos);
    }

    /// Record `runs` starting at byte `start`
    ///
    /// Runs reaching past the end of the text are truncated.
    pub fn apply(&mut self, start: usize, runs: &[StyleRun]) {
        let mut pos = start;
        for run in runs {
            let end = (pos + run.length).min(self.styles.len());
            if pos >= end {
                break;
            }
            self.styles[pos..end].fill(Some(run.style));
            pos = end;
        }
    }

    /// Style `[start, end)` with `lexer` and record the result
    pub fn restyle(&mut self, lexer: &CustomLexer, start: usize, end: usize) -> Vec<StyleRun> {
        let runs = lexer.style_range(self, start, end);
        self.apply(start, &runs);
        runs
    }

    /// Restyle from the line holding the first dirty byte to the end
    ///
    /// Returns the byte range that was restyled.
    pub fn restyle_dirty(&mut self, lexer: &CustomLexer) -> Option<Range<usize>> {
        let dirty = self.dirty_from()?;
        let first = self.line_start(dirty);
        let mut start = first;
        while start < self.text.len() {
            let end = self.line_end(start);
            self.restyle(lexer, start, end);
            start = end;
        }
        trace!(from = first, to = self.text.len(), "restyled dirty lines");
        self.dirty_from = self.text.len();
        Some(first..self.text.len())
    }

    /// Restyle the whole document
    pub fn restyle_all(&mut self, lexer: &CustomLexer) {
        self.invalidate_from(0);
        self.restyle_dirty(lexer);
    }

    /// Byte offset of the start of the line holding `pos`
    pub fn line_start(&self, pos: usize) -> usize {
        let pos = pos.min(self.text.len());
        self.text[..pos]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1)
    }

    /// Byte offset just past the line terminator of the line starting at `start`
    fn line_end(&self, start: usize) -> usize {
        self.text[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.text.len(), |i| start + i + 1)
    }

    /// Merged (range, style) segments of the styled text
    ///
    /// Unstyled bytes are reported as Default.
    pub fn runs(&self) -> Vec<(Range<usize>, StyleCode)> {
        let mut segments: Vec<(Range<usize>, StyleCode)> = Vec::new();
        for (pos, style) in self.styles.iter().enumerate() {
            let style = style.unwrap_or_default();
            match segments.last_mut() {
                Some((range, last)) if *last == style => range.end = pos + 1,
                _ => segments.push((pos..pos + 1, style)),
            }
        }
        segments
    }
}

impl StyleHost for StyledDocument {
    fn len(&self) -> usize {
        self.text.len()
    }

    fn text(&self, start: usize, end: usize) -> &[u8] {
        let end = end.min(self.text.len());
        &self.text[start.min(end)..end]
    }

    fn style_at(&self, pos: usize) -> Option<StyleCode> {
        self.styles.get(pos).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::LanguageRegistry;
    use crate::theme::Theme;

    fn python() -> CustomLexer {
        CustomLexer::for_language(&LanguageRegistry::new(), "Python", Theme::default()).unwrap()
    }

    fn style_of(doc: &StyledDocument, needle: &str) -> Option<StyleCode> {
        let pos = doc
            .bytes()
            .windows(needle.len())
            .position(|w| w == needle.as_bytes())?;
        doc.style_at(pos)
    }

    #[test]
    fn test_new_document_is_unstyled() {
        let doc = StyledDocument::new("x = 1");
        assert_eq!(doc.len(), 5);
        assert_eq!(doc.style_at(0), None);
        assert_eq!(doc.dirty_from(), Some(0));
    }

    #[test]
    fn test_restyle_all() {
        let lexer = python();
        let mut doc = StyledDocument::new("class Foo:\n    def bar(self):\n        return 42\n");
        doc.restyle_all(&lexer);

        assert_eq!(doc.dirty_from(), None);
        assert_eq!(style_of(&doc, "class"), Some(StyleCode::Keyword));
        assert_eq!(style_of(&doc, "Foo"), Some(StyleCode::Class));
        assert_eq!(style_of(&doc, "bar"), Some(StyleCode::FunctionDef));
        assert_eq!(style_of(&doc, "self"), Some(StyleCode::Constant));
        assert_eq!(style_of(&doc, "42"), Some(StyleCode::Constant));
        assert!((0..doc.len()).all(|pos| doc.style_at(pos).is_some()));
    }

    #[test]
    fn test_multiline_string_across_lines() {
        let lexer = python();
        let mut doc = StyledDocument::new("s = \"one\ntwo\" + x\n");
        doc.restyle_all(&lexer);
        assert_eq!(style_of(&doc, "two"), Some(StyleCode::String));
        assert_eq!(style_of(&doc, "+"), Some(StyleCode::Type));
    }

    #[test]
    fn test_comment_ends_at_line() {
        let lexer = python();
        let mut doc = StyledDocument::new("# class Foo:\nclass Bar:\n");
        doc.restyle_all(&lexer);
        assert_eq!(style_of(&doc, "Foo"), Some(StyleCode::Comment));
        assert_eq!(style_of(&doc, "Bar"), Some(StyleCode::Class));
    }

    #[test]
    fn test_insert_invalidates_and_restyles() {
        let lexer = python();
        let mut doc = StyledDocument::new("x = 1\ny = 2\n");
        doc.restyle_all(&lexer);

        doc.insert(8, b"\"");
        assert_eq!(doc.dirty_from(), Some(8));
        assert_eq!(doc.style_at(8), None);

        let restyled = doc.restyle_dirty(&lexer).unwrap();
        assert_eq!(restyled, 6..doc.len());
        assert_eq!(doc.style_at(8), Some(StyleCode::String));
        assert_eq!(style_of(&doc, "2"), Some(StyleCode::String));
        assert_eq!(style_of(&doc, "x"), Some(StyleCode::Default));
    }

    #[test]
    fn test_delete_closes_gap() {
        let lexer = python();
        let mut doc = StyledDocument::new("if x:\n    pass\n");
        doc.restyle_all(&lexer);
        doc.delete(0..3);
        assert_eq!(doc.bytes(), b"x:\n    pass\n");
        assert_eq!(doc.dirty_from(), Some(0));
        doc.restyle_dirty(&lexer);
        assert_eq!(style_of(&doc, "pass"), Some(StyleCode::Keyword));

        doc.delete(100..200);
        assert_eq!(doc.len(), 12);
    }

    #[test]
    fn test_apply_truncates() {
        let mut doc = StyledDocument::new("abc");
        doc.apply(1, &[StyleRun::new(10, StyleCode::Keyword)]);
        assert_eq!(doc.style_at(0), None);
        assert_eq!(doc.style_at(2), Some(StyleCode::Keyword));
    }

    #[test]
    fn test_line_start() {
        let doc = StyledDocument::new("ab\ncd\n");
        assert_eq!(doc.line_start(0), 0);
        assert_eq!(doc.line_start(2), 0);
        assert_eq!(doc.line_start(3), 3);
        assert_eq!(doc.line_start(5), 3);
        assert_eq!(doc.line_start(6), 6);
        assert_eq!(doc.line_start(99), 6);
    }

    #[test]
    fn test_runs_are_merged() {
        let lexer = python();
        let mut doc = StyledDocument::new("if  x");
        doc.restyle_all(&lexer);
        assert_eq!(
            doc.runs(),
            vec![(0..2, StyleCode::Keyword), (2..5, StyleCode::Default)]
        );
    }

    #[test]
    fn test_line_by_line_matches_single_pass() {
        let lexer = python();
        let source = "class A(B):\n    def f(self, key=1):\n        return self.g(\"x\ny\") + len(z)\n";
        let mut doc = StyledDocument::new(source);
        doc.restyle_all(&lexer);

        let single = lexer.style_text(source.as_bytes(), None);
        let mut expected = StyledDocument::new(source);
        expected.apply(0, &single);
        assert_eq!(doc.runs(), expected.runs());
    }

    fn assert_line_by_line_matches_single_pass(language: &str, source: &str) -> StyledDocument {
        let lexer =
            CustomLexer::for_language(&LanguageRegistry::new(), language, Theme::default()).unwrap();
        let mut doc = StyledDocument::new(source);
        doc.restyle_all(&lexer);

        let mut expected = StyledDocument::new(source);
        expected.apply(0, &lexer.style_text(source.as_bytes(), None));
        assert_eq!(doc.runs(), expected.runs(), "{} source {:?}", language, source);
        doc
    }

    #[test]
    fn test_block_comments_span_lines() {
        let source = "/* start\n   inner fn thing\n*/ fn x() {}\n";
        let doc = assert_line_by_line_matches_single_pass("Rust", source);
        let inner = source.find("inner").unwrap();
        assert_eq!(doc.style_at(inner), Some(StyleCode::Comment));
        let trailing_fn = source.rfind("fn").unwrap();
        assert_eq!(doc.style_at(trailing_fn), Some(StyleCode::Keyword));
    }

    #[test]
    fn test_c_line_by_line_matches_single_pass() {
        let source = "/* header\n * struct Fake {\n */\nstruct Point {\n    int x; // \"not a string\n    char c = '\\'';\n    char *s = \"a\\\nb\";\n};\n";
        let doc = assert_line_by_line_matches_single_pass("C", source);
        let fake = source.find("Fake").unwrap();
        assert_eq!(doc.style_at(fake), Some(StyleCode::Comment));
        let point = source.find("Point").unwrap();
        assert_eq!(doc.style_at(point), Some(StyleCode::Class));
    }

    #[test]
    fn test_rust_line_by_line_matches_single_pass() {
        let source = "// fn hidden() {\nfn main() {\n    let s = \"multi\nline // not a comment\";\n    /* a\n    b */ let t = 'x';\n}\n";
        let doc = assert_line_by_line_matches_single_pass("Rust", source);
        let hidden = source.find("hidden").unwrap();
        assert_eq!(doc.style_at(hidden), Some(StyleCode::Comment));
        let not_comment = source.find("not a comment").unwrap();
        assert_eq!(doc.style_at(not_comment), Some(StyleCode::String));
    }
}
