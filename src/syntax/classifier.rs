//! Token classification
//!
//! Walks the token stream of one styling call with lookahead, tracks
//! whether it is inside a string or comment, and emits one style run per
//! token. The state at the start of a call is reconstructed from the style
//! of the byte just before the slice.

use super::language::LanguageProfile;
use super::style::{StyleCode, StyleRun};
use super::tokens::Token;

/// What kind of comment the classifier is inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// Ends at the next line terminator
    Line,
    /// Ends at the block close marker
    Block,
    /// Resumed from a previous call; ends at whichever comes first
    Resumed,
}

/// Classifier state carried from token to token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Default,
    /// Inside a string; `quote` is None when resumed from a previous call
    InString { quote: Option<char>, escaped: bool },
    InComment(CommentKind),
}

impl ScanState {
    /// Reconstruct the state from the style of the preceding byte
    pub fn from_style(prev: Option<StyleCode>) -> Self {
        match prev {
            Some(StyleCode::String) => ScanState::InString {
                quote: None,
                escaped: false,
            },
            Some(StyleCode::Comment) => ScanState::InComment(CommentKind::Resumed),
            _ => ScanState::Default,
        }
    }
}

/// Positional view over the token list; peeking never consumes
struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn peek(&self, n: usize) -> Option<&Token<'a>> {
        self.tokens.get(self.pos + n)
    }

    /// Offset of the first non-whitespace token at or after `from`
    ///
    /// Lookahead stays on the current line: None at a line break.
    fn skip_whitespace(&self, from: usize) -> Option<usize> {
        let mut n = from;
        loop {
            let token = self.peek(n)?;
            if token.has_line_terminator() {
                return None;
            }
            if !token.is_whitespace() {
                return Some(n);
            }
            n += 1;
        }
    }
}

/// Style engine for one language profile
pub struct Classifier<'p> {
    profile: &'p LanguageProfile,
}

impl<'p> Classifier<'p> {
    pub fn new(profile: &'p LanguageProfile) -> Self {
        Self { profile }
    }

    /// Classify `tokens`, starting in `state`
    ///
    /// Returns one run per token (class, def and dot-access patterns may
    /// emit several) and the state after the last token.
    pub fn classify(&self, tokens: &[Token<'_>], state: ScanState) -> (Vec<StyleRun>, ScanState) {
        let mut run = Run {
            profile: self.profile,
            cursor: Cursor { tokens, pos: 0 },
            runs: Vec::with_capacity(tokens.len()),
            state,
            paren_depth: 0,
        };

        while let Some(token) = run.cursor.next() {
            run.step(token);
        }

        (run.runs, run.state)
    }
}

/// Mutable state of a single classification pass
struct Run<'p, 't, 'a> {
    profile: &'p LanguageProfile,
    cursor: Cursor<'t, 'a>,
    runs: Vec<StyleRun>,
    state: ScanState,
    /// Open `(` seen during this pass
    paren_depth: usize,
}

impl<'p, 't, 'a> Run<'p, 't, 'a> {
    fn emit(&mut self, len: usize, style: StyleCode) {
        if len > 0 {
            self.runs.push(StyleRun::new(len, style));
        }
    }

    fn step(&mut self, token: Token<'a>) {
        match self.state {
            ScanState::InString { quote, escaped } => {
                self.emit(token.len, StyleCode::String);
                self.state = if escaped {
                    ScanState::InString { quote, escaped: false }
                } else if self.profile.escape.is_some() && token.single_char() == self.profile.escape {
                    ScanState::InString { quote, escaped: true }
                } else if self.closes_string(quote, &token) {
                    ScanState::Default
                } else {
                    self.state
                };
            }
            ScanState::InComment(kind) => {
                self.emit(token.len, StyleCode::Comment);
                if self.closes_comment(kind, &token) {
                    self.state = ScanState::Default;
                }
            }
            ScanState::Default => self.classify_token(token),
        }
    }

    fn closes_string(&self, quote: Option<char>, token: &Token<'_>) -> bool {
        match (quote, token.single_char()) {
            (Some(open), Some(ch)) => open == ch,
            (None, Some(ch)) => self.profile.quotes.contains(&ch),
            _ => false,
        }
    }

    fn closes_comment(&self, kind: CommentKind, token: &Token<'_>) -> bool {
        let block_close = token
            .as_str()
            .is_some_and(|s| self.profile.is_block_comment_close(s));
        match kind {
            CommentKind::Line => token.has_line_terminator(),
            CommentKind::Block => block_close,
            CommentKind::Resumed => token.has_line_terminator() || block_close,
        }
    }

    fn classify_token(&mut self, token: Token<'a>) {
        let profile = self.profile;
        let text = token.as_str().unwrap_or("");

        if profile.is_class_introducer(text) {
            self.introducer(token, StyleCode::Class, true);
            return;
        }
        if profile.is_function_introducer(text) {
            self.introducer(token, StyleCode::FunctionDef, false);
            return;
        }
        if profile.is_keyword(text) {
            self.emit(token.len, StyleCode::Keyword);
            return;
        }
        if token.is(".") && self.cursor.peek(0).is_some_and(|t| self.is_name(t)) {
            self.attribute_access(token);
            return;
        }
        if token.is_numeric() || profile.is_self_name(text) {
            self.emit(token.len, StyleCode::Constant);
            return;
        }

        let ch = token.single_char();
        if let Some(ch) = ch {
            if profile.brackets.contains(&ch) {
                match ch {
                    '(' => self.paren_depth += 1,
                    ')' => self.paren_depth = self.paren_depth.saturating_sub(1),
                    _ => {}
                }
                self.emit(token.len, StyleCode::Bracket);
                return;
            }
            if profile.quotes.contains(&ch) {
                self.emit(token.len, StyleCode::String);
                self.state = ScanState::InString {
                    quote: Some(ch),
                    escaped: false,
                };
                return;
            }
        }

        if profile.is_line_comment(text) {
            self.emit(token.len, StyleCode::Comment);
            self.state = ScanState::InComment(CommentKind::Line);
            return;
        }
        if profile.is_block_comment_open(text) {
            self.emit(token.len, StyleCode::Comment);
            self.state = ScanState::InComment(CommentKind::Block);
            return;
        }
        if profile.keyword_arguments && self.paren_depth > 0 && self.is_keyword_argument(&token) {
            self.emit(token.len, StyleCode::KeyArgs);
            return;
        }
        if profile.is_builtin(text) || profile.is_operator_run(text) {
            self.emit(token.len, StyleCode::Type);
            return;
        }

        self.emit(token.len, StyleCode::Default);
    }

    /// Identifier that is not a keyword of the language
    fn is_name(&self, token: &Token<'_>) -> bool {
        token.is_identifier() && token.as_str().is_some_and(|s| !self.profile.is_keyword(s))
    }

    /// `class Name:` / `def name`
    ///
    /// The introducer is always a keyword. The name is only consumed when it
    /// is an identifier and, for classes, is followed by a gate character.
    fn introducer(&mut self, token: Token<'a>, name_style: StyleCode, gated: bool) {
        self.emit(token.len, StyleCode::Keyword);

        let Some(name_at) = self.cursor.skip_whitespace(0) else {
            return;
        };
        if !self.cursor.peek(name_at).is_some_and(|t| self.is_name(t)) {
            return;
        }
        if gated {
            let gate = self
                .cursor
                .skip_whitespace(name_at + 1)
                .and_then(|n| self.cursor.peek(n))
                .and_then(Token::single_char);
            if !gate.is_some_and(|ch| self.profile.class_gate.contains(&ch)) {
                return;
            }
        }

        for _ in 0..name_at {
            if let Some(space) = self.cursor.next() {
                self.emit(space.len, StyleCode::Default);
            }
        }
        if let Some(name) = self.cursor.next() {
            self.emit(name.len, name_style);
        }
    }

    /// `.name(` is a call, `.name` is a plain attribute
    fn attribute_access(&mut self, dot: Token<'a>) {
        self.emit(dot.len, StyleCode::Default);
        let Some(name) = self.cursor.next() else {
            return;
        };
        let style = if self.cursor.peek(0).is_some_and(|t| t.is("(")) {
            StyleCode::Function
        } else {
            StyleCode::Default
        };
        self.emit(name.len, style);
    }

    /// `name=` but not `name==`
    fn is_keyword_argument(&self, token: &Token<'_>) -> bool {
        if !token.is_identifier() {
            return false;
        }
        let Some(eq_at) = self.cursor.skip_whitespace(0) else {
            return false;
        };
        self.cursor.peek(eq_at).is_some_and(|t| t.is("="))
            && !self.cursor.peek(eq_at + 1).is_some_and(|t| t.is("="))
    }
}
