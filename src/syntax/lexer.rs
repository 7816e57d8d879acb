//! The custom lexer: host-facing styling entry points
//!
//! Ties a language profile, its tokenizer and a theme together and exposes
//! the calls a host editor makes: style a dirty byte range, name a style,
//! reload the theme.

use std::sync::Arc;

use tracing::{debug, trace};

use super::classifier::{Classifier, ScanState};
use super::language::LanguageProfile;
use super::registry::LanguageRegistry;
use super::style::{StyleCode, StyleRun};
use super::tokens::Tokenizer;
use crate::error::Result;
use crate::theme::{Theme, ThemeWarning};

/// Text and per-byte styles owned by the host editor
pub trait StyleHost {
    /// Length of the text in bytes
    fn len(&self) -> usize;

    /// Whether the text is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes in `[start, end)`
    fn text(&self, start: usize, end: usize) -> &[u8];

    /// Style previously recorded for the byte at `pos`, if any
    fn style_at(&self, pos: usize) -> Option<StyleCode>;
}

/// Lexer for one editor/language pairing
pub struct CustomLexer {
    profile: Arc<LanguageProfile>,
    tokenizer: Tokenizer,
    theme: Theme,
}

impl CustomLexer {
    /// Create a lexer for a profile
    pub fn new(profile: Arc<LanguageProfile>, theme: Theme) -> Result<Self> {
        let tokenizer = Tokenizer::new(&profile.atomic_tokens())?;
        Ok(Self {
            profile,
            tokenizer,
            theme,
        })
    }

    /// Create a lexer for a registered language
    pub fn for_language(registry: &LanguageRegistry, name: &str, theme: Theme) -> Result<Self> {
        Self::new(registry.get(name)?, theme)
    }

    /// Name of the language being styled
    pub fn language(&self) -> &str {
        &self.profile.name
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Human-readable name of a style code
    pub fn style_name(&self, style: StyleCode) -> &'static str {
        style.description()
    }

    /// Replace the theme from a theme document
    ///
    /// Keeps the current theme when the document cannot be parsed at all.
    pub fn reload_theme(&mut self, source: &str) -> Result<Vec<ThemeWarning>> {
        let loaded = Theme::load(source)?;
        self.theme = loaded.theme;
        Ok(loaded.warnings)
    }

    /// Style a slice of text given the style of the byte before it
    pub fn style_text(&self, text: &[u8], prev: Option<StyleCode>) -> Vec<StyleRun> {
        self.style_from(text, ScanState::from_style(prev))
    }

    /// Style `[start, end)` of the host's text
    ///
    /// The range is clamped to the host text. The returned runs cover
    /// exactly the clamped range.
    pub fn style_range<H: StyleHost + ?Sized>(&self, host: &H, start: usize, end: usize) -> Vec<StyleRun> {
        let end = end.min(host.len());
        if start >= end {
            return Vec::new();
        }

        let state = self.resume_state(host, start);
        debug!(start, end, ?state, language = %self.profile.name, "styling range");
        self.style_from(host.text(start, end), state)
    }

    fn style_from(&self, text: &[u8], state: ScanState) -> Vec<StyleRun> {
        let tokens = self.tokenizer.tokenize(text);
        let (runs, end_state) = Classifier::new(&self.profile).classify(&tokens, state);
        trace!(tokens = tokens.len(), runs = runs.len(), ?end_state, "classified");
        runs
    }

    /// Reconstruct the classifier state at `start` from the host's styles
    ///
    /// A String or Comment style before `start` is traced back to the
    /// start of its run and the run is classified again, which recovers
    /// the opening quote, pending escapes and the comment kind. A run that
    /// does not begin with a string or comment opener falls back to the
    /// style alone.
    fn resume_state<H: StyleHost + ?Sized>(&self, host: &H, start: usize) -> ScanState {
        if start == 0 {
            return ScanState::Default;
        }
        let prev = host.style_at(start - 1);
        let Some(style @ (StyleCode::String | StyleCode::Comment)) = prev else {
            return ScanState::from_style(prev);
        };

        let mut run_start = start - 1;
        while run_start > 0 && host.style_at(run_start - 1) == Some(style) {
            run_start -= 1;
        }
        let run = host.text(run_start, start);
        if !self.opens_region(run, style) {
            return ScanState::from_style(prev);
        }

        let tokens = self.tokenizer.tokenize(run);
        let (_, state) = Classifier::new(&self.profile).classify(&tokens, ScanState::Default);
        trace!(run_start, ?state, "replayed styled run");
        state
    }

    /// Whether `run` starts with the opener of a `style` region
    fn opens_region(&self, run: &[u8], style: StyleCode) -> bool {
        let profile = &self.profile;
        match style {
            StyleCode::String => run
                .first()
                .is_some_and(|&b| profile.quotes.contains(&(b as char))),
            StyleCode::Comment => {
                let line = profile.line_comments.iter().map(String::as_str);
                let block = profile.block_comment.iter().map(|(open, _)| open.as_str());
                line.chain(block).any(|marker| run.starts_with(marker.as_bytes()))
            }
            _ => false,
        }
    }
}
