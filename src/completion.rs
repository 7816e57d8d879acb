//! Asynchronous code completion
//!
//! Completion requests run on tokio's blocking pool, away from the styling
//! path. Every request gets a sequence number; a result is delivered only
//! if no newer request was made while it was computed, and a
//! `SuggestionSet` only ever moves forward in sequence. Provider failures
//! are logged and turn into an empty suggestion list.

use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::syntax::{LanguageProfile, Tokenizer};

/// A completion request for one cursor position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Full source text of the file
    pub source: String,
    /// Path of the file being edited
    pub path: PathBuf,
    /// 1-based line
    pub line: usize,
    /// 0-based column, in characters
    pub column: usize,
}

/// A single suggestion
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Completion {
    pub name: String,
}

impl Completion {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Completion provider errors
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Position {line}:{column} is outside the source")]
    Position { line: usize, column: usize },

    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Completion provider failed: {0}")]
    Provider(String),
}

/// Something that can compute completions
pub trait CompletionProvider: Send + Sync + 'static {
    fn complete(&self, request: &CompletionRequest) -> Result<Vec<Completion>, CompletionError>;
}

/// Suggestions computed for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    pub sequence: u64,
    pub items: Vec<Completion>,
}

/// Dispatches completion requests to a provider
pub struct Autocompleter {
    runtime: Handle,
    provider: Arc<dyn CompletionProvider>,
    latest: Arc<AtomicU64>,
    results: mpsc::UnboundedSender<CompletionResult>,
}

impl Autocompleter {
    /// Create a worker; results arrive on the returned receiver
    pub fn new(
        runtime: Handle,
        provider: Arc<dyn CompletionProvider>,
    ) -> (Self, mpsc::UnboundedReceiver<CompletionResult>) {
        let (results, rx) = mpsc::unbounded_channel();
        let worker = Self {
            runtime,
            provider,
            latest: Arc::new(AtomicU64::new(0)),
            results,
        };
        (worker, rx)
    }

    /// Sequence number of the most recent request
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Start computing completions for `request`
    ///
    /// Returns the request's sequence number and the task handle.
    pub fn request(&self, request: CompletionRequest) -> (u64, JoinHandle<()>) {
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let provider = Arc::clone(&self.provider);
        let latest = Arc::clone(&self.latest);
        let results = self.results.clone();

        let handle = self.runtime.spawn_blocking(move || {
            let items = run_provider(provider.as_ref(), &request);
            if latest.load(Ordering::SeqCst) != sequence {
                debug!(sequence, "discarding stale completion result");
                return;
            }
            // The receiver may already be gone when the editor shuts down
            let _ = results.send(CompletionResult { sequence, items });
        });

        (sequence, handle)
    }
}

fn run_provider(provider: &dyn CompletionProvider, request: &CompletionRequest) -> Vec<Completion> {
    match panic::catch_unwind(AssertUnwindSafe(|| provider.complete(request))) {
        Ok(Ok(items)) => items,
        Ok(Err(e)) => {
            warn!("Autocomplete error: {}", e);
            Vec::new()
        }
        Err(_) => {
            warn!("Autocomplete error: provider panicked");
            Vec::new()
        }
    }
}

/// The suggestions currently shown by the host
#[derive(Debug, Clone, Default)]
pub struct SuggestionSet {
    sequence: u64,
    items: Vec<Completion>,
}

impl SuggestionSet {
    /// Replace the suggestions if `result` is newer than the current set
    pub fn apply(&mut self, result: CompletionResult) -> bool {
        if result.sequence <= self.sequence {
            return false;
        }
        self.sequence = result.sequence;
        self.items = result.items;
        true
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn items(&self) -> &[Completion] {
        &self.items
    }
}

/// Completes the word at the cursor from a language profile's keywords and
/// builtins plus the identifiers found in the source
pub struct KeywordCompleter {
    profile: Arc<LanguageProfile>,
    tokenizer: Tokenizer,
}

impl KeywordCompleter {
    pub fn new(profile: Arc<LanguageProfile>) -> crate::error::Result<Self> {
        let tokenizer = Tokenizer::new(&profile.atomic_tokens())?;
        Ok(Self { profile, tokenizer })
    }

    /// Word characters immediately before the cursor
    fn prefix(request: &CompletionRequest) -> Result<String, CompletionError> {
        let position = CompletionError::Position {
            line: request.line,
            column: request.column,
        };
        let line = request
            .line
            .checked_sub(1)
            .and_then(|n| request.source.lines().nth(n))
            .ok_or(position)?;
        let chars: Vec<char> = line.chars().collect();
        if request.column > chars.len() {
            return Err(CompletionError::Position {
                line: request.line,
                column: request.column,
            });
        }
        let before = &chars[..request.column];
        let start = before
            .iter()
            .rposition(|c| !(c.is_alphanumeric() || *c == '_'))
            .map_or(0, |i| i + 1);
        Ok(before[start..].iter().collect())
    }
}

impl CompletionProvider for KeywordCompleter {
    fn complete(&self, request: &CompletionRequest) -> Result<Vec<Completion>, CompletionError> {
        let prefix = Self::prefix(request)?;
        if prefix.is_empty() {
            return Ok(Vec::new());
        }
        let lowered = prefix.to_lowercase();

        let identifiers = self
            .tokenizer
            .tokenize(request.source.as_bytes())
            .into_iter()
            .filter(|t| t.is_identifier())
            .filter_map(|t| t.as_str());
        let candidates = self
            .profile
            .keywords
            .iter()
            .chain(self.profile.builtins.iter())
            .map(String::as_str)
            .chain(identifiers);

        let names: BTreeSet<&str> = candidates
            .filter(|name| *name != prefix && name.to_lowercase().starts_with(&lowered))
            .collect();
        Ok(names.into_iter().map(Completion::new).collect())
    }
}
