//! scilex - an incremental, stateful lexical highlighter
//!
//! Classifies ranges of source text into style codes as an editor's text
//! changes, resuming from the style recorded just before each range, and
//! maps style codes to colours and fonts through a JSON theme.

pub mod completion;
pub mod config;
pub mod document;
pub mod error;
pub mod syntax;
pub mod terminal;
pub mod theme;

pub use document::StyledDocument;
pub use error::{LexerError, Result};
pub use syntax::{CustomLexer, LanguageProfile, LanguageRegistry, StyleCode, StyleHost, StyleRun};
pub use theme::{Theme, ThemeLoad, ThemeWarning};
