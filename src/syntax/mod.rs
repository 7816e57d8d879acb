//! Syntax highlighting module
//!
//! This module provides the lexical highlighter:
//! - Tokenizing text slices into whitespace, word and symbol tokens
//! - Classifying tokens into style codes with lookahead
//! - Language profiles and the registry that resolves them
//! - The lexer facade a host editor calls to restyle dirty ranges

mod builtin;
mod classifier;
mod language;
mod lexer;
mod registry;
mod style;
mod tokens;

pub use classifier::{Classifier, CommentKind, ScanState};
pub use language::LanguageProfile;
pub use lexer::{CustomLexer, StyleHost};
pub use registry::LanguageRegistry;
pub use style::{covered_len, StyleCode, StyleRun};
pub use tokens::{Token, Tokenizer, BLOCK_COMMENT_DELIMITERS};
