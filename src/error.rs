//! Error types for scilex

use thiserror::Error;

/// Result type alias for scilex operations
pub type Result<T> = std::result::Result<T, LexerError>;

/// Lexer error types
#[derive(Error, Debug)]
pub enum LexerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Theme parse error: {0}")]
    Theme(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid token pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("{0}")]
    Message(String),
}
