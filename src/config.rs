//! Configuration file support
//!
//! Loads settings from ~/.scilex.toml (or %USERPROFILE%\.scilex.toml on Windows)
//!
//! Example:
//! ```toml
//! # scilex configuration
//! theme = "/home/me/themes/solarized.json"
//! language = "Python"
//! line-numbers = true
//! color = true
//! log-level = "debug"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::Result;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Theme document to load instead of the bundled one
    pub theme: Option<PathBuf>,
    /// Language to use regardless of file extension
    pub language: Option<String>,
    /// Whether to prefix output lines with line numbers
    pub line_numbers: bool,
    /// Whether to emit ANSI colours
    pub color: bool,
    /// Log level used when no -v flag is given
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            language: None,
            line_numbers: false,
            color: true,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".scilex.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".scilex.toml"))
        }
    }

    /// Load configuration from the default location
    ///
    /// A missing file gives the defaults; an unreadable or invalid one is
    /// logged and also gives the defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(crate::error::LexerError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(e) => {
                warn!("Config error in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load configuration from a file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
