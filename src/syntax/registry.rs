//! Language profile registry
//!
//! Maps language names and file extensions to shared language profiles.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::builtin;
use super::language::LanguageProfile;
use crate::error::{LexerError, Result};

/// Registry of language profiles, keyed by lowercase name
pub struct LanguageRegistry {
    /// Registered profiles
    languages: HashMap<String, Arc<LanguageProfile>>,
    /// Extension to language key mapping
    extension_map: HashMap<String, String>,
}

impl LanguageRegistry {
    /// Create a registry with the built-in languages
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for lang in builtin::all_languages() {
            registry.register(lang);
        }
        registry
    }

    /// Create a registry with no languages
    pub fn empty() -> Self {
        Self {
            languages: HashMap::new(),
            extension_map: HashMap::new(),
        }
    }

    /// Register a profile, replacing any profile with the same name
    pub fn register(&mut self, lang: LanguageProfile) {
        let key = lang.name.to_lowercase();
        for ext in &lang.extensions {
            self.extension_map.insert(ext.to_lowercase(), key.clone());
        }
        debug!(language = %lang.name, extensions = ?lang.extensions, "registered language");
        self.languages.insert(key, Arc::new(lang));
    }

    /// Resolve a profile by name (case-insensitive)
    pub fn get(&self, name: &str) -> Result<Arc<LanguageProfile>> {
        self.languages
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| LexerError::UnknownLanguage(name.to_string()))
    }

    /// Detect the language name from a filename
    pub fn detect_language(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        let key = self.extension_map.get(&ext)?;
        self.languages.get(key).map(|lang| lang.name.as_str())
    }

    /// Resolve the profile for a file from its extension
    pub fn resolve_path(&self, filename: &Path) -> Result<Arc<LanguageProfile>> {
        match self.detect_language(filename) {
            Some(name) => self.get(name),
            None => Err(LexerError::UnknownLanguage(filename.display().to_string())),
        }
    }

    /// List registered language names, sorted
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.values().map(|l| l.name.as_str()).collect();
        names.sort();
        names
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
