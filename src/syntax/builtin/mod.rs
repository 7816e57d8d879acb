//! Built-in language profiles
//!
//! This module provides language profiles for the languages the editor
//! highlights out of the box.

mod c;
mod json;
mod python;
mod rust;

use super::language::LanguageProfile;

/// Get all built-in language profiles
pub fn all_languages() -> Vec<LanguageProfile> {
    vec![
        python::python_language(),
        json::json_language(),
        rust::rust_language(),
        c::c_language(),
    ]
}
