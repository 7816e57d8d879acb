//! JSON language profile

use crate::syntax::language::LanguageProfile;

/// Create JSON language profile
pub fn json_language() -> LanguageProfile {
    let mut lang = LanguageProfile::new("JSON");
    lang.add_extension("json");

    lang.add_keywords(&["true", "false", "null"]);
    lang.add_brackets("[]{}");
    lang.add_operators(":,-");
    lang.add_quotes("\"");
    lang.escape = Some('\\');

    lang
}
