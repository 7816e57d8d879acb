//! Style codes and style runs
//!
//! A style code is the small integer a host stores for every byte of the
//! buffer. The numeric values are persisted by the host and read back to
//! resume styling, so they must never change.

/// Style categories assigned to runs of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum StyleCode {
    /// Plain text
    #[default]
    Default = 0,
    /// Language keywords (if, def, class, ...)
    Keyword = 1,
    /// Builtin names and operators
    Type = 2,
    /// String literals, including the quotes
    String = 3,
    /// Keyword arguments in a call (`key=value`)
    KeyArgs = 4,
    /// Brackets: ( ) [ ] { }
    Bracket = 5,
    /// Line and block comments
    Comment = 6,
    /// Numeric literals and the self-reference name
    Constant = 7,
    /// Method names at a call site (`obj.method(`)
    Function = 8,
    /// Class names at their definition
    Class = 9,
    /// Function names at their definition
    FunctionDef = 10,
}

impl StyleCode {
    /// Every style code, ordered by numeric value
    pub const ALL: [StyleCode; 11] = [
        StyleCode::Default,
        StyleCode::Keyword,
        StyleCode::Type,
        StyleCode::String,
        StyleCode::KeyArgs,
        StyleCode::Bracket,
        StyleCode::Comment,
        StyleCode::Constant,
        StyleCode::Function,
        StyleCode::Class,
        StyleCode::FunctionDef,
    ];

    /// The numeric value stored by the host
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a style from its stored numeric value
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Human-readable name, used for diagnostics and tooling
    pub fn description(self) -> &'static str {
        match self {
            StyleCode::Default => "DEFAULT",
            StyleCode::Keyword => "KEYWORD",
            StyleCode::Type => "TYPES",
            StyleCode::String => "STRING",
            StyleCode::KeyArgs => "KEYARGS",
            StyleCode::Bracket => "BRACKETS",
            StyleCode::Comment => "COMMENTS",
            StyleCode::Constant => "CONSTANTS",
            StyleCode::Function => "FUNCTIONS",
            StyleCode::Class => "CLASSES",
            StyleCode::FunctionDef => "FUNCTION_DEF",
        }
    }

    /// Key used for this style in theme documents
    pub fn theme_key(self) -> &'static str {
        match self {
            StyleCode::Default => "default",
            StyleCode::Keyword => "keyword",
            StyleCode::Type => "types",
            StyleCode::String => "string",
            StyleCode::KeyArgs => "keyargs",
            StyleCode::Bracket => "brackets",
            StyleCode::Comment => "comments",
            StyleCode::Constant => "constants",
            StyleCode::Function => "functions",
            StyleCode::Class => "classes",
            StyleCode::FunctionDef => "function_def",
        }
    }

    /// Parse a style from its theme document key
    pub fn from_theme_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.theme_key() == key)
    }
}

/// A run of `length` bytes sharing one style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRun {
    /// Length in bytes, always at least 1
    pub length: usize,
    /// Style for every byte of the run
    pub style: StyleCode,
}

impl StyleRun {
    /// Create a new run
    pub fn new(length: usize, style: StyleCode) -> Self {
        Self { length, style }
    }
}

/// Total number of bytes covered by a run sequence
pub fn covered_len(runs: &[StyleRun]) -> usize {
    runs.iter().map(|run| run.length).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(StyleCode::Default.code(), 0);
        assert_eq!(StyleCode::String.code(), 3);
        assert_eq!(StyleCode::Comment.code(), 6);
        assert_eq!(StyleCode::FunctionDef.code(), 10);
        for (i, style) in StyleCode::ALL.iter().enumerate() {
            assert_eq!(style.code() as usize, i);
        }
    }

    #[test]
    fn test_from_code() {
        assert_eq!(StyleCode::from_code(1), Some(StyleCode::Keyword));
        assert_eq!(StyleCode::from_code(9), Some(StyleCode::Class));
        assert_eq!(StyleCode::from_code(11), None);
        assert_eq!(StyleCode::from_code(255), None);
    }

    #[test]
    fn test_theme_keys() {
        assert_eq!(StyleCode::from_theme_key("classes"), Some(StyleCode::Class));
        assert_eq!(StyleCode::from_theme_key("function_def"), Some(StyleCode::FunctionDef));
        assert_eq!(StyleCode::from_theme_key("Keyword"), None);
        assert_eq!(StyleCode::from_theme_key("foo"), None);
    }

    #[test]
    fn test_descriptions_unique() {
        let mut names: Vec<_> = StyleCode::ALL.iter().map(|s| s.description()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), StyleCode::ALL.len());
    }

    #[test]
    fn test_covered_len() {
        let runs = [
            StyleRun::new(5, StyleCode::Keyword),
            StyleRun::new(1, StyleCode::Default),
            StyleRun::new(3, StyleCode::Class),
        ];
        assert_eq!(covered_len(&runs), 9);
        assert_eq!(covered_len(&[]), 0);
    }
}
