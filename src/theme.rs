//! Theme loading
//!
//! A theme maps every style code to a foreground colour, a background
//! ("paper") colour and a font. Themes are JSON documents:
//!
//! ```json
//! {
//!   "theme": {
//!     "syntax": [
//!       { "keyword": { "color": "#c678dd", "font": { "font-weight": "bold" } } },
//!       { "comments": { "color": "#5c6370", "paper": "#282c34",
//!                       "font": { "family": "Consolas", "font-size": 14, "italic": true } } }
//!     ]
//!   }
//! }
//! ```
//!
//! Problems inside the document (unknown style names, bad colours, unknown
//! font weights) never abort loading. They are collected as warnings and
//! logged, and the affected attributes keep their defaults.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::error::Result;
use crate::syntax::StyleCode;

/// Bundled dark theme
const ONE_DARK: &str = include_str!("../themes/one_dark.json");

pub const DEFAULT_FOREGROUND: Color = Color::rgb(0xab, 0xb2, 0xbf);
pub const DEFAULT_BACKGROUND: Color = Color::rgb(0x28, 0x2c, 0x34);
pub const DEFAULT_FONT_FAMILY: &str = "Consolas";
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Parse `#rgb`, `#rrggbb` or `#aarrggbb`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|n| n * 17);
                Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self {
                a: byte(0)?,
                r: byte(2)?,
                g: byte(4)?,
                b: byte(6)?,
            }),
            _ => None,
        }
    }

    /// `#rrggbb`, dropping alpha
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Font weights, with their CSS/Qt numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FontWeight {
    Thin,
    ExtraLight,
    Light,
    #[default]
    Normal,
    Medium,
    DemiBold,
    Bold,
    ExtraBold,
    Black,
}

impl FontWeight {
    /// Resolve a weight name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "thin" => Some(FontWeight::Thin),
            "extralight" => Some(FontWeight::ExtraLight),
            "light" => Some(FontWeight::Light),
            "normal" => Some(FontWeight::Normal),
            "medium" => Some(FontWeight::Medium),
            "demibold" => Some(FontWeight::DemiBold),
            "bold" => Some(FontWeight::Bold),
            "extrabold" => Some(FontWeight::ExtraBold),
            "black" => Some(FontWeight::Black),
            _ => None,
        }
    }

    pub fn value(self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::ExtraLight => 200,
            FontWeight::Light => 300,
            FontWeight::Normal => 400,
            FontWeight::Medium => 500,
            FontWeight::DemiBold => 600,
            FontWeight::Bold => 700,
            FontWeight::ExtraBold => 800,
            FontWeight::Black => 900,
        }
    }
}

/// Font attributes of a style
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f32,
    pub weight: FontWeight,
    pub italic: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: DEFAULT_FONT_FAMILY.to_string(),
            size: DEFAULT_FONT_SIZE,
            weight: FontWeight::Normal,
            italic: false,
        }
    }
}

/// Visual attributes of one style
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeEntry {
    pub style: StyleCode,
    pub foreground: Color,
    pub background: Color,
    pub font: Font,
}

impl ThemeEntry {
    fn new(style: StyleCode) -> Self {
        Self {
            style,
            foreground: DEFAULT_FOREGROUND,
            background: DEFAULT_BACKGROUND,
            font: Font::default(),
        }
    }
}

/// Non-fatal problems found while loading a theme
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThemeWarning {
    #[error("{0} is not a valid style name")]
    UnknownStyle(String),

    #[error("style {style}: unknown font weight {weight:?}, using normal")]
    UnknownFontWeight { style: String, weight: String },

    #[error("style {style}: invalid {field} colour {value:?}")]
    InvalidColor {
        style: String,
        field: &'static str,
        value: String,
    },

    #[error("style {style}: malformed entry: {reason}")]
    MalformedEntry { style: String, reason: String },
}

/// A theme together with the warnings produced while loading it
#[derive(Debug, Clone)]
pub struct ThemeLoad {
    pub theme: Theme,
    pub warnings: Vec<ThemeWarning>,
}

/// Style-code to visual-attribute mapping
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// One entry per style code, indexed by code
    entries: Vec<ThemeEntry>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            entries: StyleCode::ALL.into_iter().map(ThemeEntry::new).collect(),
        }
    }
}

impl Theme {
    /// Attributes for a style
    pub fn entry(&self, style: StyleCode) -> &ThemeEntry {
        &self.entries[style.code() as usize]
    }

    /// All entries, ordered by style code
    pub fn entries(&self) -> &[ThemeEntry] {
        &self.entries
    }

    /// The bundled One Dark theme
    pub fn one_dark() -> Self {
        match Self::load(ONE_DARK) {
            Ok(loaded) => loaded.theme,
            Err(e) => {
                warn!("Theme error: bundled theme failed to load: {}", e);
                Self::default()
            }
        }
    }

    /// Load a theme from a file
    pub fn load_file(path: impl AsRef<Path>) -> Result<ThemeLoad> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::load(&source)
    }

    /// Load a theme document
    ///
    /// Fails only when the source is not valid JSON. A document of the
    /// wrong shape loads as the defaults with a warning.
    pub fn load(source: &str) -> Result<ThemeLoad> {
        let document: Value = serde_json::from_str(source)?;
        let mut theme = Theme::default();
        let mut warnings = Vec::new();

        let section = match document {
            Value::Object(mut root) => root.remove("theme"),
            _ => None,
        };
        match section {
            Some(Value::Object(mut section)) => {
                theme.apply_syntax(section.remove("syntax"), &mut warnings)
            }
            Some(other) => warnings.push(malformed("theme", "an object", &other)),
            None => warnings.push(ThemeWarning::MalformedEntry {
                style: "theme".to_string(),
                reason: "missing theme section".to_string(),
            }),
        }

        for warning in &warnings {
            warn!("Theme error: {}", warning);
        }

        Ok(ThemeLoad { theme, warnings })
    }

    fn apply_syntax(&mut self, syntax: Option<Value>, warnings: &mut Vec<ThemeWarning>) {
        let items = match syntax {
            None | Some(Value::Null) => return,
            Some(Value::Array(items)) => items,
            Some(other) => {
                warnings.push(malformed("theme.syntax", "a list", &other));
                return;
            }
        };
        for (i, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(entries) => {
                    for (name, value) in entries {
                        self.apply_entry(&name, value, warnings);
                    }
                }
                other => warnings.push(malformed(&format!("theme.syntax[{}]", i), "an object", &other)),
            }
        }
    }

    fn apply_entry(&mut self, name: &str, value: Value, warnings: &mut Vec<ThemeWarning>) {
        let Some(style) = StyleCode::from_theme_key(name) else {
            warnings.push(ThemeWarning::UnknownStyle(name.to_string()));
            return;
        };
        let spec: StyleSpec = match serde_json::from_value(value) {
            Ok(spec) => spec,
            Err(e) => {
                warnings.push(ThemeWarning::MalformedEntry {
                    style: name.to_string(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        let entry = &mut self.entries[style.code() as usize];

        if let Some(color) = spec.color {
            match Color::from_hex(&color) {
                Some(c) => entry.foreground = c,
                None => warnings.push(ThemeWarning::InvalidColor {
                    style: name.to_string(),
                    field: "color",
                    value: color,
                }),
            }
        }
        if let Some(paper) = spec.paper {
            match Color::from_hex(&paper) {
                Some(c) => entry.background = c,
                None => warnings.push(ThemeWarning::InvalidColor {
                    style: name.to_string(),
                    field: "paper",
                    value: paper,
                }),
            }
        }
        if let Some(font) = spec.font {
            let weight = match font.weight {
                Some(weight) => match FontWeight::from_name(&weight) {
                    Some(w) => w,
                    None => {
                        warnings.push(ThemeWarning::UnknownFontWeight {
                            style: name.to_string(),
                            weight,
                        });
                        FontWeight::Normal
                    }
                },
                None => FontWeight::Normal,
            };
            entry.font = Font {
                family: font.family.unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
                size: font.size.unwrap_or(DEFAULT_FONT_SIZE),
                weight,
                italic: font.italic.unwrap_or(false),
            };
        }
    }
}

fn malformed(style: &str, expected: &str, found: &Value) -> ThemeWarning {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    };
    ThemeWarning::MalformedEntry {
        style: style.to_string(),
        reason: format!("expected {}, found {}", expected, found),
    }
}

#[derive(Debug, Deserialize)]
struct StyleSpec {
    color: Option<String>,
    paper: Option<String>,
    font: Option<FontSpec>,
}

#[derive(Debug, Deserialize)]
struct FontSpec {
    family: Option<String>,
    #[serde(rename = "font-size")]
    size: Option<f32>,
    #[serde(rename = "font-weight")]
    weight: Option<String>,
    italic: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_color_parsing() {
        assert_eq!(Color::from_hex("#abb2bf"), Some(Color::rgb(0xab, 0xb2, 0xbf)));
        assert_eq!(Color::from_hex("#fff"), Some(Color::rgb(255, 255, 255)));
        assert_eq!(Color::from_hex("#80ff0000").map(|c| (c.a, c.r)), Some((0x80, 0xff)));
        assert_eq!(Color::from_hex("abb2bf"), None);
        assert_eq!(Color::from_hex("#abcd"), None);
        assert_eq!(Color::from_hex("#gggggg"), None);
        assert_eq!(Color::rgb(1, 2, 255).to_hex(), "#0102ff");
    }

    #[test]
    fn test_font_weights() {
        assert_eq!(FontWeight::from_name("bold"), Some(FontWeight::Bold));
        assert_eq!(FontWeight::from_name("DemiBold"), Some(FontWeight::DemiBold));
        assert_eq!(FontWeight::from_name("heavy"), None);
        assert_eq!(FontWeight::Black.value(), 900);
        assert_eq!(FontWeight::default().value(), 400);
    }

    #[test]
    fn test_defaults() {
        let theme = Theme::default();
        assert_eq!(theme.entries().len(), StyleCode::ALL.len());
        let entry = theme.entry(StyleCode::Comment);
        assert_eq!(entry.style, StyleCode::Comment);
        assert_eq!(entry.foreground, DEFAULT_FOREGROUND);
        assert_eq!(entry.background, DEFAULT_BACKGROUND);
        assert_eq!(entry.font, Font::default());
    }

    #[test]
    fn test_load_entries() {
        let source = r##"{
            "theme": { "syntax": [
                { "keyword": { "color": "#c678dd", "font": { "font-weight": "bold" } } },
                { "comments": { "color": "#5c6370", "paper": "#000000",
                                "font": { "family": "Fira Code", "font-size": 12, "italic": true } } }
            ] }
        }"##;
        let loaded = Theme::load(source).unwrap();
        assert!(loaded.warnings.is_empty());

        let keyword = loaded.theme.entry(StyleCode::Keyword);
        assert_eq!(keyword.foreground.to_hex(), "#c678dd");
        assert_eq!(keyword.background, DEFAULT_BACKGROUND);
        assert_eq!(keyword.font.weight, FontWeight::Bold);
        assert_eq!(keyword.font.family, DEFAULT_FONT_FAMILY);

        let comment = loaded.theme.entry(StyleCode::Comment);
        assert_eq!(comment.background.to_hex(), "#000000");
        assert_eq!(comment.font.family, "Fira Code");
        assert_eq!(comment.font.size, 12.0);
        assert!(comment.font.italic);
    }

    #[test]
    fn test_unknown_style_is_skipped() {
        let source = r##"{"theme": {"syntax": [
            {"foo": {"color": "#ffffff"}},
            {"string": {"color": "#98c379"}}
        ]}}"##;
        let loaded = Theme::load(source).unwrap();
        assert_eq!(loaded.warnings, vec![ThemeWarning::UnknownStyle("foo".to_string())]);
        assert_eq!(loaded.theme.entry(StyleCode::String).foreground.to_hex(), "#98c379");
        assert_eq!(loaded.theme.entry(StyleCode::Keyword).foreground, DEFAULT_FOREGROUND);
    }

    #[test]
    fn test_unknown_weight_falls_back() {
        let source = r#"{"theme": {"syntax": [{"classes": {"font": {"font-weight": "heavy"}}}]}}"#;
        let loaded = Theme::load(source).unwrap();
        assert_eq!(loaded.theme.entry(StyleCode::Class).font.weight, FontWeight::Normal);
        assert!(matches!(
            &loaded.warnings[..],
            [ThemeWarning::UnknownFontWeight { weight, .. }] if weight == "heavy"
        ));
    }

    #[test]
    fn test_bad_values_are_warnings() {
        let source = r##"{"theme": {"syntax": [
            {"types": {"color": "red", "paper": "#123"}},
            {"brackets": {"font": {"italic": "yes"}}},
            {"constants": 7}
        ]}}"##;
        let loaded = Theme::load(source).unwrap();
        assert_eq!(loaded.warnings.len(), 3);
        assert_eq!(loaded.theme.entry(StyleCode::Type).foreground, DEFAULT_FOREGROUND);
        assert_eq!(loaded.theme.entry(StyleCode::Type).background.to_hex(), "#112233");
        assert!(!loaded.theme.entry(StyleCode::Bracket).font.italic);
    }

    #[test]
    fn test_malformed_items_are_warnings() {
        let source = r##"{"theme": {"syntax": [
            "keyword",
            42,
            {"keyword": {"color": "#c678dd"}}
        ]}}"##;
        let loaded = Theme::load(source).unwrap();
        assert_eq!(loaded.warnings.len(), 2);
        assert!(matches!(
            &loaded.warnings[0],
            ThemeWarning::MalformedEntry { style, .. } if style == "theme.syntax[0]"
        ));
        assert_eq!(loaded.theme.entry(StyleCode::Keyword).foreground.to_hex(), "#c678dd");

        let loaded = Theme::load(r#"{"theme": {"syntax": {"keyword": {}}}}"#).unwrap();
        assert!(matches!(
            &loaded.warnings[..],
            [ThemeWarning::MalformedEntry { style, reason }]
                if style == "theme.syntax" && reason == "expected a list, found an object"
        ));
        assert_eq!(loaded.theme, Theme::default());
    }

    #[test]
    fn test_missing_syntax_section() {
        let loaded = Theme::load(r#"{"theme": {}}"#).unwrap();
        assert!(loaded.warnings.is_empty());
        assert_eq!(loaded.theme, Theme::default());
    }

    #[test]
    fn test_invalid_document() {
        assert!(Theme::load("{").is_err());

        let loaded = Theme::load(r#"{"colors": []}"#).unwrap();
        assert_eq!(loaded.theme, Theme::default());
        assert!(matches!(
            &loaded.warnings[..],
            [ThemeWarning::MalformedEntry { style, .. }] if style == "theme"
        ));
        assert_eq!(Theme::load("[1, 2]").unwrap().warnings.len(), 1);
        assert_eq!(Theme::load(r#"{"theme": "dark"}"#).unwrap().warnings.len(), 1);
    }

    #[test]
    fn test_one_dark_is_complete() {
        let loaded = Theme::load(ONE_DARK).unwrap();
        assert!(loaded.warnings.is_empty());
        assert_ne!(loaded.theme.entry(StyleCode::Keyword).foreground, DEFAULT_FOREGROUND);
        assert_eq!(Theme::one_dark(), loaded.theme);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r##"{{"theme": {{"syntax": [{{"functions": {{"color": "#61afef"}}}}]}}}}"##).unwrap();
        let loaded = Theme::load_file(file.path()).unwrap();
        assert_eq!(loaded.theme.entry(StyleCode::Function).foreground.to_hex(), "#61afef");
        assert!(Theme::load_file("/nonexistent/theme.json").is_err());
    }
}
