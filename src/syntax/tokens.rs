//! Tokenizer for syntax highlighting
//!
//! Splits a text slice into whitespace runs (ending at a line feed), word
//! runs and single other characters. A small set of multi-character
//! sequences (block comment delimiters, plus whatever comment markers the
//! language needs) are kept whole so the classifier can see them as one
//! token.

use regex::bytes::Regex;

use crate::error::Result;

/// Sequences that are always tokenized atomically
pub const BLOCK_COMMENT_DELIMITERS: [&str; 2] = ["*/", "/*"];

/// A lexical token: a view into the slice being styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Raw bytes of the token
    pub text: &'a [u8],
    /// Encoded length in bytes (never zero)
    pub len: usize,
}

impl<'a> Token<'a> {
    fn new(text: &'a [u8]) -> Self {
        Self { text, len: text.len() }
    }

    /// Token text, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.text).ok()
    }

    /// The token's only character, if it is exactly one character long
    pub fn single_char(&self) -> Option<char> {
        let mut chars = self.as_str()?.chars();
        let ch = chars.next()?;
        chars.next().is_none().then_some(ch)
    }

    /// Check whether the token is exactly `text`
    pub fn is(&self, text: &str) -> bool {
        self.text == text.as_bytes()
    }

    /// Whitespace run
    pub fn is_whitespace(&self) -> bool {
        self.as_str()
            .is_some_and(|s| !s.is_empty() && s.chars().all(char::is_whitespace))
    }

    /// Token contains (or is) a line terminator
    pub fn has_line_terminator(&self) -> bool {
        self.text.iter().any(|&b| b == b'\n' || b == b'\r')
    }

    /// Word run: letters, digits and underscore
    pub fn is_word(&self) -> bool {
        self.as_str()
            .is_some_and(|s| !s.is_empty() && s.chars().all(is_word_char))
    }

    /// Word run that does not start with a digit
    pub fn is_identifier(&self) -> bool {
        self.is_word()
            && self
                .as_str()
                .and_then(|s| s.chars().next())
                .is_some_and(|c| c.is_alphabetic() || c == '_')
    }

    /// Word run that starts with a numeric character (`42`, `0x1F`, `1_000`)
    pub fn is_numeric(&self) -> bool {
        self.is_word()
            && self
                .as_str()
                .and_then(|s| s.chars().next())
                .is_some_and(char::is_numeric)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Regex-driven tokenizer
///
/// Holds no state between calls; one instance can be shared by every
/// styling call of a lexer.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    /// Create a tokenizer that keeps `atoms` whole, in addition to the
    /// block comment delimiters
    pub fn new(atoms: &[&str]) -> Result<Self> {
        let mut sequences: Vec<&str> = BLOCK_COMMENT_DELIMITERS
            .iter()
            .copied()
            .chain(atoms.iter().copied())
            .filter(|s| s.chars().count() > 1)
            .collect();
        // Longest first so that "///" would win over "//"
        sequences.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        sequences.dedup();

        let mut alternatives: Vec<String> = sequences.iter().map(|s| regex::escape(s)).collect();
        // Whitespace never runs past a line feed, so a line tokenizes the
        // same on its own as inside the whole text
        alternatives.push(r"[^\S\n]*\n".to_string());
        alternatives.push(r"[^\S\n]+".to_string());
        alternatives.push(r"\w+".to_string());
        alternatives.push(r"\W".to_string());
        // Any byte not forming a valid character
        alternatives.push(r"(?s-u:.)".to_string());

        let pattern = Regex::new(&alternatives.join("|"))?;
        Ok(Self { pattern })
    }

    /// Split `text` into tokens that cover it exactly
    pub fn tokenize<'a>(&self, text: &'a [u8]) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        for m in self.pattern.find_iter(text) {
            if m.start() > pos {
                tokens.push(Token::new(&text[pos..m.start()]));
            }
            if m.end() > m.start() {
                tokens.push(Token::new(m.as_bytes()));
            }
            pos = m.end();
        }
        if pos < text.len() {
            tokens.push(Token::new(&text[pos..]));
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(tokens: &[Token<'a>]) -> Vec<&'a str> {
        tokens.iter().map(|t| t.as_str().unwrap()).collect()
    }

    #[test]
    fn test_basic_split() {
        let tokenizer = Tokenizer::new(&[]).unwrap();
        let tokens = tokenizer.tokenize(b"class Foo(Base):\n    pass");
        assert_eq!(
            texts(&tokens),
            vec!["class", " ", "Foo", "(", "Base", ")", ":", "\n", "    ", "pass"]
        );
    }

    #[test]
    fn test_whitespace_stops_at_line_feed() {
        let tokenizer = Tokenizer::new(&[]).unwrap();
        let tokens = tokenizer.tokenize(b"a \r\n\n  b");
        assert_eq!(texts(&tokens), vec!["a", " \r\n", "\n", "  ", "b"]);
    }

    #[test]
    fn test_block_comment_delimiters_are_atomic() {
        let tokenizer = Tokenizer::new(&[]).unwrap();
        let tokens = tokenizer.tokenize(b"a/*b*/c");
        assert_eq!(texts(&tokens), vec!["a", "/*", "b", "*/", "c"]);

        let tokens = tokenizer.tokenize(b"**/");
        assert_eq!(texts(&tokens), vec!["*", "*/"]);
    }

    #[test]
    fn test_extra_atoms() {
        let tokenizer = Tokenizer::new(&["//", "#"]).unwrap();
        let tokens = tokenizer.tokenize(b"x // y");
        assert_eq!(texts(&tokens), vec!["x", " ", "//", " ", "y"]);
    }

    #[test]
    fn test_byte_lengths() {
        let tokenizer = Tokenizer::new(&[]).unwrap();
        let text = "héllo → wörld";
        let tokens = tokenizer.tokenize(text.as_bytes());
        assert_eq!(texts(&tokens), vec!["héllo", " ", "→", " ", "wörld"]);
        assert_eq!(tokens[0].len, 6);
        assert_eq!(tokens[2].len, 3);
        let total: usize = tokens.iter().map(|t| t.len).sum();
        assert_eq!(total, text.len());
    }

    #[test]
    fn test_invalid_utf8_is_covered() {
        let tokenizer = Tokenizer::new(&[]).unwrap();
        let text = [b'a', 0xFF, 0xFE, b' ', b'b'];
        let tokens = tokenizer.tokenize(&text);
        let total: usize = tokens.iter().map(|t| t.len).sum();
        assert_eq!(total, text.len());
        assert!(tokens.iter().all(|t| t.len > 0));
        assert_eq!(tokens[1].text, &[0xFF]);
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = Tokenizer::new(&[]).unwrap();
        assert!(tokenizer.tokenize(b"").is_empty());
    }

    #[test]
    fn test_token_predicates() {
        let tokenizer = Tokenizer::new(&[]).unwrap();
        let tokens = tokenizer.tokenize(b"_x 42 0x1F \n .");
        assert!(tokens[0].is_identifier());
        assert!(tokens[2].is_numeric());
        assert!(!tokens[2].is_identifier());
        assert!(tokens[4].is_numeric());
        assert!(tokens[5].is_whitespace());
        assert!(tokens[5].has_line_terminator());
        assert!(!tokens[6].has_line_terminator());
        assert_eq!(tokens[7].single_char(), Some('.'));
        assert!(tokens[7].is("."));
    }
}
