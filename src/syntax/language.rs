//! Language profiles for syntax highlighting
//!
//! A `LanguageProfile` is pure data: the keyword, builtin, bracket and
//! operator sets plus the few markers (quotes, comments, introducers) the
//! classifier needs. Supporting a new language means building a new
//! profile; the tokenizer and classifier stay untouched.

use std::collections::HashSet;

/// Characters that may follow a class name at its definition
const DEFAULT_CLASS_GATE: [char; 2] = [':', '('];

/// A complete language profile
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    /// Language name (e.g., "Python", "Rust")
    pub name: String,
    /// File extensions (e.g., ["py", "pyw"])
    pub extensions: Vec<String>,
    /// Keywords styled as Keyword
    pub keywords: HashSet<String>,
    /// Builtin names styled as Type
    pub builtins: HashSet<String>,
    /// Bracket characters
    pub brackets: HashSet<char>,
    /// Operator characters styled as Type
    pub operators: HashSet<char>,
    /// Characters that open and close string literals
    pub quotes: HashSet<char>,
    /// Escape character inside strings
    pub escape: Option<char>,
    /// Keywords introducing a class definition (`class`)
    pub class_introducers: HashSet<String>,
    /// Characters that must follow a class name for it to be styled
    pub class_gate: HashSet<char>,
    /// Keywords introducing a function definition (`def`)
    pub function_introducers: HashSet<String>,
    /// Self-reference names styled as Constant (`self`)
    pub self_names: HashSet<String>,
    /// Markers starting a comment that runs to the end of the line
    pub line_comments: Vec<String>,
    /// Block comment open and close markers
    pub block_comment: Option<(String, String)>,
    /// Style `name=` inside a call as a keyword argument
    pub keyword_arguments: bool,
}

impl LanguageProfile {
    /// Create a new empty profile
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: Vec::new(),
            keywords: HashSet::new(),
            builtins: HashSet::new(),
            brackets: HashSet::new(),
            operators: HashSet::new(),
            quotes: HashSet::new(),
            escape: None,
            class_introducers: HashSet::new(),
            class_gate: DEFAULT_CLASS_GATE.into_iter().collect(),
            function_introducers: HashSet::new(),
            self_names: HashSet::new(),
            line_comments: Vec::new(),
            block_comment: None,
            keyword_arguments: false,
        }
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    /// Add keywords
    pub fn add_keywords(&mut self, words: &[&str]) {
        self.keywords.extend(words.iter().map(|w| w.to_string()));
    }

    /// Add builtin names
    pub fn add_builtins(&mut self, names: &[&str]) {
        self.builtins.extend(names.iter().map(|n| n.to_string()));
    }

    /// Add bracket characters
    pub fn add_brackets(&mut self, chars: &str) {
        self.brackets.extend(chars.chars());
    }

    /// Add operator characters
    pub fn add_operators(&mut self, chars: &str) {
        self.operators.extend(chars.chars());
    }

    /// Add quote characters
    pub fn add_quotes(&mut self, chars: &str) {
        self.quotes.extend(chars.chars());
    }

    /// Add a class introducer keyword
    pub fn add_class_introducer(&mut self, word: &str) {
        self.class_introducers.insert(word.to_string());
    }

    /// Replace the characters allowed after a class name
    pub fn set_class_gate(&mut self, chars: &str) {
        self.class_gate = chars.chars().collect();
    }

    /// Add a function introducer keyword
    pub fn add_function_introducer(&mut self, word: &str) {
        self.function_introducers.insert(word.to_string());
    }

    /// Add a self-reference name
    pub fn add_self_name(&mut self, name: &str) {
        self.self_names.insert(name.to_string());
    }

    /// Add a line comment marker
    pub fn add_line_comment(&mut self, marker: &str) {
        self.line_comments.push(marker.to_string());
    }

    /// Set block comment markers
    pub fn set_block_comment(&mut self, open: &str, close: &str) {
        self.block_comment = Some((open.to_string(), close.to_string()));
    }

    /// Multi-character sequences the tokenizer must keep whole
    pub fn atomic_tokens(&self) -> Vec<&str> {
        let mut atoms: Vec<&str> = self.line_comments.iter().map(String::as_str).collect();
        if let Some((open, close)) = &self.block_comment {
            atoms.push(open);
            atoms.push(close);
        }
        atoms
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    pub fn is_builtin(&self, word: &str) -> bool {
        self.builtins.contains(word)
    }

    pub fn is_class_introducer(&self, word: &str) -> bool {
        self.class_introducers.contains(word)
    }

    pub fn is_function_introducer(&self, word: &str) -> bool {
        self.function_introducers.contains(word)
    }

    pub fn is_self_name(&self, word: &str) -> bool {
        self.self_names.contains(word)
    }

    pub fn is_line_comment(&self, text: &str) -> bool {
        self.line_comments.iter().any(|m| m == text)
    }

    pub fn is_block_comment_open(&self, text: &str) -> bool {
        self.block_comment.as_ref().is_some_and(|(open, _)| open == text)
    }

    pub fn is_block_comment_close(&self, text: &str) -> bool {
        self.block_comment.as_ref().is_some_and(|(_, close)| close == text)
    }

    /// Every character of `text` is an operator character
    pub fn is_operator_run(&self, text: &str) -> bool {
        !text.is_empty() && text.chars().all(|c| self.operators.contains(&c))
    }
}
