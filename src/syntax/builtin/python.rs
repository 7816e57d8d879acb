//! Python language profile

use crate::syntax::language::LanguageProfile;

/// Python keywords (`keyword.kwlist`)
const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Builtin functions (classes such as `int` or `list` are deliberately absent)
const BUILTINS: &[&str] = &[
    "__build_class__", "__import__", "abs", "aiter", "all", "anext", "any", "ascii", "bin",
    "breakpoint", "callable", "chr", "compile", "delattr", "dir", "divmod", "eval", "exec",
    "format", "getattr", "globals", "hasattr", "hash", "hex", "id", "input", "isinstance",
    "issubclass", "iter", "len", "locals", "max", "min", "next", "oct", "open", "ord", "pow",
    "print", "repr", "round", "setattr", "sorted", "sum", "vars",
];

/// Create Python language profile
pub fn python_language() -> LanguageProfile {
    let mut lang = LanguageProfile::new("Python");
    lang.add_extension("py");
    lang.add_extension("pyw");
    lang.add_extension("pyi");

    lang.add_keywords(KEYWORDS);
    lang.add_builtins(BUILTINS);
    lang.add_brackets("()[]{}");
    lang.add_operators("+-*/%=<>");

    lang.add_quotes("\"'");
    lang.escape = Some('\\');
    lang.add_line_comment("#");

    lang.add_class_introducer("class");
    lang.add_function_introducer("def");
    lang.add_self_name("self");
    lang.keyword_arguments = true;

    lang
}
