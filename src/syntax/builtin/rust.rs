//! Rust language profile

use crate::syntax::language::LanguageProfile;

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true", "type",
    "union", "unsafe", "use", "where", "while",
];

const BUILTINS: &[&str] = &[
    "bool", "char", "str", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32",
    "i64", "i128", "isize", "f32", "f64", "String", "Vec", "Box", "Rc", "Arc", "Option",
    "Result", "Some", "None", "Ok", "Err",
];

/// Create Rust language profile
pub fn rust_language() -> LanguageProfile {
    let mut lang = LanguageProfile::new("Rust");
    lang.add_extension("rs");

    lang.add_keywords(KEYWORDS);
    lang.add_builtins(BUILTINS);
    lang.add_brackets("()[]{}");
    lang.add_operators("+-*/%=<>!&|^");

    // Single quotes are left out: they also start lifetimes
    lang.add_quotes("\"");
    lang.escape = Some('\\');
    lang.add_line_comment("//");
    lang.set_block_comment("/*", "*/");

    lang.add_class_introducer("struct");
    lang.add_class_introducer("enum");
    lang.add_class_introducer("trait");
    lang.set_class_gate("{(<;");
    lang.add_function_introducer("fn");
    lang.add_self_name("self");
    lang.add_self_name("Self");

    lang
}
