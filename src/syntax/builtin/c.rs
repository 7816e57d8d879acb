//! C/C++ language profile

use crate::syntax::language::LanguageProfile;

const KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "class", "namespace", "template",
    "typename", "public", "private", "protected", "virtual", "new", "delete", "true", "false",
    "nullptr",
];

const BUILTINS: &[&str] = &[
    "size_t", "ptrdiff_t", "intptr_t", "uintptr_t", "int8_t", "int16_t", "int32_t", "int64_t",
    "uint8_t", "uint16_t", "uint32_t", "uint64_t", "FILE", "NULL",
];

/// Create C language profile (also works for C++)
pub fn c_language() -> LanguageProfile {
    let mut lang = LanguageProfile::new("C");
    lang.add_extension("c");
    lang.add_extension("h");
    lang.add_extension("cpp");
    lang.add_extension("hpp");
    lang.add_extension("cc");
    lang.add_extension("cxx");

    lang.add_keywords(KEYWORDS);
    lang.add_builtins(BUILTINS);
    lang.add_brackets("()[]{}");
    lang.add_operators("+-*/%=<>!&|^~?");

    lang.add_quotes("\"'");
    lang.escape = Some('\\');
    lang.add_line_comment("//");
    lang.set_block_comment("/*", "*/");

    lang.add_class_introducer("struct");
    lang.add_class_introducer("union");
    lang.add_class_introducer("class");
    lang.set_class_gate("{:;");
    lang.add_self_name("this");

    lang
}
