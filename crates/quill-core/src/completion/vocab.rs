//! Static completion vocabularies, one set per language.

use crate::language::Language;

pub struct Vocabulary {
    /// Callable names; committing one of these appends `()`.
    pub builtins: &'static [&'static str],
    pub keywords: &'static [&'static str],
    /// Common names that are neither builtins nor keywords.
    pub words: &'static [&'static str],
}

static PYTHON: Vocabulary = Vocabulary {
    builtins: &[
        "abs", "aiter", "all", "anext", "any", "ascii", "bin", "bool", "breakpoint",
        "bytearray", "bytes", "callable", "chr", "classmethod", "compile", "complex",
        "delattr", "dict", "dir", "divmod", "enumerate", "eval", "exec", "filter",
        "float", "format", "frozenset", "getattr", "globals", "hasattr", "hash", "help",
        "hex", "id", "input", "int", "isinstance", "issubclass", "iter", "len", "list",
        "locals", "map", "max", "memoryview", "min", "next", "object", "oct", "open",
        "ord", "pow", "print", "property", "range", "repr", "reversed", "round", "set",
        "setattr", "slice", "sorted", "staticmethod", "str", "sum", "super", "tuple",
        "type", "vars", "zip", "ArithmeticError", "AssertionError", "AttributeError",
        "BaseException", "EOFError", "Exception", "FileNotFoundError", "ImportError",
        "IndexError", "KeyError", "KeyboardInterrupt", "NameError",
        "NotImplementedError", "OSError", "RuntimeError", "StopIteration",
        "SyntaxError", "TypeError", "ValueError", "ZeroDivisionError",
    ],
    keywords: &[
        "False", "None", "True", "and", "as", "assert", "async", "await", "break",
        "class", "continue", "def", "del", "elif", "else", "except", "finally", "for",
        "from", "global", "if", "import", "in", "is", "lambda", "nonlocal", "not", "or",
        "pass", "raise", "return", "try", "while", "with", "yield",
    ],
    words: &[
        "print", "len", "str", "int", "float", "list", "dict", "tuple", "set", "range",
        "enumerate", "zip", "map", "filter", "sorted", "reversed", "open", "input",
        "type", "isinstance", "hasattr", "getattr", "setattr", "dir", "help", "id",
        "hash", "abs", "round", "min", "max", "sum", "all", "any", "bool", "chr", "ord",
        "bin", "hex", "oct", "format", "join", "split", "strip", "replace", "find",
        "index", "count", "append", "extend", "insert", "remove", "pop", "clear", "copy",
        "keys", "values", "items", "get", "update", "setdefault", "True", "False", "None",
        "self", "def", "class", "import", "from", "if", "else", "elif", "for", "while",
        "try", "except", "finally", "with", "as", "return", "yield", "break", "continue",
        "pass", "raise", "assert", "del", "global", "nonlocal", "lambda",
    ],
};

static JAVASCRIPT: Vocabulary = Vocabulary {
    builtins: &[
        "alert", "clearInterval", "clearTimeout", "decodeURIComponent",
        "encodeURIComponent", "fetch", "isFinite", "isNaN", "parseFloat", "parseInt",
        "require", "setInterval", "setTimeout",
    ],
    keywords: &[
        "async", "await", "break", "case", "catch", "class", "const", "continue",
        "debugger", "default", "delete", "do", "else", "export", "extends", "false",
        "finally", "for", "function", "if", "import", "in", "instanceof", "let", "new",
        "null", "return", "super", "switch", "this", "throw", "true", "try", "typeof",
        "undefined", "var", "void", "while", "yield",
    ],
    words: &[
        "Array", "Boolean", "Date", "Error", "JSON", "Map", "Math", "Number", "Object",
        "Promise", "RegExp", "Set", "String", "console", "document", "window",
        "length", "push", "pop", "shift", "slice", "splice", "map", "filter", "reduce",
        "forEach", "indexOf", "includes", "join", "split", "then", "log",
    ],
};

static EMPTY: Vocabulary = Vocabulary {
    builtins: &[],
    keywords: &[],
    words: &[],
};

pub fn for_language(language: Language) -> &'static Vocabulary {
    match language {
        Language::Python => &PYTHON,
        Language::JavaScript => &JAVASCRIPT,
        _ => &EMPTY,
    }
}
