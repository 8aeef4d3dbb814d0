use crate::SyntaxSet;

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    L_BRACE,
    R_BRACE,
    L_PAREN,
    R_PAREN,
    L_BRACK,
    R_BRACK,
    L_ANGLE,
    R_ANGLE,
    SEMICOLON,
    COLON,
    COLON2,
    COMMA,
    DOT,
    EQ,
    QUESTION,
    OPERATOR,

    USING_KW,
    NAMESPACE_KW,
    CLASS_KW,
    STRUCT_KW,
    INTERFACE_KW,
    ENUM_KW,
    GLOBAL_KW,

    PUBLIC_KW,
    PROTECTED_KW,
    INTERNAL_KW,
    PRIVATE_KW,

    STATIC_KW,
    ABSTRACT_KW,
    SEALED_KW,
    PARTIAL_KW,
    UNSAFE_KW,
    NEW_KW,
    READONLY_KW,
    REF_KW,
    EXTERN_KW,
    VIRTUAL_KW,
    OVERRIDE_KW,
    ASYNC_KW,
    CONST_KW,
    VOLATILE_KW,
    FILE_KW,
    RECORD_KW,

    NAME,
    NUMBER,
    STRING,
    CHAR,

    UNKNOWN,
    EOF,

    COMPILATION_UNIT,
    USING_DIRECTIVE,
    NAME_EQUALS,
    PATH,
    TYPE_ARG_LIST,
    NAMESPACE_DECL,
    CLASS_DECL,
    STRUCT_DECL,
    RECORD_DECL,
    INTERFACE_DECL,
    ENUM_DECL,
    ENUM_MEMBER,
    TYPE_PARAM_LIST,
    TYPE_CLAUSES,
    ATTRIBUTE_LIST,
    OPAQUE_MEMBER,
    ERROR,
    TOMBSTONE,
}

use SyntaxKind::*;

const ACCESSIBILITY_MODIFIERS: SyntaxSet =
    SyntaxSet::new([PUBLIC_KW, PROTECTED_KW, INTERNAL_KW, PRIVATE_KW]);

const MODIFIERS: SyntaxSet = ACCESSIBILITY_MODIFIERS.union(&SyntaxSet::new([
    STATIC_KW,
    ABSTRACT_KW,
    SEALED_KW,
    PARTIAL_KW,
    UNSAFE_KW,
    NEW_KW,
    READONLY_KW,
    REF_KW,
    EXTERN_KW,
    VIRTUAL_KW,
    OVERRIDE_KW,
    ASYNC_KW,
    CONST_KW,
    VOLATILE_KW,
    FILE_KW,
]));

impl SyntaxKind {
    /// Maps an identifier-shaped word to its reserved keyword kind.
    ///
    /// Contextual keywords are lexed as `NAME`; see [`SyntaxKind::from_contextual_keyword`].
    pub fn from_keyword(word: &str) -> Option<Self> {
        let kind = match word {
            "using" => USING_KW,
            "namespace" => NAMESPACE_KW,
            "class" => CLASS_KW,
            "struct" => STRUCT_KW,
            "interface" => INTERFACE_KW,
            "enum" => ENUM_KW,
            "public" => PUBLIC_KW,
            "protected" => PROTECTED_KW,
            "internal" => INTERNAL_KW,
            "private" => PRIVATE_KW,
            "static" => STATIC_KW,
            "abstract" => ABSTRACT_KW,
            "sealed" => SEALED_KW,
            "unsafe" => UNSAFE_KW,
            "new" => NEW_KW,
            "readonly" => READONLY_KW,
            "ref" => REF_KW,
            "extern" => EXTERN_KW,
            "virtual" => VIRTUAL_KW,
            "override" => OVERRIDE_KW,
            "const" => CONST_KW,
            "volatile" => VOLATILE_KW,
            _ => return None,
        };
        Some(kind)
    }

    pub fn from_contextual_keyword(word: &str) -> Option<Self> {
        let kind = match word {
            "global" => GLOBAL_KW,
            "partial" => PARTIAL_KW,
            "async" => ASYNC_KW,
            "file" => FILE_KW,
            "record" => RECORD_KW,
            _ => return None,
        };
        Some(kind)
    }

    /// Source text of a keyword or fixed punctuation kind.
    pub fn fixed_text(self) -> Option<&'static str> {
        let text = match self {
            L_BRACE => "{",
            R_BRACE => "}",
            L_PAREN => "(",
            R_PAREN => ")",
            L_BRACK => "[",
            R_BRACK => "]",
            L_ANGLE => "<",
            R_ANGLE => ">",
            SEMICOLON => ";",
            COLON => ":",
            COLON2 => "::",
            COMMA => ",",
            DOT => ".",
            EQ => "=",
            QUESTION => "?",
            USING_KW => "using",
            NAMESPACE_KW => "namespace",
            CLASS_KW => "class",
            STRUCT_KW => "struct",
            INTERFACE_KW => "interface",
            ENUM_KW => "enum",
            GLOBAL_KW => "global",
            PUBLIC_KW => "public",
            PROTECTED_KW => "protected",
            INTERNAL_KW => "internal",
            PRIVATE_KW => "private",
            STATIC_KW => "static",
            ABSTRACT_KW => "abstract",
            SEALED_KW => "sealed",
            PARTIAL_KW => "partial",
            UNSAFE_KW => "unsafe",
            NEW_KW => "new",
            READONLY_KW => "readonly",
            REF_KW => "ref",
            EXTERN_KW => "extern",
            VIRTUAL_KW => "virtual",
            OVERRIDE_KW => "override",
            ASYNC_KW => "async",
            CONST_KW => "const",
            VOLATILE_KW => "volatile",
            FILE_KW => "file",
            RECORD_KW => "record",
            _ => return None,
        };
        Some(text)
    }

    pub fn is_modifier(self) -> bool {
        MODIFIERS.contains(self)
    }

    /// `public`, `protected`, `internal` or `private`.
    pub fn is_accessibility_modifier(self) -> bool {
        ACCESSIBILITY_MODIFIERS.contains(self)
    }
}
