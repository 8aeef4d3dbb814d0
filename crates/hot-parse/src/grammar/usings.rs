use hot_yellow::SyntaxKind::*;
use hot_yellow::SyntaxSet;

use super::{path, skip_until};
use crate::parser::Parser;

const RECOVERY: SyntaxSet = SyntaxSet::new([
    SEMICOLON,
    USING_KW,
    NAMESPACE_KW,
    CLASS_KW,
    STRUCT_KW,
    INTERFACE_KW,
    ENUM_KW,
    PUBLIC_KW,
    PROTECTED_KW,
    INTERNAL_KW,
    PRIVATE_KW,
]);

pub(crate) fn at_using_directive(p: &Parser<'_>) -> bool {
    match p.peek_kind() {
        USING_KW => p.nth_kind(1) != L_PAREN,
        NAME => p.at_contextual_kw("global") && p.nth_kind(1) == USING_KW,
        _ => false,
    }
}

/// Leading run of using directives of a compilation unit or namespace body.
pub(crate) fn usings(p: &mut Parser<'_>) {
    while at_using_directive(p) {
        using_directive(p);
    }
}

// global using static Alias = System.Text;
pub(crate) fn using_directive(p: &mut Parser<'_>) {
    debug_assert!(at_using_directive(p));
    let m = p.start();

    if p.at(NAME) {
        p.advance_remap(GLOBAL_KW);
    }
    p.expect(USING_KW);
    p.eat(STATIC_KW);

    if let Some(name) = path(p)
        && p.at(EQ)
    {
        let alias = name.precede(p);
        p.advance();
        alias.complete(p, NAME_EQUALS);
        path(p);
    }

    if !p.at(SEMICOLON) {
        p.error("expected `;`");
        skip_until(p, &RECOVERY);
    }
    p.eat(SEMICOLON);

    m.complete(p, USING_DIRECTIVE);
}
