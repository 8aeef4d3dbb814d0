use hot_yellow::SyntaxKind::*;
use hot_yellow::{SyntaxKind, SyntaxSet};

use super::usings::{at_using_directive, using_directive, usings};
use super::{CLOSING, angle_group, balanced, path, skip_until};
use crate::parser::{Marker, Parser};

const DECL_KEYWORDS: SyntaxSet =
    SyntaxSet::new([CLASS_KW, STRUCT_KW, INTERFACE_KW, ENUM_KW, NAMESPACE_KW]);

const CLAUSES_END: SyntaxSet = SyntaxSet::new([L_BRACE, SEMICOLON]);

pub(crate) fn compilation_unit(p: &mut Parser<'_>) {
    let m = p.start();
    usings(p);
    members(p, false);
    p.advance_eof();
    m.complete(p, COMPILATION_UNIT);
}

fn members(p: &mut Parser<'_>, in_block: bool) {
    loop {
        match p.peek_kind() {
            EOF => break,
            R_BRACE if in_block => break,
            R_BRACE => p.error_and_bump("unmatched `}`"),
            _ if at_using_directive(p) => {
                let m = p.start();
                p.error("using directives must precede all other members");
                using_directive(p);
                m.complete(p, ERROR);
            }
            _ => member(p),
        }
    }
}

fn member(p: &mut Parser<'_>) {
    if at_global_attribute(p) {
        attribute_list(p);
        return;
    }

    let m = p.start();
    let mut has_prefix = false;

    while p.at(L_BRACK) {
        attribute_list(p);
        has_prefix = true;
    }

    loop {
        if p.peek_kind().is_modifier() {
            p.advance();
        } else if let Some(kind) = contextual_modifier(p) {
            p.advance_remap(kind);
        } else {
            break;
        }
        has_prefix = true;
    }

    match p.peek_kind() {
        CLASS_KW | STRUCT_KW | INTERFACE_KW => type_decl(p, m),
        ENUM_KW => enum_decl(p, m),
        NAMESPACE_KW => namespace_decl(p, m),
        NAME if at_record(p) => record_decl(p, m),
        _ => opaque_member(p, m, has_prefix),
    }
}

// [assembly: InternalsVisibleTo("Tests")]
fn at_global_attribute(p: &Parser<'_>) -> bool {
    p.at(L_BRACK)
        && (p.nth_at_contextual_kw(1, "assembly") || p.nth_at_contextual_kw(1, "module"))
        && p.nth_kind(2) == COLON
}

fn attribute_list(p: &mut Parser<'_>) {
    let m = p.start();
    balanced(p);
    m.complete(p, ATTRIBUTE_LIST);
}

/// `partial`, `file` and `async` act as modifiers only when a declaration follows.
fn contextual_modifier(p: &Parser<'_>) -> Option<SyntaxKind> {
    let kind = ["partial", "file", "async"]
        .into_iter()
        .find(|keyword| p.at_contextual_kw(keyword))
        .and_then(SyntaxKind::from_contextual_keyword)?;

    let next = p.nth_kind(1);
    (next == NAME || next.is_modifier() || DECL_KEYWORDS.contains(next)).then_some(kind)
}

fn at_record(p: &Parser<'_>) -> bool {
    p.at_contextual_kw("record") && matches!(p.nth_kind(1), NAME | CLASS_KW | STRUCT_KW)
}

fn type_decl(p: &mut Parser<'_>, m: Marker) {
    let kind = match p.peek_kind() {
        CLASS_KW => CLASS_DECL,
        STRUCT_KW => STRUCT_DECL,
        _ => INTERFACE_DECL,
    };
    p.advance();
    type_decl_rest(p);
    m.complete(p, kind);
}

// record Point(int X, int Y);
// record struct Point { }
fn record_decl(p: &mut Parser<'_>, m: Marker) {
    p.advance_remap(RECORD_KW);
    if !p.eat(STRUCT_KW) {
        p.eat(CLASS_KW);
    }
    type_decl_rest(p);
    m.complete(p, RECORD_DECL);
}

fn type_decl_rest(p: &mut Parser<'_>) {
    p.expect(NAME);
    if p.at(L_ANGLE) {
        angle_group(p, TYPE_PARAM_LIST);
    }
    if p.at(L_PAREN) {
        balanced(p);
    }
    type_clauses(p);

    if p.eat(L_BRACE) {
        members(p, true);
        p.expect(R_BRACE);
    } else if !p.eat(SEMICOLON) {
        p.error("expected `{`");
    }
    p.eat(SEMICOLON);
}

/// Base list and `where` constraints, kept as an unparsed run of tokens.
fn type_clauses(p: &mut Parser<'_>) {
    let kind = p.peek_kind();
    if kind == EOF || kind == R_BRACE || CLAUSES_END.contains(kind) || CLOSING.contains(kind) {
        return;
    }

    let m = p.start();
    skip_until(p, &CLAUSES_END);
    m.complete(p, TYPE_CLAUSES);
}

fn enum_decl(p: &mut Parser<'_>, m: Marker) {
    p.advance();
    p.expect(NAME);
    type_clauses(p);

    if p.eat(L_BRACE) {
        while !p.at(R_BRACE) && !p.at(EOF) {
            if !matches!(p.peek_kind(), NAME | L_BRACK) {
                p.error_and_bump("expected an enum member");
                continue;
            }
            enum_member(p);
            if !p.at(R_BRACE) && !p.eat(COMMA) {
                p.error("expected `,`");
            }
        }
        p.expect(R_BRACE);
    } else {
        p.error("expected `{`");
    }
    p.eat(SEMICOLON);

    m.complete(p, ENUM_DECL);
}

fn enum_member(p: &mut Parser<'_>) {
    let m = p.start();
    while p.at(L_BRACK) {
        attribute_list(p);
    }
    p.expect(NAME);
    if p.eat(EQ) {
        skip_until(p, &SyntaxSet::new([COMMA]));
    }
    m.complete(p, ENUM_MEMBER);
}

// namespace A.B { ... }
// namespace A.B;
fn namespace_decl(p: &mut Parser<'_>, m: Marker) {
    p.advance();
    path(p);

    if p.eat(SEMICOLON) {
        usings(p);
        members(p, false);
    } else if p.eat(L_BRACE) {
        usings(p);
        members(p, true);
        p.expect(R_BRACE);
        p.eat(SEMICOLON);
    } else {
        p.error("expected `{`");
    }

    m.complete(p, NAMESPACE_DECL);
}

/// Fields, methods, properties and anything else the refactorings never look inside.
fn opaque_member(p: &mut Parser<'_>, m: Marker, has_prefix: bool) {
    let mut has_body = false;
    let mut in_expression = false;
    let mut prev = EOF;

    loop {
        let kind = p.peek_kind();
        match kind {
            EOF | R_BRACE => break,
            SEMICOLON => {
                p.advance();
                has_body = true;
                break;
            }
            L_BRACE => {
                balanced(p);
                has_body = true;
                // `int X { get; } = 1;` continues past the accessor block.
                if !in_expression && !p.at(EQ) {
                    break;
                }
            }
            L_PAREN | L_BRACK => balanced(p),
            EQ => {
                in_expression = true;
                p.advance();
            }
            _ if DECL_KEYWORDS.contains(kind) && !matches!(prev, COLON | COMMA) => break,
            _ => {
                if p.at_operator("=>") {
                    in_expression = true;
                }
                p.advance();
            }
        }
        has_body = true;
        prev = kind;
    }

    if has_prefix && !has_body {
        p.error("expected a declaration");
    }
    m.complete(p, OPAQUE_MEMBER);
}
