use hot_yellow::SyntaxKind::*;
use hot_yellow::{SyntaxKind, SyntaxSet};

use crate::parser::{CompletedMarker, Parser};

pub(crate) mod items;
mod usings;

const OPENING: SyntaxSet = SyntaxSet::new([L_PAREN, L_BRACK, L_BRACE]);
const CLOSING: SyntaxSet = SyntaxSet::new([R_PAREN, R_BRACK, R_BRACE]);

/// Consumes one balanced group starting at an opening bracket, including the closer.
pub(crate) fn balanced(p: &mut Parser<'_>) {
    debug_assert!(OPENING.contains(p.peek_kind()));
    let mut depth = 0u32;

    loop {
        let kind = p.peek_kind();
        if kind == EOF {
            p.error("unclosed delimiter");
            return;
        }
        if OPENING.contains(kind) {
            depth += 1;
        } else if CLOSING.contains(kind) {
            depth = depth.saturating_sub(1);
        }
        p.advance();
        if depth == 0 {
            return;
        }
    }
}

/// Consumes tokens until one of `stop` shows up outside of any bracket group.
pub(crate) fn skip_until(p: &mut Parser<'_>, stop: &SyntaxSet) {
    loop {
        let kind = p.peek_kind();
        if kind == EOF || stop.contains(kind) || CLOSING.contains(kind) {
            return;
        }
        if OPENING.contains(kind) {
            balanced(p);
        } else {
            p.advance();
        }
    }
}

/// `<...>` with nesting; stops early at tokens that cannot appear inside.
pub(crate) fn angle_group(p: &mut Parser<'_>, kind: SyntaxKind) {
    debug_assert!(p.at(L_ANGLE));
    let m = p.start();
    let mut depth = 0u32;

    loop {
        match p.peek_kind() {
            L_ANGLE => depth += 1,
            R_ANGLE => depth -= 1,
            EOF | SEMICOLON | L_BRACE | R_BRACE => {
                p.error("expected `>`");
                break;
            }
            _ => {}
        }
        p.advance();
        if depth == 0 {
            break;
        }
    }

    m.complete(p, kind);
}

/// Dotted name such as `System.Collections.Generic` or `global::System.Text`.
pub(crate) fn path(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !p.at(NAME) {
        p.error("expected a name");
        return None;
    }

    let m = p.start();
    p.advance();
    if p.at(COLON2) {
        p.advance();
        p.expect(NAME);
    }
    if p.at(L_ANGLE) {
        angle_group(p, TYPE_ARG_LIST);
    }

    while p.at(DOT) {
        p.advance();
        if !p.expect(NAME) {
            break;
        }
        if p.at(L_ANGLE) {
            angle_group(p, TYPE_ARG_LIST);
        }
    }

    Some(m.complete(p, PATH))
}
