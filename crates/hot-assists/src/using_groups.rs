//! Blank lines between groups of using directives that import from different top-level
//! namespaces.

use hot_yellow::ast::{AstNode as _, CompilationUnit, HasUsings, NamespaceDecl, UsingDirective};
use hot_yellow::{SyntaxNode, SyntaxNodePtr, SyntaxTree, TriviaPiece, TriviaPieceKind, trivia_texts};
use tracing::trace;

use crate::NewlineStyle;

/// A place between two directives that needs a blank line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Boundary {
    /// The directive the line terminators are appended to.
    previous: SyntaxNodePtr,
    /// One, or two when `previous` does not already end its line.
    newlines: usize,
}

/// Scans every using list of the file, the compilation unit's and each namespace body's.
pub(crate) fn missing_separators(root: &SyntaxNode) -> Vec<Boundary> {
    let mut lists: Vec<Vec<UsingDirective>> = Vec::new();
    if let Some(unit) = CompilationUnit::cast(root.clone()) {
        lists.push(unit.usings().collect());
    }
    lists.extend(
        root.descendants().filter_map(NamespaceDecl::cast).map(|ns| ns.usings().collect()),
    );

    let mut boundaries = Vec::new();
    for usings in lists {
        for pair in usings.windows(2) {
            let [previous, next] = pair else { continue };
            let (Some(left), Some(right)) = (previous.top_level_segment(), next.top_level_segment())
            else {
                continue;
            };
            if left == right {
                continue;
            }

            let (trailing, leading) = boundary_trivia(previous, next);
            if has_blank_line(trailing.iter().chain(&leading).copied()) {
                trace!(%left, %right, "using groups already separated");
                continue;
            }

            let with_one = trailing.iter().chain(&[TriviaPieceKind::Newline]).chain(&leading);
            let newlines = if has_blank_line(with_one.copied()) { 1 } else { 2 };
            boundaries.push(Boundary { previous: SyntaxNodePtr::new(previous.syntax()), newlines });
        }
    }
    boundaries
}

/// Appends line terminators after each boundary's previous directive.
pub(crate) fn separate(
    tree: &SyntaxTree,
    boundaries: &[Boundary],
    style: NewlineStyle,
) -> SyntaxTree {
    let newline = newline_text(&tree.root(), style);
    let mut green = tree.green().clone();

    // Back to front, so pointers to earlier directives still resolve.
    for boundary in boundaries.iter().rev() {
        let root = SyntaxNode::new_root(green.clone());
        let Some(token) = boundary.previous.try_to_node(&root).and_then(|node| node.last_token())
        else {
            continue;
        };

        let mut new_token = token.green().clone();
        for _ in 0..boundary.newlines {
            new_token = new_token.append_trailing(TriviaPiece::newline(newline), newline);
        }
        green = token.replace_with(new_token);
    }

    SyntaxTree::new(green)
}

/// Trailing trivia of the previous directive and leading trivia of the next.
fn boundary_trivia(
    previous: &UsingDirective,
    next: &UsingDirective,
) -> (Vec<TriviaPieceKind>, Vec<TriviaPieceKind>) {
    let kinds = |pieces: &[TriviaPiece]| -> Vec<TriviaPieceKind> {
        pieces.iter().map(|piece| piece.kind).collect()
    };
    let trailing = previous
        .syntax()
        .last_token()
        .map(|token| kinds(token.trailing_trivia().pieces()))
        .unwrap_or_default();
    let leading = next
        .syntax()
        .first_token()
        .map(|token| kinds(token.leading_trivia().pieces()))
        .unwrap_or_default();
    (trailing, leading)
}

/// A line terminator followed by another one with only whitespace in between.
fn has_blank_line(pieces: impl IntoIterator<Item = TriviaPieceKind>) -> bool {
    let mut after_newline = false;
    for kind in pieces {
        match kind {
            TriviaPieceKind::Newline if after_newline => return true,
            TriviaPieceKind::Newline => after_newline = true,
            TriviaPieceKind::Whitespace => {}
            _ => after_newline = false,
        }
    }
    false
}

fn newline_text(root: &SyntaxNode, style: NewlineStyle) -> &'static str {
    match style {
        NewlineStyle::Lf => "\n",
        NewlineStyle::Crlf => "\r\n",
        NewlineStyle::Detect => detect_newline(root).unwrap_or(PLATFORM_NEWLINE),
    }
}

const PLATFORM_NEWLINE: &str = if cfg!(windows) { "\r\n" } else { "\n" };

fn detect_newline(root: &SyntaxNode) -> Option<&'static str> {
    root.tokens().find_map(|token| {
        let green = token.green();
        let leading = trivia_texts(green.leading(), green.leading_text());
        let trailing = trivia_texts(green.trailing(), green.trailing_text());
        leading.chain(trailing).find(|(piece, _)| piece.kind.is_newline()).map(|(_, text)| {
            match text {
                "\r\n" => "\r\n",
                "\r" => "\r",
                _ => "\n",
            }
        })
    })
}
