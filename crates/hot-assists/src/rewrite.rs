use hot_yellow::SyntaxKind::*;
use hot_yellow::ast::{AstNode as _, HasModifiers as _, TypeDecl};
use hot_yellow::{GreenElement, GreenNode, GreenToken, GreenTrivia, SyntaxKind, TriviaPiece};
use tracing::trace;

use crate::accessibility::Accessibility;

/// Gives `decl` the `target` accessibility, returning the new root.
///
/// The first accessibility keyword is replaced by the target keywords and any further
/// accessibility keywords are removed along with their trivia. A nested class whose target is
/// in `direct_targets` only has its first accessibility keyword replaced; the others stay.
/// Returns `None` when the declaration carries no accessibility keyword.
pub(crate) fn change_accessibility(
    decl: &TypeDecl,
    target: Accessibility,
    direct_targets: &[Accessibility],
) -> Option<GreenNode> {
    let main = decl.main_modifiers();
    let (first, rest) = main.split_first()?;
    let replacement = replacement_tokens(first.green(), target.keywords());

    let removed: Vec<usize> = if is_direct_replacement(decl, target, direct_targets) {
        trace!(%target, kept = rest.len(), "replacing nested class modifier in place");
        Vec::new()
    } else {
        rest.iter().map(|token| token.index()).collect()
    };

    let node = decl.syntax();
    let mut children = Vec::with_capacity(node.green().children().len() + 1);
    for (index, child) in node.green().children().iter().enumerate() {
        if index == first.index() {
            children.extend(replacement.iter().cloned().map(GreenElement::from));
        } else if !removed.contains(&index) {
            children.push(child.clone());
        }
    }

    Some(node.replace_with(node.green().with_children(children)))
}

/// A class nested directly in a class, struct or record whose target is configured for in-place
/// replacement.
fn is_direct_replacement(
    decl: &TypeDecl,
    target: Accessibility,
    direct_targets: &[Accessibility],
) -> bool {
    let nested = decl
        .syntax()
        .parent()
        .is_some_and(|parent| matches!(parent.kind(), CLASS_DECL | STRUCT_DECL | RECORD_DECL));
    matches!(decl, TypeDecl::Class(_)) && nested && direct_targets.contains(&target)
}

/// The old token's leading trivia goes on the first new token and its trailing trivia on the
/// last; keywords in between are separated by one space.
fn replacement_tokens(old: &GreenToken, keywords: &[(SyntaxKind, &str)]) -> Vec<GreenToken> {
    let last = keywords.len().saturating_sub(1);
    keywords
        .iter()
        .enumerate()
        .map(|(i, &(kind, text))| {
            let (leading, leading_text) = if i == 0 {
                (old.leading().clone(), old.leading_text())
            } else {
                (GreenTrivia::empty(), "")
            };
            let (trailing, trailing_text) = if i == last {
                (old.trailing().clone(), old.trailing_text())
            } else {
                (GreenTrivia::single(TriviaPiece::whitespace(1)), " ")
            };
            let text = format!("{leading_text}{text}{trailing_text}");
            GreenToken::new(leading, kind, &text, trailing)
        })
        .collect()
}
