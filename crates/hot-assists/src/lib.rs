//! Refactorings offered at a cursor position: changing the accessibility of a type declaration
//! and separating groups of using directives with blank lines.
//!
//! Every edit is computed on the lossless tree and keeps all trivia it does not have to touch,
//! so applying an assist changes only the text it is about.

mod accessibility;
mod catalog;
mod config;
mod rewrite;
mod using_groups;

use hot_yellow::ast::{AstNode as _, TypeDecl};
use hot_yellow::{SyntaxNode, SyntaxTree, TextRange};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use crate::accessibility::{Accessibility, AccessibilityState, ModifierSummary};
pub use crate::catalog::{Transition, transitions};
pub use crate::config::{AssistConfig, NewlineStyle};

pub const SEPARATE_USING_GROUPS_TITLE: &str = "Add newline betweeen using groups";

/// What applying an assist does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AssistEdit {
    ChangeAccessibility { target: Accessibility },
    SeparateUsingGroups,
}

impl AssistEdit {
    pub fn id(&self) -> &'static str {
        match self {
            Self::ChangeAccessibility { .. } => "change_accessibility",
            Self::SeparateUsingGroups => "separate_using_groups",
        }
    }
}

/// A refactoring available at some range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assist {
    pub id: &'static str,
    pub title: String,
    pub edit: AssistEdit,
}

impl Assist {
    fn new(title: String, edit: AssistEdit) -> Self {
        Self { id: edit.id(), title, edit }
    }
}

/// Assists available at `range`, accessibility changes first.
pub fn assists(config: &AssistConfig, tree: &SyntaxTree, range: TextRange) -> Vec<Assist> {
    let root = tree.root();
    let mut acc = Vec::new();

    if config.change_accessibility {
        change_accessibility(&root, range, &mut acc);
    }
    if config.separate_using_groups {
        separate_using_groups(&root, &mut acc);
    }

    acc
}

/// Applies `edit` at `range`; returns `tree` unchanged when there is nothing to do.
pub fn apply(
    config: &AssistConfig,
    tree: &SyntaxTree,
    range: TextRange,
    edit: AssistEdit,
) -> SyntaxTree {
    let root = tree.root();
    let edited = match edit {
        AssistEdit::ChangeAccessibility { target } => type_decl_at(&root, range)
            .and_then(|decl| {
                debug!(kind = decl.label(), %target, "changing accessibility");
                rewrite::change_accessibility(&decl, target, &config.nested_class_direct_targets)
            })
            .map(SyntaxTree::new),
        AssistEdit::SeparateUsingGroups => {
            let boundaries = using_groups::missing_separators(&root);
            debug!(boundaries = boundaries.len(), "separating using groups");
            (!boundaries.is_empty())
                .then(|| using_groups::separate(tree, &boundaries, config.newline))
        }
    };

    edited.unwrap_or_else(|| {
        debug!(id = edit.id(), "nothing to apply");
        tree.clone()
    })
}

/// The type declaration whose own tokens cover `range`.
fn type_decl_at(root: &SyntaxNode, range: TextRange) -> Option<TypeDecl> {
    root.find_node(range).and_then(TypeDecl::cast)
}

fn change_accessibility(root: &SyntaxNode, range: TextRange, acc: &mut Vec<Assist>) {
    let Some(decl) = type_decl_at(root, range) else {
        return;
    };
    let Some(summary) = ModifierSummary::of(&decl) else {
        debug!(kind = decl.label(), "no accessibility modifier");
        return;
    };

    let transitions = transitions(&summary);
    debug!(
        kind = decl.label(),
        state = ?summary.state(),
        redundant = summary.is_redundant(),
        offered = transitions.len(),
        "accessibility transitions"
    );

    acc.extend(transitions.into_iter().map(|Transition { target, title }| {
        Assist::new(title, AssistEdit::ChangeAccessibility { target })
    }));
}

fn separate_using_groups(root: &SyntaxNode, acc: &mut Vec<Assist>) {
    if using_groups::missing_separators(root).is_empty() {
        return;
    }
    acc.push(Assist::new(SEPARATE_USING_GROUPS_TITLE.to_owned(), AssistEdit::SeparateUsingGroups));
}

#[cfg(test)]
mod tests;
