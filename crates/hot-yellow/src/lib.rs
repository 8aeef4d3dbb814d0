//! Lossless, immutable syntax tree with attached trivia.
//!
//! Green nodes are shared between tree versions; edits rebuild only the path from the edited
//! element up to the root.

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod green;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod trivia;

/// Incremental builder for constructing a `SyntaxTree`.
pub use builder::Builder;
/// Green (position independent) layer.
pub use green::{GreenElement, GreenNode, GreenToken};
/// Primary syntax tree API types.
pub use syntax::{
    Descendants, NodeOrToken, SyntaxElement, SyntaxElementChildren, SyntaxNode, SyntaxNodePtr,
    SyntaxToken, SyntaxTree,
};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
/// Trivia pieces attached to tokens.
pub use trivia::{GreenTrivia, TriviaPiece, TriviaPieceKind, trivia_texts};
/// Re-exported so downstream crates share one text-size version.
pub use text_size::{TextRange, TextSize};
