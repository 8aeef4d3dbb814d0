use std::fmt;

use text_size::TextSize;
use triomphe::Arc;

use crate::{GreenTrivia, NodeOrToken, SyntaxKind, TriviaPiece};

pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

impl GreenElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_len(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.text_len(),
            NodeOrToken::Token(token) => token.text_len(),
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        NodeOrToken::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        NodeOrToken::Token(token)
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct GreenNodeData {
    kind: SyntaxKind,
    text_len: TextSize,
    children: Vec<GreenElement>,
}

/// Immutable interior node; cheap to clone, shared between tree versions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GreenNode {
    data: Arc<GreenNodeData>,
}

impl GreenNode {
    pub fn new(kind: SyntaxKind, children: Vec<GreenElement>) -> Self {
        let text_len = children.iter().map(GreenElement::text_len).sum();
        Self { data: Arc::new(GreenNodeData { kind, text_len, children }) }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    pub fn text_len(&self) -> TextSize {
        self.data.text_len
    }

    pub fn children(&self) -> &[GreenElement] {
        &self.data.children
    }

    /// Returns a copy of this node with the child at `index` swapped out.
    pub fn replace_child(&self, index: usize, new_child: GreenElement) -> Self {
        let mut children = self.children().to_vec();
        children[index] = new_child;
        Self::new(self.kind(), children)
    }

    /// Returns a copy of this node with the children replaced wholesale.
    pub fn with_children(&self, children: Vec<GreenElement>) -> Self {
        Self::new(self.kind(), children)
    }

    fn write_text(&self, buf: &mut impl fmt::Write) -> fmt::Result {
        for child in self.children() {
            match child {
                NodeOrToken::Node(node) => node.write_text(buf)?,
                NodeOrToken::Token(token) => buf.write_str(token.text())?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f)
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct GreenTokenData {
    leading: GreenTrivia,
    kind: SyntaxKind,
    text: Box<str>,
    trailing: GreenTrivia,
}

/// Immutable leaf. `text` covers the leading trivia, the token itself and the trailing trivia.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GreenToken {
    data: Arc<GreenTokenData>,
}

impl GreenToken {
    pub fn new(leading: GreenTrivia, kind: SyntaxKind, text: &str, trailing: GreenTrivia) -> Self {
        debug_assert!(leading.len() + trailing.len() <= TextSize::of(text));
        Self { data: Arc::new(GreenTokenData { leading, kind, text: text.into(), trailing }) }
    }

    /// A token without any trivia.
    pub fn bare(kind: SyntaxKind, text: &str) -> Self {
        Self::new(GreenTrivia::empty(), kind, text, GreenTrivia::empty())
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    /// Full text, trivia included.
    pub fn text(&self) -> &str {
        &self.data.text
    }

    pub fn text_len(&self) -> TextSize {
        TextSize::of(self.text())
    }

    pub fn leading(&self) -> &GreenTrivia {
        &self.data.leading
    }

    pub fn trailing(&self) -> &GreenTrivia {
        &self.data.trailing
    }

    fn trimmed_bounds(&self) -> (usize, usize) {
        let start = usize::from(self.leading().len());
        let end = self.text().len() - usize::from(self.trailing().len());
        (start, end)
    }

    pub fn text_trimmed(&self) -> &str {
        let (start, end) = self.trimmed_bounds();
        &self.text()[start..end]
    }

    pub fn leading_text(&self) -> &str {
        let (start, _) = self.trimmed_bounds();
        &self.text()[..start]
    }

    pub fn trailing_text(&self) -> &str {
        let (_, end) = self.trimmed_bounds();
        &self.text()[end..]
    }

    /// Same trivia, different token.
    pub fn with_kind(&self, kind: SyntaxKind, text: &str) -> Self {
        let full = format!("{}{text}{}", self.leading_text(), self.trailing_text());
        Self::new(self.leading().clone(), kind, &full, self.trailing().clone())
    }

    /// Appends one piece to the end of the trailing trivia.
    pub fn append_trailing(&self, piece: TriviaPiece, piece_text: &str) -> Self {
        debug_assert_eq!(piece.len, TextSize::of(piece_text));
        let full = format!("{}{piece_text}", self.text());
        Self::new(self.leading().clone(), self.kind(), &full, self.trailing().push(piece))
    }
}

impl fmt::Display for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
