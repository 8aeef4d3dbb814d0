//! Incremental builder for the green tree.

use text_size::TextSize;

use crate::{GreenElement, GreenNode, GreenToken, GreenTrivia, SyntaxKind, SyntaxTree, TriviaPiece};

const DEFAULT_TREE_DEPTH: usize = 128;
const DEFAULT_CHILDREN_LEN: usize = 10;

/// Builds a `SyntaxTree` from parser events, slicing token text out of the source.
pub struct Builder<'t> {
    text: &'t str,
    text_len: TextSize,
    parents: Vec<(SyntaxKind, usize)>,
    children: Vec<GreenElement>,
}

impl Drop for Builder<'_> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.parents.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

impl<'t> Builder<'t> {
    pub fn new(text: &'t str) -> Self {
        Self {
            text,
            text_len: TextSize::new(0),
            parents: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            children: Vec::with_capacity(DEFAULT_CHILDREN_LEN * DEFAULT_TREE_DEPTH),
        }
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.parents.push((kind, self.children.len()));
    }

    /// Finishes the most recently started node.
    pub fn finish_node(&mut self) {
        let (kind, first_child) = self.parents.pop().expect("no opened nodes?");
        let children = self.children.split_off(first_child);
        self.children.push(GreenNode::new(kind, children).into());
    }

    /// Adds a token with its leading and trailing trivia.
    ///
    /// `text_len` is the length of the token itself, without trivia.
    pub fn token(
        &mut self,
        leading_trivia: &[TriviaPiece],
        kind: SyntaxKind,
        text_len: TextSize,
        trailing_trivia: &[TriviaPiece],
    ) {
        assert!(!self.parents.is_empty(), "tokens must live inside a node");
        let leading = GreenTrivia::new(leading_trivia);
        let trailing = GreenTrivia::new(trailing_trivia);

        let start = self.text_len;
        self.text_len += leading.len() + text_len + trailing.len();
        assert!(self.text.is_char_boundary(usize::from(self.text_len)));

        let text = &self.text[usize::from(start)..usize::from(self.text_len)];
        self.children.push(GreenToken::new(leading, kind, text, trailing).into());
    }

    /// Finishes building and returns the immutable `SyntaxTree`.
    pub fn finish(mut self) -> SyntaxTree {
        assert!(self.parents.is_empty());
        assert_eq!(self.children.len(), 1, "expected exactly one root node");
        assert_eq!(usize::from(self.text_len), self.text.len(), "builder did not consume all text");

        match self.children.pop() {
            Some(GreenElement::Node(root)) => SyntaxTree::new(root),
            _ => panic!("root must be a node"),
        }
    }
}
