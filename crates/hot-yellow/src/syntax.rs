//! Red layer: parent-linked, offset-aware handles over the green tree.
//!
//! Handles are created on demand while navigating and are cheap to clone. Every edit goes through
//! the green layer and yields a new root; handles into the old tree stay valid.

use std::fmt;
use std::fmt::Write as _;

use text_size::{TextRange, TextSize};
use triomphe::Arc;

use crate::{GreenElement, GreenNode, GreenToken, GreenTrivia, SyntaxKind};

/// Owned syntax tree for a single source text.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SyntaxTree {
    green: GreenNode,
}

impl SyntaxTree {
    pub fn new(green: GreenNode) -> Self {
        Self { green }
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Returns the root syntax node.
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Returns the full source text for this tree.
    pub fn text(&self) -> String {
        self.green.to_string()
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("text_len", &self.green.text_len())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.green, f)
    }
}

struct NodeData {
    parent: Option<SyntaxNode>,
    index: usize,
    offset: TextSize,
    green: GreenNode,
}

/// Node handle.
#[derive(Clone)]
pub struct SyntaxNode(Arc<NodeData>);

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        self.0.offset == other.0.offset && self.0.green == other.0.green
    }
}

impl Eq for SyntaxNode {}

impl SyntaxNode {
    pub fn new_root(green: GreenNode) -> Self {
        Self(Arc::new(NodeData { parent: None, index: 0, offset: TextSize::new(0), green }))
    }

    fn new_child(parent: Self, index: usize, offset: TextSize, green: GreenNode) -> Self {
        Self(Arc::new(NodeData { parent: Some(parent), index, offset, green }))
    }

    /// Returns this node's kind.
    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    pub fn green(&self) -> &GreenNode {
        &self.0.green
    }

    /// Position of this node among its parent's children.
    pub fn index(&self) -> usize {
        self.0.index
    }

    /// Returns the text range covered by this node, trivia included.
    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.0.offset, self.0.green.text_len())
    }

    /// Returns the range with the outer leading/trailing trivia trimmed away.
    pub fn text_trimmed_range(&self) -> TextRange {
        let mut tokens = self.tokens().filter(|token| !token.text_trimmed_range().is_empty());
        let Some(first) = tokens.next() else {
            return TextRange::empty(self.0.offset);
        };
        let end = tokens.last().unwrap_or_else(|| first.clone()).text_trimmed_range().end();
        TextRange::new(first.text_trimmed_range().start(), end)
    }

    /// Returns the text covered by this node.
    pub fn text(&self) -> String {
        self.0.green.to_string()
    }

    /// Returns the text excluding the outer trivia.
    pub fn text_trimmed(&self) -> String {
        let text = self.text();
        let range = self.text_trimmed_range() - self.0.offset;
        text[range].to_owned()
    }

    /// Returns the parent node if any.
    pub fn parent(&self) -> Option<Self> {
        self.0.parent.clone()
    }

    /// Returns an iterator of ancestors starting from this node.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + use<> {
        std::iter::successors(Some(self.clone()), Self::parent)
    }

    /// Iterates children including tokens.
    pub fn children_with_tokens(&self) -> SyntaxElementChildren {
        SyntaxElementChildren {
            parent: self.clone(),
            front: 0,
            front_offset: self.0.offset,
            back: self.0.green.children().len(),
            back_offset: self.text_range().end(),
        }
    }

    /// Iterates child nodes, skipping tokens.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = Self> + use<> {
        self.children_with_tokens().filter_map(SyntaxElement::into_node)
    }

    /// Iterates the tokens that are direct children of this node.
    pub fn child_tokens(&self) -> impl DoubleEndedIterator<Item = SyntaxToken> + use<> {
        self.children_with_tokens().filter_map(SyntaxElement::into_token)
    }

    /// Preorder traversal over this node, its descendant nodes and tokens.
    pub fn descendants_with_tokens(&self) -> Descendants {
        Descendants { root: Some(self.clone()), stack: Vec::new() }
    }

    /// Preorder traversal over this node and its descendant nodes.
    pub fn descendants(&self) -> impl Iterator<Item = Self> + use<> {
        self.descendants_with_tokens().filter_map(SyntaxElement::into_node)
    }

    /// All tokens in this subtree, in source order.
    pub fn tokens(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        self.descendants_with_tokens().filter_map(SyntaxElement::into_token)
    }

    /// Returns the first token in this subtree.
    pub fn first_token(&self) -> Option<SyntaxToken> {
        self.tokens().next()
    }

    /// Returns the last token in this subtree.
    pub fn last_token(&self) -> Option<SyntaxToken> {
        self.children_with_tokens().rev().find_map(|child| match child {
            NodeOrToken::Token(token) => Some(token),
            NodeOrToken::Node(node) => node.last_token(),
        })
    }

    /// Returns the smallest element that fully covers `range`.
    ///
    /// An empty range that sits between two children belongs to the right one.
    pub fn covering_element(&self, range: TextRange) -> SyntaxElement {
        let mut node = self.clone();
        'descend: loop {
            for child in node.children_with_tokens() {
                let child_range = child.text_range();
                let covers = child_range.contains_range(range)
                    && (!range.is_empty() || range.start() < child_range.end());
                if !covers {
                    continue;
                }
                match child {
                    NodeOrToken::Token(token) => return NodeOrToken::Token(token),
                    NodeOrToken::Node(child) => {
                        node = child;
                        continue 'descend;
                    }
                }
            }
            return NodeOrToken::Node(node);
        }
    }

    /// The smallest node covering `range`; a covering token resolves to its parent.
    pub fn find_node(&self, range: TextRange) -> Option<Self> {
        if !self.text_range().contains_range(range) {
            return None;
        }
        match self.covering_element(range) {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(token) => Some(token.parent()),
        }
    }

    /// Replaces this node with `replacement`, returning the new root.
    pub fn replace_with(&self, replacement: GreenNode) -> GreenNode {
        match &self.0.parent {
            None => replacement,
            Some(parent) => {
                let new_parent = parent.green().replace_child(self.0.index, replacement.into());
                parent.replace_with(new_parent)
            }
        }
    }

    /// Indented dump of the subtree, one element per line.
    pub fn debug_tree(&self) -> String {
        let mut buf = String::new();
        let mut stack = vec![self.children_with_tokens()];

        let _ = writeln!(buf, "{self:?}");
        loop {
            let depth = stack.len();
            let Some(children) = stack.last_mut() else {
                break;
            };
            match children.next() {
                Some(NodeOrToken::Node(node)) => {
                    let _ = writeln!(buf, "{:indent$}{:?}", "", node, indent = depth * 2);
                    stack.push(node.children_with_tokens());
                }
                Some(NodeOrToken::Token(token)) => {
                    let _ = writeln!(buf, "{:indent$}{:?}", "", token, indent = depth * 2);
                }
                None => {
                    stack.pop();
                }
            }
        }
        buf
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.green, f)
    }
}

/// Token handle.
#[derive(Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    parent: SyntaxNode,
    index: usize,
    offset: TextSize,
    green: GreenToken,
}

impl SyntaxToken {
    /// Returns this token's kind.
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the token text range including attached trivia.
    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.offset, self.green.text_len())
    }

    /// Returns the token text range excluding trivia.
    pub fn text_trimmed_range(&self) -> TextRange {
        let start = self.offset + self.green.leading().len();
        TextRange::at(start, TextSize::of(self.green.text_trimmed()))
    }

    /// Returns the token text including trivia.
    pub fn text(&self) -> &str {
        self.green.text()
    }

    /// Returns the token text excluding trivia.
    pub fn text_trimmed(&self) -> &str {
        self.green.text_trimmed()
    }

    pub fn leading_trivia(&self) -> &GreenTrivia {
        self.green.leading()
    }

    pub fn trailing_trivia(&self) -> &GreenTrivia {
        self.green.trailing()
    }

    /// Returns the parent node.
    pub fn parent(&self) -> SyntaxNode {
        self.parent.clone()
    }

    /// Replaces this token with `replacement`, returning the new root.
    pub fn replace_with(&self, replacement: GreenToken) -> GreenNode {
        let new_parent = self.parent.green().replace_child(self.index, replacement.into());
        self.parent.replace_with(new_parent)
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.text_range(), self.text())
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Node or token element inside the tree.
pub type SyntaxElement = NodeOrToken<SyntaxNode, SyntaxToken>;

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.text_range(),
            NodeOrToken::Token(token) => token.text_range(),
        }
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        match self {
            NodeOrToken::Node(node) => node.parent(),
            NodeOrToken::Token(token) => Some(token.parent()),
        }
    }
}

/// Iterator over the direct children of a node, tokens included.
#[derive(Clone)]
pub struct SyntaxElementChildren {
    parent: SyntaxNode,
    front: usize,
    front_offset: TextSize,
    back: usize,
    back_offset: TextSize,
}

impl SyntaxElementChildren {
    fn element(&self, index: usize, offset: TextSize) -> SyntaxElement {
        match &self.parent.green().children()[index] {
            GreenElement::Node(node) => NodeOrToken::Node(SyntaxNode::new_child(
                self.parent.clone(),
                index,
                offset,
                node.clone(),
            )),
            GreenElement::Token(token) => NodeOrToken::Token(SyntaxToken {
                parent: self.parent.clone(),
                index,
                offset,
                green: token.clone(),
            }),
        }
    }
}

impl Iterator for SyntaxElementChildren {
    type Item = SyntaxElement;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let offset = self.front_offset;
        let element = self.element(self.front, offset);
        self.front_offset += self.parent.green().children()[self.front].text_len();
        self.front += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for SyntaxElementChildren {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.back_offset -= self.parent.green().children()[self.back].text_len();
        Some(self.element(self.back, self.back_offset))
    }
}

impl ExactSizeIterator for SyntaxElementChildren {}

/// Preorder traversal over nodes and tokens.
pub struct Descendants {
    root: Option<SyntaxNode>,
    stack: Vec<SyntaxElementChildren>,
}

impl Iterator for Descendants {
    type Item = SyntaxElement;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            self.stack.push(root.children_with_tokens());
            return Some(NodeOrToken::Node(root));
        }
        loop {
            let children = self.stack.last_mut()?;
            match children.next() {
                Some(NodeOrToken::Node(node)) => {
                    self.stack.push(node.children_with_tokens());
                    return Some(NodeOrToken::Node(node));
                }
                Some(token @ NodeOrToken::Token(_)) => return Some(token),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Stable identifier for a node by kind and non-trivia text range.
///
/// Survives edits that only touch text after the node or trivia around it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxNodePtr {
    /// Node kind used for lookup.
    pub kind: SyntaxKind,
    /// Non-trivia text range used for lookup.
    pub range: TextRange,
}

impl SyntaxNodePtr {
    /// Builds a pointer from a concrete node.
    pub fn new(node: &SyntaxNode) -> Self {
        Self { kind: node.kind(), range: node.text_trimmed_range() }
    }

    /// Attempts to resolve this pointer within `root`.
    pub fn try_to_node(&self, root: &SyntaxNode) -> Option<SyntaxNode> {
        if root.parent().is_some() || !root.text_range().contains_range(self.range) {
            return None;
        }

        let start_node = match root.covering_element(self.range) {
            NodeOrToken::Node(node) => node,
            NodeOrToken::Token(token) => token.parent(),
        };

        start_node
            .ancestors()
            .find(|node| node.kind() == self.kind && node.text_trimmed_range() == self.range)
    }
}

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

impl<N: fmt::Display, T: fmt::Display> fmt::Display for NodeOrToken<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeOrToken::Node(node) => fmt::Display::fmt(node, f),
            NodeOrToken::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}
