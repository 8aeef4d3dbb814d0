//! Trivia pieces attached to tokens.

use text_size::TextSize;
use triomphe::ThinArc;

/// Kinds of trivia stored alongside tokens.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaPieceKind {
    Whitespace,
    /// `\n`, `\r\n` or `\r`.
    Newline,
    SingleLineComment,
    MultiLineComment,
    /// A preprocessor line such as `#region`, up to but excluding its line terminator.
    Directive,
}

impl TriviaPieceKind {
    pub fn is_newline(self) -> bool {
        self == Self::Newline
    }
}

/// A trivia fragment with its kind and length.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TriviaPiece {
    pub kind: TriviaPieceKind,
    pub len: TextSize,
}

impl TriviaPiece {
    /// Creates a new trivia piece with the given kind and length.
    pub fn new(kind: TriviaPieceKind, len: TextSize) -> Self {
        Self { kind, len }
    }

    pub fn whitespace(len: u32) -> Self {
        Self::new(TriviaPieceKind::Whitespace, len.into())
    }

    pub fn newline(text: &str) -> Self {
        Self::new(TriviaPieceKind::Newline, TextSize::of(text))
    }
}

/// Shared, immutable run of trivia pieces.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct GreenTrivia {
    ptr: Option<ThinArc<TextSize, TriviaPiece>>,
}

impl std::fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreenTrivia")
            .field("pieces", &self.pieces())
            .field("total_len", &self.len())
            .finish()
    }
}

impl Default for GreenTrivia {
    fn default() -> Self {
        Self::empty()
    }
}

impl GreenTrivia {
    pub fn new(pieces: &[TriviaPiece]) -> Self {
        if pieces.is_empty() {
            return Self::empty();
        }
        let total_len = pieces.iter().map(|piece| piece.len).sum();
        Self { ptr: Some(ThinArc::from_header_and_slice(total_len, pieces)) }
    }

    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    pub fn single(piece: TriviaPiece) -> Self {
        Self::new(&[piece])
    }

    pub fn len(&self) -> TextSize {
        match self.ptr {
            None => TextSize::new(0),
            Some(ref ptr) => ptr.header.header,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pieces().is_empty()
    }

    pub fn pieces(&self) -> &[TriviaPiece] {
        match &self.ptr {
            None => &[],
            Some(ptr) => &ptr.slice,
        }
    }

    /// Returns a new run with `piece` appended.
    pub fn push(&self, piece: TriviaPiece) -> Self {
        let mut pieces = self.pieces().to_vec();
        pieces.push(piece);
        Self::new(&pieces)
    }
}

/// Pairs each piece with its text, given the text the run was measured over.
pub fn trivia_texts<'a>(
    trivia: &'a GreenTrivia,
    text: &'a str,
) -> impl Iterator<Item = (TriviaPiece, &'a str)> + 'a {
    let mut offset = 0;
    trivia.pieces().iter().map(move |&piece| {
        let len = usize::from(piece.len);
        let piece_text = &text[offset..offset + len];
        offset += len;
        (piece, piece_text)
    })
}
