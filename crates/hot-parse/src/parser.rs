use drop_bomb::DropBomb;
use hot_errors::Diagnostic;
use hot_tokenizer::{Token, Tokenizer};
use hot_yellow::{Builder, SyntaxKind, SyntaxTree};

pub(crate) struct Parser<'t> {
    text: &'t str,
    tokenizer: Tokenizer<'t>,
    events: Vec<Event>,
    errors: Vec<Diagnostic>,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(text: &'t str) -> Self {
        Self { text, tokenizer: Tokenizer::new(text), events: Vec::new(), errors: Vec::new() }
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.tokenizer.peek().kind
    }

    pub(crate) fn nth_kind(&self, n: usize) -> SyntaxKind {
        if n == 0 { self.peek_kind() } else { self.tokenizer.nth(n).kind }
    }

    fn nth_text(&self, n: usize) -> &'t str {
        let range = if n == 0 {
            self.tokenizer.peek().kind_range
        } else {
            self.tokenizer.nth(n).kind_range
        };
        &self.text[range]
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    /// Whether the `n`th token is the identifier `keyword`.
    pub(crate) fn nth_at_contextual_kw(&self, n: usize, keyword: &str) -> bool {
        self.nth_kind(n) == SyntaxKind::NAME && self.nth_text(n) == keyword
    }

    pub(crate) fn at_contextual_kw(&self, keyword: &str) -> bool {
        self.nth_at_contextual_kw(0, keyword)
    }

    pub(crate) fn at_operator(&self, op: &str) -> bool {
        self.at(SyntaxKind::OPERATOR) && self.nth_text(0) == op
    }

    pub(crate) fn advance(&mut self) {
        if self.at(SyntaxKind::EOF) {
            return;
        }

        let token = self.tokenizer.next_token();
        self.events.push(Event::Token(token));
    }

    /// Consumes the current token, giving it `kind`. Used for contextual keywords.
    pub(crate) fn advance_remap(&mut self, kind: SyntaxKind) {
        if self.at(SyntaxKind::EOF) {
            return;
        }

        let mut token = self.tokenizer.next_token();
        token.kind = kind;
        self.events.push(Event::Token(token));
    }

    /// Consumes the end-of-file token, which carries the trivia at the end of the text.
    pub(crate) fn advance_eof(&mut self) {
        debug_assert!(self.at(SyntaxKind::EOF));
        let token = self.tokenizer.next_token();
        self.events.push(Event::Token(token));
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }
        self.advance();
        true
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        let message = match kind.fixed_text() {
            Some(text) => format!("expected `{text}`"),
            None => format!("expected {kind:?}"),
        };
        self.error(message);
        false
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        let range = self.tokenizer.peek().kind_range;
        self.errors.push(Diagnostic::error(message, range));
    }

    pub(crate) fn error_and_bump(&mut self, message: &str) {
        let m = self.start();
        self.error(message);
        self.advance();
        m.complete(self, SyntaxKind::ERROR);
    }

    pub(crate) fn build_tree(self) -> (SyntaxTree, Vec<Diagnostic>) {
        let Parser { text, tokenizer: _, mut events, errors } = self;
        let mut builder = Builder::new(text);
        let mut forward_parents = Vec::new();

        for i in 0..events.len() {
            match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent } => {
                    if kind == SyntaxKind::TOMBSTONE {
                        continue;
                    }

                    forward_parents.push(kind);
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent } => {
                                if kind != SyntaxKind::TOMBSTONE {
                                    forward_parents.push(kind);
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for kind in forward_parents.drain(..).rev() {
                        builder.start_node(kind);
                    }
                }
                Event::Finish => {
                    builder.finish_node();
                }
                Event::Token(Token { leading, kind, kind_range, trailing }) => {
                    builder.token(leading.pieces(), kind, kind_range.len(), trailing.pieces());
                }
            }
        }

        (builder.finish(), errors)
    }
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    Token(Token),
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Event::Start { kind: SyntaxKind::TOMBSTONE, forward_parent: None };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Marker {
        Marker { position: pos, bomb: DropBomb::new("Marker must be completed") }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker::new(self.position)
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
}

impl CompletedMarker {
    fn new(pos: u32) -> Self {
        CompletedMarker { pos }
    }

    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
