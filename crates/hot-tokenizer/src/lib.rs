mod cursor;

use cursor::{Cursor, EOF_CHAR};
pub use hot_yellow::SyntaxKind;
use hot_yellow::SyntaxKind::*;
use hot_yellow::{GreenTrivia, TriviaPiece, TriviaPieceKind};
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone)]
pub struct Token {
    pub leading: GreenTrivia,
    pub kind: SyntaxKind,
    pub kind_range: TextRange,
    pub trailing: GreenTrivia,
}

impl Token {
    const EOF: Self = Self {
        kind: EOF,
        kind_range: TextRange::empty(TextSize::new(0)),
        leading: GreenTrivia::empty(),
        trailing: GreenTrivia::empty(),
    };

    /// Range covered by the token together with its trivia.
    pub fn full_range(&self) -> TextRange {
        TextRange::new(
            self.kind_range.start() - self.leading.len(),
            self.kind_range.end() + self.trailing.len(),
        )
    }
}

/// Splits C# source into tokens with attached trivia.
///
/// Trailing trivia runs up to and including the first line terminator after a token; everything
/// after that is leading trivia of the next token. Trivia at the end of the file is attached to
/// the `EOF` token.
#[derive(Clone)]
pub struct Tokenizer<'t> {
    text: &'t str,
    cursor: Cursor<'t>,
    current: Token,
    trivia_pieces: Vec<TriviaPiece>,
    at_line_start: bool,
}

impl<'t> Tokenizer<'t> {
    pub fn new(text: &'t str) -> Self {
        let mut tokenizer = Self {
            text,
            cursor: Cursor::new(text),
            current: Token::EOF,
            trivia_pieces: Vec::with_capacity(4),
            at_line_start: true,
        };
        tokenizer.next_token();
        tokenizer
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    /// Looks `n` tokens past the current one without consuming anything.
    pub fn nth(&self, n: usize) -> Token {
        let mut lookahead = self.clone();
        for _ in 0..n {
            lookahead.next_token();
        }
        lookahead.current
    }

    fn offset(&self) -> TextSize {
        TextSize::of(self.text) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        TextRange::new(end - self.cursor.pos_within_token(), end)
    }

    fn text(&self) -> &'t str {
        &self.text[self.range()]
    }

    pub fn next_token(&mut self) -> Token {
        self.trivia(false);
        let trailing_start = self.trivia_pieces.len();
        let (kind, kind_range) = self.syntax_kind();
        if kind != EOF {
            self.trivia(true);
        }

        let (leading, trailing) = self.trivia_pieces.split_at(trailing_start);
        let leading = GreenTrivia::new(leading);
        let trailing = GreenTrivia::new(trailing);

        self.trivia_pieces.clear();
        std::mem::replace(&mut self.current, Token { leading, kind, kind_range, trailing })
    }

    fn trivia(&mut self, trailing: bool) {
        loop {
            if self.cursor.is_eof() {
                break;
            }
            let kind = match self.cursor.peek() {
                '\r' | '\n' => {
                    if self.cursor.advance() == '\r' {
                        self.cursor.advance_if('\n');
                    }
                    TriviaPieceKind::Newline
                }
                '/' if self.cursor.second() == '/' => {
                    self.cursor.advance_while(|c| !is_newline(c));
                    TriviaPieceKind::SingleLineComment
                }
                '/' if self.cursor.second() == '*' => {
                    self.block_comment();
                    TriviaPieceKind::MultiLineComment
                }
                '#' if self.at_line_start => {
                    self.cursor.advance_while(|c| !is_newline(c));
                    TriviaPieceKind::Directive
                }
                c if is_whitespace(c) => {
                    self.cursor.advance_while(is_whitespace);
                    TriviaPieceKind::Whitespace
                }
                _ => break,
            };

            self.at_line_start = match kind {
                TriviaPieceKind::Newline => true,
                TriviaPieceKind::Whitespace => self.at_line_start,
                _ => false,
            };
            self.trivia_pieces.push(TriviaPiece::new(kind, self.cursor.pos_within_token()));
            self.cursor.reset_pos_within_token();

            if trailing && kind == TriviaPieceKind::Newline {
                break;
            }
        }
    }

    fn block_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();
        while !self.cursor.is_eof() {
            if self.cursor.advance() == '*' && self.cursor.advance_if('/') {
                break;
            }
        }
    }

    fn syntax_kind(&mut self) -> (SyntaxKind, TextRange) {
        if self.cursor.is_eof() {
            return (EOF, TextRange::empty(self.offset()));
        }
        self.at_line_start = false;

        let kind = match self.cursor.advance() {
            '{' => L_BRACE,
            '}' => R_BRACE,
            '(' => L_PAREN,
            ')' => R_PAREN,
            '[' => L_BRACK,
            ']' => R_BRACK,
            '<' => L_ANGLE,
            '>' => R_ANGLE,
            ';' => SEMICOLON,
            ',' => COMMA,
            '?' => QUESTION,
            ':' => {
                if self.cursor.advance_if(':') {
                    COLON2
                } else {
                    COLON
                }
            }
            '.' => {
                if self.cursor.peek().is_ascii_digit() {
                    self.number()
                } else {
                    DOT
                }
            }
            '=' => {
                if self.cursor.matches('=') || self.cursor.matches('>') {
                    self.cursor.advance();
                    OPERATOR
                } else {
                    EQ
                }
            }
            '"' => self.string(false),
            '\'' => self.char_literal(),
            '@' if self.cursor.matches('"') => {
                self.cursor.advance();
                self.string_body(true)
            }
            '@' if is_ident_start(self.cursor.peek()) => {
                self.cursor.advance_while(is_ident_continue);
                NAME
            }
            '$' => self.interpolated_string(),
            '0'..='9' => self.number(),
            c if is_ident_start(c) => {
                self.cursor.advance_while(is_ident_continue);
                SyntaxKind::from_keyword(self.text()).unwrap_or(NAME)
            }
            c if is_operator(c) => {
                self.cursor.advance_while(is_operator);
                OPERATOR
            }
            _ => UNKNOWN,
        };

        let range = self.range();
        self.cursor.reset_pos_within_token();

        (kind, range)
    }

    /// Called after the opening quote; `"""` starts a raw string.
    fn string(&mut self, verbatim: bool) -> SyntaxKind {
        if !verbatim && self.cursor.matches('"') && self.cursor.second() == '"' {
            return self.raw_string();
        }
        self.string_body(verbatim)
    }

    fn string_body(&mut self, verbatim: bool) -> SyntaxKind {
        while !self.cursor.is_eof() {
            match self.cursor.peek() {
                '"' => {
                    self.cursor.advance();
                    if verbatim && self.cursor.advance_if('"') {
                        continue;
                    }
                    break;
                }
                '\\' if !verbatim => {
                    self.cursor.advance();
                    if !is_newline(self.cursor.peek()) {
                        self.cursor.advance();
                    }
                }
                c if is_newline(c) && !verbatim => break,
                _ => {
                    self.cursor.advance();
                }
            }
        }
        STRING
    }

    fn raw_string(&mut self) -> SyntaxKind {
        let mut quotes = 1;
        while self.cursor.advance_if('"') {
            quotes += 1;
        }

        let mut run = 0;
        while !self.cursor.is_eof() {
            if self.cursor.advance() == '"' {
                run += 1;
                if run == quotes {
                    break;
                }
            } else {
                run = 0;
            }
        }
        STRING
    }

    fn interpolated_string(&mut self) -> SyntaxKind {
        let mut verbatim = false;
        loop {
            match self.cursor.peek() {
                '$' => {}
                '@' => verbatim = true,
                _ => break,
            }
            self.cursor.advance();
        }
        if !self.cursor.advance_if('"') {
            return UNKNOWN;
        }
        self.string(verbatim)
    }

    fn char_literal(&mut self) -> SyntaxKind {
        while !self.cursor.is_eof() {
            match self.cursor.peek() {
                '\'' => {
                    self.cursor.advance();
                    break;
                }
                '\\' => {
                    self.cursor.advance();
                    if !is_newline(self.cursor.peek()) {
                        self.cursor.advance();
                    }
                }
                c if is_newline(c) => break,
                _ => {
                    self.cursor.advance();
                }
            }
        }
        CHAR
    }

    fn number(&mut self) -> SyntaxKind {
        let mut previous = EOF_CHAR;
        loop {
            let c = self.cursor.peek();
            let accept = match c {
                '_' => true,
                c if c.is_ascii_alphanumeric() => true,
                '.' => self.cursor.second().is_ascii_digit(),
                '+' | '-' => matches!(previous, 'e' | 'E'),
                _ => false,
            };
            if !accept || self.cursor.is_eof() {
                break;
            }
            previous = self.cursor.advance();
        }
        NUMBER
    }
}

fn is_newline(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn is_whitespace(c: char) -> bool {
    c != EOF_CHAR && !is_newline(c) && c.is_whitespace()
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' | '!' | '~' | '=')
}
