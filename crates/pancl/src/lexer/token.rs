//! Token kinds and the owned `Token` the lexer hands the parser.

use crate::position::Position;
use crate::value::Utf8String;

/// What a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LBracket,
    RBracket,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Eq,
    Comma,
    Newline,
    Comment,
    Eof,
    Error,
    RawIdent,
    String,
    IntBin,
    IntDec,
    IntHex,
    IntOct,
    Float,
    True,
    False,
    /// Internal sentinel for an empty pushback slot; never observed by a
    /// caller of [`crate::lexer::Lexer::next_token`].
    Unset,
}

/// Tags a token as acting like an identifier or like a newline, the way
/// the terminator predicates in the parser need to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subtype {
    None,
    Ident,
    Newline,
}

impl TokenKind {
    #[must_use]
    pub fn subtype(self) -> Subtype {
        match self {
            TokenKind::RawIdent | TokenKind::String | TokenKind::True | TokenKind::False => {
                Subtype::Ident
            }
            TokenKind::Newline | TokenKind::Comment => Subtype::Newline,
            _ => Subtype::None,
        }
    }
}

/// A lexed token. Lexeme-bearing kinds (`RawIdent`, `String`, the integer
/// kinds, `Float`, `Error`) carry their text in `text`; everything else
/// leaves it `None`.
///
/// A token carries at most one owned string (invariant 5 of spec.md §3):
/// moving a `Token` moves that string with it, which in Rust is simply
/// what `Token` being a plain owned struct already gives for free.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
    pub text: Option<Utf8String>,
}

impl Token {
    #[must_use]
    pub fn empty(kind: TokenKind, position: Position) -> Self {
        Self {
            kind,
            position,
            text: None,
        }
    }

    #[must_use]
    pub fn with_text(kind: TokenKind, position: Position, text: Utf8String) -> Self {
        Self {
            kind,
            position,
            text: Some(text),
        }
    }

    #[must_use]
    pub fn subtype(&self) -> Subtype {
        self.kind.subtype()
    }

    #[must_use]
    pub fn text_str(&self) -> &str {
        self.text.as_ref().map_or("", Utf8String::as_str)
    }
}
