//! Terminator predicates: per-context functions deciding whether a token
//! ends the current element (`Valid`), is skippable (`Ignore`), or is a
//! syntax error (`Invalid`). Idiomatic stand-ins for the function pointers
//! `src/parser/parse.c` dispatches through for the same purpose.

use crate::lexer::{Subtype, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminatorAction {
    Ignore,
    Valid,
    Invalid,
}

/// Terminates a top-level assignment or table header: a newline (or
/// anything with newline subtype, e.g. a trailing comment) or `Eof`.
#[must_use]
pub fn newline_terminator(tok: &Token) -> TerminatorAction {
    if tok.kind == TokenKind::Eof || tok.subtype() == Subtype::Newline {
        TerminatorAction::Valid
    } else {
        TerminatorAction::Invalid
    }
}

/// Terminates one array member: `,` or the closing `]`. Newlines between
/// members are ignorable.
#[must_use]
pub fn array_member_terminator(tok: &Token) -> TerminatorAction {
    match tok.kind {
        TokenKind::RBracket | TokenKind::Comma => TerminatorAction::Valid,
        _ if tok.subtype() == Subtype::Newline => TerminatorAction::Ignore,
        _ => TerminatorAction::Invalid,
    }
}

/// Terminates one tuple member: `,` or the closing `)`.
#[must_use]
pub fn tuple_member_terminator(tok: &Token) -> TerminatorAction {
    match tok.kind {
        TokenKind::RParen | TokenKind::Comma => TerminatorAction::Valid,
        _ if tok.subtype() == Subtype::Newline => TerminatorAction::Ignore,
        _ => TerminatorAction::Invalid,
    }
}

/// Terminates one inline-table entry: `,` or the closing `}`.
#[must_use]
pub fn inline_table_entry_terminator(tok: &Token) -> TerminatorAction {
    match tok.kind {
        TokenKind::RBrace | TokenKind::Comma => TerminatorAction::Valid,
        _ if tok.subtype() == Subtype::Newline => TerminatorAction::Ignore,
        _ => TerminatorAction::Invalid,
    }
}
