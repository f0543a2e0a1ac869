//! Recursive-descent parser. Drives a [`Lexer`] table by table; the
//! grammar and the `get_next_table` table-slicing rule are ported from
//! `src/parser/parse.c`.

mod terminator;

use alloc::string::String;
use alloc::vec::Vec;

use crate::custom;
use crate::error::Error;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::position::Position;
use crate::source::ByteSource;
use crate::value::{Custom, Entry, Table, Utf8String, Value};
use terminator::TerminatorAction;

/// Parses PanCL source, one top-level table per call to
/// [`Parser::get_next_table`].
pub struct Parser<S> {
    lexer: Lexer<S>,
}

impl<S: ByteSource> Parser<S> {
    #[must_use]
    pub fn new(source: S, buffer_size: usize) -> Self {
        Self {
            lexer: Lexer::new(source, buffer_size),
        }
    }

    /// Reads one more token, turning a lexer-level `Error` token into a
    /// `ParserToken` error so every caller sees one uniform failure mode.
    fn next_token(&mut self) -> Result<Token, Error> {
        let tok = self.lexer.next_token()?;
        if tok.kind == TokenKind::Error {
            return Err(Error::ParserToken {
                position: tok.position,
                token: String::from(tok.text_str()),
            });
        }
        Ok(tok)
    }

    fn push_back(&mut self, tok: Token) {
        self.lexer.push_back(tok);
    }

    fn peek_position(&mut self) -> Result<Position, Error> {
        let tok = self.next_token()?;
        let pos = tok.position;
        self.push_back(tok);
        Ok(pos)
    }

    /// Returns the next non-ignorable (non-newline/comment) token.
    fn skip_newlines(&mut self) -> Result<Token, Error> {
        loop {
            let tok = self.next_token()?;
            if tok.subtype() == crate::lexer::Subtype::Newline {
                continue;
            }
            return Ok(tok);
        }
    }

    fn parse_name_token(&mut self) -> Result<(Utf8String, Position), Error> {
        let tok = self.next_token()?;
        if matches!(tok.kind, TokenKind::RawIdent | TokenKind::String) {
            let position = tok.position;
            let name = tok.text.expect("ident/string token always carries text");
            return Ok((name, position));
        }
        Err(Error::ParserToken {
            position: tok.position,
            token: String::from(tok.text_str()),
        })
    }

    /// Drives one bracketed, comma-separated, newline-tolerant body
    /// (`[...]`, `(...)`, `{...}`), collecting whatever `parse_one` returns
    /// for each member. Shared by arrays, tuples, and inline tables.
    fn parse_bracketed_body<T>(
        &mut self,
        close: TokenKind,
        terminator: fn(&Token) -> TerminatorAction,
        err: fn(Position) -> Error,
        mut parse_one: impl FnMut(&mut Self) -> Result<T, Error>,
    ) -> Result<(Vec<T>, Position), Error> {
        let mut items = Vec::new();

        let first = self.skip_newlines()?;
        if first.kind == close {
            return Ok((items, first.position));
        }
        self.push_back(first);

        loop {
            items.push(parse_one(self)?);

            let sep = loop {
                let tok = self.next_token()?;
                match terminator(&tok) {
                    TerminatorAction::Ignore => continue,
                    TerminatorAction::Valid => break tok,
                    TerminatorAction::Invalid => return Err(err(tok.position)),
                }
            };

            if sep.kind == close {
                return Ok((items, sep.position));
            }

            // `sep` is the separating comma: a trailing comma is fine, so
            // check for `close` again before committing to another member.
            let next = self.skip_newlines()?;
            if next.kind == close {
                return Ok((items, next.position));
            }
            self.push_back(next);
        }
    }

    fn parse_array(&mut self) -> Result<Value, Error> {
        let (items, _) = self.parse_bracketed_body(
            TokenKind::RBracket,
            terminator::array_member_terminator,
            Error::ParserArray,
            |p| {
                let pos = p.peek_position()?;
                let value = p.parse_rvalue()?;
                Ok((value, pos))
            },
        )?;

        let mut array = Value::Array(Vec::new());
        for (value, pos) in items {
            Value::push_array_element(&mut array, value).map_err(|_| Error::ArrayMemberType(pos))?;
        }
        Ok(array)
    }

    fn parse_tuple(&mut self) -> Result<Vec<Value>, Error> {
        let (items, _) = self.parse_bracketed_body(
            TokenKind::RParen,
            terminator::tuple_member_terminator,
            Error::ParserTuple,
            Self::parse_rvalue,
        )?;
        Ok(items)
    }

    fn parse_inline_table_entry(&mut self) -> Result<Entry, Error> {
        let (name, position) = self.parse_name_token()?;
        let eq = self.next_token()?;
        if eq.kind != TokenKind::Eq {
            return Err(Error::ParserAssignment(eq.position));
        }
        let value = self.parse_rvalue()?;
        Ok(Entry { name, value, position })
    }

    fn parse_inline_table(&mut self) -> Result<Value, Error> {
        let (entries, _) = self.parse_bracketed_body(
            TokenKind::RBrace,
            terminator::inline_table_entry_terminator,
            Error::ParserInlineTable,
            Self::parse_inline_table_entry,
        )?;
        Ok(Value::Table(entries))
    }

    fn parse_custom(&mut self, name_tok: Token) -> Result<Value, Error> {
        let lparen = self.next_token()?;
        if lparen.kind != TokenKind::LParen {
            return Err(Error::ParserRValue(name_tok.position));
        }
        let args = self.parse_tuple()?;
        let name = name_tok.text.expect("RawIdent token always carries text");
        custom::rewrite(Custom { name, args }, name_tok.position)
    }

    fn parse_decimal(&mut self, tok: &Token) -> Result<Value, Error> {
        let text = tok.text_str();
        let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
        if digits.len() > 1 && digits.as_bytes()[0] == b'0' {
            return Err(Error::IntLeadingZeros(tok.position));
        }
        let value = crate::numeric::coerce_i32(text, 0, tok.position)?;
        Ok(Value::Integer(value))
    }

    fn parse_nondecimal_int(&mut self, tok: &Token) -> Result<Value, Error> {
        let value = crate::numeric::coerce_i32(tok.text_str(), 0, tok.position)?;
        Ok(Value::Integer(value))
    }

    fn parse_float(&mut self, tok: &Token) -> Result<Value, Error> {
        let text = tok.text_str();
        let rest = text.strip_prefix('-').or_else(|| text.strip_prefix('+')).unwrap_or(text);
        let negative = text.starts_with('-');

        let value = if rest == "Inf" {
            f64::INFINITY
        } else if rest == "NaN" {
            f64::NAN
        } else {
            return text
                .parse::<f64>()
                .map(Value::Floating)
                .map_err(|_| Error::ParserRValue(tok.position));
        };

        Ok(Value::Floating(if negative { -value } else { value }))
    }

    fn parse_rvalue(&mut self) -> Result<Value, Error> {
        let tok = self.next_token()?;
        match tok.kind {
            TokenKind::String => Ok(Value::String(tok.text.expect("string token carries text"))),
            TokenKind::True => Ok(Value::Boolean(true)),
            TokenKind::False => Ok(Value::Boolean(false)),
            TokenKind::IntDec => self.parse_decimal(&tok),
            TokenKind::IntBin | TokenKind::IntOct | TokenKind::IntHex => self.parse_nondecimal_int(&tok),
            TokenKind::Float => self.parse_float(&tok),
            TokenKind::LBracket => self.parse_array(),
            TokenKind::LParen => Ok(Value::Tuple(self.parse_tuple()?)),
            TokenKind::LBrace => self.parse_inline_table(),
            TokenKind::RawIdent => self.parse_custom(tok),
            _ => Err(Error::ParserRValue(tok.position)),
        }
    }

    fn parse_table_header(&mut self) -> Result<(Utf8String, Position), Error> {
        let (name, pos) = self.parse_name_token()?;
        let rbracket = self.next_token()?;
        if rbracket.kind != TokenKind::RBracket {
            return Err(Error::ParserTableHeader(rbracket.position));
        }
        let term = self.next_token()?;
        if !matches!(terminator::newline_terminator(&term), TerminatorAction::Valid) {
            return Err(Error::ParserTableHeader(term.position));
        }
        Ok((name, pos))
    }

    fn parse_top_level_assignment(
        &mut self,
        name: Utf8String,
        position: Position,
    ) -> Result<Entry, Error> {
        let eq = self.next_token()?;
        if eq.kind != TokenKind::Eq {
            return Err(Error::ParserAssignment(eq.position));
        }
        let value = self.parse_rvalue()?;
        let term = self.next_token()?;
        if !matches!(terminator::newline_terminator(&term), TerminatorAction::Valid) {
            return Err(Error::ParserAssignment(term.position));
        }
        Ok(Entry { name, value, position })
    }

    /// Returns the next top-level table, or `Ok(None)` once the document is
    /// exhausted. Mirrors `pancl_get_next_table`'s table-slicing rule: a
    /// table's body runs until either the next `[header]` (pushed back for
    /// the following call) or end-of-input.
    pub fn get_next_table(&mut self) -> Result<Option<Table>, Error> {
        let (name, start) = loop {
            let tok = self.next_token()?;
            match tok.kind {
                TokenKind::Eof => return Ok(None),
                TokenKind::Newline | TokenKind::Comment => continue,
                TokenKind::LBracket => break (Some(self.parse_table_header()?.0), tok.position),
                _ => {
                    let pos = tok.position;
                    self.push_back(tok);
                    break (None, pos);
                }
            }
        };

        let mut table = Table::new(name, start);

        loop {
            let tok = self.next_token()?;
            match tok.kind {
                TokenKind::Eof => return Ok(Some(table)),
                TokenKind::Newline | TokenKind::Comment => continue,
                TokenKind::LBracket => {
                    self.push_back(tok);
                    return Ok(Some(table));
                }
                TokenKind::RawIdent | TokenKind::String => {
                    let name = tok.text.expect("ident/string token always carries text");
                    let entry = self.parse_top_level_assignment(name, tok.position)?;
                    table.entries.push(entry);
                }
                _ => return Err(Error::ParserAssignment(tok.position)),
            }
        }
    }
}
