//! The streaming lexer. Consumes codepoints from a [`RefillBuffer`] and
//! produces [`Token`]s, with one token of pushback. Ported from
//! `next_token()`/`get_string()`/`handle_escape()` and friends in
//! `src/lexer/lex.c`.

mod classify;
pub mod token;

use alloc::string::String;

use crate::error::Error;
use crate::position::Position;
use crate::refill::{RefillBuffer, RefillSignal};
use crate::source::ByteSource;
use crate::token_buffer::TokenBuffer;
use crate::utf8;
use crate::value::Utf8String;

pub use token::{Subtype, Token, TokenKind};

const SPACE: u32 = 0x20;
const TAB: u32 = 0x09;
const LF: u32 = 0x0a;
const CR: u32 = 0x0d;
const BACKSLASH: u32 = 0x5c;
const HASH: u32 = 0x23;
const DQUOTE: u32 = 0x22;
const SQUOTE: u32 = 0x27;

fn is_raw_ident_char(cp: u32) -> bool {
    matches!(cp,
        0x30..=0x39 // 0-9
        | 0x41..=0x5a // A-Z
        | 0x61..=0x7a // a-z
        | 0x5f // _
        | 0x2b // +
        | 0x2d // -
        | 0x3a // :
        | 0x2e // .
    )
}

pub struct Lexer<S> {
    buffer: RefillBuffer<S>,
    position: Position,
    pushback: Option<Token>,
    scratch: TokenBuffer,
}

impl<S: ByteSource> Lexer<S> {
    #[must_use]
    pub fn new(source: S, buffer_size: usize) -> Self {
        Self {
            buffer: RefillBuffer::new(source, buffer_size),
            position: Position::origin(),
            pushback: None,
            scratch: TokenBuffer::new(),
        }
    }

    /// Returns one already-lexed token to the lexer; the next call to
    /// [`Self::next_token`] yields it again before reading new input.
    pub fn push_back(&mut self, token: Token) {
        debug_assert!(self.pushback.is_none(), "only one token of pushback");
        self.pushback = Some(token);
    }

    fn decode_at_cursor(&mut self) -> Result<Option<(u32, usize)>, Error> {
        match self.buffer.ensure(0)? {
            RefillSignal::EndOfInput => return Ok(None),
            RefillSignal::Truncated => unreachable!("need=0 never reports Truncated"),
            RefillSignal::Ready => {}
        }

        let lead = self.buffer.available()[0];
        let need = utf8::length_safe(lead);

        match self.buffer.ensure(need)? {
            RefillSignal::Ready => {}
            RefillSignal::Truncated | RefillSignal::EndOfInput => {
                return Err(Error::Utf8Truncated(self.position));
            }
        }

        let (cp, len) = utf8::decode(self.buffer.available(), self.position)?;
        Ok(Some((cp, len)))
    }

    fn peek_codepoint(&mut self) -> Result<Option<u32>, Error> {
        Ok(self.decode_at_cursor()?.map(|(cp, _)| cp))
    }

    fn get_codepoint(&mut self) -> Result<Option<u32>, Error> {
        match self.decode_at_cursor()? {
            None => Ok(None),
            Some((cp, len)) => {
                self.consume(cp, len)?;
                Ok(Some(cp))
            }
        }
    }

    fn consume(&mut self, cp: u32, len: usize) -> Result<(), Error> {
        self.buffer.advance(len);
        self.position.column += 1;

        if cp == CR {
            let next_is_lf = matches!(self.peek_codepoint()?, Some(LF));
            if !next_is_lf {
                self.position.column = 0;
                self.position.line += 1;
            }
        } else if cp == LF {
            self.position.column = 0;
            self.position.line += 1;
        }

        Ok(())
    }

    /// If `cp` begins a newline sequence, consumes any trailing `\n` of a
    /// CRLF pair and returns `true`. The longest matching sequence is
    /// always taken, so CRLF is one newline, not two.
    fn consume_newline_tail(&mut self, cp: u32) -> Result<bool, Error> {
        if cp == LF {
            return Ok(true);
        }
        if cp != CR {
            return Ok(false);
        }
        if matches!(self.peek_codepoint()?, Some(LF)) {
            self.get_codepoint()?;
        }
        Ok(true)
    }

    fn finish_text_token(&mut self, kind: TokenKind, start: Position) -> Token {
        self.scratch.terminate();
        let text = Utf8String::new(String::from(self.scratch.as_str()), self.scratch.codepoints());
        Token::with_text(kind, start, text)
    }

    fn build_error_token(&mut self, start: Position, codepoints: &[u32]) -> Result<Token, Error> {
        self.scratch.reset();
        for &cp in codepoints {
            self.scratch.append(cp, start)?;
        }
        Ok(self.finish_text_token(TokenKind::Error, start))
    }

    fn consume_comment(&mut self, start: Position) -> Result<(), Error> {
        let mut escape = false;
        loop {
            let cp = match self.get_codepoint()? {
                Some(cp) => cp,
                None => return Ok(()), // EOF ends the comment without error.
            };

            if self.consume_newline_tail(cp)? {
                return if escape {
                    Err(Error::CommentEscapedNewline(start))
                } else {
                    Ok(())
                };
            }

            escape = cp == BACKSLASH;
        }
    }

    fn lex_raw_ident(&mut self, start: Position, prefix: u32) -> Result<Token, Error> {
        self.scratch.reset();
        self.scratch.append(prefix, start)?;

        while let Some(cp) = self.peek_codepoint()? {
            if !is_raw_ident_char(cp) {
                break;
            }
            self.scratch.append(cp, start)?;
            self.get_codepoint()?;
        }

        let kind = classify::classify(self.scratch.as_str());
        Ok(self.finish_text_token(kind, start))
    }

    fn handle_octal_escape(&mut self, first: u32, start: Position) -> Result<(), Error> {
        let mut val: u32 = first - u32::from(b'0');
        let mut count = 1;

        while count < 3 {
            match self.peek_codepoint()? {
                Some(p @ 0x30..=0x37) => {
                    self.get_codepoint()?;
                    val = (val << 3) + (p - u32::from(b'0'));
                    count += 1;
                }
                _ => break,
            }
        }

        if val > 0xff {
            return Err(Error::OctalEscapeDomain(start));
        }
        self.scratch.append(val, start)
    }

    fn handle_hex_escape(&mut self, escape_char: u32, start: Position) -> Result<(), Error> {
        let exact = match escape_char {
            v if v == u32::from(b'x') => 2,
            v if v == u32::from(b'u') => 4,
            v if v == u32::from(b'U') => 8,
            _ => unreachable!("handle_hex_escape called with non-hex escape char"),
        };

        let mut digits = 0u32;
        let mut val: u32 = 0;

        while digits < exact {
            let add = match self.peek_codepoint()? {
                Some(p @ 0x30..=0x39) => p - u32::from(b'0'),
                Some(p @ 0x61..=0x66) => p - u32::from(b'a') + 10,
                Some(p @ 0x41..=0x46) => p - u32::from(b'A') + 10,
                _ => break,
            };
            self.get_codepoint()?;
            val = (val << 4) + add;
            digits += 1;
        }

        let required = if escape_char == u32::from(b'x') && digits == 1 {
            1
        } else {
            exact
        };

        if digits != required {
            return Err(match escape_char {
                v if v == u32::from(b'u') => Error::UEscapeShort(start),
                v if v == u32::from(b'U') => Error::UUEscapeShort(start),
                _ => Error::HexEscapeShort(start),
            });
        }

        self.scratch.append(val, start)
    }

    fn handle_escape(&mut self, cp: u32, raw: bool, start: Position) -> Result<(), Error> {
        if raw {
            self.scratch.append(BACKSLASH, start)?;
            self.scratch.append(cp, start)?;
            return Ok(());
        }

        let simple = match cp {
            v if v == u32::from(b'a') => Some(0x07),
            v if v == u32::from(b'b') => Some(0x08),
            v if v == u32::from(b'f') => Some(0x0c),
            v if v == u32::from(b'n') => Some(LF),
            v if v == u32::from(b'r') => Some(CR),
            v if v == u32::from(b't') => Some(TAB),
            v if v == u32::from(b'v') => Some(0x0b),
            BACKSLASH => Some(BACKSLASH),
            SQUOTE => Some(SQUOTE),
            DQUOTE => Some(DQUOTE),
            _ => None,
        };
        if let Some(code) = simple {
            return self.scratch.append(code, start);
        }

        if (0x30..=0x37).contains(&cp) {
            return self.handle_octal_escape(cp, start);
        }
        if cp == u32::from(b'x') || cp == u32::from(b'u') || cp == u32::from(b'U') {
            return self.handle_hex_escape(cp, start);
        }

        if self.consume_newline_tail(cp)? {
            return Ok(());
        }

        Err(Error::UnknownEscape(start))
    }

    fn lex_single_string(&mut self, open: Position, delim: u32) -> Result<(), Error> {
        let raw = delim == SQUOTE;
        let mut escape = false;

        loop {
            let cp = match self.get_codepoint()? {
                Some(cp) => cp,
                None => return Err(Error::StringShort(open)),
            };

            if escape {
                self.handle_escape(cp, raw, open)?;
                escape = false;
                continue;
            }

            if cp == BACKSLASH {
                escape = true;
                continue;
            }

            if cp == delim {
                return Ok(());
            }

            if self.consume_newline_tail(cp)? {
                self.scratch.append(LF, open)?;
                continue;
            }

            self.scratch.append(cp, open)?;
        }
    }

    /// Lexes one (possibly multi-piece) string literal. `delim` is the
    /// opening quote, already consumed; `start` is its position.
    fn lex_string(&mut self, start: Position, delim: u32) -> Result<Token, Error> {
        self.scratch.reset();
        self.lex_single_string(start, delim)?;

        loop {
            match self.peek_codepoint()? {
                None => break,
                Some(SPACE | TAB) => {
                    self.get_codepoint()?;
                }
                Some(cp @ (DQUOTE | SQUOTE)) => {
                    self.get_codepoint()?;
                    self.lex_single_string(start, cp)?;
                }
                Some(BACKSLASH) => {
                    self.get_codepoint()?;
                    match self.peek_codepoint()? {
                        Some(c2 @ (LF | CR)) => {
                            self.get_codepoint()?;
                            self.consume_newline_tail(c2)?;
                        }
                        // Not followed by a newline: the backslash is
                        // dropped and concatenation ends here, matching
                        // the original lexer's `get_string()`.
                        _ => break,
                    }
                }
                _ => break,
            }
        }

        Ok(self.finish_text_token(TokenKind::String, start))
    }

    /// Produces the next token, consuming the pushback slot first if set.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        if let Some(tok) = self.pushback.take() {
            return Ok(tok);
        }

        self.scratch.reset();
        let mut escaped = false;

        loop {
            let start = self.position;
            let cp = match self.get_codepoint()? {
                Some(cp) => cp,
                None => {
                    if escaped {
                        return self.build_error_token(start, &[BACKSLASH]);
                    }
                    return Ok(Token::empty(TokenKind::Eof, start));
                }
            };

            if self.consume_newline_tail(cp)? {
                if escaped {
                    escaped = false;
                    continue;
                }
                return Ok(Token::empty(TokenKind::Newline, start));
            }

            if escaped {
                return self.build_error_token(start, &[BACKSLASH, cp]);
            }

            match cp {
                0x5b => return Ok(Token::empty(TokenKind::LBracket, start)),
                0x5d => return Ok(Token::empty(TokenKind::RBracket, start)),
                0x28 => return Ok(Token::empty(TokenKind::LParen, start)),
                0x29 => return Ok(Token::empty(TokenKind::RParen, start)),
                0x7b => return Ok(Token::empty(TokenKind::LBrace, start)),
                0x7d => return Ok(Token::empty(TokenKind::RBrace, start)),
                0x3d => return Ok(Token::empty(TokenKind::Eq, start)),
                0x2c => return Ok(Token::empty(TokenKind::Comma, start)),
                SPACE | TAB => continue,
                HASH => {
                    self.consume_comment(start)?;
                    return Ok(Token::empty(TokenKind::Comment, start));
                }
                DQUOTE | SQUOTE => return self.lex_string(start, cp),
                BACKSLASH => {
                    escaped = true;
                    continue;
                }
                _ if is_raw_ident_char(cp) => return self.lex_raw_ident(start, cp),
                _ => return self.build_error_token(start, &[cp]),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SliceSource;

    fn lexer(input: &str) -> Lexer<SliceSource<'_>> {
        Lexer::new(SliceSource::new(input.as_bytes()), 8192)
    }

    fn kinds(input: &str) -> alloc::vec::Vec<TokenKind> {
        let mut lx = lexer(input);
        let mut out = alloc::vec::Vec::new();
        loop {
            let t = lx.next_token().unwrap();
            let done = t.kind == TokenKind::Eof;
            out.push(t.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            kinds("[](){}=,"),
            alloc::vec![
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eq,
                TokenKind::Comma,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn whitespace_is_silent() {
        assert_eq!(kinds("  \t "), alloc::vec![TokenKind::Eof]);
    }

    #[test]
    fn comment_is_one_newline_subtype_token() {
        let mut lx = lexer("# hello\nx");
        let t = lx.next_token().unwrap();
        assert_eq!(t.kind, TokenKind::Comment);
        assert_eq!(t.subtype(), Subtype::Newline);
    }

    #[test]
    fn comment_escaped_newline_is_error() {
        let mut lx = lexer("# hello \\\nx");
        assert_eq!(
            lx.next_token(),
            Err(Error::CommentEscapedNewline(Position::new(0, 0)))
        );
    }

    #[test]
    fn string_with_escapes() {
        let mut lx = lexer(r#""aéb""#);
        let t = lx.next_token().unwrap();
        assert_eq!(t.kind, TokenKind::String);
        assert_eq!(t.text_str(), "aéb");
    }

    #[test]
    fn adjacent_strings_concatenate() {
        let mut lx = lexer("\"a\" \"b\" \\\n   \"c\"");
        let t = lx.next_token().unwrap();
        assert_eq!(t.kind, TokenKind::String);
        assert_eq!(t.text_str(), "abc");
    }

    #[test]
    fn raw_string_passes_unknown_escapes_through() {
        let mut lx = lexer(r"'a\db'");
        let t = lx.next_token().unwrap();
        assert_eq!(t.text_str(), r"a\db");
    }

    #[test]
    fn unterminated_string_is_string_short_at_open_quote() {
        let mut lx = lexer("\"abc");
        assert_eq!(lx.next_token(), Err(Error::StringShort(Position::new(0, 0))));
    }

    #[test]
    fn backslash_not_before_newline_is_error() {
        let mut lx = lexer("\\x");
        let t = lx.next_token().unwrap();
        assert_eq!(t.kind, TokenKind::Error);
        assert_eq!(t.text_str(), "\\x");
    }

    #[test]
    fn line_continuation_outside_string_is_silent() {
        let mut lx = lexer("a\\\nb");
        let t = lx.next_token().unwrap();
        assert_eq!(t.kind, TokenKind::RawIdent);
        assert_eq!(t.text_str(), "ab");
    }

    #[test]
    fn crlf_is_one_newline() {
        let mut lx = lexer("a\r\nb");
        let t1 = lx.next_token().unwrap();
        assert_eq!(t1.text_str(), "a");
        let t2 = lx.next_token().unwrap();
        assert_eq!(t2.kind, TokenKind::Newline);
        let t3 = lx.next_token().unwrap();
        assert_eq!(t3.position, Position::new(1, 0));
        assert_eq!(t3.text_str(), "b");
    }

    #[test]
    fn pushback_returns_same_token() {
        let mut lx = lexer("a b");
        let t1 = lx.next_token().unwrap();
        lx.push_back(t1.clone());
        let t2 = lx.next_token().unwrap();
        assert_eq!(t1, t2);
    }

    #[test]
    fn numeric_classification() {
        assert_eq!(kinds("42")[0], TokenKind::IntDec);
        assert_eq!(kinds("0x1A")[0], TokenKind::IntHex);
        assert_eq!(kinds("0o17")[0], TokenKind::IntOct);
        assert_eq!(kinds("0b101")[0], TokenKind::IntBin);
        assert_eq!(kinds("1.5")[0], TokenKind::Float);
        assert_eq!(kinds("true")[0], TokenKind::True);
        assert_eq!(kinds("false")[0], TokenKind::False);
    }
}
