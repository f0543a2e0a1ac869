//! The PanCL error taxonomy.
//!
//! Every variant here is the Rust twin of one of the stable numeric codes
//! in the original C library's `pancl_error.h`. [`Error::code`] reproduces
//! those numbers for hosts that still want to bridge to the C ABI; nothing
//! in this crate matches on them.

use alloc::string::String;

use crate::position::Position;

/// Everything that can go wrong while refilling, lexing, or parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("context initialization failed")]
    CtxInit,
    #[error("internal error at {0:?}")]
    Internal(Position),
    #[error("allocation failed")]
    Alloc,
    #[error("invalid argument")]
    ArgInvalid,
    #[error("size arithmetic overflow")]
    Overflow,

    #[error("lexer refill failed at {0:?}")]
    LexerRefill(Position),
    #[error("comment escaped a newline at {0:?}")]
    CommentEscapedNewline(Position),

    #[error("unexpected end of input at {0:?}")]
    ParserEof(Position),
    #[error("unexpected token {token:?} at {position:?}")]
    ParserToken { position: Position, token: String },
    #[error("invalid table header at {0:?}")]
    ParserTableHeader(Position),
    #[error("invalid assignment at {0:?}")]
    ParserAssignment(Position),
    #[error("invalid rvalue at {0:?}")]
    ParserRValue(Position),
    #[error("invalid array at {0:?}")]
    ParserArray(Position),
    #[error("invalid tuple at {0:?}")]
    ParserTuple(Position),
    #[error("invalid inline table at {0:?}")]
    ParserInlineTable(Position),
    #[error("invalid custom-type argument list at {0:?}")]
    ParserCustomArgs(Position),

    #[error("array member has a different type than the array at {0:?}")]
    ArrayMemberType(Position),

    #[error("decimal literal has leading zeros at {0:?}")]
    IntLeadingZeros(Position),

    #[error("unterminated string starting at {0:?}")]
    StringShort(Position),
    #[error("\\x escape needs 1 or 2 hex digits at {0:?}")]
    HexEscapeShort(Position),
    #[error("\\u escape needs exactly 4 hex digits at {0:?}")]
    UEscapeShort(Position),
    #[error("\\U escape needs exactly 8 hex digits at {0:?}")]
    UUEscapeShort(Position),
    #[error("octal escape out of [0,255] range at {0:?}")]
    OctalEscapeDomain(Position),
    #[error("unknown escape sequence at {0:?}")]
    UnknownEscape(Position),

    #[error("UTF-16 surrogate codepoint at {0:?}")]
    Utf16Surrogate(Position),
    #[error("UCS non-character codepoint at {0:?}")]
    UcsNonchar(Position),
    #[error("codepoint above U+10FFFF at {0:?}")]
    Utf8High(Position),
    #[error("truncated UTF-8 sequence at {0:?}")]
    Utf8Truncated(Position),
    #[error("invalid UTF-8 byte sequence at {0:?}")]
    Utf8Decode(Position),

    #[error("invalid base for string-to-integer conversion")]
    StrToIntBase,
    #[error("invalid character in numeric literal at {0:?}")]
    StrToIntChar(Position),
    #[error("numeric literal out of range at {0:?}")]
    StrToIntRange(Position),

    #[error("custom-type constructor needs 1 or 2 arguments at {0:?}")]
    OptIntArgCount(Position),
    #[error("custom-type constructor's first argument must be a string at {0:?}")]
    OptIntArg0NotString(Position),
    #[error("custom-type constructor's second argument must be an integer at {0:?}")]
    OptIntArg1NotInt(Position),
}

impl Error {
    /// The stable numeric code this variant corresponds to in the
    /// original C ABI (`pancl_error.h`). Never used for matching within
    /// this crate; provided only as a bridge for external collaborators.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Error::CtxInit => 1,
            Error::Internal(_) => 2,
            Error::Alloc => 10,
            Error::ArgInvalid => 11,
            Error::Overflow => 12,
            Error::LexerRefill(_) => 100,
            Error::CommentEscapedNewline(_) => 101,
            Error::ParserEof(_) => 200,
            Error::ParserToken { .. } => 201,
            Error::ParserTableHeader(_) => 202,
            Error::ParserAssignment(_) => 203,
            Error::ParserRValue(_) => 204,
            Error::ParserArray(_) => 205,
            Error::ParserTuple(_) => 206,
            Error::ParserInlineTable(_) => 207,
            Error::ParserCustomArgs(_) => 208,
            Error::ArrayMemberType(_) => 300,
            Error::IntLeadingZeros(_) => 301,
            Error::StringShort(_) => 7004,
            Error::HexEscapeShort(_) => 7000,
            Error::UEscapeShort(_) => 7001,
            Error::UUEscapeShort(_) => 7002,
            Error::OctalEscapeDomain(_) => 7003,
            Error::UnknownEscape(_) => 7005,
            Error::Utf16Surrogate(_) => 8000,
            Error::UcsNonchar(_) => 8001,
            Error::Utf8High(_) => 8002,
            Error::Utf8Truncated(_) => 8003,
            Error::Utf8Decode(_) => 8004,
            Error::StrToIntBase => 9000,
            Error::StrToIntChar(_) => 9001,
            Error::StrToIntRange(_) => 9002,
            Error::OptIntArgCount(_) => 10000,
            Error::OptIntArg0NotString(_) => 10001,
            Error::OptIntArg1NotInt(_) => 10002,
        }
    }

    /// Best-effort position this error was detected at, for callers that
    /// don't want to match on the full variant set.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::CtxInit
            | Error::Alloc
            | Error::ArgInvalid
            | Error::Overflow
            | Error::StrToIntBase => None,
            Error::Internal(p)
            | Error::LexerRefill(p)
            | Error::CommentEscapedNewline(p)
            | Error::ParserEof(p)
            | Error::ParserTableHeader(p)
            | Error::ParserAssignment(p)
            | Error::ParserRValue(p)
            | Error::ParserArray(p)
            | Error::ParserTuple(p)
            | Error::ParserInlineTable(p)
            | Error::ParserCustomArgs(p)
            | Error::ArrayMemberType(p)
            | Error::IntLeadingZeros(p)
            | Error::StringShort(p)
            | Error::HexEscapeShort(p)
            | Error::UEscapeShort(p)
            | Error::UUEscapeShort(p)
            | Error::OctalEscapeDomain(p)
            | Error::UnknownEscape(p)
            | Error::Utf16Surrogate(p)
            | Error::UcsNonchar(p)
            | Error::Utf8High(p)
            | Error::Utf8Truncated(p)
            | Error::Utf8Decode(p)
            | Error::StrToIntChar(p)
            | Error::StrToIntRange(p)
            | Error::OptIntArgCount(p)
            | Error::OptIntArg0NotString(p)
            | Error::OptIntArg1NotInt(p) => Some(*p),
            Error::ParserToken { position, .. } => Some(*position),
        }
    }
}
