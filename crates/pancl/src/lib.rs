//! A streaming lexer and recursive-descent parser for PanCL, a
//! configuration-file language: tables of named entries whose values are
//! booleans, 32-bit integers, floats, strings, arrays, tuples, inline
//! tables, and named "custom" constructors (`::Uint8(...)` and friends).
//!
//! The entry point is [`Parser`]: construct one over anything implementing
//! [`ByteSource`], then call [`Parser::get_next_table`] repeatedly until it
//! returns `Ok(None)`.
//!
//! ```
//! use pancl::{ParseOptions, Parser, SliceSource, Value};
//!
//! let mut parser = Parser::from_slice(b"a = 1\n[t]\nb = \"x\"\n", ParseOptions::default());
//! let root = parser.get_next_table().unwrap().unwrap();
//! assert_eq!(root.entries[0].value, Value::Integer(1));
//! let named = parser.get_next_table().unwrap().unwrap();
//! assert_eq!(named.name.as_ref().unwrap().as_str(), "t");
//! assert!(parser.get_next_table().unwrap().is_none());
//! ```

#![no_std]

extern crate alloc;
#[cfg(any(test, feature = "std"))]
extern crate std;

mod custom;
mod error;
mod lexer;
mod numeric;
mod parser;
mod position;
mod refill;
mod source;
mod token_buffer;
mod utf8;
mod value;

pub use error::Error;
pub use position::Position;
pub use source::{ByteSource, SliceSource};
#[cfg(feature = "std")]
pub use source::IoByteSource;
pub use value::{Custom, Entry, Table, Utf8String, Value};

use parser::Parser as InnerParser;

/// Knobs for a [`Parser`]. `#[non_exhaustive]` so new fields (e.g. a future
/// nesting-depth cap) don't break callers using struct-update syntax.
#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Size, in bytes, of the lexer's refill window. Default 8192, matching
    /// the original library's default.
    pub buffer_size: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            buffer_size: refill::DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Parses a PanCL document table by table.
///
/// Single-threaded and non-reentrant: a `Parser` is not `Sync`, and nothing
/// about it is meant to be called from more than one thread at a time. It
/// owns no background task — every call is synchronous, blocking only
/// inside the underlying [`ByteSource::next`].
pub struct Parser<S> {
    inner: InnerParser<S>,
}

impl<S: ByteSource> Parser<S> {
    #[must_use]
    pub fn new(source: S, options: ParseOptions) -> Self {
        Self {
            inner: InnerParser::new(source, options.buffer_size),
        }
    }

    /// Returns the next top-level table, or `Ok(None)` once the document is
    /// exhausted (the idiomatic stand-in for the original library's
    /// `EndOfInput` return code).
    pub fn get_next_table(&mut self) -> Result<Option<Table>, Error> {
        self.inner.get_next_table()
    }
}

impl<'a> Parser<SliceSource<'a>> {
    /// Parses an in-memory buffer that is already fully resident.
    #[must_use]
    pub fn from_slice(data: &'a [u8], options: ParseOptions) -> Self {
        Self::new(SliceSource::new(data), options)
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> Parser<IoByteSource<R>> {
    /// Parses from any [`std::io::Read`] (a file, a socket, ...).
    #[must_use]
    pub fn from_reader(reader: R, options: ParseOptions) -> Self {
        Self::new(IoByteSource::new(reader), options)
    }
}

/// An iterator over a document's tables, yielding an `Err` once and then
/// stopping (mirroring the original library's "an error leaves the
/// context unusable" contract).
pub struct Tables<S> {
    parser: Parser<S>,
    done: bool,
}

impl<S: ByteSource> Iterator for Tables<S> {
    type Item = Result<Table, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.parser.get_next_table() {
            Ok(Some(table)) => Some(Ok(table)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<S: ByteSource> Parser<S> {
    /// Consumes this parser as an iterator of tables.
    #[must_use]
    pub fn into_tables(self) -> Tables<S> {
        Tables {
            parser: self,
            done: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn iterator_stops_after_eof() {
        let parser = Parser::from_slice(b"a = 1\n", ParseOptions::default());
        let tables: vec::Vec<_> = parser.into_tables().collect();
        assert_eq!(tables.len(), 1);
        assert!(tables[0].is_ok());
    }

    #[test]
    fn iterator_stops_after_first_error() {
        let parser = Parser::from_slice(b"n = 007\n", ParseOptions::default());
        let tables: vec::Vec<_> = parser.into_tables().collect();
        assert_eq!(tables.len(), 1);
        assert!(tables[0].is_err());
    }
}
