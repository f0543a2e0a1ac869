//! The byte source capability: a resumable provider of successive byte
//! chunks, signalling end-of-input by returning `Ok(0)`. How the source is
//! materialised (a file, a socket, an in-memory buffer) is outside the
//! core's concern — this trait is the entire contract.

use crate::error::Error;

/// Supplies successive chunks of the document being parsed.
///
/// `next` fills as much of `out` as it can and returns how many bytes it
/// actually wrote. Returning `Ok(0)` signals end-of-input; all subsequent
/// calls are expected to keep returning `Ok(0)`.
pub trait ByteSource {
    fn next(&mut self, out: &mut [u8]) -> Result<usize, Error>;
}

/// A fixed in-memory buffer: the whole document is already resident, so
/// refills past the end of the slice simply report end-of-input.
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    fn next(&mut self, out: &mut [u8]) -> Result<usize, Error> {
        let remaining = &self.data[self.pos..];
        let n = remaining.len().min(out.len());
        out[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}

impl ByteSource for &[u8] {
    fn next(&mut self, out: &mut [u8]) -> Result<usize, Error> {
        let n = self.len().min(out.len());
        out[..n].copy_from_slice(&self[..n]);
        *self = &self[n..];
        Ok(n)
    }
}

#[cfg(feature = "std")]
mod io {
    use super::ByteSource;
    use crate::error::Error;

    /// Adapts any [`std::io::Read`] into a [`ByteSource`]. This is a
    /// convenience wrapper over Rust's own `Read` trait, not the
    /// `FILE*`-specific C adapter spec.md keeps out of the core's scope.
    pub struct IoByteSource<R> {
        reader: R,
    }

    impl<R: std::io::Read> IoByteSource<R> {
        pub fn new(reader: R) -> Self {
            Self { reader }
        }
    }

    impl<R: std::io::Read> ByteSource for IoByteSource<R> {
        fn next(&mut self, out: &mut [u8]) -> Result<usize, Error> {
            let mut filled = 0;
            while filled < out.len() {
                match self.reader.read(&mut out[filled..]) {
                    Ok(0) => break,
                    Ok(n) => filled += n,
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(_) => return Err(Error::LexerRefill(crate::position::Position::origin())),
                }
            }
            Ok(filled)
        }
    }
}

#[cfg(feature = "std")]
pub use io::IoByteSource;
