//! The refill buffer: a fixed-size window over the byte source that
//! retains a partial multi-byte codepoint across refills.
//!
//! Ported from `refill()` in `src/lexer/lex.c`. The only subtlety is the
//! retention case: when a caller needs `need` more bytes to finish
//! decoding a codepoint that straddles the end of the current window, the
//! unread tail is copied to the window's base before the rest is filled
//! from the source.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::Error;
use crate::source::ByteSource;

pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Outcome of a refill attempt that isn't an outright I/O error.
pub(crate) enum RefillSignal {
    /// The window holds at least as many bytes as were asked for.
    Ready,
    /// The source is exhausted and nothing more will ever arrive.
    EndOfInput,
    /// The source is exhausted but a `need > 0` request couldn't be
    /// satisfied: a partial codepoint straddled the end of input.
    Truncated,
}

pub struct RefillBuffer<S> {
    source: S,
    window: Vec<u8>,
    cursor: usize,
    end: usize,
    end_of_input: bool,
}

impl<S: ByteSource> RefillBuffer<S> {
    #[must_use]
    pub fn new(source: S, buffer_size: usize) -> Self {
        Self {
            source,
            window: vec![0u8; buffer_size.max(1)],
            cursor: 0,
            end: 0,
            end_of_input: false,
        }
    }

    /// The unread bytes currently resident in the window.
    pub fn available(&self) -> &[u8] {
        &self.window[self.cursor..self.end]
    }

    pub fn advance(&mut self, n: usize) {
        self.cursor += n;
    }

    /// Ensures at least `need` bytes (0 meaning "just try to have
    /// something") are available starting at the cursor, refilling and
    /// retaining the unread tail if not.
    pub(crate) fn ensure(&mut self, need: usize) -> Result<RefillSignal, Error> {
        let have_enough = if need == 0 {
            self.cursor < self.end
        } else {
            self.cursor + need <= self.end
        };
        if have_enough {
            return Ok(RefillSignal::Ready);
        }
        self.refill(need)
    }

    fn refill(&mut self, need: usize) -> Result<RefillSignal, Error> {
        if self.end_of_input {
            return Ok(if need != 0 {
                RefillSignal::Truncated
            } else {
                RefillSignal::EndOfInput
            });
        }

        let retained = if need != 0 {
            let tail_len = self.end - self.cursor;
            self.window.copy_within(self.cursor..self.end, 0);
            tail_len
        } else {
            0
        };

        let capacity = self.window.len();
        let fill_target = need.saturating_sub(retained);
        let fill_len = self.source.next(&mut self.window[retained..capacity])?;

        self.cursor = 0;
        self.end = retained + fill_len;

        if fill_len == 0 {
            self.end_of_input = true;
        }

        if fill_len < fill_target {
            // Still short after trying: only a real failure if the caller
            // had a specific byte count it needed.
            return Ok(if need != 0 {
                RefillSignal::Truncated
            } else {
                RefillSignal::EndOfInput
            });
        }

        #[cfg(any(test, feature = "fuzzing"))]
        assert!(
            self.cursor <= self.end && self.end <= self.window.len(),
            "internal error: refill buffer cursor/end out of bounds"
        );

        Ok(if self.end_of_input && self.end == self.cursor {
            RefillSignal::EndOfInput
        } else {
            RefillSignal::Ready
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SliceSource;

    #[test]
    fn reads_whole_buffer_backed_input() {
        let mut rb = RefillBuffer::new(SliceSource::new(b"hello"), 8192);
        assert!(matches!(rb.ensure(0), Ok(RefillSignal::Ready)));
        assert_eq!(rb.available(), b"hello");
    }

    #[test]
    fn signals_end_of_input_once_exhausted() {
        let mut rb = RefillBuffer::new(SliceSource::new(b""), 8192);
        assert!(matches!(rb.ensure(0), Ok(RefillSignal::EndOfInput)));
        assert!(matches!(rb.ensure(0), Ok(RefillSignal::EndOfInput)));
    }

    #[test]
    fn truncated_codepoint_past_small_window() {
        // "é" is 2 bytes; force a 1-byte window so the second byte needs a
        // refill that can never be satisfied once the source is empty.
        let mut rb = RefillBuffer::new(SliceSource::new("é".as_bytes()), 1);
        assert!(matches!(rb.ensure(0), Ok(RefillSignal::Ready)));
        rb.advance(1);
        assert!(matches!(rb.ensure(2), Ok(RefillSignal::Truncated)));
    }
}
