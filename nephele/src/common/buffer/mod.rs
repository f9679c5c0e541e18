//! The pending-bytes buffer a transport fills and a parser drains.
//!
//! Parsers only ever look at a bounded prefix of the buffer. They never
//! consume bytes they have not fully validated, so a partial parse leaves
//! the buffer exactly as it was.

use bytes::{Buf, Bytes, BytesMut};
use std::borrow::Cow;
use std::cmp;

mod segments;

pub use segments::Segments;

/// A byte sequence that can be appended at the back and drained from the
/// front, possibly stored in several non-contiguous pieces.
pub trait PendingBuf {
    /// Total number of buffered bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops the first `n` bytes. Panics if `n > self.len()`.
    fn skip(&mut self, n: usize);

    /// Detaches the first `n` bytes as an owned range. Panics if
    /// `n > self.len()`.
    fn cut(&mut self, n: usize) -> Bytes;

    /// Returns the first `n` bytes as one contiguous slice, copying only
    /// when they straddle storage pieces. Panics if `n > self.len()`.
    fn flatten(&self, n: usize) -> Cow<'_, [u8]>;

    fn append(&mut self, bytes: &[u8]);

    fn byte_at(&self, index: usize) -> Option<u8>;

    /// Position of the first `byte` among the first `limit` bytes.
    fn find_byte(&self, byte: u8, limit: usize) -> Option<usize> {
        self.find_byte_from(byte, 0, limit)
    }

    /// Position of the first `byte` in `from..limit`.
    fn find_byte_from(&self, byte: u8, from: usize, limit: usize) -> Option<usize> {
        let end = cmp::min(limit, self.len());
        (from..end).find(|&i| self.byte_at(i) == Some(byte))
    }
}

impl PendingBuf for BytesMut {
    fn len(&self) -> usize {
        BytesMut::len(self)
    }

    fn skip(&mut self, n: usize) {
        self.advance(n);
    }

    fn cut(&mut self, n: usize) -> Bytes {
        self.split_to(n).freeze()
    }

    fn flatten(&self, n: usize) -> Cow<'_, [u8]> {
        Cow::Borrowed(&self[..n])
    }

    fn append(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    fn byte_at(&self, index: usize) -> Option<u8> {
        self[..].get(index).copied()
    }

    fn find_byte_from(&self, byte: u8, from: usize, limit: usize) -> Option<usize> {
        let end = cmp::min(limit, BytesMut::len(self));
        if from >= end {
            return None;
        }
        memchr::memchr(byte, &self[from..end]).map(|pos| from + pos)
    }
}
