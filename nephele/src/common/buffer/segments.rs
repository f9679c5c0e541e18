use bytes::{Buf, Bytes, BytesMut};
use std::borrow::Cow;
use std::collections::VecDeque;

use crate::common::buffer::PendingBuf;

/// A rope of reference-counted byte pieces, one per network read.
///
/// Appending never copies already buffered data and `cut` hands out
/// sub-ranges of the stored pieces whenever the range fits in one of them.
#[derive(Clone, Debug, Default)]
pub struct Segments {
    segments: VecDeque<Bytes>,
    len: usize,
}

impl Segments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a piece without copying it.
    pub fn push(&mut self, bytes: Bytes) {
        if bytes.is_empty() {
            return;
        }
        self.len += bytes.len();
        self.segments.push_back(bytes);
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn copy_prefix(&self, n: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(n);
        for segment in &self.segments {
            let want = n - out.len();
            if want == 0 {
                break;
            }
            let take = std::cmp::min(want, segment.len());
            out.extend_from_slice(&segment[..take]);
        }
        out
    }
}

impl From<Bytes> for Segments {
    fn from(bytes: Bytes) -> Self {
        let mut segments = Segments::new();
        segments.push(bytes);
        segments
    }
}

impl PendingBuf for Segments {
    fn len(&self) -> usize {
        self.len
    }

    fn skip(&mut self, mut n: usize) {
        assert!(n <= self.len, "skip({}) past end of {} buffered bytes", n, self.len);
        self.len -= n;
        while n > 0 {
            let front = match self.segments.front_mut() {
                Some(front) => front,
                None => break,
            };
            if front.len() <= n {
                n -= front.len();
                self.segments.pop_front();
            } else {
                front.advance(n);
                n = 0;
            }
        }
    }

    fn cut(&mut self, n: usize) -> Bytes {
        assert!(n <= self.len, "cut({}) past end of {} buffered bytes", n, self.len);
        match self.segments.front_mut() {
            Some(front) if front.len() > n => {
                self.len -= n;
                front.split_to(n)
            }
            Some(front) if front.len() == n => {
                self.len -= n;
                self.segments.pop_front().unwrap_or_default()
            }
            _ => {
                let mut out = BytesMut::with_capacity(n);
                out.extend_from_slice(&self.copy_prefix(n));
                self.skip(n);
                out.freeze()
            }
        }
    }

    fn flatten(&self, n: usize) -> Cow<'_, [u8]> {
        assert!(n <= self.len, "flatten({}) past end of {} buffered bytes", n, self.len);
        match self.segments.front() {
            Some(front) if front.len() >= n => Cow::Borrowed(&front[..n]),
            Some(_) => Cow::Owned(self.copy_prefix(n)),
            None => Cow::Borrowed(&[]),
        }
    }

    fn append(&mut self, bytes: &[u8]) {
        self.push(Bytes::copy_from_slice(bytes));
    }

    fn byte_at(&self, mut index: usize) -> Option<u8> {
        for segment in &self.segments {
            if index < segment.len() {
                return Some(segment[index]);
            }
            index -= segment.len();
        }
        None
    }

    fn find_byte_from(&self, byte: u8, from: usize, limit: usize) -> Option<usize> {
        let mut offset = 0;
        for segment in &self.segments {
            if offset >= limit {
                return None;
            }
            let next = offset + segment.len();
            if next > from {
                let start = from.saturating_sub(offset);
                let end = std::cmp::min(segment.len(), limit - offset);
                if start < end {
                    if let Some(pos) = memchr::memchr(byte, &segment[start..end]) {
                        return Some(offset + start + pos);
                    }
                }
            }
            offset = next;
        }
        None
    }
}
