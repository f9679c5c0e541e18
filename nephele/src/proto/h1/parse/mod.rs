//! Tokenizers for the textual parts of a message.
//!
//! Each one looks at a bounded prefix of the pending buffer and reports
//! either `Partial`, a grammar error, or the number of bytes the caller must
//! skip together with the parsed value. None of them consume anything.

mod headers;
mod start_line;

pub(crate) use headers::{parse_fields, parse_header_block, parse_trailer_block};
pub(crate) use start_line::{parse_request_line, parse_status_line};

use std::borrow::Cow;
use std::cmp;

use crate::common::buffer::PendingBuf;
use crate::proto::h1::{ParserOptions, CR, LF};

/// The bytes a field-block tokenizer needs when the block starts at `from`:
/// through its empty line if that is buffered, otherwise everything up to the
/// head limit.
pub(crate) fn block_window<'a, B: PendingBuf>(
    buf: &'a B,
    from: usize,
    opts: &ParserOptions,
) -> Cow<'a, [u8]> {
    let limit = cmp::min(buf.len(), from + opts.max_head_length());
    let end = block_end(buf, from, limit).unwrap_or(limit);
    buf.flatten(end)
}

/// Offset just past the empty line that ends the block starting at `from`.
fn block_end<B: PendingBuf>(buf: &B, from: usize, limit: usize) -> Option<usize> {
    let mut line = from;
    loop {
        let lf = buf.find_byte_from(LF, line, limit)?;
        if lf == line || (lf == line + 1 && buf.byte_at(line) == Some(CR)) {
            return Some(lf + 1);
        }
        line = lf + 1;
    }
}

/// Strips the line terminator (LF with an optional CR before it).
fn strip_eol(line: &[u8]) -> &[u8] {
    let line = match line.last() {
        Some(&LF) => &line[..line.len() - 1],
        _ => line,
    };
    match line.last() {
        Some(&CR) => &line[..line.len() - 1],
        _ => line,
    }
}

fn trim_ows(mut bytes: &[u8]) -> &[u8] {
    while let Some((&first, rest)) = bytes.split_first() {
        if first != b' ' && first != b'\t' {
            break;
        }
        bytes = rest;
    }
    while let Some((&last, rest)) = bytes.split_last() {
        if last != b' ' && last != b'\t' {
            break;
        }
        bytes = rest;
    }
    bytes
}
