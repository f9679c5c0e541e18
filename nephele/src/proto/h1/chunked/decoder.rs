use bytes::Bytes;
use std::mem;

use crate::common::buffer::PendingBuf;
use crate::common::http_types::{ParseError, Result};
use crate::proto::h1::status::Status;
use crate::proto::h1::{ParserOptions, CR, LF};

/// Hex digits that still fit in a `usize`.
const MAX_SIZE_DIGITS: usize = 2 * mem::size_of::<usize>();

/// One decoded unit of a chunked body.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Chunk {
    Data(Bytes),
    /// The zero-size chunk. Its line has been consumed; any trailer section
    /// and the final CRLF are left for the caller.
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkPhase {
    Size,
    Extension,
    Data,
    Crlf,
}

/// Decodes exactly one chunk from the front of `buf`.
///
/// The phase machine below is rebuilt from `Size` on every call and its
/// progress is discarded on `Partial`. That is sound only because `buf` is
/// not touched until the whole chunk, terminator included, is present; do not
/// carry `ChunkPhase` across calls without also tracking consumed bytes, or
/// the size line would be counted twice.
///
/// Returns the number of bytes the chunk occupied on the wire.
pub(crate) fn decode_chunk<B: PendingBuf>(
    buf: &mut B,
    opts: &ParserOptions,
) -> Result<Status<(usize, Chunk)>> {
    let mut phase = ChunkPhase::Size;
    let mut size: usize = 0;
    let mut digits = 0;
    let mut pos = 0;
    let mut data_start = 0;

    loop {
        match phase {
            ChunkPhase::Size => {
                let b = match buf.byte_at(pos) {
                    Some(b) => b,
                    None => return Ok(Status::Partial),
                };
                match hex_value(b) {
                    Some(value) => {
                        digits += 1;
                        if digits > MAX_SIZE_DIGITS {
                            return Err(ParseError::MalformedGrammar("chunk size overflows"));
                        }
                        size = (size << 4) | value;
                        pos += 1;
                    }
                    None if digits == 0 => {
                        return Err(ParseError::MalformedGrammar("invalid chunk size"));
                    }
                    None => phase = ChunkPhase::Extension,
                }
            }
            ChunkPhase::Extension => {
                let limit = opts.max_chunk_line_length();
                let lf = match buf.find_byte(LF, limit) {
                    Some(lf) => lf,
                    None if buf.len() >= limit => {
                        return Err(ParseError::MalformedGrammar("chunk size line too long"));
                    }
                    None => return Ok(Status::Partial),
                };
                pos = lf + 1;
                if size == 0 {
                    buf.skip(pos);
                    return Ok(Status::Complete((pos, Chunk::Last)));
                }
                data_start = pos;
                phase = ChunkPhase::Data;
            }
            ChunkPhase::Data => {
                pos = data_start
                    .checked_add(size)
                    .ok_or(ParseError::MalformedGrammar("chunk size overflows"))?;
                if buf.len() < pos {
                    return Ok(Status::Partial);
                }
                phase = ChunkPhase::Crlf;
            }
            ChunkPhase::Crlf => match buf.byte_at(pos) {
                Some(CR) => pos += 1,
                Some(LF) => {
                    pos += 1;
                    buf.skip(data_start);
                    let data = buf.cut(size);
                    buf.skip(pos - data_start - size);
                    return Ok(Status::Complete((pos, Chunk::Data(data))));
                }
                Some(_) => return Err(ParseError::MalformedGrammar("invalid chunk terminator")),
                None => return Ok(Status::Partial),
            },
        }
    }
}

fn hex_value(b: u8) -> Option<usize> {
    match b {
        b'0'..=b'9' => Some(usize::from(b - b'0')),
        b'a'..=b'f' => Some(usize::from(b - b'a' + 10)),
        b'A'..=b'F' => Some(usize::from(b - b'A' + 10)),
        _ => None,
    }
}
