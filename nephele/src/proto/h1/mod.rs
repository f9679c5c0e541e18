#![forbid(unsafe_code)]

//! Incremental HTTP/1.0 and HTTP/1.1 message framing.
//!
//! A [`StreamHandler`] owns the parse state of exactly one in-flight message.
//! The transport appends every network read to its pending buffer and calls
//! [`StreamHandler::parse`]; the handler consumes whatever it can fully
//! validate and returns the frames it produced, in wire order.

const MAX_HEADERS: usize = 128;

const MAX_HEAD_LENGTH: usize = 8 * 1024;

const MAX_START_LINE_LENGTH: usize = 8 * 1024;

const MAX_CHUNK_LINE_LENGTH: usize = 4 * 1024;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Unwraps a `Status::Complete`, or returns `Ok(Status::Partial)` from the
/// enclosing function.
macro_rules! complete {
    ($expr:expr) => {
        match $expr {
            crate::proto::h1::status::Status::Complete(value) => value,
            crate::proto::h1::status::Status::Partial => {
                return Ok(crate::proto::h1::status::Status::Partial)
            }
        }
    };
}

mod chunked;
mod encode;
mod frame;
mod options;
mod parse;
mod status;
mod stream;

pub mod client;
pub mod server;

pub use client::{Client, ClientStreamHandler};
pub use encode::MessageEncoder;
pub use frame::{BodyMetadata, Frame, Header, RequestLine, StartLine, StatusLine};
pub use options::ParserOptions;
pub use server::{Server, ServerStreamHandler};
#[doc(hidden)]
pub use status::Status;
pub use stream::{ParseOutcome, ParseState, Role, StreamHandler};

/// `tchar` from RFC 7230 section 3.2.6.
pub(crate) fn is_token(b: u8) -> bool {
    matches!(
        b, b'a'..=b'z'
            | b'A'..=b'Z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'%'
            | b'&'
            | b'\''
            | b'*'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~'
    )
}

/// Visible characters, SP, HTAB and obs-text. Rejects NUL and other CTLs.
pub(crate) fn is_field_value_byte(b: u8) -> bool {
    matches!(b, b'\t' | 0x20..=0x7e | 0x80..=0xff)
}
