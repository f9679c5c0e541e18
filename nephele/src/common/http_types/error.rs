use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

/// Fatal failures while framing an HTTP/1.x message.
///
/// None of these are recoverable for the connection: the parser does not
/// resynchronize, and the transport is expected to close the stream.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Start line, field line or chunk framing violates the grammar.
    #[error("malformed HTTP message: {0}")]
    MalformedGrammar(&'static str),

    /// Content-Length is not a decimal number, overflows `usize`, or is
    /// repeated with different values.
    #[error("invalid Content-Length header")]
    InvalidContentLength,

    /// More body bytes were written than `Content-Length` declares.
    #[error("body exceeds declared length")]
    BodyLengthExceeded,

    #[error("message head exceeds the configured length limit")]
    HeadTooLarge,

    #[error("too many header fields")]
    TooManyHeaders,

    #[error("both Transfer-Encoding: chunked and Content-Length are present")]
    ConflictingLength,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ParseError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, ParseError::MalformedGrammar(_))
    }
}
