use bytes::BytesMut;
use std::fmt::{self, Write};
use std::io;

use crate::common::codec::Encoder;
use crate::common::http_types::{HeaderBlock, ParseError, Result};
use crate::proto::h1::chunked::{encode_chunk, encode_last_chunk};
use crate::proto::h1::frame::{Frame, StartLine};

/// Writes parsed frames back onto the wire.
///
/// Body framing follows the `Header` frame's metadata, so a message's frames
/// must be encoded in the order the parser produced them.
#[derive(Debug, Default)]
pub struct MessageEncoder {
    chunked: bool,
    has_trailer: bool,
    awaiting_trailer: bool,
    /// Body bytes the current `Content-Length` still allows.
    remaining: usize,
}

impl MessageEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes a chunked message whose announced trailer never came.
    pub fn finish(&mut self, dst: &mut BytesMut) {
        if self.awaiting_trailer {
            dst.extend_from_slice(b"\r\n");
            self.awaiting_trailer = false;
        }
    }

    fn encode_start_line(&mut self, line: &StartLine, dst: &mut BytesMut) -> Result<()> {
        match line {
            StartLine::Request(line) => put(
                dst,
                format_args!("{} {} {}\r\n", line.method, line.target, line.version),
            ),
            StartLine::Status(line) => {
                put(
                    dst,
                    format_args!("{} {:03} {}\r\n", line.version, line.code, line.reason),
                )?;
                // An interim response has no frame for its (empty) header block.
                if line.is_continue() {
                    dst.extend_from_slice(b"\r\n");
                }
                Ok(())
            }
        }
    }

    fn encode_fields(&mut self, fields: &HeaderBlock, dst: &mut BytesMut) -> Result<()> {
        for (name, value) in fields {
            put(dst, format_args!("{}: {}\r\n", name.as_str(), value))?;
        }
        dst.extend_from_slice(b"\r\n");
        Ok(())
    }
}

impl Encoder<Frame> for MessageEncoder {
    type Error = ParseError;

    fn encode(&mut self, frame: Frame, dst: &mut BytesMut) -> Result<()> {
        match frame {
            Frame::StartLine(line) => self.encode_start_line(&line, dst)?,
            Frame::Header(header) => {
                self.chunked = header.metadata.is_chunked;
                self.has_trailer = header.metadata.has_trailer;
                self.remaining = header.metadata.content_length.unwrap_or(0);
                self.encode_fields(&header.headers, dst)?;
            }
            Frame::Data(data) if self.chunked => encode_chunk(&data, dst),
            Frame::Data(data) => {
                self.remaining = self
                    .remaining
                    .checked_sub(data.len())
                    .ok_or(ParseError::BodyLengthExceeded)?;
                dst.extend_from_slice(&data);
            }
            Frame::Eof if self.chunked => {
                encode_last_chunk(dst);
                if self.has_trailer {
                    self.awaiting_trailer = true;
                } else {
                    dst.extend_from_slice(b"\r\n");
                }
            }
            Frame::Eof => {}
            Frame::Trailer(trailers) => {
                if !self.awaiting_trailer {
                    return Err(ParseError::MalformedGrammar(
                        "trailer outside a chunked body",
                    ));
                }
                self.awaiting_trailer = false;
                self.encode_fields(&trailers, dst)?;
            }
            Frame::FullMessage(frames) => {
                for frame in frames {
                    self.encode(frame, dst)?;
                }
                self.finish(dst);
            }
        }
        Ok(())
    }
}

fn put(dst: &mut BytesMut, args: fmt::Arguments<'_>) -> Result<()> {
    dst.write_fmt(args)
        .map_err(|_| io::Error::new(io::ErrorKind::Other, "formatter error").into())
}
