use bytes::Bytes;

use crate::common::http_types::{HeaderBlock, Trailers, Version};

/// `METHOD SP request-target SP HTTP-version`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub target: String,
    pub version: Version,
}

/// `HTTP-version SP status-code [SP reason-phrase]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    pub version: Version,
    pub code: u16,
    /// Empty when the peer sent no reason phrase.
    pub reason: String,
}

impl StatusLine {
    /// `100 Continue`, an interim response followed by the real one.
    pub fn is_continue(&self) -> bool {
        self.code == 100
    }

    pub fn is_informational(&self) -> bool {
        (100..200).contains(&self.code)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartLine {
    Request(RequestLine),
    Status(StatusLine),
}

impl StartLine {
    pub fn version(&self) -> Version {
        match self {
            StartLine::Request(line) => line.version,
            StartLine::Status(line) => line.version,
        }
    }
}

/// Framing facts derived from the header block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BodyMetadata {
    /// The final transfer coding is `chunked`.
    pub is_chunked: bool,
    pub content_length: Option<usize>,
    /// A `Trailer` field announced fields after the last chunk.
    pub has_trailer: bool,
}

impl BodyMetadata {
    pub fn has_body(&self) -> bool {
        self.is_chunked || self.content_length.map_or(false, |len| len > 0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub headers: HeaderBlock,
    pub metadata: BodyMetadata,
}

/// One unit of parser output.
///
/// A message always yields its frames in wire order:
/// `StartLine`, `Header`, `Data`*, `Eof`, `Trailer`?. `Eof` is omitted for
/// messages without a body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    StartLine(StartLine),
    Header(Header),
    Data(Bytes),
    Eof,
    Trailer(Trailers),
    /// A whole message resolved within a single parse call.
    FullMessage(Vec<Frame>),
}

impl Frame {
    /// Expands every `FullMessage` into the frames it carries.
    pub fn flatten(frames: Vec<Frame>) -> Vec<Frame> {
        let mut out = Vec::with_capacity(frames.len());
        for frame in frames {
            match frame {
                Frame::FullMessage(inner) => out.extend(Frame::flatten(inner)),
                frame => out.push(frame),
            }
        }
        out
    }

    pub fn is_full_message(&self) -> bool {
        matches!(self, Frame::FullMessage(_))
    }
}
