use bytes::BytesMut;
use std::cmp;
use std::io;
use std::marker::PhantomData;

use crate::common::buffer::PendingBuf;
use crate::common::codec::Decoder;
use crate::common::http_types::{ParseError, Result};
use crate::proto::h1::chunked::{decode_chunk, Chunk};
use crate::proto::h1::frame::{BodyMetadata, Frame, Header, StartLine};
use crate::proto::h1::parse::{
    block_window, parse_fields, parse_header_block, parse_trailer_block,
};
use crate::proto::h1::status::Status;
use crate::proto::h1::{ParserOptions, CR, LF};

mod sealed {
    pub trait Sealed {}

    impl Sealed for crate::proto::h1::Client {}
    impl Sealed for crate::proto::h1::Server {}
}

/// Which side of the connection a handler parses for.
///
/// The two roles share every step except the grammar of the start line and
/// whether a start line is an interim response.
pub trait Role: sealed::Sealed {
    const NAME: &'static str;

    #[doc(hidden)]
    fn parse_start_line<B: PendingBuf>(
        buf: &B,
        opts: &ParserOptions,
    ) -> Result<Status<(usize, StartLine)>>;

    /// Interim start lines are reported but do not begin the message.
    fn is_interim(_line: &StartLine) -> bool {
        false
    }
}

/// Where a message is in its lifecycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParseState {
    Idle,
    AfterStartLine,
    AfterHeader,
    /// The terminal chunk was decoded; only the trailer section is left.
    AfterData,
    Finish,
}

/// Result of one [`StreamHandler::parse`] call.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Nothing could be consumed; the buffer is unchanged.
    NeedMore,
    /// Fatal for the connection.
    Error(ParseError),
    /// Frames produced by this call, in wire order.
    Ok(Vec<Frame>),
}

impl ParseOutcome {
    pub fn is_need_more(&self) -> bool {
        matches!(self, ParseOutcome::NeedMore)
    }

    pub fn into_result(self) -> Result<Option<Vec<Frame>>> {
        match self {
            ParseOutcome::NeedMore => Ok(None),
            ParseOutcome::Error(err) => Err(err),
            ParseOutcome::Ok(frames) => Ok(Some(frames)),
        }
    }
}

/// Parse state of the single message in flight on a connection.
///
/// One handler frames exactly one message. Once it reports
/// [`ParseState::Finish`] the transport must create a new handler for the
/// next message.
#[derive(Debug)]
pub struct StreamHandler<R> {
    state: ParseState,
    opts: ParserOptions,
    metadata: Option<BodyMetadata>,
    remaining: usize,
    _role: PhantomData<R>,
}

impl<R: Role> Default for StreamHandler<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Role> StreamHandler<R> {
    pub fn new() -> Self {
        Self {
            state: ParseState::Idle,
            opts: ParserOptions::default(),
            metadata: None,
            remaining: 0,
            _role: PhantomData,
        }
    }

    pub fn with_opts(mut self, opts: ParserOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == ParseState::Finish
    }

    /// Body framing of the current message, once its header block is parsed.
    pub fn metadata(&self) -> Option<&BodyMetadata> {
        self.metadata.as_ref()
    }

    /// Consumes as much of `buf` as can be fully validated.
    ///
    /// When the whole message resolves within this call the frames are
    /// coalesced into one [`Frame::FullMessage`].
    ///
    /// # Panics
    ///
    /// Panics if the handler already reached [`ParseState::Finish`].
    pub fn parse<B: PendingBuf>(&mut self, buf: &mut B) -> ParseOutcome {
        assert!(
            self.state != ParseState::Finish,
            "{} stream handler parsed past the end of its message",
            R::NAME
        );

        let started_idle = self.state == ParseState::Idle;
        let mut frames = Vec::new();

        if let Err(err) = self.drive(buf, &mut frames) {
            tracing::debug!(role = R::NAME, state = ?self.state, error = %err, "h1 parse error");
            return ParseOutcome::Error(err);
        }

        let left_idle = started_idle && self.state != ParseState::Idle;
        let finished = self.state == ParseState::Finish;

        if left_idle && finished {
            tracing::trace!(role = R::NAME, frames = frames.len(), "coalesced full message");
            ParseOutcome::Ok(vec![Frame::FullMessage(frames)])
        } else if frames.is_empty() && !finished {
            ParseOutcome::NeedMore
        } else {
            ParseOutcome::Ok(frames)
        }
    }

    fn drive<B: PendingBuf>(&mut self, buf: &mut B, frames: &mut Vec<Frame>) -> Result<()> {
        loop {
            tracing::trace!(role = R::NAME, state = ?self.state, pending = buf.len(), "h1 step");
            let step = match self.state {
                ParseState::Idle => self.parse_start(buf, frames)?,
                ParseState::AfterStartLine => self.parse_header(buf, frames)?,
                ParseState::AfterHeader => self.parse_body(buf, frames)?,
                ParseState::AfterData => self.parse_trailer(buf, frames)?,
                ParseState::Finish => return Ok(()),
            };
            if step.is_partial() {
                return Ok(());
            }
        }
    }

    fn parse_start<B: PendingBuf>(
        &mut self,
        buf: &mut B,
        frames: &mut Vec<Frame>,
    ) -> Result<Status<()>> {
        let (used, line) = complete!(R::parse_start_line(buf, &self.opts)?);

        if R::is_interim(&line) {
            // The interim line and its header block go together, so a
            // partial block leaves the line in the buffer as well.
            let interim = {
                let window = block_window(buf, used, &self.opts);
                parse_fields(&window[used..], &self.opts)?
            };
            let (fields_used, _) = complete!(interim);
            buf.skip(used + fields_used);
            tracing::trace!(role = R::NAME, ?line, "interim start line");
            frames.push(Frame::StartLine(line));
            return Ok(Status::Complete(()));
        }

        buf.skip(used);
        frames.push(Frame::StartLine(line));
        self.state = ParseState::AfterStartLine;
        Ok(Status::Complete(()))
    }

    fn parse_header<B: PendingBuf>(
        &mut self,
        buf: &mut B,
        frames: &mut Vec<Frame>,
    ) -> Result<Status<()>> {
        let parsed = {
            let window = block_window(buf, 0, &self.opts);
            parse_header_block(&window, &self.opts)?
        };
        let (used, headers, metadata) = complete!(parsed);
        buf.skip(used);

        self.state = if !metadata.has_body() {
            ParseState::Finish
        } else {
            if !metadata.is_chunked {
                self.remaining = metadata.content_length.unwrap_or(0);
            }
            ParseState::AfterHeader
        };
        tracing::trace!(role = R::NAME, ?metadata, next = ?self.state, "parsed header block");

        self.metadata = Some(metadata);
        frames.push(Frame::Header(Header { headers, metadata }));
        Ok(Status::Complete(()))
    }

    fn parse_body<B: PendingBuf>(
        &mut self,
        buf: &mut B,
        frames: &mut Vec<Frame>,
    ) -> Result<Status<()>> {
        let is_chunked = self.metadata.map_or(false, |metadata| metadata.is_chunked);
        if is_chunked {
            match complete!(decode_chunk(buf, &self.opts)?) {
                (_, Chunk::Data(data)) => frames.push(Frame::Data(data)),
                (_, Chunk::Last) => {
                    frames.push(Frame::Eof);
                    self.state = ParseState::AfterData;
                }
            }
            return Ok(Status::Complete(()));
        }

        if buf.is_empty() {
            return Ok(Status::Partial);
        }
        let take = cmp::min(buf.len(), self.remaining);
        frames.push(Frame::Data(buf.cut(take)));
        self.remaining -= take;

        // Bytes past the declared length stay buffered for the next message.
        if self.remaining == 0 {
            frames.push(Frame::Eof);
            self.state = ParseState::Finish;
        }
        Ok(Status::Complete(()))
    }

    fn parse_trailer<B: PendingBuf>(
        &mut self,
        buf: &mut B,
        frames: &mut Vec<Frame>,
    ) -> Result<Status<()>> {
        let has_trailer = self.metadata.map_or(false, |metadata| metadata.has_trailer);
        if !has_trailer {
            const TERMINATOR: [u8; 2] = [CR, LF];
            for (i, &expected) in TERMINATOR.iter().enumerate() {
                match buf.byte_at(i) {
                    Some(b) if b == expected => {}
                    Some(_) => {
                        return Err(ParseError::MalformedGrammar(
                            "missing CRLF after the last chunk",
                        ));
                    }
                    None => return Ok(Status::Partial),
                }
            }
            buf.skip(TERMINATOR.len());
            self.state = ParseState::Finish;
            return Ok(Status::Complete(()));
        }

        let parsed = {
            let window = block_window(buf, 0, &self.opts);
            parse_trailer_block(&window, &self.opts)?
        };
        let (used, trailers) = complete!(parsed);
        buf.skip(used);
        if !trailers.is_empty() {
            frames.push(Frame::Trailer(trailers));
        }
        self.state = ParseState::Finish;
        Ok(Status::Complete(()))
    }
}

impl<R: Role> Decoder for StreamHandler<R> {
    type Item = Vec<Frame>;
    type Error = ParseError;

    /// A finished handler yields nothing more; its leftover bytes belong to
    /// whoever owns the buffer next.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Vec<Frame>>> {
        if self.is_finished() {
            return Ok(None);
        }
        self.parse(src).into_result()
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Vec<Frame>>> {
        match self.decode(buf)? {
            Some(frames) => Ok(Some(frames)),
            None if self.is_finished() => Ok(None),
            None if self.state == ParseState::Idle && buf.is_empty() => Ok(None),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "bytes remaining on stream",
            )
            .into()),
        }
    }
}
