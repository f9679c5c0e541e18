//! Incremental HTTP/1.x message framing for the nephele transports.
//!
//! The parser is sans-I/O: the transport owns the connection and a pending
//! byte buffer, appends every read to it and hands it to a
//! [`StreamHandler`]. The handler consumes only what it can fully validate
//! and yields [`Frame`]s in wire order.
//!
//! ```
//! use bytes::BytesMut;
//! use nephele_h1::{Frame, ParseOutcome, ServerStreamHandler};
//!
//! let mut handler = ServerStreamHandler::new();
//! let mut buf = BytesMut::from(&b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n"[..]);
//!
//! match handler.parse(&mut buf) {
//!     ParseOutcome::Ok(frames) => assert!(frames[0].is_full_message()),
//!     other => panic!("{:?}", other),
//! }
//! assert!(handler.is_finished());
//! ```

pub mod common;
pub mod proto;

pub use common::buffer::{PendingBuf, Segments};
pub use common::codec::{Decoder, Encoder};
pub use common::http_types::{
    HeaderBlock, HeaderName, HeaderValue, HeaderValues, ParseError, Result, Trailers, Version,
};
pub use proto::h1::{
    BodyMetadata, Client, ClientStreamHandler, Frame, Header, MessageEncoder, ParseOutcome,
    ParseState, ParserOptions, RequestLine, Role, Server, ServerStreamHandler, StartLine,
    StatusLine, StreamHandler,
};
