//! Helpers shared by the integration tests.

#![allow(dead_code)]

use bytes::{Bytes, BytesMut};
use nephele_h1::{Frame, ParseOutcome, PendingBuf, Role, StreamHandler};

/// Installs a subscriber so `RUST_LOG=nephele_h1=trace` shows parser steps.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parses a message that is entirely present in one buffer.
pub fn parse_once<R: Role>(wire: &[u8]) -> Vec<Frame> {
    let mut handler = StreamHandler::<R>::new();
    let mut buf = BytesMut::from(wire);
    let frames = match handler.parse(&mut buf) {
        ParseOutcome::Ok(frames) => frames,
        other => panic!("one-shot parse failed: {:?}", other),
    };
    assert!(handler.is_finished(), "message did not finish in one call");
    assert!(buf.is_empty(), "{} bytes left over", buf.len());
    frames
}

/// Feeds `wire` into `buf` in pieces of the given sizes, cycling through
/// `sizes`, calling `parse` after every append.
pub fn parse_in_pieces<R: Role, B: PendingBuf>(
    mut buf: B,
    wire: &[u8],
    sizes: &[usize],
) -> Vec<Frame> {
    let mut handler = StreamHandler::<R>::new();
    let mut frames = Vec::new();
    let mut offset = 0;
    let mut sizes = sizes.iter().copied().cycle();

    while !handler.is_finished() {
        assert!(offset < wire.len(), "input exhausted before the message finished");
        let size = sizes.next().unwrap_or(1).max(1);
        let end = (offset + size).min(wire.len());
        let before = buf.len();
        buf.append(&wire[offset..end]);
        offset = end;

        let pending = buf.len();
        match handler.parse(&mut buf) {
            ParseOutcome::NeedMore => assert_eq!(buf.len(), pending),
            ParseOutcome::Ok(out) => frames.extend(out),
            ParseOutcome::Error(err) => {
                panic!("parse failed at offset {} ({} pending): {}", offset, before, err)
            }
        }
    }
    assert_eq!(offset, wire.len(), "message finished before the input ended");
    assert!(buf.is_empty());
    frames
}

pub fn parse_bytewise<R: Role>(wire: &[u8]) -> Vec<Frame> {
    parse_in_pieces::<R, _>(BytesMut::new(), wire, &[1])
}

/// Logical frame sequence: coalesced messages expanded and adjacent `Data`
/// frames joined, since a body may arrive in any number of reads.
pub fn normalize(frames: Vec<Frame>) -> Vec<Frame> {
    let mut out: Vec<Frame> = Vec::new();
    for frame in Frame::flatten(frames) {
        if let Frame::Data(data) = &frame {
            if let Some(Frame::Data(prev)) = out.last_mut() {
                let mut joined = BytesMut::from(&prev[..]);
                joined.extend_from_slice(data);
                *prev = joined.freeze();
                continue;
            }
        }
        out.push(frame);
    }
    out
}

pub fn body(frames: &[Frame]) -> Bytes {
    let mut body = BytesMut::new();
    for frame in frames {
        if let Frame::Data(data) = frame {
            body.extend_from_slice(data);
        }
    }
    body.freeze()
}
