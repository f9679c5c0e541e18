//! Any split of a well-formed message parses to the same logical frames.

use bytes::BytesMut;
use nephele_h1::{Client, Encoder, Frame, MessageEncoder, Segments, Server};
use proptest::prelude::*;

mod common;

#[derive(Clone, Debug)]
enum Framing {
    Length,
    Chunked {
        sizes: Vec<usize>,
        trailers: Vec<(String, String)>,
        /// Declares a `Trailer` header even when no trailer fields follow.
        announce: bool,
    },
}

#[derive(Clone, Debug)]
struct Message {
    fields: Vec<(String, String)>,
    body: Vec<u8>,
    framing: Framing,
}

impl Message {
    fn write_head_and_body(&self, wire: &mut Vec<u8>) {
        for (name, value) in &self.fields {
            wire.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }
        match &self.framing {
            Framing::Length => {
                wire.extend_from_slice(format!("Content-Length: {}\r\n\r\n", self.body.len()).as_bytes());
                wire.extend_from_slice(&self.body);
            }
            Framing::Chunked {
                sizes,
                trailers,
                announce,
            } => {
                wire.extend_from_slice(b"Transfer-Encoding: chunked\r\n");
                if !trailers.is_empty() {
                    let names: Vec<&str> = trailers.iter().map(|(name, _)| name.as_str()).collect();
                    wire.extend_from_slice(format!("Trailer: {}\r\n", names.join(", ")).as_bytes());
                } else if *announce {
                    wire.extend_from_slice(b"Trailer: x-checksum\r\n");
                }
                wire.extend_from_slice(b"\r\n");

                let mut rest = &self.body[..];
                let mut sizes = sizes.iter().copied().cycle();
                while !rest.is_empty() {
                    let size = sizes.next().unwrap_or(rest.len()).min(rest.len());
                    wire.extend_from_slice(format!("{:x}\r\n", size).as_bytes());
                    wire.extend_from_slice(&rest[..size]);
                    wire.extend_from_slice(b"\r\n");
                    rest = &rest[size..];
                }
                wire.extend_from_slice(b"0\r\n");
                for (name, value) in trailers {
                    wire.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
                }
                wire.extend_from_slice(b"\r\n");
            }
        }
    }
}

fn field() -> impl Strategy<Value = (String, String)> {
    ("x-[a-z0-9-]{1,10}", "[!-~]([ -~]{0,16}[!-~])?")
}

fn message() -> impl Strategy<Value = Message> {
    let framing = prop_oneof![
        Just(Framing::Length),
        (
            proptest::collection::vec(1..48usize, 1..6),
            proptest::collection::vec(field(), 0..3),
            any::<bool>()
        )
            .prop_map(|(sizes, trailers, announce)| Framing::Chunked {
                sizes,
                trailers,
                announce
            }),
    ];
    (
        proptest::collection::vec(field(), 0..6),
        proptest::collection::vec(any::<u8>(), 0..256),
        framing,
    )
        .prop_map(|(fields, body, framing)| Message {
            fields,
            body,
            framing,
        })
}

fn request() -> impl Strategy<Value = Vec<u8>> {
    (
        prop_oneof![Just("GET"), Just("POST"), Just("PUT"), Just("PATCH")],
        "/[a-z0-9/._-]{0,24}",
        prop_oneof![Just("HTTP/1.0"), Just("HTTP/1.1")],
        message(),
    )
        .prop_map(|(method, target, version, message)| {
            let mut wire = format!("{} {} {}\r\n", method, target, version).into_bytes();
            message.write_head_and_body(&mut wire);
            wire
        })
}

fn response() -> impl Strategy<Value = Vec<u8>> {
    (any::<bool>(), 200..600u16, "[A-Za-z ]{0,16}", message()).prop_map(
        |(interim, code, reason, message)| {
            let mut wire = Vec::new();
            if interim {
                wire.extend_from_slice(b"HTTP/1.1 100 Continue\r\n\r\n");
            }
            wire.extend_from_slice(format!("HTTP/1.1 {} {}\r\n", code, reason).as_bytes());
            message.write_head_and_body(&mut wire);
            wire
        },
    )
}

fn piece_sizes() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(1..32usize, 1..16)
}

fn encode(frames: Vec<Frame>) -> Vec<u8> {
    let mut encoder = MessageEncoder::new();
    let mut dst = BytesMut::new();
    for frame in frames {
        encoder.encode(frame, &mut dst).unwrap();
    }
    encoder.finish(&mut dst);
    dst.to_vec()
}

proptest! {
    #[test]
    fn requests_parse_the_same_in_any_split(wire in request(), sizes in piece_sizes()) {
        common::init_tracing();

        let once = common::normalize(common::parse_once::<Server>(&wire));
        let bytewise = common::normalize(common::parse_bytewise::<Server>(&wire));
        let pieces = common::normalize(common::parse_in_pieces::<Server, _>(Segments::new(), &wire, &sizes));

        prop_assert_eq!(&once, &bytewise);
        prop_assert_eq!(&once, &pieces);
    }

    #[test]
    fn responses_parse_the_same_in_any_split(wire in response(), sizes in piece_sizes()) {
        let once = common::normalize(common::parse_once::<Client>(&wire));
        let bytewise = common::normalize(common::parse_bytewise::<Client>(&wire));
        let pieces = common::normalize(common::parse_in_pieces::<Client, _>(BytesMut::new(), &wire, &sizes));

        prop_assert_eq!(&once, &bytewise);
        prop_assert_eq!(&once, &pieces);
    }

    #[test]
    fn encoded_frames_parse_back_to_themselves(wire in request()) {
        let frames = common::parse_once::<Server>(&wire);
        let encoded = encode(frames.clone());

        prop_assert_eq!(
            common::normalize(common::parse_once::<Server>(&encoded)),
            common::normalize(frames)
        );
    }
}
