//! Byte-buffer codec seams for transports built on `BytesMut`.

use bytes::BytesMut;
use std::io;

/// Turns bytes accumulated from a connection into protocol items.
///
/// `decode` returns `Ok(None)` when `src` holds a valid but incomplete
/// prefix. Bytes it does not consume stay in `src` for the next call.
pub trait Decoder {
    type Item;

    type Error: From<io::Error>;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error>;

    /// Called once the peer closed its side. Unconsumed bytes at that point
    /// can never become an item.
    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(item) = self.decode(buf)? {
            return Ok(Some(item));
        }
        if buf.is_empty() {
            return Ok(None);
        }
        Err(io::Error::new(io::ErrorKind::UnexpectedEof, "bytes remaining on stream").into())
    }
}

/// Serializes protocol items onto the back of an outgoing buffer.
pub trait Encoder<Item> {
    type Error: From<io::Error>;

    fn encode(&mut self, item: Item, dst: &mut BytesMut) -> Result<(), Self::Error>;
}
