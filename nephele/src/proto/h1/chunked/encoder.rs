use bytes::{BufMut, BytesMut};

/// Frames `data` as one chunk: `{size:X}\r\n{data}\r\n`.
///
/// Empty input is skipped, a zero-size chunk would end the body.
pub(crate) fn encode_chunk(data: &[u8], dst: &mut BytesMut) {
    if data.is_empty() {
        return;
    }
    let start = format!("{:X}\r\n", data.len());
    dst.reserve(start.len() + data.len() + 2);
    dst.put_slice(start.as_bytes());
    dst.put_slice(data);
    dst.put_slice(b"\r\n");
}

/// The zero-size chunk. The trailer section and final CRLF follow it.
pub(crate) fn encode_last_chunk(dst: &mut BytesMut) {
    dst.put_slice(b"0\r\n");
}
