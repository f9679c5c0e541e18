mod decoder;
mod encoder;

pub(crate) use decoder::{decode_chunk, Chunk};
pub(crate) use encoder::{encode_chunk, encode_last_chunk};
