pub mod buffer;
pub mod codec;
pub mod http_types;
