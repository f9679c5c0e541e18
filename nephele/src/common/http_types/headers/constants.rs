use super::HeaderName;

pub const CONNECTION: HeaderName = HeaderName::from_lowercase_str("connection");
pub const CONTENT_LENGTH: HeaderName = HeaderName::from_lowercase_str("content-length");
pub const HOST: HeaderName = HeaderName::from_lowercase_str("host");
pub const TRAILER: HeaderName = HeaderName::from_lowercase_str("trailer");
pub const TRANSFER_ENCODING: HeaderName = HeaderName::from_lowercase_str("transfer-encoding");
