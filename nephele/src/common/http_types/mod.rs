mod error;
mod version;

pub mod content;
pub mod headers;
pub mod trailers;

pub use error::{ParseError, Result};
pub use headers::{HeaderBlock, HeaderName, HeaderValue, HeaderValues};
pub use trailers::Trailers;
pub use version::Version;
