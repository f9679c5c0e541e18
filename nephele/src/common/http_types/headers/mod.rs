mod constants;
mod header_name;
mod header_value;
mod header_values;
mod headers;

pub use constants::*;
pub use header_name::HeaderName;
pub use header_value::HeaderValue;
pub use header_values::HeaderValues;
pub use headers::{HeaderBlock, Iter};
