mod content_length;

pub use content_length::ContentLength;
