use crate::common::http_types::headers::{HeaderName, HeaderValue, CONTENT_LENGTH};
use crate::common::http_types::{ParseError, Result};

/// A decoded `Content-Length` field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLength {
    length: usize,
}

#[allow(clippy::len_without_is_empty)]
impl ContentLength {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Parses a non-negative decimal length. Anything other than ASCII
    /// digits, or a value that does not fit in `usize`, is rejected instead
    /// of being truncated.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ParseError::InvalidContentLength);
        }

        let mut length: usize = 0;
        for b in value.bytes() {
            if !b.is_ascii_digit() {
                return Err(ParseError::InvalidContentLength);
            }
            length = length
                .checked_mul(10)
                .and_then(|l| l.checked_add(usize::from(b - b'0')))
                .ok_or(ParseError::InvalidContentLength)?;
        }
        Ok(Self { length })
    }

    pub fn name(&self) -> HeaderName {
        CONTENT_LENGTH
    }

    pub fn value(&self) -> HeaderValue {
        HeaderValue::from_string(self.length.to_string())
    }

    pub fn len(&self) -> usize {
        self.length
    }
}
