use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use crate::common::http_types::ParseError;

/// A field value with surrounding whitespace already trimmed.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct HeaderValue {
    inner: String,
}

impl HeaderValue {
    pub(crate) fn from_string(inner: String) -> Self {
        Self { inner }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Appends an obs-fold continuation, joined with a single space.
    pub(crate) fn fold(&mut self, continuation: &str) {
        if continuation.is_empty() {
            return;
        }
        if !self.inner.is_empty() {
            self.inner.push(' ');
        }
        self.inner.push_str(continuation);
    }
}

impl FromStr for HeaderValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.bytes().all(crate::proto::h1::is_field_value_byte) {
            return Err(ParseError::MalformedGrammar("invalid header value"));
        }
        Ok(Self {
            inner: s.trim().to_owned(),
        })
    }
}

impl Debug for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.inner)
    }
}

impl Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl PartialEq<str> for HeaderValue {
    fn eq(&self, other: &str) -> bool {
        self.inner == other
    }
}

impl<'a> PartialEq<&'a str> for HeaderValue {
    fn eq(&self, other: &&'a str) -> bool {
        &self.inner == other
    }
}

impl PartialEq<String> for HeaderValue {
    fn eq(&self, other: &String) -> bool {
        &self.inner == other
    }
}
