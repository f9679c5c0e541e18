use std::borrow::Cow;
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use crate::common::http_types::ParseError;

/// A field name, stored lowercased so lookups are case-insensitive.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HeaderName(Cow<'static, str>);

impl HeaderName {
    /// Builds a name from bytes the tokenizer already checked are token
    /// characters.
    pub(crate) fn from_token(token: &[u8]) -> Self {
        let name: String = token
            .iter()
            .map(|b| char::from(b.to_ascii_lowercase()))
            .collect();
        HeaderName(Cow::Owned(name))
    }

    pub fn as_str(&self) -> &'_ str {
        &self.0
    }

    pub(crate) const fn from_lowercase_str(str: &'static str) -> Self {
        HeaderName(Cow::Borrowed(str))
    }
}

impl Debug for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HeaderName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(crate::proto::h1::is_token) {
            return Err(ParseError::MalformedGrammar("invalid header name"));
        }
        Ok(HeaderName::from_token(s.as_bytes()))
    }
}

impl From<&HeaderName> for HeaderName {
    fn from(value: &HeaderName) -> HeaderName {
        value.clone()
    }
}

impl<'a> From<&'a str> for HeaderName {
    fn from(value: &'a str) -> Self {
        HeaderName(Cow::Owned(value.to_ascii_lowercase()))
    }
}

impl PartialEq<str> for HeaderName {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl<'a> PartialEq<&'a str> for HeaderName {
    fn eq(&self, other: &&'a str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}
