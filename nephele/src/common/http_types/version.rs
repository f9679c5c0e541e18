use std::fmt::{self, Display};

/// The HTTP/1.x protocol versions a start line may carry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Version {
    Http1_0,
    Http1_1,
}

impl Version {
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Http1_0 => "HTTP/1.0",
            Version::Http1_1 => "HTTP/1.1",
        }
    }

    pub(crate) fn from_minor(minor: u8) -> Option<Self> {
        match minor {
            b'0' => Some(Version::Http1_0),
            b'1' => Some(Version::Http1_1),
            _ => None,
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
