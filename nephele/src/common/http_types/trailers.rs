use std::ops::{Deref, DerefMut};

use crate::common::http_types::headers::HeaderBlock;

/// Fields that follow the terminal chunk of a chunked body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trailers {
    headers: HeaderBlock,
}

impl Trailers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> HeaderBlock {
        self.headers
    }
}

impl From<HeaderBlock> for Trailers {
    fn from(headers: HeaderBlock) -> Self {
        Self { headers }
    }
}

impl Deref for Trailers {
    type Target = HeaderBlock;

    fn deref(&self) -> &Self::Target {
        &self.headers
    }
}

impl DerefMut for Trailers {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.headers
    }
}
