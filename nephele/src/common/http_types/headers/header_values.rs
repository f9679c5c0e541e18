use std::fmt::{self, Debug};
use std::ops::Index;
use std::slice::{self, SliceIndex};

use crate::common::http_types::headers::HeaderValue;

/// Every value received for one field name, in arrival order.
#[derive(Clone, PartialEq, Eq)]
pub struct HeaderValues {
    pub(crate) inner: Vec<HeaderValue>,
}

impl HeaderValues {
    pub(crate) fn new(value: HeaderValue) -> Self {
        Self { inner: vec![value] }
    }

    pub(crate) fn push(&mut self, value: HeaderValue) {
        self.inner.push(value);
    }

    pub fn get(&self, index: usize) -> Option<&HeaderValue> {
        self.inner.get(index)
    }

    pub fn first(&self) -> Option<&HeaderValue> {
        self.inner.first()
    }

    pub fn last(&self) -> Option<&HeaderValue> {
        self.inner.last()
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut HeaderValue> {
        self.inner.last_mut()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, HeaderValue> {
        self.inner.iter()
    }

    pub fn as_slice(&self) -> &[HeaderValue] {
        &self.inner
    }
}

impl<I: SliceIndex<[HeaderValue]>> Index<I> for HeaderValues {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(&self.inner, index)
    }
}

impl Debug for HeaderValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.len() == 1 {
            write!(f, "{:?}", self.inner[0])
        } else {
            f.debug_list().entries(self.inner.iter()).finish()
        }
    }
}

impl<'a> PartialEq<[&'a str]> for HeaderValues {
    fn eq(&self, other: &[&'a str]) -> bool {
        self.inner.iter().eq(other.iter())
    }
}

impl<'a> IntoIterator for &'a HeaderValues {
    type Item = &'a HeaderValue;
    type IntoIter = slice::Iter<'a, HeaderValue>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
