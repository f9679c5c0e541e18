use indexmap::{map, IndexMap};
use std::fmt::{self, Debug};
use std::slice;

use crate::common::http_types::headers::{HeaderName, HeaderValue, HeaderValues};

/// An ordered, duplicate-preserving collection of header fields.
///
/// Names are compared case-insensitively. Every field line keeps its
/// arrival position, so iteration replays the block as it was received.
#[derive(Clone, Default)]
pub struct HeaderBlock {
    headers: IndexMap<HeaderName, HeaderValues>,
    /// `(name index, value index)` per field line, in arrival order.
    order: Vec<(usize, usize)>,
}

impl HeaderBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<HeaderName>, value: HeaderValue) {
        let name: HeaderName = name.into();
        let slot = match self.headers.get_full_mut(&name) {
            Some((index, _, values)) => {
                values.push(value);
                (index, values.len() - 1)
            }
            None => (self.headers.insert_full(name, HeaderValues::new(value)).0, 0),
        };
        self.order.push(slot);
    }

    /// Extends the most recently appended value with a folded line.
    /// Returns `false` when there is no field to continue.
    pub(crate) fn fold_into_last(&mut self, continuation: &str) -> bool {
        let (name, value) = match self.order.last() {
            Some(&slot) => slot,
            None => return false,
        };
        match self
            .headers
            .get_index_mut(name)
            .and_then(|(_, values)| values.inner.get_mut(value))
        {
            Some(value) => {
                value.fold(continuation);
                true
            }
            None => false,
        }
    }

    /// The first value received for `name`.
    pub fn get(&self, name: impl Into<HeaderName>) -> Option<&HeaderValue> {
        let name: HeaderName = name.into();
        self.headers.get(&name).and_then(HeaderValues::first)
    }

    /// Every value received for `name`, empty when the field is absent.
    pub fn get_all(&self, name: impl Into<HeaderName>) -> &[HeaderValue] {
        let name: HeaderName = name.into();
        self.headers
            .get(&name)
            .map(HeaderValues::as_slice)
            .unwrap_or(&[])
    }

    pub fn values(&self, name: impl Into<HeaderName>) -> Option<&HeaderValues> {
        let name: HeaderName = name.into();
        self.headers.get(&name)
    }

    pub fn contains(&self, name: impl Into<HeaderName>) -> bool {
        let name: HeaderName = name.into();
        self.headers.contains_key(&name)
    }

    /// Number of field lines, counting repeats.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Distinct names in first-seen order.
    pub fn names(&self) -> map::Keys<'_, HeaderName, HeaderValues> {
        self.headers.keys()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            headers: &self.headers,
            order: self.order.iter(),
        }
    }
}

/// Iterates `(name, value)` pairs in arrival order.
#[derive(Debug)]
pub struct Iter<'a> {
    headers: &'a IndexMap<HeaderName, HeaderValues>,
    order: slice::Iter<'a, (usize, usize)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a HeaderName, &'a HeaderValue);

    fn next(&mut self) -> Option<Self::Item> {
        let &(name, value) = self.order.next()?;
        let (name, values) = self.headers.get_index(name)?;
        Some((name, values.get(value)?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<'a> IntoIterator for &'a HeaderBlock {
    type Item = (&'a HeaderName, &'a HeaderValue);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Debug for HeaderBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Equal when both hold the same field lines in the same order.
impl PartialEq for HeaderBlock {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for HeaderBlock {}

impl AsRef<HeaderBlock> for HeaderBlock {
    fn as_ref(&self) -> &HeaderBlock {
        self
    }
}
