//! Key prefixes for geohash-keyed data.
//!
//! A subspace isolates one logical index inside a shared sorted keyspace by
//! prepending a fixed byte prefix to every key it produces.

use crate::error::{GeoRangeError, Result};
use crate::tuple::{self, TupleElement};
use bytes::{Bytes, BytesMut};
use georange_types::range::KeyRange;
use std::fmt;

/// A raw byte prefix under which geohash keys are stored.
///
/// The empty subspace (the default) produces bare tuple-encoded keys.
///
/// # Examples
///
/// ```rust
/// use georange::Subspace;
///
/// let places = Subspace::from_tuple(&["places".into()]);
/// let events = Subspace::from_tuple(&["events".into()]);
///
/// // Same code, different keys
/// assert_ne!(places.pack_u64(42), events.pack_u64(42));
/// assert!(places.owns_key(places.pack_u64(42)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Subspace {
    prefix: Bytes,
}

impl Subspace {
    /// The empty subspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `prefix` verbatim.
    pub fn from_bytes<B: Into<Bytes>>(prefix: B) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Use the packed form of `elements` as the prefix.
    pub fn from_tuple(elements: &[TupleElement]) -> Self {
        Self {
            prefix: tuple::pack(elements),
        }
    }

    /// Nested subspace with `element` appended to this prefix.
    pub fn sub<E: Into<TupleElement>>(&self, element: E) -> Self {
        Self {
            prefix: self.pack(&[element.into()]),
        }
    }

    pub fn prefix(&self) -> &Bytes {
        &self.prefix
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Prefix followed by the packed tuple.
    pub fn pack(&self, elements: &[TupleElement]) -> Bytes {
        let packed = tuple::pack(elements);
        let mut key = BytesMut::with_capacity(self.prefix.len() + packed.len());
        key.extend_from_slice(&self.prefix);
        key.extend_from_slice(&packed);
        key.freeze()
    }

    /// Prefix followed by a single packed unsigned integer. Order preserving
    /// in `value`.
    pub fn pack_u64(&self, value: u64) -> Bytes {
        let mut key = BytesMut::with_capacity(self.prefix.len() + 9);
        key.extend_from_slice(&self.prefix);
        tuple::pack_u64_into(&mut key, value);
        key.freeze()
    }

    /// Returns `true` if the key starts with this subspace's prefix.
    pub fn owns_key<K: AsRef<[u8]>>(&self, key: K) -> bool {
        key.as_ref().starts_with(&self.prefix)
    }

    /// The key without this subspace's prefix, or `None` if the key lies
    /// outside the subspace.
    pub fn strip_prefix<'a>(&self, key: &'a [u8]) -> Option<&'a [u8]> {
        key.strip_prefix(self.prefix.as_ref())
    }

    /// Unpack the tuple stored after the prefix.
    pub fn unpack(&self, key: &[u8]) -> Result<Vec<TupleElement>> {
        let rest = self.strip_prefix(key).ok_or_else(|| {
            GeoRangeError::MalformedKey(format!("key is outside subspace {}", self))
        })?;
        tuple::unpack(rest)
    }

    /// Range covering every tuple key packed in this subspace.
    pub fn range(&self) -> KeyRange {
        let mut begin = BytesMut::from(self.prefix.as_ref());
        begin.extend_from_slice(&[0x00]);
        let mut end = BytesMut::from(self.prefix.as_ref());
        end.extend_from_slice(&[0xff]);
        KeyRange::new(begin.freeze(), end.freeze())
    }
}

impl fmt::Display for Subspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b\"{}\"", self.prefix.escape_ascii())
    }
}
