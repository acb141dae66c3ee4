//! Sorted key-value storage abstraction
//!
//! Radius queries only need a store that can scan a `[begin, end)` key range
//! in order. This module defines that contract, an in-memory implementation
//! backed by a `BTreeMap`, and [`radial_scan`] which runs a planned query
//! against any such store.

use crate::codec::{KeyEncoder, SpatialCodec};
use crate::error::Result;
use crate::radial::RadialRange;
use bytes::Bytes;
use georange_types::range::KeyRange;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, Ordering};

/// Trait for ordered key-value stores that support range scans.
pub trait RangeStore {
    /// Insert or update a key-value pair
    fn put(&mut self, key: &[u8], value: Bytes) -> Result<()>;

    /// Get a value by key
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>>;

    /// Delete a key and return the old value if it existed
    fn delete(&mut self, key: &[u8]) -> Result<Option<Bytes>>;

    /// All pairs with `range.begin <= key < range.end`, in key order
    fn scan_range(&self, range: &KeyRange) -> Result<Vec<(Bytes, Bytes)>>;

    /// Get the total number of keys
    fn len(&self) -> Result<usize>;

    /// Check if the store is empty
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Store statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Total number of keys
    pub key_count: usize,
    /// Number of range scans served
    pub scans: u64,
    /// Number of pairs returned by those scans
    pub scanned_pairs: u64,
}

/// In-memory store using BTreeMap
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: BTreeMap<Bytes, Bytes>,
    scans: AtomicU64,
    scanned_pairs: AtomicU64,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            key_count: self.data.len(),
            scans: self.scans.load(Ordering::Relaxed),
            scanned_pairs: self.scanned_pairs.load(Ordering::Relaxed),
        }
    }
}

impl RangeStore for MemoryStore {
    fn put(&mut self, key: &[u8], value: Bytes) -> Result<()> {
        self.data.insert(Bytes::copy_from_slice(key), value);
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
        Ok(self.data.get(key).cloned())
    }

    fn delete(&mut self, key: &[u8]) -> Result<Option<Bytes>> {
        Ok(self.data.remove(key))
    }

    fn scan_range(&self, range: &KeyRange) -> Result<Vec<(Bytes, Bytes)>> {
        self.scans.fetch_add(1, Ordering::Relaxed);
        if range.begin >= range.end {
            return Ok(Vec::new());
        }

        let bounds: (Bound<&[u8]>, Bound<&[u8]>) = (
            Bound::Included(range.begin.as_ref()),
            Bound::Excluded(range.end.as_ref()),
        );
        let pairs: Vec<(Bytes, Bytes)> = self
            .data
            .range::<[u8], _>(bounds)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        self.scanned_pairs
            .fetch_add(pairs.len() as u64, Ordering::Relaxed);
        Ok(pairs)
    }

    fn len(&self) -> Result<usize> {
        Ok(self.data.len())
    }
}

/// Scan every key range of `query` and keep the pairs whose key decodes to a
/// point strictly inside the radius.
///
/// Results come back in key order.
///
/// # Errors
///
/// Propagates store errors and fails on keys inside a scanned range that do
/// not decode as cell codes.
pub fn radial_scan<S, C, K>(store: &S, query: &RadialRange<C, K>) -> Result<Vec<(Bytes, Bytes)>>
where
    S: RangeStore + ?Sized,
    C: SpatialCodec,
    K: KeyEncoder,
{
    let mut hits = Vec::new();
    let mut candidates = 0usize;

    for range in query.key_ranges() {
        for (key, value) in store.scan_range(&range)? {
            candidates += 1;
            if query.contains_key(&key)? {
                hits.push((key, value));
            }
        }
    }

    log::debug!(
        "radial scan kept {} of {} candidates",
        hits.len(),
        candidates
    );
    Ok(hits)
}
