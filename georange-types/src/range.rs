use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open interval `[min, max)` of full-precision geohash codes.
///
/// A single coarse geohash cell covers exactly one `HashRange` of the finer
/// codes it subsumes, so a radius query becomes a handful of these.
///
/// # Examples
///
/// ```
/// use georange_types::range::HashRange;
///
/// let a = HashRange::new(0, 16);
/// let b = HashRange::new(16, 32);
/// assert!(a.touches(&b));
/// assert_eq!(a.len(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HashRange {
    /// Inclusive lower bound.
    pub min: u64,
    /// Exclusive upper bound.
    pub max: u64,
}

impl HashRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Returns true if `code` lies in `[min, max)`.
    pub fn contains(&self, code: u64) -> bool {
        self.min <= code && code < self.max
    }

    /// Number of codes covered. Zero for empty or inverted ranges.
    pub fn len(&self) -> u64 {
        self.max.saturating_sub(self.min)
    }

    pub fn is_empty(&self) -> bool {
        self.min >= self.max
    }

    /// Returns true if the two ranges share at least one code or are directly
    /// adjacent (one ends where the other starts).
    pub fn touches(&self, other: &HashRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

impl fmt::Display for HashRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#018x}, {:#018x})", self.min, self.max)
    }
}

/// A `[begin, end)` pair of encoded store keys, ready to hand to a range scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyRange {
    pub begin: Bytes,
    pub end: Bytes,
}

impl KeyRange {
    pub fn new(begin: impl Into<Bytes>, end: impl Into<Bytes>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }

    /// Returns true if `key` sorts inside `[begin, end)`.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.begin.as_ref() <= key && key < self.end.as_ref()
    }
}
