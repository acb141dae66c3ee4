//! Error types for georange.

use thiserror::Error;

/// Errors surfaced at the edges of the range planner.
///
/// The planning core itself is total; these come from input validation,
/// key decoding and configuration loading.
#[derive(Debug, Error)]
pub enum GeoRangeError {
    /// A coordinate, radius or other argument failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A precision outside the supported range (or odd when an even one is required).
    #[error("invalid precision: {bits} bits")]
    InvalidPrecision { bits: u32 },

    /// A tuple index that is still out of bounds after adjusting negative values.
    #[error("index {index} is out of range for a key with {len} elements")]
    IndexOutOfRange { index: isize, len: usize },

    /// The tuple element at `index` is not an integer.
    #[error("element {index} of the key is not an integer")]
    NotAnInteger { index: usize },

    /// The tuple element is an integer but cannot be represented as `u64`.
    #[error("integer {value} cannot be represented as an unsigned value")]
    IntegerOutOfRange { value: i64 },

    /// A stored key could not be decoded.
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// A base32 geohash string could not be converted.
    #[error("geohash error: {0}")]
    Geohash(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<geohash::GeohashError> for GeoRangeError {
    fn from(err: geohash::GeohashError) -> Self {
        GeoRangeError::Geohash(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeoRangeError>;
