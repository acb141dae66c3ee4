//! Pluggable spatial and key codecs.
//!
//! The range planner never touches bit layouts or key bytes directly. It goes
//! through [`SpatialCodec`] for geohash cells and [`KeyEncoder`] for store
//! keys, so a different interleaving scheme or a different store encoding can
//! be dropped in without changing the planner.

pub mod geohash_int;
pub mod key;

pub use geohash_int::IntGeohash;
pub use key::TupleKeyEncoder;

use crate::error::Result;
use crate::subspace::Subspace;
use bytes::Bytes;
use geo::Point;
use georange_types::cell::{CellBounds, CellNeighbors};

/// Highest precision a `u64` cell code can carry.
pub const MAX_BITS: u32 = 64;

/// Integer geohash operations at an explicit bit precision.
///
/// Points follow the `geo` convention: x is longitude, y is latitude.
pub trait SpatialCodec: Send + Sync {
    /// Encode a point as a cell code with `bits` bits of precision.
    fn encode(&self, point: &Point, bits: u32) -> u64;

    /// Bounding box of the cell `code` at `bits` bits of precision.
    fn decode_bbox(&self, code: u64, bits: u32) -> CellBounds;

    /// Approximate point for `code`: the centre of its cell.
    fn decode(&self, code: u64, bits: u32) -> Point {
        self.decode_bbox(code, bits).center()
    }

    /// The eight surrounding cells at the same precision. Near the poles some
    /// of them may coincide with each other or with `code` itself.
    fn neighbors(&self, code: u64, bits: u32) -> CellNeighbors<u64>;
}

/// Ordering-preserving encoding of cell codes into store keys.
///
/// For a fixed subspace, `a < b` must imply
/// `encode_key(s, a) < encode_key(s, b)` bytewise.
pub trait KeyEncoder: Send + Sync {
    fn encode_key(&self, subspace: &Subspace, code: u64) -> Bytes;

    /// Recover the cell code from a stored key.
    fn decode_key(&self, subspace: &Subspace, key: &[u8]) -> Result<u64>;
}
