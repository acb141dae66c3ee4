//! Radius queries over geohash-keyed sorted key-value stores.
//!
//! Points are stored under integer geohash codes. A "within R km of
//! (lat, lon)" query becomes at most nine sorted, disjoint key ranges to scan,
//! and a membership predicate that drops the false positives those
//! rectangular ranges let through.
//!
//! ```rust
//! use georange::{MemoryStore, RadialRangeBuilder, RangeStore, Subspace, point_key, radial_scan};
//! use georange::Point;
//!
//! let places = Subspace::from_tuple(&["places".into()]);
//! let mut store = MemoryStore::new();
//! store.put(&point_key(&places, &Point::new(-74.0060, 40.7128), 64), "NYC".into())?;
//! store.put(&point_key(&places, &Point::new(-118.2437, 34.0522), 64), "LA".into())?;
//!
//! let query = RadialRangeBuilder::new(100.0, 40.7, -74.0)
//!     .subspace(places)
//!     .build()?;
//! let hits = radial_scan(&store, &query)?;
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].1.as_ref(), b"NYC");
//! # Ok::<(), georange::GeoRangeError>(())
//! ```

pub mod builder;
pub mod codec;
pub mod compute;
pub mod config;
pub mod error;
pub mod radial;
pub mod storage;
pub mod subspace;
pub mod tuple;

pub use builder::RadialRangeBuilder;
pub use config::{Config, ValidationMode};
pub use error::{GeoRangeError, Result};

pub use geo::Point;
pub use georange_types::cell::{CellBounds, CellNeighbors};
pub use georange_types::range::{HashRange, KeyRange};

pub use codec::{IntGeohash, KeyEncoder, SpatialCodec, TupleKeyEncoder};

pub use compute::ranges::{
    PrecisionPolicy, cell_width_km, merge, radial_hash_ranges, select_bits, within_radius,
};

pub use radial::{RadialRange, point_key, radial_range};

pub use storage::{MemoryStore, RangeStore, StoreStats, radial_scan};

pub use subspace::Subspace;

pub use tuple::{TupleElement, unpack_uint};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GeoRangeError, RadialRange, RadialRangeBuilder, Result};

    pub use geo::Point;

    pub use crate::{HashRange, KeyRange, Subspace};

    pub use crate::{Config, PrecisionPolicy, ValidationMode};

    pub use crate::{IntGeohash, KeyEncoder, SpatialCodec, TupleKeyEncoder};

    pub use crate::{MemoryStore, RangeStore, radial_scan};
}
