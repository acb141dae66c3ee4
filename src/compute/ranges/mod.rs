//! Radius query planning over integer geohash keys.
//!
//! A query runs through four stages, each a pure function:
//!
//! 1. [`select_bits`] picks the coarsest precision whose cell still covers
//!    the radius; under [`PrecisionPolicy::Covering`] it is then coarsened
//!    for the query's latitude.
//! 2. [`candidate_cells`] encodes the centre at that precision and adds its
//!    neighbours. Under the covering policy, circles reaching a pole also get
//!    every cell of the polar row ([`polar_row_cells`]).
//! 3. [`expand`] turns every coarse cell into the range of full-precision
//!    codes under it ([`expand_saturating`] under the covering policy).
//! 4. [`merge`] sorts and coalesces those ranges.
//!
//! [`within_radius`] then removes false positives from whatever the scan
//! returns.

mod expand;
mod membership;
mod merge;
mod neighbors;
mod precision;

pub use expand::{expand, expand_cell, expand_cell_saturating, expand_saturating};
pub use membership::{haversine_km, within_radius};
pub use merge::merge;
pub use neighbors::{CandidateCells, candidate_cells, polar_row_cells};
pub use precision::{
    HALF_CIRCUMFERENCE_KM, KM_PER_DEGREE, MAX_RANGE_BITS, MIN_RANGE_BITS, POLAR_BITS,
    PrecisionPolicy, cell_span_deg, cell_width_km, covers_radius, reached_pole, select_bits,
    select_covering_bits,
};

use crate::codec::SpatialCodec;
use geo::Point;
use georange_types::range::HashRange;

/// Precision used for the neighbour search, capped at the precision the keys
/// are stored with.
pub fn range_bits(radius_km: f64, latitude: f64, full_bits: u32, policy: PrecisionPolicy) -> u32 {
    policy.bits_for(radius_km, latitude).min(full_bits)
}

/// Plan a radius query: the sorted, disjoint ranges of `full_bits` codes to
/// scan for points within `radius_km` of `center`.
///
/// Never fails. The result is empty only if every candidate range overflowed,
/// and otherwise holds at most nine ranges.
///
/// # Examples
///
/// ```
/// use georange::codec::{IntGeohash, SpatialCodec};
/// use georange::compute::ranges::{PrecisionPolicy, radial_hash_ranges};
/// use geo::Point;
///
/// let center = Point::new(-75.0, 40.0);
/// let ranges = radial_hash_ranges(&IntGeohash, &center, 50.0, 64, PrecisionPolicy::Covering);
///
/// let code = IntGeohash.encode(&center, 64);
/// assert!(ranges.iter().any(|range| range.contains(code)));
/// ```
pub fn radial_hash_ranges<C: SpatialCodec + ?Sized>(
    codec: &C,
    center: &Point,
    radius_km: f64,
    full_bits: u32,
    policy: PrecisionPolicy,
) -> Vec<HashRange> {
    let bits = range_bits(radius_km, center.y(), full_bits, policy);
    let mut cells = candidate_cells(codec, center, bits);

    let merged = match policy {
        PrecisionPolicy::Covering => {
            if let Some(pole) = reached_pole(radius_km, center.y())
                && bits <= POLAR_BITS
            {
                cells.extend(polar_row_cells(codec, pole, bits));
                cells.sort_unstable();
                cells.dedup();
            }
            merge(expand_saturating(cells.iter().copied(), bits, full_bits))
        }
        PrecisionPolicy::Equatorial => merge(expand(cells.iter().copied(), bits, full_bits)),
    };

    log::debug!(
        "radius {} km at ({}, {}): {} cells at {} bits merged into {} ranges",
        radius_km,
        center.y(),
        center.x(),
        cells.len(),
        bits,
        merged.len()
    );
    merged
}
