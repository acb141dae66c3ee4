//! Candidate cell enumeration around a query point.

use crate::codec::SpatialCodec;
use geo::Point;
use smallvec::SmallVec;

/// Query cell plus its (up to) eight neighbours, sorted and deduplicated.
pub type CandidateCells = SmallVec<[u64; 9]>;

/// Encode `point` at `bits` and collect the 3×3 block of cells around it.
///
/// Near the poles or the antimeridian some neighbours coincide; those
/// duplicates are removed here, so the result holds between one and nine
/// distinct codes.
pub fn candidate_cells<C: SpatialCodec + ?Sized>(codec: &C, point: &Point, bits: u32) -> CandidateCells {
    let center = codec.encode(point, bits);

    let mut cells = CandidateCells::new();
    cells.push(center);
    cells.extend(codec.neighbors(center, bits).iter());

    cells.sort_unstable();
    cells.dedup();
    cells
}

/// Every cell of the row touching `pole` (`90.0` or `-90.0`) at `bits`.
///
/// Emits one code per column, `2^ceil(bits / 2)` in total, so it is meant for
/// coarse precisions only.
pub fn polar_row_cells<C: SpatialCodec + ?Sized>(codec: &C, pole: f64, bits: u32) -> CandidateCells {
    let pole = pole.clamp(-90.0, 90.0);
    let lon_span = codec.decode_bbox(codec.encode(&Point::new(0.0, pole), bits), bits).lon_span();

    let mut cells = CandidateCells::new();
    if !(lon_span > 0.0) {
        cells.push(codec.encode(&Point::new(0.0, pole), bits));
        return cells;
    }
    let mut lon = -180.0 + lon_span / 2.0;
    while lon < 180.0 {
        cells.push(codec.encode(&Point::new(lon, pole), bits));
        lon += lon_span;
    }
    cells.sort_unstable();
    cells.dedup();
    cells
}
