//! Exact radius filtering for scan results.

use crate::codec::SpatialCodec;
use geo::{Distance, Haversine, Point};

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(a: &Point, b: &Point) -> f64 {
    Haversine.distance(*a, *b) / 1000.0
}

/// Returns `true` if the centre of cell `code` (at `bits` precision) lies
/// strictly closer than `radius_km` to `query`.
///
/// Range scans over geohash cells return a square-ish superset of the circle;
/// this predicate trims it back down. A point exactly on the boundary is
/// outside.
pub fn within_radius<C: SpatialCodec + ?Sized>(
    codec: &C,
    code: u64,
    bits: u32,
    query: &Point,
    radius_km: f64,
) -> bool {
    let decoded = codec.decode(code, bits);
    haversine_km(&decoded, query) < radius_km
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::IntGeohash;

    #[test]
    fn test_haversine_km_nyc_la() {
        let nyc = Point::new(-74.0060, 40.7128);
        let la = Point::new(-118.2437, 34.0522);
        let distance = haversine_km(&nyc, &la);
        assert!((3_900.0..4_000.0).contains(&distance), "{distance}");
    }

    #[test]
    fn test_boundary_is_excluded() {
        let codec = IntGeohash;
        let query = Point::new(-75.0, 40.0);
        let code = codec.encode(&Point::new(-74.5, 40.2), 64);
        let exact = haversine_km(&codec.decode(code, 64), &query);

        assert!(!within_radius(&codec, code, 64, &query, exact));
        assert!(within_radius(&codec, code, 64, &query, exact + 1e-9));
        assert!(!within_radius(&codec, code, 64, &query, exact - 1e-9));
    }

    #[test]
    fn test_query_point_is_within_any_positive_radius() {
        let codec = IntGeohash;
        let query = Point::new(139.6917, 35.6895);
        let code = codec.encode(&query, 64);
        assert!(within_radius(&codec, code, 64, &query, 0.001));
        assert!(!within_radius(&codec, code, 64, &query, 0.0));
    }

    #[test]
    fn test_coarse_codes_decode_to_cell_center() {
        let codec = IntGeohash;
        let query = Point::new(0.0, 0.0);
        // The 2-bit cell north-east of the origin is centred on (90, 45).
        assert!(!within_radius(&codec, 0b11, 2, &query, 5_000.0));
        assert!(within_radius(&codec, 0b11, 2, &query, 11_000.0));
    }
}
