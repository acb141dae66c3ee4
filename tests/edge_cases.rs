mod common;

use common::{destination, init_logging};
use georange::compute::ranges::{expand, merge};
use georange::prelude::*;

fn assert_well_formed(ranges: &[HashRange]) {
    assert!(ranges.len() <= 9);
    for range in ranges {
        assert!(range.min < range.max, "inverted range {}", range);
    }
    for pair in ranges.windows(2) {
        assert!(pair[0].max < pair[1].min, "{} and {} touch", pair[0], pair[1]);
    }
}

#[test]
fn test_south_west_corner_never_inverts() {
    init_logging();
    for full_bits in [2, 8, 32, 52, 64] {
        for radius in [0.0, 0.01, 1.0, 100.0, 5_000.0, 20_000.0] {
            let query = RadialRange::new(radius, -90.0, -180.0).with_full_bits(full_bits);
            let ranges = query.hash_ranges();
            assert_well_formed(&ranges);
            // The corner itself is code zero and sits in the first range.
            assert_eq!(ranges[0].min, 0);
        }
    }
}

#[test]
fn test_north_east_corner_cell_is_dropped() {
    let query = RadialRange::new(0.0, 90.0, 180.0);
    assert_eq!(query.range_bits(), 64);
    assert_eq!(IntGeohash.encode(&query.center(), 64), u64::MAX);

    let ranges = query.hash_ranges();
    assert_well_formed(&ranges);
    assert!(!ranges.is_empty());
    assert!(ranges.iter().all(|range| !range.contains(u64::MAX)));
}

#[test]
fn test_only_the_last_cell_overflows() {
    let bits = 6;
    let cells: Vec<u64> = (0..1u64 << bits).collect();
    let ranges = expand(cells, bits, 64);
    assert_eq!(ranges.len(), (1 << bits) - 1);

    let merged = merge(ranges);
    assert_eq!(merged, vec![HashRange::new(0, 63 << 58)]);
}

#[test]
fn test_poles() {
    for latitude in [90.0, -90.0, 89.9999, -89.9999] {
        for radius in [0.1, 10.0, 1_000.0] {
            let query = RadialRange::new(radius, latitude, 12.5);
            let ranges = query.hash_ranges();
            assert_well_formed(&ranges);

            let code = IntGeohash.encode(&query.center(), 64);
            if code != u64::MAX {
                assert!(ranges.iter().any(|range| range.contains(code)));
            }
        }
    }
}

#[test]
fn test_circles_around_poles_are_covered() {
    let cases = [
        (10.0, 89.95, 12.5),
        (100.0, 89.5, 100.0),
        (500.0, 89.0, 0.0),
        (2_000.0, 75.0, 170.0),
        (10.0, -89.95, 12.5),
        (500.0, -89.0, 135.0),
    ];
    for (radius, lat, lon) in cases {
        let center = Point::new(lon, lat);
        let query = RadialRange::new(radius, lat, lon);
        let ranges = query.hash_ranges();
        assert_well_formed(&ranges);

        let code = IntGeohash.encode(&center, 64);
        assert!(ranges.iter().any(|range| range.contains(code)), "{lat} {lon}");
        for bearing in (0..360).step_by(20) {
            for fraction in [0.3, 0.7, 0.999] {
                let point = destination(&center, f64::from(bearing), radius * fraction);
                let code = IntGeohash.encode(&point, 64);
                assert!(
                    ranges.iter().any(|range| range.contains(code)),
                    "({lat}, {lon}) r {radius}: {point:?} not covered"
                );
            }
        }
    }
}

#[test]
fn test_scan_finds_point_next_to_north_pole() {
    let point = Point::new(12.5, 89.95);
    let mut store = MemoryStore::new();
    store
        .put(
            &georange::point_key(&Subspace::new(), &point, 64),
            "station".into(),
        )
        .unwrap();

    let query = RadialRange::new(10.0, point.y(), point.x());
    let hits = radial_scan(&store, &query).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].1.as_ref(), b"station");
}

#[test]
fn test_antimeridian_neighbours_wrap() {
    let center = Point::new(179.999, 10.0);
    let query = RadialRange::new(20.0, center.y(), center.x());
    let ranges = query.hash_ranges();
    assert_well_formed(&ranges);

    // Both sides of the antimeridian are scanned.
    for point in [destination(&center, 90.0, 10.0), destination(&center, 270.0, 10.0)] {
        let code = IntGeohash.encode(&point, 64);
        assert!(ranges.iter().any(|range| range.contains(code)));
        assert!(query.within_radius(code));
    }
    let east = destination(&center, 90.0, 10.0);
    assert!(east.x() < 0.0);
}

#[test]
fn test_longitude_180_and_minus_180_agree() {
    // 180 saturates into the last column, -180 is the first one; both cells
    // are neighbours of each other.
    let at_east_edge = RadialRange::new(5.0, 0.0, 180.0).hash_ranges();
    let at_west_edge = RadialRange::new(5.0, 0.0, -180.0).hash_ranges();
    let first_column = IntGeohash.encode(&Point::new(-180.0, 0.0), 64);
    let last_column = IntGeohash.encode(&Point::new(180.0, 0.0), 64);
    assert!(at_east_edge.iter().any(|range| range.contains(first_column)));
    assert!(at_west_edge.iter().any(|range| range.contains(last_column)));
}

#[test]
fn test_zero_radius() {
    let query = RadialRange::new(0.0, 40.0, -75.0);
    assert_eq!(query.range_bits(), 64);
    let ranges = query.hash_ranges();
    assert_well_formed(&ranges);

    let code = IntGeohash.encode(&query.center(), 64);
    assert!(ranges.iter().any(|range| range.contains(code)));
    // Strict inequality: nothing is within a zero radius.
    assert!(!query.within_radius(code));
}

#[test]
fn test_huge_radius_is_capped_at_two_bits() {
    for radius in [15_000.0, 1e9, f64::INFINITY, f64::NAN] {
        let query = RadialRange::new(radius, 10.0, 10.0);
        assert_eq!(query.range_bits(), 2);
        assert_well_formed(&query.hash_ranges());
    }
}

#[test]
fn test_range_bits_capped_by_full_bits() {
    let query = RadialRange::new(0.001, 40.0, -75.0).with_full_bits(20);
    assert_eq!(query.range_bits(), 20);
    let ranges = query.hash_ranges();
    assert_well_formed(&ranges);
    assert!(ranges.iter().all(|range| range.max <= 1 << 20));
}

#[test]
fn test_permissive_out_of_range_coordinates() {
    let config = Config::default().with_validation(ValidationMode::Permissive);
    for (lat, lon) in [(95.0, 0.0), (0.0, 540.0), (-100.0, -200.0)] {
        let query = RadialRangeBuilder::new(10.0, lat, lon)
            .config(config.clone())
            .build()
            .unwrap();
        assert_well_formed(&query.hash_ranges());
    }
}

#[test]
fn test_foreign_keys_are_rejected() {
    let query = RadialRange::new(10.0, 40.0, -75.0).with_subspace(Subspace::from_bytes(&b"a/"[..]));
    assert!(query.contains_key(b"b/\x14").is_err());
    assert!(query.contains_key(b"a/\x02x\x00").is_err());
    assert!(query.contains_key(b"a/\x1c\x01").is_err());
}
