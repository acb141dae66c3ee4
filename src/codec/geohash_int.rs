//! Integer geohash codec.
//!
//! Latitude and longitude are each quantized to 32 bits and interleaved into a
//! single `u64`, longitude first, which is the same bit order base32 geohash
//! strings use. A code at precision `b` is the top `b` bits of that word.

use super::{MAX_BITS, SpatialCodec};
use crate::error::{GeoRangeError, Result};
use geo::Point;
use georange_types::cell::{CellBounds, CellNeighbors};

const EXP_2_32: f64 = 4_294_967_296.0;

/// Default [`SpatialCodec`]: integer geohash with any precision in `1..=64`.
///
/// # Examples
///
/// ```
/// use georange::codec::{IntGeohash, SpatialCodec};
/// use geo::Point;
///
/// let codec = IntGeohash;
/// let nyc = Point::new(-74.0060, 40.7128);
/// let code = codec.encode(&nyc, 32);
/// assert!(codec.decode_bbox(code, 32).contains(&nyc));
///
/// // Interoperates with base32 geohash strings.
/// let code = codec.encode(&nyc, 35);
/// assert_eq!(codec.to_base32(code, 35).unwrap(), "dr5regw");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntGeohash;

impl IntGeohash {
    /// Full 64-bit code for a point.
    pub fn encode_full(&self, point: &Point) -> u64 {
        let lat = encode_range(clamp_lat(point.y()), 90.0);
        let lon = encode_range(wrap_lon(point.x()), 180.0);
        interleave(lat, lon)
    }

    /// Render `code` as a base32 geohash string. `bits` must be a non-zero
    /// multiple of 5, at most 60.
    pub fn to_base32(&self, code: u64, bits: u32) -> Result<String> {
        if bits == 0 || bits % 5 != 0 || bits > 60 {
            return Err(GeoRangeError::InvalidPrecision { bits });
        }
        let center = self.decode(code, bits);
        let hash = geohash::encode(
            geohash::Coord {
                x: center.x(),
                y: center.y(),
            },
            (bits / 5) as usize,
        )?;
        Ok(hash)
    }

    /// Parse a base32 geohash string into `(code, bits)`.
    pub fn from_base32(&self, hash: &str) -> Result<(u64, u32)> {
        let bits = u32::try_from(hash.len())
            .ok()
            .and_then(|len| len.checked_mul(5))
            .filter(|bits| (5..=60).contains(bits))
            .ok_or_else(|| {
                GeoRangeError::Geohash(format!("unsupported geohash length {}", hash.len()))
            })?;
        let (center, _, _) = geohash::decode(hash)?;
        Ok((self.encode(&Point::new(center.x, center.y), bits), bits))
    }
}

impl SpatialCodec for IntGeohash {
    fn encode(&self, point: &Point, bits: u32) -> u64 {
        self.encode_full(point)
            .checked_shr(MAX_BITS - bits.min(MAX_BITS))
            .unwrap_or(0)
    }

    fn decode_bbox(&self, code: u64, bits: u32) -> CellBounds {
        let bits = bits.min(MAX_BITS);
        let full = code.checked_shl(MAX_BITS - bits).unwrap_or(0);
        let (lat_int, lon_int) = deinterleave(full);
        let lat = decode_range(lat_int, 90.0);
        let lon = decode_range(lon_int, 180.0);

        let lat_bits = bits / 2;
        let lon_bits = bits - lat_bits;
        let lat_err = 180.0 * 2f64.powi(-(lat_bits as i32));
        let lon_err = 360.0 * 2f64.powi(-(lon_bits as i32));

        CellBounds::new(lat, lat + lat_err, lon, lon + lon_err)
    }

    fn neighbors(&self, code: u64, bits: u32) -> CellNeighbors<u64> {
        let bounds = self.decode_bbox(code, bits);
        let center = bounds.center();
        let (d_lat, d_lon) = (bounds.lat_span(), bounds.lon_span());

        let at = |lat_steps: f64, lon_steps: f64| {
            let point = Point::new(
                wrap_lon(center.x() + lon_steps * d_lon),
                clamp_lat(center.y() + lat_steps * d_lat),
            );
            self.encode(&point, bits)
        };

        CellNeighbors {
            n: at(1.0, 0.0),
            ne: at(1.0, 1.0),
            e: at(0.0, 1.0),
            se: at(-1.0, 1.0),
            s: at(-1.0, 0.0),
            sw: at(-1.0, -1.0),
            w: at(0.0, -1.0),
            nw: at(1.0, -1.0),
        }
    }
}

/// Latitude beyond a pole sticks to the pole.
fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-90.0, 90.0)
}

/// Longitude outside `[-180, 180]` wraps around the antimeridian.
fn wrap_lon(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

fn encode_range(x: f64, r: f64) -> u32 {
    let p = (x + r) / (2.0 * r);
    // `as` saturates, so x == r maps onto the last cell.
    (p * EXP_2_32) as u32
}

fn decode_range(x: u32, r: f64) -> f64 {
    let p = f64::from(x) / EXP_2_32;
    2.0 * r * p - r
}

fn spread(x: u32) -> u64 {
    let mut x = u64::from(x);
    x = (x | (x << 16)) & 0x0000_ffff_0000_ffff;
    x = (x | (x << 8)) & 0x00ff_00ff_00ff_00ff;
    x = (x | (x << 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & 0x5555_5555_5555_5555;
    x
}

fn squash(x: u64) -> u32 {
    let mut x = x & 0x5555_5555_5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x | (x >> 2)) & 0x0f0f_0f0f_0f0f_0f0f;
    x = (x | (x >> 4)) & 0x00ff_00ff_00ff_00ff;
    x = (x | (x >> 8)) & 0x0000_ffff_0000_ffff;
    x = (x | (x >> 16)) & 0x0000_0000_ffff_ffff;
    x as u32
}

/// Longitude bits land on the odd positions so the top bit is a longitude bit.
fn interleave(lat: u32, lon: u32) -> u64 {
    spread(lat) | (spread(lon) << 1)
}

fn deinterleave(x: u64) -> (u32, u32) {
    (squash(x), squash(x >> 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_spread_squash_inverse() {
        for x in [0u32, 1, 0xdead_beef, u32::MAX, 0x8000_0000] {
            assert_eq!(squash(spread(x)), x);
        }
    }

    #[test]
    fn test_interleave_puts_longitude_first() {
        assert_eq!(interleave(0, 0x8000_0000), 1 << 63);
        assert_eq!(interleave(0x8000_0000, 0), 1 << 62);
        assert_eq!(deinterleave(1 << 63), (0, 0x8000_0000));
    }

    #[test]
    fn test_corners() {
        let codec = IntGeohash;
        assert_eq!(codec.encode(&Point::new(-180.0, -90.0), 64), 0);
        assert_eq!(codec.encode(&Point::new(180.0, 90.0), 64), u64::MAX);
        assert_eq!(codec.encode(&Point::new(180.0, 90.0), 16), 0xffff);
    }

    #[test]
    fn test_encode_is_prefix_of_full_code() {
        let codec = IntGeohash;
        let point = Point::new(2.3522, 48.8566);
        let full = codec.encode(&point, 64);
        for bits in [2, 8, 20, 33, 50] {
            assert_eq!(codec.encode(&point, bits), full >> (64 - bits));
        }
    }

    #[rstest]
    #[case(2)]
    #[case(16)]
    #[case(26)]
    #[case(40)]
    #[case(64)]
    fn test_decode_bbox_contains_point(#[case] bits: u32) {
        let codec = IntGeohash;
        let point = Point::new(-74.0060, 40.7128);
        let code = codec.encode(&point, bits);
        let bounds = codec.decode_bbox(code, bits);
        assert!(bounds.contains(&point), "{bits} bits: {bounds:?}");
        assert_eq!(codec.encode(&bounds.center(), bits), code);
    }

    #[test]
    fn test_cell_sizes() {
        let bounds = IntGeohash.decode_bbox(0, 4);
        assert_eq!(bounds.lat_span(), 45.0);
        assert_eq!(bounds.lon_span(), 90.0);
        assert_eq!(bounds.min_lat, -90.0);
        assert_eq!(bounds.min_lon, -180.0);
    }

    #[test]
    fn test_neighbors_are_adjacent() {
        let codec = IntGeohash;
        let bits = 20;
        let code = codec.encode(&Point::new(10.0, 10.0), bits);
        let bounds = codec.decode_bbox(code, bits);
        let neighbors = codec.neighbors(code, bits);

        let north = codec.decode_bbox(neighbors.n, bits);
        assert!((north.min_lat - bounds.max_lat).abs() < 1e-9);
        assert_eq!(north.min_lon, bounds.min_lon);

        let west = codec.decode_bbox(neighbors.w, bits);
        assert!((west.max_lon - bounds.min_lon).abs() < 1e-9);
        assert_eq!(west.min_lat, bounds.min_lat);

        let all: Vec<u64> = neighbors.iter().collect();
        assert!(!all.contains(&code));
    }

    #[test]
    fn test_neighbors_wrap_antimeridian() {
        let codec = IntGeohash;
        let bits = 10;
        let code = codec.encode(&Point::new(-179.9, 0.0), bits);
        let west = codec.decode_bbox(codec.neighbors(code, bits).w, bits);
        assert!(west.max_lon > 179.0);
    }

    #[test]
    fn test_neighbors_clamp_at_pole() {
        let codec = IntGeohash;
        let bits = 10;
        let code = codec.encode(&Point::new(0.0, 89.9), bits);
        let neighbors = codec.neighbors(code, bits);
        assert_eq!(neighbors.n, code);
        assert_eq!(neighbors.ne, neighbors.e);
        assert_eq!(neighbors.nw, neighbors.w);
    }

    #[test]
    fn test_base32_matches_geohash_crate() {
        let codec = IntGeohash;
        let nyc = Point::new(-74.0060, 40.7128);
        let expected = geohash::encode(geohash::Coord { x: nyc.x(), y: nyc.y() }, 7).unwrap();
        let code = codec.encode(&nyc, 35);
        assert_eq!(codec.to_base32(code, 35).unwrap(), expected);

        let (parsed, bits) = codec.from_base32(&expected).unwrap();
        assert_eq!(bits, 35);
        assert_eq!(parsed, code);
    }

    #[test]
    fn test_base32_rejects_bad_precision() {
        assert!(matches!(
            IntGeohash.to_base32(0, 12),
            Err(GeoRangeError::InvalidPrecision { bits: 12 })
        ));
        assert!(IntGeohash.from_base32("").is_err());
        assert!(IntGeohash.from_base32("dr5rega").is_err());
    }

    #[test]
    fn test_wrap_lon() {
        assert_eq!(wrap_lon(190.0), -170.0);
        assert_eq!(wrap_lon(-190.0), 170.0);
        assert_eq!(wrap_lon(180.0), 180.0);
    }
}
