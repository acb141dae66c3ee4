//! Radius to geohash precision mapping.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Half the equatorial circumference in km (π × WGS84 equatorial radius).
pub const HALF_CIRCUMFERENCE_KM: f64 = std::f64::consts::PI * 6378.137;

/// Kilometers per degree of arc on the mean-radius sphere used for distances.
pub const KM_PER_DEGREE: f64 = 6371.0088 * std::f64::consts::PI / 180.0;

/// Coarsest precision the planner ever searches at.
pub const MIN_RANGE_BITS: u32 = 2;

/// Finest precision, one full `u64` code.
pub const MAX_RANGE_BITS: u32 = 64;

const TABLE_LEN: usize = ((MAX_RANGE_BITS - 4) / 2 + 1) as usize;

/// `CELL_WIDTHS_KM[i]` is the cell width at `2 * i + 4` bits. Every 2 extra
/// bits halve the width.
static CELL_WIDTHS_KM: Lazy<[f64; TABLE_LEN]> = Lazy::new(|| {
    let mut widths = [0.0; TABLE_LEN];
    let mut width = HALF_CIRCUMFERENCE_KM;
    for slot in widths.iter_mut() {
        width /= 2.0;
        *slot = width;
    }
    widths
});

fn bits_for_index(index: usize) -> u32 {
    2 * index as u32 + 4
}

/// Approximate cell width in km at an even precision in `2..=64`.
///
/// Values below 2 bits are treated as 2, above 64 as 64.
pub fn cell_width_km(bits: u32) -> f64 {
    let bits = bits.clamp(MIN_RANGE_BITS, MAX_RANGE_BITS);
    if bits < 4 {
        return HALF_CIRCUMFERENCE_KM;
    }
    CELL_WIDTHS_KM[((bits - 4) / 2) as usize]
}

/// The largest even precision whose cell is still at least `radius_km` wide.
///
/// Scans from the finest cell toward the coarsest. Radii wider than every
/// tabulated cell (and NaN) fall back to [`MIN_RANGE_BITS`]; a radius of zero
/// or below selects [`MAX_RANGE_BITS`].
///
/// # Examples
///
/// ```
/// use georange::compute::ranges::{cell_width_km, select_bits};
///
/// let bits = select_bits(100.0);
/// assert_eq!(bits, 16);
/// assert!(cell_width_km(bits) >= 100.0);
/// assert!(cell_width_km(bits + 2) < 100.0);
/// ```
pub fn select_bits(radius_km: f64) -> u32 {
    CELL_WIDTHS_KM
        .iter()
        .enumerate()
        .rev()
        .find(|(_, width)| **width >= radius_km)
        .map(|(index, _)| bits_for_index(index))
        .unwrap_or(MIN_RANGE_BITS)
}

/// How the planner turns a radius into a search precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionPolicy {
    /// Start from [`select_bits`] and coarsen until the 3×3 block of cells
    /// provably contains the whole circle at the query's latitude. Circles
    /// reaching a pole are searched at [`POLAR_BITS`] with the full polar row
    /// of cells added, and the numerically last cell keeps all of its codes
    /// but the final one instead of being dropped.
    #[default]
    Covering,
    /// Use [`select_bits`] as is. Cells are sized by their equatorial width,
    /// so at higher latitudes (and north-south, where cells are half as tall)
    /// points near the rim can fall outside the scanned ranges.
    Equatorial,
}

/// Height and width in degrees of a cell at `bits` precision.
pub fn cell_span_deg(bits: u32) -> (f64, f64) {
    let lat_bits = (bits / 2) as i32;
    let lon_bits = (bits - bits / 2) as i32;
    (180.0 * 2f64.powi(-lat_bits), 360.0 * 2f64.powi(-lon_bits))
}

/// Returns `true` if the query cell at `bits` plus its neighbours contain
/// every point within `radius_km` of a centre at `latitude`.
///
/// The cell must be at least as tall as the circle's reach and at least as
/// wide as the circle's widest longitude offset. Circles touching a pole never
/// qualify.
pub fn covers_radius(bits: u32, radius_km: f64, latitude: f64) -> bool {
    let (lat_span, lon_span) = cell_span_deg(bits);
    let reach = radius_km / KM_PER_DEGREE;
    if reach <= 0.0 {
        return true;
    }
    if lat_span < reach || latitude.abs() + reach >= 90.0 {
        return false;
    }
    let ratio = reach.to_radians().sin() / latitude.to_radians().cos();
    ratio < 1.0 && lon_span >= ratio.asin().to_degrees()
}

/// Precision used for circles that reach a pole: four rows of 45° and four
/// columns of 90°.
///
/// With the whole polar row scanned, the row next to it only has to hold
/// points within 90° of longitude of the centre, which is true for any circle
/// up to 45° of arc centred in the polar row.
pub const POLAR_BITS: u32 = 4;

/// The pole (`90.0` or `-90.0`) a circle of `radius_km` around `latitude`
/// reaches, if any.
pub fn reached_pole(radius_km: f64, latitude: f64) -> Option<f64> {
    let reach = radius_km / KM_PER_DEGREE;
    if reach > 0.0 && latitude.abs() + reach >= 90.0 {
        Some(if latitude >= 0.0 { 90.0 } else { -90.0 })
    } else {
        None
    }
}

/// [`select_bits`], coarsened 2 bits at a time until [`covers_radius`] holds.
///
/// Circles reaching a pole use [`POLAR_BITS`] when their reach fits in one
/// polar row, and [`MIN_RANGE_BITS`] (the whole globe) otherwise.
pub fn select_covering_bits(radius_km: f64, latitude: f64) -> u32 {
    if reached_pole(radius_km, latitude).is_some() {
        let reach = radius_km / KM_PER_DEGREE;
        return if reach <= cell_span_deg(POLAR_BITS).0 {
            POLAR_BITS.min(select_bits(radius_km))
        } else {
            MIN_RANGE_BITS
        };
    }

    let mut bits = select_bits(radius_km);
    while bits > MIN_RANGE_BITS && !covers_radius(bits, radius_km, latitude) {
        bits -= 2;
    }
    bits
}

impl PrecisionPolicy {
    /// Search precision for a circle of `radius_km` centred at `latitude`.
    pub fn bits_for(self, radius_km: f64, latitude: f64) -> u32 {
        match self {
            PrecisionPolicy::Covering => select_covering_bits(radius_km, latitude),
            PrecisionPolicy::Equatorial => select_bits(radius_km),
        }
    }
}
