//! Validation for radius query inputs.

use crate::compute::ranges::{MAX_RANGE_BITS, MIN_RANGE_BITS};
use crate::error::{GeoRangeError, Result};
use geo::Point;

/// Validates a 2D point has valid longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use georange::compute::validation::validate_geographic_point;
/// use geo::Point;
///
/// // Valid point
/// let nyc = Point::new(-74.0060, 40.7128);
/// assert!(validate_geographic_point(&nyc).is_ok());
///
/// // Invalid longitude
/// let invalid = Point::new(200.0, 40.0);
/// assert!(validate_geographic_point(&invalid).is_err());
///
/// // Invalid latitude
/// let invalid = Point::new(-74.0, 95.0);
/// assert!(validate_geographic_point(&invalid).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() {
        return Err(GeoRangeError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            x
        )));
    }

    if !y.is_finite() {
        return Err(GeoRangeError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            y
        )));
    }

    if !(-180.0..=180.0).contains(&x) {
        return Err(GeoRangeError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            x
        )));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(GeoRangeError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            y
        )));
    }

    Ok(())
}

/// Validates a search radius in kilometers: finite, non-negative and, when a
/// cap is given, no larger than it.
pub fn validate_radius(radius_km: f64, max_radius_km: Option<f64>) -> Result<()> {
    if !radius_km.is_finite() {
        return Err(GeoRangeError::InvalidInput(format!(
            "Radius must be finite, got: {}",
            radius_km
        )));
    }

    if radius_km < 0.0 {
        return Err(GeoRangeError::InvalidInput(format!(
            "Radius must not be negative, got: {}",
            radius_km
        )));
    }

    if let Some(max) = max_radius_km
        && radius_km > max
    {
        return Err(GeoRangeError::InvalidInput(format!(
            "Radius {} km exceeds the configured maximum of {} km",
            radius_km, max
        )));
    }

    Ok(())
}

/// Validates a key precision: even and within `2..=64` bits.
///
/// # Examples
///
/// ```
/// use georange::compute::validation::validate_precision;
///
/// assert!(validate_precision(64).is_ok());
/// assert!(validate_precision(32).is_ok());
/// assert!(validate_precision(33).is_err());
/// assert!(validate_precision(0).is_err());
/// ```
pub fn validate_precision(bits: u32) -> Result<()> {
    if !(MIN_RANGE_BITS..=MAX_RANGE_BITS).contains(&bits) || bits % 2 != 0 {
        return Err(GeoRangeError::InvalidPrecision { bits });
    }
    Ok(())
}
