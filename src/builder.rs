//! Query builder for flexible configuration
//!
//! This module provides a builder pattern for creating radius queries with
//! input validation, custom key precision, subspaces and pluggable codecs.

use crate::codec::{IntGeohash, KeyEncoder, SpatialCodec, TupleKeyEncoder};
use crate::compute::validation::{validate_geographic_point, validate_precision, validate_radius};
use crate::config::{Config, ValidationMode};
use crate::error::Result;
use crate::radial::RadialRange;
use crate::subspace::Subspace;
use geo::Point;

/// Builder for [`RadialRange`] queries.
///
/// # Examples
///
/// ```rust
/// use georange::{Config, RadialRangeBuilder, Subspace};
///
/// let query = RadialRangeBuilder::new(50.0, 40.0, -75.0)
///     .subspace(Subspace::from_tuple(&["places".into()]))
///     .full_bits(52)
///     .build()?;
/// assert_eq!(query.full_bits(), 52);
///
/// // Strict validation is the default.
/// assert!(RadialRangeBuilder::new(-1.0, 40.0, -75.0).build().is_err());
/// # Ok::<(), georange::GeoRangeError>(())
/// ```
#[derive(Debug)]
pub struct RadialRangeBuilder<C = IntGeohash, K = TupleKeyEncoder> {
    radius_km: f64,
    center: Point,
    full_bits: Option<u32>,
    subspace: Subspace,
    config: Config,
    codec: C,
    encoder: K,
}

impl RadialRangeBuilder {
    /// Start a query around `(latitude, longitude)` with default settings.
    pub fn new(radius_km: f64, latitude: f64, longitude: f64) -> Self {
        Self {
            radius_km,
            center: Point::new(longitude, latitude),
            full_bits: None,
            subspace: Subspace::new(),
            config: Config::default(),
            codec: IntGeohash,
            encoder: TupleKeyEncoder,
        }
    }
}

impl<C: SpatialCodec, K: KeyEncoder> RadialRangeBuilder<C, K> {
    /// Set the planner configuration (key precision, validation policy).
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Override the configured key precision for this query.
    pub fn full_bits(mut self, bits: u32) -> Self {
        self.full_bits = Some(bits);
        self
    }

    /// Prefix every emitted key with `subspace`.
    pub fn subspace(mut self, subspace: Subspace) -> Self {
        self.subspace = subspace;
        self
    }

    /// Use a different spatial code.
    pub fn codec<C2: SpatialCodec>(self, codec: C2) -> RadialRangeBuilder<C2, K> {
        RadialRangeBuilder {
            radius_km: self.radius_km,
            center: self.center,
            full_bits: self.full_bits,
            subspace: self.subspace,
            config: self.config,
            codec,
            encoder: self.encoder,
        }
    }

    /// Use a different store key encoding.
    pub fn key_encoder<K2: KeyEncoder>(self, encoder: K2) -> RadialRangeBuilder<C, K2> {
        RadialRangeBuilder {
            radius_km: self.radius_km,
            center: self.center,
            full_bits: self.full_bits,
            subspace: self.subspace,
            config: self.config,
            codec: self.codec,
            encoder,
        }
    }

    /// Validate inputs according to the configuration and build the query.
    ///
    /// The configuration and key precision are always checked. Coordinates and
    /// radius are checked only in [`ValidationMode::Strict`]; in permissive
    /// mode problems are logged and the query is built anyway.
    pub fn build(self) -> Result<RadialRange<C, K>> {
        self.config.validate()?;
        let full_bits = self.full_bits.unwrap_or(self.config.full_bits);
        validate_precision(full_bits)?;

        let checked = validate_geographic_point(&self.center)
            .and_then(|()| validate_radius(self.radius_km, self.config.max_radius_km));

        match (self.config.validation, checked) {
            (_, Ok(())) => {}
            (ValidationMode::Strict, Err(e)) => return Err(e),
            (ValidationMode::Permissive, Err(e)) => {
                log::warn!("Planning radius query despite invalid input: {}", e);
            }
        }

        Ok(RadialRange::with_backends(
            self.radius_km,
            self.center,
            full_bits,
            self.config.precision,
            self.subspace,
            self.codec,
            self.encoder,
        ))
    }
}
