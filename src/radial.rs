//! Radius queries as key ranges.
//!
//! [`RadialRange`] ties the planner to a codec, a key encoder and a subspace:
//! it turns `(radius, latitude, longitude)` into the [`KeyRange`]s to scan and
//! filters scanned keys back down to the true circle.

use crate::codec::{IntGeohash, KeyEncoder, SpatialCodec, TupleKeyEncoder};
use crate::compute::ranges::{self, MAX_RANGE_BITS, PrecisionPolicy};
use crate::error::Result;
use crate::subspace::Subspace;
use bytes::Bytes;
use geo::Point;
use georange_types::range::{HashRange, KeyRange};

/// A planned radius query.
///
/// Construct one directly with [`RadialRange::new`] (no validation, the
/// planner is total over any input) or through
/// [`RadialRangeBuilder`](crate::RadialRangeBuilder) to validate inputs and
/// plug in other codecs.
///
/// # Examples
///
/// ```rust
/// use georange::{RadialRange, Subspace};
///
/// let query = RadialRange::new(50.0, 40.0, -75.0)
///     .with_subspace(Subspace::from_tuple(&["places".into()]));
///
/// let ranges = query.key_ranges();
/// assert!(!ranges.is_empty());
///
/// let key = georange::point_key(query.subspace(), &query.center(), 64);
/// assert!(ranges.iter().any(|range| range.contains(&key)));
/// assert!(query.contains_key(&key).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct RadialRange<C = IntGeohash, K = TupleKeyEncoder> {
    center: Point,
    radius_km: f64,
    full_bits: u32,
    policy: PrecisionPolicy,
    subspace: Subspace,
    codec: C,
    encoder: K,
}

impl RadialRange {
    /// Query around `(latitude, longitude)` with 64-bit keys in the empty
    /// subspace.
    ///
    /// Uses [`PrecisionPolicy::Covering`], which may search coarser cells than
    /// the plain width table (16 bits instead of 18 for 50 km at latitude 40).
    /// Call [`with_precision_policy`](Self::with_precision_policy) with
    /// [`PrecisionPolicy::Equatorial`] to plan exactly as the table does.
    pub fn new(radius_km: f64, latitude: f64, longitude: f64) -> Self {
        Self::with_backends(
            radius_km,
            Point::new(longitude, latitude),
            MAX_RANGE_BITS,
            PrecisionPolicy::default(),
            Subspace::new(),
            IntGeohash,
            TupleKeyEncoder,
        )
    }
}

impl<C: SpatialCodec, K: KeyEncoder> RadialRange<C, K> {
    pub(crate) fn with_backends(
        radius_km: f64,
        center: Point,
        full_bits: u32,
        policy: PrecisionPolicy,
        subspace: Subspace,
        codec: C,
        encoder: K,
    ) -> Self {
        Self {
            center,
            radius_km,
            full_bits,
            policy,
            subspace,
            codec,
            encoder,
        }
    }

    /// Prefix every emitted key with `subspace`.
    pub fn with_subspace(mut self, subspace: Subspace) -> Self {
        self.subspace = subspace;
        self
    }

    /// Precision the stored keys were written with.
    pub fn with_full_bits(mut self, full_bits: u32) -> Self {
        self.full_bits = full_bits;
        self
    }

    /// How the search precision is derived from the radius.
    pub fn with_precision_policy(mut self, policy: PrecisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn full_bits(&self) -> u32 {
        self.full_bits
    }

    pub fn precision_policy(&self) -> PrecisionPolicy {
        self.policy
    }

    pub fn subspace(&self) -> &Subspace {
        &self.subspace
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Precision of the cells the query searches.
    pub fn range_bits(&self) -> u32 {
        ranges::range_bits(self.radius_km, self.center.y(), self.full_bits, self.policy)
    }

    /// Sorted, disjoint ranges of `full_bits` codes covering the circle.
    pub fn hash_ranges(&self) -> Vec<HashRange> {
        ranges::radial_hash_ranges(
            &self.codec,
            &self.center,
            self.radius_km,
            self.full_bits,
            self.policy,
        )
    }

    /// [`hash_ranges`](Self::hash_ranges) encoded as store keys.
    pub fn key_ranges(&self) -> Vec<KeyRange> {
        self.hash_ranges()
            .into_iter()
            .map(|range| {
                KeyRange::new(
                    self.encoder.encode_key(&self.subspace, range.min),
                    self.encoder.encode_key(&self.subspace, range.max),
                )
            })
            .collect()
    }

    /// Returns `true` if the `full_bits` code lies strictly inside the radius.
    pub fn within_radius(&self, code: u64) -> bool {
        ranges::within_radius(
            &self.codec,
            code,
            self.full_bits,
            &self.center,
            self.radius_km,
        )
    }

    /// Decode a scanned key and apply [`within_radius`](Self::within_radius).
    ///
    /// # Errors
    ///
    /// Fails if the key is outside the subspace or does not end in an
    /// unsigned integer.
    pub fn contains_key(&self, key: &[u8]) -> Result<bool> {
        let code = self.encoder.decode_key(&self.subspace, key)?;
        Ok(self.within_radius(code))
    }

    /// Store key for `point` using this query's codec, encoder and subspace.
    pub fn key_for(&self, point: &Point) -> Bytes {
        let code = self.codec.encode(point, self.full_bits);
        self.encoder.encode_key(&self.subspace, code)
    }
}

/// Key ranges for a radius query with 64-bit keys in the empty subspace.
///
/// Plans with the default [`PrecisionPolicy::Covering`], not the table-only
/// [`PrecisionPolicy::Equatorial`] algorithm, so results can differ from
/// other geohash range planners: coarser cells, an extra polar row near the
/// poles, and a last cell that stops one code short instead of vanishing.
///
/// ```
/// let ranges = georange::radial_range(50.0, 40.0, -75.0);
/// assert!(!ranges.is_empty() && ranges.len() <= 9);
/// ```
pub fn radial_range(radius_km: f64, latitude: f64, longitude: f64) -> Vec<KeyRange> {
    RadialRange::new(radius_km, latitude, longitude).key_ranges()
}

/// Store key for `point` with the default codec and key encoder.
pub fn point_key(subspace: &Subspace, point: &Point, full_bits: u32) -> Bytes {
    let code = IntGeohash.encode(point, full_bits);
    TupleKeyEncoder.encode_key(subspace, code)
}
