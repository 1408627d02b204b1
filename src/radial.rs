//! Radius queries over a geohash-ordered keyspace.
//!
//! The pipeline is: radius to query precision, query cell and neighbors to
//! key ranges, then sort and merge. The ranges bound a square block of cells
//! around the circle, so scan results must be post-filtered with
//! [`within_radius`].

use crate::codec::{GeohashCodec, IntegerGeohash};
use crate::compute::{neighbors, precision, validation};
use crate::error::Result;
use crate::spatial::haversine;
use crate::types::{HashRange, HashRanges, RadialRangeParams};

/// Key ranges to scan for all points within `params.radius` kilometers of
/// the center, using the bundled [`IntegerGeohash`] codec.
///
/// # Examples
///
/// ```rust
/// use zrange::{RadialRangeParams, radial_range, within_radius};
/// use zrange::codec::{GeohashCodec, IntegerGeohash};
///
/// let params = RadialRangeParams::new(2.0, 40.7128, -74.0060);
/// let ranges = radial_range(&params);
///
/// let key = IntegerGeohash.encode_with_precision(40.7200, -74.0000, 64);
/// assert!(ranges.contains(key));
/// assert!(within_radius(key, &params));
/// ```
pub fn radial_range(params: &RadialRangeParams) -> HashRanges {
    radial_range_with(&IntegerGeohash, params)
}

/// [`radial_range`] with a caller-supplied codec.
pub fn radial_range_with<C>(codec: &C, params: &RadialRangeParams) -> HashRanges
where
    C: GeohashCodec + ?Sized,
{
    let raw = find_neighbors_with_radius(codec, params);
    let raw_count = raw.len();
    let ranges = HashRanges::from_unsorted(raw);

    log::debug!(
        "Radial range ({}, {}) r={} km: {} candidate ranges merged into {}",
        params.latitude,
        params.longitude,
        params.radius,
        raw_count,
        ranges.len()
    );
    ranges
}

/// Unsorted, unmerged ranges for the query cell and its neighbors.
///
/// Use [`radial_range`] unless the raw expansion is needed, e.g. to apply a
/// different merge policy.
pub fn find_neighbors_with_radius<C>(codec: &C, params: &RadialRangeParams) -> Vec<HashRange>
where
    C: GeohashCodec + ?Sized,
{
    let params = params.with_defaults();
    let query_bits = precision::select_precision(params.radius);

    log::debug!(
        "Radius {} km selects {} query bits for a {} bit keyspace",
        params.radius,
        query_bits,
        params.bits_of_precision
    );

    neighbors::expand(
        codec,
        params.latitude,
        params.longitude,
        query_bits,
        params.bits_of_precision,
    )
}

/// Whether the cell `geohash_id` (at `params.bits_of_precision`) lies strictly
/// inside the query circle. The cell is represented by its center.
pub fn within_radius(geohash_id: u64, params: &RadialRangeParams) -> bool {
    within_radius_with(&IntegerGeohash, geohash_id, params)
}

/// [`within_radius`] with a caller-supplied codec.
pub fn within_radius_with<C>(codec: &C, geohash_id: u64, params: &RadialRangeParams) -> bool
where
    C: GeohashCodec + ?Sized,
{
    let params = params.with_defaults();
    let (latitude, longitude) = codec.decode_with_precision(geohash_id, params.bits_of_precision);
    let distance_km = haversine(params.latitude, params.longitude, latitude, longitude);

    distance_km < params.radius
}

impl RadialRangeParams {
    /// See [`radial_range`].
    pub fn radial_range(&self) -> HashRanges {
        radial_range(self)
    }

    /// Validate, then compute the ranges.
    pub fn try_radial_range(&self) -> Result<HashRanges> {
        self.validate()?;
        Ok(radial_range(self))
    }

    /// See [`within_radius`].
    pub fn within_radius(&self, geohash_id: u64) -> bool {
        within_radius(geohash_id, self)
    }

    /// Check coordinates, radius and precision.
    pub fn validate(&self) -> Result<()> {
        validation::validate_params(self)
    }
}
