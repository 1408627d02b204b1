//! Range and query parameter types.
//!
//! [`HashRange`] is a half-open interval over the geohash keyspace,
//! [`HashRanges`] is the merged, scan-ready output of a radius query and
//! [`RadialRangeParams`] describes the query itself.

use crate::compute::merge;
use crate::error::Result;
use geo::Point;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Bit precision used when none is configured.
pub const DEFAULT_BITS_OF_PRECISION: u32 = 64;

/// A half-open key range `[min, max)` of geohash integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashRange {
    pub min: u64,
    pub max: u64,
}

impl HashRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Expand a cell into the range of keys it covers `bits_diff` bits finer.
    ///
    /// Returns `None` when the upper bound does not fit in a `u64`, which
    /// happens for the last cell of the keyspace at 64-bit target precision.
    ///
    /// ```
    /// use zrange::HashRange;
    ///
    /// assert_eq!(HashRange::from_cell(3, 4), Some(HashRange::new(48, 64)));
    /// assert_eq!(HashRange::from_cell(u64::MAX >> 60, 60), None);
    /// ```
    pub fn from_cell(cell: u64, bits_diff: u32) -> Option<Self> {
        if bits_diff >= u64::BITS {
            return None;
        }
        let min = cell << bits_diff;
        let max = cell.wrapping_add(1) << bits_diff;
        (min < max).then_some(Self { min, max })
    }

    /// Whether `key` falls inside the range.
    #[inline]
    pub fn contains(&self, key: u64) -> bool {
        self.min <= key && key < self.max
    }

    /// Number of keys covered.
    #[inline]
    pub fn len(&self) -> u64 {
        self.max.saturating_sub(self.min)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max <= self.min
    }
}

/// Sorted, non-overlapping, non-adjacent key ranges.
///
/// Only produced by merging, so every value upholds the ordering invariant
/// and adjacent ranges have already been fused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HashRanges(Vec<HashRange>);

impl HashRanges {
    /// Sort and merge an arbitrary set of ranges.
    ///
    /// ```
    /// use zrange::{HashRange, HashRanges};
    ///
    /// let ranges = HashRanges::from_unsorted(vec![
    ///     HashRange::new(20, 30),
    ///     HashRange::new(0, 10),
    ///     HashRange::new(10, 20),
    /// ]);
    /// assert_eq!(ranges.as_slice(), &[HashRange::new(0, 30)]);
    /// ```
    pub fn from_unsorted(ranges: Vec<HashRange>) -> Self {
        Self(merge::merge(ranges))
    }

    /// Whether any range contains `key`.
    pub fn contains(&self, key: u64) -> bool {
        let idx = self.0.partition_point(|range| range.max <= key);
        self.0.get(idx).is_some_and(|range| range.contains(key))
    }

    /// Total number of keys covered by all ranges.
    pub fn key_count(&self) -> u128 {
        self.0.iter().map(|range| u128::from(range.len())).sum()
    }

    pub fn as_slice(&self) -> &[HashRange] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<HashRange> {
        self.0
    }
}

impl Deref for HashRanges {
    type Target = [HashRange];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for HashRanges {
    type Item = HashRange;
    type IntoIter = std::vec::IntoIter<HashRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a HashRanges {
    type Item = &'a HashRange;
    type IntoIter = std::slice::Iter<'a, HashRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<HashRanges> for Vec<HashRange> {
    fn from(ranges: HashRanges) -> Self {
        ranges.0
    }
}

/// Radius query descriptor.
///
/// `bits_of_precision` is the bit width of the keys stored in the target
/// keyspace; zero means [`DEFAULT_BITS_OF_PRECISION`]. All builder methods
/// return a new value.
///
/// # Example
///
/// ```rust
/// use zrange::RadialRangeParams;
///
/// let params = RadialRangeParams::new(10.0, 40.7128, -74.0060);
/// assert_eq!(params.with_defaults().bits_of_precision, 64);
///
/// let json = r#"{
///     "bits_of_precision": 52,
///     "radius": 2.5,
///     "latitude": 51.5074,
///     "longitude": -0.1278
/// }"#;
/// let params = RadialRangeParams::from_json_str(json).unwrap();
/// assert_eq!(params.bits_of_precision, 52);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RadialRangeParams {
    /// Bit precision of the keys being scanned (1-64, default: 64)
    #[serde(default = "RadialRangeParams::default_bits_of_precision")]
    pub bits_of_precision: u32,

    /// Search radius in kilometers
    pub radius: f64,

    pub latitude: f64,

    pub longitude: f64,
}

impl RadialRangeParams {
    const fn default_bits_of_precision() -> u32 {
        DEFAULT_BITS_OF_PRECISION
    }

    pub fn new(radius: f64, latitude: f64, longitude: f64) -> Self {
        Self {
            bits_of_precision: DEFAULT_BITS_OF_PRECISION,
            radius,
            latitude,
            longitude,
        }
    }

    /// Build from a `geo::Point` (x = longitude, y = latitude).
    pub fn from_point(center: Point, radius: f64) -> Self {
        Self::new(radius, center.y(), center.x())
    }

    pub fn with_bits_of_precision(mut self, bits: u32) -> Self {
        self.bits_of_precision = bits;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_center(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Copy with unset fields filled in.
    pub fn with_defaults(self) -> Self {
        if self.bits_of_precision == 0 {
            return self.with_bits_of_precision(DEFAULT_BITS_OF_PRECISION);
        }
        self
    }

    /// Query center as a `geo::Point`.
    pub fn center(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }
}

impl Default for RadialRangeParams {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
