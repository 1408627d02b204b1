//! Geohash key ranges for radius queries over ordered key-value stores.
//!
//! Given a center and a radius in kilometers, [`radial_range`] returns the
//! sorted, merged key ranges that cover the circle in a geohash-ordered
//! keyspace. The ranges are a superset of the circle: filter scanned keys
//! with [`within_radius`].
//!
//! ```rust
//! use zrange::{RadialRangeParams, radial_range};
//!
//! let params = RadialRangeParams::new(5.0, 40.7128, -74.0060);
//! let ranges = radial_range(&params);
//!
//! for range in &ranges {
//!     // scan store keys in [range.min, range.max), then keep the hits
//!     assert!(range.min < range.max);
//! }
//! ```
//!
//! Two limitations follow from sizing the cell block by latitude span:
//!
//! - Radii above roughly 5,000 km fall back to the coarsest 4-bit cells and
//!   may miss points near the edge of the circle.
//! - Above 60° of latitude, longitude cells narrow to less than the latitude
//!   span, so points near the east and west edges of the circle may be missed.

pub mod codec;
pub mod compute;
pub mod error;
pub mod radial;
pub mod spatial;
pub mod types;

pub use codec::{GeohashCodec, IntegerGeohash};
pub use compute::merge::merge;
pub use compute::precision::{PrecisionTable, select_precision};
pub use error::{Result, ZRangeError};
pub use radial::{
    find_neighbors_with_radius, radial_range, radial_range_with, within_radius,
    within_radius_with,
};
pub use spatial::haversine;
pub use types::{DEFAULT_BITS_OF_PRECISION, HashRange, HashRanges, RadialRangeParams};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{
        GeohashCodec, HashRange, HashRanges, IntegerGeohash, RadialRangeParams, Result,
        ZRangeError, haversine, radial_range, within_radius,
    };

    pub use geo::Point;
}
