//! Radius to bit precision mapping.
//!
//! A cell at `b` bits spans `180 / 2^(b/2)` degrees of latitude, or
//! `π·a / 2^(b/2)` kilometers. The selector picks the finest even precision
//! whose span still exceeds the radius, and the 3x3 block around the query
//! cell then reaches at least one span north and south of the center.
//!
//! East-west the block reaches one cell width, which is `2·span·cos(latitude)`
//! kilometers. Below 60° of latitude that is always more than the span. Closer
//! to the poles it can fall below the radius, and points near the east and
//! west edges of the circle may be missing from the ranges.

use crate::spatial::EARTH_HALF_CIRCUMFERENCE_KM;
use once_cell::sync::Lazy;

/// Coarsest precision the selector returns.
pub const MIN_QUERY_BITS: u32 = 4;

/// Finest precision the selector returns.
pub const MAX_QUERY_BITS: u32 = 64;

static PRECISION_TABLE: Lazy<PrecisionTable> = Lazy::new(PrecisionTable::build);

/// Radius thresholds in kilometers, index `i` for bit precision `2 * i + 4`.
///
/// Strictly decreasing; each entry is half of the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionTable {
    thresholds: Vec<f64>,
}

impl PrecisionTable {
    fn build() -> Self {
        let capacity = ((MAX_QUERY_BITS - MIN_QUERY_BITS) / 2 + 1) as usize;
        let mut thresholds = Vec::with_capacity(capacity);
        // Latitude span of a 2-bit cell.
        let mut bound = EARTH_HALF_CIRCUMFERENCE_KM / 2.0;
        let mut bits = MIN_QUERY_BITS;
        while bits <= MAX_QUERY_BITS {
            bound /= 2.0;
            thresholds.push(bound);
            bits += 2;
        }
        Self { thresholds }
    }

    /// The process-wide table, computed on first use.
    pub fn global() -> &'static PrecisionTable {
        &PRECISION_TABLE
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Largest radius, in kilometers, that `bits` precision covers.
    pub fn threshold_for(&self, bits: u32) -> Option<f64> {
        if bits < MIN_QUERY_BITS || bits % 2 != 0 {
            return None;
        }
        self.thresholds
            .get(((bits - MIN_QUERY_BITS) / 2) as usize)
            .copied()
    }

    /// Pick the query precision for `radius_km`.
    ///
    /// Radii at or above the 4-bit threshold (about 5,009 km) fall back to
    /// 4 bits and can miss points near the edge of the circle.
    pub fn select(&self, radius_km: f64) -> u32 {
        for (i, threshold) in self.thresholds.iter().enumerate().rev() {
            if radius_km < *threshold {
                return 2 * i as u32 + MIN_QUERY_BITS;
            }
        }

        log::warn!(
            "Radius {} km exceeds the {:.0} km covered at {} bits; results may be incomplete",
            radius_km,
            self.thresholds[0],
            MIN_QUERY_BITS
        );
        MIN_QUERY_BITS
    }
}

/// Select the query bit precision for `radius_km` using the global table.
///
/// # Examples
///
/// ```rust
/// use zrange::compute::precision::select_precision;
///
/// assert_eq!(select_precision(5000.0), 4);
/// assert_eq!(select_precision(1.0), 28);
/// assert!(select_precision(0.001) > select_precision(1.0));
/// ```
pub fn select_precision(radius_km: f64) -> u32 {
    PrecisionTable::global().select(radius_km)
}
