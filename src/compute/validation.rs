//! Validation for radius query parameters.
//!
//! The range pipeline assumes well-formed input. Callers handling untrusted
//! parameters run these checks first (see `RadialRangeParams::validate`).

use crate::error::{Result, ZRangeError};
use crate::types::RadialRangeParams;

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// `value` must be a finite number of degrees no further than `limit` from zero.
fn check_degrees(axis: &str, value: f64, limit: f64) -> Result<()> {
    if value.is_finite() && value.abs() <= limit {
        return Ok(());
    }
    Err(ZRangeError::invalid_input(format!(
        "{} must be finite and within ±{} degrees, got: {}",
        axis, limit, value
    )))
}

/// Validates a search radius in kilometers: finite and non-negative.
pub fn validate_radius(radius_km: f64) -> Result<()> {
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(ZRangeError::InvalidInput(format!(
            "Radius must be a finite, non-negative number of kilometers, got: {}",
            radius_km
        )));
    }
    Ok(())
}

/// Validates a keyspace bit precision. Zero is accepted and means the default.
pub fn validate_bits_of_precision(bits: u32) -> Result<()> {
    if bits > u64::BITS {
        return Err(ZRangeError::InvalidInput(format!(
            "Bits of precision must be between 1 and 64, got: {}",
            bits
        )));
    }
    Ok(())
}

/// Validates every field of a radius query.
///
/// ```
/// use zrange::RadialRangeParams;
/// use zrange::compute::validation::validate_params;
///
/// assert!(validate_params(&RadialRangeParams::new(2.0, 40.7128, -74.0060)).is_ok());
/// assert!(validate_params(&RadialRangeParams::new(2.0, 40.7128, 200.0)).is_err());
/// ```
pub fn validate_params(params: &RadialRangeParams) -> Result<()> {
    validate_bits_of_precision(params.bits_of_precision)?;
    validate_radius(params.radius)?;
    check_degrees("Latitude", params.latitude, MAX_LATITUDE)?;
    check_degrees("Longitude", params.longitude, MAX_LONGITUDE)
}
