//! Error types for zrange.
//!
//! The range pipeline itself never fails. These errors come from the opt-in
//! surfaces: input validation, parameter parsing and base32 geohash interop.

use thiserror::Error;

/// Result type alias using [`ZRangeError`].
pub type Result<T> = std::result::Result<T, ZRangeError>;

#[derive(Error, Debug)]
pub enum ZRangeError {
    /// Coordinates, radius or precision outside the accepted domain
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A base32 geohash string or cell that cannot be converted
    #[error("Invalid geohash: {0}")]
    InvalidGeohash(String),

    /// Parameter parsing from JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parameter parsing from TOML
    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ZRangeError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ZRangeError::InvalidInput(msg.into())
    }

    pub fn invalid_geohash(msg: impl Into<String>) -> Self {
        ZRangeError::InvalidGeohash(msg.into())
    }
}

impl From<geohash::GeohashError> for ZRangeError {
    fn from(err: geohash::GeohashError) -> Self {
        ZRangeError::InvalidGeohash(err.to_string())
    }
}
