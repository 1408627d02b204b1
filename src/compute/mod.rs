//! Range computation pipeline.
//!
//! Each stage is a pure function over owned values:
//! - `precision`: radius to query bit precision
//! - `neighbors`: query cell and its neighbors to raw key ranges
//! - `merge`: raw key ranges to sorted, fused ranges
//! - `validation`: optional input checks for untrusted parameters

pub mod merge;
pub mod neighbors;
pub mod precision;
pub mod validation;
