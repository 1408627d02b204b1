//! Integer geohash codec.
//!
//! The range pipeline only talks to the codec through [`GeohashCodec`], so a
//! store that already owns an encoder can plug it in. [`IntegerGeohash`] is the
//! bundled implementation: latitude and longitude are each quantised to 32
//! bits and interleaved with longitude in the most significant position, which
//! keeps a `5 * n` bit cell identical to the base32 geohash of length `n`.

use crate::error::{Result, ZRangeError};
use geo::{Point, Rect, coord};
use smallvec::SmallVec;

/// Up to eight grid neighbors of a cell.
pub type Neighbors = SmallVec<[u64; 8]>;

/// Geohash operations required by the range pipeline.
pub trait GeohashCodec {
    /// Encode a coordinate into a cell id of `bits` significant bits.
    fn encode_with_precision(&self, latitude: f64, longitude: f64, bits: u32) -> u64;

    /// Decode a cell id into the `(latitude, longitude)` of its center.
    fn decode_with_precision(&self, cell: u64, bits: u32) -> (f64, f64);

    /// Cells adjacent to `cell` at the same precision. Degenerate positions
    /// (beyond a pole) may yield fewer than eight.
    fn neighbors_with_precision(&self, cell: u64, bits: u32) -> Neighbors;
}

/// Z-order integer geohash, compatible with base32 geohash strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerGeohash;

const EXP_2_32: f64 = 4_294_967_296.0;

// N, NE, E, SE, S, SW, W, NW as (lat steps, lon steps)
const DIRECTIONS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (1.0, 1.0),
    (0.0, 1.0),
    (-1.0, 1.0),
    (-1.0, 0.0),
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
];

impl IntegerGeohash {
    /// Bounding box of a cell. x is longitude, y is latitude.
    ///
    /// ```
    /// use zrange::codec::IntegerGeohash;
    ///
    /// // Two bits split the globe into four quadrants; cell 0 is the south-west one.
    /// let rect = IntegerGeohash.cell_bounds(0, 2);
    /// assert_eq!(rect.min().x, -180.0);
    /// assert_eq!(rect.min().y, -90.0);
    /// assert_eq!(rect.max().x, 0.0);
    /// assert_eq!(rect.max().y, 0.0);
    /// ```
    pub fn cell_bounds(&self, cell: u64, bits: u32) -> Rect {
        let bits = bits.min(u64::BITS);
        let aligned = cell.checked_shl(u64::BITS - bits).unwrap_or(0);
        let (lat_int, lon_int) = deinterleave(aligned);

        let lat_bits = bits / 2;
        let lon_bits = bits - lat_bits;

        let min_lat = decode_range(lat_int, 90.0);
        let min_lon = decode_range(lon_int, 180.0);
        let lat_span = 180.0 / 2f64.powi(lat_bits as i32);
        let lon_span = 360.0 / 2f64.powi(lon_bits as i32);

        Rect::new(
            coord! { x: min_lon, y: min_lat },
            coord! { x: min_lon + lon_span, y: min_lat + lat_span },
        )
    }

    /// Cell center as a `geo::Point`.
    pub fn decode_point(&self, cell: u64, bits: u32) -> Point {
        let (lat, lon) = self.decode_with_precision(cell, bits);
        Point::new(lon, lat)
    }
}

impl GeohashCodec for IntegerGeohash {
    fn encode_with_precision(&self, latitude: f64, longitude: f64, bits: u32) -> u64 {
        let full = interleave(encode_range(latitude, 90.0), encode_range(longitude, 180.0));
        full.checked_shr(u64::BITS - bits.min(u64::BITS)).unwrap_or(0)
    }

    fn decode_with_precision(&self, cell: u64, bits: u32) -> (f64, f64) {
        let center = self.cell_bounds(cell, bits).center();
        (center.y, center.x)
    }

    fn neighbors_with_precision(&self, cell: u64, bits: u32) -> Neighbors {
        let rect = self.cell_bounds(cell, bits);
        let center = rect.center();
        let (lat_span, lon_span) = (rect.height(), rect.width());

        let mut neighbors = Neighbors::new();
        for (lat_step, lon_step) in DIRECTIONS {
            let lat = center.y + lat_step * lat_span;
            if !(-90.0..=90.0).contains(&lat) {
                continue;
            }
            let lon = wrap_longitude(center.x + lon_step * lon_span);
            neighbors.push(self.encode_with_precision(lat, lon, bits));
        }
        neighbors
    }
}

/// Convert a cell to its base32 geohash string. `bits` must be a multiple of 5.
///
/// ```
/// use zrange::codec::{cell_to_geohash, geohash_to_cell};
///
/// let (cell, bits) = geohash_to_cell("u4pruydqqvj").unwrap();
/// assert_eq!(bits, 55);
/// assert_eq!(cell_to_geohash(cell, bits).unwrap(), "u4pruydqqvj");
/// ```
pub fn cell_to_geohash(cell: u64, bits: u32) -> Result<String> {
    if bits == 0 || bits % 5 != 0 || bits > 60 {
        return Err(ZRangeError::invalid_geohash(format!(
            "bit precision {} is not a multiple of 5 between 5 and 60",
            bits
        )));
    }
    if bits < u64::BITS && cell >> bits != 0 {
        return Err(ZRangeError::invalid_geohash(format!(
            "cell {} does not fit in {} bits",
            cell, bits
        )));
    }

    let center = IntegerGeohash.decode_point(cell, bits);
    let geohash = geohash::encode(
        geohash::Coord {
            x: center.x(),
            y: center.y(),
        },
        (bits / 5) as usize,
    )?;
    Ok(geohash)
}

/// Convert a base32 geohash string into `(cell, bits)`.
pub fn geohash_to_cell(geohash: &str) -> Result<(u64, u32)> {
    let bits = geohash.len() as u32 * 5;
    if bits == 0 || bits > 60 {
        return Err(ZRangeError::invalid_geohash(format!(
            "geohash length {} outside 1-12",
            geohash.len()
        )));
    }

    let (center, _, _) = geohash::decode(geohash)?;
    let cell = IntegerGeohash.encode_with_precision(center.y, center.x, bits);
    Ok((cell, bits))
}

#[inline]
fn encode_range(value: f64, half_extent: f64) -> u32 {
    let p = (value + half_extent) / (2.0 * half_extent);
    // Float-to-int casts saturate, which pins +90/+180 to the last cell.
    (p * EXP_2_32) as u32
}

#[inline]
fn decode_range(value: u32, half_extent: f64) -> f64 {
    let p = f64::from(value) / EXP_2_32;
    2.0 * half_extent * p - half_extent
}

fn wrap_longitude(lon: f64) -> f64 {
    if lon >= 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

#[inline]
fn spread(x: u32) -> u64 {
    let mut x = u64::from(x);
    x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & 0x5555_5555_5555_5555;
    x
}

#[inline]
fn squash(x: u64) -> u32 {
    let mut x = x & 0x5555_5555_5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x | (x >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x >> 4)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x >> 8)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x >> 16)) & 0x0000_0000_FFFF_FFFF;
    x as u32
}

/// Latitude on even bits, longitude on odd bits.
#[inline]
fn interleave(lat: u32, lon: u32) -> u64 {
    spread(lat) | (spread(lon) << 1)
}

#[inline]
fn deinterleave(hash: u64) -> (u32, u32) {
    (squash(hash), squash(hash >> 1))
}
