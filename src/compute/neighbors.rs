//! Expansion of the query cell and its neighbors into key ranges.

use crate::codec::GeohashCodec;
use crate::types::HashRange;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// The query cell plus its (up to) eight neighbors.
pub type CandidateCells = SmallVec<[u64; 9]>;

/// Query cell followed by its distinct neighbors at `query_bits`.
pub fn candidate_cells<C>(
    codec: &C,
    latitude: f64,
    longitude: f64,
    query_bits: u32,
) -> CandidateCells
where
    C: GeohashCodec + ?Sized,
{
    let query_cell = codec.encode_with_precision(latitude, longitude, query_bits);

    let mut seen = FxHashSet::default();
    seen.reserve(9);
    seen.insert(query_cell);

    let mut cells = CandidateCells::new();
    cells.push(query_cell);
    for neighbor in codec.neighbors_with_precision(query_cell, query_bits) {
        if seen.insert(neighbor) {
            cells.push(neighbor);
        }
    }
    cells
}

/// Shift each cell into the key range it covers `bits_diff` bits finer.
///
/// Cells whose upper bound overflows are dropped; this only happens for the
/// last cell of a 64-bit keyspace, at the north-east corner of the map.
pub fn shift_into_ranges(cells: &[u64], bits_diff: u32) -> Vec<HashRange> {
    let mut ranges = Vec::with_capacity(cells.len());

    for &cell in cells {
        match HashRange::from_cell(cell, bits_diff) {
            Some(range) => ranges.push(range),
            None => log::trace!(
                "Dropping cell {:#x}: shift by {} overflows the keyspace",
                cell,
                bits_diff
            ),
        }
    }

    ranges
}

/// Unsorted, unmerged key ranges at `target_bits` covering the query cell
/// at `query_bits` and its neighbors.
///
/// `query_bits` is clamped to `target_bits`.
pub fn expand<C>(
    codec: &C,
    latitude: f64,
    longitude: f64,
    query_bits: u32,
    target_bits: u32,
) -> Vec<HashRange>
where
    C: GeohashCodec + ?Sized,
{
    let query_bits = if query_bits > target_bits {
        log::warn!(
            "Query precision {} bits is finer than the {} bit keyspace; using {} bits",
            query_bits,
            target_bits,
            target_bits
        );
        target_bits
    } else {
        query_bits
    };

    let cells = candidate_cells(codec, latitude, longitude, query_bits);
    shift_into_ranges(&cells, target_bits - query_bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::IntegerGeohash;

    #[test]
    fn test_candidate_cells_start_with_query_cell() {
        let codec = IntegerGeohash;
        let cells = candidate_cells(&codec, 40.7128, -74.0060, 20);

        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], codec.encode_with_precision(40.7128, -74.0060, 20));

        let mut unique = cells.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 9);
    }

    #[test]
    fn test_candidate_cells_dedupe_at_coarse_precision() {
        // At two bits the globe is 2x2, so east and west wrap to the same cell.
        let cells = candidate_cells(&IntegerGeohash, 45.0, 90.0, 2);
        assert!(cells.len() < 9);
        let mut unique = cells.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), cells.len());
    }

    #[test]
    fn test_shift_into_ranges() {
        let ranges = shift_into_ranges(&[0, 1, 5], 8);
        assert_eq!(
            ranges,
            vec![
                HashRange::new(0, 256),
                HashRange::new(256, 512),
                HashRange::new(1280, 1536),
            ]
        );
    }

    #[test]
    fn test_shift_drops_overflowing_cell() {
        let ranges = shift_into_ranges(&[0b1111, 0b1110, 0], 60);
        assert_eq!(ranges.len(), 2);
        assert!(ranges.iter().all(|r| r.min < r.max));
    }

    #[test]
    fn test_expand_covers_query_point() {
        let codec = IntegerGeohash;
        let ranges = expand(&codec, 51.5074, -0.1278, 24, 64);
        let key = codec.encode_with_precision(51.5074, -0.1278, 64);

        assert_eq!(ranges.len(), 9);
        assert!(ranges.iter().any(|r| r.contains(key)));
        for range in &ranges {
            assert_eq!(range.len(), 1 << 40);
        }
    }

    #[test]
    fn test_expand_clamps_query_bits() {
        let codec = IntegerGeohash;
        let ranges = expand(&codec, 10.0, 10.0, 40, 32);
        let key = codec.encode_with_precision(10.0, 10.0, 32);

        assert!(ranges.iter().all(|r| r.len() == 1));
        assert!(ranges.iter().any(|r| r.contains(key)));
    }

    #[test]
    fn test_expand_north_east_corner() {
        let codec = IntegerGeohash;
        let ranges = expand(&codec, 90.0, 180.0, 4, 64);
        let corner = codec.encode_with_precision(90.0, 180.0, 4);

        // The corner cell itself overflows, its neighbors survive.
        assert!(!ranges.is_empty());
        assert!(ranges.iter().all(|r| r.min < r.max));
        assert!(!ranges.iter().any(|r| r.min == corner << 60));
    }
}
