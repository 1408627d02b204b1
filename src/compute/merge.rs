//! Sorting and fusing of key ranges.
//!
//! The merge takes ownership of its input and compacts it in place, so the
//! returned vector reuses the caller's allocation.

use crate::types::HashRange;

/// Sort ranges ascending by their lower bound.
pub fn sort_min_asc(mut ranges: Vec<HashRange>) -> Vec<HashRange> {
    ranges.sort_unstable_by_key(|range| range.min);
    ranges
}

/// Fuse ranges that overlap or touch. Input must already be sorted by `min`.
///
/// Output ranges are ascending with a gap between every pair.
pub fn combine_ranges(mut ranges: Vec<HashRange>) -> Vec<HashRange> {
    if ranges.len() < 2 {
        return ranges;
    }

    let mut last = 0;
    for i in 1..ranges.len() {
        let next = ranges[i];
        let current = &mut ranges[last];

        if next.min <= current.max {
            current.max = current.max.max(next.max);
        } else {
            last += 1;
            ranges[last] = next;
        }
    }

    ranges.truncate(last + 1);
    ranges
}

/// Sort then combine.
///
/// # Examples
///
/// ```rust
/// use zrange::HashRange;
/// use zrange::compute::merge::merge;
///
/// let merged = merge(vec![
///     HashRange::new(30, 40),
///     HashRange::new(0, 10),
///     HashRange::new(10, 20),
///     HashRange::new(0, 10),
/// ]);
/// assert_eq!(merged, vec![HashRange::new(0, 20), HashRange::new(30, 40)]);
/// ```
pub fn merge(ranges: Vec<HashRange>) -> Vec<HashRange> {
    combine_ranges(sort_min_asc(ranges))
}
