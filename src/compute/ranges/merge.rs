//! Range coalescing.

use georange_types::range::HashRange;

/// Sort ranges by lower bound and fuse every pair that overlaps, nests or
/// touches.
///
/// The result is sorted, pairwise disjoint, no two ranges are adjacent, and
/// it covers exactly the codes the input covered. Empty input gives empty
/// output. Input ranges must satisfy `min <= max`.
///
/// # Examples
///
/// ```
/// use georange::compute::ranges::merge;
/// use georange_types::range::HashRange;
///
/// let merged = merge(vec![
///     HashRange::new(20, 30),
///     HashRange::new(0, 10),
///     HashRange::new(10, 20),
///     HashRange::new(40, 50),
///     HashRange::new(40, 50),
/// ]);
/// assert_eq!(merged, vec![HashRange::new(0, 30), HashRange::new(40, 50)]);
/// ```
pub fn merge(mut ranges: Vec<HashRange>) -> Vec<HashRange> {
    ranges.sort_unstable_by_key(|range| range.min);

    let mut iter = ranges.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::new();
    for next in iter {
        if next.max <= current.max {
            // Duplicate or nested: already covered.
        } else if next.min <= current.max {
            // Overlapping, or adjacent when `next.min == current.max`.
            current.max = next.max;
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(merge(Vec::new()).is_empty());
    }

    #[test]
    fn test_single_range_is_emitted() {
        assert_eq!(merge(vec![HashRange::new(3, 9)]), vec![HashRange::new(3, 9)]);
    }

    #[test]
    fn test_adjacent_ranges_fuse() {
        let merged = merge(vec![
            HashRange::new(8, 12),
            HashRange::new(0, 4),
            HashRange::new(4, 8),
        ]);
        assert_eq!(merged, vec![HashRange::new(0, 12)]);
    }

    #[test]
    fn test_duplicates_absorbed() {
        let merged = merge(vec![
            HashRange::new(0, 4),
            HashRange::new(0, 4),
            HashRange::new(4, 8),
            HashRange::new(4, 8),
        ]);
        assert_eq!(merged, vec![HashRange::new(0, 8)]);
    }

    #[test]
    fn test_nested_and_overlapping() {
        let merged = merge(vec![
            HashRange::new(0, 10),
            HashRange::new(2, 5),
            HashRange::new(8, 15),
            HashRange::new(20, 25),
        ]);
        assert_eq!(merged, vec![HashRange::new(0, 15), HashRange::new(20, 25)]);
    }

    #[test]
    fn test_gaps_are_preserved() {
        let merged = merge(vec![HashRange::new(5, 6), HashRange::new(0, 4)]);
        assert_eq!(merged, vec![HashRange::new(0, 4), HashRange::new(5, 6)]);
    }

    #[test]
    fn test_range_ending_at_u64_max() {
        let merged = merge(vec![
            HashRange::new(u64::MAX - 1, u64::MAX),
            HashRange::new(u64::MAX - 4, u64::MAX - 1),
        ]);
        assert_eq!(merged, vec![HashRange::new(u64::MAX - 4, u64::MAX)]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let once = merge(vec![
            HashRange::new(30, 40),
            HashRange::new(0, 10),
            HashRange::new(5, 12),
            HashRange::new(12, 13),
        ]);
        assert_eq!(merge(once.clone()), once);
    }
}
