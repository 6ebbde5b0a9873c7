//! Strip partitioning of a column range across workers.

use std::ops::Range;

/// Split `columns` into `workers` contiguous strips.
///
/// Every strip but the last spans `⌊len / workers⌋` columns; the last
/// strip absorbs the remainder, so the strips cover `columns` exactly
/// with no gaps or overlaps. When there are more workers than columns
/// the leading strips are empty.
///
/// `workers` must be at least 1.
pub fn strip_bounds(columns: Range<u32>, workers: usize) -> Vec<Range<u32>> {
    debug_assert!(workers > 0, "strip_bounds needs at least one worker");
    let base = columns.start as u64;
    let len = columns.end.saturating_sub(columns.start) as u64;
    let per = len / workers as u64;
    (0..workers as u64)
        .map(|i| {
            let start = base + i * per;
            let end = if i + 1 == workers as u64 {
                columns.end as u64
            } else {
                start + per
            };
            start as u32..end as u32
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn remainder_goes_to_last_strip() {
        assert_eq!(strip_bounds(0..8, 3), vec![0..2, 2..4, 4..8]);
    }

    #[test]
    fn even_split() {
        assert_eq!(strip_bounds(0..16, 4), vec![0..4, 4..8, 8..12, 12..16]);
    }

    #[test]
    fn single_worker_takes_everything() {
        assert_eq!(strip_bounds(3..9, 1), vec![3..9]);
    }

    #[test]
    fn offset_range() {
        assert_eq!(strip_bounds(10..17, 2), vec![10..13, 13..17]);
    }

    #[test]
    fn more_workers_than_columns() {
        assert_eq!(strip_bounds(0..2, 4), vec![0..0, 0..0, 0..0, 0..2]);
    }

    proptest! {
        #[test]
        fn strips_cover_range_exactly(
            start in 0u32..1000,
            len in 0u32..1000,
            workers in 1usize..64,
        ) {
            let columns = start..start + len;
            let strips = strip_bounds(columns.clone(), workers);
            prop_assert_eq!(strips.len(), workers);
            prop_assert_eq!(strips[0].start, columns.start);
            prop_assert_eq!(strips[workers - 1].end, columns.end);
            for pair in strips.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
            }
            let covered: u32 = strips.iter().map(|s| s.end - s.start).sum();
            prop_assert_eq!(covered, len);
        }
    }
}
