//! Static partitioning of the output matrix across workers.

use std::ops::Range;

pub const MIN_BLOCK_SIZE: usize = 32;
pub const MAX_BLOCK_SIZE: usize = 256;
pub const DEFAULT_BLOCK_SIZE: usize = 64;

/// Splits `0..len` into `workers` contiguous half-open ranges.
///
/// Every range but the last holds `len / workers` items; the last one also
/// absorbs the remainder. With more workers than items the leading ranges
/// are empty. `workers` must be at least 1.
pub fn split_even(len: usize, workers: usize) -> Vec<Range<usize>> {
    let per_worker = len / workers;
    (0..workers)
        .map(|p| {
            let start = p * per_worker;
            let end = if p == workers - 1 {
                len
            } else {
                (p + 1) * per_worker
            };
            start..end
        })
        .collect()
}

/// Row ranges of an N×N result matrix, one per worker.
pub fn row_partitions(n: usize, workers: usize) -> Vec<Range<usize>> {
    split_even(n, workers)
}

/// Number of tiles along one edge of an N×N matrix cut into
/// `block_size`-wide tiles.
pub fn tiles_per_edge(n: usize, block_size: usize) -> usize {
    n.div_ceil(block_size)
}

/// Ranges over the flattened tile index space, one per worker.
///
/// Tile `t` covers tile row `t / tiles_per_edge` and tile column
/// `t % tiles_per_edge`.
pub fn tile_partitions(n: usize, block_size: usize, workers: usize) -> Vec<Range<usize>> {
    let edge = tiles_per_edge(n, block_size);
    split_even(edge * edge, workers)
}

/// Turns the hardware collaborator's block-size hint into the tile edge the
/// engine uses.
pub fn block_size_from_hint(hint: Option<usize>) -> usize {
    match hint {
        Some(size) => size.clamp(MIN_BLOCK_SIZE, MAX_BLOCK_SIZE),
        None => DEFAULT_BLOCK_SIZE,
    }
}

/// Checks that `parts` tile `0..len` in order with no gap or overlap.
pub(crate) fn covers_exactly(parts: &[Range<usize>], len: usize) -> bool {
    let mut next = 0;
    for part in parts {
        if part.start != next || part.end < part.start {
            return false;
        }
        next = part.end;
    }
    next == len
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn last_worker_absorbs_remainder() {
        assert_eq!(row_partitions(10, 3), vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn even_split() {
        assert_eq!(row_partitions(8, 4), vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn single_worker_takes_everything() {
        assert_eq!(row_partitions(7, 1), vec![0..7]);
    }

    #[test]
    fn more_workers_than_rows() {
        assert_eq!(row_partitions(2, 4), vec![0..0, 0..0, 0..0, 0..2]);
    }

    #[test]
    fn tile_space_is_square_of_edge() {
        assert_eq!(tiles_per_edge(100, 32), 4);
        assert_eq!(tiles_per_edge(64, 32), 2);
        assert_eq!(tile_partitions(100, 32, 3), vec![0..5, 5..10, 10..16]);
    }

    #[test]
    fn hint_is_clamped() {
        assert_eq!(block_size_from_hint(Some(8)), 32);
        assert_eq!(block_size_from_hint(Some(36)), 36);
        assert_eq!(block_size_from_hint(Some(4096)), 256);
        assert_eq!(block_size_from_hint(None), 64);
    }

    #[test]
    fn coverage_check_detects_gaps_and_overlaps() {
        assert!(covers_exactly(&[0..2, 2..5], 5));
        assert!(!covers_exactly(&[0..2, 3..5], 5));
        assert!(!covers_exactly(&[0..3, 2..5], 5));
        assert!(!covers_exactly(&[0..2, 2..4], 5));
    }

    proptest! {
        #[test]
        fn rows_are_covered_exactly_once(n in 1usize..300, workers in 1usize..64) {
            let parts = row_partitions(n, workers);
            prop_assert_eq!(parts.len(), workers);

            let mut hits = vec![0u32; n];
            for part in &parts {
                for row in part.clone() {
                    hits[row] += 1;
                }
            }
            prop_assert!(hits.iter().all(|&h| h == 1));
            prop_assert!(covers_exactly(&parts, n));
        }

        #[test]
        fn only_the_last_partition_differs(n in 1usize..300, workers in 1usize..64) {
            let parts = row_partitions(n, workers);
            let base = n / workers;
            for part in &parts[..workers - 1] {
                prop_assert_eq!(part.len(), base);
            }
            prop_assert_eq!(parts[workers - 1].len(), base + n % workers);
        }

        #[test]
        fn tiles_are_covered_exactly_once(n in 1usize..200, bs in 1usize..70, workers in 1usize..16) {
            let edge = tiles_per_edge(n, bs);
            prop_assert!(covers_exactly(&tile_partitions(n, bs, workers), edge * edge));
        }
    }
}
