use std::ops::Range;

#[derive(Debug)]
pub struct Chunk {
    pub index: usize,
    pub data: Vec<u8>,
}

/// Number of parts needed to cover `size` bytes, i.e. `ceil(size / chunk_size)`.
pub fn part_count(size: u64, chunk_size: u64) -> usize {
    let remainder = size % chunk_size;

    (size / chunk_size) as usize + if remainder > 0 { 1 } else { 0 }
}

/// Yields `(index, byte range)` for every chunk of a file, in file order.
#[derive(Debug)]
pub(crate) struct ChunkIterator {
    chunk_count: usize,
    chunk_size: u64,
    remainder: u64,

    // current chunk index
    index: usize,
}

impl ChunkIterator {
    pub fn new(size: u64, chunk_size: u64) -> Self {
        Self {
            chunk_count: part_count(size, chunk_size),
            chunk_size,
            remainder: size % chunk_size,
            index: 0,
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }
}

impl Iterator for ChunkIterator {
    type Item = (usize, Range<u64>);

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.index;

        if cur < self.chunk_count {
            let start = self.index as u64 * self.chunk_size;

            let result = if self.remainder > 0 && cur == self.chunk_count - 1 {
                (cur, start..start + self.remainder)
            } else {
                (cur, start..start + self.chunk_size)
            };

            // increase before return
            self.index += 1;

            Some(result)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.chunk_count - self.index;
        (left, Some(left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_multiple_has_no_trailing_range() {
        let ranges: Vec<_> = ChunkIterator::new(12, 4).collect();
        assert_eq!(ranges, vec![(0, 0..4), (1, 4..8), (2, 8..12)]);
    }

    #[test]
    fn remainder_goes_to_last_range() {
        let ranges: Vec<_> = ChunkIterator::new(7, 4).collect();
        assert_eq!(ranges, vec![(0, 0..4), (1, 4..7)]);
    }

    #[test]
    fn empty_file_has_no_ranges() {
        assert_eq!(ChunkIterator::new(0, 4).count(), 0);
        assert_eq!(part_count(0, 4), 0);
    }

    #[test]
    fn part_count_is_ceiling() {
        assert_eq!(part_count(1, 4), 1);
        assert_eq!(part_count(4, 4), 1);
        assert_eq!(part_count(5, 4), 2);
        assert_eq!(part_count(100_000_001, 20_000_000), 6);
    }

    #[test]
    fn offsets_are_index_times_chunk_size() {
        for (index, range) in ChunkIterator::new(23, 5) {
            assert_eq!(range.start, index as u64 * 5);
        }
    }
}
