//! Byte frequency counting.

use oxicomp_core::ALPHABET_SIZE;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Input size per shard when counting in parallel.
#[cfg(feature = "parallel")]
pub const PARALLEL_CHUNK_SIZE: usize = 1 << 20;

/// Occurrence count for each byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }

    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.update(data);
        table
    }

    /// Count `data` in shards of [`PARALLEL_CHUNK_SIZE`] bytes on the rayon
    /// pool.
    ///
    /// Shard counts are summed in shard order, so the result is identical to
    /// [`from_bytes`](Self::from_bytes).
    #[cfg(feature = "parallel")]
    pub fn from_bytes_parallel(data: &[u8]) -> Self {
        let shards: Vec<Self> = data
            .par_chunks(PARALLEL_CHUNK_SIZE)
            .map(Self::from_bytes)
            .collect();

        shards.iter().fold(Self::new(), |mut acc, shard| {
            acc.merge(shard);
            acc
        })
    }

    /// Add the bytes of `data` to the counts.
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    /// Add another table's counts into this one.
    pub fn merge(&mut self, other: &Self) {
        for (count, &extra) in self.counts.iter_mut().zip(other.counts.iter()) {
            *count += extra;
        }
    }

    /// Count for `symbol`.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of distinct byte values seen.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Check if nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(symbol, &c)| (symbol as u8, c))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let table = FrequencyTable::from_bytes(b"abracadabra");
        assert_eq!(table.get(b'a'), 5);
        assert_eq!(table.get(b'b'), 2);
        assert_eq!(table.get(b'r'), 2);
        assert_eq!(table.get(b'c'), 1);
        assert_eq!(table.get(b'd'), 1);
        assert_eq!(table.get(b'z'), 0);
        assert_eq!(table.total(), 11);
        assert_eq!(table.distinct(), 5);
    }

    #[test]
    fn test_iter_ascending_present_only() {
        let table = FrequencyTable::from_bytes(b"zyxzz");
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(b'x', 1), (b'y', 1), (b'z', 3)]);
    }

    #[test]
    fn test_empty() {
        let table = FrequencyTable::from_bytes(b"");
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let (left, right) = data.split_at(17);

        let mut merged = FrequencyTable::from_bytes(left);
        merged.merge(&FrequencyTable::from_bytes(right));

        assert_eq!(merged, FrequencyTable::from_bytes(data));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let data: Vec<u8> = (0..(PARALLEL_CHUNK_SIZE * 3 + 12345))
            .map(|i| (i * 131 % 251) as u8)
            .collect();
        assert_eq!(
            FrequencyTable::from_bytes_parallel(&data),
            FrequencyTable::from_bytes(&data)
        );
    }
}
