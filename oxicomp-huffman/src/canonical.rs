//! Canonical codeword assignment.
//!
//! Only code lengths survive from the tree. Symbols are sorted by
//! `(length, symbol)` and numbered consecutively, shifting left whenever the
//! length grows, which lets a decoder rebuild every codeword from the lengths
//! alone.

use crate::codeword::{Codeword, CodewordMap};
use crate::MAX_CODE_LENGTH;
use oxicomp_core::error::{OxiCompError, Result};

/// Kraft sum scaled by 2^64: `sum(2^(64 - length))`.
///
/// A complete prefix code sums to exactly `1 << 64`. Every length must be
/// in `1..=64`.
pub fn kraft_sum_scaled(lengths: impl IntoIterator<Item = u8>) -> u128 {
    lengths
        .into_iter()
        .map(|len| 1u128 << (MAX_CODE_LENGTH - len))
        .sum()
}

/// `1 << 64`, the scaled Kraft sum of a complete code.
pub const KRAFT_COMPLETE: u128 = 1 << 64;

/// One symbol of a canonical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalEntry {
    /// The symbol.
    pub symbol: u8,
    /// Its canonical codeword.
    pub codeword: Codeword,
}

/// Codewords assigned in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CanonicalTable {
    /// Entries sorted by `(length, symbol)`.
    entries: Vec<CanonicalEntry>,
    /// Same codewords indexed by symbol.
    by_symbol: CodewordMap,
}

impl CanonicalTable {
    /// Assign canonical codewords from `(symbol, length)` pairs.
    ///
    /// Fails with `MalformedHeader` if a length is 0 or above 64, a symbol
    /// repeats, or the lengths oversubscribe the code space.
    pub fn from_lengths(lengths: impl IntoIterator<Item = (u8, u8)>) -> Result<Self> {
        let mut sorted: Vec<(u8, u8)> = lengths.into_iter().collect();

        for &(symbol, len) in &sorted {
            if len == 0 || len > MAX_CODE_LENGTH {
                return Err(OxiCompError::malformed_header(format!(
                    "code length {} for symbol {:#04x} outside 1..={}",
                    len, symbol, MAX_CODE_LENGTH
                )));
            }
        }

        sorted.sort_unstable_by_key(|&(symbol, len)| (len, symbol));

        if has_duplicate_symbol(&sorted) {
            return Err(OxiCompError::malformed_header("symbol listed twice"));
        }

        if kraft_sum_scaled(sorted.iter().map(|&(_, len)| len)) > KRAFT_COMPLETE {
            return Err(OxiCompError::malformed_header(
                "code lengths oversubscribe the code space",
            ));
        }

        let mut entries = Vec::with_capacity(sorted.len());
        let mut by_symbol = CodewordMap::new();
        let mut code = 0u64;
        let mut prev_len = 0u8;

        for (i, &(symbol, len)) in sorted.iter().enumerate() {
            if i > 0 {
                code = (code + 1) << (len - prev_len);
            }
            prev_len = len;

            let codeword = Codeword::new(code, len);
            entries.push(CanonicalEntry { symbol, codeword });
            by_symbol.insert(symbol, codeword);
        }

        Ok(Self { entries, by_symbol })
    }

    /// Re-express a tree-derived map canonically, keeping every length.
    pub fn from_codeword_map(map: &CodewordMap) -> Result<Self> {
        Self::from_lengths(map.lengths())
    }

    /// Entries in canonical order.
    pub fn entries(&self) -> &[CanonicalEntry] {
        &self.entries
    }

    /// Codeword for `symbol`.
    pub fn codeword(&self, symbol: u8) -> Option<Codeword> {
        self.by_symbol.get(symbol)
    }

    /// The table as a symbol-indexed map.
    pub fn codeword_map(&self) -> &CodewordMap {
        &self.by_symbol
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no symbols.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shortest code length (0 when empty).
    pub fn min_length(&self) -> u8 {
        self.entries.first().map_or(0, |e| e.codeword.length())
    }

    /// Longest code length (0 when empty).
    pub fn max_length(&self) -> u8 {
        self.entries.last().map_or(0, |e| e.codeword.length())
    }

    /// Kraft sum `sum(2^-length)`: 1.0 for a complete code.
    pub fn kraft_sum(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| 2f64.powi(-(e.codeword.length() as i32)))
            .sum()
    }

    /// Number of symbols per code length, in ascending length order.
    pub fn length_histogram(&self) -> Vec<(u8, usize)> {
        let mut histogram: Vec<(u8, usize)> = Vec::new();
        for entry in &self.entries {
            let len = entry.codeword.length();
            match histogram.last_mut() {
                Some((last, count)) if *last == len => *count += 1,
                _ => histogram.push((len, 1)),
            }
        }
        histogram
    }
}

fn has_duplicate_symbol(sorted: &[(u8, u8)]) -> bool {
    let mut seen = [false; 256];
    sorted
        .iter()
        .any(|&(symbol, _)| std::mem::replace(&mut seen[symbol as usize], true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::tree::HuffmanTree;

    fn table_for(data: &[u8]) -> CanonicalTable {
        let map = HuffmanTree::build(&FrequencyTable::from_bytes(data))
            .codewords()
            .unwrap();
        CanonicalTable::from_codeword_map(&map).unwrap()
    }

    #[test]
    fn test_canonical_assignment() {
        // Lengths: B=1, A=2, C=3, D=3 -> 0, 10, 110, 111
        let table =
            CanonicalTable::from_lengths([(b'A', 2), (b'B', 1), (b'C', 3), (b'D', 3)]).unwrap();

        let codes: Vec<(u8, String)> = table
            .entries()
            .iter()
            .map(|e| (e.symbol, e.codeword.to_string()))
            .collect();
        assert_eq!(
            codes,
            vec![
                (b'B', "0".to_string()),
                (b'A', "10".to_string()),
                (b'C', "110".to_string()),
                (b'D', "111".to_string()),
            ]
        );
        assert_eq!(table.kraft_sum(), 1.0);
        assert_eq!(table.length_histogram(), vec![(1, 1), (2, 1), (3, 2)]);
    }

    #[test]
    fn test_keeps_tree_lengths() {
        let data = b"this is an example of a huffman tree";
        let map = HuffmanTree::build(&FrequencyTable::from_bytes(data))
            .codewords()
            .unwrap();
        let table = CanonicalTable::from_codeword_map(&map).unwrap();

        for (symbol, code) in map.iter() {
            assert_eq!(table.codeword(symbol).unwrap().length(), code.length());
        }
        assert!(table.codeword_map().is_prefix_free());
    }

    #[test]
    fn test_kraft_equality_for_many_symbols() {
        let data: Vec<u8> = (0..5000u32).map(|i| ((i * i) % 97) as u8).collect();
        let table = table_for(&data);
        assert_eq!(
            kraft_sum_scaled(table.entries().iter().map(|e| e.codeword.length())),
            KRAFT_COMPLETE
        );
    }

    #[test]
    fn test_single_symbol_half_kraft() {
        let table = table_for(b"AAAAAAAA");
        assert_eq!(table.len(), 1);
        assert_eq!(table.codeword(b'A'), Some(Codeword::new(0, 1)));
        assert_eq!(table.kraft_sum(), 0.5);
    }

    #[test]
    fn test_rejects_bad_lengths() {
        assert!(CanonicalTable::from_lengths([(1, 0)]).is_err());
        assert!(CanonicalTable::from_lengths([(1, 65)]).is_err());
        assert!(CanonicalTable::from_lengths([(1, 1), (2, 1), (3, 1)]).is_err());
        assert!(CanonicalTable::from_lengths([(1, 1), (1, 2)]).is_err());
    }

    #[test]
    fn test_64_bit_codes() {
        // 1, 2, ..., 63, 64, 64 is complete.
        let lengths: Vec<(u8, u8)> = (1..=64u8)
            .map(|len| (len - 1, len))
            .chain(std::iter::once((64, 64)))
            .collect();
        let table = CanonicalTable::from_lengths(lengths).unwrap();
        assert_eq!(table.max_length(), 64);
        assert_eq!(table.codeword(63).unwrap().bits(), u64::MAX - 1);
        assert_eq!(table.codeword(64).unwrap().bits(), u64::MAX);
    }
}
