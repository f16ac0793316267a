//! LZW dictionary (code table) management.
//!
//! The table is a trie stored in an append-only vector: every entry beyond
//! the 256 single bytes records the code of its prefix and the byte that
//! extends it. Sequences are rebuilt by walking prefix links backwards, so
//! inserting an entry costs O(1) regardless of its length.

use crate::error::{LzwError, Result};
use oxicomp_core::ALPHABET_SIZE;
use std::collections::HashMap;

/// Number of entries the table may ever hold (codes must fit in 32 bits).
pub const MAX_CODES: u64 = 1 << 32;

/// Code width for a table of `size` entries: `ceil(log2(size))`.
///
/// ```
/// use oxicomp_lzw::code_width;
///
/// assert_eq!(code_width(256), 8);
/// assert_eq!(code_width(257), 9);
/// assert_eq!(code_width(512), 9);
/// assert_eq!(code_width(513), 10);
/// ```
pub fn code_width(size: u64) -> u8 {
    if size <= 1 {
        0
    } else {
        (u64::BITS - (size - 1).leading_zeros()) as u8
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    /// Code of the sequence minus its last byte (`None` for single bytes).
    prefix: Option<u32>,
    /// Last byte of the sequence.
    last: u8,
    /// First byte of the sequence.
    first: u8,
    /// Sequence length in bytes.
    len: u32,
}

/// LZW dictionary for encoding and decoding.
///
/// Codes are contiguous: 0-255 are the single bytes and each insertion takes
/// the next index. The table never shrinks during a pass.
#[derive(Debug)]
pub struct LzwDictionary {
    /// Code table: code -> trie entry.
    entries: Vec<Entry>,
    /// Reverse lookup: (prefix code, next byte) -> code (for encoding only).
    reverse: HashMap<(u32, u8), u32>,
}

impl LzwDictionary {
    /// Create a dictionary holding the 256 single-byte sequences.
    pub fn new() -> Self {
        let mut dict = Self {
            entries: Vec::with_capacity(ALPHABET_SIZE * 4),
            reverse: HashMap::new(),
        };
        dict.reset();
        dict
    }

    /// Reset the dictionary to its initial state.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.reverse.clear();

        for byte in 0..=u8::MAX {
            self.entries.push(Entry {
                prefix: None,
                last: byte,
                first: byte,
                len: 1,
            });
        }
    }

    /// Number of entries.
    pub fn len(&self) -> u64 {
        self.entries.len() as u64
    }

    /// Always false: the table starts with the full byte alphabet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The code the next insertion will receive.
    pub fn next_code(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Width used by the encoder for its next code.
    pub fn code_width(&self) -> u8 {
        code_width(self.len())
    }

    /// Check if the table can take no more entries.
    pub fn is_full(&self) -> bool {
        self.len() >= MAX_CODES
    }

    /// Find the code for `prefix` extended by `byte` (for encoding).
    pub fn find_extension(&self, prefix: u32, byte: u8) -> Option<u32> {
        self.reverse.get(&(prefix, byte)).copied()
    }

    /// Find the code for a whole byte sequence.
    pub fn find_code(&self, sequence: &[u8]) -> Option<u32> {
        let (&first, rest) = sequence.split_first()?;
        rest.iter()
            .try_fold(first as u32, |code, &byte| self.find_extension(code, byte))
    }

    /// Add `prefix` + `byte` to the dictionary (for encoding).
    ///
    /// Returns the assigned code, or error if the table is full.
    pub fn add_extension(&mut self, prefix: u32, byte: u8) -> Result<u32> {
        let code = self.push_entry(prefix, byte)?;
        self.reverse.insert((prefix, byte), code);
        Ok(code)
    }

    /// Add `prefix` + `byte` to the dictionary (for decoding).
    ///
    /// Similar to `add_extension` but doesn't update the reverse map.
    pub fn add_extension_decode(&mut self, prefix: u32, byte: u8) -> Result<u32> {
        self.push_entry(prefix, byte)
    }

    fn push_entry(&mut self, prefix: u32, byte: u8) -> Result<u32> {
        if self.is_full() {
            return Err(LzwError::TableFull {
                max_codes: MAX_CODES,
            });
        }

        let parent = self.entries[prefix as usize];
        let code = self.next_code();
        self.entries.push(Entry {
            prefix: Some(prefix),
            last: byte,
            first: parent.first,
            len: parent.len + 1,
        });
        Ok(code)
    }

    /// Get the first byte of the sequence for `code`.
    pub fn first_byte(&self, code: u32) -> Option<u8> {
        self.entries.get(code as usize).map(|e| e.first)
    }

    /// Get the length of the sequence for `code`.
    pub fn sequence_len(&self, code: u32) -> Option<usize> {
        self.entries.get(code as usize).map(|e| e.len as usize)
    }

    /// Append the sequence for `code` to `out`.
    ///
    /// Returns the number of bytes appended, or `None` for an unknown code.
    pub fn write_sequence(&self, code: u32, out: &mut Vec<u8>) -> Option<usize> {
        let len = self.sequence_len(code)?;
        let start = out.len();
        out.resize(start + len, 0);

        let mut pos = out.len();
        let mut current = Some(code);
        while let Some(c) = current {
            let entry = self.entries[c as usize];
            pos -= 1;
            out[pos] = entry.last;
            current = entry.prefix;
        }
        debug_assert_eq!(pos, start);

        Some(len)
    }

    /// Get the byte sequence for a code.
    pub fn get_sequence(&self, code: u32) -> Option<Vec<u8>> {
        let mut out = Vec::new();
        self.write_sequence(code, &mut out)?;
        Some(out)
    }
}

impl Default for LzwDictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_init() {
        let dict = LzwDictionary::new();

        for i in 0..256u32 {
            assert_eq!(dict.get_sequence(i).unwrap(), vec![i as u8]);
        }

        assert_eq!(dict.len(), 256);
        assert_eq!(dict.next_code(), 256);
        assert_eq!(dict.code_width(), 8);
        assert!(dict.get_sequence(256).is_none());
    }

    #[test]
    fn test_add_extension() {
        let mut dict = LzwDictionary::new();

        let ab = dict.add_extension(b'A' as u32, b'B').unwrap();
        assert_eq!(ab, 256);
        let abc = dict.add_extension(ab, b'C').unwrap();
        assert_eq!(abc, 257);

        assert_eq!(dict.get_sequence(abc).unwrap(), b"ABC");
        assert_eq!(dict.first_byte(abc), Some(b'A'));
        assert_eq!(dict.sequence_len(abc), Some(3));
        assert_eq!(dict.code_width(), 9);
    }

    #[test]
    fn test_find_code() {
        let mut dict = LzwDictionary::new();

        assert_eq!(dict.find_code(&[65]), Some(65));

        let code = dict.add_extension(b'A' as u32, b'B').unwrap();
        assert_eq!(dict.find_code(b"AB"), Some(code));
        assert_eq!(dict.find_extension(b'A' as u32, b'B'), Some(code));

        assert_eq!(dict.find_code(b"XYZ"), None);
        assert_eq!(dict.find_code(b""), None);
    }

    #[test]
    fn test_decode_insert_skips_reverse_index() {
        let mut dict = LzwDictionary::new();
        let code = dict.add_extension_decode(b'A' as u32, b'B').unwrap();
        assert_eq!(dict.get_sequence(code).unwrap(), b"AB");
        assert_eq!(dict.find_code(b"AB"), None);
    }

    #[test]
    fn test_write_sequence_appends() {
        let mut dict = LzwDictionary::new();
        let ab = dict.add_extension(b'A' as u32, b'B').unwrap();

        let mut out = b"xy".to_vec();
        assert_eq!(dict.write_sequence(ab, &mut out), Some(2));
        assert_eq!(out, b"xyAB");
        assert_eq!(dict.write_sequence(9999, &mut out), None);
        assert_eq!(out, b"xyAB");
    }

    #[test]
    fn test_reset_drops_learned_entries() {
        let mut dict = LzwDictionary::new();
        dict.add_extension(1, 2).unwrap();
        dict.reset();
        assert_eq!(dict.len(), 256);
        assert_eq!(dict.find_extension(1, 2), None);
    }

    #[test]
    fn test_code_width_boundaries() {
        assert_eq!(code_width(1), 0);
        assert_eq!(code_width(2), 1);
        assert_eq!(code_width(256), 8);
        assert_eq!(code_width(257), 9);
        assert_eq!(code_width(512), 9);
        assert_eq!(code_width(513), 10);
        assert_eq!(code_width(MAX_CODES), 32);
    }
}
