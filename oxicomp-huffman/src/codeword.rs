//! Codewords and the symbol-to-codeword map.

use oxicomp_core::ALPHABET_SIZE;
use std::fmt;

/// A prefix-code word of up to 64 bits, stored right-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codeword {
    bits: u64,
    length: u8,
}

impl Codeword {
    /// Create a codeword from its low `length` bits.
    pub fn new(bits: u64, length: u8) -> Self {
        debug_assert!((1..=64).contains(&length));
        let bits = if length >= 64 {
            bits
        } else {
            bits & ((1u64 << length) - 1)
        };
        Self { bits, length }
    }

    /// The code bits, right-aligned.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Number of bits in the code.
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Check whether `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        self.length <= other.length
            && (other.bits >> (other.length - self.length)) == self.bits
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for shift in (0..self.length).rev() {
            let bit = (self.bits >> shift) & 1;
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

/// Symbol to codeword mapping, one slot per byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodewordMap {
    codes: [Option<Codeword>; ALPHABET_SIZE],
}

impl CodewordMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            codes: [None; ALPHABET_SIZE],
        }
    }

    /// Assign a codeword to `symbol`, returning the previous one.
    pub fn insert(&mut self, symbol: u8, codeword: Codeword) -> Option<Codeword> {
        self.codes[symbol as usize].replace(codeword)
    }

    /// Look up the codeword for `symbol`.
    pub fn get(&self, symbol: u8) -> Option<Codeword> {
        self.codes[symbol as usize]
    }

    /// Number of symbols with a codeword.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// Check if no symbol has a codeword.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// Mapped symbols with their codewords, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Codeword)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }

    /// Mapped symbols with their code lengths.
    pub fn lengths(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.iter().map(|(symbol, code)| (symbol, code.length()))
    }

    /// Check that no codeword is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<Codeword> = self.iter().map(|(_, c)| c).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

impl Default for CodewordMap {
    fn default() -> Self {
        Self::new()
    }
}
