//! Huffman file header.
//!
//! ```text
//! +-------+-----------------+------------------------------+
//! | N - 1 | N symbol bytes  | (count, length) byte pairs   |
//! +-------+-----------------+------------------------------+
//! ```
//!
//! Symbols appear in canonical order. Each pair says how many of the next
//! symbols share a code length; pair lengths never decrease and the counts sum
//! to `N`. A run longer than 255 is split across several pairs.

use crate::canonical::{CanonicalTable, KRAFT_COMPLETE, kraft_sum_scaled};
use crate::MAX_CODE_LENGTH;
use oxicomp_core::error::{OxiCompError, Result};
use std::io::Write;

/// Largest count a single pair can hold.
pub const MAX_RUN: usize = u8::MAX as usize;

/// A run of symbols sharing one code length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRun {
    /// Number of symbols in the run (1..=255).
    pub count: u8,
    /// Their code length (1..=64).
    pub length: u8,
}

/// Parsed or to-be-written header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanHeader {
    symbols: Vec<u8>,
    runs: Vec<LengthRun>,
}

impl HuffmanHeader {
    /// Describe a canonical table.
    ///
    /// Fails with `MalformedHeader` for an empty table, which has no header
    /// representation.
    pub fn from_table(table: &CanonicalTable) -> Result<Self> {
        if table.is_empty() {
            return Err(OxiCompError::malformed_header(
                "an empty code table has no header",
            ));
        }

        let symbols = table.entries().iter().map(|e| e.symbol).collect();

        let mut runs = Vec::new();
        for (length, count) in table.length_histogram() {
            let mut remaining = count;
            while remaining > 0 {
                let take = remaining.min(MAX_RUN);
                runs.push(LengthRun {
                    count: take as u8,
                    length,
                });
                remaining -= take;
            }
        }

        Ok(Self { symbols, runs })
    }

    /// Number of symbols described.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Symbols in canonical order.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Length runs in file order.
    pub fn runs(&self) -> &[LengthRun] {
        &self.runs
    }

    /// `(symbol, length)` pairs in canonical order.
    pub fn lengths(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.runs
            .iter()
            .flat_map(|run| std::iter::repeat_n(run.length, run.count as usize))
            .zip(self.symbols.iter())
            .map(|(length, &symbol)| (symbol, length))
    }

    /// Serialized size in bytes.
    pub fn encoded_len(&self) -> usize {
        1 + self.symbols.len() + 2 * self.runs.len()
    }

    /// Write the header bytes.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Serialize to a new buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.push((self.symbols.len() - 1) as u8);
        out.extend_from_slice(&self.symbols);
        for run in &self.runs {
            out.extend_from_slice(&[run.count, run.length]);
        }
        out
    }

    /// Parse a header from the start of `data`.
    ///
    /// Returns the header and the number of bytes it occupied.
    pub fn parse(data: &[u8]) -> Result<(Self, usize)> {
        let (&count_byte, rest) = data
            .split_first()
            .ok_or_else(|| OxiCompError::malformed_header("missing symbol count"))?;
        let n = count_byte as usize + 1;

        if rest.len() < n {
            return Err(OxiCompError::malformed_header(format!(
                "header declares {} symbols but only {} bytes follow",
                n,
                rest.len()
            )));
        }
        let symbols = rest[..n].to_vec();

        let mut pos = 1 + n;
        let mut covered = 0usize;
        let mut runs = Vec::new();
        let mut prev_length = 0u8;

        while covered < n {
            let Some(&[count, length]) = data.get(pos..pos + 2) else {
                return Err(OxiCompError::malformed_header(format!(
                    "length runs cover {} of {} symbols before the header ends",
                    covered, n
                )));
            };
            pos += 2;

            if count == 0 {
                return Err(OxiCompError::malformed_header("zero-length run"));
            }
            if length == 0 || length > MAX_CODE_LENGTH {
                return Err(OxiCompError::malformed_header(format!(
                    "code length {} outside 1..={}",
                    length, MAX_CODE_LENGTH
                )));
            }
            if length < prev_length {
                return Err(OxiCompError::malformed_header(format!(
                    "code length {} after {}",
                    length, prev_length
                )));
            }
            if covered + count as usize > n {
                return Err(OxiCompError::malformed_header(format!(
                    "length runs overshoot {} symbols",
                    n
                )));
            }

            covered += count as usize;
            prev_length = length;
            runs.push(LengthRun { count, length });
        }

        let header = Self { symbols, runs };
        header.validate()?;
        Ok((header, pos))
    }

    /// Rebuild the canonical table this header describes.
    pub fn to_table(&self) -> Result<CanonicalTable> {
        CanonicalTable::from_lengths(self.lengths())
    }

    fn validate(&self) -> Result<()> {
        let mut seen = [false; 256];
        let mut prev: Option<(u8, u8)> = None;
        for (symbol, length) in self.lengths() {
            if std::mem::replace(&mut seen[symbol as usize], true) {
                return Err(OxiCompError::malformed_header(format!(
                    "symbol {:#04x} listed twice",
                    symbol
                )));
            }
            if prev.is_some_and(|p| p > (length, symbol)) {
                return Err(OxiCompError::malformed_header(
                    "symbols are not in canonical order",
                ));
            }
            prev = Some((length, symbol));
        }

        if kraft_sum_scaled(self.runs.iter().flat_map(|run| {
            std::iter::repeat_n(run.length, run.count as usize)
        })) > KRAFT_COMPLETE
        {
            return Err(OxiCompError::malformed_header(
                "code lengths violate the Kraft inequality",
            ));
        }
        Ok(())
    }
}
