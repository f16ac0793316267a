//! Huffman decoding.

use crate::canonical::CanonicalTable;
use crate::header::HuffmanHeader;
use crate::MAX_CODE_LENGTH;
use log::{debug, trace};
use oxicomp_core::bitstream::BitBuffer;
use oxicomp_core::error::{OxiCompError, Result};

const SLOTS: usize = MAX_CODE_LENGTH as usize + 1;

/// Per-length lookup tables for a canonical code.
///
/// Codewords of one length are consecutive integers, so a candidate of
/// length `L` is a codeword iff `first_code[L] <= code < first_code[L] +
/// count[L]`, and its symbol sits at `offset[L] + (code - first_code[L])`.
#[derive(Debug, Clone)]
pub struct CanonicalDecoder {
    first_code: [u64; SLOTS],
    count: [u64; SLOTS],
    offset: [usize; SLOTS],
    symbols: Vec<u8>,
    max_length: u8,
}

impl CanonicalDecoder {
    /// Build the lookup tables for `table`.
    pub fn new(table: &CanonicalTable) -> Self {
        let mut first_code = [0u64; SLOTS];
        let mut count = [0u64; SLOTS];
        let mut offset = [0usize; SLOTS];
        let mut symbols = Vec::with_capacity(table.len());

        for (index, entry) in table.entries().iter().enumerate() {
            let len = entry.codeword.length() as usize;
            if count[len] == 0 {
                first_code[len] = entry.codeword.bits();
                offset[len] = index;
            }
            count[len] += 1;
            symbols.push(entry.symbol);
        }

        Self {
            first_code,
            count,
            offset,
            symbols,
            max_length: table.max_length(),
        }
    }

    /// Longest codeword length.
    pub fn max_length(&self) -> u8 {
        self.max_length
    }

    /// Symbol for the `length`-bit candidate `code`, if it is a codeword.
    pub fn lookup(&self, code: u64, length: u8) -> Option<u8> {
        let len = length as usize;
        if len >= SLOTS || self.count[len] == 0 {
            return None;
        }
        let delta = code.checked_sub(self.first_code[len])?;
        if delta < self.count[len] {
            Some(self.symbols[self.offset[len] + delta as usize])
        } else {
            None
        }
    }

    /// Decode every codeword in `bits`.
    ///
    /// A candidate as long as the longest codeword that still matches nothing
    /// is `MalformedHeader`; bits left over at the end that form no codeword
    /// are `TruncatedStream`.
    pub fn decode_bits(&self, bits: &BitBuffer) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(bits.len() as usize / 2);
        let mut code = 0u64;
        let mut length = 0u8;

        for (position, bit) in bits.iter().enumerate() {
            code = (code << 1) | bit as u64;
            length += 1;

            if let Some(symbol) = self.lookup(code, length) {
                output.push(symbol);
                code = 0;
                length = 0;
            } else if length >= self.max_length {
                return Err(OxiCompError::malformed_header(format!(
                    "bit pattern at bit {} matches no codeword",
                    position as u64 + 1 - length as u64
                )));
            }
        }

        if length > 0 {
            let start = bits.len() - length as u64;
            trace!("dangling {}-bit candidate at bit {}", length, start);
            return Err(OxiCompError::truncated(
                start,
                length as u64 + 1,
                length as u64,
            ));
        }

        Ok(output)
    }
}

/// Decode a complete Huffman file. An empty file decodes to nothing.
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let (header, consumed) = HuffmanHeader::parse(input)?;
    let table = header.to_table()?;
    let decoder = CanonicalDecoder::new(&table);

    let bits = BitBuffer::from_trailer_framed(&input[consumed..])?;
    let output = decoder.decode_bits(&bits)?;

    debug!(
        "Huffman decoded {} symbols from {} payload bits ({} byte header)",
        output.len(),
        bits.len(),
        consumed
    );

    Ok(output)
}
