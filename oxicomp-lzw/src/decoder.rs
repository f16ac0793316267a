//! LZW decoder (decompression).
//!
//! The decoder inserts each dictionary entry one code later than the encoder
//! did, so it reads code *k* with `ceil(log2(256 + k))` bits: the size of its
//! own table plus the entry it is about to create.

use crate::dictionary::{LzwDictionary, MAX_CODES, code_width};
use crate::error::{LzwError, Result};
use log::{debug, trace};
use oxicomp_core::bitstream::BitBuffer;
use std::cmp::Ordering;

/// One code as the decoder consumed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedCode {
    /// Dictionary index read from the stream.
    pub code: u32,
    /// Bit width it was read with.
    pub width: u8,
    /// Dictionary size once the code has been processed.
    pub dictionary_size: u64,
}

/// LZW decoder for decompression.
#[derive(Debug, Default)]
pub struct LzwDecoder {
    /// Dictionary for code lookup.
    dict: LzwDictionary,
}

impl LzwDecoder {
    /// Create a new LZW decoder.
    pub fn new() -> Self {
        Self {
            dict: LzwDictionary::new(),
        }
    }

    /// Decode a trailer-framed LZW stream.
    pub fn decode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let bits = BitBuffer::from_trailer_framed(input)?;
        self.decode_bits(&bits)
    }

    /// Decode an unframed payload whose bit length is known out of band.
    pub fn decode_raw(&mut self, input: &[u8], bit_len: u64) -> Result<Vec<u8>> {
        let bits = BitBuffer::new(input, bit_len)?;
        self.decode_bits(&bits)
    }

    /// Decode every code in `bits`.
    ///
    /// Decoding stops exactly at the end of the sequence. If bits remain but
    /// fewer than the next code width, the stream is truncated and decoding
    /// fails rather than guessing.
    pub fn decode_bits(&mut self, bits: &BitBuffer) -> Result<Vec<u8>> {
        self.run(bits, |_| {})
    }

    /// Decode a trailer-framed stream and record every code it consumed.
    pub fn trace_codes(&mut self, input: &[u8]) -> Result<Vec<DecodedCode>> {
        let bits = BitBuffer::from_trailer_framed(input)?;
        let mut codes = Vec::new();
        self.run(&bits, |code| codes.push(code))?;
        Ok(codes)
    }

    fn run<F>(&mut self, bits: &BitBuffer, mut on_code: F) -> Result<Vec<u8>>
    where
        F: FnMut(DecodedCode),
    {
        self.dict.reset();

        let mut output = Vec::with_capacity(bits.len() as usize / 4);
        let mut cursor = bits.cursor();

        if cursor.is_at_end() {
            return Ok(output);
        }

        // First code: only single bytes exist, nothing is inserted yet.
        let position = cursor.position();
        let width = code_width(self.dict.len());
        let first = cursor.read_bits(width)?;
        self.dict
            .write_sequence(first, &mut output)
            .ok_or(LzwError::InvalidCode {
                code: first,
                next_code: self.dict.next_code(),
                position,
            })?;
        on_code(DecodedCode {
            code: first,
            width,
            dictionary_size: self.dict.len(),
        });
        let mut prev = first;

        while !cursor.is_at_end() {
            let size_after_insert = self.dict.len() + 1;
            if size_after_insert > MAX_CODES {
                return Err(LzwError::TableFull {
                    max_codes: MAX_CODES,
                });
            }
            let width = code_width(size_after_insert);

            let position = cursor.position();
            let code = cursor.read_bits(width)?;
            let next_code = self.dict.next_code();

            let first_byte = match code.cmp(&next_code) {
                Ordering::Less => self.dict.first_byte(code),
                // Self-reference: the code names the entry about to be
                // created, which is prev + first byte of prev.
                Ordering::Equal => self.dict.first_byte(prev),
                Ordering::Greater => None,
            }
            .ok_or(LzwError::InvalidCode {
                code,
                next_code,
                position,
            })?;

            trace!("code {} width {} at bit {}", code, width, position);

            self.dict.add_extension_decode(prev, first_byte)?;
            // Defined now even in the self-reference case.
            self.dict.write_sequence(code, &mut output);
            on_code(DecodedCode {
                code,
                width,
                dictionary_size: self.dict.len(),
            });
            prev = code;
        }

        debug!(
            "LZW decoded {} bits into {} bytes (dictionary size {})",
            bits.len(),
            output.len(),
            self.dict.len()
        );

        Ok(output)
    }

    /// Reset the decoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
    }
}
