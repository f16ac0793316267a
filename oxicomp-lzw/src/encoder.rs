//! LZW encoder (compression).

use crate::dictionary::LzwDictionary;
use crate::error::Result;
use log::{debug, trace};
use oxicomp_core::bitstream::BitWriter;
use oxicomp_core::{EncodeStats, Encoded};

/// One code as the encoder emitted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmittedCode {
    /// Dictionary index written to the stream.
    pub code: u32,
    /// Bit width it was written with.
    pub width: u8,
    /// Dictionary size at the moment of emission.
    pub dictionary_size: u64,
}

/// Unframed code payload with its exact bit length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LzwPayload {
    /// Packed codes, last byte zero-padded.
    pub data: Vec<u8>,
    /// Number of meaningful bits in `data`.
    pub bit_len: u64,
    /// Number of codes emitted.
    pub codewords: u64,
}

/// LZW encoder for compression.
#[derive(Debug, Default)]
pub struct LzwEncoder {
    /// Dictionary for string lookup.
    dict: LzwDictionary,
}

impl LzwEncoder {
    /// Create a new LZW encoder.
    pub fn new() -> Self {
        Self {
            dict: LzwDictionary::new(),
        }
    }

    /// Encode data and frame it with the valid-bit trailer.
    ///
    /// # Algorithm
    ///
    /// 1. Initialize dictionary with single-byte codes (0-255)
    /// 2. Read input byte by byte, extending the current sequence
    /// 3. When the extension is unknown, output the code for the sequence
    ///    at `ceil(log2(dictionary size))` bits
    /// 4. Add sequence + byte to the dictionary
    /// 5. Restart the sequence from the byte
    /// 6. At end of input, output the code for the final sequence
    ///
    /// No end marker is written; the trailer byte bounds the payload.
    pub fn encode(&mut self, input: &[u8]) -> Result<Encoded> {
        let mut writer = BitWriter::new(Vec::with_capacity(input.len() / 2 + 1));
        let codewords = self.run(input, |code, width, _| {
            writer.write_bits(code, width)?;
            Ok(())
        })?;
        let payload_bits = writer.bits_written();
        writer.flush(true)?;
        let data = writer.into_inner();

        debug!(
            "LZW encoded {} bytes into {} codes ({} bits, dictionary size {})",
            input.len(),
            codewords,
            payload_bits,
            self.dict.len()
        );

        let stats = EncodeStats {
            symbols: input.len() as u64,
            codewords,
            payload_bits,
            output_bytes: data.len() as u64,
        };
        Ok(Encoded { data, stats })
    }

    /// Encode data without a trailer, returning the bit length separately.
    ///
    /// The payload can only be decoded with that bit length supplied out of
    /// band (see [`LzwDecoder::decode_raw`](crate::LzwDecoder::decode_raw)).
    pub fn encode_raw(&mut self, input: &[u8]) -> Result<LzwPayload> {
        let mut writer = BitWriter::new(Vec::with_capacity(input.len() / 2 + 1));
        let codewords = self.run(input, |code, width, _| {
            writer.write_bits(code, width)?;
            Ok(())
        })?;
        let bit_len = writer.bits_written();
        writer.flush(false)?;

        Ok(LzwPayload {
            data: writer.into_inner(),
            bit_len,
            codewords,
        })
    }

    /// Run the encoder and record every emitted code instead of packing it.
    pub fn trace_codes(&mut self, input: &[u8]) -> Result<Vec<EmittedCode>> {
        let mut codes = Vec::new();
        self.run(input, |code, width, dictionary_size| {
            codes.push(EmittedCode {
                code,
                width,
                dictionary_size,
            });
            Ok(())
        })?;
        Ok(codes)
    }

    /// Core loop shared by every output flavour. Returns the code count.
    ///
    /// `emit` receives each code, its width and the dictionary size it was
    /// chosen against.
    fn run<F>(&mut self, input: &[u8], mut emit: F) -> Result<u64>
    where
        F: FnMut(u32, u8, u64) -> Result<()>,
    {
        self.dict.reset();

        let Some((&first, rest)) = input.split_first() else {
            return Ok(0);
        };

        let mut current = first as u32;
        let mut codewords = 0u64;

        for &byte in rest {
            if let Some(code) = self.dict.find_extension(current, byte) {
                current = code;
                continue;
            }

            // Width comes from the size before this insertion.
            let width = self.dict.code_width();
            trace!("code {} width {}", current, width);
            emit(current, width, self.dict.len())?;
            codewords += 1;

            self.dict.add_extension(current, byte)?;
            current = byte as u32;
        }

        let width = self.dict.code_width();
        trace!("final code {} width {}", current, width);
        emit(current, width, self.dict.len())?;

        Ok(codewords + 1)
    }

    /// Reset the encoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
    }
}
