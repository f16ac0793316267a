//! # OxiComp-LZW: Pure Rust LZW Compression
//!
//! This crate provides LZW (Lempel-Ziv-Welch) compression and decompression
//! over arbitrary byte streams.
//!
//! ## Stream Format
//!
//! - **MSB-first bit order**: codes are packed from most significant bit
//! - **Recomputed code width**: every code is `ceil(log2(n))` bits wide,
//!   where `n` is the dictionary size at that point (8 bits for the first
//!   code, 9 from the second, growing without limit)
//! - **No clear codes, no end code**: the dictionary is never reset
//! - **Valid-bit trailer**: one final byte records how many bits of the last
//!   payload byte are real, which fixes the payload's exact bit length
//!
//! ## Example
//!
//! ```rust
//! use oxicomp_lzw::{compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! // Compress
//! let compressed = compress(original).unwrap();
//!
//! // Decompress
//! let decompressed = decompress(&compressed).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Out-of-band Length
//!
//! The unframed payload can be produced and consumed directly when the bit
//! length travels separately:
//!
//! ```rust
//! use oxicomp_lzw::{LzwDecoder, LzwEncoder};
//!
//! let payload = LzwEncoder::new().encode_raw(b"ABABABABAB").unwrap();
//! let decoded = LzwDecoder::new()
//!     .decode_raw(&payload.data, payload.bit_len)
//!     .unwrap();
//! assert_eq!(decoded, b"ABABABABAB");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod decoder;
mod dictionary;
mod encoder;
mod error;

pub use decoder::{DecodedCode, LzwDecoder};
pub use dictionary::{LzwDictionary, MAX_CODES, code_width};
pub use encoder::{EmittedCode, LzwEncoder, LzwPayload};
pub use error::{LzwError, Result};

use oxicomp_core::{Codec, Encoded};

/// Dictionary size before any code has been emitted (one entry per byte).
pub const INITIAL_DICTIONARY_SIZE: u64 = oxicomp_core::ALPHABET_SIZE as u64;

/// File extension for LZW-encoded output.
pub const EXTENSION: &str = "lzw";

/// Compress data with LZW.
///
/// # Example
///
/// ```rust
/// use oxicomp_lzw::compress;
///
/// let data = b"TOBEORNOTTOBEORTOBEORNOT";
/// let compressed = compress(data).unwrap();
/// assert!(compressed.len() < data.len());
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(LzwEncoder::new().encode(data)?.data)
}

/// Decompress a trailer-framed LZW stream.
///
/// # Example
///
/// ```rust
/// use oxicomp_lzw::{compress, decompress};
///
/// let original = b"Hello, World!";
/// let compressed = compress(original).unwrap();
/// assert_eq!(decompress(&compressed).unwrap(), original);
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    LzwDecoder::new().decode(data)
}

/// LZW as a [`Codec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LzwCodec;

impl Codec for LzwCodec {
    type Error = LzwError;

    fn name(&self) -> &'static str {
        "LZW"
    }

    fn extension(&self) -> &'static str {
        EXTENSION
    }

    fn encode(&self, input: &[u8]) -> Result<Encoded> {
        LzwEncoder::new().encode(input)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        decompress(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT";
        let compressed = compress(original).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_310_byte_no_truncation() {
        let original = b"This is a test of compression! ".repeat(10);
        assert_eq!(original.len(), 310);

        let compressed = compress(&original).unwrap();
        let decompressed = decompress(&compressed).unwrap();

        assert_eq!(decompressed.len(), 310);
        assert_eq!(decompressed, &original[..]);
    }

    #[test]
    fn test_empty_input() {
        let compressed = compress(b"").unwrap();
        assert_eq!(compressed, vec![0]);
        assert!(decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_single_byte() {
        let compressed = compress(b"A").unwrap();
        assert_eq!(decompress(&compressed).unwrap(), b"A");
    }

    #[test]
    fn test_all_byte_values() {
        let original: Vec<u8> = (0..=255).collect();
        let compressed = compress(&original).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_large_input() {
        let original = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
        let compressed = compress(&original).unwrap();
        assert!(compressed.len() < original.len() / 2);
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_codec_trait() {
        let codec = LzwCodec;
        assert_eq!(codec.extension(), "lzw");

        let encoded = codec.encode(b"banana bandana").unwrap();
        assert_eq!(encoded.stats.output_bytes, encoded.data.len() as u64);
        assert_eq!(codec.decode(&encoded.data).unwrap(), b"banana bandana");
    }
}
