//! # OxiComp-Huffman
//!
//! Pure Rust canonical Huffman coding for byte streams.
//!
//! ## Pipeline
//!
//! ```text
//! bytes -> FrequencyTable -> HuffmanTree -> CodewordMap -> CanonicalTable
//!       -> HuffmanHeader + codeword payload + valid-bit trailer
//! ```
//!
//! The tree only decides code lengths. Codewords are reassigned canonically,
//! so the header carries lengths alone and the decoder rebuilds the exact
//! same table.
//!
//! ## File Format
//!
//! | Field | Size |
//! |-------|------|
//! | symbol count − 1 | 1 byte |
//! | symbols in canonical order | N bytes |
//! | `(count, length)` runs | 2 bytes each |
//! | codeword payload, MSB-first | variable |
//! | valid bits in the last payload byte (0 = 8) | 1 byte |
//!
//! Empty input encodes to an empty file. Input with one distinct byte value
//! uses the one-bit codeword `0`.
//!
//! ## Example
//!
//! ```rust
//! use oxicomp_huffman::{compress, decompress};
//!
//! let original = b"abracadabra";
//! let compressed = compress(original).unwrap();
//! assert_eq!(decompress(&compressed).unwrap(), original);
//! ```
//!
//! ## Features
//!
//! - `parallel`: count byte frequencies across the rayon pool. The result
//!   is byte-identical to the serial path.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod canonical;
pub mod codeword;
pub mod decode;
pub mod encode;
pub mod frequency;
pub mod header;
pub mod tree;

pub use canonical::{CanonicalEntry, CanonicalTable};
pub use codeword::{Codeword, CodewordMap};
pub use decode::{CanonicalDecoder, decode};
pub use encode::{build_table, encode, encode_with_table};
pub use frequency::FrequencyTable;
pub use header::{HuffmanHeader, LengthRun};
pub use tree::HuffmanTree;

use oxicomp_core::error::{OxiCompError, Result};
use oxicomp_core::{Codec, Encoded};

/// Longest codeword the format can carry.
pub const MAX_CODE_LENGTH: u8 = 64;

/// File extension for Huffman-encoded output.
pub const EXTENSION: &str = "huf";

/// Compress data with canonical Huffman coding.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Ok(encode(data)?.data)
}

/// Decompress a Huffman file.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decode(data)
}

/// Canonical Huffman as a [`Codec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec;

impl Codec for HuffmanCodec {
    type Error = OxiCompError;

    fn name(&self) -> &'static str {
        "Huffman"
    }

    fn extension(&self) -> &'static str {
        EXTENSION
    }

    fn encode(&self, input: &[u8]) -> Result<Encoded> {
        encode(input)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        decode(input)
    }
}
