//! # OxiComp Core
//!
//! Core components for the OxiComp codec workbench.
//!
//! This crate provides the building blocks shared by the LZW and Huffman
//! codecs:
//!
//! - [`bitstream`]: MSB-first bit writer, materialized bit reader, and the
//!   valid-bit trailer that frames a payload's exact bit length
//! - [`traits`]: The [`Codec`] trait both schemes implement
//! - [`stats`]: Encoding statistics (rate, bits per codeword)
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: Front end                                           │
//! │     oxicomp CLI (encode, decode, roundtrip, info)      │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     LZW (adaptive dictionary), canonical Huffman       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitWriter, BitBuffer/BitCursor, trailer framing    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxicomp_core::bitstream::{BitBuffer, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0x1FF, 9).unwrap();
//! writer.flush(true).unwrap();
//!
//! let bits = BitBuffer::from_trailer_framed(&writer.into_inner()).unwrap();
//! assert_eq!(bits.len(), 9);
//! assert_eq!(bits.cursor().read_bits(9).unwrap(), 0x1FF);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod stats;
pub mod traits;

// Re-exports for convenience
pub use bitstream::{BitBuffer, BitCursor, BitWriter};
pub use error::{OxiCompError, Result};
pub use stats::EncodeStats;
pub use traits::{Codec, Encoded};

/// Number of distinct byte symbols.
pub const ALPHABET_SIZE: usize = 256;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitBuffer, BitCursor, BitWriter};
    pub use crate::error::{OxiCompError, Result};
    pub use crate::stats::EncodeStats;
    pub use crate::traits::{Codec, Encoded};
}
