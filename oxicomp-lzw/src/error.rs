//! LZW-specific error types.

use oxicomp_core::OxiCompError;
use thiserror::Error;

/// LZW compression/decompression errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// A code referenced an entry the decoder cannot have built yet.
    #[error("Invalid LZW code {code} at bit position {position} (next free code is {next_code})")]
    InvalidCode {
        /// The code that was read.
        code: u32,
        /// The next dictionary index not yet inserted.
        next_code: u32,
        /// Bit position of the code.
        position: u64,
    },

    /// Code space exhausted.
    #[error("Code table full (max {max_codes} codes)")]
    TableFull {
        /// Maximum number of codes allowed.
        max_codes: u64,
    },

    /// Bitstream or framing error.
    #[error(transparent)]
    Core(#[from] OxiCompError),
}

impl LzwError {
    /// Check if the error means the payload ended mid-code.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Core(OxiCompError::TruncatedStream { .. }))
    }
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;
