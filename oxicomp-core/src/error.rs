//! Error types for OxiComp operations.
//!
//! Every failure aborts the current encode or decode pass entirely. There is
//! no partial-output recovery and no retry: compression here is a one-shot
//! deterministic transform.

use std::io;
use thiserror::Error;

/// The main error type for OxiComp operations.
#[derive(Debug, Error)]
pub enum OxiCompError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A bit writer was handed something other than 0 or 1.
    #[error("Invalid bit value: {value} (a bit must be 0 or 1)")]
    InvalidBitValue {
        /// The rejected value.
        value: u8,
    },

    /// A symbol has no entry in the derived codeword table.
    #[error("No codeword for symbol {symbol:#04x}")]
    MissingCodeword {
        /// The symbol that could not be encoded.
        symbol: u8,
    },

    /// Header declares inconsistent or impossible content.
    #[error("Malformed header: {message}")]
    MalformedHeader {
        /// Description of the header error.
        message: String,
    },

    /// Fewer bits remain than the next read requires.
    #[error(
        "Truncated stream at bit {position}: need {needed} bits, only {available} available"
    )]
    TruncatedStream {
        /// Bit position where the read was attempted.
        position: u64,
        /// Number of bits the read required.
        needed: u64,
        /// Number of bits left in the stream.
        available: u64,
    },

    /// A codeword grew longer than the bitstream can carry.
    #[error("Codeword length {length} exceeds maximum {max}")]
    CodeLengthOverflow {
        /// The offending length.
        length: usize,
        /// Maximum supported length.
        max: usize,
    },
}

/// Result type alias for OxiComp operations.
pub type Result<T> = std::result::Result<T, OxiCompError>;

impl OxiCompError {
    /// Create an invalid bit value error.
    pub fn invalid_bit(value: u8) -> Self {
        Self::InvalidBitValue { value }
    }

    /// Create a missing codeword error.
    pub fn missing_codeword(symbol: u8) -> Self {
        Self::MissingCodeword { symbol }
    }

    /// Create a malformed header error.
    pub fn malformed_header(message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            message: message.into(),
        }
    }

    /// Create a truncated stream error.
    pub fn truncated(position: u64, needed: u64, available: u64) -> Self {
        Self::TruncatedStream {
            position,
            needed,
            available,
        }
    }

    /// Create a code length overflow error.
    pub fn code_length_overflow(length: usize, max: usize) -> Self {
        Self::CodeLengthOverflow { length, max }
    }
}
