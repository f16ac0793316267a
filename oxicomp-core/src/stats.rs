//! Encoding statistics.

/// Counters gathered during one encode pass.
///
/// A "codeword" is one emitted code: an LZW dictionary index or one Huffman
/// codeword. The rate is reported in bits per input symbol (byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeStats {
    /// Input symbols (bytes) consumed.
    pub symbols: u64,
    /// Codewords emitted.
    pub codewords: u64,
    /// Payload bits emitted, excluding header, padding and trailer.
    pub payload_bits: u64,
    /// Total size of the framed output in bytes.
    pub output_bytes: u64,
}

impl EncodeStats {
    /// Average payload bits per input symbol.
    pub fn rate(&self) -> f64 {
        if self.symbols == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.symbols as f64
        }
    }

    /// Average payload bits per emitted codeword.
    pub fn avg_bits_per_codeword(&self) -> f64 {
        if self.codewords == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.codewords as f64
        }
    }

    /// Average input symbols covered by one codeword.
    pub fn avg_symbols_per_codeword(&self) -> f64 {
        if self.codewords == 0 {
            0.0
        } else {
            self.symbols as f64 / self.codewords as f64
        }
    }

    /// Output size divided by input size.
    pub fn compression_ratio(&self) -> f64 {
        if self.symbols == 0 {
            1.0
        } else {
            self.output_bytes as f64 / self.symbols as f64
        }
    }

    /// Get the space savings as a percentage.
    pub fn space_savings(&self) -> f64 {
        if self.symbols == 0 {
            0.0
        } else {
            (1.0 - self.compression_ratio()) * 100.0
        }
    }
}
