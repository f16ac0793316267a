//! Bit-level I/O shared by the LZW and Huffman codecs.
//!
//! This module provides [`BitWriter`] for packing bits into bytes and
//! [`BitBuffer`]/[`BitCursor`] for reading a fully materialized bit sequence
//! back with explicit widths.
//!
//! # Bit Ordering
//!
//! Both codecs use MSB-first (Most Significant Bit first) ordering within
//! bytes: the first bit written lands in bit 7 of the first byte.
//!
//! # Valid-bit Trailer
//!
//! [`BitWriter::flush`] can append one trailer byte recording how many bits of
//! the preceding byte are real payload (1-7, or 0 meaning all 8). With the
//! trailer present, [`BitBuffer::from_trailer_framed`] recovers the exact
//! payload bit length, so zero padding is never mistaken for data.
//!
//! # Example
//!
//! ```
//! use oxicomp_core::bitstream::{BitBuffer, BitWriter};
//!
//! // Writing bits
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();  // Write 3 bits
//! writer.write_bits(0b1100, 4).unwrap(); // Write 4 bits
//! writer.flush(true).unwrap();           // Pad and record 7 valid bits
//! let output = writer.into_inner();
//! assert_eq!(output, vec![0b1011_1000, 7]);
//!
//! // Reading bits
//! let bits = BitBuffer::from_trailer_framed(&output).unwrap();
//! let mut cursor = bits.cursor();
//! assert_eq!(cursor.read_bits(3).unwrap(), 0b101);
//! assert_eq!(cursor.read_bits(4).unwrap(), 0b1100);
//! assert!(cursor.is_at_end());
//! ```

use crate::error::{OxiCompError, Result};
use std::io::{Read, Write};

/// Maximum number of bits [`BitWriter::write_bits`] and
/// [`BitCursor::read_bits`] handle in one call.
pub const MAX_BITS_PER_CALL: u8 = 32;

/// A bit-level writer that wraps any `Write` implementation.
///
/// Bits accumulate MSB-first into an 8-bit buffer. Every eighth bit emits a
/// byte to the underlying writer and resets the buffer. Call
/// [`flush`](Self::flush) when done to write the final partial byte.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Partial byte (MSB-first).
    buffer: u8,
    /// Number of bits in buffer (0-7).
    bits_in_buffer: u8,
    /// Payload bits written since the last flush (padding and trailer excluded).
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consume this `BitWriter` and return the underlying writer.
    ///
    /// Any partial byte that has not been flushed is discarded.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Get the number of payload bits written since the last flush.
    ///
    /// Read it before [`flush`](Self::flush), which starts a new count.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write a single bit, which must be 0 or 1.
    pub fn write_bit(&mut self, bit: u8) -> Result<()> {
        if bit > 1 {
            return Err(OxiCompError::invalid_bit(bit));
        }
        self.push_bit(bit)
    }

    /// Write the low `count` bits of `value`, most significant first.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write (right-aligned)
    /// * `count` - Number of bits to write (0-32)
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(
            count <= MAX_BITS_PER_CALL,
            "Cannot write more than 32 bits at once"
        );

        for shift in (0..count).rev() {
            self.push_bit(((value >> shift) & 1) as u8)?;
        }
        Ok(())
    }

    #[inline]
    fn push_bit(&mut self, bit: u8) -> Result<()> {
        self.buffer |= bit << (7 - self.bits_in_buffer);
        self.bits_in_buffer += 1;
        self.total_bits_written += 1;

        if self.bits_in_buffer == 8 {
            self.writer.write_all(&[self.buffer])?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
        Ok(())
    }

    /// Pad the partial byte with zeros, write it, and optionally append the
    /// valid-bit trailer.
    ///
    /// The trailer byte holds the number of real bits in the byte before it,
    /// with 0 meaning all 8. The writer is reset afterwards, bit count
    /// included, and can be reused for a new stream.
    ///
    /// # Returns
    ///
    /// The valid-bit count that was (or would have been) recorded.
    pub fn flush(&mut self, write_trailer: bool) -> Result<u8> {
        let valid_bits = self.bits_in_buffer;
        if self.bits_in_buffer > 0 {
            self.writer.write_all(&[self.buffer])?;
        }
        if write_trailer {
            self.writer.write_all(&[valid_bits])?;
        }
        self.writer.flush()?;

        self.buffer = 0;
        self.bits_in_buffer = 0;
        self.total_bits_written = 0;
        Ok(valid_bits)
    }
}

/// A finite, indexable, restartable sequence of bits in stream order.
///
/// The bytes are kept as-is and bits are addressed MSB-first, so
/// materializing an input costs no more memory than the input itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitBuffer {
    /// Backing bytes.
    bytes: Vec<u8>,
    /// Number of meaningful bits (at most `bytes.len() * 8`).
    len: u64,
}

impl BitBuffer {
    /// Create a bit sequence covering the first `bit_len` bits of `bytes`.
    pub fn new(bytes: impl Into<Vec<u8>>, bit_len: u64) -> Result<Self> {
        let bytes = bytes.into();
        let available = bytes.len() as u64 * 8;
        if bit_len > available {
            return Err(OxiCompError::truncated(0, bit_len, available));
        }
        Ok(Self {
            bytes,
            len: bit_len,
        })
    }

    /// Create a bit sequence covering every bit of `bytes`.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let len = bytes.len() as u64 * 8;
        Self { bytes, len }
    }

    /// Materialize an entire reader as a bit sequence.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(bytes))
    }

    /// Interpret `data` as payload bytes followed by a valid-bit trailer.
    ///
    /// The trailer byte says how many bits of the last payload byte are real
    /// (0 means all 8). A lone trailer byte yields an empty sequence.
    pub fn from_trailer_framed(data: &[u8]) -> Result<Self> {
        let bit_len = trailer_payload_bits(data)?;
        Self::new(&data[..data.len() - 1], bit_len)
    }

    /// Number of bits in the sequence.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Check if the sequence holds no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the bit at `index`, or `None` past the end.
    pub fn get(&self, index: u64) -> Option<bool> {
        (index < self.len).then(|| self.bit_at(index))
    }

    #[inline]
    fn bit_at(&self, index: u64) -> bool {
        let byte = self.bytes[(index / 8) as usize];
        (byte >> (7 - (index % 8))) & 1 == 1
    }

    /// Iterate over all bits in stream order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bit_at(i))
    }

    /// Start a cursor at the first bit.
    pub fn cursor(&self) -> BitCursor<'_> {
        self.cursor_at(0)
    }

    /// Start a cursor at `position` (clamped to the end of the sequence).
    pub fn cursor_at(&self, position: u64) -> BitCursor<'_> {
        BitCursor {
            buffer: self,
            position: position.min(self.len),
        }
    }

    /// Get the backing bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Compute the payload bit length of trailer-framed `data`.
pub fn trailer_payload_bits(data: &[u8]) -> Result<u64> {
    let (&trailer, payload) = data
        .split_last()
        .ok_or_else(|| OxiCompError::malformed_header("missing valid-bit trailer"))?;

    if trailer > 8 {
        return Err(OxiCompError::malformed_header(format!(
            "valid-bit trailer {} exceeds 8",
            trailer
        )));
    }

    if payload.is_empty() {
        if trailer != 0 {
            return Err(OxiCompError::malformed_header(format!(
                "valid-bit trailer {} with no payload byte",
                trailer
            )));
        }
        return Ok(0);
    }

    let last_bits = if trailer == 0 { 8 } else { trailer as u64 };
    Ok((payload.len() as u64 - 1) * 8 + last_bits)
}

/// A moving read position over a [`BitBuffer`].
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    buffer: &'a BitBuffer,
    position: u64,
}

impl BitCursor<'_> {
    /// Current bit position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Number of bits left to read.
    pub fn remaining(&self) -> u64 {
        self.buffer.len - self.position
    }

    /// Check if every bit has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.buffer.len
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.is_at_end() {
            return Err(OxiCompError::truncated(self.position, 1, 0));
        }
        let bit = self.buffer.bit_at(self.position);
        self.position += 1;
        Ok(bit)
    }

    /// Read `width` bits as an MSB-first integer.
    ///
    /// Fails with `TruncatedStream` if fewer than `width` bits remain; the
    /// cursor does not move in that case.
    pub fn read_bits(&mut self, width: u8) -> Result<u32> {
        debug_assert!(
            width <= MAX_BITS_PER_CALL,
            "Cannot read more than 32 bits at once"
        );

        let remaining = self.remaining();
        if (width as u64) > remaining {
            return Err(OxiCompError::truncated(
                self.position,
                width as u64,
                remaining,
            ));
        }

        let mut value = 0u32;
        for _ in 0..width {
            value = (value << 1) | self.buffer.bit_at(self.position) as u32;
            self.position += 1;
        }
        Ok(value)
    }
}
