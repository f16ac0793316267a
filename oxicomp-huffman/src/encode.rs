//! Huffman encoding.

use crate::canonical::CanonicalTable;
use crate::codeword::Codeword;
use crate::frequency::FrequencyTable;
use crate::header::HuffmanHeader;
use crate::tree::HuffmanTree;
use log::debug;
use oxicomp_core::bitstream::{BitWriter, MAX_BITS_PER_CALL};
use oxicomp_core::error::{OxiCompError, Result};
use oxicomp_core::{EncodeStats, Encoded};
use std::io::Write;

/// Count byte frequencies, on the rayon pool when built with `parallel`.
pub fn count_frequencies(input: &[u8]) -> FrequencyTable {
    #[cfg(feature = "parallel")]
    {
        FrequencyTable::from_bytes_parallel(input)
    }
    #[cfg(not(feature = "parallel"))]
    {
        FrequencyTable::from_bytes(input)
    }
}

/// Build the canonical code for `input`: frequencies, tree, tree codewords,
/// then canonical reassignment.
pub fn build_table(input: &[u8]) -> Result<CanonicalTable> {
    let freqs = count_frequencies(input);
    let tree = HuffmanTree::build(&freqs);
    let map = tree.codewords()?;
    let table = CanonicalTable::from_codeword_map(&map)?;

    debug!(
        "Huffman model: {} symbols over {} bytes, lengths {}..={}",
        table.len(),
        freqs.total(),
        table.min_length(),
        table.max_length()
    );

    Ok(table)
}

/// Encode `input` into a header, the codeword payload and a valid-bit
/// trailer. Empty input encodes to nothing.
pub fn encode(input: &[u8]) -> Result<Encoded> {
    if input.is_empty() {
        return Ok(Encoded::default());
    }
    let table = build_table(input)?;
    encode_with_table(input, &table)
}

/// Encode `input` with a prepared table.
///
/// Fails with `MissingCodeword` if `input` holds a byte the table lacks.
pub fn encode_with_table(input: &[u8], table: &CanonicalTable) -> Result<Encoded> {
    if input.is_empty() {
        return Ok(Encoded::default());
    }

    let header = HuffmanHeader::from_table(table)?;
    let mut out = Vec::with_capacity(header.encoded_len() + input.len() / 2 + 1);
    header.write_to(&mut out)?;

    let mut writer = BitWriter::new(out);
    for &byte in input {
        let codeword = table
            .codeword(byte)
            .ok_or(OxiCompError::missing_codeword(byte))?;
        write_codeword(&mut writer, codeword)?;
    }
    let payload_bits = writer.bits_written();
    writer.flush(true)?;
    let data = writer.into_inner();

    debug!(
        "Huffman encoded {} bytes: header {} bytes, payload {} bits",
        input.len(),
        header.encoded_len(),
        payload_bits
    );

    let stats = EncodeStats {
        symbols: input.len() as u64,
        codewords: input.len() as u64,
        payload_bits,
        output_bytes: data.len() as u64,
    };
    Ok(Encoded { data, stats })
}

/// Write a codeword MSB-first, in pieces the bit writer accepts.
pub fn write_codeword<W: Write>(writer: &mut BitWriter<W>, codeword: Codeword) -> Result<()> {
    let mut remaining = codeword.length();
    while remaining > 0 {
        let take = remaining.min(MAX_BITS_PER_CALL);
        remaining -= take;
        let chunk = (codeword.bits() >> remaining) & ((1u64 << take) - 1);
        writer.write_bits(chunk as u32, take)?;
    }
    Ok(())
}
