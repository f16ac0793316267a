//! Info command implementation.

use crate::commands::decode::resolve_scheme;
use crate::scheme::{CliError, Scheme};
use oxicomp_core::bitstream::trailer_payload_bits;
use oxicomp_huffman::HuffmanHeader;
use std::fs;
use std::path::Path;

pub fn cmd_info(input: &Path, scheme: Option<Scheme>) -> Result<(), CliError> {
    let scheme = resolve_scheme(input, scheme)?;
    let data = fs::read(input)?;

    println!("Encoded File Information");
    println!("========================");
    println!("File: {}", input.display());
    println!("Scheme: {}", scheme);
    println!("Size: {} bytes", data.len());

    match scheme {
        Scheme::Huffman => print_huffman(&data)?,
        Scheme::Lzw => {
            println!();
            println!("Payload bits: {}", trailer_payload_bits(&data)?);
        }
    }

    let decoded = scheme.decode(&data)?;
    println!("Decoded size: {} bytes", decoded.len());
    Ok(())
}

fn print_huffman(data: &[u8]) -> Result<(), CliError> {
    if data.is_empty() {
        println!();
        println!("Empty stream (no symbols)");
        return Ok(());
    }

    let (header, consumed) = HuffmanHeader::parse(data)?;
    let table = header.to_table()?;

    println!();
    println!("Header: {} bytes", consumed);
    println!("  Symbols: {}", header.symbol_count());
    println!("  Kraft sum: {}", table.kraft_sum());
    println!("  Code lengths:");
    for (length, count) in table.length_histogram() {
        println!("    {:>2} bits: {} symbols", length, count);
    }
    println!(
        "Payload bits: {}",
        trailer_payload_bits(&data[consumed..])?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_for_both_schemes() {
        let dir = tempfile::tempdir().unwrap();
        for scheme in [Scheme::Huffman, Scheme::Lzw] {
            let path = dir.path().join(format!("sample.{}", scheme.extension()));
            let encoded = scheme.encode(b"abracadabra").unwrap();
            fs::write(&path, &encoded.data).unwrap();

            cmd_info(&path, None).unwrap();
        }
    }

    #[test]
    fn test_info_empty_huffman() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.huf");
        fs::write(&path, b"").unwrap();
        cmd_info(&path, None).unwrap();
    }

    #[test]
    fn test_info_rejects_bad_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.huf");
        fs::write(&path, [0x05, b'a']).unwrap();
        assert!(cmd_info(&path, None).is_err());
    }
}
