//! Roundtrip command implementation.

use crate::scheme::{CliError, Scheme};
use log::info;
use oxicomp_core::EncodeStats;
use std::fs;
use std::path::Path;

/// Encode `input` in memory, decode it again and check the result.
pub fn cmd_roundtrip(input: &Path, scheme: Scheme) -> Result<EncodeStats, CliError> {
    let data = fs::read(input)?;
    info!("round trip of {} with {}", input.display(), scheme);

    let encoded = scheme.encode(&data)?;
    let decoded = scheme.decode(&encoded.data)?;
    verify(&data, &decoded)?;

    let stats = encoded.stats;
    println!("File:                  {}", input.display());
    println!("Scheme:                {}", scheme);
    println!("Original size:         {} bytes", data.len());
    println!("Encoded size:          {} bytes", stats.output_bytes);
    println!("Rate:                  {:.4} bits/symbol", stats.rate());
    println!(
        "Avg bits per codeword: {:.4}",
        stats.avg_bits_per_codeword()
    );
    println!("Space savings:         {:.1}%", stats.space_savings());
    println!("Decoded output matches input");

    Ok(stats)
}

fn verify(original: &[u8], decoded: &[u8]) -> Result<(), CliError> {
    if let Some(pos) = original
        .iter()
        .zip(decoded.iter())
        .position(|(a, b)| a != b)
    {
        return Err(format!("round trip mismatch at byte {}", pos).into());
    }
    if original.len() != decoded.len() {
        return Err(format!(
            "round trip length mismatch: {} bytes in, {} bytes out",
            original.len(),
            decoded.len()
        )
        .into());
    }
    Ok(())
}
