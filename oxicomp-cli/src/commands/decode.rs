//! Decode command implementation.

use crate::scheme::{CliError, Scheme, decoded_path};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Pick the scheme: explicit choice first, then the file extension.
pub fn resolve_scheme(input: &Path, scheme: Option<Scheme>) -> Result<Scheme, CliError> {
    scheme.or_else(|| Scheme::from_path(input)).ok_or_else(|| {
        format!(
            "cannot infer scheme for {}; use --scheme huffman|lzw",
            input.display()
        )
        .into()
    })
}

pub fn cmd_decode(
    input: &Path,
    output: Option<&Path>,
    scheme: Option<Scheme>,
) -> Result<PathBuf, CliError> {
    let scheme = resolve_scheme(input, scheme)?;
    let data = fs::read(input)?;
    info!(
        "decoding {} ({} bytes) with {}",
        input.display(),
        data.len(),
        scheme
    );

    let decoded = scheme.decode(&data)?;
    let output = output.map_or_else(|| decoded_path(input), Path::to_path_buf);
    fs::write(&output, &decoded)?;

    println!(
        "{} -> {}: {} -> {} bytes",
        input.display(),
        output.display(),
        data.len(),
        decoded.len()
    );
    Ok(output)
}
