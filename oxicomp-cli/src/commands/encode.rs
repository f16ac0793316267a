//! Encode command implementation.

use crate::scheme::{CliError, Scheme, encoded_path};
use crate::utils::{create_progress_bar, print_stats};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub fn cmd_encode(
    files: &[PathBuf],
    scheme: Scheme,
    output_dir: Option<&Path>,
    verbose: bool,
    progress: bool,
) -> Result<(), CliError> {
    if let Some(dir) = output_dir {
        fs::create_dir_all(dir)?;
    }

    let pb = create_progress_bar(files.len() as u64, progress);

    for input in files {
        pb.set_message(input.display().to_string());

        let output = encode_file(input, scheme, output_dir, verbose)?;
        info!("wrote {}", output.display());

        pb.inc(1);
    }

    pb.finish_with_message("done");
    Ok(())
}

/// Encode one file and return the path written.
pub fn encode_file(
    input: &Path,
    scheme: Scheme,
    output_dir: Option<&Path>,
    verbose: bool,
) -> Result<PathBuf, CliError> {
    let data = fs::read(input)?;
    info!(
        "encoding {} ({} bytes) with {}",
        input.display(),
        data.len(),
        scheme
    );

    let encoded = scheme.encode(&data)?;
    let output = encoded_path(input, scheme, output_dir);
    if same_file(input, &output) {
        return Err(format!(
            "refusing to overwrite input {}; it already has the .{} extension",
            input.display(),
            scheme.extension()
        )
        .into());
    }
    fs::write(&output, &encoded.data)?;

    print_stats(input, &output, &encoded.stats, verbose);
    Ok(output)
}

/// Check whether two paths name the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
