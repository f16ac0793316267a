//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, SetLoggerError};
use oxicomp_core::EncodeStats;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::Path;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Log level for a `-v` repetition count.
pub fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Send log output to stderr.
pub fn init_logging(verbose: u8) -> Result<(), SetLoggerError> {
    TermLogger::init(
        log_level(verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}

/// Print the size and rate report for one encoded file.
pub fn print_stats(input: &Path, output: &Path, stats: &EncodeStats, verbose: bool) {
    println!(
        "{} -> {}: {} -> {} bytes, {:.4} bits/symbol",
        input.display(),
        output.display(),
        stats.symbols,
        stats.output_bytes,
        stats.rate()
    );

    if verbose {
        println!("  Codewords:             {}", stats.codewords);
        println!("  Payload bits:          {}", stats.payload_bits);
        println!(
            "  Avg bits per codeword: {:.4}",
            stats.avg_bits_per_codeword()
        );
        println!(
            "  Avg symbols per code:  {:.4}",
            stats.avg_symbols_per_codeword()
        );
        println!("  Space savings:         {:.1}%", stats.space_savings());
    }
}
