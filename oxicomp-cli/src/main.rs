//! OxiComp CLI
//!
//! Encode and decode files with LZW or canonical Huffman coding.

mod commands;
mod scheme;
mod utils;

use clap::{ArgAction, Parser, Subcommand};
use commands::{cmd_decode, cmd_encode, cmd_info, cmd_roundtrip};
use scheme::Scheme;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxicomp")]
#[command(author, version, about = "Pure Rust LZW and Huffman file coder")]
#[command(long_about = "
OxiComp encodes files with LZW dictionary coding or canonical Huffman coding.

Examples:
  oxicomp encode notes.txt --scheme huffman
  oxicomp encode *.log --scheme lzw -o packed/ -P
  oxicomp decode notes.huf
  oxicomp decode blob.bin --scheme lzw -o blob.txt
  oxicomp roundtrip notes.txt --scheme lzw
  oxicomp info notes.huf
")]
struct Cli {
    /// Increase log detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode one or more files
    #[command(alias = "e")]
    Encode {
        /// Files to encode
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Coding scheme
        #[arg(short, long, value_enum)]
        scheme: Scheme,

        /// Directory for the encoded files (default: next to each input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Decode an encoded file
    #[command(alias = "d")]
    Decode {
        /// Encoded file
        file: PathBuf,

        /// Output path (default: <stem>.decoded)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Coding scheme (default: from the file extension)
        #[arg(short, long, value_enum)]
        scheme: Option<Scheme>,
    },

    /// Encode, decode and verify a file in memory
    #[command(alias = "r")]
    Roundtrip {
        /// File to check
        file: PathBuf,

        /// Coding scheme
        #[arg(short, long, value_enum)]
        scheme: Scheme,
    },

    /// Show information about an encoded file
    #[command(alias = "i")]
    Info {
        /// Encoded file
        file: PathBuf,

        /// Coding scheme (default: from the file extension)
        #[arg(short, long, value_enum)]
        scheme: Option<Scheme>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = utils::init_logging(cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = match cli.command {
        Commands::Encode {
            files,
            scheme,
            output,
            progress,
        } => cmd_encode(&files, scheme, output.as_deref(), cli.verbose > 0, progress),
        Commands::Decode {
            file,
            output,
            scheme,
        } => cmd_decode(&file, output.as_deref(), scheme).map(|_| ()),
        Commands::Roundtrip { file, scheme } => cmd_roundtrip(&file, scheme).map(|_| ()),
        Commands::Info { file, scheme } => cmd_info(&file, scheme),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
