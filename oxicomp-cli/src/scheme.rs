//! Coding schemes and output naming.

use clap::ValueEnum;
use oxicomp_core::{Codec, Encoded};
use oxicomp_huffman::HuffmanCodec;
use oxicomp_lzw::LzwCodec;
use std::fmt;
use std::path::{Path, PathBuf};

/// Error type shared by the commands.
pub type CliError = Box<dyn std::error::Error>;

/// Extension given to decoded output when no path is supplied.
pub const DECODED_EXTENSION: &str = "decoded";

/// Coding scheme selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scheme {
    /// Canonical Huffman coding (.huf)
    Huffman,
    /// LZW dictionary coding (.lzw)
    Lzw,
}

impl Scheme {
    /// Encoded file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Scheme::Huffman => HuffmanCodec.extension(),
            Scheme::Lzw => LzwCodec.extension(),
        }
    }

    /// Scheme whose extension `path` carries, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        [Scheme::Huffman, Scheme::Lzw]
            .into_iter()
            .find(|scheme| ext.eq_ignore_ascii_case(scheme.extension()))
    }

    /// Encode `data` with this scheme.
    pub fn encode(self, data: &[u8]) -> Result<Encoded, CliError> {
        match self {
            Scheme::Huffman => run_encode(&HuffmanCodec, data),
            Scheme::Lzw => run_encode(&LzwCodec, data),
        }
    }

    /// Decode `data` with this scheme.
    pub fn decode(self, data: &[u8]) -> Result<Vec<u8>, CliError> {
        match self {
            Scheme::Huffman => Ok(HuffmanCodec.decode(data)?),
            Scheme::Lzw => Ok(LzwCodec.decode(data)?),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Huffman => write!(f, "{}", HuffmanCodec.name()),
            Scheme::Lzw => write!(f, "{}", LzwCodec.name()),
        }
    }
}

fn run_encode<C: Codec>(codec: &C, data: &[u8]) -> Result<Encoded, CliError> {
    Ok(codec.encode(data)?)
}

/// Output path for encoding `input`: the extension is replaced (or added)
/// and the file lands in `output_dir` when one is given.
pub fn encoded_path(input: &Path, scheme: Scheme, output_dir: Option<&Path>) -> PathBuf {
    let renamed = input.with_extension(scheme.extension());
    match (output_dir, renamed.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => renamed,
    }
}

/// Default output path for decoding `input`.
///
/// Encoded files keep no record of the source name, so the original
/// extension cannot be restored; `<stem>.decoded` is used instead.
pub fn decoded_path(input: &Path) -> PathBuf {
    input.with_extension(DECODED_EXTENSION)
}
