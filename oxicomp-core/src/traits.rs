//! Core traits for the codecs.
//!
//! Both codecs are one-shot transforms over a complete in-memory input, so
//! the trait is a plain encode/decode pair rather than a streaming interface.

use crate::stats::EncodeStats;

/// Output of a single encode pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Encoded {
    /// The framed, self-contained encoded bytes.
    pub data: Vec<u8>,
    /// Statistics gathered while encoding.
    pub stats: EncodeStats,
}

/// A lossless single-buffer codec.
///
/// Implemented by the LZW and Huffman codecs so that front ends can drive
/// either scheme through one code path.
pub trait Codec {
    /// Error type produced by this codec.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Human-readable codec name.
    fn name(&self) -> &'static str;

    /// File extension (without the dot) for encoded output.
    fn extension(&self) -> &'static str;

    /// Encode `input` into a framed byte stream.
    fn encode(&self, input: &[u8]) -> Result<Encoded, Self::Error>;

    /// Decode a framed byte stream produced by [`encode`](Self::encode).
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>, Self::Error>;

    /// Encode `input` and return only the bytes.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, Self::Error> {
        Ok(self.encode(input)?.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Identity codec used to exercise the provided methods.
    struct Identity;

    impl Codec for Identity {
        type Error = std::io::Error;

        fn name(&self) -> &'static str {
            "identity"
        }

        fn extension(&self) -> &'static str {
            "id"
        }

        fn encode(&self, input: &[u8]) -> Result<Encoded, Self::Error> {
            Ok(Encoded {
                data: input.to_vec(),
                stats: EncodeStats {
                    symbols: input.len() as u64,
                    codewords: input.len() as u64,
                    payload_bits: input.len() as u64 * 8,
                    output_bytes: input.len() as u64,
                },
            })
        }

        fn decode(&self, input: &[u8]) -> Result<Vec<u8>, Self::Error> {
            Ok(input.to_vec())
        }
    }

    #[test]
    fn test_compress_forwards_to_encode() {
        let codec = Identity;
        assert_eq!(codec.compress(b"abc").unwrap(), b"abc");
        assert_eq!(codec.decode(b"abc").unwrap(), b"abc");
        assert_eq!(codec.encode(b"abc").unwrap().stats.rate(), 8.0);
    }
}
