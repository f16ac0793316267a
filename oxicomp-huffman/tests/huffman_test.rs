//! Huffman integration tests.

use oxicomp_core::OxiCompError;
use oxicomp_core::bitstream::trailer_payload_bits;
use oxicomp_huffman::canonical::{KRAFT_COMPLETE, kraft_sum_scaled};
use oxicomp_huffman::{
    CanonicalTable, FrequencyTable, HuffmanHeader, HuffmanTree, build_table, compress, decompress,
    encode,
};
use proptest::prelude::*;

#[test]
fn test_thirty_a_layout() {
    let compressed = compress(&[b'A'; 30]).unwrap();
    assert_eq!(&compressed[..4], &[0x00, b'A', 0x01, 0x01]);
    assert!(compressed.len() < 30);
    assert_eq!(decompress(&compressed).unwrap(), vec![b'A'; 30]);
}

#[test]
fn test_empty_roundtrip() {
    assert!(compress(b"").unwrap().is_empty());
    assert!(decompress(b"").unwrap().is_empty());
}

#[test]
fn test_skewed_distribution_beats_eight_bits() {
    let mut data = vec![b'e'; 5000];
    data.extend(std::iter::repeat_n(b't', 1500));
    data.extend(std::iter::repeat_n(b'z', 10));

    let encoded = encode(&data).unwrap();
    assert!(encoded.stats.rate() < 2.0);
    assert_eq!(decompress(&encoded.data).unwrap(), data);
}

#[test]
fn test_fibonacci_frequencies_give_long_codes() {
    // Fibonacci weights produce the deepest possible tree.
    let mut data = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for symbol in 0..20u8 {
        data.extend(std::iter::repeat_n(symbol, a));
        (a, b) = (b, a + b);
    }

    let table = build_table(&data).unwrap();
    assert_eq!(table.max_length(), 19);
    assert_eq!(decompress(&compress(&data).unwrap()).unwrap(), data);
}

#[test]
fn test_header_split_for_large_run() {
    let data: Vec<u8> = (0..=255u8).cycle().take(256 * 4).collect();
    let compressed = compress(&data).unwrap();

    let (header, consumed) = HuffmanHeader::parse(&compressed).unwrap();
    assert_eq!(header.symbol_count(), 256);
    assert_eq!(header.runs().len(), 2);
    assert_eq!(consumed, 1 + 256 + 4);
    assert_eq!(decompress(&compressed).unwrap(), data);
}

#[test]
fn test_payload_bits_match_trailer() {
    let data = b"she sells sea shells by the sea shore";
    let encoded = encode(data).unwrap();
    let (header, consumed) = HuffmanHeader::parse(&encoded.data).unwrap();

    assert_eq!(consumed, header.encoded_len());
    assert_eq!(
        trailer_payload_bits(&encoded.data[consumed..]).unwrap(),
        encoded.stats.payload_bits
    );
}

#[test]
fn test_corrupted_header_is_rejected() {
    let mut compressed = compress(b"hello world").unwrap();
    // Claim more symbols than the header holds.
    compressed[0] = 0xFF;
    assert!(matches!(
        decompress(&compressed),
        Err(OxiCompError::MalformedHeader { .. })
    ));
}

#[test]
fn test_truncated_payload() {
    let mut compressed = compress(b"hello world, hello huffman").unwrap();
    let trailer = compressed.pop().unwrap();
    // Keep the byte boundary but cut bits off the final byte.
    let valid = if trailer == 0 { 8 } else { trailer };
    let cut = if valid > 1 { valid - 1 } else { 8 };
    compressed.push(cut);

    match decompress(&compressed) {
        Ok(out) => assert_ne!(out, b"hello world, hello huffman"),
        Err(e) => assert!(matches!(
            e,
            OxiCompError::TruncatedStream { .. } | OxiCompError::MalformedHeader { .. }
        )),
    }
}

fn table_of(data: &[u8]) -> CanonicalTable {
    let map = HuffmanTree::build(&FrequencyTable::from_bytes(data))
        .codewords()
        .unwrap();
    CanonicalTable::from_codeword_map(&map).unwrap()
}

proptest! {
    #[test]
    fn prop_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let compressed = compress(&data).unwrap();
        prop_assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn prop_kraft_equality(data in proptest::collection::vec(0u8..32, 1..2048)) {
        let table = table_of(&data);
        let sum = kraft_sum_scaled(table.entries().iter().map(|e| e.codeword.length()));
        if table.len() == 1 {
            prop_assert_eq!(sum, KRAFT_COMPLETE / 2);
        } else {
            prop_assert_eq!(sum, KRAFT_COMPLETE);
        }
    }

    #[test]
    fn prop_prefix_free(data in proptest::collection::vec(any::<u8>(), 1..2048)) {
        prop_assert!(table_of(&data).codeword_map().is_prefix_free());
    }

    #[test]
    fn prop_header_roundtrip(data in proptest::collection::vec(any::<u8>(), 1..2048)) {
        let table = table_of(&data);
        let header = HuffmanHeader::from_table(&table).unwrap();
        let (parsed, consumed) = HuffmanHeader::parse(&header.to_bytes()).unwrap();

        prop_assert_eq!(consumed, header.encoded_len());
        prop_assert_eq!(&parsed, &header);
        prop_assert_eq!(parsed.to_table().unwrap(), table);
    }
}
