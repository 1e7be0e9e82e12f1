//! Negative tests for index file validation.
//!
//! Every malformed input must be rejected at load with `Corrupt`, never
//! panic and never produce an index that misbehaves later.

use crate::common::sample_index;
use txdict::binary::{
    decode_id_map, decode_trie, encode_id_map, Footer, IdMap, TrieHeader, FOOTER_MAGIC, MAGIC,
};
use txdict::TrieIndex;

fn sample_bytes() -> Vec<u8> {
    sample_index().to_bytes()
}

/// Recompute the footer CRC after tampering with the body.
fn reseal(bytes: &mut [u8]) {
    let end = bytes.len() - Footer::SIZE;
    let crc32 = Footer::compute_crc32(&bytes[..end]);
    bytes[end..end + 4].copy_from_slice(&crc32.to_le_bytes());
}

#[test]
fn test_layout_markers() {
    let bytes = sample_bytes();
    assert_eq!(&bytes[..4], &MAGIC);
    assert_eq!(&bytes[bytes.len() - 4..], &FOOTER_MAGIC);
}

#[test]
fn test_empty_input_rejected() {
    assert!(TrieIndex::from_bytes(&[]).unwrap_err().is_corrupt());
}

#[test]
fn test_every_truncation_rejected() {
    let bytes = sample_bytes();
    for len in 0..bytes.len() {
        assert!(
            TrieIndex::from_bytes(&bytes[..len]).is_err(),
            "truncated to {} bytes was accepted",
            len
        );
    }
}

#[test]
fn test_every_single_bit_flip_rejected() {
    let bytes = sample_bytes();
    for i in 0..bytes.len() {
        let mut damaged = bytes.clone();
        damaged[i] ^= 0x01;
        assert!(
            TrieIndex::from_bytes(&damaged).is_err(),
            "bit flip at byte {} was accepted",
            i
        );
    }
}

#[test]
fn test_wrong_magic_rejected_even_with_valid_crc() {
    let mut bytes = sample_bytes();
    bytes[0] = b'X';
    reseal(&mut bytes);
    assert!(TrieIndex::from_bytes(&bytes).unwrap_err().is_corrupt());
}

#[test]
fn test_wrong_version_rejected() {
    let mut bytes = sample_bytes();
    bytes[4] = 99;
    reseal(&mut bytes);
    let err = decode_trie(&bytes).unwrap_err();
    assert!(err.to_string().contains("version"), "{}", err);
}

#[test]
fn test_inflated_key_count_rejected() {
    let mut bytes = sample_bytes();
    // num_keys lives right after magic, version, flags and reserved bytes
    let num_keys = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
    bytes[8..12].copy_from_slice(&(num_keys + 1).to_le_bytes());
    reseal(&mut bytes);
    assert!(TrieIndex::from_bytes(&bytes).unwrap_err().is_corrupt());
}

#[test]
fn test_unknown_flag_bits_rejected() {
    let mut bytes = sample_bytes();
    bytes[5] |= 0x80;
    reseal(&mut bytes);
    assert!(TrieIndex::from_bytes(&bytes).unwrap_err().is_corrupt());
}

#[test]
fn test_nonzero_reserved_bytes_rejected() {
    for at in [6, 7] {
        let mut bytes = sample_bytes();
        bytes[at] = 0x7f;
        reseal(&mut bytes);
        assert!(
            TrieIndex::from_bytes(&bytes).unwrap_err().is_corrupt(),
            "reserved byte {} accepted",
            at
        );
    }
}

#[test]
fn test_accepted_bytes_reencode_identically() {
    // Every header byte either round-trips or is rejected.
    let bytes = sample_bytes();
    for at in 4..TrieHeader::SIZE {
        for value in [0x00, 0x01, 0x80, 0xff] {
            let mut edited = bytes.clone();
            edited[at] = value;
            reseal(&mut edited);
            if let Ok(index) = TrieIndex::from_bytes(&edited) {
                assert_eq!(index.to_bytes(), edited, "byte {} = {:#x}", at, value);
            }
        }
    }
}

#[test]
fn test_id_map_reserved_bytes_rejected() {
    let map = IdMap::new(vec![0, 1], b"keys", b"values");
    let bytes = encode_id_map(&map);
    for at in [5, 6, 7, 20, 21, 22, 23] {
        let mut edited = bytes.clone();
        edited[at] = 9;
        reseal(&mut edited);
        assert!(decode_id_map(&edited).is_err(), "byte {} accepted", at);
    }
}

#[test]
fn test_trailing_garbage_rejected() {
    let mut bytes = sample_bytes();
    bytes.extend_from_slice(b"junk");
    assert!(TrieIndex::from_bytes(&bytes).is_err());
}

#[test]
fn test_header_size_is_fixed() {
    assert_eq!(TrieHeader::SIZE, 32);
    assert_eq!(Footer::SIZE, 8);
}

#[test]
fn test_corrupt_file_fails_at_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.idx");
    let mut bytes = sample_bytes();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0xFF;
    std::fs::write(&path, &bytes).unwrap();

    let err = TrieIndex::open(&path).unwrap_err();
    assert!(err.is_corrupt(), "got {err:?}");
}
