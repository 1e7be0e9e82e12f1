// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for txdict indexes.
//!
//! One trie is one self-describing blob: a fixed header, the three
//! double-array sections and a CRC32 footer. Nothing outside the blob is
//! needed to rebuild `num_keys` or any transition. A key/value map adds a
//! third file holding the key-id → value-id array with its own header and
//! footer.
//!
//! # Security Considerations
//!
//! The loader is written to be safely fed arbitrary bytes:
//! - The file must be exactly as long as the header says
//! - CRC32 footer detects corruption/truncation
//! - Section lengths are checked against `array_len` before allocation
//! - The structure pass rejects dangling parents, unreachable slots and
//!   duplicate word ids before any query can run
//!
//! # Trie File (v1)
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (32 bytes)                                          │
//! │   magic: [u8; 4] = "TXDA"                                  │
//! │   version: u8 = 1                                          │
//! │   flags: u8 (bit 0: empty word stored)                     │
//! │   reserved: [u8; 2] (zero)                                 │
//! │   num_keys, num_nodes, array_len: u32                      │
//! │   base_len, check_len, terminal_len: u32                   │
//! ├────────────────────────────────────────────────────────────┤
//! │ BASE     [u32; array_len]                                  │
//! ├────────────────────────────────────────────────────────────┤
//! │ CHECK    [u32; array_len]  (u32::MAX = free slot)          │
//! ├────────────────────────────────────────────────────────────┤
//! │ TERMINAL [u8; ceil(array_len / 8)]                         │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "ADXT"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Map File (v1)
//!
//! ```text
//! HEADER (24 bytes): "TXMP", version, reserved, count: u32,
//!                    keys_crc32: u32, values_crc32: u32, reserved
//! IDS    [u32; count]  value id for key id 0, 1, 2, ...
//! FOOTER (8 bytes): crc32 + magic "PMXT"
//! ```

mod encoding;
mod header;

pub use encoding::{
    bit_count, bit_get, bit_set, bitset_len, decode_u32_array, encode_u32_array,
};
pub use header::{
    Footer, FormatFlags, MapHeader, SectionOffsets, TrieHeader, FOOTER_MAGIC, MAGIC,
    MAP_FOOTER_MAGIC, MAP_MAGIC, MAX_ARRAY_LEN, MAX_FILE_SIZE, VERSION,
};

use std::io;

use crate::trie::DoubleArray;

// ============================================================================
// TRIE ENCODING
// ============================================================================

/// Build the header describing `trie`.
pub fn trie_header(trie: &DoubleArray) -> TrieHeader {
    let array_len = trie.array_len();
    let mut flags = FormatFlags::new();
    if trie.has_empty_word() {
        flags = flags.with_empty_word();
    }
    TrieHeader {
        version: VERSION,
        flags,
        num_keys: trie.num_keys() as u32,
        num_nodes: trie.num_nodes() as u32,
        array_len: array_len as u32,
        base_len: (array_len * 4) as u32,
        check_len: (array_len * 4) as u32,
        terminal_len: bitset_len(array_len) as u32,
    }
}

/// Serialize a trie to bytes (with CRC32 footer).
///
/// Output depends only on the trie, so the same word set always yields the
/// same bytes.
pub fn encode_trie(trie: &DoubleArray) -> Vec<u8> {
    let header = trie_header(trie);
    let total = header.section_offsets().total_size();

    let mut buf = Vec::with_capacity(total);
    header.write_to(&mut buf);
    encode_u32_array(trie.base_slots(), &mut buf);
    encode_u32_array(trie.check_slots(), &mut buf);
    buf.extend_from_slice(trie.terminal_bits());

    let crc32 = Footer::compute_crc32(&buf);
    Footer { crc32 }.write_to(&mut buf, &FOOTER_MAGIC);

    debug_assert_eq!(buf.len(), total);
    buf
}

/// Deserialize a trie from bytes (with full validation).
///
/// # Validation
///
/// 1. File size is within limits (MAX_FILE_SIZE)
/// 2. Footer magic is valid and the CRC32 matches
/// 3. Header magic and version are supported
/// 4. Section lengths agree with `array_len` and with the file size
/// 5. The double array is a well-formed trie (see `DoubleArray::from_raw_parts`)
pub fn decode_trie(bytes: &[u8]) -> io::Result<DoubleArray> {
    if bytes.len() as u64 > MAX_FILE_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "File too large: {} bytes (max {})",
                bytes.len(),
                MAX_FILE_SIZE
            ),
        ));
    }

    let min_size = TrieHeader::SIZE + Footer::SIZE;
    if bytes.len() < min_size {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "File too small: {} bytes (minimum {})",
                bytes.len(),
                min_size
            ),
        ));
    }

    Footer::read_verified(bytes, &FOOTER_MAGIC)?;
    let header = TrieHeader::read(bytes)?;

    if header.version != VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Unsupported version: {} (expected {})",
                header.version, VERSION
            ),
        ));
    }

    if header.array_len == 0 || header.array_len > MAX_ARRAY_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Invalid array length: {}", header.array_len),
        ));
    }

    let array_len = header.array_len as usize;
    if header.base_len as usize != array_len * 4
        || header.check_len as usize != array_len * 4
        || header.terminal_len as usize != bitset_len(array_len)
    {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Section lengths {}/{}/{} do not match array length {}",
                header.base_len, header.check_len, header.terminal_len, array_len
            ),
        ));
    }

    let offsets = header.section_offsets();
    if offsets.total_size() != bytes.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Section lengths mismatch: header claims {} bytes, got {} bytes",
                offsets.total_size(),
                bytes.len()
            ),
        ));
    }

    let section = |range: (usize, usize), name: &str| -> io::Result<&[u8]> {
        offsets.slice(bytes, range).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Truncated {} section", name),
            )
        })
    };

    let base = decode_u32_array(section(offsets.base, "BASE")?, array_len)?;
    let check = decode_u32_array(section(offsets.check, "CHECK")?, array_len)?;
    let terminal = section(offsets.terminal, "TERMINAL")?.to_vec();

    let trie = DoubleArray::from_raw_parts(
        base,
        check,
        terminal,
        header.num_keys as usize,
        header.num_nodes as usize,
    )?;

    if trie.has_empty_word() != header.flags.has_empty_word() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Empty-word flag disagrees with the trie",
        ));
    }

    Ok(trie)
}

// ============================================================================
// ID MAP ENCODING
// ============================================================================

/// Contents of a map id file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdMap {
    /// CRC32 of the keys trie file this map was built against.
    pub keys_crc32: u32,
    /// CRC32 of the values trie file this map was built against.
    pub values_crc32: u32,
    /// Value id for each key id.
    pub ids: Vec<u32>,
}

impl IdMap {
    /// Bind `ids` to the serialized keys and values tries.
    pub fn new(ids: Vec<u32>, keys_file: &[u8], values_file: &[u8]) -> Self {
        Self {
            keys_crc32: Footer::compute_crc32(keys_file),
            values_crc32: Footer::compute_crc32(values_file),
            ids,
        }
    }
}

/// Serialize a key-id → value-id array (with CRC32 footer).
pub fn encode_id_map(map: &IdMap) -> Vec<u8> {
    let ids = &map.ids;
    let mut buf = Vec::with_capacity(MapHeader::SIZE + ids.len() * 4 + Footer::SIZE);
    MapHeader {
        version: VERSION,
        count: ids.len() as u32,
        keys_crc32: map.keys_crc32,
        values_crc32: map.values_crc32,
    }
    .write_to(&mut buf);
    encode_u32_array(ids, &mut buf);

    let crc32 = Footer::compute_crc32(&buf);
    Footer { crc32 }.write_to(&mut buf, &MAP_FOOTER_MAGIC);
    buf
}

/// Deserialize a key-id → value-id array.
///
/// Range checks against the two tries happen in `KeyValueMap::from_parts`;
/// the checksums are compared in `KeyValueMap::open`.
pub fn decode_id_map(bytes: &[u8]) -> io::Result<IdMap> {
    if bytes.len() as u64 > MAX_FILE_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Map file too large: {} bytes", bytes.len()),
        ));
    }
    if bytes.len() < MapHeader::SIZE + Footer::SIZE {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Map file too small: {} bytes", bytes.len()),
        ));
    }

    Footer::read_verified(bytes, &MAP_FOOTER_MAGIC)?;
    let header = MapHeader::read(bytes)?;
    if header.version != VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Unsupported map version: {} (expected {})",
                header.version, VERSION
            ),
        ));
    }

    let body = &bytes[MapHeader::SIZE..bytes.len() - Footer::SIZE];
    Ok(IdMap {
        keys_crc32: header.keys_crc32,
        values_crc32: header.values_crc32,
        ids: decode_u32_array(body, header.count as usize)?,
    })
}
