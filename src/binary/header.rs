// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format header and footer structures.
//!
//! The trie header is 32 bytes of fixed-size fields, parsed in one read before
//! anything else. It records the key count, the node count and the byte length
//! of every section, so the loader can check the file is exactly as long as
//! the header claims before touching the arrays.
//!
//! The footer is 8 bytes: a CRC32 checksum over everything before it, plus a
//! magic number (the header magic reversed). If the footer is wrong, something
//! got corrupted or truncated. Don't trust the data.
//!
//! `SectionOffsets` is the single source of truth for the file layout. Every
//! piece of code that reads or writes sections goes through it.

use std::io;

use crc32fast::Hasher as Crc32Hasher;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "TXDA" in ASCII (trie header)
pub const MAGIC: [u8; 4] = *b"TXDA";

/// Footer magic: "ADXT" (reversed, marks valid trie file end)
pub const FOOTER_MAGIC: [u8; 4] = *b"ADXT";

/// Magic bytes: "TXMP" (key-id → value-id map header)
pub const MAP_MAGIC: [u8; 4] = *b"TXMP";

/// Footer magic for map files: "PMXT"
pub const MAP_FOOTER_MAGIC: [u8; 4] = *b"PMXT";

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum file size: 16 GiB
pub const MAX_FILE_SIZE: u64 = 1 << 34;

/// Maximum number of double-array slots, so every section length fits a u32.
pub const MAX_ARRAY_LEN: u32 = u32::MAX / 4;

// ============================================================================
// FLAGS
// ============================================================================

/// Format flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags(pub(crate) u8);

impl FormatFlags {
    pub const HAS_EMPTY_WORD: u8 = 0b0000_0001;

    /// Every bit this version defines.
    pub const KNOWN: u8 = Self::HAS_EMPTY_WORD;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_empty_word(mut self) -> Self {
        self.0 |= Self::HAS_EMPTY_WORD;
        self
    }

    pub fn has_empty_word(self) -> bool {
        self.0 & Self::HAS_EMPTY_WORD != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

// ============================================================================
// TRIE HEADER
// ============================================================================

/// Trie file header (32 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieHeader {
    pub version: u8,
    pub flags: FormatFlags,
    /// Number of stored words (terminal nodes)
    pub num_keys: u32,
    /// Number of trie nodes, root included, end-of-word leaves excluded
    pub num_nodes: u32,
    /// Slots in the base and check arrays
    pub array_len: u32,
    pub base_len: u32,
    pub check_len: u32,
    pub terminal_len: u32,
}

impl TrieHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 2 (reserved) + 6*4 (u32s) = 32
    pub const SIZE: usize = 32;

    /// Compute section byte offsets for this header.
    pub fn section_offsets(&self) -> SectionOffsets {
        SectionOffsets::from_header(self)
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&MAGIC);
        buf.push(self.version);
        buf.push(self.flags.0);
        buf.extend_from_slice(&[0u8; 2]); // reserved
        buf.extend_from_slice(&self.num_keys.to_le_bytes());
        buf.extend_from_slice(&self.num_nodes.to_le_bytes());
        buf.extend_from_slice(&self.array_len.to_le_bytes());
        buf.extend_from_slice(&self.base_len.to_le_bytes());
        buf.extend_from_slice(&self.check_len.to_le_bytes());
        buf.extend_from_slice(&self.terminal_len.to_le_bytes());
    }

    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("File too short for header: {} bytes", bytes.len()),
            ));
        }
        if bytes[0..4] != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid magic: expected TXDA, got {:?}", &bytes[0..4]),
            ));
        }
        if bytes[5] & !FormatFlags::KNOWN != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown flag bits: {:#010b}", bytes[5]),
            ));
        }
        check_reserved(&bytes[6..8])?;

        Ok(Self {
            version: bytes[4],
            flags: FormatFlags(bytes[5]),
            num_keys: read_u32(bytes, 8),
            num_nodes: read_u32(bytes, 12),
            array_len: read_u32(bytes, 16),
            base_len: read_u32(bytes, 20),
            check_len: read_u32(bytes, 24),
            terminal_len: read_u32(bytes, 28),
        })
    }
}

/// Reserved bytes are written as zero and must read back as zero, so a
/// decoded file always re-encodes to the same bytes.
fn check_reserved(bytes: &[u8]) -> io::Result<()> {
    if bytes.iter().any(|&b| b != 0) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Reserved header bytes are not zero: {:?}", bytes),
        ));
    }
    Ok(())
}

#[inline]
pub(crate) fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

// ============================================================================
// SECTION OFFSETS
// ============================================================================

/// Section byte offsets for the trie file layout.
///
/// ```text
/// 1. HEADER    [32B]
/// 2. BASE      [base_len]      u32 LE per slot
/// 3. CHECK     [check_len]     u32 LE per slot
/// 4. TERMINAL  [terminal_len]  one bit per slot
/// 5. FOOTER    [8B]            CRC32 + magic
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SectionOffsets {
    pub base: (usize, usize),
    pub check: (usize, usize),
    pub terminal: (usize, usize),
    pub footer: (usize, usize),
}

impl SectionOffsets {
    pub fn from_header(h: &TrieHeader) -> Self {
        let mut pos = TrieHeader::SIZE;

        let base_start = pos;
        pos += h.base_len as usize;
        let base_end = pos;

        let check_start = pos;
        pos += h.check_len as usize;
        let check_end = pos;

        let terminal_start = pos;
        pos += h.terminal_len as usize;
        let terminal_end = pos;

        Self {
            base: (base_start, base_end),
            check: (check_start, check_end),
            terminal: (terminal_start, terminal_end),
            footer: (pos, pos + Footer::SIZE),
        }
    }

    /// Expected content size (everything before footer)
    pub fn content_size(&self) -> usize {
        self.footer.0
    }

    /// Total file size including footer
    pub fn total_size(&self) -> usize {
        self.footer.1
    }

    /// Get a slice for a section from the bytes
    #[inline]
    pub fn slice<'a>(&self, bytes: &'a [u8], section: (usize, usize)) -> Option<&'a [u8]> {
        bytes.get(section.0..section.1)
    }
}

// ============================================================================
// MAP HEADER (24 bytes)
// ============================================================================

/// Header of a key-id → value-id map file
///
/// The two checksums tie the id file to the exact `.key` and `.val` files it
/// was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapHeader {
    pub version: u8,
    /// Number of ids that follow (= number of keys)
    pub count: u32,
    /// CRC32 of the whole keys trie file
    pub keys_crc32: u32,
    /// CRC32 of the whole values trie file
    pub values_crc32: u32,
}

impl MapHeader {
    // 4 (magic) + 1 (version) + 3 (reserved) + 4 (count) + 2*4 (crc32) + 4 (reserved) = 24
    pub const SIZE: usize = 24;

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&MAP_MAGIC);
        buf.push(self.version);
        buf.extend_from_slice(&[0u8; 3]); // reserved
        buf.extend_from_slice(&self.count.to_le_bytes());
        buf.extend_from_slice(&self.keys_crc32.to_le_bytes());
        buf.extend_from_slice(&self.values_crc32.to_le_bytes());
        buf.extend_from_slice(&[0u8; 4]); // reserved
    }

    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("File too short for map header: {} bytes", bytes.len()),
            ));
        }
        if bytes[0..4] != MAP_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid map magic: expected TXMP, got {:?}", &bytes[0..4]),
            ));
        }
        check_reserved(&bytes[5..8])?;
        check_reserved(&bytes[20..24])?;
        Ok(Self {
            version: bytes[4],
            count: read_u32(bytes, 8),
            keys_crc32: read_u32(bytes, 12),
            values_crc32: read_u32(bytes, 16),
        })
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    /// CRC32 checksum of header + all sections (everything before footer)
    pub crc32: u32,
}

impl Footer {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write_to(&self, buf: &mut Vec<u8>, magic: &[u8; 4]) {
        buf.extend_from_slice(&self.crc32.to_le_bytes());
        buf.extend_from_slice(magic);
    }

    /// Read the footer from the end of `bytes` and verify the checksum of
    /// everything in front of it.
    pub fn read_verified(bytes: &[u8], magic: &[u8; 4]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "File too short for footer",
            ));
        }

        let footer_start = bytes.len() - Self::SIZE;
        let found = &bytes[footer_start + 4..];
        if found != magic {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid footer magic: expected {:?}, got {:?}", magic, found),
            ));
        }

        let crc32 = read_u32(bytes, footer_start);
        let computed = Self::compute_crc32(&bytes[..footer_start]);
        if crc32 != computed {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "CRC32 mismatch: expected {:#010x}, got {:#010x} (file corrupted)",
                    crc32, computed
                ),
            ));
        }

        Ok(Self { crc32 })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
