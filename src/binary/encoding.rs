// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: fixed-width u32 arrays and packed bitsets.
//!
//! The double array is read by index, never streamed, so every slot is a
//! plain little-endian u32. The terminal markers are one bit per slot,
//! least significant bit first.

use std::io;

// ============================================================================
// U32 ARRAYS
// ============================================================================

/// Append `values` as little-endian u32s.
pub fn encode_u32_array(values: &[u32], buf: &mut Vec<u8>) {
    buf.reserve(values.len() * 4);
    for &v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

/// Decode exactly `count` little-endian u32s from `bytes`.
///
/// Returns an error if the section is not exactly `count * 4` bytes long.
pub fn decode_u32_array(bytes: &[u8], count: usize) -> io::Result<Vec<u32>> {
    let expected = count.checked_mul(4).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("u32 array count {} causes overflow", count),
        )
    })?;
    if bytes.len() != expected {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "u32 array section is {} bytes, expected {} ({} entries)",
                bytes.len(),
                expected,
                count
            ),
        ));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

// ============================================================================
// BITSETS
// ============================================================================

/// Bytes needed to hold `bits` bits.
#[inline]
pub fn bitset_len(bits: usize) -> usize {
    bits.div_ceil(8)
}

#[inline]
pub fn bit_get(bits: &[u8], i: usize) -> bool {
    bits.get(i / 8).is_some_and(|b| b & (1 << (i % 8)) != 0)
}

#[inline]
pub fn bit_set(bits: &mut [u8], i: usize) {
    bits[i / 8] |= 1 << (i % 8);
}

/// Total number of set bits.
pub fn bit_count(bits: &[u8]) -> usize {
    bits.iter().map(|b| b.count_ones() as usize).sum()
}
