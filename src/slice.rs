// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offset handling for callers that address text as `(pos, len)`.
//!
//! Bindings to dynamic languages pass signed offsets. This is the one place
//! where they are checked and clamped before the query layer sees a slice.

use crate::error::{Error, Result};

/// The part of `buf` starting at byte `pos` and spanning at most `len`
/// bytes.
///
/// - `pos < 0` is rejected
/// - `pos` past the end clamps to the end (an empty subject)
/// - `len < 0`, or a `len` running past the end, means "to the end"
pub fn subject(buf: &[u8], pos: i64, len: i64) -> Result<&[u8]> {
    if pos < 0 {
        return Err(Error::InvalidArgument(format!(
            "negative position {}",
            pos
        )));
    }
    let start = usize::try_from(pos).map_or(buf.len(), |p| p.min(buf.len()));
    let rest = &buf[start..];
    let take = usize::try_from(len).map_or(rest.len(), |l| l.min(rest.len()));
    Ok(&rest[..take])
}
