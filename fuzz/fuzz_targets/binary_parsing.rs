// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index file parsing under adversarial input.
//!
//! A crafted file should produce an error, not a panic and not an index
//! whose queries later index out of bounds.

#![no_main]

use libfuzzer_sys::fuzz_target;
use txdict::TrieIndex;

fuzz_target!(|data: &[u8]| {
    let Ok(index) = TrieIndex::from_bytes(data) else {
        return;
    };

    // Anything that loads must behave like a dictionary.
    let words = index.to_vec();
    assert_eq!(words.len(), index.num_keys());
    for (id, word) in words.iter().enumerate() {
        assert_eq!(index.word_id(word), Some(id as u32));
    }
    assert_eq!(index.to_bytes(), data);
    let _ = index.scan(data);
});
