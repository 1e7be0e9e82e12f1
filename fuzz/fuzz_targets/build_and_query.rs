// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Arbitrary word lists and queries against a brute-force answer.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use txdict::testing::{naive_longest_prefix, naive_scan};
use txdict::{TrieBuilder, TrieIndex};

#[derive(Debug, Arbitrary)]
struct Input {
    words: Vec<Vec<u8>>,
    query: Vec<u8>,
}

fuzz_target!(|input: Input| {
    // Bound the work per run.
    let words: Vec<Vec<u8>> = input.words.into_iter().take(64).collect();
    let query = &input.query[..input.query.len().min(256)];

    let mut builder = TrieBuilder::new();
    builder.add_all(&words);
    let (bytes, _) = builder.build_to_bytes().expect("build");
    let index = TrieIndex::from_bytes(&bytes).expect("own output must load");

    let expected = naive_longest_prefix(&words, query).map_or(-1, |n| n as isize);
    assert_eq!(index.longest_prefix(query), expected);
    assert_eq!(index.scan(query), naive_scan(&words, query));
    for w in index.search_expansions(query, 0) {
        assert!(w.starts_with(query));
    }
});
