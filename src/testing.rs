// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! Brute-force reference answers over a plain word list, and the canonical
//! sample dictionaries. Always compiled but hidden from documentation.

#![doc(hidden)]

/// The canonical sample word set.
pub const SAMPLE_WORDS: [&str; 6] = ["foo", "ho", "hog", "hoga", "hoge", "hogeshi"];

/// The canonical sample map.
pub const SAMPLE_PAIRS: [(&str, &str); 3] = [
    ("ho", "foo"),
    ("hoge", "bar"),
    ("hogeshi", "foobar"),
];

/// Sorted, deduplicated copy of `words`.
pub fn dedup_sorted(words: &[Vec<u8>]) -> Vec<Vec<u8>> {
    let mut out = words.to_vec();
    out.sort();
    out.dedup();
    out
}

/// Length of the longest word in `words` that prefixes `text`.
pub fn naive_longest_prefix(words: &[Vec<u8>], text: &[u8]) -> Option<usize> {
    words
        .iter()
        .filter(|w| text.starts_with(w))
        .map(|w| w.len())
        .max()
}

/// Distinct words in `words` that prefix `text`, shortest first.
pub fn naive_prefixes(words: &[Vec<u8>], text: &[u8]) -> Vec<Vec<u8>> {
    let mut out: Vec<Vec<u8>> = dedup_sorted(words)
        .into_iter()
        .filter(|w| text.starts_with(w))
        .collect();
    out.sort_by_key(|w| w.len());
    out
}

/// Distinct words in `words` that start with `prefix`, ascending.
pub fn naive_expansions(words: &[Vec<u8>], prefix: &[u8]) -> Vec<Vec<u8>> {
    dedup_sorted(words)
        .into_iter()
        .filter(|w| w.starts_with(prefix))
        .collect()
}

/// Greedy longest-match scan over a plain word list.
pub fn naive_scan(words: &[Vec<u8>], text: &[u8]) -> Vec<(Vec<u8>, usize)> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        match naive_longest_prefix(words, &text[pos..]) {
            Some(len) => {
                out.push((text[pos..pos + len].to_vec(), pos));
                pos += len.max(1);
            }
            None => pos += 1,
        }
    }
    out
}

/// Rebuild a text from scan matches by filling the gaps from `text`.
///
/// Equal to `text` whenever the matches are in order, non-overlapping and
/// each one really occurs at its position.
pub fn reconstruct(text: &[u8], matches: &[(Vec<u8>, usize)]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut last = 0;
    for (word, pos) in matches {
        out.extend_from_slice(&text[last..*pos]);
        out.extend_from_slice(word);
        last = pos + word.len();
    }
    out.extend_from_slice(&text[last..]);
    out
}
