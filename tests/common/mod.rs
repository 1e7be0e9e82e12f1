//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use txdict::{KeyValueMap, MapBuilder, TrieBuilder, TrieIndex};

// Re-export canonical test utilities from txdict::testing
pub use txdict::testing::{
    dedup_sorted, naive_expansions, naive_longest_prefix, naive_prefixes, naive_scan,
    reconstruct, SAMPLE_PAIRS, SAMPLE_WORDS,
};

/// Owned byte strings from string literals.
pub fn words(ws: &[&str]) -> Vec<Vec<u8>> {
    ws.iter().map(|w| w.as_bytes().to_vec()).collect()
}

/// Lossy UTF-8 rendering, for readable assertions.
pub fn strs(ws: Vec<Vec<u8>>) -> Vec<String> {
    ws.into_iter()
        .map(|w| String::from_utf8_lossy(&w).into_owned())
        .collect()
}

/// In-memory index over `ws`.
pub fn index_of<W: AsRef<[u8]>>(ws: &[W]) -> TrieIndex {
    let mut builder = TrieBuilder::new();
    builder.add_all(ws);
    builder.build_index().expect("build index")
}

/// In-memory index over the sample words.
pub fn sample_index() -> TrieIndex {
    index_of(&SAMPLE_WORDS)
}

/// In-memory map over the sample pairs.
pub fn sample_map() -> KeyValueMap {
    let mut builder = MapBuilder::new();
    builder.add_all(SAMPLE_PAIRS);
    builder.build_map().expect("build map")
}

/// Build `ws` into `dir/name` and return the path.
pub fn build_file<W: AsRef<[u8]>>(dir: &Path, name: &str, ws: &[W]) -> PathBuf {
    let path = dir.join(name);
    let mut builder = TrieBuilder::new();
    builder.add_all(ws);
    builder.build(&path).expect("build file");
    path
}

/// Structural checks every index must pass.
pub fn assert_index_well_formed(index: &TrieIndex) {
    let all = index.to_vec();
    assert_eq!(all.len(), index.num_keys(), "enumeration covers every key");
    assert!(
        all.windows(2).all(|w| w[0] < w[1]),
        "enumeration is strictly ascending"
    );
    for (id, word) in all.iter().enumerate() {
        assert_eq!(index.word_id(word), Some(id as u32), "id order is sorted order");
        assert!(index.include(word));
    }
}
