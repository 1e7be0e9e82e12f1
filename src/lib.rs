// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Static byte-string dictionary on a double-array trie.
//!
//! Build once from an unordered, possibly duplicated word list; query many
//! times. Every operation works on raw bytes and reports byte offsets, so
//! UTF-8, Shift_JIS or binary keys all behave the same.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ TrieBuilder  │────▶│  binary.rs   │────▶│  TrieIndex   │
//! │ (sort, dedup,│     │ (header,     │     │ (longest,    │
//! │  place)      │     │  CRC footer) │     │  prefixes,   │
//! └──────────────┘     └──────────────┘     │  expansions, │
//!                                           │  scan)       │
//!                                           └──────┬───────┘
//!                                                  │ ×2 + id map
//!                                           ┌──────▼───────┐
//!                                           │ KeyValueMap  │
//!                                           └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use txdict::TrieBuilder;
//!
//! let mut builder = TrieBuilder::new();
//! builder.add_all(["foo", "ho", "hog", "hoga", "hoge", "hogeshi"]);
//! let index = builder.build_index().unwrap();
//!
//! assert_eq!(index.longest_prefix(b"hogeshaa"), 4);
//! assert_eq!(index.search_prefixes(b"hog"), vec![b"ho".to_vec(), b"hog".to_vec()]);
//!
//! let hits: Vec<(&[u8], usize)> = index.scan_iter(b"hohogefugahogaboke").collect();
//! assert_eq!(hits[1], (&b"hoge"[..], 2));
//! ```
//!
//! Maps pair a keys trie with a values trie:
//!
//! ```
//! use txdict::MapBuilder;
//!
//! let mut builder = MapBuilder::new();
//! builder.add_all([("ho", "foo"), ("hoge", "bar")]);
//! let map = builder.build_map().unwrap();
//! assert_eq!(map.lookup(b"hoge"), Some(b"bar".to_vec()));
//! ```

pub mod binary;
mod diagnostics;
mod error;
pub mod io;
pub mod map;
mod slice;
pub mod testing;
pub mod trie;

pub use diagnostics::Diagnostics;
pub use error::{Error, Result};
pub use map::{KeyValueMap, MapBuildReport, MapBuilder, MapIter, MapPaths, MapScan};
pub use slice::subject;
pub use trie::{
    BuildReport, Children, DoubleArray, Expansions, IndexStats, NodeId, Prefixes, Scan,
    TrieBuilder, TrieIndex, WordId,
};
