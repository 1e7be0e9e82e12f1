// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Static byte trie: construction, storage and queries.
//!
//! ```text
//! ┌──────────────┐  compile  ┌──────────────┐  wrap / decode  ┌────────────┐
//! │ TrieBuilder  │──────────▶│ DoubleArray  │────────────────▶│ TrieIndex  │
//! │ (word list)  │           │ (base/check) │                 │ (queries)  │
//! └──────────────┘           └──────────────┘                 └────────────┘
//!                                   │
//!                                   ▼
//!                     Prefixes / Expansions / Scan
//! ```

mod builder;
mod double_array;
mod index;
mod iter;

/// Dense 0-based word identifier, in ascending byte order of the word set.
pub type WordId = u32;

pub use builder::{BuildReport, TrieBuilder};
pub use double_array::{Children, DoubleArray, NodeId};
pub use index::{IndexStats, TrieIndex};
pub use iter::{Expansions, Prefixes, Scan};

pub(crate) use iter::ScanMatch;
