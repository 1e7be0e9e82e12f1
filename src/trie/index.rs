// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Read-only dictionary index.
//!
//! All offsets and lengths are byte counts. Queries never look past the
//! slice they are handed, and a miss is an ordinary return value.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::binary::{decode_trie, encode_trie};
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::trie::double_array::DoubleArray;
use crate::trie::iter::{longest_prefix, Expansions, Prefixes, Scan};
use crate::trie::WordId;

/// Summary of an index, as printed by `txdict inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub num_keys: usize,
    pub num_nodes: usize,
    pub array_len: usize,
    pub has_empty_word: bool,
    /// Size of the serialized form.
    pub bytes: usize,
}

/// Immutable byte-string dictionary.
///
/// Cheap to share across threads: every query takes `&self`.
#[derive(Debug, Clone)]
pub struct TrieIndex {
    trie: DoubleArray,
    diagnostics: Diagnostics,
}

impl TrieIndex {
    /// Load and validate an index file.
    ///
    /// Fails with [`Error::Io`] when the file cannot be read and
    /// [`Error::Corrupt`] when its contents do not validate. Nothing is
    /// deferred to the first query.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_bytes(path.as_ref()).map(|(index, _)| index)
    }

    /// [`open`](Self::open), also handing back the file contents.
    pub(crate) fn open_with_bytes(path: &Path) -> Result<(Self, Vec<u8>)> {
        let bytes = fs::read(path)
            .map_err(|e| Error::io(path, e))
            .inspect_err(|e| tracing::warn!(target: "txdict", "{}", e))?;
        let mut index = Self::from_bytes(&bytes)
            .inspect_err(|e| tracing::warn!(target: "txdict", "{}: {}", path.display(), e))?;
        index
            .diagnostics
            .info(format!("opened {}", path.display()));
        Ok((index, bytes))
    }

    /// Validate and load an index from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let trie = decode_trie(bytes)?;
        let mut diagnostics = Diagnostics::new();
        diagnostics.info(format!(
            "loaded {} keys, {} nodes from {} bytes",
            trie.num_keys(),
            trie.num_nodes(),
            bytes.len()
        ));
        Ok(Self { trie, diagnostics })
    }

    pub(crate) fn from_trie(trie: DoubleArray, diagnostics: Diagnostics) -> Self {
        Self { trie, diagnostics }
    }

    /// Serialize. Identical to the bytes this index was loaded from.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode_trie(&self.trie)
    }

    /// Underlying double array, for node-level traversal.
    pub fn trie(&self) -> &DoubleArray {
        &self.trie
    }

    pub fn num_keys(&self) -> usize {
        self.trie.num_keys()
    }

    pub fn len(&self) -> usize {
        self.num_keys()
    }

    pub fn is_empty(&self) -> bool {
        self.num_keys() == 0
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_keys: self.trie.num_keys(),
            num_nodes: self.trie.num_nodes(),
            array_len: self.trie.array_len(),
            has_empty_word: self.trie.has_empty_word(),
            bytes: crate::binary::trie_header(&self.trie)
                .section_offsets()
                .total_size(),
        }
    }

    // ------------------------------------------------------------------
    // Point queries
    // ------------------------------------------------------------------

    /// Length of the longest stored word that is a prefix of `s`, or -1.
    pub fn longest_prefix(&self, s: &[u8]) -> isize {
        longest_prefix(&self.trie, s).map_or(-1, |(len, _)| len as isize)
    }

    /// Depth of the deepest trie node reachable by consuming `s`, whether
    /// or not it ends a word. 0 when not even the first byte matches.
    pub fn longest_prefix_match(&self, s: &[u8]) -> isize {
        let mut node = self.trie.root();
        let mut depth = 0;
        for &b in s {
            match self.trie.child(node, b) {
                Some(next) => {
                    node = next;
                    depth += 1;
                }
                None => break,
            }
        }
        depth as isize
    }

    /// [`longest_prefix`](Self::longest_prefix) or, with `match_prefix`,
    /// [`longest_prefix_match`](Self::longest_prefix_match).
    pub fn longest_prefix_with(&self, s: &[u8], match_prefix: bool) -> isize {
        if match_prefix {
            self.longest_prefix_match(s)
        } else {
            self.longest_prefix(s)
        }
    }

    /// Is `s` exactly a stored word?
    pub fn include(&self, s: &[u8]) -> bool {
        self.word_id(s).is_some()
    }

    pub fn word_id(&self, s: &[u8]) -> Option<WordId> {
        self.trie.find(s)
    }

    /// The stored word with id `id`.
    pub fn word(&self, id: WordId) -> Option<Vec<u8>> {
        self.trie.word(id)
    }

    // ------------------------------------------------------------------
    // Enumeration
    // ------------------------------------------------------------------

    /// Stored words that are prefixes of `s`, lazily, shortest first.
    pub fn prefixes<'s>(&self, s: &'s [u8]) -> Prefixes<'_, 's> {
        Prefixes::new(&self.trie, s)
    }

    /// Stored words that are prefixes of `s`, shortest first.
    pub fn search_prefixes(&self, s: &[u8]) -> Vec<Vec<u8>> {
        self.search_prefixes_limit(s, 0)
    }

    /// Like [`search_prefixes`](Self::search_prefixes), keeping at most
    /// `limit` words (0 keeps all).
    pub fn search_prefixes_limit(&self, s: &[u8], limit: usize) -> Vec<Vec<u8>> {
        self.prefixes(s)
            .take(effective_limit(limit))
            .map(|(len, _)| s[..len].to_vec())
            .collect()
    }

    /// Stored words that start with `s`, lazily, in ascending byte order.
    pub fn expansions(&self, s: &[u8]) -> Expansions<'_> {
        Expansions::new(&self.trie, s)
    }

    /// Stored words that start with `s`, at most `limit` of them (0 keeps
    /// all). The kept words are the lexicographically smallest.
    pub fn search_expansions(&self, s: &[u8], limit: usize) -> Vec<Vec<u8>> {
        self.expansions(s).take(effective_limit(limit)).collect()
    }

    /// All stored words in WordId order.
    pub fn iter(&self) -> Expansions<'_> {
        self.expansions(b"")
    }

    pub fn to_vec(&self) -> Vec<Vec<u8>> {
        self.iter().collect()
    }

    // ------------------------------------------------------------------
    // Text scanning
    // ------------------------------------------------------------------

    /// Greedy longest-match scan of `text`, lazily.
    pub fn scan_iter<'s>(&self, text: &'s [u8]) -> Scan<'_, 's> {
        Scan::new(&self.trie, text)
    }

    /// Every greedy match in `text` as `(word, byte position)`.
    pub fn scan(&self, text: &[u8]) -> Vec<(Vec<u8>, usize)> {
        self.scan_iter(text)
            .map(|(word, pos)| (word.to_vec(), pos))
            .collect()
    }

    /// Replace every scanned match with `f(word, pos)`, copying the bytes
    /// between matches unchanged.
    ///
    /// ```
    /// use txdict::TrieBuilder;
    ///
    /// let mut builder = TrieBuilder::new();
    /// builder.add_all(["ho", "hoge", "hoga"]);
    /// let index = builder.build_index().unwrap();
    /// let out = index.gsub(b"hohogefuga", |w, _| w.to_ascii_uppercase());
    /// assert_eq!(out, b"HOHOGEfuga");
    /// ```
    pub fn gsub<F, R>(&self, text: &[u8], mut f: F) -> Vec<u8>
    where
        F: FnMut(&[u8], usize) -> R,
        R: AsRef<[u8]>,
    {
        let mut out = Vec::with_capacity(text.len());
        let mut last = 0;
        for (word, pos) in self.scan_iter(text) {
            out.extend_from_slice(&text[last..pos]);
            out.extend_from_slice(f(word, pos).as_ref());
            last = pos + word.len();
        }
        out.extend_from_slice(&text[last..]);
        out
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    /// Operation log of the load (or build) that produced this index.
    pub fn result_log(&self) -> &str {
        self.diagnostics.result_log()
    }

    /// Error log of that load. Empty on success.
    pub fn error_log(&self) -> &str {
        self.diagnostics.error_log()
    }
}

impl<'a> IntoIterator for &'a TrieIndex {
    type Item = Vec<u8>;
    type IntoIter = Expansions<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[inline]
fn effective_limit(limit: usize) -> usize {
    if limit == 0 {
        usize::MAX
    } else {
        limit
    }
}
