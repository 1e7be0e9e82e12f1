// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Double-array construction from a sorted word list.
//!
//! Sorting first means every trie node corresponds to a contiguous range of
//! the word list, all sharing the node's prefix. Construction walks those
//! ranges with an explicit stack instead of materializing a pointer tree:
//!
//! ```text
//! words (sorted)          stack entry = (node, lo, hi, depth)
//! ──────────────          ───────────────────────────────────
//! 0  foo                  (root, 0, 6, 0)
//! 1  ho                     ├─ 'f' → (n1, 0, 1, 1)
//! 2  hog                    └─ 'h' → (n2, 1, 6, 1)
//! 3  hoga                            └─ 'o' → (n3, 1, 6, 2)
//! 4  hoge                                      ├─ END (id 1)
//! 5  hogeshi                                   └─ 'g' → ...
//! ```
//!
//! For each range we gather the distinct next codes, find the lowest `base`
//! whose slots `base + code` are all free, claim them, then push the child
//! ranges. Children are pushed in reverse so the smallest byte is placed
//! first and WordIds come out in sorted order.

use std::mem;
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::binary::{bit_set, bitset_len, encode_trie, MAX_ARRAY_LEN};
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::io::write_atomic;
use crate::trie::double_array::{byte_code, DoubleArray, END_CODE, FREE, MAX_CODE};
use crate::trie::TrieIndex;

/// Outcome of one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Words handed to the builder, duplicates included.
    pub num_words_added: usize,
    pub num_keys: usize,
    pub num_nodes: usize,
    pub array_len: usize,
    /// Serialized size. Zero for `build_index`.
    pub bytes_written: usize,
    pub result_log: String,
    pub error_log: String,
}

/// Accumulates words, then compiles them into an immutable index.
///
/// Every `build*` call drains the accumulated words, so a second build on
/// the same builder yields an empty index.
///
/// # Example
///
/// ```
/// use txdict::TrieBuilder;
///
/// let mut builder = TrieBuilder::new();
/// builder.add_all(["ho", "hoge", "hog"]);
/// let index = builder.build_index().unwrap();
/// assert_eq!(index.longest_prefix(b"hogera"), 4);
/// ```
#[derive(Debug, Default)]
pub struct TrieBuilder {
    words: Vec<Vec<u8>>,
    diagnostics: Diagnostics,
}

impl TrieBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one word. Adding the same word twice is harmless.
    pub fn add(&mut self, word: impl AsRef<[u8]>) {
        self.words.push(word.as_ref().to_vec());
    }

    pub fn add_all<I>(&mut self, words: I)
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for word in words {
            self.add(word);
        }
    }

    /// Words added since the last build, before deduplication.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Build and write the index to `path`.
    ///
    /// The file is written to a temporary sibling and renamed into place,
    /// so a failed build never leaves a partial file behind.
    pub fn build(&mut self, path: impl AsRef<Path>) -> Result<BuildReport> {
        let path = path.as_ref();
        let (bytes, mut report) = self.build_to_bytes()?;
        if let Err(e) = write_atomic(path, &bytes) {
            self.diagnostics.error(e.to_string());
            report.error_log = self.diagnostics.error_log().to_string();
            return Err(e);
        }
        self.diagnostics
            .info(format!("wrote {} bytes to {}", bytes.len(), path.display()));
        report.result_log = self.diagnostics.result_log().to_string();
        Ok(report)
    }

    /// Build and serialize in memory.
    pub fn build_to_bytes(&mut self) -> Result<(Vec<u8>, BuildReport)> {
        let num_words_added = self.words.len();
        let trie = self.compile()?;
        let bytes = encode_trie(&trie);
        self.diagnostics
            .info(format!("serialized {} bytes", bytes.len()));
        let report = self.report(num_words_added, &trie, bytes.len());
        Ok((bytes, report))
    }

    /// Build straight into a queryable index, skipping serialization.
    pub fn build_index(&mut self) -> Result<TrieIndex> {
        let trie = self.compile()?;
        Ok(TrieIndex::from_trie(trie, self.diagnostics.clone()))
    }

    /// Operation log of the most recent build.
    pub fn result_log(&self) -> &str {
        self.diagnostics.result_log()
    }

    /// Error log of the most recent build. Empty when it succeeded.
    pub fn error_log(&self) -> &str {
        self.diagnostics.error_log()
    }

    /// Sort, deduplicate and place the accumulated words.
    pub(crate) fn compile(&mut self) -> Result<DoubleArray> {
        self.diagnostics.clear();
        let mut words = mem::take(&mut self.words);
        let added = words.len();

        #[cfg(feature = "parallel")]
        words.par_sort_unstable();
        #[cfg(not(feature = "parallel"))]
        words.sort_unstable();
        words.dedup();

        self.diagnostics.info(format!(
            "sorted {} words, {} distinct",
            added,
            words.len()
        ));

        match Placer::new(&words).place() {
            Ok(trie) => {
                self.diagnostics.info(format!(
                    "placed {} keys in {} nodes, array length {}",
                    trie.num_keys(),
                    trie.num_nodes(),
                    trie.array_len()
                ));
                Ok(trie)
            }
            Err(e) => {
                self.diagnostics.error(e.to_string());
                Err(e)
            }
        }
    }

    fn report(&self, num_words_added: usize, trie: &DoubleArray, bytes: usize) -> BuildReport {
        BuildReport {
            num_words_added,
            num_keys: trie.num_keys(),
            num_nodes: trie.num_nodes(),
            array_len: trie.array_len(),
            bytes_written: bytes,
            result_log: self.diagnostics.result_log().to_string(),
            error_log: self.diagnostics.error_log().to_string(),
        }
    }
}

// ============================================================================
// PLACEMENT
// ============================================================================

/// One child range of a node being placed.
struct Label {
    code: usize,
    lo: usize,
    hi: usize,
}

struct Placer<'w> {
    words: &'w [Vec<u8>],
    base: Vec<u32>,
    check: Vec<u32>,
    terminal: Vec<bool>,
    leaves: Vec<u32>,
    num_nodes: usize,
    /// Lowest slot that might still be free.
    first_free: usize,
}

impl<'w> Placer<'w> {
    /// `words` must be sorted and deduplicated.
    fn new(words: &'w [Vec<u8>]) -> Self {
        Self {
            words,
            base: vec![1],
            check: vec![0],
            terminal: vec![false],
            leaves: vec![FREE; words.len()],
            num_nodes: 1,
            first_free: 1,
        }
    }

    fn place(mut self) -> Result<DoubleArray> {
        if u32::try_from(self.words.len()).map_or(true, |n| n >= MAX_ARRAY_LEN) {
            return Err(Error::InvalidArgument(format!(
                "too many words: {}",
                self.words.len()
            )));
        }

        let mut stack = vec![(0usize, 0usize, self.words.len(), 0usize)];
        let mut labels = Vec::with_capacity(MAX_CODE + 1);

        while let Some((node, lo, hi, depth)) = stack.pop() {
            self.collect_labels(lo, hi, depth, &mut labels);
            if labels.is_empty() {
                continue;
            }

            let base = self.find_base(&labels)?;
            self.base[node] = base as u32;
            for label in &labels {
                let slot = base + label.code;
                self.check[slot] = node as u32;
                if label.code == END_CODE {
                    self.base[slot] = label.lo as u32;
                    self.leaves[label.lo] = slot as u32;
                    self.terminal[node] = true;
                } else {
                    self.num_nodes += 1;
                }
            }
            while self.first_free < self.check.len() && self.check[self.first_free] != FREE {
                self.first_free += 1;
            }

            for label in labels.iter().rev().filter(|l| l.code != END_CODE) {
                stack.push((base + label.code, label.lo, label.hi, depth + 1));
            }
        }

        Ok(self.finish())
    }

    /// Split `words[lo..hi]` by the code at `depth`.
    fn collect_labels(&self, lo: usize, hi: usize, depth: usize, out: &mut Vec<Label>) {
        out.clear();
        let mut i = lo;
        while i < hi {
            let word = &self.words[i];
            if word.len() == depth {
                // Sorted and deduplicated, so only the first word can end here.
                out.push(Label {
                    code: END_CODE,
                    lo: i,
                    hi: i + 1,
                });
                i += 1;
                continue;
            }
            let byte = word[depth];
            let start = i;
            while i < hi && self.words[i][depth] == byte {
                i += 1;
            }
            out.push(Label {
                code: byte_code(byte),
                lo: start,
                hi: i,
            });
        }
    }

    /// Lowest base ≥ 1 whose slots for every label are free; grows the
    /// arrays to cover them.
    fn find_base(&mut self, labels: &[Label]) -> Result<usize> {
        let first = labels[0].code;
        let mut pos = self.first_free.max(first + 1);
        loop {
            if pos < self.check.len() && self.check[pos] != FREE {
                pos += 1;
                continue;
            }
            let base = pos - first;
            let fits = labels
                .iter()
                .all(|l| self.check.get(base + l.code).map_or(true, |&c| c == FREE));
            if fits {
                let last = base + MAX_CODE;
                if last >= MAX_ARRAY_LEN as usize {
                    return Err(Error::InvalidArgument(
                        "word set too large for a 32-bit double array".to_string(),
                    ));
                }
                self.ensure(base + labels[labels.len() - 1].code + 1);
                return Ok(base);
            }
            pos += 1;
        }
    }

    fn ensure(&mut self, len: usize) {
        if len > self.check.len() {
            self.base.resize(len, 0);
            self.check.resize(len, FREE);
            self.terminal.resize(len, false);
        }
    }

    fn finish(mut self) -> DoubleArray {
        let len = self
            .check
            .iter()
            .rposition(|&c| c != FREE)
            .map_or(1, |last| last + 1);
        self.base.truncate(len);
        self.check.truncate(len);

        let mut terminal = vec![0u8; bitset_len(len)];
        for (slot, &is_terminal) in self.terminal[..len].iter().enumerate() {
            if is_terminal {
                bit_set(&mut terminal, slot);
            }
        }

        DoubleArray::from_built(self.base, self.check, terminal, self.leaves, self.num_nodes)
    }
}
