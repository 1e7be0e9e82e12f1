// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lazy traversals over a [`DoubleArray`].
//!
//! Each iterator holds only its cursor: a node and depth for [`Prefixes`],
//! a stack of child cursors for [`Expansions`], a byte position for
//! [`Scan`]. None of them can be rewound. Build a new one to start over.

use std::iter::FusedIterator;

use crate::trie::double_array::{Children, DoubleArray, NodeId};
use crate::trie::WordId;

// ============================================================================
// COMMON PREFIXES
// ============================================================================

/// Stored words that are prefixes of a text, shortest first.
///
/// Yields `(len, id)`: the word is `text[..len]`.
#[derive(Debug, Clone)]
pub struct Prefixes<'t, 's> {
    trie: &'t DoubleArray,
    text: &'s [u8],
    node: Option<NodeId>,
    depth: usize,
}

impl<'t, 's> Prefixes<'t, 's> {
    pub(crate) fn new(trie: &'t DoubleArray, text: &'s [u8]) -> Self {
        Self {
            trie,
            text,
            node: Some(trie.root()),
            depth: 0,
        }
    }
}

impl Iterator for Prefixes<'_, '_> {
    type Item = (usize, WordId);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.node {
            let depth = self.depth;
            self.node = self
                .text
                .get(depth)
                .and_then(|&b| self.trie.child(node, b));
            self.depth += 1;
            if let Some(id) = self.trie.word_id(node) {
                return Some((depth, id));
            }
        }
        None
    }
}

impl FusedIterator for Prefixes<'_, '_> {}

/// Longest stored word that is a prefix of `text`.
pub(crate) fn longest_prefix(trie: &DoubleArray, text: &[u8]) -> Option<(usize, WordId)> {
    Prefixes::new(trie, text).last()
}

// ============================================================================
// EXPANSIONS
// ============================================================================

/// Stored words extending a prefix, in ascending byte order.
///
/// Depth-first over the prefix's subtree with children taken in ascending
/// byte order, so a word is always emitted before its extensions and the
/// output order equals WordId order.
#[derive(Debug, Clone)]
pub struct Expansions<'t> {
    trie: &'t DoubleArray,
    stack: Vec<Children<'t>>,
    word: Vec<u8>,
    /// Node reached but not yet emitted or expanded.
    pending: Option<NodeId>,
}

impl<'t> Expansions<'t> {
    pub(crate) fn new(trie: &'t DoubleArray, prefix: &[u8]) -> Self {
        Self {
            trie,
            stack: Vec::new(),
            word: prefix.to_vec(),
            pending: trie.walk(prefix),
        }
    }
}

impl Iterator for Expansions<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.pending.take() {
                self.stack.push(self.trie.children(node));
                if self.trie.is_terminal(node) {
                    return Some(self.word.clone());
                }
                continue;
            }

            let top = self.stack.last_mut()?;
            match top.next() {
                Some((byte, child)) => {
                    self.word.push(byte);
                    self.pending = Some(child);
                }
                None => {
                    self.stack.pop();
                    // The bottom frame is the prefix itself, which owns no
                    // pushed byte.
                    if !self.stack.is_empty() {
                        self.word.pop();
                    }
                }
            }
        }
    }
}

impl FusedIterator for Expansions<'_> {}

// ============================================================================
// SCAN
// ============================================================================

/// One greedy match found by [`Scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScanMatch {
    pub pos: usize,
    pub len: usize,
    pub id: WordId,
}

/// Greedy longest-match scan over a text.
///
/// At each position the longest stored prefix of the remaining text is
/// emitted and the cursor jumps past it. When nothing matches, or only the
/// empty word does, the cursor moves one byte. Yields `(word, pos)` with
/// `word` borrowed from the text.
#[derive(Debug, Clone)]
pub struct Scan<'t, 's> {
    trie: &'t DoubleArray,
    text: &'s [u8],
    pos: usize,
}

impl<'t, 's> Scan<'t, 's> {
    pub(crate) fn new(trie: &'t DoubleArray, text: &'s [u8]) -> Self {
        Self { trie, text, pos: 0 }
    }

    /// Byte offset where the next search starts.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn next_match(&mut self) -> Option<ScanMatch> {
        while self.pos < self.text.len() {
            let pos = self.pos;
            match longest_prefix(self.trie, &self.text[pos..]) {
                Some((len, id)) => {
                    self.pos += len.max(1);
                    return Some(ScanMatch { pos, len, id });
                }
                None => self.pos += 1,
            }
        }
        None
    }
}

impl<'s> Iterator for Scan<'_, 's> {
    type Item = (&'s [u8], usize);

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;
        self.next_match()
            .map(|m| (&text[m.pos..m.pos + m.len], m.pos))
    }
}

impl FusedIterator for Scan<'_, '_> {}
