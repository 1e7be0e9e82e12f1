// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Double-array storage for a static byte trie.
//!
//! Two parallel arrays, `base` and `check`, encode every transition. The
//! child of node `n` on code `c` lives in slot `base[n] + c`, and the slot
//! belongs to `n` iff `check[base[n] + c] == n`. Every lookup is two array
//! reads.
//!
//! ```text
//! codes:  0        end-of-word marker
//!         1..=256  byte value + 1
//!
//! slot:       0     1     2     3     4   ...
//! base:     [ 1 ] [ 0 ] [ 5 ] [ 2 ] [ . ]
//! check:    [ 0 ] [ 0 ] [ 0 ] [ 2 ] [ F ]      F = free
//!             ▲ root
//! ```
//!
//! A code-0 child is an end-of-word leaf. Leaves never have children, so
//! their `base` slot is reused to hold the WordId. Each trie node also has a
//! terminal bit that is set iff it owns such a leaf.
//!
//! All raw index arithmetic stays inside this module. Callers move around
//! with opaque [`NodeId`] handles.

use std::collections::VecDeque;
use std::io;

use crate::binary::{bit_count, bit_get, bitset_len, MAX_ARRAY_LEN};
use crate::trie::WordId;

/// Marks a free slot in `check`.
pub(crate) const FREE: u32 = u32::MAX;

/// Code of the end-of-word leaf.
pub(crate) const END_CODE: usize = 0;

/// Highest code: byte 255 + 1.
pub(crate) const MAX_CODE: usize = 256;

const ROOT: u32 = 0;

#[inline]
pub(crate) fn byte_code(byte: u8) -> usize {
    byte as usize + 1
}

/// Opaque handle to a trie node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(ROOT);

    /// Raw slot index, for diagnostics only.
    pub fn slot(self) -> usize {
        self.0 as usize
    }
}

/// Immutable double-array trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleArray {
    base: Vec<u32>,
    check: Vec<u32>,
    terminal: Vec<u8>,
    /// WordId → slot of its end-of-word leaf
    leaves: Vec<u32>,
    num_nodes: usize,
}

impl DoubleArray {
    /// Assemble a trie from arrays produced by the builder.
    ///
    /// The builder guarantees the structure, so only lengths are checked.
    pub(crate) fn from_built(
        base: Vec<u32>,
        check: Vec<u32>,
        terminal: Vec<u8>,
        leaves: Vec<u32>,
        num_nodes: usize,
    ) -> Self {
        debug_assert_eq!(base.len(), check.len());
        debug_assert_eq!(terminal.len(), bitset_len(check.len()));
        Self {
            base,
            check,
            terminal,
            leaves,
            num_nodes,
        }
    }

    /// Assemble a trie from decoded arrays, validating the whole structure.
    ///
    /// Checks, in order:
    /// 1. Array lengths agree and the root slot is present
    /// 2. Every occupied slot is reachable from the root through exactly the
    ///    transition its `check` names
    /// 3. Every end-of-word leaf carries a distinct id below `num_keys`
    /// 4. Terminal bits are set exactly on nodes that own a leaf
    /// 5. `num_keys` and `num_nodes` match what was found
    pub fn from_raw_parts(
        base: Vec<u32>,
        check: Vec<u32>,
        terminal: Vec<u8>,
        num_keys: usize,
        num_nodes: usize,
    ) -> io::Result<Self> {
        let len = check.len();
        if len == 0 || len > MAX_ARRAY_LEN as usize {
            return Err(invalid(format!("Invalid array length {}", len)));
        }
        if base.len() != len {
            return Err(invalid(format!(
                "BASE has {} slots but CHECK has {}",
                base.len(),
                len
            )));
        }
        if terminal.len() != bitset_len(len) {
            return Err(invalid(format!(
                "TERMINAL has {} bytes, expected {}",
                terminal.len(),
                bitset_len(len)
            )));
        }
        if check[0] != ROOT {
            return Err(invalid("Root slot is not marked as root"));
        }
        if num_keys > len {
            return Err(invalid(format!(
                "Key count {} exceeds array length {}",
                num_keys, len
            )));
        }

        let mut leaves = vec![FREE; num_keys];
        let mut visited_nodes = 0usize;
        let mut visited_leaves = 0usize;
        let mut queue = VecDeque::from([ROOT]);

        while let Some(node) = queue.pop_front() {
            visited_nodes += 1;
            let n = node as usize;
            let node_base = base[n] as usize;
            let mut has_leaf = false;

            for code in END_CODE..=MAX_CODE {
                let slot = node_base + code;
                if slot >= len || slot == ROOT as usize || check[slot] != node {
                    continue;
                }
                if code == END_CODE {
                    let id = base[slot] as usize;
                    if id >= num_keys {
                        return Err(invalid(format!(
                            "Word id {} at slot {} out of range (num_keys {})",
                            id, slot, num_keys
                        )));
                    }
                    if leaves[id] != FREE {
                        return Err(invalid(format!("Word id {} stored twice", id)));
                    }
                    leaves[id] = slot as u32;
                    visited_leaves += 1;
                    has_leaf = true;
                } else {
                    queue.push_back(slot as u32);
                }
            }

            if has_leaf != bit_get(&terminal, n) {
                return Err(invalid(format!(
                    "Terminal bit of slot {} disagrees with its end-of-word leaf",
                    n
                )));
            }
        }

        let occupied = check.iter().filter(|&&c| c != FREE).count();
        if occupied != visited_nodes + visited_leaves {
            return Err(invalid(format!(
                "{} occupied slots but only {} reachable from the root",
                occupied,
                visited_nodes + visited_leaves
            )));
        }
        if visited_leaves != num_keys || bit_count(&terminal) != num_keys {
            return Err(invalid(format!(
                "Header claims {} keys, trie holds {} (terminal bits {})",
                num_keys,
                visited_leaves,
                bit_count(&terminal)
            )));
        }
        if visited_nodes != num_nodes {
            return Err(invalid(format!(
                "Header claims {} nodes, trie holds {}",
                num_nodes, visited_nodes
            )));
        }

        Ok(Self {
            base,
            check,
            terminal,
            leaves,
            num_nodes,
        })
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[inline]
    fn child_code(&self, node: NodeId, code: usize) -> Option<NodeId> {
        let slot = self.base[node.0 as usize] as usize + code;
        if slot != ROOT as usize && slot < self.check.len() && self.check[slot] == node.0 {
            Some(NodeId(slot as u32))
        } else {
            None
        }
    }

    /// Follow the transition labelled `byte`.
    #[inline]
    pub fn child(&self, node: NodeId, byte: u8) -> Option<NodeId> {
        self.child_code(node, byte_code(byte))
    }

    /// Node reached by consuming all of `bytes` from the root.
    pub fn walk(&self, bytes: &[u8]) -> Option<NodeId> {
        bytes
            .iter()
            .try_fold(self.root(), |node, &b| self.child(node, b))
    }

    /// Does the path to `node` spell a stored word?
    #[inline]
    pub fn is_terminal(&self, node: NodeId) -> bool {
        bit_get(&self.terminal, node.0 as usize)
    }

    /// WordId of the word ending at `node`.
    #[inline]
    pub fn word_id(&self, node: NodeId) -> Option<WordId> {
        if !self.is_terminal(node) {
            return None;
        }
        self.child_code(node, END_CODE)
            .map(|leaf| self.base[leaf.0 as usize])
    }

    /// Outgoing byte transitions in ascending byte order.
    pub fn children(&self, node: NodeId) -> Children<'_> {
        Children {
            trie: self,
            node,
            next_code: END_CODE + 1,
        }
    }

    /// Parent of `node`; `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        (node.0 != ROOT).then(|| NodeId(self.check[node.0 as usize]))
    }

    /// Byte on the edge into `node`; `None` for the root.
    pub fn label(&self, node: NodeId) -> Option<u8> {
        let parent = self.parent(node)?;
        let code = node.0.checked_sub(self.base[parent.0 as usize])? as usize;
        (code > END_CODE).then(|| (code - 1) as u8)
    }

    /// Rebuild the word with the given id by walking parent links up from
    /// its end-of-word leaf.
    pub fn word(&self, id: WordId) -> Option<Vec<u8>> {
        let leaf = *self.leaves.get(id as usize)?;
        let mut node = NodeId(self.check[leaf as usize]);
        let mut bytes = Vec::new();
        while let Some(byte) = self.label(node) {
            bytes.push(byte);
            node = NodeId(self.check[node.0 as usize]);
        }
        bytes.reverse();
        Some(bytes)
    }

    /// Id of an exactly stored word.
    pub fn find(&self, word: &[u8]) -> Option<WordId> {
        self.walk(word).and_then(|node| self.word_id(node))
    }

    // ------------------------------------------------------------------
    // Sizes and raw sections
    // ------------------------------------------------------------------

    pub fn num_keys(&self) -> usize {
        self.leaves.len()
    }

    /// Trie nodes including the root, excluding end-of-word leaves.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Slots in the base/check arrays.
    pub fn array_len(&self) -> usize {
        self.check.len()
    }

    pub fn has_empty_word(&self) -> bool {
        self.is_terminal(self.root())
    }

    pub(crate) fn base_slots(&self) -> &[u32] {
        &self.base
    }

    pub(crate) fn check_slots(&self) -> &[u32] {
        &self.check
    }

    pub(crate) fn terminal_bits(&self) -> &[u8] {
        &self.terminal
    }
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

/// Iterator over the byte transitions of one node, ascending.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    trie: &'a DoubleArray,
    node: NodeId,
    next_code: usize,
}

impl Iterator for Children<'_> {
    type Item = (u8, NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_code <= MAX_CODE {
            let code = self.next_code;
            self.next_code += 1;
            if let Some(child) = self.trie.child_code(self.node, code) {
                return Some(((code - 1) as u8, child));
            }
        }
        None
    }
}
