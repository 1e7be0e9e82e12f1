// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Static key → value dictionary built from two tries.
//!
//! ```text
//! keys trie            key_to_value         values trie
//! ┌──────────┐         ┌───┐                ┌──────────┐
//! │ 0 ho     │────────▶│ 1 │───────────────▶│ 0 bar    │
//! │ 1 hoge   │────────▶│ 0 │                │ 1 foo    │
//! │ 2 hogeshi│────────▶│ 2 │                │ 2 foobar │
//! └──────────┘         └───┘                └──────────┘
//! ```
//!
//! Distinct values are stored once. The only link between the two tries is
//! the id array; neither index knows about the other.

mod builder;

pub use builder::{MapBuildReport, MapBuilder};

use std::ffi::OsString;
use std::fs;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use crate::binary::{decode_id_map, Footer};
use crate::error::{Error, Result};
use crate::trie::{Expansions, Scan, TrieIndex, WordId};

/// The three files of a map sharing one prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapPaths {
    /// `<prefix>.key`
    pub keys: PathBuf,
    /// `<prefix>.val`
    pub values: PathBuf,
    /// `<prefix>.map`
    pub ids: PathBuf,
}

impl MapPaths {
    pub fn new(prefix: impl AsRef<Path>) -> Self {
        let prefix = prefix.as_ref();
        let with = |ext: &str| {
            let mut name = OsString::from(prefix.as_os_str());
            name.push(ext);
            PathBuf::from(name)
        };
        Self {
            keys: with(".key"),
            values: with(".val"),
            ids: with(".map"),
        }
    }
}

/// Immutable byte-string → byte-string dictionary.
#[derive(Debug, Clone)]
pub struct KeyValueMap {
    keys: TrieIndex,
    values: TrieIndex,
    key_to_value: Vec<WordId>,
}

impl KeyValueMap {
    /// Open `<prefix>.key`, `<prefix>.val` and `<prefix>.map`. All three
    /// must exist and come from the same build: the `.map` header carries
    /// checksums of the other two files.
    pub fn open(prefix: impl AsRef<Path>) -> Result<Self> {
        let paths = MapPaths::new(prefix);
        let (keys, key_bytes) = TrieIndex::open_with_bytes(&paths.keys)?;
        let (values, value_bytes) = TrieIndex::open_with_bytes(&paths.values)?;
        let bytes = fs::read(&paths.ids).map_err(|e| Error::io(&paths.ids, e))?;
        let id_map = decode_id_map(&bytes)
            .map_err(|e| Error::corrupt(format!("{}: {}", paths.ids.display(), e)))?;

        for (path, file, expected) in [
            (&paths.keys, &key_bytes, id_map.keys_crc32),
            (&paths.values, &value_bytes, id_map.values_crc32),
        ] {
            if Footer::compute_crc32(file) != expected {
                return Err(Error::mismatch(format!(
                    "{} was built with a different {}",
                    paths.ids.display(),
                    path.display()
                )));
            }
        }
        Self::from_parts(keys, values, id_map.ids)
    }

    /// Assemble a map, checking that every key has exactly one valid value
    /// id.
    pub fn from_parts(
        keys: TrieIndex,
        values: TrieIndex,
        key_to_value: Vec<WordId>,
    ) -> Result<Self> {
        if key_to_value.len() != keys.num_keys() {
            return Err(Error::mismatch(format!(
                "{} keys but {} value ids",
                keys.num_keys(),
                key_to_value.len()
            )));
        }
        if let Some((key_id, &value_id)) = key_to_value
            .iter()
            .enumerate()
            .find(|(_, &v)| v as usize >= values.num_keys())
        {
            return Err(Error::mismatch(format!(
                "key {} maps to value id {} but only {} values exist",
                key_id,
                value_id,
                values.num_keys()
            )));
        }
        Ok(Self {
            keys,
            values,
            key_to_value,
        })
    }

    pub fn has_key(&self, key: &[u8]) -> bool {
        self.keys.include(key)
    }

    /// Value stored for `key`, if it is a key.
    pub fn lookup(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.value_id(key).and_then(|id| self.values.word(id))
    }

    /// Alias of [`lookup`](Self::lookup).
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.lookup(key)
    }

    /// Id of `key`'s value in the values trie.
    pub fn value_id(&self, key: &[u8]) -> Option<WordId> {
        let key_id = self.keys.word_id(key)?;
        self.key_to_value.get(key_id as usize).copied()
    }

    fn value_of(&self, key_id: WordId) -> Option<Vec<u8>> {
        let value_id = *self.key_to_value.get(key_id as usize)?;
        self.values.word(value_id)
    }

    pub fn len(&self) -> usize {
        self.keys.num_keys()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All keys, ascending.
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.keys.to_vec()
    }

    /// The value of each key, aligned with [`keys`](Self::keys). A value
    /// shared by several keys repeats.
    pub fn values(&self) -> Vec<Vec<u8>> {
        self.values_iter().collect()
    }

    /// `(key, value)` pairs in key order.
    pub fn iter(&self) -> MapIter<'_> {
        MapIter {
            map: self,
            keys: self.keys.iter(),
            next_id: 0,
        }
    }

    pub fn keys_iter(&self) -> Expansions<'_> {
        self.keys.iter()
    }

    pub fn values_iter(&self) -> impl Iterator<Item = Vec<u8>> + '_ {
        (0..self.len() as WordId).filter_map(move |id| self.value_of(id))
    }

    pub fn key_index(&self) -> &TrieIndex {
        &self.keys
    }

    pub fn value_index(&self) -> &TrieIndex {
        &self.values
    }

    /// Value id for each key id.
    pub fn key_to_value(&self) -> &[WordId] {
        &self.key_to_value
    }

    /// Greedy key scan of `text`, yielding `(key, pos, value)` lazily.
    pub fn scan_iter<'s>(&self, text: &'s [u8]) -> MapScan<'_, 's> {
        MapScan {
            map: self,
            text,
            scan: self.keys.scan_iter(text),
        }
    }

    pub fn scan(&self, text: &[u8]) -> Vec<(Vec<u8>, usize, Vec<u8>)> {
        self.scan_iter(text)
            .map(|(key, pos, value)| (key.to_vec(), pos, value))
            .collect()
    }
}

impl<'a> IntoIterator for &'a KeyValueMap {
    type Item = (Vec<u8>, Vec<u8>);
    type IntoIter = MapIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `(key, value)` pairs in key order.
#[derive(Debug, Clone)]
pub struct MapIter<'m> {
    map: &'m KeyValueMap,
    keys: Expansions<'m>,
    next_id: WordId,
}

impl Iterator for MapIter<'_> {
    type Item = (Vec<u8>, Vec<u8>);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        let value = self.map.value_of(self.next_id)?;
        self.next_id += 1;
        Some((key, value))
    }
}

impl FusedIterator for MapIter<'_> {}

/// Lazy `(key, pos, value)` scan. See [`TrieIndex::scan_iter`].
#[derive(Debug, Clone)]
pub struct MapScan<'m, 's> {
    map: &'m KeyValueMap,
    text: &'s [u8],
    scan: Scan<'m, 's>,
}

impl<'s> Iterator for MapScan<'_, 's> {
    type Item = (&'s [u8], usize, Vec<u8>);

    fn next(&mut self) -> Option<Self::Item> {
        let m = self.scan.next_match()?;
        let value = self.map.value_of(m.id)?;
        Some((&self.text[m.pos..m.pos + m.len], m.pos, value))
    }
}
