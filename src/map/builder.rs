// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::mem;
use std::path::Path;

use serde::Serialize;

use crate::binary::{encode_id_map, IdMap};
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::io::write_atomic_all;
use crate::map::{KeyValueMap, MapPaths};
use crate::trie::{TrieBuilder, TrieIndex, WordId};

/// Outcome of a map build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapBuildReport {
    pub num_keys: usize,
    /// Distinct values.
    pub num_values: usize,
    pub key_bytes: usize,
    pub value_bytes: usize,
    pub map_bytes: usize,
    pub result_log: String,
    pub error_log: String,
}

/// Accumulates `(key, value)` pairs. A key added twice keeps its last value.
#[derive(Debug, Default)]
pub struct MapBuilder {
    pairs: BTreeMap<Vec<u8>, Vec<u8>>,
    diagnostics: Diagnostics,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) {
        self.pairs
            .insert(key.as_ref().to_vec(), value.as_ref().to_vec());
    }

    pub fn add_all<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        for (key, value) in pairs {
            self.add(key, value);
        }
    }

    /// Distinct keys added so far.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Build and write `<prefix>.key`, `<prefix>.val` and `<prefix>.map`.
    ///
    /// All three files are staged before any replaces its destination. The
    /// `.map` file is renamed last and records checksums of the other two,
    /// so a set mixed from two builds fails to open.
    pub fn build(&mut self, prefix: impl AsRef<Path>) -> Result<MapBuildReport> {
        let map = self.build_map()?;
        let paths = MapPaths::new(prefix);

        let key_bytes = map.key_index().to_bytes();
        let value_bytes = map.value_index().to_bytes();
        let map_bytes = encode_id_map(&IdMap::new(
            map.key_to_value().to_vec(),
            &key_bytes,
            &value_bytes,
        ));

        let files: [(&Path, &[u8]); 3] = [
            (&paths.keys, &key_bytes),
            (&paths.values, &value_bytes),
            (&paths.ids, &map_bytes),
        ];
        if let Err(e) = write_atomic_all(&files) {
            self.diagnostics.error(e.to_string());
            return Err(e);
        }
        for (path, bytes) in files {
            self.diagnostics
                .info(format!("wrote {} bytes to {}", bytes.len(), path.display()));
        }

        Ok(MapBuildReport {
            num_keys: map.len(),
            num_values: map.value_index().num_keys(),
            key_bytes: key_bytes.len(),
            value_bytes: value_bytes.len(),
            map_bytes: map_bytes.len(),
            result_log: self.diagnostics.result_log().to_string(),
            error_log: self.diagnostics.error_log().to_string(),
        })
    }

    /// Build in memory. Drains the accumulated pairs.
    pub fn build_map(&mut self) -> Result<KeyValueMap> {
        self.diagnostics.clear();
        let pairs = mem::take(&mut self.pairs);

        let keys = self.build_trie("keys", pairs.keys())?;
        let values = self.build_trie("values", pairs.values())?;

        let map = resolve_value_ids(&pairs, &values)
            .and_then(|ids| KeyValueMap::from_parts(keys, values, ids));
        match &map {
            Ok(map) => self.diagnostics.info(format!(
                "{} keys, {} distinct values",
                map.len(),
                map.value_index().num_keys()
            )),
            Err(e) => self.diagnostics.error(e.to_string()),
        }
        map
    }

    /// Build one side of the map, folding its logs into this builder's.
    fn build_trie<'p>(
        &mut self,
        side: &str,
        words: impl IntoIterator<Item = &'p Vec<u8>>,
    ) -> Result<TrieIndex> {
        let mut builder = TrieBuilder::new();
        builder.add_all(words);
        let built = builder.build_index();
        for line in builder.result_log().lines() {
            self.diagnostics.info(format!("{}: {}", side, line));
        }
        for line in builder.error_log().lines() {
            self.diagnostics.error(format!("{}: {}", side, line));
        }
        if let Err(e) = &built {
            if builder.error_log().is_empty() {
                self.diagnostics.error(format!("{}: {}", side, e));
            }
        }
        built
    }

    pub fn result_log(&self) -> &str {
        self.diagnostics.result_log()
    }

    pub fn error_log(&self) -> &str {
        self.diagnostics.error_log()
    }
}

/// Value id of each pair, in key order. Key order of the `BTreeMap` is the
/// same byte order the keys trie assigns ids in.
fn resolve_value_ids(
    pairs: &BTreeMap<Vec<u8>, Vec<u8>>,
    values: &TrieIndex,
) -> Result<Vec<WordId>> {
    pairs
        .values()
        .map(|v| {
            values.word_id(v).ok_or_else(|| {
                Error::mismatch(format!(
                    "value {:?} missing from values trie",
                    String::from_utf8_lossy(v)
                ))
            })
        })
        .collect()
}
