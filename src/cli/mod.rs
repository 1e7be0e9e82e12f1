// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the txdict command-line interface.
//!
//! `build` and `map-build` compile word lists, `inspect` describes an index
//! file, and `query`, `scan` and `lookup` run the read side against files on
//! disk. Inputs default to stdin so the tool composes in pipelines.

pub mod display;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "txdict",
    about = "Static byte-string dictionary builder and query tool",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an index from a word list (one word per line)
    Build {
        /// Output index file
        #[arg(short, long)]
        output: String,

        /// Word list; stdin when omitted
        input: Option<String>,

        /// Print the build report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a key/value map from `key<TAB>value` lines
    ///
    /// Writes `<prefix>.key`, `<prefix>.val` and `<prefix>.map`. A key that
    /// appears twice keeps its last value.
    MapBuild {
        /// Output prefix
        #[arg(short, long)]
        output: String,

        /// Pairs file; stdin when omitted
        input: Option<String>,

        /// Print the build report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect an index file
    Inspect {
        /// Path to index file
        file: String,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run one query against an index file
    Query {
        /// Path to index file
        file: String,

        /// Query kind
        #[arg(value_enum)]
        kind: QueryKind,

        /// Query text
        text: String,

        /// Maximum number of results (0 = unlimited)
        #[arg(short, long, default_value = "0")]
        limit: usize,
    },

    /// Print every greedy match in a text as `pos<TAB>word`
    Scan {
        /// Path to index file
        file: String,

        /// Text file; stdin when omitted
        input: Option<String>,
    },

    /// Look up one key in a map
    Lookup {
        /// Map prefix (without .key/.val/.map)
        prefix: String,

        /// Key to look up
        key: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QueryKind {
    /// Stored words that are prefixes of the text
    Prefixes,
    /// Stored words that start with the text
    Expansions,
    /// Length of the longest stored prefix (-1 if none)
    Longest,
    /// Depth of the deepest trie node the text reaches
    LongestMatch,
    /// Whether the text is a stored word
    Include,
}
