// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::{self, BufWriter, Read, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;

use txdict::{KeyValueMap, MapBuilder, TrieBuilder, TrieIndex};

mod cli;
use cli::display::{
    field, fill_ratio, format_size, row, section_bot, section_mid, section_top, show_bytes,
};
use cli::{Cli, Commands, QueryKind};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Build {
            output,
            input,
            json,
        } => run_build(&output, input.as_deref(), json),
        Commands::MapBuild {
            output,
            input,
            json,
        } => run_map_build(&output, input.as_deref(), json),
        Commands::Inspect { file, json } => run_inspect(&file, json),
        Commands::Query {
            file,
            kind,
            text,
            limit,
        } => run_query(&file, kind, &text, limit),
        Commands::Scan { file, input } => run_scan(&file, input.as_deref()),
        Commands::Lookup { prefix, key } => run_lookup(&prefix, &key),
    }
}

/// Whole input as bytes, from a file or stdin.
fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(p) => fs::read(p).with_context(|| format!("failed to read {}", p)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Non-blank lines, with a trailing `\r` removed.
fn lines(input: &[u8]) -> impl Iterator<Item = &[u8]> {
    input
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.is_empty())
}

fn run_build(output: &str, input: Option<&str>, json: bool) -> Result<()> {
    let input = read_input(input)?;
    let mut builder = TrieBuilder::new();
    builder.add_all(lines(&input));
    let report = builder.build(output)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        eprintln!(
            "✓ {} keys ({} words read) → {} ({})",
            report.num_keys,
            report.num_words_added,
            output,
            format_size(report.bytes_written)
        );
    }
    Ok(())
}

fn run_map_build(output: &str, input: Option<&str>, json: bool) -> Result<()> {
    let input = read_input(input)?;
    let mut builder = MapBuilder::new();
    for (n, line) in lines(&input).enumerate() {
        let Some(tab) = line.iter().position(|&b| b == b'\t') else {
            bail!("line {}: expected key<TAB>value", n + 1);
        };
        builder.add(&line[..tab], &line[tab + 1..]);
    }
    let report = builder.build(output)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        eprintln!(
            "✓ {} keys, {} distinct values → {}.{{key,val,map}}",
            report.num_keys, report.num_values, output
        );
    }
    Ok(())
}

fn run_inspect(file: &str, json: bool) -> Result<()> {
    let index = TrieIndex::open(file)?;
    let stats = index.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let used = stats.num_nodes + stats.num_keys;
    section_top(file);
    field("keys", &stats.num_keys.to_string());
    field("trie nodes", &stats.num_nodes.to_string());
    field("empty word", if stats.has_empty_word { "yes" } else { "no" });
    section_mid("DOUBLE ARRAY");
    field("slots", &stats.array_len.to_string());
    field("slots in use", &fill_ratio(used, stats.array_len));
    field("file size", &format_size(stats.bytes));
    section_mid("FIRST WORDS");
    for word in index.iter().take(5) {
        row(&format!(" {}", show_bytes(&word)));
    }
    section_bot();
    Ok(())
}

fn run_query(file: &str, kind: QueryKind, text: &str, limit: usize) -> Result<()> {
    let index = TrieIndex::open(file)?;
    let text = text.as_bytes();
    let out = io::stdout();
    let mut out = BufWriter::new(out.lock());

    match kind {
        QueryKind::Prefixes => {
            for word in index.search_prefixes_limit(text, limit) {
                writeln!(out, "{}", show_bytes(&word))?;
            }
        }
        QueryKind::Expansions => {
            for word in index.search_expansions(text, limit) {
                writeln!(out, "{}", show_bytes(&word))?;
            }
        }
        QueryKind::Longest => writeln!(out, "{}", index.longest_prefix(text))?,
        QueryKind::LongestMatch => writeln!(out, "{}", index.longest_prefix_match(text))?,
        QueryKind::Include => writeln!(out, "{}", index.include(text))?,
    }
    out.flush()?;
    Ok(())
}

fn run_scan(file: &str, input: Option<&str>) -> Result<()> {
    let index = TrieIndex::open(file)?;
    let text = read_input(input)?;
    let out = io::stdout();
    let mut out = BufWriter::new(out.lock());
    for (word, pos) in index.scan_iter(&text) {
        writeln!(out, "{}\t{}", pos, show_bytes(word))?;
    }
    out.flush()?;
    Ok(())
}

fn run_lookup(prefix: &str, key: &str) -> Result<()> {
    let map = KeyValueMap::open(prefix)?;
    match map.lookup(key.as_bytes()) {
        Some(value) => {
            println!("{}", show_bytes(&value));
            Ok(())
        }
        None => bail!("key not found: {}", key),
    }
}
