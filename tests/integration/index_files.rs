//! Building to disk and opening again.

use crate::common::{assert_index_well_formed, build_file, sample_index, strs, SAMPLE_WORDS};
use txdict::{Error, TrieBuilder, TrieIndex};

#[test]
fn test_build_then_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = build_file(dir.path(), "sample.idx", &SAMPLE_WORDS);

    let index = TrieIndex::open(&path).unwrap();
    assert_eq!(index.num_keys(), 6);
    assert_eq!(index.longest_prefix(b"hogeshaa"), 4);
    assert_eq!(strs(index.search_prefixes(b"hog")), ["ho", "hog"]);
    assert_eq!(index.error_log(), "");
    assert!(index.result_log().contains("opened"));
    assert_index_well_formed(&index);
}

#[test]
fn test_file_bytes_equal_in_memory_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = build_file(dir.path(), "sample.idx", &SAMPLE_WORDS);
    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk, sample_index().to_bytes());
}

#[test]
fn test_build_report_matches_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("r.idx");
    let mut builder = TrieBuilder::new();
    builder.add_all(SAMPLE_WORDS);
    builder.add("hoge");
    let report = builder.build(&path).unwrap();

    assert_eq!(report.num_words_added, 7);
    assert_eq!(report.num_keys, 6);
    assert_eq!(
        std::fs::metadata(&path).unwrap().len() as usize,
        report.bytes_written
    );
    assert!(report.result_log.contains("wrote"));
    assert_eq!(builder.error_log(), "");
}

#[test]
fn test_empty_word_list_builds_openable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = build_file::<&str>(dir.path(), "empty.idx", &[]);
    let index = TrieIndex::open(&path).unwrap();
    assert!(index.is_empty());
    assert_eq!(index.longest_prefix(b"anything"), -1);
    assert!(index.search_expansions(b"", 0).is_empty());
}

#[test]
fn test_open_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TrieIndex::open(dir.path().join("missing.idx")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }), "got {err:?}");
}

#[test]
fn test_failed_build_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("out.idx");
    let mut builder = TrieBuilder::new();
    builder.add_all(SAMPLE_WORDS);
    assert!(builder.build(&path).is_err());
    assert!(!path.exists());
    assert!(!builder.error_log().is_empty());
}

#[test]
fn test_rebuild_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = build_file(dir.path(), "d.idx", &["old"]);
    build_file(dir.path(), "d.idx", &["new", "newer"]);
    let index = TrieIndex::open(&path).unwrap();
    assert_eq!(strs(index.to_vec()), ["new", "newer"]);
}
