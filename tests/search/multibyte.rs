//! Byte-offset semantics on multi-byte text.

use crate::common::index_of;

fn hits(words: &[&str], text: &str) -> Vec<(String, usize)> {
    index_of(words)
        .scan(text.as_bytes())
        .into_iter()
        .map(|(w, p)| (String::from_utf8(w).unwrap(), p))
        .collect()
}

#[test]
fn test_utf8_scan_reports_byte_positions() {
    assert_eq!(
        hits(&["ほ", "ほげ", "ほが"], "ほほげふがほがぼけ"),
        vec![
            ("ほ".to_string(), 0),
            ("ほげ".to_string(), 3),
            ("ほが".to_string(), 15)
        ]
    );
}

#[test]
fn test_utf8_gsub() {
    let index = index_of(&["ほげ"]);
    let out = index.gsub("ほげふが".as_bytes(), |_, _| "HOGE");
    assert_eq!(String::from_utf8(out).unwrap(), "HOGEふが");
}

#[test]
fn test_longest_prefix_counts_bytes() {
    let index = index_of(&["日本", "日本語"]);
    assert_eq!(index.longest_prefix("日本語です".as_bytes()), 9);
    assert_eq!(index.longest_prefix("日本人".as_bytes()), 6);
    // Half a character matches nothing.
    assert_eq!(index.longest_prefix(&"日本".as_bytes()[..4]), -1);
    assert_eq!(index.longest_prefix_match(&"日本".as_bytes()[..4]), 4);
}

#[test]
fn test_non_utf8_bytes() {
    let words: Vec<Vec<u8>> = vec![vec![0x82, 0xa0], vec![0x82, 0xa0, 0x82, 0xa2]];
    let index = index_of(&words);
    assert_eq!(index.longest_prefix(&[0x82, 0xa0, 0x82, 0xa2, 0x00]), 4);
    assert_eq!(
        index.scan(&[0x00, 0x82, 0xa0, 0xff]),
        vec![(vec![0x82, 0xa0], 1)]
    );
}
