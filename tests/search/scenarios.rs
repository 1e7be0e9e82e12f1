//! The reference dictionary scenarios.

use crate::common::{index_of, sample_index, sample_map, strs};
use txdict::subject;

#[test]
fn test_sample_membership() {
    let index = sample_index();
    assert_eq!(index.num_keys(), 6);
    for w in ["foo", "ho", "hog", "hoga", "hoge", "hogeshi"] {
        assert!(index.include(w.as_bytes()), "{}", w);
    }
    for w in ["", "h", "fo", "hogesh", "hogeshii"] {
        assert!(!index.include(w.as_bytes()), "{}", w);
    }
}

#[test]
fn test_sample_longest_prefix() {
    let index = sample_index();
    assert_eq!(index.longest_prefix(b"hogeshaa"), 4);
    assert_eq!(index.longest_prefix_with(b"hogeshaa", true), 6);
    assert_eq!(index.longest_prefix(b"foobar"), 3);
    assert_eq!(index.longest_prefix(b"bar"), -1);
}

#[test]
fn test_sample_search_prefixes() {
    let index = sample_index();
    assert_eq!(strs(index.search_prefixes(b"hog")), ["ho", "hog"]);
    assert_eq!(strs(index.search_prefixes_limit(b"hogeshi", 3)), ["ho", "hog", "hoge"]);
}

#[test]
fn test_sample_search_expansions() {
    let index = sample_index();
    let found = strs(index.search_expansions(b"hog", 0));
    for w in ["hog", "hoga", "hoge", "hogeshi"] {
        assert!(found.contains(&w.to_string()), "{}", w);
    }
    assert_eq!(found.len(), 4);
    assert_eq!(strs(index.search_expansions(b"", 0)).len(), 6);
}

#[test]
fn test_sample_scan() {
    let index = sample_index();
    assert_eq!(
        index.scan(b"hohogefugahogaboke"),
        vec![
            (b"ho".to_vec(), 0),
            (b"hoge".to_vec(), 2),
            (b"hoga".to_vec(), 10)
        ]
    );
}

#[test]
fn test_sample_gsub() {
    let index = sample_index();
    let out = index.gsub(b"hohogefugahogaboke", |w, _| w.to_ascii_uppercase());
    assert_eq!(out, b"HOHOGEfugaHOGAboke");
}

#[test]
fn test_sample_map() {
    let map = sample_map();
    assert!(map.has_key(b"hoge"));
    assert_eq!(map.lookup(b"hoge"), Some(b"bar".to_vec()));
    assert_eq!(map.lookup(b"foo"), None);
    assert_eq!(strs(map.keys()), ["ho", "hoge", "hogeshi"]);
    assert_eq!(strs(map.values()), ["foo", "bar", "foobar"]);
    let scanned: Vec<(String, usize, String)> = map
        .scan_iter(b"hogehogahoyo")
        .map(|(k, p, v)| {
            (
                String::from_utf8_lossy(k).into_owned(),
                p,
                String::from_utf8(v).unwrap(),
            )
        })
        .collect();
    assert_eq!(
        scanned,
        vec![
            ("hoge".to_string(), 0, "bar".to_string()),
            ("ho".to_string(), 4, "foo".to_string()),
            ("ho".to_string(), 8, "foo".to_string()),
        ]
    );
}

#[test]
fn test_queries_on_clamped_subject() {
    let index = sample_index();
    let text = b"xxhogeshaa";
    assert_eq!(index.longest_prefix(subject(text, 2, -1).unwrap()), 4);
    assert_eq!(index.longest_prefix(subject(text, 2, 3).unwrap()), 3);
    assert_eq!(index.longest_prefix(subject(text, 100, 3).unwrap()), -1);
    assert!(subject(text, -1, 3).is_err());
}

#[test]
fn test_relaxed_variant_on_unique_paths() {
    // Only one path per byte sequence exists, so the deepest reachable node
    // is always the walk of the text itself.
    let index = index_of(&["abcd", "abxy", "q"]);
    assert_eq!(index.longest_prefix_match(b"abcz"), 3);
    assert_eq!(index.longest_prefix_match(b"abxyz"), 4);
    assert_eq!(index.longest_prefix_match(b"z"), 0);
    assert_eq!(index.longest_prefix(b"abcz"), -1);
}
