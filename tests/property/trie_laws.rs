//! Membership, prefix and expansion laws.

use crate::common::{
    assert_index_well_formed, dedup_sorted, index_of, naive_expansions, naive_longest_prefix,
    naive_prefixes,
};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Words over a tiny alphabet so prefixes are shared often.
fn word_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(b'a'..=b'c', 0..7)
}

/// Word lists with duplicates and arbitrary order.
fn word_list_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(word_strategy(), 0..60)
}

/// Arbitrary bytes, including 0x00 and 0xFF edges.
fn binary_word_list_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..5), 0..40)
}

fn query_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(b'a'..=b'c', 0..10)
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// num_keys counts distinct words and include is exact membership.
    #[test]
    fn prop_membership(words in word_list_strategy(), text in query_strategy()) {
        let index = index_of(&words);
        let distinct = dedup_sorted(&words);
        prop_assert_eq!(index.num_keys(), distinct.len());
        for w in &distinct {
            prop_assert!(index.include(w));
        }
        prop_assert_eq!(index.include(&text), distinct.contains(&text));
    }

    /// Enumeration is the sorted distinct word list.
    #[test]
    fn prop_enumeration_sorted(words in binary_word_list_strategy()) {
        let index = index_of(&words);
        prop_assert_eq!(index.to_vec(), dedup_sorted(&words));
        assert_index_well_formed(&index);
    }

    #[test]
    fn prop_longest_prefix(words in word_list_strategy(), text in query_strategy()) {
        let index = index_of(&words);
        let expected = naive_longest_prefix(&words, &text).map_or(-1, |n| n as isize);
        prop_assert_eq!(index.longest_prefix(&text), expected);
    }

    /// The relaxed variant never falls short of the strict one and never
    /// exceeds the text.
    #[test]
    fn prop_longest_prefix_match_bounds(words in word_list_strategy(), text in query_strategy()) {
        let index = index_of(&words);
        let relaxed = index.longest_prefix_match(&text);
        prop_assert!(relaxed >= index.longest_prefix(&text));
        prop_assert!(relaxed >= 0);
        prop_assert!(relaxed as usize <= text.len());
        // The reached depth is a prefix of some stored word.
        let reached = &text[..relaxed as usize];
        prop_assert!(words.iter().any(|w| w.starts_with(reached)) || relaxed == 0);
    }

    #[test]
    fn prop_search_prefixes(words in word_list_strategy(), text in query_strategy()) {
        let index = index_of(&words);
        let found = index.search_prefixes(&text);
        prop_assert_eq!(&found, &naive_prefixes(&words, &text));
        prop_assert!(found.windows(2).all(|w| w[0].len() < w[1].len()));
    }

    #[test]
    fn prop_search_expansions(words in word_list_strategy(), prefix in query_strategy()) {
        let index = index_of(&words);
        prop_assert_eq!(index.search_expansions(&prefix, 0), naive_expansions(&words, &prefix));
    }

    /// Truncation keeps membership: every returned word is a true expansion.
    #[test]
    fn prop_expansion_limit(
        words in word_list_strategy(),
        prefix in prop::collection::vec(b'a'..=b'c', 0..3),
        limit in 1usize..5,
    ) {
        let index = index_of(&words);
        let all = naive_expansions(&words, &prefix);
        let some = index.search_expansions(&prefix, limit);
        prop_assert_eq!(some.len(), all.len().min(limit));
        for w in &some {
            prop_assert!(w.starts_with(&prefix));
            prop_assert!(all.contains(w));
        }
    }

    #[test]
    fn prop_word_id_roundtrip(words in binary_word_list_strategy()) {
        let index = index_of(&words);
        for (id, w) in dedup_sorted(&words).iter().enumerate() {
            prop_assert_eq!(index.word_id(w), Some(id as u32));
            let word = index.word(id as u32);
            prop_assert_eq!(word.as_ref(), Some(w));
        }
    }
}
