//! Scan and gsub laws.

use crate::common::{index_of, naive_scan, reconstruct};
use proptest::prelude::*;

fn word_list_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(b'a'..=b'c', 0..5), 0..20)
}

fn text_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(b'a'..=b'd', 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_scan_matches_brute_force(words in word_list_strategy(), text in text_strategy()) {
        let index = index_of(&words);
        prop_assert_eq!(index.scan(&text), naive_scan(&words, &text));
    }

    /// Gaps plus matches, in order, give back the text.
    #[test]
    fn prop_scan_reconstructs_text(words in word_list_strategy(), text in text_strategy()) {
        let index = index_of(&words);
        let matches = index.scan(&text);
        prop_assert!(matches.windows(2).all(|w| w[0].1 + w[0].0.len() <= w[1].1));
        for (word, pos) in &matches {
            prop_assert_eq!(&text[*pos..pos + word.len()], word.as_slice());
        }
        prop_assert_eq!(reconstruct(&text, &matches), text);
    }

    /// Identity replacement leaves the text unchanged.
    #[test]
    fn prop_gsub_identity(words in word_list_strategy(), text in text_strategy()) {
        let index = index_of(&words);
        prop_assert_eq!(index.gsub(&text, |w, _| w.to_vec()), text);
    }

    /// The lazy iterator and the eager scan agree, and restarting starts over.
    #[test]
    fn prop_scan_iter_restartable(words in word_list_strategy(), text in text_strategy()) {
        let index = index_of(&words);
        let first: Vec<_> = index.scan_iter(&text).collect();
        let second: Vec<_> = index.scan_iter(&text).collect();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), index.scan(&text).len());
    }
}
