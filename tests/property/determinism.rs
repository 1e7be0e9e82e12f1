//! Build determinism: same word set, same bytes.

use proptest::prelude::*;
use txdict::{TrieBuilder, TrieIndex};

fn build_bytes(words: &[Vec<u8>]) -> Vec<u8> {
    let mut builder = TrieBuilder::new();
    builder.add_all(words);
    builder.build_to_bytes().unwrap().0
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_order_and_duplicates_do_not_matter(
        words in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..6), 0..40),
        seed in any::<u64>(),
    ) {
        let mut shuffled = words.clone();
        // Deterministic permutation from the seed.
        let n = shuffled.len();
        let mut state = seed;
        for i in (1..n).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state >> 33) as usize % (i + 1);
            shuffled.swap(i, j);
        }
        shuffled.extend(words.iter().take(3).cloned());

        prop_assert_eq!(build_bytes(&words), build_bytes(&shuffled));
    }

    /// Loading and re-serializing is byte-identical.
    #[test]
    fn prop_bytes_roundtrip(
        words in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..6), 0..40),
    ) {
        let bytes = build_bytes(&words);
        let index = TrieIndex::from_bytes(&bytes).unwrap();
        prop_assert_eq!(index.to_bytes(), bytes);
    }
}
