//! Property-based tests for the monomial arena
//!
//! This module tests:
//! - Stored words and addresses survive later allocations
//! - Word accounting
//! - The capacity limit

use oxiz_res::{ArenaConfig, ArenaError, MonomialArena, Word};
use proptest::prelude::*;

/// Strategy for batches of small allocations
fn batch_strategy() -> impl Strategy<Value = Vec<Vec<Word>>> {
    prop::collection::vec(prop::collection::vec(0i64..100, 0..12), 1..200)
}

fn small_arena() -> MonomialArena {
    MonomialArena::with_config(
        ArenaConfig::default()
            .with_initial_chunk_words(16)
            .with_max_chunk_words(64),
    )
}

proptest! {
    /// Every allocation reads back unchanged at the same address
    #[test]
    fn allocations_are_stable(batch in batch_strategy()) {
        let mut arena = small_arena();
        let mut stored = Vec::new();
        for words in &batch {
            let handle = arena.allocate(words).unwrap();
            stored.push((handle, arena.get(handle).as_ptr()));
        }

        for ((handle, ptr), words) in stored.iter().zip(&batch) {
            prop_assert_eq!(arena.get(*handle), words.as_slice());
            prop_assert_eq!(arena.get(*handle).as_ptr(), *ptr);
        }
    }

    /// Used words is the sum of the allocation sizes
    #[test]
    fn used_words_adds_up(batch in batch_strategy()) {
        let mut arena = small_arena();
        for words in &batch {
            arena.allocate(words).unwrap();
        }
        let expected: usize = batch.iter().map(Vec::len).sum();
        prop_assert_eq!(arena.used_words(), expected);
        prop_assert_eq!(arena.num_allocations(), batch.len());
        prop_assert!(arena.capacity_words() >= expected);
    }

    /// The limit is never exceeded and refusals change nothing
    #[test]
    fn limit_is_enforced(batch in batch_strategy(), limit in 0usize..300) {
        let mut arena = MonomialArena::with_config(
            ArenaConfig::default()
                .with_initial_chunk_words(16)
                .with_max_chunk_words(64)
                .with_max_words(limit),
        );
        for words in &batch {
            let before = arena.used_words();
            match arena.allocate(words) {
                Ok(_) => prop_assert!(arena.used_words() <= limit),
                Err(err) => {
                    let is_capacity = matches!(err, ArenaError::CapacityExceeded { .. });
                    prop_assert!(is_capacity);
                    prop_assert_eq!(arena.used_words(), before);
                }
            }
        }
    }
}
