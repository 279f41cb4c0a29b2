//! Property-based tests for LevelTree.
//!
//! These tests verify the balance, size and ordering invariants and the
//! rank/select relationships using proptest.

use hnavl::{LevelTree, Node};
use proptest::prelude::*;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

/// Keys from a small alphabet so that duplicates are common.
fn arbitrary_key() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

fn arbitrary_keys(max_size: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arbitrary_key(), 0..max_size)
}

// =============================================================================
// Structural Invariants
// =============================================================================

proptest! {
    /// Every insertion leaves the level balanced with consistent sizes.
    #[test]
    fn prop_invariants_hold_after_every_insert(keys in arbitrary_keys(64)) {
        let mut level = LevelTree::new();
        for key in keys {
            level.insert(key);
            prop_assert_eq!(level.validate(), Ok(()));
        }
    }

    /// len equals the number of insertions.
    #[test]
    fn prop_len_counts_insertions(keys in arbitrary_keys(64)) {
        let level: LevelTree = keys.iter().cloned().collect();
        prop_assert_eq!(level.len(), keys.len());
        prop_assert_eq!(level.iter().len(), keys.len());
    }

    /// In-order traversal is the stably sorted insertion sequence.
    #[test]
    fn prop_iteration_is_stable_sort(keys in arbitrary_keys(64)) {
        let mut level = LevelTree::new();
        let mut inserted: Vec<(String, hnavl::NodeId)> = keys
            .iter()
            .map(|key| (key.clone(), level.insert(key.as_str())))
            .collect();
        inserted.sort_by(|left, right| left.0.cmp(&right.0));

        let expected: Vec<hnavl::NodeId> = inserted.into_iter().map(|(_, id)| id).collect();
        let actual: Vec<hnavl::NodeId> = (0..level.len())
            .filter_map(|index| level.select_id(index))
            .collect();
        prop_assert_eq!(actual, expected);
    }
}

// =============================================================================
// Rank / Select Laws
// =============================================================================

proptest! {
    /// Law: select(rank(key)) holds key for every present key.
    #[test]
    fn prop_select_rank_law(keys in arbitrary_keys(64)) {
        let level: LevelTree = keys.iter().cloned().collect();
        for key in &keys {
            let rank = level.rank(key);
            prop_assert!(rank.is_some());
            let selected = rank.and_then(|rank| level.select(rank)).map(Node::key);
            prop_assert_eq!(selected, Some(key.as_str()));
        }
    }

    /// Law: rank is the first in-order position of the key.
    #[test]
    fn prop_rank_is_first_position(keys in arbitrary_keys(64), probe in arbitrary_key()) {
        let level: LevelTree = keys.iter().cloned().collect();
        let in_order: Vec<&str> = level.keys().collect();
        let expected = in_order.iter().position(|key| *key == probe);
        prop_assert_eq!(level.rank(&probe), expected);
    }

    /// Law: count_equal matches a linear count.
    #[test]
    fn prop_count_equal_law(keys in arbitrary_keys(64), probe in arbitrary_key()) {
        let level: LevelTree = keys.iter().cloned().collect();
        let expected = keys.iter().filter(|key| **key == probe).count();
        prop_assert_eq!(level.count_equal(&probe), expected);
    }

    /// Law: upper_bound counts keys less than or equal to the probe.
    #[test]
    fn prop_upper_bound_law(keys in arbitrary_keys(64), probe in arbitrary_key()) {
        let level: LevelTree = keys.iter().cloned().collect();
        let expected = keys.iter().filter(|key| key.as_str() <= probe.as_str()).count();
        prop_assert_eq!(level.upper_bound(&probe), expected);
    }

    /// Law: select is defined exactly on 0..len.
    #[test]
    fn prop_select_range_law(keys in arbitrary_keys(32), index in 0usize..64) {
        let level: LevelTree = keys.iter().cloned().collect();
        prop_assert_eq!(level.select(index).is_some(), index < level.len());
    }
}
