//! Property-based tests for HierarchicalIndex.

use hnavl::{HierarchicalIndex, PathError};
use proptest::prelude::*;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

/// Unqualified paths of one to four segments over a small alphabet.
fn arbitrary_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-c]", 1..=4).prop_map(|segments| segments.join("/"))
}

fn arbitrary_paths(max_size: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arbitrary_path(), 0..max_size)
}

/// Inserts every path, ignoring ambiguity rejections.
fn build(paths: &[String]) -> HierarchicalIndex {
    let mut index = HierarchicalIndex::new();
    for path in paths {
        match index.insert_path(path) {
            Ok(()) | Err(PathError::Ambiguous { .. }) => {}
            Err(error) => panic!("unexpected error for {path}: {error}"),
        }
    }
    index
}

/// Qualifies every non-final segment with `[0]`, the occurrence an
/// unqualified insertion descends through.
fn first_occurrences(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let (last, prefix) = segments.split_last().expect("paths have a segment");
    prefix
        .iter()
        .map(|segment| format!("{segment}/[0]/"))
        .chain(std::iter::once((*last).to_string()))
        .collect()
}

// =============================================================================
// Structural Laws
// =============================================================================

proptest! {
    /// Every level of the hierarchy stays balanced and size-consistent.
    #[test]
    fn prop_every_level_is_valid(paths in arbitrary_paths(40)) {
        let index = build(&paths);
        prop_assert_eq!(index.validate(), Ok(()));
    }

    /// Each level yields non-decreasing keys in traversal order.
    #[test]
    fn prop_levels_are_sorted(paths in arbitrary_paths(40)) {
        let index = build(&paths);
        for entry in index.entries() {
            if let Some(child) = entry.node.child() {
                let keys: Vec<&str> = child.keys().collect();
                prop_assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
            }
        }
        let root: Vec<&str> = index.root().keys().collect();
        prop_assert!(root.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    /// entries visits every node exactly once.
    #[test]
    fn prop_entries_cover_all_nodes(paths in arbitrary_paths(40)) {
        let index = build(&paths);
        prop_assert_eq!(index.entries().len(), index.len());
    }

    /// A successful insertion adds exactly one leaf, so the node count grows
    /// by between one and the number of segments.
    #[test]
    fn prop_insert_grows_len(paths in arbitrary_paths(20), path in arbitrary_path()) {
        let mut index = build(&paths);
        let before = index.len();
        let segments = path.split('/').count();
        match index.insert_path(&path) {
            Ok(()) => {
                prop_assert!(index.len() > before);
                prop_assert!(index.len() <= before + segments);
                prop_assert_eq!(index.contains_path(&first_occurrences(&path)), Ok(true));
            }
            Err(PathError::Ambiguous { .. }) => prop_assert_eq!(index.len(), before),
            Err(error) => prop_assert!(false, "unexpected error: {}", error),
        }
    }
}

// =============================================================================
// Duplicate Path Laws
// =============================================================================

proptest! {
    /// Inserting a path twice into a fresh index yields two equal leaves
    /// under one shared prefix.
    #[test]
    fn prop_same_path_twice_duplicates_leaf(path in arbitrary_path()) {
        let mut index = HierarchicalIndex::new();
        index.insert_path(&path).unwrap();
        index.insert_path(&path).unwrap();

        let segments: Vec<&str> = path.split('/').collect();
        let leaf = segments[segments.len() - 1];
        prop_assert_eq!(index.len(), segments.len() + 1);

        let parent_level = if segments.len() == 1 {
            Some(index.root())
        } else {
            let prefix = segments[..segments.len() - 1].join("/");
            index.find_path(&prefix).unwrap().and_then(|node| node.child())
        };
        prop_assert_eq!(parent_level.map(|level| level.count_equal(leaf)), Some(2));
    }

    /// Descending through a duplicated leaf is rejected until qualified.
    #[test]
    fn prop_duplicate_requires_qualifier(path in arbitrary_path(), tail in "[a-c]") {
        let mut index = HierarchicalIndex::new();
        index.insert_path(&path).unwrap();
        index.insert_path(&path).unwrap();

        let unqualified = format!("{path}/{tail}");
        let is_ambiguous = matches!(
            index.insert_path(&unqualified),
            Err(PathError::Ambiguous { .. })
        );
        prop_assert!(is_ambiguous);

        let qualified = format!("{path}/[1]/{tail}");
        prop_assert!(index.insert_path(&qualified).is_ok());
        prop_assert_eq!(index.contains_path(&qualified), Ok(true));
    }
}
