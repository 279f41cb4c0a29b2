//! One hierarchy level: an order-statistics AVL tree over string segments.
//!
//! - [`LevelTree`]: the balanced tree, with O(log n) `insert`, `select`,
//!   `rank`, `upper_bound` and `count_equal`
//! - [`Node`]: one entry, optionally owning the next level
//! - [`NodeId`]: a stable handle to a node inside its level
//!
//! Equal keys are kept as separate nodes. A newly inserted duplicate always
//! lands after the existing equal keys in in-order position, so equal keys
//! stay in insertion order.
//!
//! # Examples
//!
//! ```rust
//! use hnavl::level::LevelTree;
//!
//! let mut level = LevelTree::new();
//! level.insert("zebra");
//! level.insert("foo");
//! let second_foo = level.insert("foo");
//! level.insert("apple");
//!
//! let keys: Vec<&str> = level.keys().collect();
//! assert_eq!(keys, vec!["apple", "foo", "foo", "zebra"]);
//!
//! assert_eq!(level.rank("foo"), Some(1));
//! assert_eq!(level.count_equal("foo"), 2);
//! assert_eq!(level.select(3).map(|node| node.key()), Some("zebra"));
//! assert_eq!(level.select_id(2), Some(second_foo));
//! ```

mod iter;
mod node;
mod tree;

pub use iter::LevelTreeIterator;
pub use node::{Node, NodeId};
pub use tree::LevelTree;
