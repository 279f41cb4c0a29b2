//! Path resolution across nested [`LevelTree`](crate::LevelTree)s.
//!
//! - [`parse_path`] turns `"bar/foo/[1]/orange"` into [`PathStep`]s
//! - [`HierarchicalIndex`] inserts and resolves paths level by level
//! - [`Entry`] is one line of the depth-first, in-order traversal used for
//!   rendering
//!
//! # Path Syntax
//!
//! Segments are separated by `/`; leading and trailing separators are
//! ignored. A segment may be followed by an occurrence qualifier `[n]`
//! naming the 0-based occurrence of that segment's key to descend through.
//! Without a qualifier the first occurrence is used, but descending through
//! a key that occurs more than once at its level is rejected as ambiguous.

mod index;
mod path;
mod render;
mod traversal;

pub use index::HierarchicalIndex;
pub use path::{PathStep, parse_path};
pub use traversal::Entry;
