//! # hnavl
//!
//! A hierarchical index for slash-delimited path keys such as
//! `"bar/foo/apple"`, built from nested order-statistics AVL trees.
//!
//! ## Overview
//!
//! Every hierarchy level is an independent [`LevelTree`]: a self-balancing
//! binary search tree over string segments, augmented with subtree sizes so
//! that `rank` and `select` run in O(log n). Each node may own a nested
//! [`LevelTree`] holding the next path level, created only when a path first
//! continues past that node.
//!
//! - **Levels**: [`LevelTree`] with `insert`, `select`, `rank`, `upper_bound`
//!   and `count_equal`
//! - **Hierarchy**: [`HierarchicalIndex`] resolves paths level by level
//! - **Paths**: segments separated by `/`, optionally followed by an
//!   occurrence qualifier `[n]` to pick among equal-keyed siblings
//! - **Rendering**: deterministic connector-drawing dumps of the hierarchy
//!
//! Duplicate segment values are allowed at any level and are stored as
//! distinct nodes, in insertion order.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for levels, the index and the
//!   configuration types
//!
//! ## Example
//!
//! ```rust
//! use hnavl::prelude::*;
//!
//! let mut index = HierarchicalIndex::new();
//! index.insert_path("bar").unwrap();
//! index.insert_path("bar/foo").unwrap();
//! index.insert_path("bar/foo").unwrap();
//! index.insert_path("par").unwrap();
//!
//! index.insert_path("bar/foo/[0]/apple").unwrap();
//! index.insert_path("bar/foo/[1]/orange").unwrap();
//!
//! // `foo` is duplicated under `bar`, so descending through it needs `[n]`.
//! assert!(index.insert_path("bar/foo/apple2").is_err());
//!
//! assert_eq!(
//!     index.to_string(),
//!     "├── bar\n\
//!      │   ├── foo\n\
//!      │   │   └── apple\n\
//!      │   └── foo\n\
//!      │       └── orange\n\
//!      └── par\n"
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use hnavl::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::hierarchy::*;
    pub use crate::level::*;
}

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod level;

pub use config::{IndexTokenPolicy, Label, PathSyntax, RenderOptions};
pub use error::{InvariantViolation, PathError};
pub use hierarchy::{Entry, HierarchicalIndex, PathStep, parse_path};
pub use level::{LevelTree, LevelTreeIterator, Node, NodeId};
