//! The hierarchical index over nested levels.

use std::fmt;

use tracing::{debug, trace};

use super::path::{PathStep, parse_path};
use crate::config::PathSyntax;
use crate::error::{InvariantViolation, PathError};
use crate::level::{LevelTree, Node, NodeId};

/// An ordered, indexable container of hierarchical path keys.
///
/// The index owns a root [`LevelTree`]; every further level is reached
/// through a node's nested level.
///
/// # Examples
///
/// ```rust
/// use hnavl::HierarchicalIndex;
///
/// let mut index = HierarchicalIndex::new();
/// index.insert_path("bar/foo").unwrap();
/// index.insert_path("bar/foo").unwrap();
/// index.insert_path("par").unwrap();
///
/// // Inserting the same full path twice creates two sibling leaves.
/// let bar = index.find_path("bar").unwrap().unwrap();
/// assert_eq!(bar.child().map(|level| level.count_equal("foo")), Some(2));
///
/// // Positional access: the second node under the first root entry.
/// assert_eq!(index.node_at(&[0, 1]).map(|node| node.key()), Some("foo"));
/// assert_eq!(index.len(), 4);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HierarchicalIndex {
    root: LevelTree,
    syntax: PathSyntax,
}

impl HierarchicalIndex {
    /// Creates an empty index using the default path syntax.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_syntax(PathSyntax::new())
    }

    /// Creates an empty index using `syntax` to parse paths.
    #[inline]
    #[must_use]
    pub const fn with_syntax(syntax: PathSyntax) -> Self {
        Self {
            root: LevelTree::new(),
            syntax,
        }
    }

    /// The path syntax in use.
    #[inline]
    #[must_use]
    pub const fn syntax(&self) -> &PathSyntax {
        &self.syntax
    }

    /// The top hierarchy level.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> &LevelTree {
        &self.root
    }

    /// Returns `true` if nothing has been inserted.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Total number of nodes over all levels.
    #[must_use]
    pub fn len(&self) -> usize {
        fn count(level: &LevelTree) -> usize {
            level.len() + level.iter().filter_map(Node::child).map(count).sum::<usize>()
        }
        count(&self.root)
    }

    /// Number of levels on the deepest path, 0 when empty.
    #[must_use]
    pub fn depth(&self) -> usize {
        fn deepest(level: &LevelTree) -> usize {
            if level.is_empty() {
                return 0;
            }
            1 + level
                .iter()
                .filter_map(Node::child)
                .map(deepest)
                .max()
                .unwrap_or(0)
        }
        deepest(&self.root)
    }

    /// Inserts `path`, creating nodes and nested levels as needed.
    ///
    /// Each non-final segment reuses the existing node at its occurrence
    /// (the `[n]` qualifier, or the first one), so paths sharing a prefix
    /// merge. An occurrence that names no node, negative or past the last
    /// equal key, inserts a new node instead. The final segment always gets a brand-new node, which makes
    /// inserting the same full path twice produce two equal sibling leaves.
    ///
    /// # Errors
    ///
    /// Any [`parse_path`] error, or [`PathError::Ambiguous`] when a
    /// non-final segment occurs more than once at its level and carries no
    /// qualifier. Errors are raised before the index is modified.
    ///
    /// # Complexity
    ///
    /// O(d log n) for a path of `d` segments.
    pub fn insert_path(&mut self, path: &str) -> Result<(), PathError> {
        let steps = parse_path(path, &self.syntax)?;
        debug!(path, steps = steps.len(), "inserting path");

        let final_depth = steps.len() - 1;
        let mut level = &mut self.root;
        for (depth, step) in steps.iter().enumerate() {
            if depth == final_depth {
                trace!(segment = %step.segment, depth, "inserting leaf");
                level.insert(step.segment.as_str());
                break;
            }
            let id = Self::resolve_or_insert(level, step, depth)?;
            level = level.descend(id);
        }
        Ok(())
    }

    /// Inserts every path in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// The first error returned by [`insert_path`](Self::insert_path);
    /// paths before it stay inserted.
    pub fn insert_paths<'a, I>(&mut self, paths: I) -> Result<(), PathError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        paths.into_iter().try_for_each(|path| self.insert_path(path))
    }

    /// Picks the node a non-final step descends through.
    fn resolve_or_insert(
        level: &mut LevelTree,
        step: &PathStep,
        depth: usize,
    ) -> Result<NodeId, PathError> {
        Self::check_ambiguity(level, step, depth)?;
        if let Some(existing) = step
            .target()
            .and_then(|target| level.occurrence(&step.segment, target))
        {
            trace!(segment = %step.segment, occurrence = ?step.occurrence, depth, "reusing node");
            return Ok(existing);
        }
        trace!(segment = %step.segment, depth, "inserting node");
        Ok(level.insert(step.segment.as_str()))
    }

    fn check_ambiguity(level: &LevelTree, step: &PathStep, depth: usize) -> Result<(), PathError> {
        if step.occurrence.is_some() {
            return Ok(());
        }
        let occurrences = level.count_equal(&step.segment);
        if occurrences > 1 {
            debug!(segment = %step.segment, occurrences, depth, "rejecting ambiguous path");
            return Err(PathError::Ambiguous {
                segment: step.segment.clone(),
                occurrences,
                depth,
            });
        }
        Ok(())
    }

    /// Resolves `path` without modifying the index.
    ///
    /// Every segment resolves to its occurrence (the `[n]` qualifier, or
    /// the first one); the final node is returned.
    ///
    /// # Errors
    ///
    /// Any [`parse_path`] error, or [`PathError::Ambiguous`] under the same
    /// rule as [`insert_path`](Self::insert_path).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hnavl::HierarchicalIndex;
    ///
    /// let mut index = HierarchicalIndex::new();
    /// index.insert_path("a/b").unwrap();
    /// index.insert_path("a/b").unwrap();
    /// index.insert_path("a/b/[1]/c").unwrap();
    ///
    /// assert!(index.find_path("a/b/[1]/c").unwrap().is_some());
    /// assert!(index.find_path("a/b/[0]/c").unwrap().is_none());
    /// assert!(index.find_path("a/b/c").is_err());
    /// ```
    pub fn find_path(&self, path: &str) -> Result<Option<&Node>, PathError> {
        let steps = parse_path(path, &self.syntax)?;
        let final_depth = steps.len() - 1;

        let mut level = Some(&self.root);
        let mut found = None;
        for (depth, step) in steps.iter().enumerate() {
            let Some(current) = level else {
                return Ok(None);
            };
            if depth != final_depth {
                Self::check_ambiguity(current, step, depth)?;
            }
            let Some(node) = step
                .target()
                .and_then(|target| current.occurrence(&step.segment, target))
                .and_then(|id| current.node(id))
            else {
                return Ok(None);
            };
            found = Some(node);
            level = node.child();
        }
        Ok(found)
    }

    /// Returns `true` if [`find_path`](Self::find_path) resolves a node.
    ///
    /// # Errors
    ///
    /// Same as [`find_path`](Self::find_path).
    pub fn contains_path(&self, path: &str) -> Result<bool, PathError> {
        self.find_path(path).map(|node| node.is_some())
    }

    /// Positional access: each entry of `positions` is an in-order index
    /// into the next level. `node_at(&[0, 2])` is the third node under the
    /// first root node.
    ///
    /// Returns `None` for an empty slice or any out-of-range position.
    #[must_use]
    pub fn node_at(&self, positions: &[usize]) -> Option<&Node> {
        let (&first, rest) = positions.split_first()?;
        rest.iter().try_fold(self.root.select(first)?, |node, &position| {
            node.child()?.select(position)
        })
    }

    /// Checks the structural invariants of every level.
    ///
    /// # Errors
    ///
    /// The first violation found; violations below the root level are
    /// wrapped in [`InvariantViolation::Nested`] with the owning path.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.root.validate()?;
        for entry in self.entries() {
            if let Some(child) = entry.node.child() {
                child
                    .validate()
                    .map_err(|violation| InvariantViolation::Nested {
                        path: entry.path.clone(),
                        source: Box::new(violation),
                    })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for HierarchicalIndex {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_list()
            .entries(self.entries().iter().map(|entry| &entry.path))
            .finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for HierarchicalIndex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::Serialize;

        self.root.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for HierarchicalIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::Deserialize;

        LevelTree::deserialize(deserializer).map(|root| Self {
            root,
            syntax: PathSyntax::default(),
        })
    }
}
