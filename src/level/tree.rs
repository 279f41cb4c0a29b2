//! Order-statistics AVL tree for a single hierarchy level.
//!
//! Nodes live in a per-level arena and link to each other through
//! [`NodeId`] handles. The arena is append-only, which keeps every handle
//! returned by [`LevelTree::insert`] valid. Each node appears as a child
//! link at most once, so the links still form a plain ownership tree.
//!
//! # Invariants
//!
//! After every insertion, for every node:
//! 1. `|height(left) - height(right)| <= 1`
//! 2. `height = 1 + max(height(left), height(right))`
//! 3. `size = 1 + size(left) + size(right)`
//! 4. In-order keys are non-decreasing, equal keys in insertion order

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;

use super::iter::LevelTreeIterator;
use super::node::{Node, NodeId};
use crate::error::InvariantViolation;

/// An order-statistics AVL tree over string keys at one hierarchy level.
///
/// # Time Complexity
///
/// | Operation     | Complexity |
/// |---------------|------------|
/// | `insert`      | O(log N)   |
/// | `select`      | O(log N)   |
/// | `rank`        | O(log N)   |
/// | `upper_bound` | O(log N)   |
/// | `count_equal` | O(log N)   |
/// | `len`         | O(1)       |
///
/// # Examples
///
/// ```rust
/// use hnavl::LevelTree;
///
/// let level: LevelTree = ["pear", "apple", "pear", "fig"].into_iter().collect();
/// assert_eq!(level.len(), 4);
/// assert_eq!(level.rank("pear"), Some(2));
/// assert_eq!(level.upper_bound("pear"), 4);
/// assert_eq!(level.count_equal("pear"), 2);
/// assert_eq!(level.rank("kiwi"), None);
/// ```
#[derive(Clone, Default)]
pub struct LevelTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl LevelTree {
    /// Creates a new empty level.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Returns the number of nodes at this level.
    ///
    /// Nested levels are not counted.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.size_of(self.root)
    }

    /// Returns `true` if this level holds no nodes.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree, 0 when empty.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    /// Returns the node behind `id`, or `None` if `id` does not belong to
    /// this level.
    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Mutable variant of [`node`](Self::node).
    ///
    /// Only the node's nested level can be changed through it; keys and
    /// balancing metadata stay private.
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Inserts a new node for `key` and returns its handle.
    ///
    /// A new node is always created, even when `key` is already present;
    /// duplicates go after every existing equal key in in-order position.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hnavl::LevelTree;
    ///
    /// let mut level = LevelTree::new();
    /// let first = level.insert("foo");
    /// let second = level.insert("foo");
    ///
    /// assert_ne!(first, second);
    /// assert_eq!(level.select_id(0), Some(first));
    /// assert_eq!(level.select_id(1), Some(second));
    /// ```
    pub fn insert(&mut self, key: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::leaf(key.into()));
        let root = self.root;
        self.root = Some(self.insert_into(root, id));
        id
    }

    /// Links the detached node `fresh` into `subtree` and returns the
    /// rebalanced subtree root.
    fn insert_into(&mut self, subtree: Option<NodeId>, fresh: NodeId) -> NodeId {
        let Some(current) = subtree else {
            return fresh;
        };
        if self.nodes[fresh.0].key < self.nodes[current.0].key {
            let left = self.nodes[current.0].left;
            let new_left = self.insert_into(left, fresh);
            self.nodes[current.0].left = Some(new_left);
        } else {
            // Equal keys descend right, behind the existing duplicates.
            let right = self.nodes[current.0].right;
            let new_right = self.insert_into(right, fresh);
            self.nodes[current.0].right = Some(new_right);
        }
        self.rebalance(current)
    }

    /// Returns the node at 0-based in-order position `index`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn select(&self, index: usize) -> Option<&Node> {
        self.select_id(index).map(|id| &self.nodes[id.0])
    }

    /// Handle form of [`select`](Self::select).
    #[must_use]
    pub fn select_id(&self, index: usize) -> Option<NodeId> {
        let mut remaining = index;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            let left_size = self.size_of(node.left);
            match remaining.cmp(&left_size) {
                Ordering::Equal => return Some(id),
                Ordering::Less => current = node.left,
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    current = node.right;
                }
            }
        }
        None
    }

    /// Returns the in-order position of the first occurrence of `key`.
    ///
    /// Rotations can lift a later duplicate above an earlier one, so a match
    /// only records a candidate and the search continues left.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn rank(&self, key: &str) -> Option<usize> {
        let mut rank = 0;
        let mut found = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            match key.cmp(node.key.as_str()) {
                Ordering::Less => current = node.left,
                Ordering::Greater => {
                    rank += self.size_of(node.left) + 1;
                    current = node.right;
                }
                Ordering::Equal => {
                    found = Some(rank + self.size_of(node.left));
                    current = node.left;
                }
            }
        }
        found
    }

    /// Returns the number of nodes whose key is `<= key`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    #[must_use]
    pub fn upper_bound(&self, key: &str) -> usize {
        let mut count = 0;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            if key >= node.key.as_str() {
                count += self.size_of(node.left) + 1;
                current = node.right;
            } else {
                current = node.left;
            }
        }
        count
    }

    /// Returns how many nodes at this level hold exactly `key`.
    #[must_use]
    pub fn count_equal(&self, key: &str) -> usize {
        self.rank(key).map_or(0, |rank| self.upper_bound(key) - rank)
    }

    /// Returns the leftmost node holding `key`.
    #[must_use]
    pub fn find_first(&self, key: &str) -> Option<NodeId> {
        self.occurrence(key, 0)
    }

    /// Returns the `occurrence`-th (0-based) node holding `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hnavl::LevelTree;
    ///
    /// let mut level = LevelTree::new();
    /// level.insert("apple");
    /// let first = level.insert("foo");
    /// let second = level.insert("foo");
    /// level.insert("zebra");
    ///
    /// assert_eq!(level.occurrence("foo", 0), Some(first));
    /// assert_eq!(level.occurrence("foo", 1), Some(second));
    /// assert_eq!(level.occurrence("foo", 2), None);
    /// ```
    #[must_use]
    pub fn occurrence(&self, key: &str, occurrence: usize) -> Option<NodeId> {
        self.rank(key)
            .and_then(|rank| rank.checked_add(occurrence))
            .and_then(|position| self.select_id(position))
            .filter(|id| self.nodes[id.0].key == key)
    }

    /// Returns an iterator over the nodes in in-order sequence.
    #[must_use]
    pub fn iter(&self) -> LevelTreeIterator<'_> {
        LevelTreeIterator::new(self)
    }

    /// Returns an iterator over the keys in in-order sequence.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(Node::key)
    }

    /// Checks every structural invariant of this level.
    ///
    /// Nested levels are not inspected; see
    /// [`HierarchicalIndex::validate`](crate::HierarchicalIndex::validate).
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.validate_subtree(self.root)?;
        let mut previous: Option<&str> = None;
        for (position, key) in self.keys().enumerate() {
            if let Some(previous) = previous
                && previous > key
            {
                return Err(InvariantViolation::OutOfOrder {
                    position,
                    previous: previous.to_string(),
                    next: key.to_string(),
                });
            }
            previous = Some(key);
        }
        Ok(())
    }

    /// Recomputes height and size bottom-up and compares them with the
    /// stored values. Returns the verified `(height, size)`.
    fn validate_subtree(
        &self,
        subtree: Option<NodeId>,
    ) -> Result<(usize, usize), InvariantViolation> {
        let Some(id) = subtree else {
            return Ok((0, 0));
        };
        let node = &self.nodes[id.0];
        let (left_height, left_size) = self.validate_subtree(node.left)?;
        let (right_height, right_size) = self.validate_subtree(node.right)?;

        if left_height.abs_diff(right_height) > 1 {
            return Err(InvariantViolation::Unbalanced {
                key: node.key.clone(),
                left_height,
                right_height,
            });
        }
        let expected_height = 1 + left_height.max(right_height);
        if node.height != expected_height {
            return Err(InvariantViolation::HeightMismatch {
                key: node.key.clone(),
                recorded: node.height,
                expected: expected_height,
            });
        }
        let expected_size = 1 + left_size + right_size;
        if node.size != expected_size {
            return Err(InvariantViolation::SizeMismatch {
                key: node.key.clone(),
                recorded: node.size,
                expected: expected_size,
            });
        }
        Ok((node.height, node.size))
    }

    pub(crate) const fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn descend(&mut self, id: NodeId) -> &mut Self {
        self.nodes[id.0].child_or_insert()
    }

    // =========================================================================
    // Balancing
    // =========================================================================

    fn height_of(&self, subtree: Option<NodeId>) -> usize {
        subtree.map_or(0, |id| self.nodes[id.0].height)
    }

    fn size_of(&self, subtree: Option<NodeId>) -> usize {
        subtree.map_or(0, |id| self.nodes[id.0].size)
    }

    fn update_metadata(&mut self, id: NodeId) {
        let (left, right) = (self.nodes[id.0].left, self.nodes[id.0].right);
        let height = 1 + self.height_of(left).max(self.height_of(right));
        let size = 1 + self.size_of(left) + self.size_of(right);
        let node = &mut self.nodes[id.0];
        node.height = height;
        node.size = size;
    }

    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        let Some(pivot) = self.nodes[id.0].right else {
            return id;
        };
        self.nodes[id.0].right = self.nodes[pivot.0].left;
        self.nodes[pivot.0].left = Some(id);
        self.update_metadata(id);
        self.update_metadata(pivot);
        pivot
    }

    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        let Some(pivot) = self.nodes[id.0].left else {
            return id;
        };
        self.nodes[id.0].left = self.nodes[pivot.0].right;
        self.nodes[pivot.0].right = Some(id);
        self.update_metadata(id);
        self.update_metadata(pivot);
        pivot
    }

    /// Restores the AVL property at `id` and returns the new subtree root.
    fn rebalance(&mut self, id: NodeId) -> NodeId {
        self.update_metadata(id);
        let (left, right) = (self.nodes[id.0].left, self.nodes[id.0].right);
        let left_height = self.height_of(left);
        let right_height = self.height_of(right);

        if left_height > right_height + 1 {
            if let Some(left) = left
                && self.height_of(self.nodes[left.0].left)
                    < self.height_of(self.nodes[left.0].right)
            {
                let new_left = self.rotate_left(left);
                self.nodes[id.0].left = Some(new_left);
            }
            return self.rotate_right(id);
        }

        if right_height > left_height + 1 {
            if let Some(right) = right
                && self.height_of(self.nodes[right.0].right)
                    < self.height_of(self.nodes[right.0].left)
            {
                let new_right = self.rotate_right(right);
                self.nodes[id.0].right = Some(new_right);
            }
            return self.rotate_left(id);
        }

        id
    }
}

impl Index<NodeId> for LevelTree {
    type Output = Node;

    /// # Panics
    ///
    /// Panics if `id` was not issued by this level.
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl<'a> IntoIterator for &'a LevelTree {
    type Item = &'a Node;
    type IntoIter = LevelTreeIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for LevelTree {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut level = Self::new();
        level.extend(iter);
        level
    }
}

impl<S: Into<String>> Extend<S> for LevelTree {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

/// Two levels are equal when they hold the same in-order key sequence and
/// equal nested levels at every position. Tree shape is not compared.
impl PartialEq for LevelTree {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().zip(other.iter()).all(|(left, right)| {
                left.key() == right.key()
                    && match (left.child(), right.child()) {
                        (Some(left), Some(right)) => left == right,
                        (None, None) => true,
                        (Some(nested), None) | (None, Some(nested)) => nested.is_empty(),
                    }
            })
    }
}

impl Eq for LevelTree {}

impl fmt::Debug for LevelTree {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.keys()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
#[derive(serde::Serialize)]
struct SerializedNode<'a> {
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<&'a LevelTree>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct DeserializedNode {
    key: String,
    #[serde(default)]
    children: Option<LevelTree>,
}

#[cfg(feature = "serde")]
impl serde::Serialize for LevelTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for node in self {
            sequence.serialize_element(&SerializedNode {
                key: node.key(),
                children: node.child().filter(|child| !child.is_empty()),
            })?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LevelTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::Deserialize;

        // Re-inserting in serialized order keeps equal keys in their order.
        let entries = Vec::<DeserializedNode>::deserialize(deserializer)?;
        let mut level = Self::new();
        for entry in entries {
            let id = level.insert(entry.key);
            if let Some(children) = entry.children.filter(|children| !children.is_empty()) {
                level.nodes[id.0].child = Some(Box::new(children));
            }
        }
        Ok(level)
    }
}
