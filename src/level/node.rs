use std::fmt;

use super::LevelTree;

/// Stable handle to a [`Node`] inside the [`LevelTree`] that created it.
///
/// Nodes are never removed, so a handle stays valid for the lifetime of its
/// level. Handles are meaningless for any other level.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeId(pub(super) usize);

impl NodeId {
    /// Position of the node in its level's allocation order.
    ///
    /// This is the insertion sequence number, not the in-order rank.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One entry at one hierarchy level.
#[derive(Clone)]
pub struct Node {
    pub(super) key: String,
    pub(super) left: Option<NodeId>,
    pub(super) right: Option<NodeId>,
    pub(super) height: usize,
    pub(super) size: usize,
    pub(super) child: Option<Box<LevelTree>>,
}

impl Node {
    pub(super) const fn leaf(key: String) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 1,
            size: 1,
            child: None,
        }
    }

    /// The segment stored in this node.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Height of the subtree rooted here (a leaf has height 1).
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of nodes in the subtree rooted here, at this level only.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The nested level, if any path continues past this node.
    #[inline]
    #[must_use]
    pub fn child(&self) -> Option<&LevelTree> {
        self.child.as_deref()
    }

    /// Mutable access to the nested level.
    #[inline]
    pub fn child_mut(&mut self) -> Option<&mut LevelTree> {
        self.child.as_deref_mut()
    }

    /// Returns `true` if a nested level has been created under this node.
    #[inline]
    #[must_use]
    pub const fn has_child(&self) -> bool {
        self.child.is_some()
    }

    /// Returns the nested level, creating an empty one first if needed.
    pub fn child_or_insert(&mut self) -> &mut LevelTree {
        self.child.get_or_insert_with(Box::default)
    }

    pub(crate) const fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub(crate) const fn right(&self) -> Option<NodeId> {
        self.right
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Node")
            .field("key", &self.key)
            .field("height", &self.height)
            .field("size", &self.size)
            .field("child", &self.child)
            .finish()
    }
}
