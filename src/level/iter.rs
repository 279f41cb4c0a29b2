use std::iter::FusedIterator;

use super::node::{Node, NodeId};
use super::tree::LevelTree;

/// In-order iterator over the nodes of one [`LevelTree`].
///
/// Holds at most O(log N) pending handles.
pub struct LevelTreeIterator<'a> {
    level: &'a LevelTree,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a> LevelTreeIterator<'a> {
    pub(super) fn new(level: &'a LevelTree) -> Self {
        let mut iterator = Self {
            level,
            stack: Vec::with_capacity(level.height()),
            remaining: level.len(),
        };
        iterator.push_left_spine(level.root_id());
        iterator
    }

    fn push_left_spine(&mut self, mut subtree: Option<NodeId>) {
        while let Some(id) = subtree {
            self.stack.push(id);
            subtree = self.level[id].left();
        }
    }
}

impl<'a> Iterator for LevelTreeIterator<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.level[id];
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LevelTreeIterator<'_> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl FusedIterator for LevelTreeIterator<'_> {}
