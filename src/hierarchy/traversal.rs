//! Depth-first, in-order traversal of the whole hierarchy.

use super::index::HierarchicalIndex;
use crate::level::{LevelTree, Node, NodeId};

/// One visited node of [`HierarchicalIndex::entries`].
#[derive(Debug, Clone)]
pub struct Entry<'a> {
    /// The visited node.
    pub node: &'a Node,
    /// 0-based hierarchy level.
    pub depth: usize,
    /// Segments from the root level down to this node, joined by the
    /// separator.
    pub path: String,
    /// `true` if no later sibling follows at this level.
    pub is_last: bool,
    /// For every ancestor level, `true` while that ancestor still has
    /// later siblings (a connector drawer continues a vertical line there).
    pub guides: Vec<bool>,
}

struct Frame<'p> {
    depth: usize,
    parent_path: &'p str,
    guides: &'p [bool],
    separator: char,
}

impl HierarchicalIndex {
    /// Returns every node in traversal order: in-order within a level, and
    /// each node's nested level right after the node itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hnavl::HierarchicalIndex;
    ///
    /// let mut index = HierarchicalIndex::new();
    /// index.insert_paths(["b/y", "a", "b/x"]).unwrap();
    ///
    /// let paths: Vec<String> = index.entries().into_iter().map(|entry| entry.path).collect();
    /// assert_eq!(paths, vec!["a", "b", "b/x", "b/y"]);
    /// ```
    #[must_use]
    pub fn entries(&self) -> Vec<Entry<'_>> {
        let mut entries = Vec::with_capacity(self.len());
        let frame = Frame {
            depth: 0,
            parent_path: "",
            guides: &[],
            separator: self.syntax().separator,
        };
        collect_subtree(self.root(), self.root().root_id(), true, &frame, &mut entries);
        entries
    }
}

/// `subtree_is_last` is set when nothing at this level follows `subtree`.
fn collect_subtree<'a>(
    level: &'a LevelTree,
    subtree: Option<NodeId>,
    subtree_is_last: bool,
    frame: &Frame<'_>,
    entries: &mut Vec<Entry<'a>>,
) {
    let Some(id) = subtree else {
        return;
    };
    let node = &level[id];

    collect_subtree(level, node.left(), false, frame, entries);

    let is_last = subtree_is_last && node.right().is_none();
    let path = if frame.parent_path.is_empty() {
        node.key().to_string()
    } else {
        format!("{}{}{}", frame.parent_path, frame.separator, node.key())
    };

    entries.push(Entry {
        node,
        depth: frame.depth,
        path: path.clone(),
        is_last,
        guides: frame.guides.to_vec(),
    });

    if let Some(child) = node.child()
        && !child.is_empty()
    {
        let mut guides = frame.guides.to_vec();
        guides.push(!is_last);
        let nested = Frame {
            depth: frame.depth + 1,
            parent_path: &path,
            guides: &guides,
            separator: frame.separator,
        };
        collect_subtree(child, child.root_id(), true, &nested, entries);
    }

    collect_subtree(level, node.right(), subtree_is_last, frame, entries);
}
