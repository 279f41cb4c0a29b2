//! Connector-drawing dumps of the hierarchy.
//!
//! ```text
//! ├── bar
//! │   ├── foo
//! │   │   └── apple
//! │   └── foo
//! │       └── orange
//! └── par
//! ```

use std::fmt;

use super::index::HierarchicalIndex;
use super::traversal::Entry;
use crate::config::{Label, RenderOptions};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const GUIDE: &str = "│   ";
const BLANK: &str = "    ";

fn render_line(entry: &Entry<'_>, options: &RenderOptions) -> String {
    let mut line: String = entry
        .guides
        .iter()
        .map(|&open| if open { GUIDE } else { BLANK })
        .collect();
    line.push_str(if entry.is_last { LAST_BRANCH } else { BRANCH });
    line.push_str(match options.label {
        Label::Key => entry.node.key(),
        Label::FullPath => entry.path.as_str(),
    });
    if options.show_metadata {
        line.push_str(&format!(
            " (size={}, height={})",
            entry.node.size(),
            entry.node.height()
        ));
    }
    line.push('\n');
    line
}

impl HierarchicalIndex {
    /// Renders the hierarchy, one line per node in traversal order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hnavl::{HierarchicalIndex, Label, RenderOptions};
    ///
    /// let mut index = HierarchicalIndex::new();
    /// index.insert_paths(["bar/foo", "par"]).unwrap();
    ///
    /// let options = RenderOptions::new().with_label(Label::FullPath);
    /// assert_eq!(index.render(&options), "├── bar\n│   └── bar/foo\n└── par\n");
    /// ```
    #[must_use]
    pub fn render(&self, options: &RenderOptions) -> String {
        self.entries()
            .iter()
            .map(|entry| render_line(entry, options))
            .collect()
    }
}

impl fmt::Display for HierarchicalIndex {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = RenderOptions::default();
        for entry in self.entries() {
            formatter.write_str(&render_line(&entry, &options))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_metadata_suffix() {
        let mut index = HierarchicalIndex::new();
        index.insert_paths(["a", "b", "c"]).unwrap();
        let rendered = index.render(&RenderOptions::new().with_metadata(true));
        assert_eq!(
            rendered,
            "├── a (size=1, height=1)\n\
             ├── b (size=3, height=2)\n\
             └── c (size=1, height=1)\n"
        );
    }

    #[rstest]
    fn test_last_node_with_children_uses_blank_guide() {
        let mut index = HierarchicalIndex::new();
        index.insert_paths(["a/x", "a/y/z"]).unwrap();
        assert_eq!(
            index.to_string(),
            "└── a\n    ├── x\n    └── y\n        └── z\n"
        );
    }

    #[rstest]
    fn test_empty_index_renders_nothing() {
        assert_eq!(HierarchicalIndex::new().to_string(), "");
    }
}
