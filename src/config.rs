//! Configuration for path parsing and rendering.
//!
//! Both configuration types are plain values with sensible defaults and
//! `const` builders:
//!
//! ```rust
//! use hnavl::config::{IndexTokenPolicy, Label, PathSyntax, RenderOptions};
//!
//! let syntax = PathSyntax::new()
//!     .with_separator('.')
//!     .with_index_tokens(IndexTokenPolicy::Literal);
//! assert_eq!(syntax.separator, '.');
//!
//! let options = RenderOptions::new().with_label(Label::FullPath).with_metadata(true);
//! assert!(options.show_metadata);
//! ```

/// Default segment separator.
pub const DEFAULT_SEPARATOR: char = '/';

/// How malformed or misplaced `[...]` tokens are treated while parsing a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexTokenPolicy {
    /// Fail the whole path with a [`PathError`](crate::PathError).
    #[default]
    Reject,
    /// Treat the token as an ordinary segment named by its literal text.
    Literal,
}

/// Textual syntax of hierarchical paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathSyntax {
    /// Character separating path segments.
    pub separator: char,
    /// Handling of `[...]` tokens that are not valid occurrence qualifiers.
    pub index_tokens: IndexTokenPolicy,
}

impl PathSyntax {
    /// Creates the default syntax: `/` separated, strict index tokens.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            index_tokens: IndexTokenPolicy::Reject,
        }
    }

    /// Returns a copy using `separator` between segments.
    #[inline]
    #[must_use]
    pub const fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Returns a copy using the given index token policy.
    #[inline]
    #[must_use]
    pub const fn with_index_tokens(mut self, index_tokens: IndexTokenPolicy) -> Self {
        self.index_tokens = index_tokens;
        self
    }
}

impl Default for PathSyntax {
    fn default() -> Self {
        Self::new()
    }
}

/// What each rendered line shows for its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Label {
    /// The node's own segment.
    #[default]
    Key,
    /// The full path from the root level down to the node.
    FullPath,
}

/// Options for [`HierarchicalIndex::render`](crate::HierarchicalIndex::render).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Line label.
    pub label: Label,
    /// Append ` (size=S, height=H)` to every line.
    pub show_metadata: bool,
}

impl RenderOptions {
    /// Creates options rendering bare keys without metadata.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            label: Label::Key,
            show_metadata: false,
        }
    }

    /// Returns a copy using `label` for every line.
    #[inline]
    #[must_use]
    pub const fn with_label(mut self, label: Label) -> Self {
        self.label = label;
        self
    }

    /// Returns a copy with metadata display switched on or off.
    #[inline]
    #[must_use]
    pub const fn with_metadata(mut self, show_metadata: bool) -> Self {
        self.show_metadata = show_metadata;
        self
    }
}
