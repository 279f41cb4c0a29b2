//! Error types.
//!
//! Lookups that simply find nothing (`rank`, `select`, `find_path`, ...)
//! return `Option`; the types here describe real failures.

use thiserror::Error;

/// Errors raised while parsing or resolving a hierarchical path.
///
/// All of them are detected before the index is structurally modified.
///
/// # Examples
///
/// ```rust
/// use hnavl::PathError;
///
/// let error = PathError::Ambiguous {
///     segment: "foo".to_string(),
///     occurrences: 2,
///     depth: 1,
/// };
/// assert_eq!(
///     error.to_string(),
///     "ambiguous path: 2 occurrences of `foo` at depth 1, specify [n] to choose"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path contains no segments once leading and trailing separators
    /// are stripped.
    #[error("path is empty")]
    EmptyPath,

    /// Two separators follow each other inside the path.
    #[error("empty segment at position {position}")]
    EmptySegment {
        /// 0-based token position.
        position: usize,
    },

    /// A `[...]` token that does not hold a decimal integer.
    #[error("invalid index token `{token}` at position {position}")]
    InvalidIndexToken {
        /// The offending token.
        token: String,
        /// 0-based token position.
        position: usize,
    },

    /// A well-formed `[n]` token with no segment for it to qualify.
    #[error("index token `{token}` at position {position} does not follow a segment")]
    UnexpectedIndexToken {
        /// The offending token.
        token: String,
        /// 0-based token position.
        position: usize,
    },

    /// A non-final segment has several equal-keyed siblings and no `[n]`
    /// qualifier says which one to descend through.
    #[error(
        "ambiguous path: {occurrences} occurrences of `{segment}` at depth {depth}, specify [n] to choose"
    )]
    Ambiguous {
        /// The ambiguous segment.
        segment: String,
        /// Number of nodes holding `segment` at that level.
        occurrences: usize,
        /// 0-based hierarchy level.
        depth: usize,
    },
}

/// A broken structural invariant reported by
/// [`LevelTree::validate`](crate::LevelTree::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Child heights differ by more than one.
    #[error("node `{key}` is unbalanced: left height {left_height}, right height {right_height}")]
    Unbalanced {
        /// Key of the offending node.
        key: String,
        /// Height of the left subtree.
        left_height: usize,
        /// Height of the right subtree.
        right_height: usize,
    },

    /// Stored height disagrees with the children.
    #[error("node `{key}` records height {recorded}, expected {expected}")]
    HeightMismatch {
        /// Key of the offending node.
        key: String,
        /// Height stored in the node.
        recorded: usize,
        /// Height computed from the children.
        expected: usize,
    },

    /// Stored subtree size disagrees with the children.
    #[error("node `{key}` records size {recorded}, expected {expected}")]
    SizeMismatch {
        /// Key of the offending node.
        key: String,
        /// Size stored in the node.
        recorded: usize,
        /// Size computed from the children.
        expected: usize,
    },

    /// In-order traversal produced a decreasing pair of keys.
    #[error("keys out of order at position {position}: `{previous}` > `{next}`")]
    OutOfOrder {
        /// In-order position of `next`.
        position: usize,
        /// Key before the violation.
        previous: String,
        /// Key at the violation.
        next: String,
    },

    /// A violation inside a nested level.
    #[error("in level under `{path}`: {source}")]
    Nested {
        /// Path of the node owning the broken level.
        path: String,
        /// The underlying violation.
        #[source]
        source: Box<InvariantViolation>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PathError::EmptyPath, "path is empty")]
    #[case(PathError::EmptySegment { position: 2 }, "empty segment at position 2")]
    #[case(
        PathError::InvalidIndexToken { token: "[x]".to_string(), position: 1 },
        "invalid index token `[x]` at position 1"
    )]
    #[case(
        PathError::UnexpectedIndexToken { token: "[0]".to_string(), position: 0 },
        "index token `[0]` at position 0 does not follow a segment"
    )]
    fn test_path_error_display(#[case] error: PathError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn test_nested_violation_exposes_source() {
        use std::error::Error;

        let violation = InvariantViolation::Nested {
            path: "bar".to_string(),
            source: Box::new(InvariantViolation::SizeMismatch {
                key: "foo".to_string(),
                recorded: 3,
                expected: 2,
            }),
        };
        assert_eq!(
            violation.to_string(),
            "in level under `bar`: node `foo` records size 3, expected 2"
        );
        assert!(violation.source().is_some());
    }
}
