//! Path tokenizer.
//!
//! Parsing is a single left-to-right pass over the separator-delimited
//! tokens with two states: expecting a segment, or just after a segment
//! that may still take one `[n]` qualifier.

use crate::config::{IndexTokenPolicy, PathSyntax};
use crate::error::PathError;

/// One hierarchy-descent step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathStep {
    /// The segment key.
    pub segment: String,
    /// Explicit occurrence from a `[n]` qualifier. Negative values never
    /// name an existing node.
    pub occurrence: Option<isize>,
}

impl PathStep {
    /// Creates an unqualified step.
    #[must_use]
    pub fn new(segment: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            occurrence: None,
        }
    }

    /// Creates a step qualified with an explicit occurrence.
    #[must_use]
    pub fn qualified(segment: impl Into<String>, occurrence: isize) -> Self {
        Self {
            segment: segment.into(),
            occurrence: Some(occurrence),
        }
    }

    /// The occurrence to resolve: the qualifier, or 0. `None` for a
    /// negative qualifier, which matches no node.
    #[inline]
    #[must_use]
    pub fn target(&self) -> Option<usize> {
        usize::try_from(self.occurrence.unwrap_or(0)).ok()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectSegment,
    AfterSegment,
}

enum Token<'a> {
    Segment(&'a str),
    Qualifier(isize),
    Malformed,
}

/// Parses an optionally signed decimal integer, saturating at the `isize`
/// bounds. Saturated values lie beyond any level, like the exact ones.
fn parse_occurrence(text: &str) -> Option<isize> {
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let signed = if negative { text } else { digits };
    Some(signed.parse().unwrap_or(if negative { isize::MIN } else { isize::MAX }))
}

fn classify(token: &str) -> Token<'_> {
    if !token.starts_with('[') {
        return Token::Segment(token);
    }
    token
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .and_then(parse_occurrence)
        .map_or(Token::Malformed, Token::Qualifier)
}

/// Parses `path` into descent steps.
///
/// # Errors
///
/// - [`PathError::EmptyPath`] if nothing remains after stripping separators
/// - [`PathError::EmptySegment`] for two adjacent separators
/// - [`PathError::InvalidIndexToken`] / [`PathError::UnexpectedIndexToken`]
///   for `[...]` tokens that cannot qualify a segment, unless the syntax uses
///   [`IndexTokenPolicy::Literal`], in which case they become plain segments
///
/// # Examples
///
/// ```rust
/// use hnavl::{PathStep, PathSyntax, parse_path};
///
/// let steps = parse_path("/bar/foo/[1]/orange/", &PathSyntax::default()).unwrap();
/// assert_eq!(
///     steps,
///     vec![
///         PathStep::new("bar"),
///         PathStep::qualified("foo", 1),
///         PathStep::new("orange"),
///     ]
/// );
/// ```
pub fn parse_path(path: &str, syntax: &PathSyntax) -> Result<Vec<PathStep>, PathError> {
    let trimmed = path.trim_matches(syntax.separator);
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let literal = syntax.index_tokens == IndexTokenPolicy::Literal;
    let mut steps: Vec<PathStep> = Vec::new();
    let mut state = State::ExpectSegment;

    for (position, token) in trimmed.split(syntax.separator).enumerate() {
        if token.is_empty() {
            return Err(PathError::EmptySegment { position });
        }
        let segment = match (state, classify(token)) {
            (_, Token::Segment(segment)) => segment,
            (State::AfterSegment, Token::Qualifier(occurrence)) => {
                if let Some(step) = steps.last_mut() {
                    step.occurrence = Some(occurrence);
                }
                state = State::ExpectSegment;
                continue;
            }
            (_, Token::Qualifier(_) | Token::Malformed) if literal => token,
            (State::ExpectSegment, Token::Qualifier(_)) => {
                return Err(PathError::UnexpectedIndexToken {
                    token: token.to_string(),
                    position,
                });
            }
            (_, Token::Malformed) => {
                return Err(PathError::InvalidIndexToken {
                    token: token.to_string(),
                    position,
                });
            }
        };
        steps.push(PathStep::new(segment));
        state = State::AfterSegment;
    }

    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn strict() -> PathSyntax {
        PathSyntax::default()
    }

    fn literal() -> PathSyntax {
        PathSyntax::default().with_index_tokens(IndexTokenPolicy::Literal)
    }

    #[rstest]
    #[case("bar", vec![PathStep::new("bar")])]
    #[case("///bar//", vec![PathStep::new("bar")])]
    #[case("bar/foo", vec![PathStep::new("bar"), PathStep::new("foo")])]
    #[case("bar/foo/[0]", vec![PathStep::new("bar"), PathStep::qualified("foo", 0)])]
    #[case(
        "bar/[2]/foo/[10]/baz",
        vec![PathStep::qualified("bar", 2), PathStep::qualified("foo", 10), PathStep::new("baz")]
    )]
    fn test_parse_valid_paths(#[case] path: &str, #[case] expected: Vec<PathStep>) {
        assert_eq!(parse_path(path, &strict()), Ok(expected));
    }

    #[rstest]
    #[case("", PathError::EmptyPath)]
    #[case("///", PathError::EmptyPath)]
    #[case("a//b", PathError::EmptySegment { position: 1 })]
    #[case("a/[x]", PathError::InvalidIndexToken { token: "[x]".to_string(), position: 1 })]
    #[case("a/[--1]", PathError::InvalidIndexToken { token: "[--1]".to_string(), position: 1 })]
    #[case("a/[+]", PathError::InvalidIndexToken { token: "[+]".to_string(), position: 1 })]
    #[case("a/[3", PathError::InvalidIndexToken { token: "[3".to_string(), position: 1 })]
    #[case("a/[]", PathError::InvalidIndexToken { token: "[]".to_string(), position: 1 })]
    #[case("[0]/a", PathError::UnexpectedIndexToken { token: "[0]".to_string(), position: 0 })]
    #[case("a/[0]/[1]", PathError::UnexpectedIndexToken { token: "[1]".to_string(), position: 2 })]
    fn test_parse_rejects(#[case] path: &str, #[case] expected: PathError) {
        assert_eq!(parse_path(path, &strict()), Err(expected));
    }

    #[rstest]
    #[case("a/[x]", vec![PathStep::new("a"), PathStep::new("[x]")])]
    #[case("[0]/a", vec![PathStep::new("[0]"), PathStep::new("a")])]
    #[case(
        "a/[0]/[1]/[2]",
        vec![PathStep::qualified("a", 0), PathStep::qualified("[1]", 2)]
    )]
    fn test_parse_literal_policy_keeps_tokens(#[case] path: &str, #[case] expected: Vec<PathStep>) {
        assert_eq!(parse_path(path, &literal()), Ok(expected));
    }

    #[rstest]
    fn test_parse_custom_separator() {
        let syntax = PathSyntax::default().with_separator('.');
        assert_eq!(
            parse_path("a.[1].b", &syntax),
            Ok(vec![PathStep::qualified("a", 1), PathStep::new("b")])
        );
    }

    #[rstest]
    #[case("a/[-1]", PathStep::qualified("a", -1))]
    #[case("a/[+1]", PathStep::qualified("a", 1))]
    #[case("a/[007]", PathStep::qualified("a", 7))]
    #[case("a/[-0]", PathStep::qualified("a", 0))]
    #[case("a/[99999999999999999999999999]", PathStep::qualified("a", isize::MAX))]
    #[case("a/[-99999999999999999999999999]", PathStep::qualified("a", isize::MIN))]
    fn test_parse_signed_and_oversized_qualifiers(
        #[case] path: &str,
        #[case] expected: PathStep,
    ) {
        assert_eq!(parse_path(path, &strict()), Ok(vec![expected.clone()]));
        assert_eq!(parse_path(path, &literal()), Ok(vec![expected]));
    }

    #[rstest]
    fn test_target_defaults_to_first_occurrence() {
        assert_eq!(PathStep::new("a").target(), Some(0));
        assert_eq!(PathStep::qualified("a", 3).target(), Some(3));
        assert_eq!(PathStep::qualified("a", -1).target(), None);
    }
}
