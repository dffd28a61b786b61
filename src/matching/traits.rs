//! Trait definitions for sequence matching strategies.
//!
//! The aligner is generic over the equality predicate: word-level diffs use
//! exact comparison, list diffs plug in [`ListItemMatcher`](super::ListItemMatcher).

/// Why two items were considered the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum MatchReason {
    /// Byte-identical strings
    Exact,
    /// Tag-stripped text reached the similarity threshold
    StrippedSimilarity,
    /// Raw markup reached the similarity threshold
    RawSimilarity,
    /// One item is the other with a prefix or suffix added
    Containment,
    /// Common prefix and suffix cover enough of the shorter item
    CommonEnds,
}

impl MatchReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::StrippedSimilarity => "stripped-similarity",
            Self::RawSimilarity => "raw-similarity",
            Self::Containment => "containment",
            Self::CommonEnds => "common-ends",
        }
    }
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equality predicate used by the LCS core.
///
/// # Example
///
/// ```
/// use html_diff_tools::matching::{ExactMatch, MatchStrategy};
///
/// assert!(ExactMatch.is_match("same", "same"));
/// assert!(!ExactMatch.is_match("same", "Same"));
///
/// let case_insensitive = |a: &str, b: &str| a.eq_ignore_ascii_case(b);
/// assert!(case_insensitive.is_match("same", "Same"));
/// ```
pub trait MatchStrategy {
    /// Whether `a` and `b` count as the same item.
    fn is_match(&self, a: &str, b: &str) -> bool {
        self.explain(a, b).is_some()
    }

    /// The reason `a` and `b` match, or `None`.
    fn explain(&self, a: &str, b: &str) -> Option<MatchReason>;

    /// Short strategy name for logging.
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Byte-for-byte equality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactMatch;

impl MatchStrategy for ExactMatch {
    fn explain(&self, a: &str, b: &str) -> Option<MatchReason> {
        (a == b).then_some(MatchReason::Exact)
    }

    fn name(&self) -> &'static str {
        "exact"
    }
}

impl<F> MatchStrategy for F
where
    F: Fn(&str, &str) -> bool,
{
    fn is_match(&self, a: &str, b: &str) -> bool {
        self(a, b)
    }

    fn explain(&self, a: &str, b: &str) -> Option<MatchReason> {
        self(a, b).then_some(MatchReason::Exact)
    }
}
