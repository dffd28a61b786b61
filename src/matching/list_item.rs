//! Fuzzy equality for list items.
//!
//! Two list items are "the same item" when their text is similar enough, or
//! when one looks like an edited version of the other: a long shared prefix
//! and suffix around a small change.

use super::config::ListMatchConfig;
use super::string_similarity::{
    common_prefix_len, common_suffix_len, similar_text_percent, strip_tags,
};
use super::traits::{MatchReason, MatchStrategy};

/// Similarity predicate used to align list items.
#[derive(Debug, Clone, Default)]
pub struct ListItemMatcher {
    config: ListMatchConfig,
}

impl ListItemMatcher {
    #[must_use]
    pub const fn new(config: ListMatchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ListMatchConfig {
        &self.config
    }

    fn common_ends(
        &self,
        a: &str,
        b: &str,
        a_stripped: &str,
        b_stripped: &str,
    ) -> Option<MatchReason> {
        let (mut a_clean, mut b_clean) = (a_stripped.trim(), b_stripped.trim());
        if a_clean.is_empty() || b_clean.is_empty() {
            a_clean = a;
            b_clean = b;
        }
        if a_clean.is_empty() || b_clean.is_empty() {
            return None;
        }

        let prefix = common_prefix_len(a_clean, b_clean);
        let suffix = common_suffix_len(a_clean, b_clean);

        let len = a_clean.chars().count().min(b_clean.chars().count());
        let remaining = len as i64 - (prefix + suffix) as i64;
        let longest_raw = a.chars().count().max(b.chars().count());
        let length_ratio = len as f64 / longest_raw as f64;

        if length_ratio <= self.config.length_ratio_threshold {
            return None;
        }
        if remaining == 0 {
            return Some(MatchReason::Containment);
        }

        let common_ratio = (prefix + suffix) as f64 / len as f64;
        (common_ratio > self.config.common_text_ratio_threshold).then_some(MatchReason::CommonEnds)
    }
}

impl MatchStrategy for ListItemMatcher {
    fn explain(&self, a: &str, b: &str) -> Option<MatchReason> {
        let a_stripped = strip_tags(a);
        let b_stripped = strip_tags(b);

        let reason = if similar_text_percent(&a_stripped, &b_stripped)
            >= self.config.similarity_threshold
        {
            Some(MatchReason::StrippedSimilarity)
        } else if similar_text_percent(a, b) >= self.config.similarity_threshold {
            Some(MatchReason::RawSimilarity)
        } else {
            self.common_ends(a, b, &a_stripped, &b_stripped)
        };

        tracing::trace!(
            matched = reason.is_some(),
            reason = reason.map_or("none", |r| r.as_str()),
            "Compared list items"
        );
        reason
    }

    fn name(&self) -> &'static str {
        "list-item"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> ListItemMatcher {
        ListItemMatcher::default()
    }

    #[test]
    fn test_identical_items_match() {
        assert_eq!(
            matcher().explain("Apples", "Apples"),
            Some(MatchReason::StrippedSimilarity)
        );
    }

    #[test]
    fn test_small_edit_matches() {
        assert!(matcher().is_match("Install the package", "Install the packages"));
    }

    #[test]
    fn test_unrelated_items_do_not_match() {
        assert!(!matcher().is_match("Apples", "Zebra crossing"));
    }

    #[test]
    fn test_markup_only_change_matches_on_stripped_text() {
        assert_eq!(
            matcher().explain("<b>Bananas</b>", "<i>Bananas</i>"),
            Some(MatchReason::StrippedSimilarity)
        );
    }

    #[test]
    fn test_containment_match() {
        // Too short to be similar, but the shorter item is the longer one's prefix.
        let reason = matcher().explain("Step 1", "Step 1 and then a lot more...");
        assert_eq!(reason, Some(MatchReason::Containment));
    }

    #[test]
    fn test_common_ends_match() {
        let a = "The quick brown fox jumps over the lazy dog";
        let b = "The quick red fox, after much deliberation, jumps over the lazy dog";
        let strict = ListItemMatcher::new(ListMatchConfig::with_threshold(100.0));
        assert_eq!(strict.explain(a, b), Some(MatchReason::CommonEnds));
    }

    #[test]
    fn test_empty_items_do_not_match_by_ends() {
        let strict = ListItemMatcher::new(ListMatchConfig::with_threshold(100.0));
        assert!(!strict.is_match("", "anything"));
    }
}
