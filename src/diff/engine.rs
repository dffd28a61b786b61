//! Diff engine facade.

use super::list::ListDiff;
use super::result::{DiffReport, DiffSummary};
use super::words::analyze_words;
use crate::config::DiffConfig;
use crate::error::Result;

/// Runs word and list diffs with one owned configuration.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    config: DiffConfig,
}

impl DiffEngine {
    /// Create a new diff engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the engine's configuration
    #[must_use]
    pub fn with_config(mut self, config: DiffConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Word-level diff. See [`diff_words`](super::diff_words).
    #[must_use]
    pub fn diff_words(&self, old: &str, new: &str) -> String {
        super::diff_words(old, new, &self.config)
    }

    /// List diff. See [`diff_list`](super::diff_list).
    pub fn diff_list(&self, old: &str, new: &str) -> Result<String> {
        super::diff_list(old, new, &self.config)
    }

    /// Word-level diff with operation counts.
    pub fn words_report(&self, old: &str, new: &str) -> DiffReport {
        let alignment = analyze_words(old, new, &self.config);
        let summary = DiffSummary::Words(alignment.summary());
        let html = if old == new {
            new.to_string()
        } else {
            alignment.render(&self.config)
        };
        DiffReport { html, summary }
    }

    /// List diff with item counts.
    pub fn list_report(&self, old: &str, new: &str) -> Result<DiffReport> {
        ListDiff::new(&self.config).report(old, new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_uses_its_config() {
        let engine = DiffEngine::new().with_config(DiffConfig::builder().space_matching(true).build());
        assert!(engine.config().space_matching);
        assert_eq!(engine.diff_words("a b", "a  b"), "a b");
    }

    #[test]
    fn test_words_report_matches_diff_words() {
        let engine = DiffEngine::new();
        let (old, new) = ("<p>The cat sat.</p>", "<p>The dog sat.</p>");
        let report = engine.words_report(old, new);
        assert_eq!(report.html, engine.diff_words(old, new));
        assert!(report.has_changes());
    }

    #[test]
    fn test_words_report_identical() {
        let report = DiffEngine::new().words_report("<p>x</p>", "<p>x</p>");
        assert_eq!(report.html, "<p>x</p>");
        assert!(!report.has_changes());
    }

    #[test]
    fn test_list_report_error() {
        assert!(DiffEngine::new().list_report("", "").is_err());
    }
}
