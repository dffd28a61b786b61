//! Diff result structures.

use serde::{Deserialize, Serialize};

/// Operation counts for a word diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSummary {
    /// Tokens in the old input after region collapsing
    pub old_tokens: usize,
    /// Tokens in the new input after region collapsing
    pub new_tokens: usize,
    pub equal: usize,
    pub inserted: usize,
    pub deleted: usize,
    pub replaced: usize,
}

impl WordSummary {
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.inserted + self.deleted + self.replaced > 0
    }
}

/// Item counts for a list diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    pub old_items: usize,
    pub new_items: usize,
    /// Items paired by the similarity matcher
    pub unchanged: usize,
    pub added: usize,
    pub deleted: usize,
    /// Old items replaced as part of a changed run
    pub changed: usize,
}

impl ListSummary {
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.added + self.deleted + self.changed > 0
    }
}

/// Summary statistics for either diff mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DiffSummary {
    Words(WordSummary),
    List(ListSummary),
}

impl DiffSummary {
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        match self {
            Self::Words(summary) => summary.has_changes(),
            Self::List(summary) => summary.has_changes(),
        }
    }
}

/// Rendered diff markup together with its summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct DiffReport {
    /// Annotated HTML
    pub html: String,
    /// Summary statistics
    pub summary: DiffSummary,
}

impl DiffReport {
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.summary.has_changes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_summary_changes() {
        let summary = WordSummary {
            equal: 3,
            ..WordSummary::default()
        };
        assert!(!summary.has_changes());

        let summary = WordSummary {
            replaced: 1,
            ..summary
        };
        assert!(summary.has_changes());
    }

    #[test]
    fn test_summary_serializes_with_mode_tag() {
        let report = DiffReport {
            html: "<ul></ul>".to_string(),
            summary: DiffSummary::List(ListSummary {
                added: 1,
                ..ListSummary::default()
            }),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["mode"], "list");
        assert_eq!(json["summary"]["added"], 1);
        assert!(report.has_changes());
    }
}
