//! List-item matching configuration.

use crate::config::{
    DEFAULT_COMMON_TEXT_RATIO_THRESHOLD, DEFAULT_LENGTH_RATIO_THRESHOLD, DEFAULT_MATCH_THRESHOLD,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Thresholds deciding whether two list items are "the same item, edited".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ListMatchConfig {
    /// Minimum `similar_text` percentage (0 - 100) for a direct match
    pub similarity_threshold: f64,
    /// Minimum ratio of the shorter item to the longer one for prefix/suffix matches
    pub length_ratio_threshold: f64,
    /// Minimum share of the shorter item covered by the common prefix and suffix
    pub common_text_ratio_threshold: f64,
}

impl Default for ListMatchConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_MATCH_THRESHOLD,
            length_ratio_threshold: DEFAULT_LENGTH_RATIO_THRESHOLD,
            common_text_ratio_threshold: DEFAULT_COMMON_TEXT_RATIO_THRESHOLD,
        }
    }
}

impl ListMatchConfig {
    /// Config with a custom similarity threshold and default ratios.
    #[must_use]
    pub fn with_threshold(similarity_threshold: f64) -> Self {
        Self {
            similarity_threshold,
            ..Self::default()
        }
    }
}
