//! Configuration types for html-diff-tools operations.
//!
//! [`DiffConfig`] is the read-only option bag every diff call consumes.
//! [`AppConfig`] layers it with output and behavior settings for the CLI and
//! config files.

use super::defaults::{DEFAULT_ISOLATED_TAGS, DEFAULT_SPECIAL_CASE_CHARS};
use crate::error::{ConfigErrorKind, HtmlDiffError, Result};
use crate::matching::ListMatchConfig;
use crate::pipeline::OutputFormat;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Isolated Tags
// ============================================================================

/// Ordered map of isolated tag names to their placeholder sentinels.
///
/// Tags are diffed as opaque units. Every placeholder belongs to exactly one
/// tag; attempts to share or remap one fail instead of silently merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "IndexMap<String, String>",
    into = "IndexMap<String, String>"
)]
pub struct IsolatedTags {
    tags: IndexMap<String, String>,
}

impl IsolatedTags {
    /// A map with no isolated tags at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tags: IndexMap::new(),
        }
    }

    /// Register `tag` with `placeholder`.
    ///
    /// Re-registering an identical pair is a no-op.
    pub fn insert(&mut self, tag: &str, placeholder: &str) -> Result<()> {
        let tag = tag.trim().to_ascii_lowercase();
        if placeholder.is_empty() {
            return Err(HtmlDiffError::config(
                "adding isolated tag",
                ConfigErrorKind::EmptyPlaceholder { tag },
            ));
        }

        if let Some(existing) = self.tags.get(&tag) {
            if existing == placeholder {
                return Ok(());
            }
            return Err(HtmlDiffError::tag_remapped(tag, existing.clone(), placeholder));
        }

        if let Some(existing_tag) = self.tag_for_placeholder(placeholder) {
            return Err(HtmlDiffError::placeholder_collision(
                tag,
                placeholder,
                existing_tag,
            ));
        }

        self.tags.insert(tag, placeholder.to_string());
        Ok(())
    }

    /// Stop isolating `tag`, returning its placeholder.
    pub fn remove(&mut self, tag: &str) -> Option<String> {
        self.tags.shift_remove(&tag.to_ascii_lowercase())
    }

    #[must_use]
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(&tag.to_ascii_lowercase())
    }

    /// Placeholder registered for `tag`.
    #[must_use]
    pub fn placeholder_for(&self, tag: &str) -> Option<&str> {
        self.tags.get(&tag.to_ascii_lowercase()).map(String::as_str)
    }

    /// Tag that owns `placeholder`.
    #[must_use]
    pub fn tag_for_placeholder(&self, placeholder: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(_, p)| p.as_str() == placeholder)
            .map(|(t, _)| t.as_str())
    }

    /// Whether `token` is exactly one of the configured placeholders.
    #[must_use]
    pub fn is_placeholder(&self, token: &str) -> bool {
        self.tags.values().any(|p| p == token)
    }

    /// Iterate `(tag, placeholder)` pairs in matching order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags.iter().map(|(t, p)| (t.as_str(), p.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for IsolatedTags {
    fn default() -> Self {
        Self {
            tags: DEFAULT_ISOLATED_TAGS
                .iter()
                .map(|(tag, placeholder)| ((*tag).to_string(), (*placeholder).to_string()))
                .collect(),
        }
    }
}

impl TryFrom<IndexMap<String, String>> for IsolatedTags {
    type Error = HtmlDiffError;

    fn try_from(map: IndexMap<String, String>) -> Result<Self> {
        let mut tags = Self::empty();
        for (tag, placeholder) in &map {
            tags.insert(tag, placeholder)?;
        }
        Ok(tags)
    }
}

impl From<IsolatedTags> for IndexMap<String, String> {
    fn from(tags: IsolatedTags) -> Self {
        tags.tags
    }
}

impl JsonSchema for IsolatedTags {
    fn schema_name() -> String {
        "IsolatedTags".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <std::collections::BTreeMap<String, String>>::json_schema(gen)
    }
}

// ============================================================================
// Diff Configuration
// ============================================================================

/// Options consumed by the word and list diff engines.
///
/// Read-only for the duration of a diff call; recursive sub-diffs share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffConfig {
    /// Punctuation that binds to surrounding letters and digits when splitting words
    pub special_case_chars: Vec<char>,
    /// Tags diffed as opaque units, mapped to their placeholder tokens
    pub isolated_tags: IsolatedTags,
    /// Keep newlines and whitespace runs instead of collapsing them
    pub keep_new_lines: bool,
    /// Avoid anchoring alignment on whitespace-only matches
    pub group_diffs: bool,
    /// Mark whitespace-only insertions and deletions instead of dropping them
    pub space_matching: bool,
    /// List item similarity thresholds
    pub list_matching: ListMatchConfig,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            special_case_chars: DEFAULT_SPECIAL_CASE_CHARS.to_vec(),
            isolated_tags: IsolatedTags::default(),
            keep_new_lines: false,
            group_diffs: true,
            space_matching: false,
            list_matching: ListMatchConfig::default(),
        }
    }
}

impl DiffConfig {
    /// Create a new `DiffConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `DiffConfig` builder.
    pub fn builder() -> DiffConfigBuilder {
        DiffConfigBuilder::default()
    }
}

/// Builder for constructing `DiffConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct DiffConfigBuilder {
    config: DiffConfig,
}

impl DiffConfigBuilder {
    /// Replace the special-case punctuation set.
    pub fn special_case_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.config.special_case_chars = chars.into_iter().collect();
        self
    }

    /// Add one special-case character.
    pub fn add_special_case_char(mut self, c: char) -> Self {
        if !self.config.special_case_chars.contains(&c) {
            self.config.special_case_chars.push(c);
        }
        self
    }

    /// Remove one special-case character.
    pub fn remove_special_case_char(mut self, c: char) -> Self {
        self.config.special_case_chars.retain(|existing| *existing != c);
        self
    }

    /// Isolate another tag. Fails on placeholder collisions or remaps.
    pub fn isolated_tag(mut self, tag: &str, placeholder: &str) -> Result<Self> {
        self.config.isolated_tags.insert(tag, placeholder)?;
        Ok(self)
    }

    /// Stop isolating a tag.
    pub fn without_isolated_tag(mut self, tag: &str) -> Self {
        self.config.isolated_tags.remove(tag);
        self
    }

    pub const fn keep_new_lines(mut self, keep: bool) -> Self {
        self.config.keep_new_lines = keep;
        self
    }

    pub const fn group_diffs(mut self, group: bool) -> Self {
        self.config.group_diffs = group;
        self
    }

    pub const fn space_matching(mut self, enabled: bool) -> Self {
        self.config.space_matching = enabled;
        self
    }

    /// Set the list-item similarity threshold (0-100).
    pub const fn match_threshold(mut self, threshold: f64) -> Self {
        self.config.list_matching.similarity_threshold = threshold;
        self
    }

    pub const fn list_matching(mut self, list_matching: ListMatchConfig) -> Self {
        self.config.list_matching = list_matching;
        self
    }

    /// Build the `DiffConfig`.
    #[must_use]
    pub fn build(self) -> DiffConfig {
        self.config
    }
}

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration loaded from config files and CLI arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Diff engine options
    pub diff: DiffConfig,
    /// Output configuration (format, file)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Output-related settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: html or json
    pub format: OutputFormat,
    /// Output file path (stdout when absent)
    pub file: Option<PathBuf>,
}

/// Behavior flags for the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 when the inputs differ
    pub fail_on_change: bool,
    /// Suppress non-essential log output
    pub quiet: bool,
}

// ============================================================================
// Command-specific Configuration Types
// ============================================================================

/// Which engine a CLI diff run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    /// Word-level diff of arbitrary HTML
    Words,
    /// Item-level diff of the first list in each input
    List,
}

/// Paths for a diff run
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Path to the old/baseline document
    pub old: PathBuf,
    /// Path to the new document
    pub new: PathBuf,
}

/// Everything a single CLI diff run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: DiffMode,
    pub paths: DiffPaths,
    pub diff: DiffConfig,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}
