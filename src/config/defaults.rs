//! Default configurations and presets for html-diff-tools.
//!
//! Provides named presets for common review workflows and the default values
//! every diff starts from.

use super::types::DiffConfig;
use crate::matching::ListMatchConfig;

// ============================================================================
// Default Values
// ============================================================================

/// Punctuation that stays glued to adjacent letters and digits (`410.6`, `this's`).
pub const DEFAULT_SPECIAL_CASE_CHARS: &[char] = &['.', ',', '(', ')', '\''];

/// Isolated tags and their placeholders, in matching order.
pub const DEFAULT_ISOLATED_TAGS: &[(&str, &str)] = &[
    ("ol", "[[REPLACE_ORDERED_LIST]]"),
    ("ul", "[[REPLACE_UNORDERED_LIST]]"),
    ("sub", "[[REPLACE_SUB_SCRIPT]]"),
    ("sup", "[[REPLACE_SUPER_SCRIPT]]"),
    ("dl", "[[REPLACE_DEFINITION_LIST]]"),
    ("table", "[[REPLACE_TABLE]]"),
    ("a", "[[REPLACE_A]]"),
    ("img", "[[REPLACE_IMG]]"),
    ("pre", "[[REPLACE_PRE]]"),
    ("picture", "[[REPLACE_PICTURE]]"),
];

/// Default list-item similarity threshold (percent).
pub const DEFAULT_MATCH_THRESHOLD: f64 = 80.0;

/// Default minimum length ratio for prefix/suffix based list-item matches.
pub const DEFAULT_LENGTH_RATIO_THRESHOLD: f64 = 0.1;

/// Default minimum share of common prefix+suffix text for list-item matches.
pub const DEFAULT_COMMON_TEXT_RATIO_THRESHOLD: f64 = 0.6;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Balanced settings suitable for most documents
    Default,
    /// Only near-identical list items count as the same item
    Strict,
    /// Loosely similar list items still pair up for an inline diff
    Lenient,
    /// Whitespace and newlines are significant
    PreserveWhitespace,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Lenient => "lenient",
            Self::PreserveWhitespace => "preserve-whitespace",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "strict" | "exact" => Some(Self::Strict),
            "lenient" | "loose" | "permissive" => Some(Self::Lenient),
            "preserve-whitespace" | "whitespace" | "pre" => Some(Self::PreserveWhitespace),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Balanced settings suitable for most HTML documents",
            Self::Strict => "List items must be near-identical to be diffed inline",
            Self::Lenient => "Loosely similar list items are still diffed inline",
            Self::PreserveWhitespace => "Newlines and whitespace-only changes are kept and marked",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Default,
            Self::Strict,
            Self::Lenient,
            Self::PreserveWhitespace,
        ]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl DiffConfig {
    /// Create a `DiffConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self {
                list_matching: ListMatchConfig {
                    similarity_threshold: 90.0,
                    common_text_ratio_threshold: 0.8,
                    ..ListMatchConfig::default()
                },
                ..Self::default()
            },
            ConfigPreset::Lenient => Self {
                list_matching: ListMatchConfig {
                    similarity_threshold: 60.0,
                    common_text_ratio_threshold: 0.4,
                    ..ListMatchConfig::default()
                },
                ..Self::default()
            },
            ConfigPreset::PreserveWhitespace => Self {
                keep_new_lines: true,
                space_matching: true,
                group_diffs: false,
                ..Self::default()
            },
        }
    }
}
