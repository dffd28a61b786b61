//! Configuration module for html-diff-tools.
//!
//! This module provides:
//! - The [`DiffConfig`] option bag read by both diff engines
//! - Validation for all configuration values
//! - Named presets for common review workflows
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```
//! use html_diff_tools::config::{ConfigPreset, DiffConfig};
//!
//! let config = DiffConfig::default();
//! assert!(config.group_diffs);
//!
//! let strict = DiffConfig::from_preset(ConfigPreset::Strict);
//! assert!(strict.list_matching.similarity_threshold > 80.0);
//!
//! let custom = DiffConfig::builder()
//!     .keep_new_lines(true)
//!     .isolated_tag("video", "[[REPLACE_VIDEO]]")
//!     .expect("placeholder is unique")
//!     .build();
//! assert!(custom.isolated_tags.contains_tag("video"));
//! ```
//!
//! # Configuration File
//!
//! Place a `.html-diff-tools.yaml` file in your project root or
//! `~/.config/html-diff-tools/`:
//!
//! ```yaml
//! diff:
//!   keep_new_lines: false
//!   list_matching:
//!     similarity_threshold: 85
//! output:
//!   format: json
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    ConfigPreset, DEFAULT_COMMON_TEXT_RATIO_THRESHOLD, DEFAULT_ISOLATED_TAGS,
    DEFAULT_LENGTH_RATIO_THRESHOLD, DEFAULT_MATCH_THRESHOLD, DEFAULT_SPECIAL_CASE_CHARS,
};
pub use types::{
    AppConfig, BehaviorConfig, DiffConfig, DiffConfigBuilder, DiffMode, DiffPaths, IsolatedTags,
    OutputConfig, RunConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
