//! Configuration validation for html-diff-tools.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, DiffConfig, OutputConfig};
use crate::matching::ListMatchConfig;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.diff.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for c in &self.special_case_chars {
            if c.is_whitespace() || *c == '<' || *c == '>' {
                errors.push(ConfigError {
                    field: "diff.special_case_chars".to_string(),
                    message: format!("{c:?} cannot be a special-case character"),
                });
            }
        }

        for (tag, placeholder) in self.isolated_tags.iter() {
            if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                errors.push(ConfigError {
                    field: "diff.isolated_tags".to_string(),
                    message: format!("'{tag}' is not a valid tag name"),
                });
            }
            if placeholder.contains(['<', '>']) || placeholder.chars().any(char::is_whitespace) {
                errors.push(ConfigError {
                    field: format!("diff.isolated_tags.{tag}"),
                    message: format!(
                        "placeholder '{placeholder}' must be a single token without angle brackets"
                    ),
                });
            }
        }

        errors.extend(self.list_matching.validate());
        errors
    }
}

impl Validatable for ListMatchConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !(0.0..=100.0).contains(&self.similarity_threshold) {
            errors.push(ConfigError {
                field: "diff.list_matching.similarity_threshold".to_string(),
                message: format!(
                    "Threshold must be between 0 and 100, got {}",
                    self.similarity_threshold
                ),
            });
        }

        for (field, value) in [
            ("length_ratio_threshold", self.length_ratio_threshold),
            ("common_text_ratio_threshold", self.common_text_ratio_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ConfigError {
                    field: format!("diff.list_matching.{field}"),
                    message: format!("Ratio must be between 0.0 and 1.0, got {value}"),
                });
            }
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(file) = &self.file {
            if file.as_os_str().is_empty() {
                errors.push(ConfigError {
                    field: "output.file".to_string(),
                    message: "Output file path cannot be empty".to_string(),
                });
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
        assert!(DiffConfig::default().is_valid());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let mut config = DiffConfig::default();
        config.list_matching.similarity_threshold = 120.0;
        config.list_matching.common_text_ratio_threshold = -0.5;
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].field.ends_with("similarity_threshold"));
        assert!(errors[1].field.ends_with("common_text_ratio_threshold"));
    }

    #[test]
    fn test_whitespace_special_char_rejected() {
        let config = DiffConfig::builder().add_special_case_char(' ').build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "diff.special_case_chars");
    }

    #[test]
    fn test_placeholder_with_brackets_rejected() {
        let config = DiffConfig::builder()
            .isolated_tag("video", "<video>")
            .unwrap()
            .build();
        assert!(!config.is_valid());
    }

    #[test]
    fn test_empty_output_file_rejected() {
        let output = OutputConfig {
            file: Some(PathBuf::new()),
            ..OutputConfig::default()
        };
        assert_eq!(output.validate().len(), 1);
    }
}
