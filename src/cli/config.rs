//! Config command handler.
//!
//! Prints the config JSON Schema, an example config file, or the effective
//! configuration after file discovery and CLI merging.

use crate::config::{generate_example_config, generate_json_schema, AppConfig};
use crate::pipeline::{write_output, OutputTarget};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// What the `config` subcommand should print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// JSON Schema of the config file format
    Schema,
    /// Commented example config built from the defaults
    Example,
    /// The merged configuration a diff run would use
    Show,
}

/// Run the config command.
pub fn run_config(
    action: ConfigAction,
    effective: &AppConfig,
    loaded_from: Option<&PathBuf>,
    output: Option<PathBuf>,
) -> Result<i32> {
    let content = match action {
        ConfigAction::Schema => generate_json_schema(),
        ConfigAction::Example => generate_example_config(),
        ConfigAction::Show => {
            let yaml =
                serde_yaml::to_string(effective).context("Failed to serialize configuration")?;
            match loaded_from {
                Some(path) => format!("# Loaded from {}\n{yaml}", path.display()),
                None => yaml,
            }
        }
    };

    write_output(&content, &OutputTarget::from_option(output), false)?;
    Ok(crate::pipeline::exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_schema_to_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("schema.json");
        run_config(
            ConfigAction::Schema,
            &AppConfig::default(),
            None,
            Some(path.clone()),
        )
        .unwrap();
        let schema: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert!(schema["properties"]["diff"].is_object());
    }

    #[test]
    fn test_show_round_trips_through_yaml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("effective.yaml");
        let mut config = AppConfig::default();
        config.diff.keep_new_lines = true;
        config.behavior.fail_on_change = true;

        let source = PathBuf::from(".html-diff-tools.yaml");
        run_config(ConfigAction::Show, &config, Some(&source), Some(path.clone())).unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with("# Loaded from .html-diff-tools.yaml"));
        let parsed: AppConfig = serde_yaml::from_str(&written).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_example_parses_as_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("example.yaml");
        run_config(
            ConfigAction::Example,
            &AppConfig::default(),
            None,
            Some(path.clone()),
        )
        .unwrap();
        let parsed: AppConfig =
            serde_yaml::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }
}
