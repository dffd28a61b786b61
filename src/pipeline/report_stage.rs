//! Report output stage.

use super::{write_output, OutputFormat, OutputTarget};
use crate::config::OutputConfig;
use crate::diff::DiffReport;
use anyhow::{Context, Result};

/// Format a report for output.
pub fn render_report(report: &DiffReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(report.html.clone()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize diff report")
        }
    }
}

/// Output a diff report to the configured destination.
pub fn output_report(report: &DiffReport, output: &OutputConfig, quiet: bool) -> Result<()> {
    let target = OutputTarget::from_option(output.file.clone());
    let content = render_report(report, output.format)?;
    write_output(&content, &target, quiet)
}
