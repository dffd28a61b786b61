//! Reading diff inputs.

use crate::config::DiffPaths;
use anyhow::{Context, Result};
use std::path::Path;

/// Read an HTML file with context for error messages
pub fn read_html_with_context(path: &Path, quiet: bool) -> Result<String> {
    if !quiet {
        tracing::info!("Reading HTML: {}", path.display());
    }

    let html = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read HTML file: {}", path.display()))?;

    tracing::debug!(bytes = html.len(), "Read {}", path.display());
    Ok(html)
}

/// Read the old and new documents of a run.
pub fn read_inputs(paths: &DiffPaths, quiet: bool) -> Result<(String, String)> {
    let old = read_html_with_context(&paths.old, quiet)?;
    let new = read_html_with_context(&paths.new, quiet)?;
    Ok((old, new))
}
