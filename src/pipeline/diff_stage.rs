//! Diff computation stage.

use crate::config::{DiffConfig, DiffMode};
use crate::diff::{DiffEngine, DiffReport, DiffSummary};
use anyhow::{Context, Result};

/// Run the configured engine over two documents.
pub fn compute_report(
    mode: DiffMode,
    old: &str,
    new: &str,
    config: &DiffConfig,
    quiet: bool,
) -> Result<DiffReport> {
    let engine = DiffEngine::new().with_config(config.clone());

    if !quiet {
        tracing::info!("Computing {} diff...", mode_name(mode));
    }

    let report = match mode {
        DiffMode::Words => engine.words_report(old, new),
        DiffMode::List => engine
            .list_report(old, new)
            .context("Failed to compute list diff")?,
    };

    if !quiet {
        match &report.summary {
            DiffSummary::Words(s) => tracing::info!(
                "Word diff: {} equal, {} inserted, {} deleted, {} replaced",
                s.equal,
                s.inserted,
                s.deleted,
                s.replaced
            ),
            DiffSummary::List(s) => tracing::info!(
                "List diff: {} unchanged, {} added, {} deleted, {} changed",
                s.unchanged,
                s.added,
                s.deleted,
                s.changed
            ),
        }
    }

    Ok(report)
}

const fn mode_name(mode: DiffMode) -> &'static str {
    match mode {
        DiffMode::Words => "word",
        DiffMode::List => "list",
    }
}
