//! Diff command handlers.
//!
//! Implements the `words` and `list` subcommands for comparing two HTML files.

use crate::config::{DiffMode, RunConfig};
use crate::diff::DiffReport;
use crate::pipeline::{compute_report, exit_codes, output_report, read_inputs};
use anyhow::Result;

/// Run a diff, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_diff(config: RunConfig) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let (old, new) = read_inputs(&config.paths, quiet)?;
    let report = compute_report(config.mode, &old, &new, &config.diff, quiet)?;

    let exit_code = determine_exit_code(&config, &report);
    output_report(&report, &config.output, quiet)?;

    Ok(exit_code)
}

/// Run a word diff regardless of the mode carried by `config`.
pub fn run_words(config: RunConfig) -> Result<i32> {
    run_diff(RunConfig {
        mode: DiffMode::Words,
        ..config
    })
}

/// Run a list diff regardless of the mode carried by `config`.
pub fn run_list(config: RunConfig) -> Result<i32> {
    run_diff(RunConfig {
        mode: DiffMode::List,
        ..config
    })
}

/// Determine the exit code based on the report and behavior flags.
fn determine_exit_code(config: &RunConfig, report: &DiffReport) -> i32 {
    if config.behavior.fail_on_change && report.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
