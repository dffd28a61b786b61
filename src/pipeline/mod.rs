//! Pipeline orchestration for HTML diff runs.
//!
//! This module provides the shared read → diff → report steps used by the
//! CLI command handlers.

mod diff_stage;
mod input;
mod output;
mod report_stage;

pub use diff_stage::compute_report;
pub use input::{read_html_with_context, read_inputs};
pub use output::{write_output, OutputFormat, OutputTarget};
pub use report_stage::{output_report, render_report};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or changes without --fail-on-change)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected and --fail-on-change was set
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
