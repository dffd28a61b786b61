//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod config;
mod diff;

pub use config::{run_config, ConfigAction};
pub use diff::{run_diff, run_list, run_words};

// Re-export config types used by handlers
pub use crate::config::{AppConfig, RunConfig};
