//! html-diff-tools: Semantic HTML diff tool
//!
//! Word-level and list-item diffs of two HTML documents, rendered as
//! annotated HTML.

#![allow(clippy::struct_excessive_bools)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use html_diff_tools::{
    cli::{self, ConfigAction},
    config::{
        AppConfig, BehaviorConfig, ConfigPreset, DiffConfig, DiffMode, DiffPaths, OutputConfig,
        RunConfig, Validatable,
    },
    pipeline::{exit_codes, OutputFormat},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "html-diff-tools")]
#[command(version)]
#[command(about = "Semantic HTML diff tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected (or changes without --fail-on-change)
    1  Changes detected with --fail-on-change
    3  Error occurred

EXAMPLES:
    # Word diff of two pages
    html-diff-tools words old.html new.html > diff.html

    # Item diff of the first list in each page
    html-diff-tools list old.html new.html --match-threshold 70

    # CI check with a JSON summary
    html-diff-tools words old.html new.html -o json --fail-on-change")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "HTML_DIFF_TOOLS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments shared by both diff subcommands
#[derive(Parser)]
struct CommonArgs {
    /// Path to the old/baseline HTML document
    old: PathBuf,

    /// Path to the new HTML document
    new: PathBuf,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Option preset (default, strict, lenient, preserve-whitespace)
    #[arg(long)]
    preset: Option<String>,

    /// Exit with code 1 if the documents differ
    #[arg(long)]
    fail_on_change: bool,
}

/// Arguments for the `words` subcommand
#[derive(Parser)]
struct WordsArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Keep newlines instead of collapsing whitespace
    #[arg(long)]
    keep_new_lines: bool,

    /// Do not merge changes separated only by whitespace
    #[arg(long)]
    no_group_diffs: bool,

    /// Mark whitespace-only changes in the output
    #[arg(long)]
    space_matching: bool,

    /// Characters tokenized as standalone words (e.g. ".,()'")
    #[arg(long, value_name = "CHARS")]
    special_chars: Option<String>,
}

/// Arguments for the `list` subcommand
#[derive(Parser)]
struct ListArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Similarity percentage at which two list items are diffed inline
    #[arg(long, value_name = "0-100")]
    match_threshold: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Word-level diff of two HTML documents
    Words(WordsArgs),

    /// Item-level diff of the first list in two HTML documents
    List(ListArgs),

    /// Print the effective configuration, its JSON Schema, or an example file
    Config {
        /// Print the JSON Schema for the config file format
        #[arg(long, conflicts_with = "example")]
        schema: bool,

        /// Print an example config file
        #[arg(long)]
        example: bool,

        /// Write to file instead of stdout
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) if code != exit_codes::SUCCESS => std::process::exit(code),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Words(args) => {
            let mut diff = base_diff_config(args.common.preset.as_deref())?;
            diff.keep_new_lines |= args.keep_new_lines;
            diff.group_diffs &= !args.no_group_diffs;
            diff.space_matching |= args.space_matching;
            if let Some(chars) = &args.special_chars {
                diff.special_case_chars = chars.chars().collect();
            }

            let config = build_run_config(
                DiffMode::Words,
                args.common,
                diff,
                cli.config.as_ref(),
                cli.quiet,
            )?;
            cli::run_words(config)
        }

        Commands::List(args) => {
            let mut diff = base_diff_config(args.common.preset.as_deref())?;
            if let Some(threshold) = args.match_threshold {
                diff.list_matching.similarity_threshold = threshold;
            }

            let config = build_run_config(
                DiffMode::List,
                args.common,
                diff,
                cli.config.as_ref(),
                cli.quiet,
            )?;
            cli::run_list(config)
        }

        Commands::Config {
            schema,
            example,
            output_file,
        } => {
            let action = if schema {
                ConfigAction::Schema
            } else if example {
                ConfigAction::Example
            } else {
                ConfigAction::Show
            };
            let (config, loaded_from) =
                html_diff_tools::config::load_or_default(cli.config.as_deref());
            cli::run_config(action, &config, loaded_from.as_ref(), output_file)
        }

        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "html-diff-tools",
                &mut io::stdout(),
            );
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// Diff options before per-flag overrides: the named preset or the defaults.
fn base_diff_config(preset: Option<&str>) -> Result<DiffConfig> {
    match preset {
        Some(name) => {
            let preset = ConfigPreset::from_name(name).with_context(|| {
                format!(
                    "Unknown preset '{name}' (expected one of: {})",
                    ConfigPreset::all()
                        .iter()
                        .map(ConfigPreset::name)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })?;
            Ok(DiffConfig::from_preset(preset))
        }
        None => Ok(DiffConfig::default()),
    }
}

/// Layer CLI values over the discovered config file and validate the result.
fn build_run_config(
    mode: DiffMode,
    args: CommonArgs,
    diff: DiffConfig,
    config_path: Option<&PathBuf>,
    quiet: bool,
) -> Result<RunConfig> {
    let overrides = AppConfig {
        diff,
        output: OutputConfig {
            format: args.output.unwrap_or_default(),
            file: args.output_file,
        },
        behavior: BehaviorConfig {
            fail_on_change: args.fail_on_change,
            quiet,
        },
    };

    let (app, loaded_from) =
        AppConfig::from_file_with_overrides(config_path.map(PathBuf::as_path), &overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    let errors = app.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("Invalid configuration:\n  {}", messages.join("\n  "));
    }

    Ok(RunConfig {
        mode,
        paths: DiffPaths {
            old: args.old,
            new: args.new,
        },
        diff: app.diff,
        output: app.output,
        behavior: app.behavior,
    })
}
