//! **Semantic diffs of HTML documents, rendered as annotated HTML.**
//!
//! `html-diff-tools` compares two versions of an HTML document and returns a single HTML
//! string in which inserted, deleted and replaced content is wrapped in `<ins>` / `<del>`
//! elements carrying CSS classes. The output is meant to be embedded directly in a review UI.
//!
//! ## Core Concepts & Modules
//!
//! - **[`parsers`]**: The [`Tokenizer`] splits markup into a word/tag stream that keeps tag
//!   boundaries and paragraph breaks, and the [`IsolatedRegionExtractor`] collapses atomic
//!   regions (lists, tables, links, images, `sub`/`sup`, pictures) into single placeholder
//!   tokens so they are diffed as units.
//! - **[`diff`]**: The block aligner, the operation classifier and the two engines built on
//!   them. [`diff_words`] renders a word-level diff; [`diff_list`] pairs the items of the
//!   first list in each document and word-diffs the pairs. [`DiffEngine`] wraps both and
//!   also produces a [`DiffReport`] with change counts.
//! - **[`matching`]**: Match predicates for the aligner. List items are compared with the
//!   fuzzy [`ListItemMatcher`].
//! - **[`config`]**: [`DiffConfig`] and its presets, validation and YAML config files.
//! - **[`html`]**: Entity helpers and DOM utilities over `kuchikiki`.
//!
//! ## Getting Started: Word Diff
//!
//! ```
//! use html_diff_tools::{diff_words, DiffConfig};
//!
//! let html = diff_words(
//!     "<p>The quick fox</p>",
//!     "<p>The slow fox</p>",
//!     &DiffConfig::default(),
//! );
//! assert_eq!(
//!     html,
//!     "<p>The <del class=\"diffmod\">quick</del><ins class=\"diffmod\">slow</ins> fox</p>"
//! );
//! ```
//!
//! ### Diffing Lists
//!
//! ```
//! use html_diff_tools::{diff_list, DiffConfig};
//!
//! fn main() -> Result<(), html_diff_tools::HtmlDiffError> {
//!     let html = diff_list(
//!         "<ul><li>Apple</li><li>Banana</li></ul>",
//!         "<ul><li>Apple</li></ul>",
//!         &DiffConfig::default(),
//!     )?;
//!     assert!(html.contains("<li class=\"removed\"><del>Banana</del></li>"));
//!     Ok(())
//! }
//! ```
//!
//! ### Change Summaries
//!
//! ```
//! use html_diff_tools::{DiffConfig, DiffEngine, DiffSummary};
//!
//! let engine = DiffEngine::new().with_config(DiffConfig::default());
//! let report = engine.words_report("<p>one</p>", "<p>one two</p>");
//! match report.summary {
//!     DiffSummary::Words(summary) => assert_eq!(summary.inserted, 1),
//!     DiffSummary::List(_) => unreachable!(),
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the library crate. The `html-diff-tools` binary exposes the
//! same engines through the `words` and `list` subcommands.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod html;
pub mod matching;
pub mod model;
pub mod parsers;
pub mod pipeline;

// Re-export main types for convenience
pub use config::{AppConfig, BehaviorConfig, ConfigPreset, DiffConfig, IsolatedTags, OutputConfig};
pub use config::{ConfigError, Validatable};
pub use diff::{
    analyze_words, diff_list, diff_words, DiffEngine, DiffReport, DiffSummary, ListSummary,
    WordAlignment, WordSummary,
};
pub use error::{ErrorContext, HtmlDiffError, OptionContext, Result};
pub use matching::{ExactMatch, ListItemMatcher, ListMatchConfig, MatchStrategy};
pub use model::{ListOperation, ListOperationKind, MatchingBlock, Operation, OperationKind};
pub use parsers::{tokenize, IsolatedRegionExtractor, Tokenizer};
