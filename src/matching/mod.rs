//! Equality predicates for sequence alignment.
//!
//! The aligner never compares items itself; it asks a [`MatchStrategy`].
//!
//! - [`ExactMatch`]: byte equality, used for word tokens
//! - [`ListItemMatcher`]: similarity-threshold matching, used for list items
//! - any `Fn(&str, &str) -> bool` closure
//!
//! # Example
//!
//! ```
//! use html_diff_tools::matching::{ListItemMatcher, ListMatchConfig, MatchStrategy};
//!
//! let matcher = ListItemMatcher::new(ListMatchConfig::default());
//! assert!(matcher.is_match("Install the package", "Install the packages"));
//! assert!(!matcher.is_match("Apples", "Zebra crossing"));
//! ```

mod config;
mod list_item;
pub mod string_similarity;
mod traits;

pub use config::ListMatchConfig;
pub use list_item::ListItemMatcher;
pub use string_similarity::{similar_text, similar_text_percent, strip_tags};
pub use traits::{ExactMatch, MatchReason, MatchStrategy};
