//! HTML input parsing for the word diff.
//!
//! This module turns raw HTML into the token stream the aligner consumes:
//!
//! - [`Tokenizer`] splits markup into tags, words, punctuation and
//!   paragraph markers
//! - [`IsolatedRegionExtractor`] collapses atomic regions (lists, tables,
//!   links, images, ...) into placeholder tokens
//! - [`tags`] holds the per-token tag predicates shared by both
//!
//! ## Usage
//!
//! ```
//! use html_diff_tools::config::DiffConfig;
//! use html_diff_tools::parsers::{tokenize, IsolatedRegionExtractor};
//!
//! let config = DiffConfig::default();
//! let words = tokenize("<p>See <a href=\"/x\">this</a>.</p>", &config);
//! assert_eq!(words.last().map(String::as_str), Some("¶"));
//!
//! let (collapsed, regions) = IsolatedRegionExtractor::new(&config.isolated_tags).extract(words);
//! assert!(collapsed.contains(&"[[REPLACE_A]]".to_string()));
//! assert_eq!(regions.len(), 1);
//! ```

mod isolated;
pub mod tags;
mod tokenizer;

pub use isolated::{IsolatedRegion, IsolatedRegionExtractor, IsolatedRegionTable};
pub use tokenizer::{tokenize, Tokenizer};
