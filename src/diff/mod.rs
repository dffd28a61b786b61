//! Semantic HTML diff engines.
//!
//! Two engines share one alignment core:
//!
//! - **Word diff** ([`diff_words`]): tokenize both documents, collapse
//!   isolated regions into placeholders, find matching blocks with
//!   [`BlockAligner`], classify the gaps with [`classify_operations`] and
//!   render annotated HTML. Matched placeholders are diffed recursively.
//! - **List diff** ([`diff_list`]): align the items of the first list in each
//!   document with [`longest_common_subsequence`] under a fuzzy
//!   [`ListItemMatcher`](crate::matching::ListItemMatcher), then word-diff
//!   the paired items.
//!
//! # Example
//!
//! ```
//! use html_diff_tools::diff::DiffEngine;
//!
//! let engine = DiffEngine::new();
//! let report = engine.words_report("<p>Hello world</p>", "<p>Hello there</p>");
//! assert!(report.has_changes());
//! assert!(report.html.contains("<ins class=\"diffmod\">there</ins>"));
//! ```

mod aligner;
mod classifier;
mod engine;
mod isolated;
mod list;
mod result;
mod words;

pub use aligner::{longest_common_subsequence, BlockAligner};
pub use classifier::classify_operations;
pub use engine::DiffEngine;
pub use isolated::{diff_isolated, IsolatedKind, MAX_ISOLATED_DEPTH};
pub use list::{diff_list, line_text, list_operations, ListDiff, LIST_SELECTOR};
pub use result::{DiffReport, DiffSummary, ListSummary, WordSummary};
pub use words::{
    analyze_words, diff_words, wrap_text, WordAlignment, CLASS_DELETED, CLASS_INSERTED,
    CLASS_MODIFIED,
};
