//! Data model shared by the tokenizer, the aligner and the renderers.
//!
//! Token streams are `Vec<String>`; [`TokenKind`] classifies individual
//! tokens. Alignment produces [`MatchingBlock`]s, which the classifier turns
//! into [`Operation`]s. List diffs work on [`ListOperation`]s over 1-based
//! item numbers.

mod operation;
mod token;

pub use operation::*;
pub use token::*;
