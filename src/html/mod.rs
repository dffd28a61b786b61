//! Markup helpers shared by the diff engines.
//!
//! - [`escape`]: entity decoding/encoding and attribute extraction on raw strings
//! - [`dom`]: parsing, serialization and small tree edits over `kuchikiki`

pub mod dom;
pub mod escape;

pub use escape::{decode_special_chars, encode_numeric_entities, get_attribute_from_tag};
