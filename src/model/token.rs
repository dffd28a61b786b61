//! Token classification.
//!
//! Tokens themselves are plain `String`s held in a `Vec`; the kind is derived
//! on demand from the text and the active isolated-tag map.

use crate::config::IsolatedTags;
use crate::parsers::tags::{is_closing_tag, is_self_closing_tag, is_tag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Synthetic token emitted after every `</p>`.
pub const PARAGRAPH_MARKER: &str = "¶";

/// What a token represents in the word stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// `<p>`, `<a href="...">`
    OpeningTag,
    /// `</p>`
    ClosingTag,
    /// `<br>`, `<img ... />`
    SelfClosingTag,
    /// The `¶` marker following a closing paragraph
    ParagraphMarker,
    /// Sentinel standing in for a collapsed isolated region
    Placeholder,
    /// A word, a punctuation mark, or whitespace
    Text,
}

impl TokenKind {
    /// Classify `token` against the configured placeholders.
    #[must_use]
    pub fn classify(token: &str, isolated_tags: &IsolatedTags) -> Self {
        if token == PARAGRAPH_MARKER {
            Self::ParagraphMarker
        } else if isolated_tags.is_placeholder(token) {
            Self::Placeholder
        } else if !is_tag(token) {
            Self::Text
        } else if is_closing_tag(token) {
            Self::ClosingTag
        } else if is_self_closing_tag(token) {
            Self::SelfClosingTag
        } else {
            Self::OpeningTag
        }
    }

    #[must_use]
    pub const fn is_tag(&self) -> bool {
        matches!(
            self,
            Self::OpeningTag | Self::ClosingTag | Self::SelfClosingTag
        )
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpeningTag => "opening-tag",
            Self::ClosingTag => "closing-tag",
            Self::SelfClosingTag => "self-closing-tag",
            Self::ParagraphMarker => "paragraph-marker",
            Self::Placeholder => "placeholder",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `token` is empty once trimmed.
#[must_use]
pub fn is_whitespace_token(token: &str) -> bool {
    token.trim().is_empty()
}
