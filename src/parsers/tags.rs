//! Tag predicates over single tokens.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static regex"));
static CLOSING_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</[^>]+>").expect("static regex"));
static BREAK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<br.*>").expect("static regex"));
static SELF_CLOSING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<[^>]+/\s*>").expect("static regex"));

/// Whether the token contains a `<...>` run.
#[must_use]
pub fn is_tag(token: &str) -> bool {
    TAG_RE.is_match(token)
}

/// Whether the token contains a `</...>` run.
#[must_use]
pub fn is_closing_tag(token: &str) -> bool {
    CLOSING_TAG_RE.is_match(token)
}

/// A tag that is neither a closing tag nor a plain word.
#[must_use]
pub fn is_opening_tag(token: &str) -> bool {
    is_tag(token) && !is_closing_tag(token)
}

/// `<br>` in any form, or any tag ending in `/>`.
#[must_use]
pub fn is_self_closing_tag(token: &str) -> bool {
    BREAK_TAG_RE.is_match(token) || SELF_CLOSING_RE.is_match(token)
}

#[must_use]
pub fn is_image_tag(token: &str) -> bool {
    token.to_lowercase().contains("<img")
}

/// Reduce a tag to its name: `<p class="x">` becomes `<p>`.
///
/// Tags without attributes are returned trimmed, so `</p>` stays `</p>`.
#[must_use]
pub fn strip_tag_attributes(tag: &str) -> Cow<'_, str> {
    match tag.get(1..).and_then(|rest| rest.find(' ')) {
        Some(space) => Cow::Owned(format!("<{}>", &tag[1..=space])),
        None => Cow::Borrowed(tag.trim()),
    }
}

/// The comparison key of a token: tags lose their attributes, text is kept.
#[must_use]
pub fn normalize_token(token: &str) -> Cow<'_, str> {
    if is_tag(token) {
        strip_tag_attributes(token)
    } else {
        Cow::Borrowed(token)
    }
}
