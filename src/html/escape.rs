//! Entity handling and attribute extraction on raw markup.
//!
//! These work on strings, not on a parsed tree: the word diff never builds
//! a DOM, and the list diff only needs entity encoding around its parser.

use regex::Regex;
use std::sync::LazyLock;

/// Attributes the isolated-region diff compares, compiled once.
static COMMON_ATTRIBUTE_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    ["href", "src"]
        .into_iter()
        .filter_map(|name| Regex::new(&attribute_pattern(name)).ok().map(|re| (name, re)))
        .collect()
});

fn attribute_pattern(attribute: &str) -> String {
    format!(
        r#"(?i)<[^>]*\b{}\s*=\s*(?:"([^"]*)"|'([^']*)')[^>]*>"#,
        regex::escape(attribute)
    )
}

fn attribute_regex(attribute: &str) -> Option<Regex> {
    if let Some((_, re)) = COMMON_ATTRIBUTE_RES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(attribute))
    {
        return Some(re.clone());
    }
    match Regex::new(&attribute_pattern(attribute)) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Cannot match attribute '{}': {}", attribute, e);
            None
        }
    }
}

/// Decode the four entities HTML escaping produces for attribute values.
///
/// Decoding is a single pass, so `&amp;lt;` becomes `&lt;` rather than `<`.
///
/// # Examples
///
/// ```
/// use html_diff_tools::html::escape::decode_special_chars;
///
/// assert_eq!(decode_special_chars("a?x=1&amp;y=&quot;2&quot;"), "a?x=1&y=\"2\"");
/// assert_eq!(decode_special_chars("&amp;lt;"), "&lt;");
/// ```
#[must_use]
pub fn decode_special_chars(s: &str) -> String {
    const ENTITIES: [(&str, char); 4] = [("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>'), ("&quot;", '"')];

    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, c)) => {
                result.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                result.push('&');
                rest = &rest[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

/// Replace every non-ASCII character by a decimal character reference.
///
/// ```
/// use html_diff_tools::html::escape::encode_numeric_entities;
///
/// assert_eq!(encode_numeric_entities("café"), "caf&#233;");
/// ```
#[must_use]
pub fn encode_numeric_entities(s: &str) -> String {
    if s.is_ascii() {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        if c.is_ascii() {
            result.push(c);
        } else {
            result.push_str(&format!("&#{};", u32::from(c)));
        }
    }
    result
}

/// Value of `attribute` on the first tag in `html` that carries it.
///
/// Both quote styles are accepted and the name is matched
/// case-insensitively. The value is entity-decoded.
#[must_use]
pub fn get_attribute_from_tag(html: &str, attribute: &str) -> Option<String> {
    let re = attribute_regex(attribute)?;
    let caps = re.captures(html)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|value| decode_special_chars(value.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_leaves_unknown_entities() {
        assert_eq!(decode_special_chars("&nbsp;&copy; & done"), "&nbsp;&copy; & done");
        assert_eq!(decode_special_chars("&lt;b&gt;"), "<b>");
    }

    #[test]
    fn test_encode_astral_and_bmp() {
        assert_eq!(encode_numeric_entities("ü😀"), "&#252;&#128512;");
        assert_eq!(encode_numeric_entities("<li>plain</li>"), "<li>plain</li>");
    }

    #[test]
    fn test_attribute_double_and_single_quotes() {
        assert_eq!(
            get_attribute_from_tag("<a class=\"x\" href=\"http://a.com\">t</a>", "href").as_deref(),
            Some("http://a.com")
        );
        assert_eq!(
            get_attribute_from_tag("<img SRC='pic.png' alt=\"\">", "src").as_deref(),
            Some("pic.png")
        );
    }

    #[test]
    fn test_attribute_stops_at_its_own_quote() {
        let tag = "<a href=\"/one\" title=\"two\">x</a>";
        assert_eq!(get_attribute_from_tag(tag, "href").as_deref(), Some("/one"));
    }

    #[test]
    fn test_attribute_is_decoded() {
        let tag = "<a href=\"/s?a=1&amp;b=2\">x</a>";
        assert_eq!(get_attribute_from_tag(tag, "href").as_deref(), Some("/s?a=1&b=2"));
    }

    #[test]
    fn test_missing_attribute() {
        assert_eq!(get_attribute_from_tag("<a name=\"top\">x</a>", "href"), None);
        assert_eq!(get_attribute_from_tag("plain text", "href"), None);
    }

    #[test]
    fn test_common_attributes_use_shared_patterns() {
        assert_eq!(COMMON_ATTRIBUTE_RES.len(), 2);
        let shared = attribute_regex("HREF").unwrap();
        assert_eq!(shared.as_str(), COMMON_ATTRIBUTE_RES[0].1.as_str());
        assert_eq!(
            get_attribute_from_tag("<div data-id='7'>x</div>", "data-id").as_deref(),
            Some("7")
        );
    }

    #[test]
    fn test_attribute_name_needs_word_boundary() {
        assert_eq!(get_attribute_from_tag("<img data-src=\"lazy.png\">", "src").as_deref(), Some("lazy.png"));
        assert_eq!(get_attribute_from_tag("<img xsrc=\"no.png\">", "src"), None);
    }
}
