//! Sub-diffs for isolated regions that matched as a unit.
//!
//! Links and images compare on their target attribute first; pictures are
//! all-or-nothing; every other region is diffed recursively inside its
//! outermost tags. Regions nested deeper than [`MAX_ISOLATED_DEPTH`] are
//! replaced as a whole instead.

use super::words::{diff_words_at, wrap_text, CLASS_MODIFIED};
use crate::config::{DiffConfig, IsolatedTags};
use crate::html::get_attribute_from_tag;
use regex::Regex;
use std::sync::LazyLock;

static LEADING_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<[^>]+>").expect("static regex"));
static TRAILING_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</[^>]+>$").expect("static regex"));

/// Nesting level past which isolated regions are no longer diffed inside.
pub const MAX_ISOLATED_DEPTH: usize = 64;

/// How a matched region is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolatedKind {
    /// `a`: compared on `href`
    Link,
    /// `img`: compared on `src`
    Image,
    /// `picture`: any change replaces the whole element
    Picture,
    Generic,
}

impl IsolatedKind {
    /// Kind of the region behind `placeholder`.
    #[must_use]
    pub fn of(placeholder: &str, tags: &IsolatedTags) -> Self {
        match tags.tag_for_placeholder(placeholder) {
            Some("a") => Self::Link,
            Some("img") => Self::Image,
            Some("picture") => Self::Picture,
            _ => Self::Generic,
        }
    }
}

/// Diff the old and new markup of one isolated region.
#[must_use]
pub fn diff_isolated(old_html: &str, new_html: &str, placeholder: &str, config: &DiffConfig) -> String {
    diff_isolated_at(old_html, new_html, placeholder, config, 1)
}

/// [`diff_isolated`] for a region nested `depth` levels deep.
pub(crate) fn diff_isolated_at(
    old_html: &str,
    new_html: &str,
    placeholder: &str,
    config: &DiffConfig,
    depth: usize,
) -> String {
    match IsolatedKind::of(placeholder, &config.isolated_tags) {
        IsolatedKind::Link => diff_by_attribute(old_html, new_html, "href", "a", config, depth),
        IsolatedKind::Image => diff_by_attribute(old_html, new_html, "src", "img", config, depth),
        IsolatedKind::Picture => diff_picture(old_html, new_html, config, depth),
        IsolatedKind::Generic => diff_elements(old_html, new_html, config, depth),
    }
}

fn replace_whole(old_html: &str, new_html: &str, class: &str, config: &DiffConfig) -> String {
    let mut html = wrap_text(old_html, "del", class, config.space_matching);
    html.push_str(&wrap_text(new_html, "ins", class, config.space_matching));
    html
}

fn diff_by_attribute(
    old_html: &str,
    new_html: &str,
    attribute: &str,
    element: &str,
    config: &DiffConfig,
    depth: usize,
) -> String {
    let old_value = get_attribute_from_tag(old_html, attribute);
    let new_value = get_attribute_from_tag(new_html, attribute);

    if old_value != new_value {
        tracing::trace!(
            element,
            attribute,
            old = old_value.as_deref().unwrap_or_default(),
            new = new_value.as_deref().unwrap_or_default(),
            "Isolated element target changed"
        );
        let class = format!("{CLASS_MODIFIED} diff{element} diff{attribute}");
        return replace_whole(old_html, new_html, &class, config);
    }

    diff_elements(old_html, new_html, config, depth)
}

fn diff_picture(old_html: &str, new_html: &str, config: &DiffConfig, depth: usize) -> String {
    if old_html != new_html {
        return replace_whole(old_html, new_html, CLASS_MODIFIED, config);
    }
    diff_elements(old_html, new_html, config, depth)
}

/// Split `html` into its outermost opening tag, inner markup and closing tag.
fn strip_wrapping_tags(html: &str) -> (&str, &str, &str) {
    let start = LEADING_TAG_RE.find(html).map_or(0, |m| m.end());
    let end = TRAILING_TAG_RE
        .find_at(html, start)
        .map_or(html.len(), |m| m.start());
    (&html[..start], &html[start..end], &html[end..])
}

/// Word-diff the inner markup, keeping the new side's outer tags.
fn diff_elements(old_html: &str, new_html: &str, config: &DiffConfig, depth: usize) -> String {
    if old_html == new_html {
        return new_html.to_string();
    }
    if depth > MAX_ISOLATED_DEPTH {
        tracing::debug!(depth, "Isolated regions nested too deep, replacing whole region");
        return replace_whole(old_html, new_html, CLASS_MODIFIED, config);
    }

    let (_, old_inner, _) = strip_wrapping_tags(old_html);
    let (wrap_start, new_inner, wrap_end) = strip_wrapping_tags(new_html);

    format!(
        "{wrap_start}{}{wrap_end}",
        diff_words_at(old_inner, new_inner, config, depth)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(old: &str, new: &str, placeholder: &str) -> String {
        diff_isolated(old, new, placeholder, &DiffConfig::default())
    }

    #[test]
    fn test_kind_lookup() {
        let tags = IsolatedTags::default();
        assert_eq!(IsolatedKind::of("[[REPLACE_A]]", &tags), IsolatedKind::Link);
        assert_eq!(IsolatedKind::of("[[REPLACE_IMG]]", &tags), IsolatedKind::Image);
        assert_eq!(IsolatedKind::of("[[REPLACE_PICTURE]]", &tags), IsolatedKind::Picture);
        assert_eq!(IsolatedKind::of("[[REPLACE_TABLE]]", &tags), IsolatedKind::Generic);
    }

    #[test]
    fn test_strip_wrapping_tags() {
        assert_eq!(strip_wrapping_tags("<b>x</b>"), ("<b>", "x", "</b>"));
        assert_eq!(strip_wrapping_tags("<img src=\"a\">"), ("<img src=\"a\">", "", ""));
        assert_eq!(strip_wrapping_tags("plain"), ("", "plain", ""));
    }

    #[test]
    fn test_link_target_change_replaces_whole_link() {
        assert_eq!(
            diff("<a href=\"/a\">Docs</a>", "<a href=\"/b\">Docs</a>", "[[REPLACE_A]]"),
            "<del class=\"diffmod diffa diffhref\"><a href=\"/a\">Docs</a></del>\
             <ins class=\"diffmod diffa diffhref\"><a href=\"/b\">Docs</a></ins>"
        );
    }

    #[test]
    fn test_link_text_change_diffs_inside() {
        assert_eq!(
            diff("<a href=\"/a\">old text</a>", "<a href=\"/a\">new text</a>", "[[REPLACE_A]]"),
            "<a href=\"/a\"><del class=\"diffmod\">old</del><ins class=\"diffmod\">new</ins> text</a>"
        );
    }

    #[test]
    fn test_same_image_is_kept() {
        let img = "<img src=\"cat.png\" alt=\"a cat\">";
        assert_eq!(diff(img, img, "[[REPLACE_IMG]]"), img);
    }

    #[test]
    fn test_picture_change_is_all_or_nothing() {
        let html = diff(
            "<picture><source srcset=\"a.webp\"></picture>",
            "<picture><source srcset=\"b.webp\"></picture>",
            "[[REPLACE_PICTURE]]",
        );
        assert!(html.starts_with("<del class=\"diffmod\"><picture>"));
        assert!(html.ends_with("</picture></ins>"));
    }

    #[test]
    fn test_regions_past_depth_limit_are_replaced_whole() {
        let config = DiffConfig::default();
        let old = "<sup><sup>x</sup></sup>";
        let new = "<sup><sup>y</sup></sup>";

        assert_eq!(
            diff_isolated_at(old, new, "[[REPLACE_SUPER_SCRIPT]]", &config, MAX_ISOLATED_DEPTH - 1),
            "<sup><sup><del class=\"diffmod\">x</del><ins class=\"diffmod\">y</ins></sup></sup>"
        );
        assert_eq!(
            diff_isolated_at(old, new, "[[REPLACE_SUPER_SCRIPT]]", &config, MAX_ISOLATED_DEPTH),
            "<sup><del class=\"diffmod\"><sup>x</sup></del><ins class=\"diffmod\"><sup>y</sup></ins></sup>"
        );
        assert_eq!(
            diff_isolated_at(old, new, "[[REPLACE_SUPER_SCRIPT]]", &config, MAX_ISOLATED_DEPTH + 1),
            "<del class=\"diffmod\"><sup><sup>x</sup></sup></del>\
             <ins class=\"diffmod\"><sup><sup>y</sup></sup></ins>"
        );
        assert_eq!(
            diff_isolated_at(old, old, "[[REPLACE_SUPER_SCRIPT]]", &config, MAX_ISOLATED_DEPTH + 1),
            old
        );
    }

    #[test]
    fn test_table_cell_change_keeps_new_wrapper() {
        assert_eq!(
            diff(
                "<table class=\"old\"><tr><td>1</td></tr></table>",
                "<table class=\"new\"><tr><td>2</td></tr></table>",
                "[[REPLACE_TABLE]]"
            ),
            "<table class=\"new\"><tr><td><del class=\"diffmod\">1</del><ins class=\"diffmod\">2</ins></td></tr></table>"
        );
    }
}
