//! Collapsing isolated regions into placeholder tokens.
//!
//! Configured tags (lists, tables, links, images, ...) are diffed as single
//! units. Before alignment each such region is replaced by its placeholder
//! and the original tokens are kept in an [`IsolatedRegionTable`] so the
//! renderer can diff them separately.

use super::tags::{is_image_tag, is_self_closing_tag};
use crate::config::{IsolatedTags, DEFAULT_ISOLATED_TAGS};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Matchers for the default tags, compiled once per process.
static DEFAULT_TAG_MATCHERS: LazyLock<Vec<TagMatcher>> = LazyLock::new(|| {
    DEFAULT_ISOLATED_TAGS
        .iter()
        .filter_map(|(tag, _)| TagMatcher::compile(tag))
        .collect()
});

/// A region found in the raw token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolatedRegion {
    /// Index of the opening tag
    pub start: usize,
    /// Number of tokens including both outer tags
    pub len: usize,
    /// Lowercase tag name
    pub tag: String,
}

/// Original tokens of each collapsed region, keyed by placeholder position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsolatedRegionTable {
    regions: BTreeMap<usize, Vec<String>>,
}

impl IsolatedRegionTable {
    /// Tokens replaced by the placeholder at `pos`.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<&[String]> {
        self.regions.get(&pos).map(Vec::as_slice)
    }

    /// The region at `pos` as one HTML string.
    #[must_use]
    pub fn html(&self, pos: usize) -> Option<String> {
        self.get(pos).map(|tokens| tokens.concat())
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.regions.iter().map(|(pos, tokens)| (*pos, tokens.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[derive(Debug, Clone)]
struct TagMatcher {
    tag: String,
    opening: Regex,
    closing: Regex,
}

impl TagMatcher {
    fn compile(tag: &str) -> Option<Self> {
        let name = regex::escape(tag);
        let opening = Regex::new(&format!(r"(?i)<{name}(\s+[^>]*)?>")).ok()?;
        let closing = Regex::new(&format!(r"(?i)</{name}(\s+[^>]*)?>")).ok()?;
        Some(Self {
            tag: tag.to_string(),
            opening,
            closing,
        })
    }

    /// Shared matcher for a default tag, or a freshly compiled one.
    fn for_tag(tag: &str) -> Option<Self> {
        DEFAULT_TAG_MATCHERS
            .iter()
            .find(|m| m.tag == tag)
            .cloned()
            .or_else(|| Self::compile(tag))
    }
}

/// Finds and collapses isolated regions for one configuration.
#[derive(Debug, Clone)]
pub struct IsolatedRegionExtractor<'a> {
    isolated_tags: &'a IsolatedTags,
    matchers: Vec<TagMatcher>,
}

impl<'a> IsolatedRegionExtractor<'a> {
    #[must_use]
    pub fn new(isolated_tags: &'a IsolatedTags) -> Self {
        let matchers = isolated_tags
            .iter()
            .filter_map(|(tag, _)| {
                let matcher = TagMatcher::for_tag(tag);
                if matcher.is_none() {
                    tracing::warn!("Ignoring isolated tag '{}': unusable tag name", tag);
                }
                matcher
            })
            .collect();

        Self {
            isolated_tags,
            matchers,
        }
    }

    /// Matchers to test: only the open region's tag while one is open.
    fn candidates(&self, current: Option<usize>) -> &[TagMatcher] {
        match current {
            Some(idx) => &self.matchers[idx..=idx],
            None => &self.matchers,
        }
    }

    fn opening_tag(&self, word: &str, current: Option<usize>) -> Option<usize> {
        let offset = current.unwrap_or(0);
        self.candidates(current)
            .iter()
            .position(|m| m.opening.is_match(word))
            .map(|idx| idx + offset)
    }

    fn is_closing_tag(&self, word: &str, current: Option<usize>) -> bool {
        self.candidates(current)
            .iter()
            .any(|m| m.closing.is_match(word))
    }

    /// Locate every top-level isolated region in `words`.
    ///
    /// Nesting is tracked for the open region's tag only. Regions that never
    /// close are not reported.
    #[must_use]
    pub fn find_regions(&self, words: &[String]) -> Vec<IsolatedRegion> {
        let mut regions = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;
        let mut current: Option<usize> = None;

        for (index, word) in words.iter().enumerate() {
            if let Some(matched) = self.opening_tag(word, current) {
                if is_self_closing_tag(word) || is_image_tag(word) {
                    if depth == 0 {
                        regions.push(IsolatedRegion {
                            start: index,
                            len: 1,
                            tag: self.matchers[matched].tag.clone(),
                        });
                        current = None;
                    }
                } else {
                    if depth == 0 {
                        start = index;
                    }
                    depth += 1;
                    current = Some(matched);
                }
            } else if depth > 0 && self.is_closing_tag(word, current) {
                depth -= 1;
                if depth == 0 {
                    if let Some(idx) = current.take() {
                        regions.push(IsolatedRegion {
                            start,
                            len: index - start + 1,
                            tag: self.matchers[idx].tag.clone(),
                        });
                    }
                }
            }
        }

        regions
    }

    /// Replace every region in `words` by its placeholder.
    ///
    /// Returns the collapsed stream and the table of original tokens keyed
    /// by the placeholder's index in the collapsed stream.
    #[must_use]
    pub fn extract(&self, words: Vec<String>) -> (Vec<String>, IsolatedRegionTable) {
        let regions = self.find_regions(&words);
        if regions.is_empty() {
            return (words, IsolatedRegionTable::default());
        }

        let mut collapsed = Vec::with_capacity(words.len());
        let mut table = IsolatedRegionTable::default();
        let mut source = words.into_iter();
        let mut pos = 0;

        for region in regions {
            collapsed.extend(source.by_ref().take(region.start - pos));
            let removed: Vec<String> = source.by_ref().take(region.len).collect();
            pos = region.start + region.len;

            match self.isolated_tags.placeholder_for(&region.tag) {
                Some(placeholder) => {
                    table.regions.insert(collapsed.len(), removed);
                    collapsed.push(placeholder.to_string());
                }
                None => collapsed.extend(removed),
            }
        }
        collapsed.extend(source);

        (collapsed, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffConfig;
    use crate::parsers::tokenize;

    fn extract(html: &str) -> (Vec<String>, IsolatedRegionTable) {
        let config = DiffConfig::default();
        let words = tokenize(html, &config);
        IsolatedRegionExtractor::new(&config.isolated_tags).extract(words)
    }

    #[test]
    fn test_link_collapses() {
        let (words, table) = extract("see <a href=\"x\">the link</a> here");
        assert_eq!(words, ["see", " ", "[[REPLACE_A]]", " ", "here"]);
        assert_eq!(table.html(2).as_deref(), Some("<a href=\"x\">the link</a>"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_image_is_single_token_region() {
        let (words, table) = extract("a <img src=\"x.png\"> b");
        assert_eq!(words, ["a", " ", "[[REPLACE_IMG]]", " ", "b"]);
        assert_eq!(table.get(2).map(<[String]>::len), Some(1));
    }

    #[test]
    fn test_nested_same_tag() {
        let (words, table) = extract("<ul><li><ul><li>x</li></ul></li></ul>after");
        assert_eq!(words, ["[[REPLACE_UNORDERED_LIST]]", "after"]);
        assert_eq!(
            table.html(0).as_deref(),
            Some("<ul><li><ul><li>x</li></ul></li></ul>")
        );
    }

    #[test]
    fn test_inner_isolated_tag_stays_inside() {
        let (words, table) = extract("<ul><li><a href=\"#\">x</a></li></ul>");
        assert_eq!(words, ["[[REPLACE_UNORDERED_LIST]]"]);
        assert!(table.html(0).unwrap_or_default().contains("<a href"));
    }

    #[test]
    fn test_unterminated_region_is_not_collapsed() {
        let (words, table) = extract("<table><tr><td>x");
        assert!(table.is_empty());
        assert_eq!(words[0], "<table>");
    }

    #[test]
    fn test_regions_keyed_by_collapsed_index() {
        let (words, table) = extract("<sup>1</sup> and <sub>2</sub>");
        assert_eq!(
            words,
            ["[[REPLACE_SUPER_SCRIPT]]", " ", "and", " ", "[[REPLACE_SUB_SCRIPT]]"]
        );
        let keys: Vec<_> = table.iter().map(|(pos, _)| pos).collect();
        assert_eq!(keys, [0, 4]);
    }

    #[test]
    fn test_case_insensitive_tags() {
        let (words, _) = extract("<TABLE><tr><td>x</td></tr></TABLE>");
        assert_eq!(words, ["[[REPLACE_TABLE]]"]);
    }

    #[test]
    fn test_default_and_custom_tags_share_one_extractor() {
        assert_eq!(DEFAULT_TAG_MATCHERS.len(), DEFAULT_ISOLATED_TAGS.len());

        let config = DiffConfig::builder()
            .isolated_tag("blockquote", "[[REPLACE_QUOTE]]")
            .unwrap()
            .build();
        let words = tokenize("<BLOCKQUOTE>q</BLOCKQUOTE> <sup>1</sup>", &config);
        let (collapsed, _) = IsolatedRegionExtractor::new(&config.isolated_tags).extract(words);
        assert_eq!(collapsed, ["[[REPLACE_QUOTE]]", " ", "[[REPLACE_SUPER_SCRIPT]]"]);
    }

    #[test]
    fn test_no_isolated_tags() {
        let config = DiffConfig::default();
        let tags = IsolatedTags::empty();
        let words = tokenize("<a href=\"x\">y</a>", &config);
        let (collapsed, table) = IsolatedRegionExtractor::new(&tags).extract(words.clone());
        assert_eq!(collapsed, words);
        assert!(table.is_empty());
    }
}
