//! HTML to word-stream tokenizer.
//!
//! Tags become single tokens verbatim. Text between tags is whitespace
//! normalized and split into words, punctuation and single whitespace
//! characters. Every `</p>` is followed by a [`PARAGRAPH_MARKER`] token.

use crate::config::{DiffConfig, DEFAULT_SPECIAL_CASE_CHARS};
use crate::model::PARAGRAPH_MARKER;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s+|\r+|\n+").expect("static regex"));

static DEFAULT_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&word_pattern(DEFAULT_SPECIAL_CASE_CHARS)).expect("default word pattern")
});

/// Build the word-splitting pattern for a set of special-case characters.
fn word_pattern(special_chars: &[char]) -> String {
    let specials: String = special_chars
        .iter()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect();

    if specials.is_empty() {
        r"\s|[a-zA-Z0-9\p{L}]+[a-zA-Z0-9\p{L}]|[^\s]".to_string()
    } else {
        format!(r"\s|[{specials}]|[a-zA-Z0-9{specials}\p{{L}}]+[a-zA-Z0-9\p{{L}}]|[^\s]")
    }
}

/// A run of input that is either one tag or a stretch of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
    Tag(&'a str),
    Text(&'a str),
}

/// Byte length of the tag starting at the head of `s`, if it is one.
///
/// A tag is `<`, at least one more character, then the nearest `>`.
fn tag_len(s: &str) -> Option<usize> {
    let mut chars = s.chars();
    if chars.next() != Some('<') {
        return None;
    }
    let first = chars.next()?;
    let body_start = 1 + first.len_utf8();
    s[body_start..].find('>').map(|pos| body_start + pos + 1)
}

/// Split `html` into tag and text runs in a single forward pass.
fn split_runs(html: &str) -> Vec<Run<'_>> {
    let bytes = html.as_bytes();
    let mut runs = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'<' {
            if let Some(len) = tag_len(&html[i..]) {
                if text_start < i {
                    runs.push(Run::Text(&html[text_start..i]));
                }
                runs.push(Run::Tag(&html[i..i + len]));
                i += len;
                text_start = i;
                continue;
            }
        }
        i += 1;
    }
    if text_start < html.len() {
        runs.push(Run::Text(&html[text_start..]));
    }

    runs
}

/// Splits HTML into the token stream the aligner works on.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    word_re: Regex,
    keep_new_lines: bool,
}

impl Tokenizer {
    /// Create a tokenizer for the given configuration.
    ///
    /// An unusable special-character set falls back to the default word
    /// pattern with a warning.
    #[must_use]
    pub fn new(config: &DiffConfig) -> Self {
        let word_re = if config.special_case_chars == DEFAULT_SPECIAL_CASE_CHARS {
            DEFAULT_WORD_RE.clone()
        } else {
            Regex::new(&word_pattern(&config.special_case_chars)).unwrap_or_else(|e| {
                tracing::warn!(
                    "Invalid special-case characters {:?}, using defaults: {}",
                    config.special_case_chars,
                    e
                );
                DEFAULT_WORD_RE.clone()
            })
        };

        Self {
            word_re,
            keep_new_lines: config.keep_new_lines,
        }
    }

    /// Tokenize `html`.
    #[must_use]
    pub fn tokenize(&self, html: &str) -> Vec<String> {
        let html = html.replace('\u{a0}', " ");
        let mut words = Vec::new();

        for run in split_runs(&html) {
            match run {
                Run::Tag(tag) => {
                    words.push(tag.to_string());
                    if tag == "</p>" {
                        words.push(PARAGRAPH_MARKER.to_string());
                    }
                }
                Run::Text(text) => {
                    let sentence = self.normalize_whitespace(text);
                    self.split_words(&sentence, &mut words);
                }
            }
        }

        words
    }

    fn split_words(&self, sentence: &str, words: &mut Vec<String>) {
        let padded = format!("{sentence} ");
        let mut found: Vec<&str> = self.word_re.find_iter(&padded).map(|m| m.as_str()).collect();
        // drop the padding space
        found.pop();
        words.extend(found.into_iter().map(str::to_string));
    }

    fn normalize_whitespace<'a>(&self, sentence: &'a str) -> Cow<'a, str> {
        if self.keep_new_lines {
            return Cow::Borrowed(sentence);
        }

        let mut sentence = WHITESPACE_RUN_RE.replace_all(sentence, " ");
        let len = sentence.chars().count();
        let is_break = |c: Option<char>| matches!(c, Some(' ' | '\r' | '\n'));

        if is_break(sentence.chars().next()) {
            sentence = Cow::Owned(format!(" {}", sentence.trim_start()));
        }
        if len > 1 && is_break(sentence.chars().last()) {
            sentence = Cow::Owned(format!("{} ", sentence.trim_end()));
        }

        sentence
    }
}

/// Tokenize `html` with a one-off [`Tokenizer`].
#[must_use]
pub fn tokenize(html: &str, config: &DiffConfig) -> Vec<String> {
    Tokenizer::new(config).tokenize(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(html: &str) -> Vec<String> {
        tokenize(html, &DiffConfig::default())
    }

    #[test]
    fn test_tags_and_words() {
        assert_eq!(
            words("<p class=\"a\">Hello world</p>"),
            ["<p class=\"a\">", "Hello", " ", "world", "</p>", "¶"]
        );
    }

    #[test]
    fn test_trailing_punctuation_is_separate() {
        assert_eq!(words("buildings."), ["buildings", "."]);
        assert_eq!(words("Sections 410.6, 410.7"), [
            "Sections", " ", "410.6", ",", " ", "410.7"
        ]);
    }

    #[test]
    fn test_apostrophe_binds() {
        assert_eq!(words("this's it"), ["this's", " ", "it"]);
    }

    #[test]
    fn test_unicode_letters() {
        assert_eq!(words("naïve café"), ["naïve", " ", "café"]);
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(words("a  \n b"), ["a", " ", "b"]);
        assert_eq!(words("\n\nlead"), [" ", "lead"]);
        assert_eq!(words("trail \n"), ["trail", " "]);
    }

    #[test]
    fn test_keep_new_lines() {
        let config = DiffConfig::builder().keep_new_lines(true).build();
        assert_eq!(tokenize("a\nb", &config), ["a", "\n", "b"]);
    }

    #[test]
    fn test_nbsp_is_space() {
        assert_eq!(words("a\u{a0}b"), ["a", " ", "b"]);
    }

    #[test]
    fn test_stray_angle_bracket_is_text() {
        assert_eq!(words("1 < 2"), ["1", " ", "<", " ", "2"]);
        assert_eq!(words("x<"), ["x", "<"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(words("").is_empty());
    }

    #[test]
    fn test_paragraph_marker_only_after_plain_close() {
        assert_eq!(words("</P>"), ["</P>"]);
        assert_eq!(words("</p>"), ["</p>", "¶"]);
    }

    #[test]
    fn test_custom_special_chars() {
        let config = DiffConfig::builder().special_case_chars(['-']).build();
        assert_eq!(tokenize("well-known.", &config), ["well-known", "."]);
        assert_eq!(words("well-known"), ["well", "-", "known"]);
    }

    #[test]
    fn test_empty_special_chars() {
        let config = DiffConfig::builder().special_case_chars([]).build();
        assert_eq!(tokenize("410.6", &config), ["410", ".", "6"]);
    }

    #[test]
    fn test_default_config_shares_word_pattern() {
        let tokenizer = Tokenizer::new(&DiffConfig::default());
        assert_eq!(tokenizer.word_re.as_str(), DEFAULT_WORD_RE.as_str());

        let custom = Tokenizer::new(&DiffConfig::builder().special_case_chars(['-']).build());
        assert_ne!(custom.word_re.as_str(), DEFAULT_WORD_RE.as_str());
    }

    #[test]
    fn test_split_runs() {
        assert_eq!(
            split_runs("a<b>c"),
            [Run::Text("a"), Run::Tag("<b>"), Run::Text("c")]
        );
        assert_eq!(split_runs("<>x>"), [Run::Tag("<>x>")]);
    }
}
