//! Word-level HTML diff.
//!
//! [`analyze_words`] tokenizes both inputs, collapses isolated regions,
//! aligns the token streams and classifies the gaps. [`WordAlignment::render`]
//! then walks the operations and rebuilds annotated HTML:
//!
//! - equal spans are copied from the new side, with isolated placeholders
//!   expanded into a recursive sub-diff
//! - deleted spans are wrapped in `<del>`, inserted spans in `<ins>`
//! - a replacement emits its deletion followed by its insertion
//!
//! Paragraph markers (`¶`) let the renderer show merged and split
//! paragraphs. They never survive into equal content.

use super::aligner::BlockAligner;
use super::classifier::classify_operations;
use super::isolated::diff_isolated_at;
use super::result::WordSummary;
use crate::config::DiffConfig;
use crate::model::{Operation, OperationKind, TokenKind, PARAGRAPH_MARKER};
use crate::parsers::{IsolatedRegionExtractor, IsolatedRegionTable, Tokenizer};

/// Class for deletions outside a replacement.
pub const CLASS_DELETED: &str = "diffdel";
/// Class for insertions outside a replacement.
pub const CLASS_INSERTED: &str = "diffins";
/// Class for both halves of a replacement.
pub const CLASS_MODIFIED: &str = "diffmod";

/// Token streams and operations for one pair of inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordAlignment {
    pub old_tokens: Vec<String>,
    pub new_tokens: Vec<String>,
    pub old_regions: IsolatedRegionTable,
    pub new_regions: IsolatedRegionTable,
    pub operations: Vec<Operation>,
}

impl WordAlignment {
    /// Operation counts.
    #[must_use]
    pub fn summary(&self) -> WordSummary {
        let mut summary = WordSummary {
            old_tokens: self.old_tokens.len(),
            new_tokens: self.new_tokens.len(),
            ..WordSummary::default()
        };
        for op in &self.operations {
            match op.kind {
                OperationKind::Equal => summary.equal += 1,
                OperationKind::Insert => summary.inserted += 1,
                OperationKind::Delete => summary.deleted += 1,
                OperationKind::Replace => summary.replaced += 1,
            }
        }
        summary
    }

    /// Render the annotated HTML.
    #[must_use]
    pub fn render(&self, config: &DiffConfig) -> String {
        self.render_at(config, 0)
    }

    /// Render at `depth` levels of isolated-region nesting.
    pub(crate) fn render_at(&self, config: &DiffConfig, depth: usize) -> String {
        let mut renderer = WordDiff {
            config,
            alignment: self,
            depth,
            content: String::new(),
            paragraph_rewrite_from: None,
        };
        for op in &self.operations {
            renderer.perform(op);
        }
        renderer.rewrite_paragraph_markers();
        renderer.content
    }
}

/// Tokenize, collapse and align `old` against `new`.
#[must_use]
pub fn analyze_words(old: &str, new: &str, config: &DiffConfig) -> WordAlignment {
    let tokenizer = Tokenizer::new(config);
    let extractor = IsolatedRegionExtractor::new(&config.isolated_tags);

    let (old_tokens, old_regions) = extractor.extract(tokenizer.tokenize(old));
    let (new_tokens, new_regions) = extractor.extract(tokenizer.tokenize(new));

    let blocks = BlockAligner::new(&old_tokens, &new_tokens, config.group_diffs).matching_blocks();
    let operations = classify_operations(&blocks, old_tokens.len(), new_tokens.len());

    tracing::debug!(
        old_tokens = old_tokens.len(),
        new_tokens = new_tokens.len(),
        old_regions = old_regions.len(),
        new_regions = new_regions.len(),
        blocks = blocks.len(),
        operations = operations.len(),
        "Aligned word streams"
    );

    WordAlignment {
        old_tokens,
        new_tokens,
        old_regions,
        new_regions,
        operations,
    }
}

/// Diff two HTML fragments word by word.
///
/// Identical inputs are returned unchanged without tokenizing.
///
/// # Examples
///
/// ```
/// use html_diff_tools::{diff_words, DiffConfig};
///
/// let html = diff_words("<p>one two</p>", "<p>one three</p>", &DiffConfig::default());
/// assert_eq!(
///     html,
///     "<p>one <del class=\"diffmod\">two</del><ins class=\"diffmod\">three</ins></p>"
/// );
/// ```
#[must_use]
pub fn diff_words(old: &str, new: &str, config: &DiffConfig) -> String {
    diff_words_at(old, new, config, 0)
}

/// [`diff_words`] for the content of a region nested `depth` levels deep.
pub(crate) fn diff_words_at(old: &str, new: &str, config: &DiffConfig, depth: usize) -> String {
    if old == new {
        return new.to_string();
    }
    analyze_words(old, new, config).render_at(config, depth)
}

/// Wrap `text` in a `tag` element with `class`.
///
/// Whitespace-only text yields nothing unless `space_matching` is set.
#[must_use]
pub fn wrap_text(text: &str, tag: &str, class: &str, space_matching: bool) -> String {
    if !space_matching && text.trim().is_empty() {
        return String::new();
    }
    format!("<{tag} class=\"{class}\">{text}</{tag}>")
}

/// Insert `diffmod` into an opening tag's class attribute.
fn add_modified_class(tag: &str) -> String {
    if tag.contains("class=") {
        tag.replacen("class=\"", "class=\"diffmod ", 1)
    } else if tag.contains("/>") {
        tag.replacen("/>", " class=\"diffmod\" />", 1)
    } else {
        tag.replacen('>', " class=\"diffmod\">", 1)
    }
}

struct WordDiff<'a> {
    config: &'a DiffConfig,
    alignment: &'a WordAlignment,
    /// Isolated regions enclosing the content being rendered
    depth: usize,
    content: String,
    /// Output offset of the last deletion, while no equal or insert followed
    paragraph_rewrite_from: Option<usize>,
}

impl WordDiff<'_> {
    fn perform(&mut self, op: &Operation) {
        match op.kind {
            OperationKind::Equal => self.equal(op),
            OperationKind::Delete => self.delete(op, CLASS_DELETED),
            OperationKind::Insert => self.insert(op, CLASS_INSERTED),
            OperationKind::Replace => {
                self.delete(op, CLASS_MODIFIED);
                self.insert(op, CLASS_MODIFIED);
            }
        }
    }

    fn kind(&self, token: &str) -> TokenKind {
        TokenKind::classify(token, &self.config.isolated_tags)
    }

    /// Expanded region tokens when `token` is a placeholder recorded at `pos`.
    fn region<'t>(&self, table: &'t IsolatedRegionTable, token: &str, pos: usize) -> Option<&'t [String]> {
        match self.kind(token) {
            TokenKind::Placeholder => table.get(pos),
            _ => None,
        }
    }

    fn equal(&mut self, op: &Operation) {
        let new_tokens = &self.alignment.new_tokens;
        let mut result: Vec<String> = Vec::with_capacity(op.new_range().len());

        for pos in op.new_range() {
            let token = &new_tokens[pos];
            if let Some(new_region) = self.region(&self.alignment.new_regions, token, pos) {
                result.push(self.diff_placeholder(op, pos, token, new_region));
            } else if token == PARAGRAPH_MARKER {
                let between_paragraphs = pos > op.start_in_new
                    && new_tokens[pos - 1] == "</p>"
                    && pos + 1 < op.end_in_new
                    && new_tokens[pos + 1].starts_with("<p>");
                if between_paragraphs {
                    result.push("<br>".to_string());
                }
            } else {
                result.push(token.clone());
            }
        }

        let closes_paragraph = match result.as_slice() {
            [first, ..] if first == "</p>" => true,
            [first, second, ..] => first == "." && second == "</p>",
            _ => false,
        };
        if closes_paragraph {
            self.rewrite_paragraph_markers();
        }

        self.paragraph_rewrite_from = None;
        self.content.push_str(&result.concat());
    }

    fn diff_placeholder(&self, op: &Operation, pos: usize, placeholder: &str, new_region: &[String]) -> String {
        let old_pos = op.start_in_old + (pos - op.start_in_new);
        let old_html = match self.alignment.old_regions.get(old_pos) {
            Some(tokens) => tokens.concat(),
            None => {
                tracing::warn!(
                    "No isolated region recorded at old position {} for {}",
                    old_pos,
                    placeholder
                );
                self.alignment
                    .old_tokens
                    .get(old_pos)
                    .cloned()
                    .unwrap_or_default()
            }
        };
        diff_isolated_at(
            &old_html,
            &new_region.concat(),
            placeholder,
            self.config,
            self.depth + 1,
        )
    }

    fn delete(&mut self, op: &Operation, class: &str) {
        let mut text: Vec<String> = Vec::new();
        let mut merge_indexes = Vec::new();

        for pos in op.old_range() {
            let token = &self.alignment.old_tokens[pos];
            if let Some(region) = self.region(&self.alignment.old_regions, token, pos) {
                text.extend(region.iter().cloned());
            } else {
                if token == PARAGRAPH_MARKER {
                    merge_indexes.push(text.len());
                }
                text.push(token.clone());
            }
        }

        // A deleted paragraph break drops the tags around its marker.
        for &index in merge_indexes.iter().rev() {
            if index > 0 && index + 1 < text.len() {
                text.remove(index + 1);
                text.remove(index - 1);
            }
        }

        self.paragraph_rewrite_from = Some(self.content.len());
        self.insert_tag("del", class, &text);
    }

    fn insert(&mut self, op: &Operation, class: &str) {
        self.paragraph_rewrite_from = None;
        let mut text: Vec<String> = Vec::new();
        let mut split_indexes = Vec::new();

        for pos in op.new_range() {
            let token = &self.alignment.new_tokens[pos];
            if let Some(region) = self.region(&self.alignment.new_regions, token, pos) {
                text.extend(region.iter().cloned());
            } else if token == PARAGRAPH_MARKER {
                split_indexes.push(text.len());
                text.push(wrap_text(token, "ins", class, self.config.space_matching));
            } else {
                text.push(token.clone());
            }
        }

        // An inserted paragraph break shows before the closing tag it follows.
        for &index in split_indexes.iter().rev() {
            if index > 0 && index + 1 < text.len() {
                text.swap(index - 1, index);
            }
        }

        self.insert_tag("ins", class, &text);
    }

    /// Emit `words`, wrapping text runs and flagging the first opening tag
    /// of each tag run.
    fn insert_tag(&mut self, tag: &str, class: &str, words: &[String]) {
        let space_matching = self.config.space_matching;
        let mut rest = words;

        while !rest.is_empty() {
            let text_len = rest
                .iter()
                .position(|w| self.kind(w).is_tag())
                .unwrap_or(rest.len());
            let (text, tail) = rest.split_at(text_len);
            if !text.is_empty() {
                self.content
                    .push_str(&wrap_text(&text.concat(), tag, class, space_matching));
            }
            if tail.is_empty() {
                break;
            }

            let tags_len = tail
                .iter()
                .position(|w| !self.kind(w).is_tag())
                .unwrap_or(tail.len());
            let (tags, tail) = tail.split_at(tags_len);
            rest = tail;

            let Some((first, others)) = tags.split_first() else {
                continue;
            };
            let first = match self.kind(first) {
                TokenKind::OpeningTag | TokenKind::SelfClosingTag => add_modified_class(first),
                _ => first.clone(),
            };
            let run = format!("{first}{}", others.concat());

            if first.to_lowercase().contains("<img") {
                self.content
                    .push_str(&wrap_text(&run, tag, class, space_matching));
            } else {
                self.content.push_str(&run);
            }
        }
    }

    /// Turn markers left by the last deletion into line breaks.
    fn rewrite_paragraph_markers(&mut self) {
        let Some(from) = self.paragraph_rewrite_from else {
            return;
        };
        if let Some(tail) = self.content.get(from..) {
            if tail.contains(PARAGRAPH_MARKER) {
                let rewritten = tail.replace(PARAGRAPH_MARKER, "<br><br>");
                self.content.truncate(from);
                self.content.push_str(&rewritten);
            }
        }
    }
}
