//! Item-level diff of HTML lists.
//!
//! The first `ul`, `ol` or `dl` in each input is parsed into a tree and its
//! element children are aligned with a fuzzy [`ListItemMatcher`]. Items the
//! matcher pairs are word-diffed against each other; unpaired runs become
//! added, deleted or changed items. The result is the new list element with
//! its children replaced by the annotated items.

use super::aligner::longest_common_subsequence;
use super::result::{DiffReport, DiffSummary, ListSummary};
use super::words::diff_words;
use crate::config::DiffConfig;
use crate::error::{HtmlDiffError, Result};
use crate::html::dom::{
    append_class, element_children, find_first, inner_html, outer_html, parse_document,
    set_inner_html, tag_name, wrap_children,
};
use crate::matching::ListItemMatcher;
use crate::model::{ListOperation, ListOperationKind};
use kuchiki::NodeRef;

/// Elements treated as lists, in selector form.
pub const LIST_SELECTOR: &str = "ul, ol, dl";

/// Item content kept in the matching text, wrapped in bare tags.
const LIST_CONTENT_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "pre", "div", "br", "hr", "code", "input", "form", "img",
    "span", "a", "i", "b", "strong", "em", "font", "big", "del", "tt", "sub", "sup", "strike",
];

const CLASS_ITEM_UNCHANGED: &str = "normal";
const CLASS_ITEM_ADDED: &str = "normal new";
const CLASS_ITEM_DELETED: &str = "removed";
const CLASS_ITEM_REPLACEMENT: &str = "replacement";
const CLASS_LIST: &str = "diff-list";

// ============================================================================
// Item text and operations
// ============================================================================

/// Text an item is matched on: its text, plus the markup of childless
/// children and of allow-listed inline and block elements.
pub fn line_text(node: &NodeRef) -> Result<String> {
    if node.first_child().is_none() {
        return Ok(node.text_contents());
    }

    let mut output = String::new();
    for child in node.children() {
        if child.first_child().is_none() {
            output.push_str(&outer_html(&child)?);
            continue;
        }
        if let Some(name) = tag_name(&child).filter(|name| LIST_CONTENT_TAGS.contains(&name.as_str())) {
            output.push_str(&format!("<{name}>{}</{name}>", line_text(&child)?));
        }
    }
    Ok(output)
}

/// Turn 1-based matched item pairs into item operations.
///
/// Gaps between consecutive pairs (and before the implicit pair
/// `(old_len + 1, new_len + 1)`) become `Changed` when both sides skip
/// items, otherwise `Added` or `Deleted`.
#[must_use]
pub fn list_operations(matches: &[(usize, usize)], old_len: usize, new_len: usize) -> Vec<ListOperation> {
    let terminal = (old_len + 1, new_len + 1);
    let mut operations = Vec::new();
    let mut current_in_old = 0;
    let mut current_in_new = 0;

    for &(match_in_old, match_in_new) in matches.iter().chain(std::iter::once(&terminal)) {
        let next_in_old = current_in_old + 1;
        let next_in_new = current_in_new + 1;

        let operation = if match_in_new > next_in_new && match_in_old > next_in_old {
            Some(ListOperation::new(
                ListOperationKind::Changed,
                next_in_old,
                match_in_old - 1,
                next_in_new,
                match_in_new - 1,
            ))
        } else if match_in_new > next_in_new && match_in_old == next_in_old {
            Some(ListOperation::new(
                ListOperationKind::Added,
                current_in_old,
                current_in_old,
                next_in_new,
                match_in_new - 1,
            ))
        } else if match_in_new == next_in_new && match_in_old > next_in_old {
            Some(ListOperation::new(
                ListOperationKind::Deleted,
                next_in_old,
                match_in_old - 1,
                current_in_new,
                current_in_new,
            ))
        } else {
            None
        };
        operations.extend(operation);

        current_in_old = match_in_old;
        current_in_new = match_in_new;
    }

    operations
}

// ============================================================================
// List diff
// ============================================================================

/// List diff bound to one configuration.
#[derive(Debug, Clone)]
pub struct ListDiff<'a> {
    config: &'a DiffConfig,
    matcher: ListItemMatcher,
}

impl<'a> ListDiff<'a> {
    #[must_use]
    pub fn new(config: &'a DiffConfig) -> Self {
        Self {
            config,
            matcher: ListItemMatcher::new(config.list_matching.clone()),
        }
    }

    /// Diff the first list of `old` against the first list of `new`.
    ///
    /// Fails when either input has no list element.
    pub fn report(&self, old: &str, new: &str) -> Result<DiffReport> {
        let new_document = parse_document(new);
        let old_document = parse_document(old);

        let new_list = find_first(&new_document, LIST_SELECTOR)?
            .ok_or_else(|| HtmlDiffError::missing_list_node("new input"))?;
        let old_list = find_first(&old_document, LIST_SELECTOR)?
            .ok_or_else(|| HtmlDiffError::missing_list_node("old input"))?;

        let old_items = element_children(&old_list);
        let new_items = element_children(&new_list);

        let old_text = old_items.iter().map(line_text).collect::<Result<Vec<_>>>()?;
        let new_text = new_items.iter().map(line_text).collect::<Result<Vec<_>>>()?;

        let matches = longest_common_subsequence(&old_text, &new_text, &self.matcher);
        let operations = list_operations(&matches, old_items.len(), new_items.len());

        tracing::debug!(
            old_items = old_items.len(),
            new_items = new_items.len(),
            matched = matches.len(),
            operations = operations.len(),
            "Aligned list items"
        );

        let output = self.render_items(&operations, &old_items, &new_items)?;
        set_inner_html(&new_list, &output)?;
        append_class(&new_list, CLASS_LIST);

        let mut summary = ListSummary {
            old_items: old_items.len(),
            new_items: new_items.len(),
            unchanged: matches.len(),
            ..ListSummary::default()
        };
        for op in &operations {
            match op.kind {
                ListOperationKind::Added => summary.added += op.new_len(),
                ListOperationKind::Deleted => summary.deleted += op.old_len(),
                ListOperationKind::Changed => summary.changed += op.old_len(),
            }
        }

        Ok(DiffReport {
            html: outer_html(&new_list)?,
            summary: DiffSummary::List(summary),
        })
    }

    fn render_items(
        &self,
        operations: &[ListOperation],
        old_items: &[NodeRef],
        new_items: &[NodeRef],
    ) -> Result<String> {
        let mut output = String::new();
        let mut index_in_old = 0;
        let mut index_in_new = 0;
        let mut last_kind: Option<ListOperationKind> = None;

        for op in operations {
            let mut replaced = false;

            loop {
                let old_bound = match op.kind {
                    ListOperationKind::Added => index_in_old,
                    _ => index_in_old + 1,
                };
                if op.start_in_old <= old_bound {
                    break;
                }
                let Some(item) = old_items.get(index_in_old) else {
                    break;
                };

                let new_bound = match op.kind {
                    ListOperationKind::Deleted => index_in_new,
                    _ => index_in_new + 1,
                };
                let paired = if op.start_in_new > new_bound {
                    new_items.get(index_in_new)
                } else {
                    None
                };

                let replacement = last_kind == Some(ListOperationKind::Deleted) && !replaced;
                replaced |= replacement;
                output.push_str(&self.pass_through(item, paired, replacement)?);

                if paired.is_some() {
                    index_in_new += 1;
                }
                index_in_old += 1;
            }

            match op.kind {
                ListOperationKind::Added => {
                    for item in items_in(new_items, op.start_in_new, op.end_in_new) {
                        output.push_str(&add_item(item, false)?);
                    }
                    index_in_new = op.end_in_new;
                }
                ListOperationKind::Deleted => {
                    for item in items_in(old_items, op.start_in_old, op.end_in_old) {
                        output.push_str(&delete_item(item)?);
                    }
                    index_in_old = op.end_in_old;
                }
                ListOperationKind::Changed => {
                    let deleted = items_in(old_items, op.start_in_old, op.end_in_old);
                    let paired_count = deleted.len();
                    for item in deleted {
                        output.push_str(&delete_item(item)?);
                    }
                    for (offset, item) in items_in(new_items, op.start_in_new, op.end_in_new)
                        .iter()
                        .enumerate()
                    {
                        output.push_str(&add_item(item, offset < paired_count)?);
                    }
                    index_in_old = op.end_in_old;
                    index_in_new = op.end_in_new;
                }
            }

            last_kind = Some(op.kind);
        }

        // Every item after a trailing deletion is flagged, not just the first.
        let replacement = last_kind == Some(ListOperationKind::Deleted);
        while let Some(item) = old_items.get(index_in_old) {
            let paired = new_items.get(index_in_new);
            output.push_str(&self.pass_through(item, paired, replacement)?);

            if paired.is_some() {
                index_in_new += 1;
            }
            index_in_old += 1;
        }

        Ok(output)
    }

    /// Emit an old item, word-diffed against its paired new item.
    fn pass_through(&self, item: &NodeRef, paired: Option<&NodeRef>, replacement: bool) -> Result<String> {
        if let Some(new_item) = paired {
            let diffed = diff_words(&inner_html(item)?, &inner_html(new_item)?, self.config);
            set_inner_html(item, &diffed)?;
        }

        let class = if replacement {
            CLASS_ITEM_REPLACEMENT
        } else {
            CLASS_ITEM_UNCHANGED
        };
        append_class(item, class);
        outer_html(item)
    }
}

/// Items at 1-based inclusive positions `start..=end`, clamped to the list.
fn items_in(items: &[NodeRef], start: usize, end: usize) -> &[NodeRef] {
    let from = start.saturating_sub(1).min(items.len());
    let to = end.min(items.len()).max(from);
    &items[from..to]
}

fn delete_item(item: &NodeRef) -> Result<String> {
    wrap_children(item, "del")?;
    append_class(item, CLASS_ITEM_DELETED);
    outer_html(item)
}

fn add_item(item: &NodeRef, replacement: bool) -> Result<String> {
    wrap_children(item, "ins")?;
    append_class(
        item,
        if replacement {
            CLASS_ITEM_REPLACEMENT
        } else {
            CLASS_ITEM_ADDED
        },
    );
    outer_html(item)
}

/// Diff the first list in `old` against the first list in `new`.
///
/// # Errors
///
/// Returns [`HtmlDiffError::List`] when either input has no `ul`, `ol` or
/// `dl` element.
///
/// # Examples
///
/// ```
/// use html_diff_tools::{diff_list, DiffConfig};
///
/// let html = diff_list(
///     "<ul><li>Milk</li></ul>",
///     "<ul><li>Milk</li><li>Bread</li></ul>",
///     &DiffConfig::default(),
/// )?;
/// assert_eq!(
///     html,
///     "<ul class=\"diff-list\"><li class=\"normal\">Milk</li><li class=\"normal new\"><ins>Bread</ins></li></ul>"
/// );
/// # Ok::<(), html_diff_tools::error::HtmlDiffError>(())
/// ```
pub fn diff_list(old: &str, new: &str, config: &DiffConfig) -> Result<String> {
    ListDiff::new(config).report(old, new).map(|report| report.html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(old: &str, new: &str) -> String {
        diff_list(old, new, &DiffConfig::default()).unwrap()
    }

    #[test]
    fn test_operations_changed_then_added() {
        let ops = list_operations(&[(1, 1), (3, 3)], 3, 4);
        assert_eq!(
            ops,
            [
                ListOperation::new(ListOperationKind::Changed, 2, 2, 2, 2),
                ListOperation::new(ListOperationKind::Added, 3, 3, 4, 4),
            ]
        );
    }

    #[test]
    fn test_operations_deleted_and_leading_added() {
        assert_eq!(
            list_operations(&[(1, 1), (3, 2)], 3, 2),
            [ListOperation::new(ListOperationKind::Deleted, 2, 2, 1, 1)]
        );
        assert_eq!(
            list_operations(&[(1, 2)], 1, 2),
            [ListOperation::new(ListOperationKind::Added, 0, 0, 1, 1)]
        );
    }

    #[test]
    fn test_operations_no_matches() {
        assert_eq!(
            list_operations(&[], 2, 1),
            [ListOperation::new(ListOperationKind::Changed, 1, 2, 1, 1)]
        );
        assert!(list_operations(&[], 0, 0).is_empty());
    }

    #[test]
    fn test_line_text_keeps_allowed_markup() {
        let document = parse_document("<ul><li>Read <b>this</b> <p>skip</p><br></li></ul>");
        let list = find_first(&document, LIST_SELECTOR).unwrap().unwrap();
        let item = &element_children(&list)[0];
        assert_eq!(line_text(item).unwrap(), "Read <b>this</b> <br>");
    }

    #[test]
    fn test_identical_lists() {
        assert_eq!(
            diff("<ol><li>a</li><li>b</li></ol>", "<ol><li>a</li><li>b</li></ol>"),
            "<ol class=\"diff-list\"><li class=\"normal\">a</li><li class=\"normal\">b</li></ol>"
        );
    }

    #[test]
    fn test_changed_and_added_items() {
        assert_eq!(
            diff(
                "<ul><li>Apple</li><li>Banana</li><li>Cherry</li></ul>",
                "<ul><li>Apple</li><li>Kiwi fruit</li><li>Cherry</li><li>Date</li></ul>",
            ),
            "<ul class=\"diff-list\">\
             <li class=\"normal\">Apple</li>\
             <li class=\"removed\"><del>Banana</del></li>\
             <li class=\"replacement\"><ins>Kiwi fruit</ins></li>\
             <li class=\"normal\">Cherry</li>\
             <li class=\"normal new\"><ins>Date</ins></li>\
             </ul>"
        );
    }

    #[test]
    fn test_deleted_item_marks_next_as_replacement() {
        assert_eq!(
            diff(
                "<ul><li>Apple</li><li>Banana</li><li>Cherry</li></ul>",
                "<ul><li>Apple</li><li>Cherry</li></ul>",
            ),
            "<ul class=\"diff-list\">\
             <li class=\"normal\">Apple</li>\
             <li class=\"removed\"><del>Banana</del></li>\
             <li class=\"replacement\">Cherry</li>\
             </ul>"
        );
    }

    #[test]
    fn test_items_after_last_deletion_are_all_replacements() {
        assert_eq!(
            diff(
                "<ul><li>Apple</li><li>Banana</li><li>Cherry</li><li>Date</li></ul>",
                "<ul><li>Apple</li><li>Cherry</li><li>Date</li></ul>",
            ),
            "<ul class=\"diff-list\">\
             <li class=\"normal\">Apple</li>\
             <li class=\"removed\"><del>Banana</del></li>\
             <li class=\"replacement\">Cherry</li>\
             <li class=\"replacement\">Date</li>\
             </ul>"
        );
    }

    #[test]
    fn test_only_first_item_between_operations_is_a_replacement() {
        assert_eq!(
            diff(
                "<ul><li>Apple</li><li>Banana</li><li>Cherry</li><li>Date</li></ul>",
                "<ul><li>Apple</li><li>Cherry</li><li>Date</li><li>Elderberry</li></ul>",
            ),
            "<ul class=\"diff-list\">\
             <li class=\"normal\">Apple</li>\
             <li class=\"removed\"><del>Banana</del></li>\
             <li class=\"replacement\">Cherry</li>\
             <li class=\"normal\">Date</li>\
             <li class=\"normal new\"><ins>Elderberry</ins></li>\
             </ul>"
        );
    }

    #[test]
    fn test_paired_items_are_word_diffed() {
        assert_eq!(
            diff(
                "<ul><li>Install the package</li></ul>",
                "<ul><li>Install the packages</li></ul>",
            ),
            "<ul class=\"diff-list\"><li class=\"normal\">Install the \
             <del class=\"diffmod\">package</del><ins class=\"diffmod\">packages</ins></li></ul>"
        );
    }

    #[test]
    fn test_existing_classes_are_kept() {
        let html = diff(
            "<ul class=\"steps\"><li class=\"step\">a</li></ul>",
            "<ul class=\"steps\"><li class=\"step\">a</li></ul>",
        );
        assert_eq!(
            html,
            "<ul class=\"steps diff-list\"><li class=\"step normal\">a</li></ul>"
        );
    }

    #[test]
    fn test_missing_list_is_an_error() {
        let err = diff_list("<p>x</p>", "<ul><li>x</li></ul>", &DiffConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "List diff failed: old input");
        assert!(diff_list("<ul></ul>", "no list", &DiffConfig::default()).is_err());
    }

    #[test]
    fn test_summary_counts_items() {
        let config = DiffConfig::default();
        let report = ListDiff::new(&config)
            .report(
                "<ul><li>Apple</li><li>Banana</li></ul>",
                "<ul><li>Apple</li><li>Banana</li><li>Cherry</li></ul>",
            )
            .unwrap();
        let DiffSummary::List(summary) = report.summary else {
            panic!("expected list summary");
        };
        assert_eq!(summary.unchanged, 2);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.deleted + summary.changed, 0);
    }

    #[test]
    fn test_items_in_clamps() {
        let document = parse_document("<ul><li>a</li><li>b</li></ul>");
        let list = find_first(&document, LIST_SELECTOR).unwrap().unwrap();
        let items = element_children(&list);
        assert_eq!(items_in(&items, 1, 2).len(), 2);
        assert_eq!(items_in(&items, 2, 5).len(), 1);
        assert!(items_in(&items, 4, 5).is_empty());
    }
}
