//! Tree helpers over `kuchikiki` used by the list diff.

use super::escape::encode_numeric_entities;
use crate::error::{HtmlDiffError, ListErrorKind, Result};
use kuchiki::traits::TendrilSink;
use kuchiki::NodeRef;

/// Parse a complete document. Non-ASCII text is entity-encoded first.
#[must_use]
pub fn parse_document(html: &str) -> NodeRef {
    kuchiki::parse_html().one(encode_numeric_entities(html))
}

/// First element under `root` matching `selector`, in document order.
pub fn find_first(root: &NodeRef, selector: &str) -> Result<Option<NodeRef>> {
    let mut matches = root.select(selector).map_err(|()| {
        HtmlDiffError::list("selecting list node", ListErrorKind::InvalidSelector(selector.to_string()))
    })?;
    Ok(matches.next().map(|element| element.as_node().clone()))
}

/// Element children of `node`, skipping text and comments.
#[must_use]
pub fn element_children(node: &NodeRef) -> Vec<NodeRef> {
    node.children()
        .filter(|child| child.as_element().is_some())
        .collect()
}

/// Lowercase tag name, or `None` for non-element nodes.
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.as_element()
        .map(|element| element.name.local.to_string().to_ascii_lowercase())
}

/// Serialized markup of `node` itself.
pub fn outer_html(node: &NodeRef) -> Result<String> {
    let mut output = Vec::new();
    node.serialize(&mut output)?;
    String::from_utf8(output)
        .map_err(|_| HtmlDiffError::list("serializing node", ListErrorKind::NonUtf8Markup))
}

/// Serialized markup of the children of `node`.
pub fn inner_html(node: &NodeRef) -> Result<String> {
    node.children().try_fold(String::new(), |mut html, child| {
        html.push_str(&outer_html(&child)?);
        Ok(html)
    })
}

/// Replace the children of `node` by the nodes parsed from `html`.
pub fn set_inner_html(node: &NodeRef, html: &str) -> Result<()> {
    let document = parse_document(&format!("<body>{html}</body>"));
    let body = find_first(&document, "body")?.unwrap_or(document);

    for child in node.children().collect::<Vec<_>>() {
        child.detach();
    }
    for child in body.children().collect::<Vec<_>>() {
        node.append(child);
    }
    Ok(())
}

/// Move all children of `node` into a new `tag` element appended to it.
pub fn wrap_children(node: &NodeRef, tag: &str) -> Result<()> {
    let fragment = parse_document(&format!("<{tag}></{tag}>"));
    let Some(wrapper) = find_first(&fragment, tag)? else {
        return Err(HtmlDiffError::list(
            "creating wrapper element",
            ListErrorKind::InvalidSelector(tag.to_string()),
        ));
    };
    wrapper.detach();

    for child in node.children().collect::<Vec<_>>() {
        wrapper.append(child);
    }
    node.append(wrapper);
    Ok(())
}

/// Add `class` to the element's class attribute.
pub fn append_class(node: &NodeRef, class: &str) {
    let Some(element) = node.as_element() else {
        return;
    };
    let mut attributes = element.attributes.borrow_mut();
    let value = match attributes.get("class") {
        Some(existing) if !existing.trim().is_empty() => format!("{existing} {class}"),
        _ => class.to_string(),
    };
    attributes.insert("class", value);
}
