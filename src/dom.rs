//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate shared by every pipeline stage:
//! parsing and cloning documents, tag and attribute access on raw nodes,
//! and the collapsed-text measurements the scoring and acceptance gates use.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

use crate::patterns::WHITESPACE_NORMALIZE;

/// Elements whose text never reaches the reader.
const INVISIBLE_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

// === Parsing ===

/// Parse HTML string into document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Deep-clone a document by re-parsing its serialized form.
///
/// The clone shares no nodes with the original, so destructive edits on it
/// never reach the source tree.
#[must_use]
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

// === Tag/Node Information ===

/// Get tag name (lowercase) of the first node in a selection.
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes().first().and_then(|node| node_tag(node))
}

/// Get tag name (lowercase) of an element node.
#[must_use]
pub fn node_tag(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Check whether an element node has the given tag.
#[must_use]
pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    node_tag(node).is_some_and(|t| t == tag)
}

/// Get an attribute value, treating blank values as absent.
#[must_use]
pub fn non_empty_attr(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get all attributes as key-value pairs, in source order.
#[must_use]
pub fn get_all_attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}

/// Walk up from `node` (inclusive) to the first element matching `selector`.
#[must_use]
pub fn closest<'a>(node: &NodeRef<'a>, selector: &str) -> Option<NodeRef<'a>> {
    let mut current = Some(*node);
    while let Some(n) = current {
        if n.is_element() && Selection::from(n).is(selector) {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

/// Check whether `node` is `ancestor` or sits somewhere below it.
#[must_use]
pub fn is_inclusive_descendant(node: &NodeRef, ancestor: NodeId) -> bool {
    let mut current = Some(*node);
    while let Some(n) = current {
        if n.id == ancestor {
            return true;
        }
        current = n.parent();
    }
    false
}

// === Text Content ===

/// Text a reader would see: descendant text minus script/style/noscript/template.
#[must_use]
pub fn visible_text(node: &NodeRef) -> String {
    let mut out = String::new();
    push_visible_text(node, &mut out);
    out
}

fn push_visible_text(node: &NodeRef, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(&child.text());
        } else if child.is_element() {
            let hidden = node_tag(&child).is_some_and(|t| INVISIBLE_TEXT_TAGS.contains(&t.as_str()));
            if !hidden {
                push_visible_text(&child, out);
            }
        }
    }
}

/// Number of non-whitespace characters in a string.
#[inline]
#[must_use]
pub fn collapsed_len(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Number of non-whitespace characters of visible text under a node.
#[must_use]
pub fn collapsed_text_length(node: &NodeRef) -> usize {
    collapsed_len(&visible_text(node))
}

/// Collapse whitespace runs to single spaces and trim.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}

// === Serialization ===

/// Escape text for use in element content or a double-quoted attribute.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Serialize a node the way it would appear in its parent's inner HTML.
#[must_use]
pub fn node_html(node: &NodeRef) -> String {
    if node.is_element() {
        node.html().to_string()
    } else if node.is_text() {
        escape_html(&node.text())
    } else {
        String::new()
    }
}
