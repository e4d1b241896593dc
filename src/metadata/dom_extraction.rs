//! DOM-based Metadata Extraction
//!
//! Author and date signals found in the page body, and removal of the
//! byline they came from so it is not shown twice.

use dom_query::{NodeRef, Selection};
use url::Url;

use crate::dom;
use crate::patterns::{is_script_url, BYLINE_PREFIX, BYLINE_WORD};
use crate::selector::meta::{
    AUTHOR_CLASS_SELECTOR, AUTHOR_REL_SELECTOR, BYLINE_CONTAINER_SELECTOR, BYLINE_MARKER, DATE_ELEMENT_SELECTOR,
};

fn first_match<'a>(root: &Selection<'a>, selector: &str) -> Option<NodeRef<'a>> {
    root.select(selector).nodes().first().copied()
}

/// Author marker under `root`: `rel="author"` first, then author classes.
#[must_use]
pub fn find_author_element<'a>(root: &Selection<'a>) -> Option<NodeRef<'a>> {
    first_match(root, AUTHOR_REL_SELECTOR).or_else(|| first_match(root, AUTHOR_CLASS_SELECTOR))
}

/// First date-bearing element under `root`.
#[must_use]
pub fn find_date_element<'a>(root: &Selection<'a>) -> Option<NodeRef<'a>> {
    first_match(root, DATE_ELEMENT_SELECTOR)
}

/// Whitespace-normalized author name without a leading "By".
#[must_use]
pub fn clean_author(raw: &str) -> Option<String> {
    let normalized = dom::normalize_whitespace(raw);
    let name = BYLINE_PREFIX.replace(&normalized, "").trim().to_string();
    (!name.is_empty()).then_some(name)
}

/// Author name carried by an author element.
#[must_use]
pub fn author_text(node: &NodeRef) -> Option<String> {
    clean_author(&node.text())
}

/// Raw date value of an element: `content`, then `datetime`, then its text.
#[must_use]
pub fn date_value(node: &NodeRef) -> Option<String> {
    dom::non_empty_attr(node, "content")
        .or_else(|| dom::non_empty_attr(node, "datetime"))
        .or_else(|| {
            let text = node.text().trim().to_string();
            (!text.is_empty()).then_some(text)
        })
}

/// Link of an author element: the enclosing anchor, else the first
/// anchor inside it. The `href` is resolved against `base` when given.
#[must_use]
pub fn author_link(node: &NodeRef, base: Option<&str>) -> Option<String> {
    let anchor = dom::closest(node, "a").or_else(|| first_match(&Selection::from(*node), "a"))?;
    let href = dom::non_empty_attr(&anchor, "href")?;
    if is_script_url(&href) {
        return None;
    }
    Some(resolve_href(&href, base))
}

/// Resolve `href` against `base`, keeping it unchanged when either fails to parse.
#[must_use]
pub fn resolve_href(href: &str, base: Option<&str>) -> String {
    if let Ok(absolute) = Url::parse(href) {
        return absolute.to_string();
    }
    base.and_then(|b| Url::parse(b).ok())
        .and_then(|b| b.join(href).ok())
        .map_or_else(|| href.to_string(), |u| u.to_string())
}

/// Longest container text, in non-whitespace chars, still treated as one
/// byline line.
pub const BYLINE_LINE_MAX_CHARS: usize = 200;

/// The element to drop for a byline signal `node` under `root`.
///
/// Climbs to the nearest byline container above `node` and below `root`;
/// when that container is a short line containing the word "by", the whole
/// container is the target, otherwise only `node`. Returns `None` for nodes
/// outside `root` and for `root` itself.
#[must_use]
pub fn byline_target<'a>(node: &NodeRef<'a>, root: &NodeRef) -> Option<NodeRef<'a>> {
    if node.id == root.id || !dom::is_inclusive_descendant(node, root.id) {
        return None;
    }

    let container = node
        .parent()
        .and_then(|parent| dom::closest(&parent, BYLINE_CONTAINER_SELECTOR))
        .filter(|c| c.id != root.id && dom::is_inclusive_descendant(c, root.id))
        .filter(|c| {
            let text = c.text();
            dom::collapsed_len(&text) <= BYLINE_LINE_MAX_CHARS && BYLINE_WORD.is_match(text.trim())
        });
    Some(container.unwrap_or(*node))
}

/// Remove a byline signal from the content under `root`.
///
/// See [`byline_target`] for what is removed. Returns whether anything was.
pub fn remove_byline(node: &NodeRef, root: &NodeRef) -> bool {
    let Some(target) = byline_target(node, root) else {
        return false;
    };
    Selection::from(target).remove();
    true
}

/// Mark the byline line of `node` with [`BYLINE_MARKER`] so the sanitizer
/// drops it. Returns whether anything was marked.
pub fn mark_byline(node: &NodeRef, root: &NodeRef) -> bool {
    let Some(target) = byline_target(node, root) else {
        return false;
    };
    Selection::from(target).set_attr(BYLINE_MARKER, "");
    true
}
