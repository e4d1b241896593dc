//! Selector Infrastructure
//!
//! Selector tables and predicate rules used by candidate search, boilerplate
//! detection and metadata lookup. Tables live in the submodules so they can be
//! tuned and tested apart from the traversal code that consumes them.

use dom_query::Selection;

pub mod content;
pub mod discard;
pub mod meta;

/// A selector rule that tests if a selection matches certain criteria.
///
/// Rules are plain predicate functions used where a CSS selector alone cannot
/// express the test (attribute-dependent heading roles, pseudo-headings).
pub type Rule = fn(&Selection) -> bool;

/// Query for the first element matching the rule, in document order.
///
/// # Example
///
/// ```rust
/// use zen_reader::{dom, selector};
///
/// let doc = dom::parse(r#"<div><p class="content">text</p></div>"#);
/// let root = doc.select("div");
///
/// fn has_content_class(sel: &dom_query::Selection) -> bool {
///     sel.attr("class").is_some_and(|c| c.contains("content"))
/// }
///
/// assert!(selector::query(&root, has_content_class).is_some());
/// ```
#[must_use]
pub fn query<'a>(root: &Selection<'a>, rule: Rule) -> Option<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .find(|sel| rule(sel))
}

/// Query for all elements matching the rule, in document order.
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    root.select("*")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|sel| rule(sel))
        .collect()
}
