//! Deferred text and markup.
//!
//! Frameworks park article copy in `data-*` attributes or inert `<template>`
//! blocks until scripts run. Neither is visible to text measurement, so an
//! empty element carrying such a payload gets it written into the tree.

use dom_query::{Document, Selection};

use crate::dom;
use crate::patterns::MARKUP_PAYLOAD;

/// Attributes holding plain-text payloads, in priority order.
pub const TEXT_ATTRIBUTES: &[&str] = &[
    "data-text",
    "data-content",
    "data-body",
    "data-article-body",
    "data-description",
    "data-copy",
    "data-message",
];

/// Attributes holding markup payloads, in priority order.
pub const HTML_ATTRIBUTES: &[&str] = &["data-lazy-html", "data-html", "data-body-html", "data-raw-html"];

/// Set on a `<template>` once its content has been copied out.
pub const HYDRATED_MARKER: &str = "data-reader-hydrated";

/// A parent with more than one child and this much text already renders
/// its own copy; its templates are left alone.
const PARENT_TEXT_LIMIT: usize = 40;

fn attribute_selector(attrs: &[&str]) -> String {
    attrs
        .iter()
        .map(|a| format!("[{a}]"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fill empty elements from their deferred attributes and expand
/// substantial templates into their parent.
pub fn hydrate_lazy_text(root: &Selection, template_min_text: usize) {
    hydrate_text_attributes(root);
    hydrate_html_attributes(root);
    hydrate_templates(root, template_min_text);
}

fn hydrate_text_attributes(root: &Selection) {
    for node in root.select(&attribute_selector(TEXT_ATTRIBUTES)).nodes() {
        let el = Selection::from(*node);
        if !el.text().trim().is_empty() {
            continue;
        }
        if let Some(value) = TEXT_ATTRIBUTES.iter().find_map(|a| dom::non_empty_attr(node, a)) {
            el.set_html(dom::escape_html(&value));
        }
    }
}

fn hydrate_html_attributes(root: &Selection) {
    for node in root.select(&attribute_selector(HTML_ATTRIBUTES)).nodes() {
        let el = Selection::from(*node);
        if !el.inner_html().trim().is_empty() {
            continue;
        }
        let payload = HTML_ATTRIBUTES
            .iter()
            .filter_map(|a| node.attr(a))
            .find(|v| MARKUP_PAYLOAD.is_match(v));
        if let Some(markup) = payload {
            el.set_html(markup.to_string());
        }
    }
}

fn hydrate_templates(root: &Selection, template_min_text: usize) {
    for node in root.select("template").nodes() {
        let template = Selection::from(*node);
        if template.attr(HYDRATED_MARKER).is_some_and(|v| &*v == "1") {
            continue;
        }

        let markup = template.inner_html().to_string();
        let text = fragment_text(&markup);
        let Some(parent) = node.parent() else {
            continue;
        };
        let parent_text = dom::visible_text(&parent);
        if !should_hydrate_template(&text, parent.children().len(), &parent_text, template_min_text) {
            continue;
        }

        Selection::from(parent).append_html(markup);
        template.set_attr(HYDRATED_MARKER, "1");
    }
}

/// Text a markup fragment renders to.
fn fragment_text(markup: &str) -> String {
    if markup.trim().is_empty() {
        return String::new();
    }
    let fragment = Document::from(format!("<div>{markup}</div>"));
    fragment.select("body").text().to_string()
}

/// Whether a template's content should be copied into its parent.
///
/// The template must carry at least `min_text` characters once whitespace is
/// collapsed, and its parent must not already show its own copy (more than
/// one child and over 40 characters of visible text).
#[must_use]
pub fn should_hydrate_template(
    template_text: &str,
    parent_child_count: usize,
    parent_text: &str,
    min_text: usize,
) -> bool {
    let length = dom::normalize_whitespace(template_text).chars().count();
    if length == 0 || length < min_text {
        return false;
    }
    let parent_renders_text = parent_child_count > 1 && parent_text.trim().chars().count() > PARENT_TEXT_LIMIT;
    !parent_renders_text
}
