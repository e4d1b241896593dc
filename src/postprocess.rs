//! Structural post-processing of sanitized content.
//!
//! Both passes edit the article container in place.

use dom_query::Selection;

use crate::dom;
use crate::selector::content::TITLE_HEADING_SELECTOR;

/// Class of the wrapper each heading group is moved into.
pub const SECTION_CLASS: &str = "reader-section";

/// Regroup the direct children of `root` into `div.reader-section` wrappers.
///
/// A new group starts at every `h1`-`h6` child, and at the first child when
/// no group exists yet. Leading whitespace is dropped; reading order is
/// unchanged.
pub fn wrap_sections(root: &Selection) {
    let Some(container) = root.nodes().first().copied() else {
        return;
    };
    let children = container.children();
    if children.is_empty() {
        return;
    }

    let mut html = String::new();
    let mut open = false;
    for child in &children {
        if !open && child.is_text() && child.text().trim().is_empty() {
            continue;
        }
        let is_heading = dom::node_tag(child).is_some_and(|t| is_heading_tag(&t));
        if is_heading || !open {
            if open {
                html.push_str("</div>");
            }
            html.push_str(&format!("<div class=\"{SECTION_CLASS}\">"));
            open = true;
        }
        html.push_str(&dom::node_html(child));
    }
    if open {
        html.push_str("</div>");
    }
    root.set_html(html);
}

fn is_heading_tag(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn normalize_title(text: &str) -> String {
    dom::normalize_whitespace(text).to_lowercase()
}

/// Remove the first `h1`/`h2` under `root` when it repeats `title`.
///
/// Matches when the normalized, lowercased texts are equal or one is a
/// prefix of the other. Returns whether a heading was removed.
pub fn remove_duplicate_title(root: &Selection, title: &str) -> bool {
    let normalized_title = normalize_title(title);
    if normalized_title.is_empty() {
        return false;
    }
    let heading = root.select(TITLE_HEADING_SELECTOR).first();
    if !heading.exists() {
        return false;
    }
    let heading_text = normalize_title(&heading.text());
    if heading_text.is_empty() {
        return false;
    }

    if heading_text == normalized_title
        || normalized_title.starts_with(&heading_text)
        || heading_text.starts_with(&normalized_title)
    {
        heading.remove();
        true
    } else {
        false
    }
}
