//! Title and metadata resolution.
//!
//! Every lookup prefers the accepted content, then falls back to the whole
//! working document and its `<meta>` tags. Extractor hints override both.
//!
//! The byline line an author or date was read from never reaches the body.
//! For content taken from the candidate subtree, [`mark_content_signals`]
//! marks those lines in the working document before sanitizing and the
//! sanitizer drops them; for extractor output they are removed from the
//! sanitized content.

pub mod dom_extraction;
pub mod meta_tags;
pub mod title;

use dom_query::{Document, NodeRef, Selection};

use crate::extractor::{ExternalArticle, Strategy};
use crate::options::Options;
use crate::result::{Metadata, CONTENT_ROOT_SELECTOR};
use crate::selector::meta::{
    AUTHOR_ANY_SELECTOR, AUTHOR_MARKER, AUTHOR_META_SELECTOR, DATE_MARKER, DATE_META_SELECTOR,
};

pub use dom_extraction::{
    author_link, byline_target, clean_author, find_author_element, find_date_element, mark_byline, remove_byline,
};
pub use meta_tags::{extract_site_name, format_date, meta_content, parse_meta_date, ParsedDate};
pub use title::{resolve_title, title_candidates, DEFAULT_TITLE};

fn hint(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn first_marked<'a>(doc: &'a Document, marker: &str) -> Option<NodeRef<'a>> {
    doc.select(&format!("[{marker}]")).nodes().first().copied()
}

/// Mark the author and date signals under `candidate`, and the byline lines
/// they sit in, so the sanitizer leaves them out of the article.
pub fn mark_content_signals(candidate: &NodeRef) {
    let scope = Selection::from(*candidate);
    if let Some(author) = find_author_element(&scope) {
        Selection::from(author).set_attr(AUTHOR_MARKER, "");
        mark_byline(&author, candidate);
    }
    if let Some(date) = find_date_element(&scope) {
        Selection::from(date).set_attr(DATE_MARKER, "");
        mark_byline(&date, candidate);
    }
}

/// Resolve author, author link, publication date and site name.
///
/// `content` is the sanitized article document, `working` the hydrated
/// page it came from and `strategy` the one that produced `content`.
/// Signals marked by [`mark_content_signals`] are used unless the content
/// came from the external extractor.
#[must_use]
pub fn resolve_metadata(
    content: &Document,
    working: &Document,
    strategy: Strategy,
    hints: Option<&ExternalArticle>,
    opts: &Options,
) -> Metadata {
    let root = content.select(CONTENT_ROOT_SELECTOR);
    let base = opts.source_uri.as_deref();
    let use_marks = strategy != Strategy::External;

    let marked_author = use_marks.then(|| first_marked(working, AUTHOR_MARKER)).flatten();
    let content_author = if marked_author.is_some() { None } else { find_author_element(&root) };
    let author_node = marked_author.or(content_author).or_else(|| {
        working
            .select(AUTHOR_ANY_SELECTOR)
            .nodes()
            .first()
            .copied()
    });

    let author = hint(hints.and_then(|h| h.byline.as_ref()))
        .map(str::to_string)
        .or_else(|| author_node.as_ref().and_then(dom_extraction::author_text))
        .or_else(|| meta_content(working, AUTHOR_META_SELECTOR).and_then(|raw| clean_author(&raw)))
        .unwrap_or_default();
    let author_url = author_node
        .as_ref()
        .and_then(|node| author_link(node, base))
        .unwrap_or_default();

    let marked_date = use_marks.then(|| first_marked(working, DATE_MARKER)).flatten();
    let content_date = if marked_date.is_some() { None } else { find_date_element(&root) };
    let published = match hint(hints.and_then(|h| h.published_time.as_ref())) {
        Some(raw) => format_date(raw),
        None => meta_content(working, DATE_META_SELECTOR)
            .or_else(|| {
                marked_date
                    .or(content_date)
                    .or_else(|| find_date_element(&working.select("html")))
                    .as_ref()
                    .and_then(dom_extraction::date_value)
            })
            .map(|raw| format_date(&raw))
            .unwrap_or_default(),
    };

    let site_name = extract_site_name(working, hint(hints.and_then(|h| h.site_name.as_ref())));

    if let Some(root_node) = root.nodes().first() {
        if let Some(node) = content_author {
            remove_byline(&node, root_node);
        }
        if let Some(node) = content_date {
            remove_byline(&node, root_node);
        }
    }

    Metadata {
        author,
        author_url,
        published,
        site_name,
    }
}
