//! Paragraph-collection fallback.
//!
//! The last strategy: gather every prose, list, media and table element on
//! the page that is not part of page chrome, and treat the collection as
//! the article.

use std::collections::HashSet;

use dom_query::{NodeId, Selection};

use crate::dom;
use crate::options::Options;
use crate::selector::content::{FALLBACK_EXCLUDED_ANCESTORS, FALLBACK_SELECTOR};

/// Class of the container the collected nodes are gathered into.
pub const FALLBACK_CLASS: &str = "reader-fallback";

/// Collect fallback content under `root`.
///
/// Returns the collected markup wrapped in `<article class="reader-fallback">`
/// together with the number of collected nodes, or `None` when no more than
/// `fallback_min_nodes` were found. Nodes nested in an already collected node
/// are not collected again.
#[must_use]
pub fn build_paragraph_fallback(root: &Selection, opts: &Options) -> Option<(String, usize)> {
    let mut collected: HashSet<NodeId> = HashSet::new();
    let mut html = String::new();

    for node in root.select(FALLBACK_SELECTOR).nodes() {
        if opts.boilerplate.is_unwanted(node) {
            continue;
        }
        if dom::closest(node, FALLBACK_EXCLUDED_ANCESTORS).is_some() {
            continue;
        }
        let Some(tag) = dom::node_tag(node) else {
            continue;
        };
        if tag != "table" && node.parent().and_then(|p| dom::closest(&p, "table")).is_some() {
            continue;
        }
        if tag == "p" && node.text().trim().chars().count() < opts.fallback_paragraph_min {
            continue;
        }
        if node
            .ancestors(None)
            .into_iter()
            .any(|ancestor| collected.contains(&ancestor.id))
        {
            continue;
        }

        collected.insert(node.id);
        html.push_str(&dom::node_html(node));
    }

    let count = collected.len();
    if count > opts.fallback_min_nodes {
        Some((format!("<article class=\"{FALLBACK_CLASS}\">{html}</article>"), count))
    } else {
        None
    }
}
