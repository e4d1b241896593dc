//! Deferred media sources.
//!
//! Copies `data-*` source attributes into the real `src`/`srcset`/`poster`
//! attributes when the real value is missing or a loading placeholder.

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::patterns::PLACEHOLDER_SRC;

/// Deferred `src` attributes, in priority order.
pub const SRC_ATTRIBUTES: &[&str] = &[
    "data-src",
    "data-original",
    "data-url",
    "data-image",
    "data-lazy",
    "data-lazy-src",
    "data-async-src",
    "data-href",
    "data-src-large",
    "data-src-medium",
    "data-src-small",
];

/// Deferred `srcset` attributes, in priority order.
pub const SRCSET_ATTRIBUTES: &[&str] = &[
    "data-srcset",
    "data-srcset-large",
    "data-srcset-medium",
    "data-srcset-small",
    "data-original-set",
    "data-lazy-srcset",
];

/// Deferred `poster` attributes, in priority order.
pub const POSTER_ATTRIBUTES: &[&str] = &["data-poster", "data-thumb", "data-thumbnail", "data-preview"];

/// Whether a real attribute value is a stand-in for media still to load.
#[must_use]
pub fn is_placeholder(value: &str) -> bool {
    PLACEHOLDER_SRC.is_match(value)
}

/// Write `value` into `attr` unless the element already has a real value.
///
/// Applied over an ordered attribute list, the first usable deferred value
/// wins; a later one replaces it only while the current value still looks
/// like a placeholder.
fn set_if_needed(node: &NodeRef, attr: &str, value: Option<&str>) {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return;
    };
    if let Some(current) = node.attr(attr) {
        if !current.is_empty() && !is_placeholder(&current) {
            return;
        }
    }
    Selection::from(*node).set_attr(attr, value);
}

fn apply_deferred(node: &NodeRef, target: &str, sources: &[&str]) {
    for name in sources {
        let value = node.attr(name);
        set_if_needed(node, target, value.as_deref());
    }
}

/// Promote deferred sources on images, `<source>` and `<video>` elements,
/// add poster and preload hints to videos, and give figures that only carry
/// `data-src`/`data-srcset` a real image.
pub fn hydrate_media_sources(root: &Selection) {
    for node in root.select("img, source, video").nodes() {
        apply_deferred(node, "src", SRC_ATTRIBUTES);
        apply_deferred(node, "srcset", SRCSET_ATTRIBUTES);
    }

    for node in root.select("video").nodes() {
        apply_deferred(node, "poster", POSTER_ATTRIBUTES);
        if dom::non_empty_attr(node, "preload").is_none() {
            Selection::from(*node).set_attr("preload", "metadata");
        }
    }

    for node in root.select("figure").nodes() {
        let figure = Selection::from(*node);
        if figure.select("img").exists() {
            continue;
        }
        let src = dom::non_empty_attr(node, "data-src");
        let srcset = dom::non_empty_attr(node, "data-srcset");
        if src.is_none() && srcset.is_none() {
            continue;
        }

        let mut img = String::from("<img");
        if let Some(src) = src {
            img.push_str(&format!(" src=\"{}\"", dom::escape_html(&src)));
        }
        if let Some(srcset) = srcset {
            img.push_str(&format!(" srcset=\"{}\"", dom::escape_html(&srcset)));
        }
        img.push('>');
        figure.append_html(img);
    }
}
