//! Heuristic image source recovery.
//!
//! When no known deferred attribute applies, any attribute whose value looks
//! like an image URL (or a srcset list of them) is promoted to the real
//! `src`/`srcset`. Inline base64 sources are dropped when a real file URL
//! is available on the same element.

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::patterns::{BASE64_DATA_URL, IMAGE_EXTENSION, SRCSET_VALUE, SRC_VALUE};

/// Which real attribute a recovered value belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Src,
    Srcset,
}

impl SourceKind {
    #[must_use]
    pub const fn attr(self) -> &'static str {
        match self {
            Self::Src => "src",
            Self::Srcset => "srcset",
        }
    }
}

/// Classify an attribute value as a `srcset` list, a single `src`, or neither.
#[must_use]
pub fn classify_value(value: &str) -> Option<SourceKind> {
    if !IMAGE_EXTENSION.is_match(value) {
        return None;
    }
    if SRCSET_VALUE.is_match(value) {
        Some(SourceKind::Srcset)
    } else if SRC_VALUE.is_match(value) {
        Some(SourceKind::Src)
    } else {
        None
    }
}

/// First URL of a `srcset` list, without its descriptor.
#[must_use]
pub fn first_srcset_url(srcset: &str) -> Option<&str> {
    srcset
        .split(',')
        .next()
        .and_then(|candidate| candidate.split_whitespace().next())
}

/// Recover real image sources on `img`, `picture`, `figure` and `source`.
pub fn fix_lazy_images(root: &Selection) {
    for node in root.select("img, picture, figure, source").nodes() {
        let Some(tag) = dom::node_tag(node) else {
            continue;
        };
        let el = Selection::from(*node);
        let has_src_property = tag == "img" || tag == "source";

        if has_src_property {
            strip_redundant_base64(node, &el);
        }

        let has_src = has_src_property && dom::non_empty_attr(node, "src").is_some();
        let has_srcset = dom::non_empty_attr(node, "srcset").is_some_and(|v| v != "null");
        let lazy_class = node
            .attr("class")
            .is_some_and(|c| c.to_ascii_lowercase().contains("lazy"));
        if (has_src || has_srcset) && !lazy_class {
            continue;
        }

        for (name, value) in dom::get_all_attributes(node) {
            if matches!(name.as_str(), "src" | "srcset" | "alt") {
                continue;
            }
            let Some(kind) = classify_value(&value) else {
                continue;
            };
            match tag.as_str() {
                "img" | "picture" | "source" => el.set_attr(kind.attr(), &value),
                "figure" if !el.select("img, picture").exists() => {
                    el.append_html(format!("<img {}=\"{}\">", kind.attr(), dom::escape_html(&value)));
                }
                _ => {}
            }
        }

        if tag == "img" && dom::non_empty_attr(node, "src").is_none() {
            if let Some(srcset) = dom::non_empty_attr(node, "srcset") {
                if let Some(first) = first_srcset_url(&srcset) {
                    el.set_attr("src", first);
                }
            }
        }
    }
}

/// Drop a base64 `src` when another attribute names a real image file.
/// SVG data URLs are kept: they are usually small icons.
fn strip_redundant_base64(node: &NodeRef, el: &Selection) {
    let Some(src) = node.attr("src") else {
        return;
    };
    let Some(caps) = BASE64_DATA_URL.captures(&src) else {
        return;
    };
    if caps.get(1).is_some_and(|m| m.as_str().eq_ignore_ascii_case("svg+xml")) {
        return;
    }
    let has_alternate = dom::get_all_attributes(node)
        .iter()
        .any(|(name, value)| name != "src" && IMAGE_EXTENSION.is_match(value));
    if has_alternate {
        el.remove_attr("src");
    }
}
