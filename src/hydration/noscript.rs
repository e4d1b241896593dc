//! `<noscript>` image recovery.
//!
//! Lazy-loading libraries often keep the real `<img>` inside a `<noscript>`
//! fallback. With scripting enabled the parser keeps that markup as raw
//! text, so the image is invisible until it is parsed and put back.

use dom_query::{Document, NodeRef, Selection};
use tracing::debug;

use crate::dom;
use crate::patterns::NOSCRIPT_IMAGE;

const IMAGE_SELECTOR: &str = "img, picture";

/// Insert the first image found in each `<noscript>` next to it.
///
/// Inside a `<figure>` the noscript is replaced by the image; elsewhere the
/// image goes before the noscript. A parent that already shows an image is
/// left alone.
pub fn unwrap_noscript_images(root: &Selection) {
    for node in root.select("noscript").nodes() {
        let Some(image_html) = noscript_image(node) else {
            continue;
        };
        let Some(parent) = node.parent().filter(NodeRef::is_element) else {
            continue;
        };
        if has_visible_image(&parent) {
            continue;
        }

        let noscript = Selection::from(*node);
        if dom::is_tag(&parent, "figure") {
            noscript.replace_with_html(image_html);
        } else {
            let kept = noscript.html().to_string();
            noscript.replace_with_html(format!("{image_html}{kept}"));
        }
    }
}

/// Serialized first image of a noscript payload, if it carries one.
fn noscript_image(node: &NodeRef) -> Option<String> {
    let sel = Selection::from(*node);
    let text = sel.text();
    let payload = if text.trim().is_empty() {
        sel.inner_html().to_string()
    } else {
        text.to_string()
    };
    if !NOSCRIPT_IMAGE.is_match(&payload) {
        return None;
    }

    let fragment = Document::from(format!("<div>{payload}</div>"));
    let image = fragment.select(IMAGE_SELECTOR).first();
    if !image.exists() {
        debug!("noscript payload mentions an image but none parsed");
        return None;
    }
    Some(image.html().to_string())
}

/// An image under `parent` that is not itself inside a noscript.
fn has_visible_image(parent: &NodeRef) -> bool {
    Selection::from(*parent)
        .select(IMAGE_SELECTOR)
        .nodes()
        .iter()
        .any(|img| dom::closest(img, "noscript").is_none())
}
