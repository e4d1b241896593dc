//! Tag constants for the sanitizer allow-list.
//!
//! The allow-list is closed and static: it is part of the output contract,
//! not a runtime option. Arrays are kept for iteration and `HashSets` for
//! O(1) lookup.

use std::collections::HashSet;
use std::sync::LazyLock;

// === Tag Lists (arrays for iteration) ===

/// Tags that survive sanitization.
pub static ALLOWED_TAGS: [&str; 34] = [
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "a", "ul", "ol", "li", "blockquote",
    "b", "i", "em", "span", "strong", "img", "figure", "figcaption", "picture",
    "source", "video", "iframe", "table", "thead", "tbody", "tfoot", "tr", "td",
    "th", "caption", "colgroup", "col",
];

/// Structural table and media tags kept even when they end up empty.
pub static ALLOWED_EMPTY_TAGS: [&str; 13] = [
    "table", "thead", "tbody", "tfoot", "tr", "td", "th", "caption", "colgroup",
    "col", "source", "video", "iframe",
];

/// Embedded media that must point at a trusted video host.
pub static EMBED_TAGS: [&str; 4] = ["iframe", "object", "embed", "video"];

/// Void elements: serialized without children or a closing tag.
pub static VOID_TAGS: [&str; 3] = ["img", "source", "col"];

/// Attributes whose `javascript:` values are dropped.
pub static URL_ATTRIBUTES: [&str; 5] = ["href", "src", "poster", "srcset", "cite"];

/// Attributes kept on every retained element.
pub static GLOBAL_ATTRIBUTES: [&str; 7] = ["id", "class", "title", "lang", "dir", "role", "aria-level"];

// === Tag Sets (HashSets for O(1) lookup) ===

/// `ALLOWED_TAGS` as a `HashSet`
pub static ALLOWED_TAG_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ALLOWED_TAGS.into_iter().collect()
});

/// `ALLOWED_EMPTY_TAGS` as a `HashSet`
pub static ALLOWED_EMPTY_TAG_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ALLOWED_EMPTY_TAGS.into_iter().collect()
});

// === Helper Functions ===

/// Check if a tag survives sanitization.
#[inline]
#[must_use]
pub fn is_allowed_tag(tag: &str) -> bool {
    ALLOWED_TAG_SET.contains(tag)
}

/// Check if an allowed tag may be kept without children.
#[inline]
#[must_use]
pub fn is_allowed_empty(tag: &str) -> bool {
    tag == "img" || ALLOWED_EMPTY_TAG_SET.contains(tag)
}

/// Check if a tag is embedded media.
#[inline]
#[must_use]
pub fn is_embed_tag(tag: &str) -> bool {
    EMBED_TAGS.contains(&tag)
}

/// Check if a tag is serialized as a void element.
#[inline]
#[must_use]
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Attributes a retained `tag` may keep besides [`GLOBAL_ATTRIBUTES`].
#[must_use]
pub fn tag_attributes(tag: &str) -> &'static [&'static str] {
    match tag {
        "a" => &["href", "rel", "hreflang"],
        "img" => &["src", "srcset", "sizes", "alt", "width", "height"],
        "source" => &["src", "srcset", "sizes", "type", "media"],
        "video" => &["src", "poster", "width", "height", "controls", "preload", "muted", "loop", "playsinline"],
        "iframe" => &["src", "width", "height", "allow", "allowfullscreen"],
        "td" | "th" => &["colspan", "rowspan", "headers", "scope"],
        "col" | "colgroup" => &["span"],
        "ol" => &["start", "reversed", "type"],
        "li" => &["value"],
        "blockquote" => &["cite"],
        _ => &[],
    }
}

/// Check if `name` may stay on a retained `tag`.
#[must_use]
pub fn is_allowed_attribute(tag: &str, name: &str) -> bool {
    GLOBAL_ATTRIBUTES.contains(&name) || tag_attributes(tag).contains(&name)
}

/// Check if an attribute carries a URL.
#[inline]
#[must_use]
pub fn is_url_attribute(name: &str) -> bool {
    URL_ATTRIBUTES.contains(&name)
}
