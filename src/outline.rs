//! Outline Builder
//!
//! Flat heading list over finished content, with lazily assigned anchors and
//! the scroll math a reading panel needs to bring a heading into view.

use std::collections::HashSet;

use dom_query::Selection;

use crate::dom;
use crate::result::OutlineEntry;
use crate::selector::{self, content::HEADING_SELECTOR};

/// Prefix for generated heading anchors.
pub const ANCHOR_PREFIX: &str = "reader-heading-";

/// Outline labels longer than this are condensed.
pub const MAX_LABEL_CHARS: usize = 140;

/// Gap kept between the container's top edge and a scrolled-to heading.
pub const SCROLL_MARGIN: f64 = 12.0;

/// Level given to bold-paragraph pseudo-headings.
const PSEUDO_HEADING_LEVEL: u8 = 3;

/// Element tags and ARIA headings with an explicit level.
fn is_heading(sel: &Selection) -> bool {
    sel.is(HEADING_SELECTOR) || sel.is("[role=\"heading\"][aria-level]")
}

/// Short paragraphs led by bold text, used when no real headings exist.
fn is_pseudo_heading(sel: &Selection) -> bool {
    if !sel.is("p") || !sel.select("b, strong").exists() {
        return false;
    }
    let len = sel.text().trim().chars().count();
    len > 4 && len < 120
}

fn heading_level(sel: &Selection) -> u8 {
    if let Some(tag) = dom::tag_name(sel) {
        if let Some(level) = tag.strip_prefix('h').and_then(|d| d.parse::<u8>().ok()) {
            if (1..=6).contains(&level) {
                return level;
            }
        }
    }
    sel.attr("aria-level")
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map_or(2, |level| level.clamp(1, 6))
}

/// Build the outline of `root`, capped at `limit` entries.
///
/// Real headings win; bold-led paragraphs are used only when none exist.
/// Included headings lacking an id (or sharing one with an earlier entry)
/// receive a generated `reader-heading-N` id that is unique in the document.
pub fn build_outline(root: &Selection, limit: usize) -> Vec<OutlineEntry> {
    let mut headings: Vec<(Selection, u8, String)> = selector::query_all(root, is_heading)
        .into_iter()
        .filter_map(|sel| {
            let text = dom::normalize_whitespace(&sel.text());
            (!text.is_empty()).then(|| {
                let level = heading_level(&sel);
                (sel, level, text)
            })
        })
        .collect();

    if headings.is_empty() {
        headings = selector::query_all(root, is_pseudo_heading)
            .into_iter()
            .map(|sel| {
                let text = dom::normalize_whitespace(&sel.text());
                (sel, PSEUDO_HEADING_LEVEL, text)
            })
            .collect();
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut counter = 0usize;

    headings
        .into_iter()
        .take(limit)
        .map(|(sel, level, text)| {
            let existing = sel
                .attr("id")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty() && !seen.contains(v));
            let anchor_id = match existing {
                Some(id) => id,
                None => {
                    let id = next_anchor(root, &seen, &mut counter);
                    sel.set_attr("id", &id);
                    id
                }
            };
            seen.insert(anchor_id.clone());
            OutlineEntry { level, text, anchor_id }
        })
        .collect()
}

fn next_anchor(root: &Selection, seen: &HashSet<String>, counter: &mut usize) -> String {
    loop {
        *counter += 1;
        let candidate = format!("{ANCHOR_PREFIX}{counter}");
        let taken = seen.contains(&candidate)
            || root.select(&format!("[id=\"{candidate}\"]")).exists();
        if !taken {
            return candidate;
        }
    }
}

/// Display label for an outline entry: long text is cut to 137 characters
/// followed by `...`.
#[must_use]
pub fn condense_label(text: &str) -> String {
    if text.chars().count() > MAX_LABEL_CHARS {
        let head: String = text.chars().take(MAX_LABEL_CHARS - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Bounding box in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }
}

/// Scroll offset that brings `target` to the top of the scrollable `container`.
///
/// Both rectangles are viewport-relative; `scroll_top` is the container's
/// current scroll position. The result is never negative.
#[must_use]
pub fn scroll_target(target: &Rect, container: &Rect, scroll_top: f64) -> f64 {
    (scroll_top + target.top - container.top - SCROLL_MARGIN).max(0.0)
}
