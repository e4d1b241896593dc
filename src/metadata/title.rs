//! Title resolution.

use dom_query::Document;

use super::meta_tags::meta_content;
use crate::dom;
use crate::selector::meta::TITLE_META_SELECTORS;

/// Title used when the page offers none.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Candidates longer than this are preferred over shorter ones.
pub const PREFERRED_TITLE_CHARS: usize = 10;

/// Title candidates in priority order, normalized and deduplicated.
///
/// Order: extractor hint, title `<meta>` properties, `<title>`.
#[must_use]
pub fn title_candidates(hint: Option<&str>, doc: &Document) -> Vec<String> {
    let mut raw: Vec<String> = Vec::new();
    if let Some(hint) = hint {
        raw.push(hint.to_string());
    }
    raw.extend(TITLE_META_SELECTORS.iter().filter_map(|sel| meta_content(doc, sel)));
    let title_element = doc.select("title").first();
    if title_element.exists() {
        raw.push(title_element.text().to_string());
    }

    let mut candidates: Vec<String> = Vec::new();
    for title in raw {
        let title = dom::normalize_whitespace(&title);
        if !title.is_empty() && !candidates.contains(&title) {
            candidates.push(title);
        }
    }
    candidates
}

/// Pick the first candidate longer than 10 characters, else the first one,
/// else [`DEFAULT_TITLE`].
#[must_use]
pub fn resolve_title(hint: Option<&str>, doc: &Document) -> String {
    let candidates = title_candidates(hint, doc);
    candidates
        .iter()
        .find(|t| t.chars().count() > PREFERRED_TITLE_CHARS)
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}
