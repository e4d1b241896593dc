//! HTML Meta Tag Extraction
//!
//! Reads `<meta>` declarations and turns raw date strings into the
//! human-readable form shown in the reader header.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use dom_query::Document;

use crate::dom;
use crate::selector::meta::SITE_NAME_SELECTORS;

/// Display format for values carrying a time of day.
pub const DATE_TIME_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

/// Display format for date-only values.
pub const DATE_FORMAT: &str = "%b %-d, %Y";

/// A publication date as declared, with or without a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    DateTime(NaiveDateTime),
    Date(NaiveDate),
}

impl ParsedDate {
    /// Human-readable rendering, e.g. `Mar 5, 2024, 9:30 AM`.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::DateTime(dt) => dt.format(DATE_TIME_FORMAT).to_string(),
            Self::Date(d) => d.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Trimmed `content` of the first element matching `selector`.
#[must_use]
pub fn meta_content(doc: &Document, selector: &str) -> Option<String> {
    let meta = doc.select(selector).first();
    let node = meta.nodes().first()?;
    dom::non_empty_attr(node, "content")
}

/// Parse a date string from a meta tag, `<time>` element or extractor hint.
///
/// Offsets are kept as declared: the wall-clock time the publisher wrote is
/// what gets displayed.
#[must_use]
pub fn parse_meta_date(date_str: &str) -> Option<ParsedDate> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    // ISO 8601 with timezone
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(ParsedDate::DateTime(dt.naive_local()));
    }

    // HTTP-style dates
    if let Ok(dt) = DateTime::parse_from_rfc2822(date_str) {
        return Some(ParsedDate::DateTime(dt.naive_local()));
    }

    // ISO 8601 without timezone
    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, fmt) {
            return Some(ParsedDate::DateTime(dt));
        }
    }

    // Date only
    let date_formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%B %d, %Y",  // January 15, 2024
        "%b %d, %Y",  // Jan 15, 2024
        "%d %B %Y",   // 15 January 2024
    ];
    for fmt in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, fmt) {
            return Some(ParsedDate::Date(date));
        }
    }

    None
}

/// Reformat a raw date for display, falling back to the trimmed raw value.
#[must_use]
pub fn format_date(raw: &str) -> String {
    parse_meta_date(raw).map_or_else(|| raw.trim().to_string(), |d| d.display())
}

/// Site name: extractor hint, else `og:site_name`, else `application-name`.
#[must_use]
pub fn extract_site_name(doc: &Document, hint: Option<&str>) -> String {
    if let Some(hint) = hint.map(str::trim).filter(|h| !h.is_empty()) {
        return hint.to_string();
    }
    SITE_NAME_SELECTORS
        .iter()
        .find_map(|sel| meta_content(doc, sel))
        .unwrap_or_default()
}
