//! Metadata Selectors
//!
//! Where titles, bylines, dates and site names are looked up, in priority order.

/// `<meta>` title properties, tried after an extractor hint and before `<title>`.
pub const TITLE_META_SELECTORS: &[&str] = &[
    "meta[property=\"og:title\"]",
    "meta[name=\"twitter:title\"]",
    "meta[name=\"title\"]",
    "meta[itemprop=\"headline\"]",
];

/// Explicit author link relation; wins over class-based markers.
pub const AUTHOR_REL_SELECTOR: &str = "[rel=\"author\"]";

/// Class-based author markers.
pub const AUTHOR_CLASS_SELECTOR: &str = ".author, .byline, .post-author";

/// Any author marker, for document-wide lookup.
pub const AUTHOR_ANY_SELECTOR: &str = "[rel=\"author\"], .author, .byline, .post-author";

/// Author `<meta>` tag.
pub const AUTHOR_META_SELECTOR: &str = "meta[name=\"author\"]";

/// In-body elements carrying a publication date.
pub const DATE_ELEMENT_SELECTOR: &str = "time[datetime], time, [itemprop=\"datePublished\"]";

/// Head-level date declarations, preferred over in-body elements.
pub const DATE_META_SELECTOR: &str = "meta[property=\"article:published_time\"], meta[name=\"pubdate\"], meta[name=\"date\"], meta[itemprop=\"datePublished\"]";

/// Site name declarations, tried after an extractor hint.
pub const SITE_NAME_SELECTORS: &[&str] = &[
    "meta[property=\"og:site_name\"]",
    "meta[name=\"application-name\"]",
];

/// Containers that make up a whole byline line.
pub const BYLINE_CONTAINER_SELECTOR: &str = "p, div, span, header, footer, section";

/// Attribute placed on byline lines found in the candidate subtree; the
/// sanitizer drops marked elements with their content.
pub const BYLINE_MARKER: &str = "data-reader-byline";

/// Attribute placed on the author element found in the candidate subtree.
pub const AUTHOR_MARKER: &str = "data-reader-author";

/// Attribute placed on the date element found in the candidate subtree.
pub const DATE_MARKER: &str = "data-reader-date";
