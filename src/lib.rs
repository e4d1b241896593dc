//! # zen-reader
//!
//! Reader-view extraction: turn an arbitrary web page into a clean article
//! with a title, byline metadata, a heading outline and a language tag.
//!
//! ## Quick Start
//!
//! ```rust
//! use zen_reader::extract;
//!
//! let body = "Readers deserve quiet pages without clutter around them. ".repeat(10);
//! let html = format!(
//!     "<html><head><title>A Quiet Page for Reading</title></head>\
//!      <body><nav><a href=\"/\">Home</a></nav><article><p>{body}</p></article></body></html>"
//! );
//!
//! let article = extract(&html).expect("article");
//! assert_eq!(article.title, "A Quiet Page for Reading");
//! assert!(article.text_content().contains("quiet pages"));
//! ```
//!
//! ## Pipeline
//!
//! 1. **Hydration**: deferred text, noscript images and lazy media are made
//!    real on a private clone of the page
//! 2. **Strategies**: density-scored candidate, external extractor, relaxed
//!    candidate, paragraph fallback; the first whose sanitized output passes
//!    its size gate wins
//! 3. **Sanitizer**: closed tag allow-list, no event handlers or inline styles
//! 4. **Finishing**: title and metadata, duplicate-title removal, sections,
//!    language

mod error;
mod extract;
mod options;
mod result;

/// Shared regular expressions and the trusted video host pattern.
pub mod patterns;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Selector tables and boilerplate rules.
pub mod selector;

/// Allow-list sanitizer.
pub mod html_processing;

/// Extraction strategies and the strategy chain.
pub mod extractor;

/// Lazy-loading and deferred-content hydration.
pub mod hydration;

/// Title, author, date and site name resolution.
pub mod metadata;

/// Section wrapping and duplicate-title removal.
pub mod postprocess;

/// Heading outline and scroll geometry.
pub mod outline;

/// Dominant-script language detection.
pub mod language;

/// Charset sniffing for byte input.
pub mod encoding;

/// Reader style preferences and their stores.
pub mod preferences;

/// Reader session and host commands.
pub mod reader;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::Extractor;
pub use extractor::{ExternalArticle, ExternalExtractor, ExtractorConfig, Strategy};
pub use language::Language;
pub use options::Options;
pub use preferences::{JsonFileStore, MemoryStore, PreferenceStore, ReaderPreferences};
pub use reader::{Command, Reader, Response};
pub use result::{ArticleOutput, ExtractedArticle, Metadata, OutlineEntry};

/// Extract the article of `html` with default options.
///
/// Returns `None` when the page has no reader-suitable content.
///
/// # Example
///
/// ```rust
/// use zen_reader::extract;
///
/// assert!(extract("<html><body><nav><a href=\"/\">Home</a></nav></body></html>").is_none());
/// ```
#[must_use]
pub fn extract(html: &str) -> Option<ExtractedArticle> {
    Extractor::new().extract(html)
}

/// Extract the article of `html` with custom options.
///
/// # Example
///
/// ```rust
/// use zen_reader::{extract_with_options, Options};
///
/// let html = format!("<html><body><article><p>{}</p></article></body></html>", "short text ".repeat(12));
/// let options = Options {
///     primary_threshold: 50,
///     use_external_extractor: false,
///     ..Options::default()
/// };
/// let article = extract_with_options(&html, &options).unwrap();
/// assert_eq!(article.strategy, zen_reader::Strategy::Candidate);
/// ```
#[must_use]
pub fn extract_with_options(html: &str, options: &Options) -> Option<ExtractedArticle> {
    Extractor::with_options(options.clone()).extract(html)
}

/// Extract the article of raw HTML bytes, sniffing the charset first.
///
/// The encoding comes from a byte-order mark, else a `<meta charset>` or
/// `http-equiv` declaration, else UTF-8. Malformed sequences become U+FFFD.
///
/// # Example
///
/// ```rust
/// use zen_reader::extract_bytes;
///
/// let mut html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><article><p>".to_vec();
/// for _ in 0..40 {
///     html.extend_from_slice(b"Caf\xE9 au lait. ");
/// }
/// html.extend_from_slice(b"</p></article></body></html>");
///
/// let article = extract_bytes(&html).unwrap();
/// assert!(article.text_content().contains("Café"));
/// ```
#[must_use]
pub fn extract_bytes(html: &[u8]) -> Option<ExtractedArticle> {
    extract(&encoding::decode_html(html))
}
