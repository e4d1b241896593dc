//! Compiled regex patterns used across the extraction pipeline.
//!
//! All patterns are compiled once on first use via `LazyLock`.
//! Patterns are grouped by the pipeline stage that consumes them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Normalization
// =============================================================================

/// Matches whitespace runs for collapsing.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

/// Matches the standalone word "by" in a byline container.
pub static BYLINE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bby\b").expect("BYLINE_WORD regex")
});

/// Matches a leading "By" (or "By:") on author text.
pub static BYLINE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^by(?:[\s:]+|$)").expect("BYLINE_PREFIX regex")
});

// =============================================================================
// Media Hydration
// =============================================================================

/// Matches `src` values that are loading placeholders rather than real media.
pub static PLACEHOLDER_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(transparent|spacer\.gif|1x1)").expect("PLACEHOLDER_SRC regex")
});

/// Matches an inline base64 image and captures its MIME subtype.
pub static BASE64_DATA_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*data:image/([\w+.-]+);base64,").expect("BASE64_DATA_URL regex")
});

/// Matches any value that mentions an image file extension.
pub static IMAGE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpe?g|png|webp|gif|avif|bmp)").expect("IMAGE_EXTENSION regex")
});

/// Matches a srcset-style value: image URL followed by a size/density descriptor.
pub static SRCSET_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpe?g|png|webp|gif|avif|bmp)\S*\s+\d").expect("SRCSET_VALUE regex")
});

/// Matches a single image URL with nothing else around it.
pub static SRC_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\S+\.(jpe?g|png|webp|gif|avif|bmp)\S*\s*$").expect("SRC_VALUE regex")
});

/// Matches attribute payloads that look like markup.
pub static MARKUP_PAYLOAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<.+>").expect("MARKUP_PAYLOAD regex")
});

/// Matches noscript bodies that carry an image or picture.
pub static NOSCRIPT_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(img|picture)\b").expect("NOSCRIPT_IMAGE regex")
});

// =============================================================================
// Sanitization
// =============================================================================

/// Trusted video hosts whose embeds survive sanitization.
///
/// Anchored to the start of the URL and to the end of the host name.
pub const ALLOWED_VIDEO_PATTERN: &str = r"(?i)^(?:https?:)?//(?:www\.)?(?:(?:dailymotion|youtube|youtube-nocookie|player\.vimeo|v\.qq|bilibili|live\.bilibili)\.com|(?:archive|upload\.wikimedia)\.org|player\.twitch\.tv|brightcove\.com)(?:[:/?#]|$)";

/// Compiled form of [`ALLOWED_VIDEO_PATTERN`].
pub static ALLOWED_VIDEO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(ALLOWED_VIDEO_PATTERN).expect("ALLOWED_VIDEO regex")
});

/// Matches script schemes at the start of a URL normalized by
/// [`is_script_url`].
pub static JAVASCRIPT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:javascript|vbscript):").expect("JAVASCRIPT_URL regex")
});

/// Whether following `value` would execute script.
///
/// Browsers drop tab, CR and LF anywhere in a URL and skip leading C0
/// controls and spaces, so the scheme is checked after doing the same.
#[must_use]
pub fn is_script_url(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();
    JAVASCRIPT_URL.is_match(compact.trim_start_matches(|c: char| c <= ' '))
}
