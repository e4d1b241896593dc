//! Charset sniffing for byte input.
//!
//! Order: byte-order mark, then a `<meta charset>` or `http-equiv`
//! declaration near the start of the document, then UTF-8.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::bytes::Regex;

/// How many leading bytes are searched for a charset declaration.
pub const SNIFF_WINDOW: usize = 1024;

/// `charset=` inside a `<meta>` tag, either as its own attribute or inside
/// an `http-equiv` content value.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*?charset\s*=\s*["']?\s*([A-Za-z0-9._:\-]+)"#).expect("META_CHARSET regex")
});

/// Where the detected encoding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingSource {
    ByteOrderMark,
    MetaDeclaration,
    Default,
}

/// Detect the encoding of `html` and where the decision came from.
#[must_use]
pub fn sniff_encoding(html: &[u8]) -> (&'static Encoding, EncodingSource) {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return (encoding, EncodingSource::ByteOrderMark);
    }

    let head = &html[..html.len().min(SNIFF_WINDOW)];
    let declared = META_CHARSET
        .captures(head)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_bytes()));
    match declared {
        // WHATWG: a UTF-16 label found by an ASCII scan means UTF-8
        Some(encoding) if encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE => {
            (UTF_8, EncodingSource::MetaDeclaration)
        }
        Some(encoding) => (encoding, EncodingSource::MetaDeclaration),
        None => (UTF_8, EncodingSource::Default),
    }
}

/// Decode `html` to a string, replacing malformed sequences with U+FFFD.
///
/// A byte-order mark is stripped.
///
/// # Examples
///
/// ```
/// use zen_reader::encoding::decode_html;
///
/// let html = b"<html><head><meta charset=\"windows-1252\"></head><body>caf\xe9</body></html>";
/// assert!(decode_html(html).contains("café"));
/// ```
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let (encoding, source) = sniff_encoding(html);
    tracing::debug!(encoding = encoding.name(), ?source, "decoding html bytes");
    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}
