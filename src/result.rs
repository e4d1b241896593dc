//! Result types for extraction output.
//!
//! This module defines the accepted article produced by one extraction call,
//! its metadata, and the outline entries built from its content.

use std::fmt;

use dom_query::{Document, Selection};
use serde::{Deserialize, Serialize};

use crate::dom;
use crate::extractor::Strategy;
use crate::language::Language;
use crate::outline;

/// Selector of the sanitized article container inside [`ExtractedArticle::content`].
pub const CONTENT_ROOT_SELECTOR: &str = "body > div.reader-article";

/// Default cap on outline entries.
pub const DEFAULT_OUTLINE_LIMIT: usize = 30;

/// Author, date and site information for an article.
///
/// Every field defaults to an empty string; missing values are never `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Author name.
    pub author: String,

    /// Absolute URL of the author's page, when the byline links to one.
    pub author_url: String,

    /// Human-readable publication date.
    pub published: String,

    /// Name of the publishing site.
    pub site_name: String,
}

/// One navigable heading in the finished content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineEntry {
    /// Heading level, `1..=6`.
    pub level: u8,

    /// Whitespace-normalized heading text.
    pub text: String,

    /// `id` of the heading element inside the content.
    pub anchor_id: String,
}

impl OutlineEntry {
    /// Display label, condensed for long headings.
    #[must_use]
    pub fn label(&self) -> String {
        outline::condense_label(&self.text)
    }
}

/// The single accepted result of an extraction attempt.
///
/// `content` owns the sanitized tree; the article body is the
/// `div.reader-article` element returned by [`ExtractedArticle::content_root`].
pub struct ExtractedArticle {
    /// Resolved title.
    pub title: String,

    /// Author/date/site metadata.
    pub metadata: Metadata,

    /// Document holding the sanitized, sectioned content.
    pub content: Document,

    /// Dominant language of the content.
    pub language: Language,

    /// Strategy whose output was accepted.
    pub strategy: Strategy,

    pub(crate) outline_limit: usize,
}

impl fmt::Debug for ExtractedArticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractedArticle")
            .field("title", &self.title)
            .field("metadata", &self.metadata)
            .field("language", &self.language)
            .field("strategy", &self.strategy)
            .field("text_length", &self.text_length())
            .finish_non_exhaustive()
    }
}

impl ExtractedArticle {
    /// The `div.reader-article` container of the article body.
    #[must_use]
    pub fn content_root(&self) -> Selection<'_> {
        self.content.select(CONTENT_ROOT_SELECTOR)
    }

    /// Serialized article body, including the container element.
    #[must_use]
    pub fn content_html(&self) -> String {
        self.content_root().html().to_string()
    }

    /// Plain text of the article body, whitespace-normalized.
    #[must_use]
    pub fn text_content(&self) -> String {
        dom::normalize_whitespace(&self.content_root().text())
    }

    /// Non-whitespace character count of the article body.
    #[must_use]
    pub fn text_length(&self) -> usize {
        dom::collapsed_len(&self.content_root().text())
    }

    /// Rebuild the heading outline from the current content.
    ///
    /// Headings without an `id` are given one, so repeated calls return the
    /// same anchors.
    #[must_use]
    pub fn outline(&self) -> Vec<OutlineEntry> {
        outline::build_outline(&self.content_root(), self.outline_limit)
    }

    /// Serializable snapshot of the article.
    #[must_use]
    pub fn to_output(&self) -> ArticleOutput {
        ArticleOutput {
            title: self.title.clone(),
            metadata: self.metadata.clone(),
            language: self.language,
            strategy: self.strategy,
            outline: self.outline(),
            content_html: self.content_html(),
            text: self.text_content(),
        }
    }
}

/// JSON shape of an extracted article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleOutput {
    pub title: String,
    pub metadata: Metadata,
    pub language: Language,
    pub strategy: Strategy,
    pub outline: Vec<OutlineEntry>,
    pub content_html: String,
    pub text: String,
}
