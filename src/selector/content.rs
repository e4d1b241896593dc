//! Content Selectors
//!
//! Selector tables for locating article candidates and for the
//! document-wide paragraph fallback.

/// Semantic and conventional containers that commonly hold the article.
pub const CANDIDATE_SELECTOR: &str = "article, main, [role=\"main\"], .article, .article-body, .post, .post-content, .entry-content, .content";

/// Block ancestors a prose paragraph nominates as a candidate.
pub const BLOCK_ANCESTOR_SELECTOR: &str = "article, section, div";

/// Elements gathered by the paragraph fallback.
pub const FALLBACK_SELECTOR: &str = "p, h1, h2, h3, blockquote, li, figure, img, picture, table";

/// Page chrome the paragraph fallback never collects from.
pub const FALLBACK_EXCLUDED_ANCESTORS: &str = "nav, header, footer, aside, form";

/// Heading tags in rank order.
pub const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Headings considered for duplicate-title removal.
pub const TITLE_HEADING_SELECTOR: &str = "h1, h2";
