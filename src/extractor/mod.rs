//! Content extraction strategies.
//!
//! # Module Structure
//!
//! - `tags`: Sanitizer allow-list constants
//! - `candidates`: Candidate pool and density scoring
//! - `fallback`: Document-wide paragraph collection
//! - `external`: Adapter over a third-party extractor (`dom_smoothie`)
//! - `pipeline`: Strategy chain with size-gated acceptance
//!
//! # Usage
//!
//! ```rust,ignore
//! use zen_reader::extractor::{pipeline, candidates};
//!
//! let working = dom::clone_document(&source);
//! if let Some(best) = candidates::select_candidate(&working.select("html"), &options) {
//!     // score and sanitize the winning subtree
//! }
//! let accepted = pipeline::run_strategies(&working, None, &options);
//! ```

use std::fmt;

use dom_query::Document;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod candidates;
pub mod external;
pub mod fallback;
pub mod pipeline;
pub mod tags;

pub use candidates::{rank_candidates, score_element, select_candidate, Candidate};
#[cfg(feature = "readability")]
pub use external::ReadabilityExtractor;
pub use fallback::build_paragraph_fallback;
pub use pipeline::{run_strategies, Accepted};

/// Extraction strategy, in the order the pipeline tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Best-scoring candidate subtree, strict size gate.
    Candidate,
    /// Third-party extractor output.
    External,
    /// Best-scoring candidate subtree, relaxed size gate.
    Salvage,
    /// Every prose element outside page chrome.
    ParagraphFallback,
}

impl Strategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::External => "external",
            Self::Salvage => "salvage",
            Self::ParagraphFallback => "paragraph_fallback",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration bundle handed to an external extractor.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub debug: bool,
    pub source_uri: Option<String>,
    pub allowed_video_pattern: Regex,
    pub min_char_threshold: usize,
}

/// Article shape returned by an external extractor.
///
/// Only `content_html` is required; the other fields are hints for the
/// title and metadata resolvers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalArticle {
    pub title: Option<String>,
    pub content_html: String,
    pub byline: Option<String>,
    pub published_time: Option<String>,
    pub site_name: Option<String>,
    pub lang: Option<String>,
}

/// A third-party extractor consulted as one strategy.
///
/// Implementations receive the hydrated working document and must not rely
/// on mutating it. Returning `Ok(None)` means "nothing found"; errors are
/// logged by the pipeline and treated the same way.
pub trait ExternalExtractor {
    /// Short name used in log output.
    fn name(&self) -> &str {
        "external"
    }

    /// Try to extract an article from `doc`.
    ///
    /// # Errors
    ///
    /// Any failure inside the extractor. The pipeline never propagates it.
    fn try_extract(&self, doc: &Document, config: &ExtractorConfig) -> Result<Option<ExternalArticle>>;
}
