//! Configuration options for reader-view extraction.
//!
//! The `Options` struct carries every tunable threshold and table the
//! pipeline consults, so acceptance gates and boilerplate rules can be
//! adjusted without touching traversal code.

use regex::Regex;

use crate::extractor::ExtractorConfig;
use crate::patterns::ALLOWED_VIDEO;
use crate::result::DEFAULT_OUTLINE_LIMIT;
use crate::selector::discard::BoilerplateRules;

/// Configuration options for reader-view extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use zen_reader::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Accept shorter articles from the candidate pass
/// let options = Options {
///     primary_threshold: 150,
///     use_external_extractor: false,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Minimum sanitized text length (non-whitespace chars) for the first
    /// candidate pass to be accepted.
    ///
    /// Default: `300`
    pub primary_threshold: usize,

    /// Minimum sanitized text length for the external extractor's output.
    ///
    /// Default: `120`
    pub external_threshold: usize,

    /// Minimum sanitized text length for the salvage candidate pass.
    ///
    /// Default: `80`
    pub salvage_threshold: usize,

    /// Character threshold handed to the external extractor.
    ///
    /// Default: `200`
    pub external_char_threshold: usize,

    /// Trimmed text length a paragraph needs before its block ancestor
    /// becomes a candidate.
    ///
    /// Default: `60`
    pub candidate_paragraph_min: usize,

    /// Paragraphs shorter than this are skipped by the paragraph fallback.
    ///
    /// Default: `30`
    pub fallback_paragraph_min: usize,

    /// The paragraph fallback succeeds only when it collects more nodes than this.
    ///
    /// Default: `3`
    pub fallback_min_nodes: usize,

    /// Minimum collapsed text length of a `<template>` before it is hydrated.
    ///
    /// Default: `80`
    pub template_min_text: usize,

    /// Maximum number of outline entries.
    ///
    /// Default: `30`
    pub max_outline_entries: usize,

    /// Number of characters sampled for language detection.
    ///
    /// Default: `8000`
    pub language_sample_chars: usize,

    /// Consult the external extractor strategy when one is available.
    ///
    /// Default: `true`
    pub use_external_extractor: bool,

    /// Forwarded to the external extractor.
    ///
    /// Default: `false`
    pub debug: bool,

    /// Address of the document, used to resolve relative author links and
    /// forwarded to the external extractor.
    ///
    /// Default: `None`
    pub source_uri: Option<String>,

    /// Trusted video hosts. Embedded media whose source does not match is dropped.
    ///
    /// Default: [`crate::patterns::ALLOWED_VIDEO_PATTERN`]
    pub allowed_video: Regex,

    /// Boilerplate keyword table and pre-sanitize removal list.
    ///
    /// Default: [`BoilerplateRules::default`]
    pub boilerplate: BoilerplateRules,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            primary_threshold: 300,
            external_threshold: 120,
            salvage_threshold: 80,
            external_char_threshold: 200,
            candidate_paragraph_min: 60,
            fallback_paragraph_min: 30,
            fallback_min_nodes: 3,
            template_min_text: 80,
            max_outline_entries: DEFAULT_OUTLINE_LIMIT,
            language_sample_chars: 8000,
            use_external_extractor: true,
            debug: false,
            source_uri: None,
            allowed_video: ALLOWED_VIDEO.clone(),
            boilerplate: BoilerplateRules::default(),
        }
    }
}

impl Options {
    /// Configuration bundle handed to an external extractor.
    #[must_use]
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            debug: self.debug,
            source_uri: self.source_uri.clone(),
            allowed_video_pattern: self.allowed_video.clone(),
            min_char_threshold: self.external_char_threshold,
        }
    }
}
