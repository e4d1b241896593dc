//! Extraction entry point.
//!
//! One call runs the whole pipeline: clone the source, hydrate the clone,
//! run the strategy chain, then resolve title and metadata and shape the
//! accepted content for reading.

use std::fmt;

use tracing::debug;

use crate::dom::{self, Document};
use crate::extractor::{run_strategies, Accepted, ExternalExtractor};
use crate::hydration::hydrate;
use crate::language::resolve_language;
use crate::metadata::{resolve_metadata, resolve_title};
use crate::options::Options;
use crate::postprocess::{remove_duplicate_title, wrap_sections};
use crate::result::{ExtractedArticle, CONTENT_ROOT_SELECTOR};

/// Reader-view extractor: options plus an optional external strategy.
///
/// With the `readability` feature (on by default) [`Extractor::new`]
/// installs the `dom_smoothie` extractor.
///
/// # Example
///
/// ```rust
/// use zen_reader::Extractor;
///
/// let extractor = Extractor::new().without_external();
/// let html = "<html><body><nav><a href=\"/\">Home</a></nav></body></html>";
/// assert!(extractor.extract(html).is_none());
/// ```
pub struct Extractor {
    options: Options,
    external: Option<Box<dyn ExternalExtractor>>,
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("options", &self.options)
            .field("external", &self.external.as_ref().map(|e| e.name().to_string()))
            .finish()
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

fn default_external() -> Option<Box<dyn ExternalExtractor>> {
    #[cfg(feature = "readability")]
    {
        Some(Box::new(crate::extractor::ReadabilityExtractor))
    }
    #[cfg(not(feature = "readability"))]
    {
        None
    }
}

impl Extractor {
    /// Extractor with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Extractor with custom options.
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            external: default_external(),
        }
    }

    /// Replace the external strategy.
    #[must_use]
    pub fn with_external(mut self, external: impl ExternalExtractor + 'static) -> Self {
        self.external = Some(Box::new(external));
        self
    }

    /// Run without an external strategy.
    #[must_use]
    pub fn without_external(mut self) -> Self {
        self.external = None;
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse `html` and extract its article.
    #[must_use]
    pub fn extract(&self, html: &str) -> Option<ExtractedArticle> {
        let source = dom::parse(html);
        self.extract_document(&source)
    }

    /// Extract the article of an already parsed page.
    ///
    /// `source` is never modified; all edits happen on a private clone.
    /// Returns `None` when the page has no reader-suitable content.
    #[must_use]
    pub fn extract_document(&self, source: &Document) -> Option<ExtractedArticle> {
        let opts = &self.options;
        let working = dom::clone_document(source);
        hydrate(&working.select("html"), opts);

        let Some(accepted) = run_strategies(&working, self.external.as_deref(), opts) else {
            debug!("no reader-suitable content");
            return None;
        };
        Some(finish(accepted, &working, opts))
    }
}

fn finish(accepted: Accepted, working: &Document, opts: &Options) -> ExtractedArticle {
    let Accepted { content, strategy, hints } = accepted;
    let hints = hints.as_ref();

    let title = resolve_title(hints.and_then(|h| h.title.as_deref()), working);
    let metadata = resolve_metadata(&content, working, strategy, hints, opts);

    let language = {
        let root = content.select(CONTENT_ROOT_SELECTOR);
        remove_duplicate_title(&root, &title);
        wrap_sections(&root);
        resolve_language(
            hints.and_then(|h| h.lang.as_deref()),
            &root.text(),
            opts.language_sample_chars,
        )
    };

    debug!(%strategy, %language, title = %title, "article extracted");
    ExtractedArticle {
        title,
        metadata,
        content,
        language,
        strategy,
        outline_limit: opts.max_outline_entries,
    }
}
