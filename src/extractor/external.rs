//! External extractor adapter.
//!
//! Wraps a third-party extractor as one strategy. Failures raised inside the
//! extractor stop here: they are logged and reported as "nothing found".

use dom_query::Document;
use tracing::{debug, warn};

use super::{ExternalArticle, ExternalExtractor, ExtractorConfig};

/// Run `extractor`, converting errors and empty output into `None`.
pub fn try_external(
    extractor: &dyn ExternalExtractor,
    doc: &Document,
    config: &ExtractorConfig,
) -> Option<ExternalArticle> {
    match extractor.try_extract(doc, config) {
        Ok(Some(article)) if !article.content_html.trim().is_empty() => Some(article),
        Ok(_) => {
            debug!(strategy = "external", extractor = extractor.name(), "extractor found no content");
            None
        }
        Err(err) => {
            warn!(strategy = "external", extractor = extractor.name(), error = %err, "external extractor failed");
            None
        }
    }
}

#[cfg(feature = "readability")]
pub use readability::ReadabilityExtractor;

#[cfg(feature = "readability")]
mod readability {
    use dom_query::Document;
    use dom_smoothie::{Config, Readability};

    use crate::dom;
    use crate::error::{Error, Result};
    use crate::extractor::{ExternalArticle, ExternalExtractor, ExtractorConfig};

    fn non_empty(value: Option<String>) -> Option<String> {
        value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    /// Readability-style extractor backed by `dom_smoothie`.
    ///
    /// Runs on a private copy of the document, so the working tree is never
    /// touched by the extractor's own cleanup passes.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ReadabilityExtractor;

    impl ExternalExtractor for ReadabilityExtractor {
        fn name(&self) -> &str {
            "readability"
        }

        fn try_extract(&self, doc: &Document, config: &ExtractorConfig) -> Result<Option<ExternalArticle>> {
            let cfg = Config {
                char_threshold: config.min_char_threshold,
                ..Default::default()
            };
            let copy = dom::clone_document(doc);
            let mut reader = Readability::with_document(copy, config.source_uri.as_deref(), Some(cfg))
                .map_err(|e| Error::ExternalExtractor(e.to_string()))?;
            let article = reader
                .parse()
                .map_err(|e| Error::ExternalExtractor(e.to_string()))?;

            let content_html = article.content.to_string();
            if content_html.trim().is_empty() {
                return Ok(None);
            }
            Ok(Some(ExternalArticle {
                title: non_empty(Some(article.title)),
                content_html,
                byline: non_empty(article.byline),
                published_time: non_empty(article.published_time),
                site_name: non_empty(article.site_name),
                lang: non_empty(article.lang),
            }))
        }
    }
}
