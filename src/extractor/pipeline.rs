//! Content extraction pipeline.
//!
//! Tries each strategy in order and stops at the first whose sanitized
//! output passes its size gate:
//!
//! 1. Best candidate subtree, strict gate (`primary_threshold`)
//! 2. External extractor, moderate gate (`external_threshold`)
//! 3. Best candidate subtree again, relaxed gate (`salvage_threshold`)
//! 4. Paragraph fallback, accepted whenever it collects enough nodes
//!
//! The working document must already be hydrated. The only edits made to
//! it here are the byline markers placed on the top candidate.

use dom_query::Document;
use tracing::debug;

use crate::dom;
use crate::html_processing::sanitize;
use crate::metadata::mark_content_signals;
use crate::options::Options;
use crate::result::CONTENT_ROOT_SELECTOR;

use super::candidates::select_candidate;
use super::external::try_external;
use super::fallback::build_paragraph_fallback;
use super::{ExternalArticle, ExternalExtractor, Strategy};

/// Output of the first strategy that passed its gate.
pub struct Accepted {
    /// Sanitized content; the body holds a single `div.reader-article`.
    pub content: Document,

    /// Strategy that produced `content`.
    pub strategy: Strategy,

    /// External extractor output, kept for its title and metadata hints.
    pub hints: Option<ExternalArticle>,
}

/// Non-whitespace character count of a sanitized document's article body.
#[must_use]
pub fn sanitized_length(content: &Document) -> usize {
    dom::collapsed_len(&content.select(CONTENT_ROOT_SELECTOR).text())
}

fn gate(strategy: Strategy, content: &Document, threshold: usize) -> bool {
    let length = sanitized_length(content);
    let accepted = length > threshold;
    debug!(strategy = %strategy, length, threshold, accepted, "strategy gate");
    accepted
}

fn sanitize_fragment(html: &str, opts: &Options) -> Option<Document> {
    let fragment = dom::parse(&format!("<div>{html}</div>"));
    let root = fragment.select("body > div");
    let node = root.nodes().first().copied()?;
    Some(sanitize(&node, opts))
}

/// Run the strategy chain over a hydrated working document.
///
/// Returns `None` when no strategy produced acceptable content.
#[must_use]
pub fn run_strategies(
    working: &Document,
    external: Option<&dyn ExternalExtractor>,
    opts: &Options,
) -> Option<Accepted> {
    let candidate = select_candidate(&working.select("html"), opts).map(|node| {
        mark_content_signals(&node);
        sanitize(&node, opts)
    });
    if candidate.is_none() {
        debug!(strategy = %Strategy::Candidate, "no candidate found");
    }

    if let Some(content) = candidate.as_ref() {
        if gate(Strategy::Candidate, content, opts.primary_threshold) {
            return candidate.map(|content| Accepted {
                content,
                strategy: Strategy::Candidate,
                hints: None,
            });
        }
    }

    if opts.use_external_extractor {
        if let Some(extractor) = external {
            let config = opts.extractor_config();
            if let Some(article) = try_external(extractor, working, &config) {
                match sanitize_fragment(&article.content_html, opts) {
                    Some(content) if gate(Strategy::External, &content, opts.external_threshold) => {
                        return Some(Accepted {
                            content,
                            strategy: Strategy::External,
                            hints: Some(article),
                        });
                    }
                    Some(_) => {}
                    None => debug!(strategy = %Strategy::External, "extractor output did not parse"),
                }
            }
        }
    }

    if let Some(content) = candidate {
        if gate(Strategy::Salvage, &content, opts.salvage_threshold) {
            return Some(Accepted {
                content,
                strategy: Strategy::Salvage,
                hints: None,
            });
        }
    }

    let Some((html, count)) = build_paragraph_fallback(&working.select("body"), opts) else {
        debug!(strategy = %Strategy::ParagraphFallback, "not enough paragraphs collected");
        return None;
    };
    let parsed = dom::parse(&html);
    let article = parsed.select("article");
    let node = article.nodes().first().copied()?;
    let content = sanitize(&node, opts);
    debug!(
        strategy = %Strategy::ParagraphFallback,
        nodes = count,
        length = sanitized_length(&content),
        "fallback accepted"
    );
    Some(Accepted {
        content,
        strategy: Strategy::ParagraphFallback,
        hints: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::extractor::ExtractorConfig;
    use std::cell::Cell;

    struct Fixed {
        html: String,
        calls: Cell<usize>,
    }

    impl Fixed {
        fn new(html: &str) -> Self {
            Self {
                html: html.to_string(),
                calls: Cell::new(0),
            }
        }
    }

    impl ExternalExtractor for Fixed {
        fn try_extract(&self, _: &Document, _: &ExtractorConfig) -> crate::Result<Option<ExternalArticle>> {
            self.calls.set(self.calls.get() + 1);
            Ok(Some(ExternalArticle {
                title: Some("Hinted Title".to_string()),
                content_html: self.html.clone(),
                ..ExternalArticle::default()
            }))
        }
    }

    struct Broken;

    impl ExternalExtractor for Broken {
        fn try_extract(&self, _: &Document, _: &ExtractorConfig) -> crate::Result<Option<ExternalArticle>> {
            Err(Error::ExternalExtractor("parser exploded".to_string()))
        }
    }

    fn prose(chars: usize) -> String {
        "lorem ipsum ".repeat(chars / 10)
    }

    fn page(article_chars: usize) -> Document {
        dom::parse(&format!(
            "<html><body><nav><a href=\"/\">Home</a></nav><article><p>{}</p></article></body></html>",
            prose(article_chars)
        ))
    }

    #[test]
    fn long_candidate_is_accepted_first() {
        let doc = page(600);
        let external = Fixed::new(&format!("<p>{}</p>", prose(600)));

        let accepted = run_strategies(&doc, Some(&external), &Options::default()).unwrap();

        assert_eq!(accepted.strategy, Strategy::Candidate);
        assert_eq!(external.calls.get(), 0);
        assert!(accepted.hints.is_none());
    }

    #[test]
    fn short_candidate_defers_to_external() {
        let doc = page(200);
        let external = Fixed::new(&format!("<section><p>{}</p></section>", prose(400)));

        let accepted = run_strategies(&doc, Some(&external), &Options::default()).unwrap();

        assert_eq!(accepted.strategy, Strategy::External);
        assert_eq!(accepted.hints.unwrap().title.as_deref(), Some("Hinted Title"));
        assert_eq!(accepted.content.select("div.reader-article > p").length(), 1);
    }

    #[test]
    fn failing_external_falls_through_to_salvage() {
        let doc = page(200);

        let accepted = run_strategies(&doc, Some(&Broken), &Options::default()).unwrap();

        assert_eq!(accepted.strategy, Strategy::Salvage);
    }

    #[test]
    fn external_disabled_by_options() {
        let doc = page(200);
        let external = Fixed::new(&format!("<p>{}</p>", prose(400)));
        let opts = Options {
            use_external_extractor: false,
            ..Options::default()
        };

        let accepted = run_strategies(&doc, Some(&external), &opts).unwrap();

        assert_eq!(accepted.strategy, Strategy::Salvage);
        assert_eq!(external.calls.get(), 0);
    }

    #[test]
    fn short_external_output_is_rejected() {
        let doc = page(200);
        let external = Fixed::new("<p>too short</p>");

        let accepted = run_strategies(&doc, Some(&external), &Options::default()).unwrap();

        assert_eq!(accepted.strategy, Strategy::Salvage);
    }

    #[test]
    fn paragraph_fallback_is_last() {
        let paragraph = "A sentence long enough to survive the fallback filter.";
        let doc = dom::parse(&format!(
            "<html><body><p class=\"x\">{paragraph}</p><span><p>{paragraph}</p></span><h3>Sub</h3><ul><li>one</li></ul></body></html>"
        ));
        let opts = Options {
            candidate_paragraph_min: 1000,
            ..Options::default()
        };

        let accepted = run_strategies(&doc, None, &opts).unwrap();

        assert_eq!(accepted.strategy, Strategy::ParagraphFallback);
        assert_eq!(accepted.content.select("div.reader-article p").length(), 2);
    }

    #[test]
    fn nothing_acceptable_returns_none() {
        let doc = dom::parse("<html><body><span>hi</span></body></html>");

        assert!(run_strategies(&doc, None, &Options::default()).is_none());
    }
}
