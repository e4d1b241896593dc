use std::collections::HashSet;

use zen_reader::dom::{self, Document};
use zen_reader::extractor::tags::ALLOWED_TAGS;
use zen_reader::{
    extract_with_options, ExternalArticle, ExternalExtractor, ExtractedArticle, Extractor,
    ExtractorConfig, Options, Strategy,
};

fn local() -> Extractor {
    Extractor::new().without_external()
}

fn chunk(chars: usize) -> String {
    "abcdefghij".repeat(chars / 10)
}

fn assert_clean_output(article: &ExtractedArticle) {
    let allowed: HashSet<&str> = ALLOWED_TAGS.into_iter().collect();
    for node in article.content_root().select("*").nodes() {
        let tag = dom::node_tag(node).unwrap();
        let is_section = tag == "div" && node.attr("class").as_deref() == Some("reader-section");
        assert!(allowed.contains(tag.as_str()) || is_section, "unexpected <{tag}>");
        for (name, _) in dom::get_all_attributes(node) {
            assert!(!name.starts_with("on"), "event handler {name} on <{tag}>");
            assert_ne!(name, "style", "inline style on <{tag}>");
        }
    }
}

#[test]
fn dense_main_is_selected_over_link_farm() {
    let paragraphs: String = (0..10).map(|_| format!("<p>{}</p>", chunk(200))).collect();
    let nav_links: String = (0..6).map(|i| format!("<a href=\"/n{i}\">{}</a>", chunk(50))).collect();
    let html = format!(
        r#"<html><head><title>Dense Article Scenario</title></head><body>
            <nav>{nav_links}</nav>
            <main>{paragraphs}<a href="/a">{}</a><a href="/b">{}</a></main>
        </body></html>"#,
        chunk(20),
        chunk(30)
    );

    let article = local().extract(&html).unwrap();

    assert_eq!(article.strategy, Strategy::Candidate);
    assert_eq!(article.content_root().select("p").length(), 10);
    assert!(article.text_length() >= 2000);
    assert_clean_output(&article);
}

#[test]
fn long_candidate_never_reaches_fallback() {
    let paragraphs: String = (0..6)
        .map(|i| format!("<p>Paragraph number {i} carries a reasonable amount of ordinary prose text.</p>"))
        .collect();
    let html = format!("<html><body><div class=\"story\">{paragraphs}</div></body></html>");

    let article = local().extract(&html).unwrap();

    assert!(article.text_length() >= 300);
    assert_eq!(article.strategy, Strategy::Candidate);
}

#[test]
fn short_candidate_is_salvaged() {
    let html = format!(
        "<html><body><article><p>{}</p></article></body></html>",
        "Just enough words here. ".repeat(6)
    );

    let article = local().extract(&html).unwrap();

    assert_eq!(article.strategy, Strategy::Salvage);
    assert!(article.text_length() > 80);
    assert!(article.text_length() <= 300);
}

#[test]
fn scattered_paragraphs_use_fallback() {
    let para = "A loose paragraph outside any container, long enough to count.";
    let html = format!(
        r#"<html><body>
            <header><p>{para}</p></header>
            <span><p>{para}</p></span>
            <span><p>{para}</p></span>
            <span><h2>Loose heading</h2></span>
            <span><ul><li>Loose item</li></ul></span>
            <footer><p>{para}</p></footer>
        </body></html>"#
    );
    let options = Options {
        candidate_paragraph_min: 200,
        use_external_extractor: false,
        ..Options::default()
    };

    let article = extract_with_options(&html, &options).unwrap();

    assert_eq!(article.strategy, Strategy::ParagraphFallback);
    assert_eq!(article.content_root().select("p").length(), 2);
    assert_eq!(article.content_root().select("li").length(), 1);
}

#[test]
fn navigation_only_page_has_no_article() {
    let html = r#"<html><body>
        <nav><a href="/">Home</a><a href="/news">News</a><a href="/about">About</a></nav>
        <footer><p>Copyright</p></footer>
    </body></html>"#;

    assert!(local().extract(html).is_none());
}

#[test]
fn unsafe_markup_never_survives() {
    let html = format!(
        r#"<html><body><article>
            <div onclick="steal()" style="color:red"><p onmouseover="x()" style="font-size:40px">{}</p></div>
            <script>alert(1)</script>
            <form><input name="q"><p>{}</p></form>
            <p><a href="javascript:alert(1)">bad link</a> and <a href="/ok" onclick="x()">good link</a></p>
            <iframe src="https://evil.example.com/embed"></iframe>
            <custom-widget><p>Wrapped prose inside a custom element survives unwrapping.</p></custom-widget>
        </article></body></html>"#,
        "Safe prose that should be kept after cleaning. ".repeat(8),
        "Form text. ".repeat(4)
    );

    let article = local().extract(&html).unwrap();
    let content = article.content_html();

    assert_clean_output(&article);
    assert!(!content.contains("alert"));
    assert!(!content.contains("Form text"));
    assert!(!content.contains("evil.example.com"));
    assert!(content.contains("href=\"/ok\""));
    assert!(content.contains("Wrapped prose"));
}

#[test]
fn content_is_sectioned_at_headings() {
    let html = format!(
        r#"<html><head><title>Sections Make Reading Easier</title></head><body><article>
            <p>{0}</p><h2>First part</h2><p>{0}</p><h3>Second part</h3><p>{0}</p>
        </article></body></html>"#,
        "Section body text. ".repeat(8)
    );

    let article = local().extract(&html).unwrap();
    let root = article.content_root();

    assert_eq!(root.children().length(), 3);
    assert_eq!(root.select("div.reader-section").length(), 3);
}

struct StaticExtractor(&'static str);

impl ExternalExtractor for StaticExtractor {
    fn name(&self) -> &str {
        "static"
    }

    fn try_extract(&self, _: &Document, config: &ExtractorConfig) -> zen_reader::Result<Option<ExternalArticle>> {
        assert_eq!(config.min_char_threshold, 200);
        Ok(Some(ExternalArticle {
            title: Some("Static Extractor Title".to_string()),
            content_html: self.0.to_string(),
            site_name: Some("Static Site".to_string()),
            ..ExternalArticle::default()
        }))
    }
}

struct PanicFreeFailure;

impl ExternalExtractor for PanicFreeFailure {
    fn try_extract(&self, _: &Document, _: &ExtractorConfig) -> zen_reader::Result<Option<ExternalArticle>> {
        Err(zen_reader::Error::ExternalExtractor("unsupported page".to_string()))
    }
}

#[test]
fn external_strategy_fills_gap_between_gates() {
    let html = format!(
        "<html><body><article><p>{}</p></article></body></html>",
        "Short candidate. ".repeat(8)
    );
    let external = StaticExtractor(
        "<div><p>External output paragraph with plenty of content for the moderate gate to pass without trouble at all.</p>\
         <p>Another external paragraph that adds a second block of ordinary running prose.</p></div>",
    );

    let article = Extractor::new().with_external(external).extract(&html).unwrap();

    assert_eq!(article.strategy, Strategy::External);
    assert_eq!(article.title, "Static Extractor Title");
    assert_eq!(article.metadata.site_name, "Static Site");
    assert!(article.text_content().contains("External output"));
}

#[test]
fn failing_external_does_not_abort_extraction() {
    let html = format!(
        "<html><body><article><p>{}</p></article></body></html>",
        "Short candidate. ".repeat(8)
    );

    let article = Extractor::new().with_external(PanicFreeFailure).extract(&html).unwrap();

    assert_eq!(article.strategy, Strategy::Salvage);
}

#[test]
fn extraction_is_repeatable() {
    let html = format!(
        r#"<html><body><article><h2>Heading</h2><p>{}</p><img data-src="/a.jpg" src="spacer.gif"></article></body></html>"#,
        "Repeatable output text. ".repeat(20)
    );
    let extractor = local();

    let first = extractor.extract(&html).unwrap();
    let second = extractor.extract(&html).unwrap();

    assert_eq!(first.content_html(), second.content_html());
    assert_eq!(first.title, second.title);
}

#[test]
fn output_serializes_to_camel_case_json() {
    let html = format!(
        r#"<html><head><title>Serialized Article Title</title><meta property="og:site_name" content="Example"></head>
        <body><article><h2>Part</h2><p>{}</p></article></body></html>"#,
        "Serialized body words. ".repeat(20)
    );

    let output = local().extract(&html).unwrap().to_output();
    let json = serde_json::to_value(&output).unwrap();

    assert_eq!(json["title"], "Serialized Article Title");
    assert_eq!(json["metadata"]["siteName"], "Example");
    assert_eq!(json["language"], "en");
    assert_eq!(json["strategy"], "candidate");
    assert_eq!(json["outline"][0]["level"], 2);
    assert!(json["contentHtml"].as_str().unwrap().starts_with("<div class=\"reader-article\">"));
}
