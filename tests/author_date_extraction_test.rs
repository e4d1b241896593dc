use zen_reader::{Extractor, ExtractedArticle, Metadata, Options};

const BODY: &str = "<p>Readable body text that comfortably clears the first acceptance gate of the extractor. \
    It keeps going for a while so the candidate is long enough, with a few more ordinary words \
    in a second sentence and then a third sentence to be completely sure about the length.</p>";

fn page(head: &str, article: &str) -> String {
    format!("<html><head>{head}</head><body><article>{article}{BODY}{BODY}</article></body></html>")
}

fn run(html: &str) -> ExtractedArticle {
    Extractor::new().without_external().extract(html).unwrap()
}

#[test]
fn author_from_meta_is_extracted_and_cleaned() {
    let article = run(&page(r#"<meta name="author" content="By Alice">"#, ""));

    assert_eq!(article.metadata.author, "Alice");
    assert_eq!(article.metadata.author_url, "");
}

#[test]
fn rel_author_link_in_body_is_resolved_and_removed() {
    let html = page(
        r#"<meta name="author" content="Meta Name">"#,
        r#"<p class="meta">By <a rel="author" href="/staff/jane-roe">Jane Roe</a></p>"#,
    );
    let options = Options {
        source_uri: Some("https://news.example.com/2024/05/story.html".to_string()),
        use_external_extractor: false,
        ..Options::default()
    };

    let article = Extractor::with_options(options).extract(&html).unwrap();

    assert_eq!(article.metadata.author, "Jane Roe");
    assert_eq!(article.metadata.author_url, "https://news.example.com/staff/jane-roe");
    assert!(!article.text_content().contains("Jane Roe"));
}

#[test]
fn byline_class_is_stripped_of_prefix() {
    let article = run(&page("", r#"<p class="byline">By Sam Lee</p>"#));

    assert_eq!(article.metadata.author, "Sam Lee");
    assert!(!article.text_content().contains("Sam Lee"));
}

#[test]
fn author_outside_article_is_found_in_page() {
    let html = format!(
        r#"<html><body><header><span class="author">Page Level Author</span></header>
        <article>{BODY}{BODY}</article></body></html>"#
    );

    let article = run(&html);

    assert_eq!(article.metadata.author, "Page Level Author");
}

#[test]
fn published_time_meta_is_formatted() {
    let article = run(&page(
        r#"<meta property="article:published_time" content="2024-03-05T09:30:00+02:00">"#,
        "",
    ));

    assert_eq!(article.metadata.published, "Mar 5, 2024, 9:30 AM");
}

#[test]
fn time_element_date_is_used_without_meta() {
    let article = run(&page("", r#"<p>Posted <time datetime="2024-01-15">Monday</time></p>"#));

    assert_eq!(article.metadata.published, "Jan 15, 2024");
}

#[test]
fn itemprop_date_is_removed_from_content() {
    let article = run(&page(
        "",
        r#"<p>Updated <span itemprop="datePublished" content="2023-07-04">July 4th</span></p>"#,
    ));

    assert_eq!(article.metadata.published, "Jul 4, 2023");
    assert!(!article.text_content().contains("July 4th"));
    assert!(article.text_content().contains("Updated"));
}

#[test]
fn unparseable_date_is_kept_raw() {
    let article = run(&page(r#"<meta name="date" content="  sometime last spring ">"#, ""));

    assert_eq!(article.metadata.published, "sometime last spring");
}

#[test]
fn site_name_from_og_or_application_name() {
    let og = run(&page(r#"<meta property="og:site_name" content="Daily Example">"#, ""));
    let app = run(&page(r#"<meta name="application-name" content="Example App">"#, ""));

    assert_eq!(og.metadata.site_name, "Daily Example");
    assert_eq!(app.metadata.site_name, "Example App");
}

#[test]
fn missing_metadata_is_empty_strings() {
    let article = run(&page("", ""));

    assert_eq!(article.metadata, Metadata::default());
    let json = serde_json::to_value(&article.metadata).unwrap();
    assert_eq!(json["author"], "");
    assert_eq!(json["authorUrl"], "");
    assert_eq!(json["published"], "");
    assert_eq!(json["siteName"], "");
}

#[test]
fn byline_div_and_time_element_are_removed_from_content() {
    let article = run(&page(
        "",
        r#"<div class="byline">By Jane Doe</div>
           <p>Published <time datetime="2024-03-05T09:30:00">March 5, 2024</time></p>"#,
    ));

    assert_eq!(article.metadata.author, "Jane Doe");
    assert_eq!(article.metadata.published, "Mar 5, 2024, 9:30 AM");
    let text = article.text_content();
    assert!(!text.contains("Jane Doe"));
    assert!(!text.contains("March 5, 2024"));
    assert!(text.contains("Readable body text"));
}

#[test]
fn byline_section_line_is_removed_whole() {
    let article = run(&page(
        "",
        r#"<section class="meta">Story by <span class="author">Kim Park</span> in Seoul</section>"#,
    ));

    assert_eq!(article.metadata.author, "Kim Park");
    let text = article.text_content();
    assert!(!text.contains("Kim Park"));
    assert!(!text.contains("in Seoul"));
}

#[test]
fn source_page_keeps_its_byline() {
    let html = page("", r#"<div class="byline">By Jane Doe</div>"#);
    let source = zen_reader::dom::parse(&html);

    let article = Extractor::new().without_external().extract_document(&source).unwrap();

    assert_eq!(article.metadata.author, "Jane Doe");
    assert!(source.select("div.byline").text().contains("Jane Doe"));
    assert!(!source.select("[data-reader-byline]").exists());
}
