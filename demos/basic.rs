//! Basic usage example for zen-reader.
//!
//! Run with: `cargo run --example basic`

use zen_reader::{extract, extract_with_options, Options};

fn main() {
    let html = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Example Article - My Blog</title>
            <meta name="author" content="Jane Smith">
            <meta property="article:published_time" content="2024-01-15T08:30:00Z">
            <meta property="og:site_name" content="My Blog">
        </head>
        <body>
            <nav>
                <a href="/">Home</a>
                <a href="/about">About</a>
                <a href="/contact">Contact</a>
            </nav>

            <article>
                <h1>Example Article - My Blog</h1>
                <p class="byline">By Jane Smith</p>

                <p>This is the first paragraph of the article. It contains meaningful
                content that shows how zen-reader keeps the article text while
                dropping navigation, sidebars and other page furniture.</p>

                <h2>Lazy media</h2>
                <p>Images that load on scroll are hydrated before anything is scored,
                so they survive into the reader view.</p>
                <img data-src="https://example.com/photo.jpg" src="spacer.gif" alt="Photo">

                <h2>Sanitizing</h2>
                <p onclick="track()">Event handlers, inline styles and scripts never
                reach the output. Only a closed set of prose tags is kept.</p>
            </article>

            <aside>
                <h3>Related Posts</h3>
                <ul><li>Another article</li></ul>
            </aside>

            <footer><p>2024 My Blog. All rights reserved.</p></footer>
        </body>
        </html>
    "#;

    println!("=== Default Extraction ===\n");
    let Some(article) = extract(html) else {
        println!("no readable content");
        return;
    };

    println!("Title:     {}", article.title);
    println!("Author:    {}", article.metadata.author);
    println!("Published: {}", article.metadata.published);
    println!("Site:      {}", article.metadata.site_name);
    println!("Language:  {}", article.language);
    println!("Strategy:  {}", article.strategy);
    println!("\nOutline:");
    for entry in article.outline() {
        println!("  {}- {} (#{})", "  ".repeat(usize::from(entry.level.saturating_sub(1))), entry.label(), entry.anchor_id);
    }
    println!("\nText:\n{}", article.text_content());

    println!("\n=== Strict Gates, No External Extractor ===\n");
    let options = Options {
        primary_threshold: 5000,
        use_external_extractor: false,
        ..Options::default()
    };
    match extract_with_options(html, &options) {
        Some(article) => println!("Accepted by the {} strategy ({} chars)", article.strategy, article.text_length()),
        None => println!("no readable content"),
    }
}
