//! Drive a reader session the way a host page would.
//!
//! Run with: `cargo run --example reader_session`

use zen_reader::{dom, Extractor, MemoryStore, Reader};

fn main() -> Result<(), zen_reader::Error> {
    let page = dom::parse(&format!(
        "<html><head><title>A Long Walk Through the Old Town</title></head>\
         <body><article><h2>Morning</h2><p>{}</p><h2>Evening</h2><p>{}</p></article></body></html>",
        "The streets were quiet and the bakeries had just opened their doors. ".repeat(6),
        "Lanterns came on one by one as the light faded over the river. ".repeat(6),
    ));

    let mut reader = Reader::new(MemoryStore::new(), Extractor::new())?;

    reader.handle_message(r#"{"type":"SET_READER_PREFS","theme":"beige","fontSize":22}"#, &page)?;
    reader.handle_message(r#"{"type":"TOGGLE_READER_ACTION"}"#, &page)?;

    if let Some(article) = reader.article() {
        println!("Opened: {}", article.title);
        println!("Theme class: {}", reader.preferences().theme.class_name());
        println!("Style: {}", reader.style_attribute().unwrap_or_default());
        for entry in article.outline() {
            println!("  h{} {}", entry.level, entry.text);
        }
    }

    println!("Stored preferences: {}", serde_json::Value::Object(reader.store().values().clone()));

    reader.handle_message(r#"{"type":"TOGGLE_READER_ACTION"}"#, &page)?;
    println!("Active after second toggle: {}", reader.is_active());
    Ok(())
}
