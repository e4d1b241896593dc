//! Sanitizer / Allow-list Cleaner
//!
//! Rebuilds an arbitrary subtree into a fresh, inert tree holding only
//! prose-relevant structure. The input is never mutated: [`clean_children`]
//! reads the source nodes and returns a [`CleanNode`] forest, which
//! [`render`] serializes and [`sanitize`] parses into a new document.

use std::collections::HashSet;

use dom_query::{Document, NodeId, NodeRef, Selection};
use regex::Regex;
use url::Url;

use crate::dom;
use crate::extractor::tags::{
    is_allowed_attribute, is_allowed_empty, is_allowed_tag, is_embed_tag, is_url_attribute, is_void_tag,
};
use crate::options::Options;
use crate::patterns::is_script_url;
use crate::selector::discard::BoilerplateRules;
use crate::selector::meta::BYLINE_MARKER;

/// Class of the container every sanitized result is wrapped in.
pub const ARTICLE_CLASS: &str = "reader-article";

/// A node of sanitized output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanNode {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<CleanNode>,
    },
    Text(String),
}

impl CleanNode {
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Text(_) => None,
        }
    }
}

struct Cleaner<'o> {
    rules: &'o BoilerplateRules,
    allowed_video: &'o Regex,
    removed: HashSet<NodeId>,
}

/// Sanitize the children of `root` into the cleaned forest.
///
/// Elements matching the boilerplate removal selectors, and byline lines
/// marked during metadata discovery, are skipped with their subtrees;
/// `root` itself is not judged.
#[must_use]
pub fn clean_children(root: &NodeRef, opts: &Options) -> Vec<CleanNode> {
    let scope = Selection::from(*root);
    let marked = format!("[{BYLINE_MARKER}]");
    let removed = scope
        .select(opts.boilerplate.removal_selector())
        .nodes()
        .iter()
        .chain(scope.select(&marked).nodes().iter())
        .map(|n| n.id)
        .collect();
    let cleaner = Cleaner {
        rules: &opts.boilerplate,
        allowed_video: &opts.allowed_video,
        removed,
    };

    let mut out = Vec::new();
    for child in root.children() {
        cleaner.append_clean(&child, &mut out);
    }
    out
}

/// Sanitize `root` into a new document whose body holds a single
/// `div.reader-article` with the cleaned content.
#[must_use]
pub fn sanitize(root: &NodeRef, opts: &Options) -> Document {
    let cleaned = clean_children(root, opts);
    Document::from(format!("<div class=\"{ARTICLE_CLASS}\">{}</div>", render(&cleaned)))
}

impl Cleaner<'_> {
    fn append_clean(&self, node: &NodeRef, target: &mut Vec<CleanNode>) {
        if node.is_text() {
            let text = node.text();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                target.push(CleanNode::Text(format!("{trimmed} ")));
            }
            return;
        }
        let Some(tag) = dom::node_tag(node) else {
            return;
        };
        if self.removed.contains(&node.id) || self.rules.is_unwanted(node) {
            return;
        }

        if !is_allowed_tag(&tag) {
            if is_embed_tag(&tag) && !self.is_allowed_video(node, &tag) {
                return;
            }
            for child in node.children() {
                self.append_clean(&child, target);
            }
            return;
        }

        let mut attrs = clean_attributes(node, &tag);
        match tag.as_str() {
            "img" => {
                if !has_attr(&attrs, "src") {
                    return;
                }
            }
            "iframe" => {
                let Some(src) = self.iframe_source(node) else {
                    return;
                };
                set_attr(&mut attrs, "src", src);
                set_attr(&mut attrs, "loading", "lazy".to_string());
                set_attr(&mut attrs, "referrerpolicy", "no-referrer-when-downgrade".to_string());
                target.push(CleanNode::Element { tag, attrs, children: Vec::new() });
                return;
            }
            "video" => {
                if !self.is_allowed_video(node, &tag) {
                    return;
                }
                set_attr(&mut attrs, "controls", "controls".to_string());
                if !has_attr(&attrs, "preload") {
                    set_attr(&mut attrs, "preload", "metadata".to_string());
                }
            }
            _ => {}
        }

        let mut children = Vec::new();
        if !is_void_tag(&tag) {
            for child in node.children() {
                self.append_clean(&child, &mut children);
            }
        }
        if children.is_empty() && !is_allowed_empty(&tag) {
            return;
        }
        target.push(CleanNode::Element { tag, attrs, children });
    }

    /// A `<video>` with a source, or an embed whose own or `<source>` URL
    /// points at a trusted video host.
    fn is_allowed_video(&self, node: &NodeRef, tag: &str) -> bool {
        let el = Selection::from(*node);
        if tag == "video" {
            return dom::non_empty_attr(node, "src").is_some() || el.select("source").exists();
        }

        let src = ["src", "data", "data-src"]
            .iter()
            .find_map(|a| dom::non_empty_attr(node, a));
        if src.is_some_and(|s| self.trusted_embed_url(&s).is_some()) {
            return true;
        }

        let source = el.select("source[src], source[data-src], source[data-srcset]").first();
        let Some(source) = source.nodes().first() else {
            return false;
        };
        ["src", "data-src", "data-srcset"]
            .iter()
            .find_map(|a| dom::non_empty_attr(source, a))
            .is_some_and(|s| self.trusted_embed_url(&s).is_some())
    }

    /// The trusted source of an iframe: its `src`, or `data-src`/`data-url`
    /// when `src` is missing.
    fn iframe_source(&self, node: &NodeRef) -> Option<String> {
        ["src", "data-src", "data-url"]
            .iter()
            .find_map(|a| dom::non_empty_attr(node, a))
            .and_then(|url| self.trusted_embed_url(&url))
    }

    /// `value` when it is an absolute or protocol-relative http(s) URL
    /// accepted by the trusted video pattern.
    fn trusted_embed_url(&self, value: &str) -> Option<String> {
        let value = value.trim();
        let parsed = if value.starts_with("//") {
            Url::parse(&format!("https:{value}"))
        } else {
            Url::parse(value)
        }
        .ok()?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return None;
        }
        self.allowed_video
            .is_match(parsed.as_str())
            .then(|| value.to_string())
    }
}

/// Attributes kept on a retained element: the tag's allow-listed names,
/// minus URL values that would run script.
fn clean_attributes(node: &NodeRef, tag: &str) -> Vec<(String, String)> {
    dom::get_all_attributes(node)
        .into_iter()
        .filter_map(|(name, value)| {
            let name = name.to_ascii_lowercase();
            let keep = is_allowed_attribute(tag, &name) && !(is_url_attribute(&name) && is_script_url(&value));
            keep.then_some((name, value))
        })
        .collect()
}

fn has_attr(attrs: &[(String, String)], name: &str) -> bool {
    attrs.iter().any(|(k, v)| k == name && !v.trim().is_empty())
}

fn set_attr(attrs: &mut Vec<(String, String)>, name: &str, value: String) {
    if let Some(slot) = attrs.iter_mut().find(|(k, _)| k == name) {
        slot.1 = value;
    } else {
        attrs.push((name.to_string(), value));
    }
}

/// Serialize a cleaned forest to HTML.
#[must_use]
pub fn render(nodes: &[CleanNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(node, &mut out);
    }
    out
}

fn render_node(node: &CleanNode, out: &mut String) {
    match node {
        CleanNode::Text(text) => out.push_str(&dom::escape_html(text)),
        CleanNode::Element { tag, attrs, children } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&dom::escape_html(value));
                out.push('"');
            }
            out.push('>');
            if is_void_tag(tag) {
                return;
            }
            for child in children {
                render_node(child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    fn clean(html: &str) -> Document {
        let doc = parse(&format!("<div id=\"root\">{html}</div>"));
        let root = *doc.select("#root").nodes().first().unwrap();
        sanitize(&root, &Options::default())
    }

    fn inner(doc: &Document) -> String {
        doc.select("div.reader-article").inner_html().to_string()
    }

    #[test]
    fn wrappers_are_unwrapped() {
        let out = clean("<div><section><p>Hello <span>world</span></p></section></div>");

        assert_eq!(inner(&out), "<p>Hello <span>world </span></p>");
    }

    #[test]
    fn event_handlers_and_styles_are_dropped() {
        let out = clean(r#"<p onclick="x()" style="color:red" class="lead" ONMOUSEOVER="y()">Text</p>"#);
        let p = out.select("p");

        assert!(p.attr("onclick").is_none());
        assert!(p.attr("onmouseover").is_none());
        assert!(p.attr("style").is_none());
        assert_eq!(p.attr("class").as_deref(), Some("lead"));
    }

    #[test]
    fn javascript_urls_are_dropped() {
        let out = clean(r#"<p><a href="javascript:alert(1)">bad</a> <a href="/ok">good</a></p>"#);
        let links = out.select("a");

        assert_eq!(links.length(), 2);
        assert!(links.first().attr("href").is_none());
        assert_eq!(out.select("a[href=\"/ok\"]").length(), 1);
    }

    #[test]
    fn obfuscated_script_urls_are_dropped() {
        let out = clean("<p><a href=\"java&#9;script:alert(1)\">tab</a> <a href=\"&#10;javascript:alert(2)\">newline</a></p>");

        assert_eq!(out.select("a").length(), 2);
        assert!(!out.select("a[href]").exists());
    }

    #[test]
    fn attributes_outside_the_allow_list_are_dropped() {
        let out = clean(r##"<p data-track="x" hidden>Text <a href="/a" target="_blank" ping="/p">link</a></p><img src="a.jpg" alt="A" usemap="#m">"##);

        assert!(out.select("p").attr("data-track").is_none());
        assert!(out.select("p").attr("hidden").is_none());
        assert_eq!(out.select("a").attr("href").as_deref(), Some("/a"));
        assert!(out.select("a").attr("target").is_none());
        assert!(out.select("a").attr("ping").is_none());
        assert_eq!(out.select("img").attr("alt").as_deref(), Some("A"));
        assert!(out.select("img").attr("usemap").is_none());
    }

    #[test]
    fn marked_byline_lines_are_dropped() {
        let out = clean(r#"<p data-reader-byline="">By Jane</p><p>Body</p>"#);

        assert_eq!(inner(&out), "<p>Body </p>");
    }

    #[test]
    fn removal_selectors_drop_whole_subtrees() {
        let out = clean("<p>Keep</p><script>bad()</script><nav><p>Menu</p></nav><aside>Side</aside><form><p>Field</p></form>");

        assert_eq!(inner(&out), "<p>Keep </p>");
    }

    #[test]
    fn unwanted_classes_are_dropped() {
        let out = clean(r#"<p>Body</p><p class="related-links">Related</p><span id="promo">Buy</span>"#);

        assert_eq!(out.select("div.reader-article").text().trim(), "Body");
    }

    #[test]
    fn empty_wrappers_are_dropped_but_structure_kept() {
        let out = clean("<p>  </p><span></span><table><tr><td></td></tr></table>");

        assert!(!out.select("p").exists());
        assert!(!out.select("span").exists());
        assert!(out.select("table td").exists());
    }

    #[test]
    fn images_require_src() {
        let out = clean(r#"<p>x</p><img alt="no src"><img src="a.jpg" alt="ok">"#);

        assert_eq!(out.select("img").length(), 1);
        assert_eq!(out.select("img").attr("src").as_deref(), Some("a.jpg"));
    }

    #[test]
    fn trusted_iframe_is_kept_with_hints() {
        let out = clean(r#"<iframe data-src="https://www.youtube.com/embed/abc"></iframe><iframe src="https://evil.example/embed"></iframe>"#);
        let iframe = out.select("iframe");

        assert_eq!(iframe.length(), 1);
        assert_eq!(iframe.attr("src").as_deref(), Some("https://www.youtube.com/embed/abc"));
        assert_eq!(iframe.attr("loading").as_deref(), Some("lazy"));
        assert_eq!(iframe.attr("referrerpolicy").as_deref(), Some("no-referrer-when-downgrade"));
    }

    #[test]
    fn iframe_source_must_be_a_trusted_http_url() {
        let out = clean(
            r#"<iframe src="data:text/html,<script>alert(1)</script>//youtube.com/"></iframe>
               <iframe src="https://youtube.com.evil.example/embed/x"></iframe>
               <iframe src="https://evil.example/?u=//www.youtube.com/embed/x"></iframe>
               <iframe data-url="javascript:alert(1)//www.youtube.com/"></iframe>
               <iframe src="//www.youtube.com/embed/ok"></iframe>"#,
        );
        let iframe = out.select("iframe");

        assert_eq!(iframe.length(), 1);
        assert_eq!(iframe.attr("src").as_deref(), Some("//www.youtube.com/embed/ok"));
    }

    #[test]
    fn untrusted_src_is_not_rescued_by_data_src() {
        let out = clean(r#"<iframe src="https://evil.example/x" data-src="https://www.youtube.com/embed/abc"></iframe>"#);

        assert!(!out.select("iframe").exists());
    }

    #[test]
    fn iframe_srcdoc_is_dropped() {
        let out = clean(r#"<iframe src="https://www.youtube.com/embed/x" srcdoc="<script>alert(1)</script>" allowfullscreen></iframe>"#);
        let iframe = out.select("iframe");

        assert_eq!(iframe.length(), 1);
        assert!(iframe.attr("srcdoc").is_none());
        assert!(iframe.attr("allowfullscreen").is_some());
    }

    #[test]
    fn video_requires_source_and_gets_controls() {
        let out = clean(r#"<video><source src="v.mp4"></video><video poster="p.jpg"></video>"#);
        let video = out.select("video");

        assert_eq!(video.length(), 1);
        assert_eq!(video.attr("controls").as_deref(), Some("controls"));
        assert_eq!(video.attr("preload").as_deref(), Some("metadata"));
        assert!(out.select("video > source[src=\"v.mp4\"]").exists());
    }

    #[test]
    fn untrusted_objects_are_dropped_with_content() {
        let out = clean(r#"<p>Text</p><object data="x.swf"><p>Fallback</p></object>"#);

        assert_eq!(out.select("div.reader-article").text().trim(), "Text");
    }

    #[test]
    fn clean_children_is_pure() {
        let doc = parse(r#"<div id="root"><div class="wrap"><p style="x">Hi</p></div></div>"#);
        let before = doc.html().to_string();
        let root = *doc.select("#root").nodes().first().unwrap();

        let cleaned = clean_children(&root, &Options::default());

        assert_eq!(doc.html().to_string(), before);
        assert_eq!(
            cleaned,
            vec![CleanNode::Element {
                tag: "p".to_string(),
                attrs: vec![],
                children: vec![CleanNode::Text("Hi ".to_string())],
            }]
        );
    }

    #[test]
    fn sanitizing_twice_is_stable() {
        let first = clean(r#"
            <div class="story">
                <h2 onclick="x()">Heading</h2>
                <p>Alpha <em>beta</em> <a href="/g">gamma</a></p>
                <figure><img src="a.jpg"><figcaption>Cap</figcaption></figure>
                <ul><li>One</li><li>Two</li></ul>
                <table><tbody><tr><td>Cell</td></tr></tbody></table>
            </div>
        "#);
        let root = *first.select("div.reader-article").nodes().first().unwrap();
        let second = sanitize(&root, &Options::default());

        assert_eq!(inner(&second), inner(&first));
    }

    #[test]
    fn render_escapes_text_and_attributes() {
        let nodes = vec![CleanNode::Element {
            tag: "a".to_string(),
            attrs: vec![("title".to_string(), "\"q\" & <t>".to_string())],
            children: vec![CleanNode::Text("1 < 2 ".to_string())],
        }];

        assert_eq!(render(&nodes), "<a title=\"&quot;q&quot; &amp; &lt;t&gt;\">1 &lt; 2 </a>");
    }
}
