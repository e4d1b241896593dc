//! Boilerplate Discard Rules
//!
//! The "unwanted node" classifier and the pre-sanitize removal list.
//! Both are data, not code: a keyword table matched against class/id/role
//! tokens, and a selector list of elements stripped before the allow-list walk.

use std::sync::LazyLock;

use dom_query::NodeRef;
use regex::Regex;

use crate::error::Result;

/// Keywords marking a node as boilerplate when they appear as a whole
/// class/id/role token (tokens are separated by whitespace, `-` or `_`).
pub const UNWANTED_KEYWORDS: &[&str] = &[
    "related", "recommend", "recommended", "recommendations", "trending",
    "comment", "comments", "promo", "promoted", "ad", "ads", "advert",
    "advertisement", "adsbygoogle", "footer", "sidebar", "sponsored", "nav",
    "navbar", "navigation", "more-articles", "more-stories", "newsletter",
];

/// Elements removed outright before sanitization walks a subtree.
pub const REMOVAL_SELECTORS: &[&str] = &[
    "script", "style", "noscript", "template", "svg", "form", "button", "input",
    "select", "textarea", "nav", "aside", "[role=\"navigation\"]",
    "[role=\"banner\"]", "[role=\"complementary\"]", ".advert", ".ads",
    ".social", ".sidebar", ".comment", ".comments",
];

#[allow(clippy::expect_used)]
static DEFAULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&keyword_pattern(UNWANTED_KEYWORDS)).expect("UNWANTED_KEYWORDS regex")
});

fn keyword_pattern<S: AsRef<str>>(keywords: &[S]) -> String {
    if keywords.is_empty() {
        return r"[^\s\S]".to_string();
    }
    let alternation = keywords
        .iter()
        .map(|k| regex::escape(k.as_ref()))
        .collect::<Vec<_>>()
        .join("|");
    format!(r"(?i)(?:^|[\s_-])(?:{alternation})(?:$|[\s_-])")
}

/// Boilerplate classification table.
///
/// `Default` carries the built-in keyword and removal lists; custom tables
/// are built with [`BoilerplateRules::with_keywords`].
#[derive(Debug, Clone)]
pub struct BoilerplateRules {
    keywords: Vec<String>,
    pattern: Regex,
    removal_selector: String,
}

impl Default for BoilerplateRules {
    fn default() -> Self {
        Self {
            keywords: UNWANTED_KEYWORDS.iter().map(|k| (*k).to_string()).collect(),
            pattern: DEFAULT_PATTERN.clone(),
            removal_selector: REMOVAL_SELECTORS.join(", "),
        }
    }
}

impl BoilerplateRules {
    /// Build a table from custom keywords, keeping the default removal list.
    pub fn with_keywords<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        let pattern = Regex::new(&keyword_pattern(&keywords))?;
        Ok(Self {
            keywords,
            pattern,
            removal_selector: REMOVAL_SELECTORS.join(", "),
        })
    }

    /// Replace the pre-sanitize removal selectors.
    #[must_use]
    pub fn with_removal_selectors<I, S>(self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let removal_selector = selectors
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self { removal_selector, ..self }
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Comma-joined selector group of elements dropped before sanitizing.
    #[must_use]
    pub fn removal_selector(&self) -> &str {
        &self.removal_selector
    }

    /// Test a raw "class id role" string against the keyword table.
    #[must_use]
    pub fn matches_name(&self, value: &str) -> bool {
        !value.trim().is_empty() && self.pattern.is_match(value)
    }

    /// Whether an element's class, id or role marks it as boilerplate.
    ///
    /// Non-element nodes are never unwanted.
    #[must_use]
    pub fn is_unwanted(&self, node: &NodeRef) -> bool {
        if !node.is_element() {
            return false;
        }
        let value = format!(
            "{} {} {}",
            node.attr("class").unwrap_or_default(),
            node.attr("id").unwrap_or_default(),
            node.attr("role").unwrap_or_default(),
        );
        self.matches_name(&value)
    }
}
