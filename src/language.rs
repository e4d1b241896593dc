//! Dominant-script language detection.
//!
//! A coarse two-way classifier: counts Latin letters against CJK ideographs
//! in a text sample. It only chooses a font stack and heading conventions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Language of the finished article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh")]
    Chinese,
}

impl Language {
    /// Two-letter code (`"en"` or `"zh"`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Chinese => "zh",
        }
    }

    /// Map an extractor-reported language tag onto the binary classification.
    ///
    /// Returns `None` for tags that are neither Chinese nor English so the
    /// caller can fall back to script counting.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        if tag == "zh" || tag.starts_with("zh-") || tag.starts_with("zh_") {
            Some(Self::Chinese)
        } else if tag == "en" || tag.starts_with("en-") || tag.starts_with("en_") {
            Some(Self::English)
        } else {
            None
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Basic Latin letters through Latin Extended-B, plus Latin Extended Additional.
fn is_latin(ch: char) -> bool {
    matches!(ch as u32, 0x0041..=0x024F | 0x1E00..=0x1EFF)
}

/// CJK Extension A, Unified Ideographs, Compatibility Ideographs.
fn is_cjk(ch: char) -> bool {
    matches!(ch as u32, 0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF)
}

/// Classify the first `sample_chars` characters of `text`.
///
/// Chinese wins only on a strict majority; ties and empty input are English.
#[must_use]
pub fn detect_language(text: &str, sample_chars: usize) -> Language {
    let (latin, cjk) = text
        .chars()
        .take(sample_chars)
        .fold((0usize, 0usize), |(latin, cjk), ch| {
            (latin + usize::from(is_latin(ch)), cjk + usize::from(is_cjk(ch)))
        });

    if cjk > latin {
        Language::Chinese
    } else {
        Language::English
    }
}

/// Prefer a recognizable extractor hint, otherwise count scripts.
#[must_use]
pub fn resolve_language(hint: Option<&str>, text: &str, sample_chars: usize) -> Language {
    hint.and_then(Language::from_tag)
        .unwrap_or_else(|| detect_language(text, sample_chars))
}
