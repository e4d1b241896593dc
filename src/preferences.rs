//! Reader style preferences.
//!
//! Preferences are a plain value handed to every formatting call. They are
//! seeded from and written back to an injected [`PreferenceStore`], keyed
//! per device.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::language::Language;

/// Font stack used for Latin-script articles.
pub const FONT_FALLBACK_LATIN: &str = r#""Georgia", "Times New Roman", serif"#;

/// Font stack used for Chinese articles.
pub const FONT_FALLBACK_CJK: &str =
    r#""PingFang SC", "Hiragino Sans GB", "Microsoft YaHei", "Noto Sans SC", "WenQuanYi Micro Hei", sans-serif"#;

pub const KEY_THEME: &str = "readerTheme";
pub const KEY_FONT_SIZE: &str = "readerFontSize";
pub const KEY_LINE_HEIGHT: &str = "readerLineHeight";
pub const KEY_MAX_WIDTH: &str = "readerMaxWidth";
pub const KEY_TEXT_ALIGN: &str = "readerTextAlign";
pub const KEY_FONT_FAMILY: &str = "readerFontFamily";

/// Every key the reader persists.
pub const STORAGE_KEYS: [&str; 6] = [
    KEY_THEME,
    KEY_FONT_SIZE,
    KEY_LINE_HEIGHT,
    KEY_MAX_WIDTH,
    KEY_TEXT_ALIGN,
    KEY_FONT_FAMILY,
];

// =============================================================================
// Themes and alignment
// =============================================================================

/// Color theme of the reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    White,
    Beige,
    Gray,
    Black,
}

impl Theme {
    pub const ALL: [Self; 4] = [Self::White, Self::Beige, Self::Gray, Self::Black];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Beige => "beige",
            Self::Gray => "gray",
            Self::Black => "black",
        }
    }

    /// Class applied to the reader container.
    #[must_use]
    pub fn class_name(self) -> String {
        format!("reader-theme-{}", self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::Preferences {
                key: KEY_THEME.to_string(),
                reason: format!("unknown theme {s:?}"),
            })
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text alignment of article paragraphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Justify,
    Left,
    Center,
}

impl TextAlign {
    pub const ALL: [Self; 3] = [Self::Justify, Self::Left, Self::Center];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Justify => "justify",
            Self::Left => "left",
            Self::Center => "center",
        }
    }
}

impl FromStr for TextAlign {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| Error::Preferences {
                key: KEY_TEXT_ALIGN.to_string(),
                reason: format!("unknown alignment {s:?}"),
            })
    }
}

// =============================================================================
// Numeric steppers
// =============================================================================

/// Bounded numeric control: values are clamped and move in fixed steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stepper {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

pub const FONT_SIZE: Stepper = Stepper { min: 14.0, max: 30.0, step: 1.0 };
pub const LINE_HEIGHT: Stepper = Stepper { min: 1.2, max: 2.4, step: 0.05 };
pub const MAX_WIDTH: Stepper = Stepper { min: 600.0, max: 1100.0, step: 10.0 };

impl Stepper {
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Move `value` by `steps` increments, rounded to three decimals and clamped.
    #[must_use]
    pub fn step(&self, value: f64, steps: i32) -> f64 {
        let next = value + f64::from(steps) * self.step;
        self.clamp((next * 1000.0).round() / 1000.0)
    }
}

// =============================================================================
// Preferences
// =============================================================================

/// Per-device reader style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderPreferences {
    pub theme: Theme,
    pub font_size: f64,
    pub line_height: f64,
    pub max_width: f64,
    pub text_align: TextAlign,
    pub font_family: String,
}

impl Default for ReaderPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::White,
            font_size: 20.0,
            line_height: 1.7,
            max_width: 900.0,
            text_align: TextAlign::Justify,
            font_family: FONT_FALLBACK_LATIN.to_string(),
        }
    }
}

fn stored_number(values: &Map<String, Value>, key: &str) -> Option<f64> {
    values.get(key).and_then(Value::as_f64).filter(|v| *v != 0.0)
}

fn stored_str<'a>(values: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    values.get(key).and_then(Value::as_str).filter(|v| !v.is_empty())
}

impl ReaderPreferences {
    /// Defaults overridden by whatever valid values `store` holds.
    ///
    /// Unknown themes and alignments are ignored; numbers are clamped to
    /// their stepper ranges.
    ///
    /// # Errors
    ///
    /// Propagates store read failures.
    pub fn load(store: &dyn PreferenceStore) -> Result<Self> {
        let stored = store.get(&STORAGE_KEYS)?;
        Ok(Self::from_stored(&stored))
    }

    /// Defaults overridden by the valid entries of `stored`.
    #[must_use]
    pub fn from_stored(stored: &Map<String, Value>) -> Self {
        let mut prefs = Self::default();

        if let Some(theme) = stored_str(stored, KEY_THEME) {
            match theme.parse() {
                Ok(theme) => prefs.theme = theme,
                Err(err) => debug!(error = %err, "ignoring stored theme"),
            }
        }
        if let Some(size) = stored_number(stored, KEY_FONT_SIZE) {
            prefs.font_size = FONT_SIZE.clamp(size);
        }
        if let Some(height) = stored_number(stored, KEY_LINE_HEIGHT) {
            prefs.line_height = LINE_HEIGHT.clamp(height);
        }
        if let Some(width) = stored_number(stored, KEY_MAX_WIDTH) {
            prefs.max_width = MAX_WIDTH.clamp(width);
        }
        if let Some(align) = stored_str(stored, KEY_TEXT_ALIGN) {
            match align.parse() {
                Ok(align) => prefs.text_align = align,
                Err(err) => debug!(error = %err, "ignoring stored alignment"),
            }
        }
        if let Some(family) = stored_str(stored, KEY_FONT_FAMILY) {
            prefs.font_family = family.to_string();
        }
        prefs
    }

    /// All six preferences under their storage keys.
    #[must_use]
    pub fn to_stored(&self) -> Map<String, Value> {
        let mut values = Map::new();
        values.insert(KEY_THEME.to_string(), Value::from(self.theme.as_str()));
        values.insert(KEY_FONT_SIZE.to_string(), Value::from(self.font_size));
        values.insert(KEY_LINE_HEIGHT.to_string(), Value::from(self.line_height));
        values.insert(KEY_MAX_WIDTH.to_string(), Value::from(self.max_width));
        values.insert(KEY_TEXT_ALIGN.to_string(), Value::from(self.text_align.as_str()));
        values.insert(KEY_FONT_FAMILY.to_string(), Value::from(self.font_family.clone()));
        values
    }

    /// Write all six preferences to `store`.
    ///
    /// # Errors
    ///
    /// Propagates store write failures.
    pub fn persist(&self, store: &mut dyn PreferenceStore) -> Result<()> {
        store.set(self.to_stored())
    }

    /// Swap a fallback font stack for the one matching `language`.
    ///
    /// A font the reader picked explicitly is kept.
    pub fn ensure_font_for_language(&mut self, language: Language) {
        let fallback = language_fallback(language);
        let is_fallback = self.font_family == FONT_FALLBACK_LATIN || self.font_family == FONT_FALLBACK_CJK;
        if self.font_family.trim().is_empty() || is_fallback {
            self.font_family = fallback.to_string();
        }
    }

    /// CSS custom properties for the reader container, in application order.
    #[must_use]
    pub fn css_variables(&self, language: Language) -> Vec<(&'static str, String)> {
        let font_family = if self.font_family.trim().is_empty() {
            language_fallback(language).to_string()
        } else {
            self.font_family.clone()
        };
        vec![
            ("--reader-font-size", format!("{}px", self.font_size)),
            ("--reader-line-height", self.line_height.to_string()),
            ("--reader-max-width", format!("{}px", self.max_width)),
            ("--reader-align", self.text_align.as_str().to_string()),
            ("--reader-font-family", font_family),
        ]
    }

    /// Inline `style` declaration built from [`Self::css_variables`].
    #[must_use]
    pub fn style_attribute(&self, language: Language) -> String {
        self.css_variables(language)
            .into_iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The curated font heading the current font family stack.
    #[must_use]
    pub fn active_font(&self, language: Language) -> Option<&'static FontChoice> {
        let primary = self
            .font_family
            .split(',')
            .next()
            .map(|f| f.trim().trim_matches('"'))
            .unwrap_or_default();
        fonts_for_language(language)
            .iter()
            .find(|font| font.value == primary)
    }
}

/// Partial preference change sent by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceUpdate {
    pub theme: Option<String>,
    pub font_size: Option<f64>,
    pub line_height: Option<f64>,
    pub max_width: Option<f64>,
    pub text_align: Option<String>,
    pub font_family: Option<String>,
}

impl PreferenceUpdate {
    /// Apply the present fields to `prefs`, clamping numbers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Preferences`] for an unknown theme or alignment;
    /// `prefs` is left unchanged in that case.
    pub fn apply(&self, prefs: &mut ReaderPreferences) -> Result<()> {
        let theme = self.theme.as_deref().map(str::parse::<Theme>).transpose()?;
        let align = self.text_align.as_deref().map(str::parse::<TextAlign>).transpose()?;

        if let Some(theme) = theme {
            prefs.theme = theme;
        }
        if let Some(size) = self.font_size {
            prefs.font_size = FONT_SIZE.clamp(size);
        }
        if let Some(height) = self.line_height {
            prefs.line_height = LINE_HEIGHT.clamp(height);
        }
        if let Some(width) = self.max_width {
            prefs.max_width = MAX_WIDTH.clamp(width);
        }
        if let Some(align) = align {
            prefs.text_align = align;
        }
        if let Some(family) = &self.font_family {
            prefs.font_family.clone_from(family);
        }
        Ok(())
    }
}

// =============================================================================
// Fonts
// =============================================================================

/// A curated font offered in the style panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontChoice {
    pub label: &'static str,
    pub value: &'static str,
    pub fallback: Option<&'static str>,
}

impl FontChoice {
    /// CSS `font-family` value for this choice.
    #[must_use]
    pub fn font_family(&self, language: Language) -> String {
        resolve_font_family(self.value, self.fallback, language_fallback(language))
    }
}

const fn font(label: &'static str, value: &'static str) -> FontChoice {
    FontChoice { label, value, fallback: None }
}

const CJK_FONTS: [FontChoice; 4] = [
    font("苹方", "PingFang SC"),
    font("宋体", "Songti SC"),
    font("楷体", "Kaiti SC"),
    font("圆体", "Yuanti SC"),
];

const LATIN_FONTS: [FontChoice; 9] = [
    font("Athelas", "Athelas"),
    font("Charter", "Charter"),
    font("Georgia", "Georgia"),
    font("Iowan", "Iowan Old Style"),
    font("New York", "New York"),
    font("Palatino", "Palatino"),
    FontChoice {
        label: "San Francisco",
        value: "SF Pro Text",
        fallback: Some(r#"-apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif"#),
    },
    FontChoice {
        label: "Seravek",
        value: "Seravek",
        fallback: Some(r#"BlinkMacSystemFont, "Segoe UI", sans-serif"#),
    },
    font("Times New Roman", "Times New Roman"),
];

/// Fallback stack for `language`.
#[must_use]
pub const fn language_fallback(language: Language) -> &'static str {
    match language {
        Language::Chinese => FONT_FALLBACK_CJK,
        Language::English => FONT_FALLBACK_LATIN,
    }
}

/// Curated fonts for `language`.
#[must_use]
pub fn fonts_for_language(language: Language) -> &'static [FontChoice] {
    match language {
        Language::Chinese => &CJK_FONTS,
        Language::English => &LATIN_FONTS,
    }
}

/// Build a `font-family` value from a font name and a fallback stack.
///
/// Names containing whitespace are quoted; names starting with `-` (vendor
/// keywords such as `-apple-system`) are not.
#[must_use]
pub fn resolve_font_family(name: &str, custom_fallback: Option<&str>, language_fallback: &str) -> String {
    let name = name.trim();
    let fallback = custom_fallback
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| language_fallback.trim());
    if name.is_empty() {
        return fallback.to_string();
    }

    let suffix = if fallback.is_empty() {
        String::new()
    } else {
        format!(", {fallback}")
    };
    if !name.starts_with('-') && name.chars().any(char::is_whitespace) {
        format!("\"{name}\"{suffix}")
    } else {
        format!("{name}{suffix}")
    }
}

// =============================================================================
// Stores
// =============================================================================

/// Key-value persistence for preferences.
pub trait PreferenceStore {
    /// Values stored under any of `keys`; missing keys are simply absent.
    ///
    /// # Errors
    ///
    /// Backend read failures.
    fn get(&self, keys: &[&str]) -> Result<Map<String, Value>>;

    /// Merge `values` into the store.
    ///
    /// # Errors
    ///
    /// Backend write failures.
    fn set(&mut self, values: Map<String, Value>) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: Map<String, Value>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_values(values: Map<String, Value>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        Ok(select_keys(&self.values, keys))
    }

    fn set(&mut self, values: Map<String, Value>) -> Result<()> {
        self.values.extend(values);
        Ok(())
    }
}

/// Store backed by a JSON object in a file.
///
/// A missing file reads as empty and is created on the first write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        Ok(select_keys(&self.read_all()?, keys))
    }

    fn set(&mut self, values: Map<String, Value>) -> Result<()> {
        let mut all = self.read_all()?;
        all.extend(values);
        fs::write(&self.path, serde_json::to_string_pretty(&all)?)?;
        Ok(())
    }
}

fn select_keys(values: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|k| values.get(*k).map(|v| ((*k).to_string(), v.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn defaults() {
        let prefs = ReaderPreferences::default();

        assert_eq!(prefs.theme, Theme::White);
        assert!((prefs.font_size - 20.0).abs() < f64::EPSILON);
        assert!((prefs.line_height - 1.7).abs() < f64::EPSILON);
        assert!((prefs.max_width - 900.0).abs() < f64::EPSILON);
        assert_eq!(prefs.text_align, TextAlign::Justify);
        assert_eq!(prefs.font_family, FONT_FALLBACK_LATIN);
    }

    #[test]
    fn invalid_stored_values_are_ignored_or_clamped() {
        let prefs = ReaderPreferences::from_stored(&stored(json!({
            "readerTheme": "neon",
            "readerFontSize": 99,
            "readerLineHeight": 0.5,
            "readerMaxWidth": 720,
            "readerTextAlign": "right",
            "readerFontFamily": "Charter"
        })));

        assert_eq!(prefs.theme, Theme::White);
        assert!((prefs.font_size - 30.0).abs() < f64::EPSILON);
        assert!((prefs.line_height - 1.2).abs() < f64::EPSILON);
        assert!((prefs.max_width - 720.0).abs() < f64::EPSILON);
        assert_eq!(prefs.text_align, TextAlign::Justify);
        assert_eq!(prefs.font_family, "Charter");
    }

    #[test]
    fn stored_round_trip_uses_all_keys() {
        let prefs = ReaderPreferences {
            theme: Theme::Beige,
            text_align: TextAlign::Left,
            ..ReaderPreferences::default()
        };
        let values = prefs.to_stored();

        assert_eq!(values.len(), STORAGE_KEYS.len());
        assert_eq!(values["readerTheme"], json!("beige"));
        assert_eq!(ReaderPreferences::from_stored(&values), prefs);
    }

    #[test]
    fn stepper_rounds_and_clamps() {
        assert!((LINE_HEIGHT.step(1.7, 1) - 1.75).abs() < 1e-9);
        assert!((LINE_HEIGHT.step(2.4, 1) - 2.4).abs() < f64::EPSILON);
        assert!((FONT_SIZE.step(14.0, -1) - 14.0).abs() < f64::EPSILON);
        assert!((MAX_WIDTH.step(900.0, 3) - 930.0).abs() < f64::EPSILON);
    }

    #[test]
    fn update_rejects_unknown_theme_without_partial_change() {
        let mut prefs = ReaderPreferences::default();
        let update = PreferenceUpdate {
            theme: Some("neon".to_string()),
            font_size: Some(24.0),
            ..PreferenceUpdate::default()
        };

        assert!(matches!(update.apply(&mut prefs), Err(Error::Preferences { .. })));
        assert_eq!(prefs, ReaderPreferences::default());
    }

    #[test]
    fn update_applies_present_fields() {
        let mut prefs = ReaderPreferences::default();
        let update: PreferenceUpdate = serde_json::from_value(json!({"theme": "black", "fontSize": 12})).unwrap();

        update.apply(&mut prefs).unwrap();

        assert_eq!(prefs.theme, Theme::Black);
        assert!((prefs.font_size - 14.0).abs() < f64::EPSILON);
        assert_eq!(prefs.text_align, TextAlign::Justify);
    }

    #[test]
    fn fallback_font_follows_language() {
        let mut prefs = ReaderPreferences::default();
        prefs.ensure_font_for_language(Language::Chinese);
        assert_eq!(prefs.font_family, FONT_FALLBACK_CJK);

        prefs.ensure_font_for_language(Language::English);
        assert_eq!(prefs.font_family, FONT_FALLBACK_LATIN);

        prefs.font_family = "Charter".to_string();
        prefs.ensure_font_for_language(Language::Chinese);
        assert_eq!(prefs.font_family, "Charter");

        prefs.font_family = "  ".to_string();
        prefs.ensure_font_for_language(Language::Chinese);
        assert_eq!(prefs.font_family, FONT_FALLBACK_CJK);
    }

    #[test]
    fn css_variables() {
        let prefs = ReaderPreferences::default();
        let vars = prefs.css_variables(Language::English);

        assert_eq!(vars[0], ("--reader-font-size", "20px".to_string()));
        assert_eq!(vars[1], ("--reader-line-height", "1.7".to_string()));
        assert_eq!(vars[2], ("--reader-max-width", "900px".to_string()));
        assert_eq!(vars[3], ("--reader-align", "justify".to_string()));
        assert_eq!(vars[4].1, FONT_FALLBACK_LATIN);
        assert_eq!(Theme::Gray.class_name(), "reader-theme-gray");
        assert!(prefs.style_attribute(Language::English).starts_with("--reader-font-size: 20px;"));
    }

    #[test]
    fn font_family_quoting() {
        assert_eq!(resolve_font_family("Charter", None, "serif"), "Charter, serif");
        assert_eq!(resolve_font_family("Iowan Old Style", None, "serif"), "\"Iowan Old Style\", serif");
        assert_eq!(resolve_font_family("-apple-system", None, "sans-serif"), "-apple-system, sans-serif");
        assert_eq!(resolve_font_family("  ", None, "serif"), "serif");
        assert_eq!(resolve_font_family("", None, ""), "");
        assert_eq!(resolve_font_family("Georgia", None, ""), "Georgia");
        assert_eq!(
            LATIN_FONTS[6].font_family(Language::English),
            r#""SF Pro Text", -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif"#
        );
    }

    #[test]
    fn curated_fonts_and_active_choice() {
        assert_eq!(fonts_for_language(Language::Chinese).len(), 4);
        assert_eq!(fonts_for_language(Language::English).len(), 9);

        let prefs = ReaderPreferences {
            font_family: LATIN_FONTS[3].font_family(Language::English),
            ..ReaderPreferences::default()
        };
        assert_eq!(prefs.active_font(Language::English).map(|f| f.label), Some("Iowan"));
    }

    #[test]
    fn memory_store_merges() {
        let mut store = MemoryStore::new();
        store.set(stored(json!({"readerTheme": "gray"}))).unwrap();
        store.set(stored(json!({"readerFontSize": 22}))).unwrap();

        let values = store.get(&STORAGE_KEYS).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(store.get(&["other"]).unwrap().len(), 0);
    }
}
