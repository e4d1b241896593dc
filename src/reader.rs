//! Reader session.
//!
//! Holds the open article, if any, and the style preferences, and answers
//! the two host commands: toggle the reader and update preferences.

use dom_query::Document;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::extract::Extractor;
use crate::preferences::{PreferenceStore, PreferenceUpdate, ReaderPreferences};
use crate::result::ExtractedArticle;

/// Message sent by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Open the reader, or close it when already open.
    #[serde(rename = "TOGGLE_READER_ACTION")]
    ToggleReader,

    /// Change some style preferences.
    #[serde(rename = "SET_READER_PREFS")]
    SetReaderPrefs(PreferenceUpdate),
}

/// Acknowledgement returned for every handled command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: String,
}

impl Response {
    #[must_use]
    pub fn ok() -> Self {
        Self { status: "ok".to_string() }
    }
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Opened,
    Closed,
    NoContent,
}

/// One reader session over a preference store.
pub struct Reader<S: PreferenceStore> {
    store: S,
    extractor: Extractor,
    preferences: ReaderPreferences,
    article: Option<ExtractedArticle>,
}

impl<S: PreferenceStore> Reader<S> {
    /// Start a session, seeding preferences from `store`.
    ///
    /// # Errors
    ///
    /// Propagates store read failures.
    pub fn new(store: S, extractor: Extractor) -> Result<Self> {
        let preferences = ReaderPreferences::load(&store)?;
        debug!(theme = %preferences.theme, font_size = preferences.font_size, "reader preferences loaded");
        Ok(Self {
            store,
            extractor,
            preferences,
            article: None,
        })
    }

    #[must_use]
    pub fn preferences(&self) -> &ReaderPreferences {
        &self.preferences
    }

    /// The article currently shown.
    #[must_use]
    pub fn article(&self) -> Option<&ExtractedArticle> {
        self.article.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.article.is_some()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Close the open article, or extract `page` and open it.
    ///
    /// Opening adapts the font stack to the article's language and persists
    /// the full preference set.
    ///
    /// # Errors
    ///
    /// Propagates store write failures.
    pub fn toggle(&mut self, page: &Document) -> Result<Toggle> {
        if self.article.take().is_some() {
            debug!("reader closed");
            return Ok(Toggle::Closed);
        }

        let Some(article) = self.extractor.extract_document(page) else {
            warn!("no primary article content found on this page");
            return Ok(Toggle::NoContent);
        };
        self.preferences.ensure_font_for_language(article.language);
        self.preferences.persist(&mut self.store)?;
        debug!(title = %article.title, strategy = %article.strategy, "reader opened");
        self.article = Some(article);
        Ok(Toggle::Opened)
    }

    /// Apply a partial preference change and persist the result.
    ///
    /// # Errors
    ///
    /// An invalid theme or alignment, or a store write failure.
    pub fn update_preferences(&mut self, update: &PreferenceUpdate) -> Result<()> {
        update.apply(&mut self.preferences)?;
        self.preferences.persist(&mut self.store)
    }

    /// Run a host command against `page`.
    ///
    /// # Errors
    ///
    /// See [`Reader::toggle`] and [`Reader::update_preferences`].
    pub fn handle(&mut self, command: &Command, page: &Document) -> Result<Response> {
        match command {
            Command::ToggleReader => {
                self.toggle(page)?;
            }
            Command::SetReaderPrefs(update) => self.update_preferences(update)?,
        }
        Ok(Response::ok())
    }

    /// Decode a JSON host message and run it.
    ///
    /// # Errors
    ///
    /// Malformed messages, plus everything [`Reader::handle`] returns.
    pub fn handle_message(&mut self, message: &str, page: &Document) -> Result<Response> {
        let command: Command = serde_json::from_str(message)?;
        self.handle(&command, page)
    }

    /// Inline style for the reader container of the open article.
    #[must_use]
    pub fn style_attribute(&self) -> Option<String> {
        self.article
            .as_ref()
            .map(|a| self.preferences.style_attribute(a.language))
    }
}
