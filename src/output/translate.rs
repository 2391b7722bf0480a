//! Translation collaborators.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors a translator may report. Always recoverable at the emitter.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TranslateError {
    #[error("No translation for '{text}' ({source_lang} -> {target_lang})")]
    Missing {
        text: String,
        source_lang: String,
        target_lang: String,
    },

    #[error("Translator unavailable: {0}")]
    Unavailable(String),
}

/// Translates a line of text between two languages.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError>;
}

/// Returns every line unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Translator for Passthrough {
    fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String, TranslateError> {
        Ok(text.to_string())
    }
}

/// Fixed lookup table from source text to translated text.
///
/// Lines without an entry fail with [`TranslateError::Missing`].
///
/// # Example
///
/// ```rust
/// use statecraft::output::{Phrasebook, Translator};
///
/// let phrasebook = Phrasebook::from_pairs([("A handles request1", "A maneja request1")]);
/// assert_eq!(
///     phrasebook.translate("A handles request1", "in", "es").unwrap(),
///     "A maneja request1"
/// );
/// assert!(phrasebook.translate("unknown", "in", "es").is_err());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phrasebook {
    entries: HashMap<String, String>,
}

impl Phrasebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a phrasebook from a JSON object of `"source": "translation"` pairs.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a phrasebook from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TranslateError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| TranslateError::Unavailable(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
            .map_err(|e| TranslateError::Unavailable(format!("{}: {e}", path.display())))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for Phrasebook {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError> {
        self.entries
            .get(text)
            .cloned()
            .ok_or_else(|| TranslateError::Missing {
                text: text.to_string(),
                source_lang: source.to_string(),
                target_lang: target.to_string(),
            })
    }
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError> {
        (**self).translate(text, source, target)
    }
}
