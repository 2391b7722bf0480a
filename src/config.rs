//! Runtime settings for the demonstration binaries.
//!
//! Settings come from `STATECRAFT_*` environment variables layered over
//! defaults. Validation collects every problem at once instead of
//! stopping at the first.

use crate::output::{Emitter, Passthrough, Phrasebook, Translated, Translator};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

pub const ENV_SOURCE_LANG: &str = "STATECRAFT_SOURCE_LANG";
pub const ENV_TARGET_LANG: &str = "STATECRAFT_TARGET_LANG";
pub const ENV_PHRASEBOOK: &str = "STATECRAFT_PHRASEBOOK";
pub const ENV_LOG: &str = "STATECRAFT_LOG";

/// A single settings problem.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid language code for {field}: '{value}' (expected 2-3 lowercase letters)")]
    InvalidLanguage { field: &'static str, value: String },

    #[error("Log filter must not be empty")]
    EmptyLogFilter,

    #[error("Phrasebook could not be loaded: {0}")]
    Phrasebook(String),

    #[error("Invalid settings: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source_lang: String,
    pub target_lang: String,
    pub log_filter: String,
    pub phrasebook: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_lang: "in".to_string(),
            target_lang: "es".to_string(),
            log_filter: "warn".to_string(),
            phrasebook: None,
        }
    }
}

impl Settings {
    /// Defaults overridden by any `STATECRAFT_*` variables that are set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by `lookup`, which maps variable names to values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            source_lang: lookup(ENV_SOURCE_LANG).unwrap_or(defaults.source_lang),
            target_lang: lookup(ENV_TARGET_LANG).unwrap_or(defaults.target_lang),
            log_filter: lookup(ENV_LOG)
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_filter),
            phrasebook: lookup(ENV_PHRASEBOOK)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check every field, accumulating all violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let checks = vec![
            check_language("source_lang", &self.source_lang),
            check_language("target_lang", &self.target_lang),
            if self.log_filter.trim().is_empty() {
                Validation::fail(ConfigError::EmptyLogFilter)
            } else {
                Validation::success(())
            },
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// [`validate`](Self::validate), folded into a single error.
    pub fn check(&self) -> Result<(), ConfigError> {
        match self.validate() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(ConfigError::Invalid(
                errors.iter().map(ToString::to_string).collect(),
            )),
        }
    }

    /// The configured translator: a phrasebook when one is set, otherwise
    /// lines pass through unchanged.
    pub fn translator(&self) -> Result<Box<dyn Translator>, ConfigError> {
        match &self.phrasebook {
            Some(path) => Phrasebook::load(path)
                .map(|book| Box::new(book) as Box<dyn Translator>)
                .map_err(|e| ConfigError::Phrasebook(e.to_string())),
            None => Ok(Box::new(Passthrough)),
        }
    }

    /// Wrap `sink` so every line is translated as configured.
    pub fn emitter(&self, sink: Arc<dyn Emitter>) -> Result<Arc<dyn Emitter>, ConfigError> {
        let translator = self.translator()?;
        Ok(Arc::new(Translated::new(
            sink,
            translator,
            self.source_lang.clone(),
            self.target_lang.clone(),
        )))
    }
}

fn check_language(field: &'static str, value: &str) -> Validation<(), NonEmptyVec<ConfigError>> {
    let valid = (2..=3).contains(&value.len()) && value.chars().all(|c| c.is_ascii_lowercase());
    if valid {
        Validation::success(())
    } else {
        Validation::fail(ConfigError::InvalidLanguage {
            field,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Recorder;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_translate_from_in_to_es() {
        let settings = Settings::default();
        assert_eq!(settings.source_lang, "in");
        assert_eq!(settings.target_lang, "es");
        assert!(settings.phrasebook.is_none());
        assert!(settings.validate().is_success());
    }

    #[test]
    fn lookup_overrides_defaults() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_SOURCE_LANG, "en"),
            (ENV_TARGET_LANG, "fr"),
            (ENV_LOG, "debug"),
            (ENV_PHRASEBOOK, "/tmp/book.json"),
        ]));

        assert_eq!(settings.source_lang, "en");
        assert_eq!(settings.target_lang, "fr");
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.phrasebook, Some(PathBuf::from("/tmp/book.json")));
    }

    #[test]
    fn rust_log_is_used_when_statecraft_log_is_unset() {
        let settings = Settings::from_lookup(lookup(&[("RUST_LOG", "trace")]));
        assert_eq!(settings.log_filter, "trace");
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let settings = Settings {
            source_lang: "English".to_string(),
            target_lang: "".to_string(),
            log_filter: "  ".to_string(),
            phrasebook: None,
        };

        match settings.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigError::EmptyLogFilter)));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }

        assert!(matches!(settings.check(), Err(ConfigError::Invalid(v)) if v.len() == 3));
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let settings = Settings::from_json_str(r#"{"target_lang": "de"}"#).unwrap();
        assert_eq!(settings.source_lang, "in");
        assert_eq!(settings.target_lang, "de");
    }

    #[test]
    fn missing_phrasebook_is_a_config_error() {
        let settings = Settings {
            phrasebook: Some(PathBuf::from("/nonexistent/statecraft/book.json")),
            ..Settings::default()
        };
        assert!(matches!(
            settings.translator(),
            Err(ConfigError::Phrasebook(_))
        ));
    }

    #[test]
    fn default_emitter_passes_lines_through() {
        let recorder = Arc::new(Recorder::new());
        let emitter = Settings::default().emitter(recorder.clone()).unwrap();

        emitter.emit("A handles request1");

        assert_eq!(recorder.lines(), vec!["A handles request1"]);
    }
}
