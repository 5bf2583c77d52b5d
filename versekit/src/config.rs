//! Configuration record and its validation
//!
//! Loading the settings file is the host's job; this module only checks that
//! every supported language has a book table and a base URL.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No book mapping for language '{0}'")]
    MissingBookMapping(String),
    #[error("No Bible URL for language '{0}'")]
    MissingBaseUrl(String),
    #[error("Language '{0}' is listed more than once")]
    DuplicateLanguage(String),
    #[error("Empty book name in language '{0}'")]
    EmptyKey(String),
    #[error("Book name '{key}' in language '{language}' maps to both '{first}' and '{second}'")]
    ConflictingKey {
        language: String,
        key: String,
        first: String,
        second: String,
    },
    #[error("Book name pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Configuration is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Timing of the double-copy gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct TriggerSettings {
    /// Clipboard changes closer together than this count as one
    pub debounce_ms: u64,
    /// Maximum distance between the two copies of a gesture
    pub gesture_window_ms: u64,
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            gesture_window_ms: 1000,
        }
    }
}

impl TriggerSettings {
    pub fn gesture_window(&self) -> Duration {
        Duration::from_millis(self.gesture_window_ms)
    }
}

/// Validated once at startup and immutable afterwards.
///
/// The PascalCase aliases accept settings files written for the desktop app
/// (`SupportedLanguages`, `BibleUrls`, `BookMappings`).
#[derive(Debug, Clone, PartialEq, Deserialize, uniffi::Record)]
pub struct Configuration {
    /// Language codes in priority order
    #[serde(alias = "SupportedLanguages")]
    pub supported_languages: Vec<String>,
    /// Language code → base URL the book and chapter are appended to
    #[serde(alias = "BibleUrls")]
    pub bible_urls: HashMap<String, String>,
    /// Language code → (abbreviation or name → canonical name)
    #[serde(alias = "BookMappings")]
    pub book_mappings: HashMap<String, HashMap<String, String>>,
    #[serde(default, alias = "Trigger")]
    pub trigger: TriggerSettings,
}

impl Configuration {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn base_url(&self, language: &str) -> Option<&str> {
        self.bible_urls.get(language).map(String::as_str)
    }

    /// Check that every supported language has a book mapping and a base URL.
    /// A base URL that does not parse as an absolute URL is only logged; it is
    /// used as a plain prefix either way.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::new();
        for language in &self.supported_languages {
            if !seen.insert(language.as_str()) {
                return Err(ConfigError::DuplicateLanguage(language.clone()));
            }
            if !self.book_mappings.contains_key(language) {
                return Err(ConfigError::MissingBookMapping(language.clone()));
            }
            let base = self
                .base_url(language)
                .ok_or_else(|| ConfigError::MissingBaseUrl(language.clone()))?;
            if let Err(e) = url::Url::parse(base) {
                tracing::warn!(
                    "Bible URL for language '{}' is not an absolute URL ({}): {}",
                    language,
                    e,
                    base
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Configuration {
        Configuration {
            supported_languages: vec!["de".into()],
            bible_urls: HashMap::from([("de".into(), "https://example.org/de/".into())]),
            book_mappings: HashMap::from([(
                "de".into(),
                HashMap::from([("Joh".into(), "Johannes".into())]),
            )]),
            trigger: TriggerSettings::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_missing_book_mapping() {
        let mut config = config();
        config.supported_languages.push("en".into());
        config.bible_urls.insert("en".into(), "https://example.org/en/".into());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingBookMapping(lang)) if lang == "en"
        ));
    }

    #[test]
    fn test_missing_base_url() {
        let mut config = config();
        config.bible_urls.clear();
        assert!(matches!(config.validate(), Err(ConfigError::MissingBaseUrl(_))));
    }

    #[test]
    fn test_relative_base_url_is_accepted() {
        let mut config = config();
        config.bible_urls.insert("de".into(), "bibleserver/LUT/".into());
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url("de"), Some("bibleserver/LUT/"));
    }

    #[test]
    fn test_duplicate_language() {
        let mut config = config();
        config.supported_languages.push("de".into());
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateLanguage(_))));
    }

    #[test]
    fn test_from_json_pascal_case() {
        let json = r#"{
            "SupportedLanguages": ["de"],
            "BibleUrls": { "de": "https://example.org/de/" },
            "BookMappings": { "de": { "Joh": "Johannes" } }
        }"#;
        let parsed = Configuration::from_json(json).unwrap();
        assert_eq!(parsed, config());
        assert_eq!(parsed.trigger, TriggerSettings::default());
    }

    #[test]
    fn test_from_json_trigger_override() {
        let json = r#"{
            "supported_languages": ["de"],
            "bible_urls": { "de": "https://example.org/de/" },
            "book_mappings": { "de": { "Joh": "Johannes" } },
            "trigger": { "gesture_window_ms": 2000 }
        }"#;
        let parsed = Configuration::from_json(json).unwrap();
        assert_eq!(parsed.trigger.gesture_window(), Duration::from_secs(2));
        assert_eq!(parsed.trigger.debounce_ms, 100);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(Configuration::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
