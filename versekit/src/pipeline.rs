//! Text → outcome: parse, resolve, build. Plus the tray's status texts.

use crate::config::{ConfigError, Configuration};
use crate::grammar::CompiledGrammar;
use crate::interface::{LookupOutcome, Notification, NotificationKind};
use crate::parser;
use crate::resolver;
use crate::url_builder::UrlBuilder;

/// Compiled once per configuration; stateless afterwards and safe to share
#[derive(Debug)]
pub struct VersePipeline {
    grammar: CompiledGrammar,
    urls: UrlBuilder,
}

impl VersePipeline {
    pub fn new(config: &Configuration) -> Result<Self, ConfigError> {
        Ok(Self {
            grammar: CompiledGrammar::compile(config)?,
            urls: UrlBuilder::new(config),
        })
    }

    /// Look up the first citation in `text`
    pub fn lookup(&self, text: &str) -> LookupOutcome {
        let Some(raw) = parser::find_first(&self.grammar, text) else {
            return LookupOutcome::NoReference;
        };
        let Some(reference) = resolver::resolve(&self.grammar, &raw) else {
            return LookupOutcome::NoReference;
        };
        match self.urls.build(&reference) {
            Some(url) => LookupOutcome::Found { reference, url },
            None => LookupOutcome::NoReference,
        }
    }
}

impl Notification {
    pub fn for_outcome(outcome: &LookupOutcome) -> Self {
        match outcome {
            LookupOutcome::Found { reference, .. } => Self {
                kind: NotificationKind::ReferenceFound,
                title: "Bible reference found".into(),
                message: format!("Opening {}", reference),
            },
            LookupOutcome::NoReference => Self {
                kind: NotificationKind::NoReference,
                title: "No Bible reference found".into(),
                message: "No Bible reference was recognized in the copied text.".into(),
            },
        }
    }

    pub fn config_error(message: &str) -> Self {
        Self {
            kind: NotificationKind::ConfigError,
            title: "Configuration error".into(),
            message: message.to_string(),
        }
    }
}

/// Help text for the tray's info dialog
#[uniffi::export]
pub fn usage_text() -> String {
    [
        "Select a Bible reference and copy it twice within a second.",
        "The reference is recognized and opened in your browser.",
        "",
        "Supported formats:",
        "- Johannes 3,16",
        "- Joh 3,16",
        "- Joh 3,16-18",
        "- 1. Korinther 13,4-7",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TriggerSettings;
    use crate::interface::ResolvedReference;
    use std::collections::HashMap;

    fn pipeline() -> VersePipeline {
        let config = Configuration {
            supported_languages: vec!["de".into()],
            bible_urls: HashMap::from([("de".into(), "https://example.org/de/".into())]),
            book_mappings: HashMap::from([(
                "de".into(),
                HashMap::from([
                    ("Joh".into(), "Johannes".into()),
                    ("1Kor".into(), "1 Korinther".into()),
                ]),
            )]),
            trigger: TriggerSettings::default(),
        };
        VersePipeline::new(&config).unwrap()
    }

    #[test]
    fn test_lookup_example_sentence() {
        let outcome = pipeline().lookup("siehe Joh 3,16-18 für mehr");
        assert_eq!(
            outcome,
            LookupOutcome::Found {
                reference: ResolvedReference {
                    language: "de".into(),
                    book: "Johannes".into(),
                    chapter: "3".into(),
                    verse: Some("16".into()),
                    end_verse: Some("18".into()),
                },
                url: "https://example.org/de/Johannes3,16-18".into(),
            }
        );
    }

    #[test]
    fn test_lookup_huge_chapter_and_verse() {
        let digits = "9999999999999999999999999";
        assert_eq!(
            pipeline().lookup(&format!("Joh {}", digits)).url(),
            Some(format!("https://example.org/de/Johannes{}", digits).as_str())
        );
        assert_eq!(
            pipeline().lookup(&format!("Joh 3,{}", digits)).url(),
            Some(format!("https://example.org/de/Johannes3,{}", digits).as_str())
        );
    }

    #[test]
    fn test_lookup_ordinal_book() {
        let outcome = pipeline().lookup("1. Korinther 13,4-7");
        assert_eq!(outcome.url(), Some("https://example.org/de/1%20Korinther13,4-7"));
    }

    #[test]
    fn test_lookup_without_reference() {
        assert_eq!(pipeline().lookup("nothing here"), LookupOutcome::NoReference);
        assert_eq!(pipeline().lookup("Joh 0"), LookupOutcome::NoReference);
    }

    #[test]
    fn test_empty_book_table_finds_nothing() {
        let config = Configuration {
            supported_languages: vec!["de".into()],
            bible_urls: HashMap::from([("de".into(), "bibleserver/LUT/".into())]),
            book_mappings: HashMap::from([("de".into(), HashMap::new())]),
            trigger: TriggerSettings::default(),
        };
        let pipeline = VersePipeline::new(&config).unwrap();
        assert_eq!(pipeline.lookup("Joh 3,16"), LookupOutcome::NoReference);
    }

    #[test]
    fn test_relative_base_url_is_used_as_prefix() {
        let mut config = Configuration {
            supported_languages: vec!["de".into()],
            bible_urls: HashMap::from([("de".into(), "bibleserver/LUT/".into())]),
            book_mappings: HashMap::from([(
                "de".into(),
                HashMap::from([("Joh".into(), "Johannes".into())]),
            )]),
            trigger: TriggerSettings::default(),
        };
        let pipeline = VersePipeline::new(&config).unwrap();
        assert_eq!(pipeline.lookup("Joh 3,16").url(), Some("bibleserver/LUT/Johannes3,16"));

        config.bible_urls.clear();
        assert!(matches!(VersePipeline::new(&config), Err(ConfigError::MissingBaseUrl(_))));
    }

    #[test]
    fn test_notifications() {
        let outcome = pipeline().lookup("Joh 3,16");
        let found = Notification::for_outcome(&outcome);
        assert_eq!(found.kind, NotificationKind::ReferenceFound);
        assert_eq!(found.message, "Opening Johannes 3,16");

        let missing = Notification::for_outcome(&LookupOutcome::NoReference);
        assert_eq!(missing.kind, NotificationKind::NoReference);

        let error = Notification::config_error("No Bible URL for language 'de'");
        assert_eq!(error.kind, NotificationKind::ConfigError);
        assert!(error.message.contains("'de'"));
    }

    #[test]
    fn test_usage_text_lists_formats() {
        assert!(usage_text().contains("Joh 3,16-18"));
    }
}
