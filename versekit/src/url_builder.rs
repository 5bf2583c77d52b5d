//! Reference → URL
//!
//! `<base><encoded book><chapter>[,<verse>[-<end-verse>]]`. The book name is
//! percent-encoded like a URI data component: everything but ASCII
//! alphanumerics and `-._~` is escaped.

use crate::config::Configuration;
use crate::interface::ResolvedReference;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::HashMap;

const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Base URLs of the supported languages
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base_urls: HashMap<String, String>,
}

impl UrlBuilder {
    pub fn new(config: &Configuration) -> Self {
        let base_urls = config
            .supported_languages
            .iter()
            .filter_map(|language| {
                config
                    .base_url(language)
                    .map(|base| (language.clone(), base.to_string()))
            })
            .collect();
        Self { base_urls }
    }

    /// `None` only when the reference's language has no base URL
    pub fn build(&self, reference: &ResolvedReference) -> Option<String> {
        let base = self.base_urls.get(&reference.language)?;
        Some(build_url(base, reference))
    }
}

pub fn build_url(base: &str, reference: &ResolvedReference) -> String {
    let mut url = format!(
        "{}{}{}",
        base,
        utf8_percent_encode(&reference.book, COMPONENT),
        reference.chapter
    );
    if let Some(verse) = &reference.verse {
        url.push_str(&format!(",{}", verse));
        if let Some(end_verse) = &reference.end_verse {
            url.push_str(&format!("-{}", end_verse));
        }
    }
    url
}
