//! Bundled book-name tables for the default configuration.
//!
//! `books.csv` holds one row per (language, key, canonical name). Canonical
//! names are listed as their own key so every book has at least one row.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Languages in priority order. The first language wins when two tables
/// share a key ("Mt", "Jon", "Dan", ...).
pub const DEFAULT_LANGUAGES: &[&str] = &["de", "en"];

/// Base URLs per language. The encoded book name and chapter are appended as-is.
pub const DEFAULT_BIBLE_URLS: &[(&str, &str)] = &[
    ("de", "https://www.bibleserver.com/LUT/"),
    ("en", "https://www.bibleserver.com/ESV/"),
];

const BOOKS_CSV: &str = include_str!("../books.csv");

/// One row of the bundled table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookEntry {
    pub language: String,
    pub key: String,
    pub canonical: String,
}

static BOOK_ENTRIES: Lazy<Vec<BookEntry>> = Lazy::new(|| {
    load_entries(BOOKS_CSV).unwrap_or_else(|e| {
        tracing::warn!("failed to load bundled book table: {}", e);
        Vec::new()
    })
});

fn load_entries(data: &str) -> Result<Vec<BookEntry>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());
    reader.deserialize().collect()
}

/// All rows of the bundled table, in file order
pub fn entries() -> &'static [BookEntry] {
    &BOOK_ENTRIES
}

/// Book mappings for one language: key -> canonical name
pub fn mapping_for(language: &str) -> BTreeMap<String, String> {
    entries()
        .iter()
        .filter(|entry| entry.language == language)
        .map(|entry| (entry.key.clone(), entry.canonical.clone()))
        .collect()
}

/// Book mappings for every bundled language
pub fn book_mappings() -> BTreeMap<String, BTreeMap<String, String>> {
    DEFAULT_LANGUAGES
        .iter()
        .map(|language| (language.to_string(), mapping_for(language)))
        .collect()
}

/// Base URL for a bundled language
pub fn bible_url(language: &str) -> Option<&'static str> {
    DEFAULT_BIBLE_URLS
        .iter()
        .find(|(code, _)| *code == language)
        .map(|(_, url)| *url)
}
