//! Book-name grammar compiled from the configured book tables
//!
//! Every key and canonical name of every supported language goes into one
//! case-insensitive alternation, longest names first so "Korinther" is tried
//! before "Kor". Keys are escaped character by character; dots and
//! whitespace inside a key, and the gap after an ordinal digit ("1 Kor",
//! "1. Kor", "1Kor"), are optional in the compiled pattern.
//!
//! The reverse index is keyed by the normalized token (lowercase, dots and
//! whitespace removed), which is exactly what the pattern lets vary.

use crate::config::{ConfigError, ConfigResult, Configuration};
use regex::{Regex, RegexBuilder};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

/// Separator between the parts of a multi-part book name
const GAP: &str = r"\.?\s*";

/// Book alternative for a grammar without names; can never match
const NO_BOOKS: &str = r"\b\B";

/// A (language, canonical name) a token may stand for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCandidate {
    pub language: String,
    pub canonical: String,
}

/// Matcher plus reverse index, built once per configuration
#[derive(Debug)]
pub struct CompiledGrammar {
    pattern: Regex,
    index: HashMap<String, Vec<BookCandidate>>,
}

impl CompiledGrammar {
    pub fn compile(config: &Configuration) -> ConfigResult<Self> {
        config.validate()?;

        let mut index: HashMap<String, Vec<BookCandidate>> = HashMap::new();
        let mut alternatives: Vec<(usize, String)> = Vec::new();
        let mut seen_patterns = HashSet::new();

        for language in &config.supported_languages {
            let mapping = config
                .book_mappings
                .get(language)
                .ok_or_else(|| ConfigError::MissingBookMapping(language.clone()))?;

            // Sorted so conflicts are reported deterministically
            let mut entries: Vec<(&String, &String)> = mapping.iter().collect();
            entries.sort();

            let mut owners: HashMap<String, &str> = HashMap::new();
            for (key, canonical) in entries {
                for spelling in [key.as_str(), canonical.as_str()] {
                    let token = normalize_token(spelling);
                    if token.is_empty() {
                        return Err(ConfigError::EmptyKey(language.clone()));
                    }

                    match owners.get(&token).copied() {
                        Some(owner) if owner != canonical.as_str() => {
                            return Err(ConfigError::ConflictingKey {
                                language: language.clone(),
                                key: spelling.to_string(),
                                first: owner.to_string(),
                                second: canonical.clone(),
                            });
                        }
                        Some(_) => {}
                        None => {
                            owners.insert(token.clone(), canonical.as_str());
                            index.entry(token.clone()).or_default().push(BookCandidate {
                                language: language.clone(),
                                canonical: canonical.clone(),
                            });
                        }
                    }

                    let pattern = key_pattern(spelling);
                    if seen_patterns.insert(pattern.clone()) {
                        alternatives.push((token.chars().count(), pattern));
                    }
                }
            }
        }

        alternatives.sort_by(|a, b| (Reverse(a.0), &a.1).cmp(&(Reverse(b.0), &b.1)));
        let alternation = if alternatives.is_empty() {
            tracing::warn!("no book names configured; no reference will be recognized");
            NO_BOOKS.to_string()
        } else {
            alternatives
                .iter()
                .map(|(_, pattern)| pattern.as_str())
                .collect::<Vec<_>>()
                .join("|")
        };

        let source = format!(
            r"(?:^|[^\p{{L}}\p{{N}}])(?P<book>{})\s*\.?\s*(?P<chapter>[0-9]+)(?:\s*,\s*(?P<verse>[0-9]+)(?:\s*[-\u{{2013}}]\s*(?P<end>[0-9]+))?)?",
            alternation
        );
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .size_limit(1 << 24)
            .build()?;

        tracing::debug!(
            "compiled book grammar: {} languages, {} tokens, {} alternatives",
            config.supported_languages.len(),
            index.len(),
            alternatives.len()
        );

        Ok(Self { pattern, index })
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Candidates for a matched book token, in configured-language order.
    /// Empty when no language knows the token.
    pub fn candidates(&self, token: &str) -> &[BookCandidate] {
        self.index
            .get(&normalize_token(token))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct normalized tokens
    pub fn token_count(&self) -> usize {
        self.index.len()
    }
}

/// Lowercase with dots and whitespace removed: "1. Kor" → "1kor"
pub fn normalize_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Escaped pattern for one key, with optional gaps where the key has dots
/// or whitespace and where a digit is followed by a non-digit.
fn key_pattern(key: &str) -> String {
    let mut pattern = String::new();
    let mut gap = false;
    let mut prev_digit = false;
    let mut buf = [0u8; 4];

    for c in key.chars() {
        if c.is_whitespace() || c == '.' {
            gap = true;
            continue;
        }
        let is_digit = c.is_ascii_digit();
        if !pattern.is_empty() && (gap || (prev_digit && !is_digit)) {
            pattern.push_str(GAP);
        }
        gap = false;
        prev_digit = is_digit;
        pattern.push_str(&regex::escape(c.encode_utf8(&mut buf)));
    }
    pattern
}
