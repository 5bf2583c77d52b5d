//! Book token → (language, canonical name) resolution
//!
//! The first configured language that knows the token wins. An unknown
//! token or a zero chapter resolves to `None`; callers treat that as "no
//! citation recognized". Numbers stay decimal strings, so there is no upper
//! bound on their size.

use crate::grammar::CompiledGrammar;
use crate::interface::ResolvedReference;
use crate::parser::RawMatch;
use std::cmp::Ordering;

pub fn resolve(grammar: &CompiledGrammar, raw: &RawMatch<'_>) -> Option<ResolvedReference> {
    let Some(candidate) = grammar.candidates(raw.book).first() else {
        tracing::debug!("book token {:?} not in any configured language", raw.book);
        return None;
    };

    let Some(chapter) = positive_digits(raw.chapter) else {
        tracing::debug!("chapter {:?} is zero", raw.chapter);
        return None;
    };

    // A zero verse or an end before the start drops the part that makes no sense
    let verse = raw.verse.and_then(positive_digits);
    let end_verse = match (&verse, raw.end_verse.and_then(positive_digits)) {
        (Some(start), Some(end)) if compare_digits(&end, start) != Ordering::Less => Some(end),
        _ => None,
    };

    Some(ResolvedReference {
        language: candidate.language.clone(),
        book: candidate.canonical.clone(),
        chapter,
        verse,
        end_verse,
    })
}

/// ASCII digits with leading zeros removed; `None` when the value is zero
fn positive_digits(digits: &str) -> Option<String> {
    let trimmed = digits.trim_start_matches('0');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Numeric order of two zero-stripped digit strings
fn compare_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
