//! Citation scanning
//!
//! Finds the first `<book> [.] <chapter>[, <verse>[- <end-verse>]]` in a
//! piece of text. Later citations in the same text are ignored: one gesture
//! opens one reference.

use crate::grammar::CompiledGrammar;

/// Unresolved token groups of one match, borrowed from the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMatch<'t> {
    pub book: &'t str,
    pub chapter: &'t str,
    pub verse: Option<&'t str>,
    /// Only captured when `verse` is
    pub end_verse: Option<&'t str>,
}

pub fn find_first<'t>(grammar: &CompiledGrammar, text: &'t str) -> Option<RawMatch<'t>> {
    let caps = grammar.pattern().captures(text)?;
    Some(RawMatch {
        book: caps.name("book")?.as_str(),
        chapter: caps.name("chapter")?.as_str(),
        verse: caps.name("verse").map(|m| m.as_str()),
        end_verse: caps.name("end").map(|m| m.as_str()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Configuration, TriggerSettings};
    use std::collections::HashMap;

    fn grammar() -> CompiledGrammar {
        let de: HashMap<String, String> = [
            ("Joh", "Johannes"),
            ("Kor", "Korinther"),
            ("1Kor", "1 Korinther"),
            ("Am", "Amos"),
            ("Röm", "Römer"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let config = Configuration {
            supported_languages: vec!["de".into()],
            bible_urls: HashMap::from([("de".into(), "https://example.org/de/".into())]),
            book_mappings: HashMap::from([("de".into(), de)]),
            trigger: TriggerSettings::default(),
        };
        CompiledGrammar::compile(&config).unwrap()
    }

    #[test]
    fn test_full_reference_in_sentence() {
        let m = find_first(&grammar(), "siehe Joh 3,16-18 für mehr").unwrap();
        assert_eq!(
            m,
            RawMatch {
                book: "Joh",
                chapter: "3",
                verse: Some("16"),
                end_verse: Some("18"),
            }
        );
    }

    #[test]
    fn test_chapter_only() {
        let m = find_first(&grammar(), "Johannes 3").unwrap();
        assert_eq!(m.book, "Johannes");
        assert_eq!(m.chapter, "3");
        assert_eq!(m.verse, None);
        assert_eq!(m.end_verse, None);
    }

    #[test]
    fn test_separator_whitespace_is_optional() {
        for text in ["Joh3,16-18", "Joh. 3 , 16 - 18", "Joh.3,16-18", "Joh   3,\t16 -18"] {
            let m = find_first(&grammar(), text).unwrap_or_else(|| panic!("no match in {:?}", text));
            assert_eq!((m.chapter, m.verse, m.end_verse), ("3", Some("16"), Some("18")), "{:?}", text);
        }
    }

    #[test]
    fn test_en_dash_range() {
        let m = find_first(&grammar(), "Joh 3,16–18").unwrap();
        assert_eq!(m.end_verse, Some("18"));
    }

    #[test]
    fn test_case_insensitive_book() {
        let m = find_first(&grammar(), "JOH 1,1").unwrap();
        assert_eq!(m.book, "JOH");
        let m = find_first(&grammar(), "röm 8,28").unwrap();
        assert_eq!(m.book, "röm");
    }

    #[test]
    fn test_ordinal_prefix_variants() {
        for text in ["1Kor 13,4-7", "1 Kor 13,4-7", "1. Kor 13,4-7", "(1.Kor 13,4-7)"] {
            let m = find_first(&grammar(), text).unwrap_or_else(|| panic!("no match in {:?}", text));
            assert!(m.book.starts_with('1'), "{:?} matched {:?}", text, m.book);
            assert_eq!(m.chapter, "13");
        }
    }

    #[test]
    fn test_first_match_only() {
        let m = find_first(&grammar(), "Röm 8,28 und Joh 3,16").unwrap();
        assert_eq!(m.book, "Röm");
        assert_eq!(m.chapter, "8");
    }

    #[test]
    fn test_book_inside_word_is_ignored() {
        assert!(find_first(&grammar(), "Programm 3 startet").is_none());
        assert_eq!(find_first(&grammar(), "Kamera Joh 5").map(|m| m.book), Some("Joh"));
    }

    #[test]
    fn test_book_without_chapter() {
        assert!(find_first(&grammar(), "Johannes war hier").is_none());
    }

    #[test]
    fn test_no_book_token() {
        assert!(find_first(&grammar(), "nothing to see here 3,16").is_none());
        assert!(find_first(&grammar(), "").is_none());
    }

    #[test]
    fn test_large_chapter_number_parses() {
        let m = find_first(&grammar(), "Joh 99999999999999999999999").unwrap();
        assert_eq!(m.chapter, "99999999999999999999999");
    }

    #[test]
    fn test_dangling_separator_keeps_chapter() {
        let m = find_first(&grammar(), "Joh 3, und so").unwrap();
        assert_eq!(m.chapter, "3");
        assert_eq!(m.verse, None);
        let m = find_first(&grammar(), "Joh 3,16- weiter").unwrap();
        assert_eq!(m.verse, Some("16"));
        assert_eq!(m.end_verse, None);
    }
}
