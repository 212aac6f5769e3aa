use std::collections::{BTreeSet, HashSet};

use crate::analysis::text::{is_valid_word, split_into_words};
use crate::core::error::{Error, Result};
use crate::index::interner::{Interner, TermId};

/// A parsed query: independent plus/minus term sets. A term may appear in
/// both; ranking always lets the minus side win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_terms: BTreeSet<TermId>,
    pub minus_terms: BTreeSet<TermId>,
}

struct QueryWord<'t> {
    text: &'t str,
    is_minus: bool,
}

/// Turns raw query text into a validated `Query` against the engine's
/// vocabulary and stop-word set.
pub struct QueryParser<'a> {
    vocabulary: &'a Interner,
    stop_words: &'a HashSet<TermId>,
}

impl<'a> QueryParser<'a> {
    pub fn new(vocabulary: &'a Interner, stop_words: &'a HashSet<TermId>) -> Self {
        QueryParser {
            vocabulary,
            stop_words,
        }
    }

    pub fn parse(&self, text: &str) -> Result<Query> {
        let mut query = Query::default();
        for raw in split_into_words(text) {
            let word = parse_query_word(raw)?;
            // Words outside the vocabulary are dropped: an unknown plus-term
            // matches no document and an unknown minus-term excludes nothing.
            let Some(term) = self.vocabulary.lookup(word.text) else {
                continue;
            };
            if self.stop_words.contains(&term) {
                continue;
            }
            if word.is_minus {
                query.minus_terms.insert(term);
            } else {
                query.plus_terms.insert(term);
            }
        }
        Ok(query)
    }
}

fn parse_query_word(raw: &str) -> Result<QueryWord<'_>> {
    let (text, is_minus) = match raw.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (raw, false),
    };
    if text.is_empty() {
        return Err(Error::malformed_query(format!(
            "empty query term '{raw}'"
        )));
    }
    if text.starts_with('-') {
        return Err(Error::malformed_query(format!(
            "doubled minus in query term '{raw}'"
        )));
    }
    if !is_valid_word(text) {
        return Err(Error::malformed_query(format!(
            "control character in query term '{raw}'"
        )));
    }
    Ok(QueryWord { text, is_minus })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    fn vocabulary(words: &[&str]) -> Interner {
        let mut interner = Interner::new();
        for word in words {
            interner.intern(word);
        }
        interner
    }

    fn parse(text: &str) -> Result<Query> {
        let vocab = vocabulary(&["cat", "dog", "fluffy", "the"]);
        let the = vocab.lookup("the").unwrap();
        let stop_words = HashSet::from([the]);
        QueryParser::new(&vocab, &stop_words).parse(text)
    }

    #[test]
    fn splits_plus_and_minus_terms() {
        let query = parse("fluffy -cat dog").unwrap();
        assert_eq!(query.plus_terms.len(), 2);
        assert_eq!(query.minus_terms.len(), 1);
    }

    #[test]
    fn same_term_may_sit_in_both_sets() {
        let query = parse("cat -cat").unwrap();
        assert_eq!(query.plus_terms.len(), 1);
        assert_eq!(query.minus_terms.len(), 1);
        assert_eq!(query.plus_terms, query.minus_terms);
    }

    #[test]
    fn stop_words_are_dropped_from_both_sets() {
        let query = parse("the cat -the").unwrap();
        assert_eq!(query.plus_terms.len(), 1);
        assert!(query.minus_terms.is_empty());
    }

    #[test]
    fn unknown_words_are_skipped() {
        let query = parse("unicorn -griffin cat").unwrap();
        assert_eq!(query.plus_terms.len(), 1);
        assert!(query.minus_terms.is_empty());
    }

    #[test]
    fn lone_minus_is_malformed() {
        let err = parse("cat -").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedQuery);
    }

    #[test]
    fn doubled_minus_is_malformed() {
        let err = parse("--cat").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedQuery);
    }

    #[test]
    fn control_character_is_malformed() {
        let err = parse("ca\u{1}t").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedQuery);
        let err = parse("-ca\u{1}t").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedQuery);
    }
}
