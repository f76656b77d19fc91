use crate::error::{Result, SearchError};
use crate::stop_words::StopWordSet;
use crate::tokenizer::tokenize;
use std::collections::BTreeSet;

/// A parsed query. Both sets are deduplicated and sorted; a word may appear in both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_terms: BTreeSet<String>,
    pub minus_terms: BTreeSet<String>,
}

#[derive(Debug, PartialEq, Eq)]
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(word: &str) -> Result<QueryWord<'_>> {
    match word.strip_prefix('-') {
        None => Ok(QueryWord { data: word, is_minus: false }),
        Some(rest) if rest.is_empty() || rest.starts_with('-') => {
            Err(SearchError::InvalidQuery(word.to_string()))
        }
        Some(rest) => Ok(QueryWord { data: rest, is_minus: true }),
    }
}

impl Query {
    /// Parse raw query text, dropping stop words from both term sets.
    pub fn parse(text: &str, stop_words: &StopWordSet) -> Result<Self> {
        let mut query = Query::default();
        for word in tokenize(text)? {
            let QueryWord { data, is_minus } = parse_query_word(word)?;
            if stop_words.contains(data) {
                continue;
            }
            if is_minus {
                query.minus_terms.insert(data.to_string());
            } else {
                query.plus_terms.insert(data.to_string());
            }
        }
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop() -> StopWordSet {
        StopWordSet::parse("and in").unwrap()
    }

    #[test]
    fn splits_plus_and_minus_terms() {
        let q = Query::parse("cat -dog cat and -in collar", &stop()).unwrap();
        assert_eq!(q.plus_terms.iter().collect::<Vec<_>>(), vec!["cat", "collar"]);
        assert_eq!(q.minus_terms.iter().collect::<Vec<_>>(), vec!["dog"]);
    }

    #[test]
    fn same_word_may_be_plus_and_minus() {
        let q = Query::parse("cat -cat", &stop()).unwrap();
        assert!(q.plus_terms.contains("cat"));
        assert!(q.minus_terms.contains("cat"));
    }

    #[test]
    fn rejects_malformed_minus_terms() {
        assert_eq!(
            Query::parse("cat -", &stop()),
            Err(SearchError::InvalidQuery("-".into()))
        );
        assert_eq!(
            Query::parse("--cat", &stop()),
            Err(SearchError::InvalidQuery("--cat".into()))
        );
        assert!(matches!(Query::parse("c\u{7}at", &stop()), Err(SearchError::InvalidInput(_))));
    }

    #[test]
    fn inner_hyphen_is_plain_text() {
        let q = Query::parse("well-known", &stop()).unwrap();
        assert!(q.plus_terms.contains("well-known"));
    }
}
