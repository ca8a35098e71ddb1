use crate::tokenizer::StopWords;
use std::collections::BTreeSet;

const MINUS_PREFIX: char = '-';

/// A parsed query: words that add relevance and words that disqualify a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

impl Query {
    /// Stop words are matched against the raw token, before the minus prefix is stripped.
    /// A bare `-` carries no word and is skipped.
    pub fn parse(raw_query: &str, stop_words: &StopWords) -> Self {
        let mut query = Query::default();
        for word in stop_words.split_no_stop(raw_query) {
            match word.strip_prefix(MINUS_PREFIX) {
                Some("") => tracing::trace!("ignoring bare minus token"),
                Some(minus) => {
                    query.minus_words.insert(minus.to_string());
                }
                None => {
                    query.plus_words.insert(word.to_string());
                }
            }
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(text: &str) -> StopWords { [text].into_iter().collect() }

    #[test]
    fn splits_plus_and_minus_words() {
        let q = Query::parse("fluffy -collar cat cat", &stop("and"));
        assert_eq!(q.plus_words.iter().map(String::as_str).collect::<Vec<_>>(), vec!["cat", "fluffy"]);
        assert_eq!(q.minus_words.iter().map(String::as_str).collect::<Vec<_>>(), vec!["collar"]);
    }

    #[test]
    fn stop_words_are_dropped_from_both_sides() {
        let q = Query::parse("cat and dog", &stop("and"));
        assert!(!q.plus_words.contains("and"));
        assert_eq!(q.plus_words.len(), 2);
    }

    #[test]
    fn prefixed_stop_word_still_becomes_minus_word() {
        let q = Query::parse("cat -and", &stop("and"));
        assert!(q.minus_words.contains("and"));
    }

    #[test]
    fn bare_minus_is_ignored() {
        let q = Query::parse("cat - -", &StopWords::new());
        assert!(q.minus_words.is_empty());
        assert_eq!(q.plus_words.len(), 1);
    }

    #[test]
    fn word_may_be_both_plus_and_minus() {
        let q = Query::parse("cat -cat", &StopWords::new());
        assert!(q.plus_words.contains("cat"));
        assert!(q.minus_words.contains("cat"));
    }

    #[test]
    fn double_minus_keeps_inner_prefix() {
        let q = Query::parse("--cat", &StopWords::new());
        assert!(q.minus_words.contains("-cat"));
    }
}
