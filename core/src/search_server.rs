use crate::config::SearchConfig;
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::ranking;
use crate::tokenizer::StopWords;
use crate::{DocId, DocMeta, Document, DocumentStatus, Result, SearchError};
use std::collections::HashMap;

/// Decides whether a ranked document may appear in the results.
pub trait DocumentPredicate {
    fn matches(&self, doc_id: DocId, status: DocumentStatus, rating: i32) -> bool;
}

impl<F> DocumentPredicate for F
where
    F: Fn(DocId, DocumentStatus, i32) -> bool,
{
    fn matches(&self, doc_id: DocId, status: DocumentStatus, rating: i32) -> bool {
        self(doc_id, status, rating)
    }
}

/// Owns stop words, the inverted index and the status/rating side table.
///
/// Populate it first (stop words, then documents) and query it afterwards;
/// stop words are frozen once the first document is indexed.
#[derive(Debug, Default)]
pub struct SearchServer {
    config: SearchConfig,
    stop_words: StopWords,
    index: InvertedIndex,
    docs: HashMap<DocId, DocMeta>,
}

impl SearchServer {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: SearchConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &SearchConfig { &self.config }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    pub fn set_stop_words(&mut self, text: &str) -> Result<()> {
        if self.index.document_count() > 0 {
            return Err(SearchError::StopWordsFrozen);
        }
        self.stop_words.configure(text);
        tracing::debug!(stop_words = self.stop_words.len(), "configured stop words");
        Ok(())
    }

    /// Index a document with status `Actual` and no ratings.
    pub fn add_document(&mut self, doc_id: DocId, text: &str) -> Result<()> {
        self.add_document_with(doc_id, text, DocumentStatus::Actual, &[])
    }

    pub fn add_document_with(&mut self, doc_id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        let words = self.stop_words.split_no_stop(text);
        self.index.add_document(doc_id, &words)?;
        let rating = average_rating(ratings);
        self.docs.insert(doc_id, DocMeta { status, rating });
        tracing::debug!(doc_id, words = words.len(), %status, rating, "indexed document");
        Ok(())
    }

    pub fn document_count(&self) -> usize { self.index.document_count() }

    pub fn document_meta(&self, doc_id: DocId) -> Option<DocMeta> { self.docs.get(&doc_id).copied() }

    pub fn find_top_documents(&self, raw_query: &str) -> Vec<Document> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_with_status(&self, raw_query: &str, status: DocumentStatus) -> Vec<Document> {
        self.find_top_documents_with(raw_query, move |_id: DocId, s: DocumentStatus, _rating: i32| s == status)
    }

    pub fn find_top_documents_with<P: DocumentPredicate>(&self, raw_query: &str, predicate: P) -> Vec<Document> {
        let query = Query::parse(raw_query, &self.stop_words);
        tracing::debug!(plus = query.plus_words.len(), minus = query.minus_words.len(), "parsed query");
        let keep = |doc_id: DocId| {
            let meta = self.docs.get(&doc_id).copied().unwrap_or_default();
            predicate.matches(doc_id, meta.status, meta.rating)
        };
        ranking::rank(&self.index, &query, keep, self.config.max_result_document_count)
            .into_iter()
            .map(|(id, relevance)| Document {
                id,
                relevance,
                rating: self.docs.get(&id).map_or(0, |m| m.rating),
            })
            .collect()
    }

    /// Plus words of `raw_query` present in the document, sorted, together with
    /// its status. Empty when the document contains any minus word.
    pub fn match_document(&self, raw_query: &str, doc_id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        if !self.index.contains_document(doc_id) {
            return Err(SearchError::UnknownDocument(doc_id));
        }
        let status = self.docs.get(&doc_id).map(|m| m.status).unwrap_or_default();
        let query = Query::parse(raw_query, &self.stop_words);
        let contains = |word: &str| self.index.postings(word).is_some_and(|p| p.contains_key(&doc_id));
        if query.minus_words.iter().any(|w| contains(w.as_str())) {
            return Ok((Vec::new(), status));
        }
        let matched = query.plus_words.iter().filter(|w| contains(w.as_str())).cloned().collect();
        Ok((matched, status))
    }
}

/// Integer mean, truncated toward zero; 0 without ratings.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> SearchServer {
        let mut server = SearchServer::new();
        server.set_stop_words("и в на").unwrap();
        server.add_document_with(0, "белый кот и модный ошейник", DocumentStatus::Actual, &[8, -3]).unwrap();
        server.add_document_with(1, "пушистый кот пушистый хвост", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
        server.add_document_with(2, "ухоженный пёс выразительные глаза", DocumentStatus::Actual, &[5, -12, 2, 1]).unwrap();
        server.add_document_with(3, "ухоженный скворец евгений", DocumentStatus::Banned, &[9]).unwrap();
        server
    }

    #[test]
    fn average_rating_truncates_toward_zero() {
        assert_eq!(average_rating(&[]), 0);
        assert_eq!(average_rating(&[8, -3]), 2);
        assert_eq!(average_rating(&[5, -12, 2, 1]), -1);
        assert_eq!(average_rating(&[i32::MAX, i32::MAX]), i32::MAX);
    }

    #[test]
    fn default_search_only_returns_actual_documents() {
        let hits = server().find_top_documents("ухоженный");
        assert_eq!(hits.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn status_search_returns_matching_status() {
        let hits = server().find_top_documents_with_status("ухоженный кот", DocumentStatus::Banned);
        assert_eq!(hits.iter().map(|d| d.id).collect::<Vec<_>>(), vec![3]);
        assert_eq!(hits[0].rating, 9);
    }

    #[test]
    fn predicate_sees_id_status_and_rating() {
        let hits = server().find_top_documents_with("пушистый ухоженный кот", |id: DocId, _s: DocumentStatus, rating: i32| {
            id % 2 == 0 && rating >= 0
        });
        assert_eq!(hits.iter().map(|d| d.id).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn stop_words_freeze_after_first_document() {
        let mut server = server();
        assert_eq!(server.set_stop_words("кот"), Err(SearchError::StopWordsFrozen));
        assert!(!server.stop_words().contains("кот"));
    }

    #[test]
    fn duplicate_document_keeps_original_metadata() {
        let mut server = server();
        let err = server.add_document_with(1, "кот", DocumentStatus::Removed, &[1]).unwrap_err();
        assert_eq!(err, SearchError::DuplicateDocument(1));
        assert_eq!(server.document_meta(1).unwrap().status, DocumentStatus::Actual);
        assert_eq!(server.document_count(), 4);
    }

    #[test]
    fn match_document_lists_present_plus_words() {
        let server = server();
        let (words, status) = server.match_document("пушистый кот ошейник", 1).unwrap();
        assert_eq!(words, vec!["кот".to_string(), "пушистый".to_string()]);
        assert_eq!(status, DocumentStatus::Actual);
    }

    #[test]
    fn match_document_is_empty_on_minus_word() {
        let server = server();
        let (words, _) = server.match_document("пушистый -хвост", 1).unwrap();
        assert!(words.is_empty());
    }

    #[test]
    fn match_document_rejects_unknown_id() {
        assert_eq!(server().match_document("кот", 42), Err(SearchError::UnknownDocument(42)));
    }
}
