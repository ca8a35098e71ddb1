use crate::{DocId, Result, SearchError};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Postings for a single word: document id -> term frequency.
pub type Postings = BTreeMap<DocId, f64>;

/// Word -> per-document term frequency, plus the set of indexed documents.
///
/// Term frequency is the share of a document's (non stop) words equal to the
/// word, so the frequencies of one document always sum to 1. Documents with no
/// words are counted but own no postings.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_to_document_freqs: HashMap<String, Postings>,
    document_ids: BTreeSet<DocId>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index `words` (already stop-word filtered) under `doc_id`.
    pub fn add_document(&mut self, doc_id: DocId, words: &[&str]) -> Result<()> {
        if !self.document_ids.insert(doc_id) {
            return Err(SearchError::DuplicateDocument(doc_id));
        }
        if words.is_empty() {
            tracing::debug!(doc_id, "document has no indexable words");
            return Ok(());
        }
        let share = 1.0 / words.len() as f64;
        for word in words {
            *self
                .word_to_document_freqs
                .entry((*word).to_string())
                .or_default()
                .entry(doc_id)
                .or_insert(0.0) += share;
        }
        Ok(())
    }

    pub fn document_count(&self) -> usize { self.document_ids.len() }

    pub fn word_count(&self) -> usize { self.word_to_document_freqs.len() }

    pub fn contains_document(&self, doc_id: DocId) -> bool { self.document_ids.contains(&doc_id) }

    pub fn postings(&self, word: &str) -> Option<&Postings> { self.word_to_document_freqs.get(word) }

    /// Number of documents containing `word`; 0 for unseen words.
    pub fn document_frequency(&self, word: &str) -> usize {
        self.postings(word).map_or(0, |p| p.len())
    }

    pub fn term_frequency(&self, word: &str, doc_id: DocId) -> f64 {
        self.postings(word).and_then(|p| p.get(&doc_id)).copied().unwrap_or(0.0)
    }

    /// Inverse document frequency `ln(N / df)`, or None for unseen words.
    pub fn inverse_document_frequency(&self, word: &str) -> Option<f64> {
        let df = self.document_frequency(word);
        if df == 0 {
            return None;
        }
        Some((self.document_count() as f64 / df as f64).ln())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tf_sum(index: &InvertedIndex, doc_id: DocId, words: &[&str]) -> f64 {
        let unique: BTreeSet<&str> = words.iter().copied().collect();
        unique.into_iter().map(|w| index.term_frequency(w, doc_id)).sum()
    }

    #[test]
    fn repeated_words_accumulate_share() {
        let mut index = InvertedIndex::new();
        let words = ["fluffy", "cat", "fluffy", "tail"];
        index.add_document(7, &words).unwrap();
        assert_eq!(index.term_frequency("fluffy", 7), 0.5);
        assert_eq!(index.term_frequency("cat", 7), 0.25);
        assert!((tf_sum(&index, 7, &words) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn frequencies_sum_to_one_per_document() {
        let mut index = InvertedIndex::new();
        let docs: [&[&str]; 3] = [&["a", "b", "c"], &["a", "a", "a", "d", "e", "f", "g"], &["z"]];
        for (id, words) in docs.iter().enumerate() {
            index.add_document(id as DocId, words).unwrap();
        }
        for (id, words) in docs.iter().enumerate() {
            assert!((tf_sum(&index, id as DocId, words) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_document_is_counted_without_postings() {
        let mut index = InvertedIndex::new();
        index.add_document(0, &[]).unwrap();
        assert_eq!(index.document_count(), 1);
        assert_eq!(index.word_count(), 0);
        assert!(index.contains_document(0));
    }

    #[test]
    fn duplicate_id_is_rejected_without_changes() {
        let mut index = InvertedIndex::new();
        index.add_document(1, &["cat"]).unwrap();
        let err = index.add_document(1, &["dog"]).unwrap_err();
        assert_eq!(err, SearchError::DuplicateDocument(1));
        assert_eq!(index.document_count(), 1);
        assert!(index.postings("dog").is_none());
        assert_eq!(index.term_frequency("cat", 1), 1.0);
    }

    #[test]
    fn unknown_word_lookups_are_empty() {
        let index = InvertedIndex::new();
        assert_eq!(index.document_frequency("ghost"), 0);
        assert!(index.postings("ghost").is_none());
        assert_eq!(index.term_frequency("ghost", 0), 0.0);
        assert_eq!(index.inverse_document_frequency("ghost"), None);
    }

    #[test]
    fn idf_uses_natural_log() {
        let mut index = InvertedIndex::new();
        index.add_document(0, &["cat"]).unwrap();
        index.add_document(1, &["dog"]).unwrap();
        index.add_document(2, &["cat", "dog"]).unwrap();
        let idf = index.inverse_document_frequency("cat").unwrap();
        assert!((idf - 1.5f64.ln()).abs() < 1e-12);
    }
}
