//! TF-IDF relevance ranking over an [`InvertedIndex`].

use crate::index::InvertedIndex;
use crate::query::Query;
use crate::DocId;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Relevance of every document matching at least one plus word, minus
/// excluded documents and documents rejected by `keep`. Unsorted.
pub fn find_all_documents<F>(index: &InvertedIndex, query: &Query, keep: F) -> Vec<(DocId, f64)>
where
    F: Fn(DocId) -> bool,
{
    let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();
    for word in &query.plus_words {
        let (Some(idf), Some(postings)) = (index.inverse_document_frequency(word), index.postings(word)) else {
            continue;
        };
        for (&doc_id, &tf) in postings {
            *document_to_relevance.entry(doc_id).or_insert(0.0) += idf * tf;
        }
    }

    for word in &query.minus_words {
        if document_to_relevance.is_empty() {
            break;
        }
        if let Some(postings) = index.postings(word) {
            for doc_id in postings.keys() {
                document_to_relevance.remove(doc_id);
            }
        }
    }

    document_to_relevance.into_iter().filter(|(doc_id, _)| keep(*doc_id)).collect()
}

/// Descending relevance; equal relevance falls back to ascending document id.
pub fn compare_hits(lhs: &(DocId, f64), rhs: &(DocId, f64)) -> Ordering {
    rhs.1.total_cmp(&lhs.1).then_with(|| lhs.0.cmp(&rhs.0))
}

/// Top `max_results` documents for `query`, best first.
pub fn rank<F>(index: &InvertedIndex, query: &Query, keep: F, max_results: usize) -> Vec<(DocId, f64)>
where
    F: Fn(DocId) -> bool,
{
    let mut scored = find_all_documents(index, query, keep);
    let total_hits = scored.len();
    scored.sort_by(compare_hits);
    scored.truncate(max_results);
    tracing::debug!(total_hits, returned = scored.len(), "ranked documents");
    scored
}
