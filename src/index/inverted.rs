use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::core::types::DocId;
use crate::index::interner::TermId;

/// Inverted index: term → (document id → term frequency). Postings are kept
/// in document-id order. Always mutated together with the forward index.
#[derive(Debug)]
pub struct InvertedIndex {
    postings: HashMap<TermId, BTreeMap<DocId, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex {
            postings: HashMap::new(),
        }
    }

    pub fn add_posting(&mut self, term: TermId, doc_id: DocId, frequency: f64) {
        self.postings
            .entry(term)
            .or_default()
            .insert(doc_id, frequency);
    }

    pub fn postings(&self, term: TermId) -> Option<&BTreeMap<DocId, f64>> {
        self.postings.get(&term)
    }

    pub fn contains_doc(&self, term: TermId, doc_id: DocId) -> bool {
        self.postings
            .get(&term)
            .is_some_and(|list| list.contains_key(&doc_id))
    }

    /// Number of documents containing the term
    pub fn doc_frequency(&self, term: TermId) -> usize {
        self.postings.get(&term).map_or(0, |list| list.len())
    }

    /// Unlink one document from one term's posting list. Empty posting
    /// lists are dropped so a removed vocabulary does not linger.
    pub fn remove_posting(&mut self, term: TermId, doc_id: DocId) {
        if let Some(list) = self.postings.get_mut(&term) {
            list.remove(&doc_id);
            if list.is_empty() {
                self.postings.remove(&term);
            }
        }
    }

    /// Parallel unlink of one document from every term in `terms`. Safe
    /// because a document's term set names each posting list at most once,
    /// so the worker tasks mutate disjoint lists.
    pub fn remove_postings_parallel(&mut self, doc_id: DocId, terms: &HashSet<TermId>) {
        self.postings.par_iter_mut().for_each(|(term, list)| {
            if terms.contains(term) {
                list.remove(&doc_id);
            }
        });
        self.postings.retain(|_, list| !list.is_empty());
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }
}

impl Default for InvertedIndex {
    fn default() -> Self {
        InvertedIndex::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postings_stay_in_doc_id_order() {
        let mut index = InvertedIndex::new();
        let term = TermId(0);
        index.add_posting(term, DocId(9), 0.5);
        index.add_posting(term, DocId(2), 0.25);
        let ids: Vec<i64> = index
            .postings(term)
            .unwrap()
            .keys()
            .map(|id| id.value())
            .collect();
        assert_eq!(ids, vec![2, 9]);
    }

    #[test]
    fn empty_posting_lists_are_dropped() {
        let mut index = InvertedIndex::new();
        index.add_posting(TermId(0), DocId(1), 1.0);
        index.remove_posting(TermId(0), DocId(1));
        assert_eq!(index.term_count(), 0);
        assert!(index.postings(TermId(0)).is_none());
    }

    #[test]
    fn parallel_unlink_matches_sequential() {
        let mut seq = InvertedIndex::new();
        let mut par = InvertedIndex::new();
        for term in 0..8u32 {
            for doc in 0..4i64 {
                seq.add_posting(TermId(term), DocId(doc), 0.1);
                par.add_posting(TermId(term), DocId(doc), 0.1);
            }
        }
        let doc_terms: HashSet<TermId> = (0..8).map(TermId).collect();
        for &term in &doc_terms {
            seq.remove_posting(term, DocId(2));
        }
        par.remove_postings_parallel(DocId(2), &doc_terms);
        for term in 0..8u32 {
            assert_eq!(
                seq.postings(TermId(term)).map(|l| l.len()),
                par.postings(TermId(term)).map(|l| l.len())
            );
            assert!(!par.contains_doc(TermId(term), DocId(2)));
        }
    }
}
