use std::collections::BTreeMap;

use crate::core::types::DocId;
use crate::index::interner::TermId;

/// Forward index: document id → (term → term frequency). Exact mirror of
/// the inverted index; it exists so removal and duplicate detection touch
/// only one document's vocabulary instead of scanning every posting list.
#[derive(Debug)]
pub struct ForwardIndex {
    documents: BTreeMap<DocId, BTreeMap<TermId, f64>>,
}

impl ForwardIndex {
    pub fn new() -> Self {
        ForwardIndex {
            documents: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, doc_id: DocId, frequencies: BTreeMap<TermId, f64>) {
        self.documents.insert(doc_id, frequencies);
    }

    pub fn get(&self, doc_id: DocId) -> Option<&BTreeMap<TermId, f64>> {
        self.documents.get(&doc_id)
    }

    pub fn remove(&mut self, doc_id: DocId) -> Option<BTreeMap<TermId, f64>> {
        self.documents.remove(&doc_id)
    }

    pub fn contains(&self, doc_id: DocId) -> bool {
        self.documents.contains_key(&doc_id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Default for ForwardIndex {
    fn default() -> Self {
        ForwardIndex::new()
    }
}
