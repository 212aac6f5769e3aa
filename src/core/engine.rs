use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use crate::analysis::text::{is_valid_word, split_into_words};
use crate::core::config::EngineConfig;
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, Document, DocumentStatus, ExecutionMode};
use crate::index::catalog::{Catalog, DocumentData, average_rating};
use crate::index::forward::ForwardIndex;
use crate::index::interner::{Interner, TermId};
use crate::index::inverted::InvertedIndex;
use crate::parallel::concurrent_map::ConcurrentMap;
use crate::query::parser::{Query, QueryParser};
use crate::scoring::scorer;

/// Ranked results are truncated to this many entries
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// In-memory TF-IDF search engine.
///
/// Owns the vocabulary interner, the document catalog and the mutually
/// consistent inverted/forward index pair. Insertion is single-writer
/// (`&mut self`); queries are read-only and may run from many threads.
#[derive(Debug)]
pub struct SearchEngine {
    config: EngineConfig,
    vocabulary: Interner,
    stop_words: HashSet<TermId>,
    inverted: InvertedIndex,
    forward: ForwardIndex,
    catalog: Catalog,
}

impl SearchEngine {
    /// Build an engine over the given stop words. Empty entries are
    /// ignored; a control character in any stop word is `InvalidArgument`.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        SearchEngine::with_config(stop_words, EngineConfig::default())
    }

    /// Build an engine from whitespace-separated stop-word text
    pub fn from_text(stop_words_text: &str) -> Result<Self> {
        SearchEngine::new(split_into_words(stop_words_text))
    }

    pub fn with_config<I, S>(stop_words: I, config: EngineConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Interner::new();
        let mut stop_set = HashSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(Error::invalid_argument(format!(
                    "control character in stop word '{word}'"
                )));
            }
            stop_set.insert(vocabulary.intern(word));
        }
        Ok(SearchEngine {
            config,
            vocabulary,
            stop_words: stop_set,
            inverted: InvertedIndex::new(),
            forward: ForwardIndex::new(),
            catalog: Catalog::new(),
        })
    }

    /// Index one document. Validation runs to completion before any
    /// structure is touched: a failing call leaves the engine unchanged.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if !id.is_valid() {
            return Err(Error::invalid_argument(format!(
                "negative document id {}",
                id.value()
            )));
        }
        if self.catalog.contains(id) {
            return Err(Error::invalid_argument(format!(
                "document id {} is already in use",
                id.value()
            )));
        }
        // The whole text is checked, not just the split words: a control
        // character acting as a separator is still invalid input.
        if !is_valid_word(text) {
            return Err(Error::invalid_argument(format!(
                "control character in document {}",
                id.value()
            )));
        }
        let words: Vec<&str> = split_into_words(text)
            .filter(|word| !self.is_stop_word(word))
            .collect();

        // Commit: all three per-document records are created together.
        let mut counts: HashMap<TermId, usize> = HashMap::new();
        for word in &words {
            *counts.entry(self.vocabulary.intern(word)).or_insert(0) += 1;
        }
        let total = words.len() as f64;
        let frequencies: BTreeMap<TermId, f64> = counts
            .into_iter()
            .map(|(term, count)| (term, count as f64 / total))
            .collect();
        for (&term, &frequency) in &frequencies {
            self.inverted.add_posting(term, id, frequency);
        }
        self.forward.insert(id, frequencies);
        self.catalog.insert(
            id,
            DocumentData {
                rating: average_rating(ratings),
                status,
            },
        );
        debug!(id = id.value(), words = words.len(), "document added");
        Ok(())
    }

    /// Top documents with `Actual` status, ranked sequentially
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with(ExecutionMode::Sequential, raw_query, |_, status, _| {
            status == DocumentStatus::Actual
        })
    }

    /// Top documents with an explicit status filter
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(
            ExecutionMode::Sequential,
            raw_query,
            move |_, document_status, _| document_status == status,
        )
    }

    /// General form: explicit execution mode and caller predicate over
    /// (id, status, rating). At most `MAX_RESULT_DOCUMENT_COUNT` results,
    /// relevance descending, near-ties broken by rating descending.
    pub fn find_top_documents_with<P>(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = self.parse_query(raw_query)?;
        let relevance = match mode {
            ExecutionMode::Sequential => self.rank_sequential(&query, &predicate),
            ExecutionMode::Parallel => self.rank_parallel(&query, &predicate),
        };
        let mut matched: Vec<Document> = relevance
            .into_iter()
            .map(|(doc_id, relevance)| Document {
                id: doc_id,
                relevance,
                rating: self.catalog.get(doc_id).map_or(0, |data| data.rating),
            })
            .collect();
        matched.sort_by(scorer::compare_ranked);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched)
    }

    /// Plus-terms of the query present in the document, sorted; emptied
    /// when any minus-term matches. `UnknownDocument` for a non-live id.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        self.match_document_with(ExecutionMode::Sequential, raw_query, id)
    }

    pub fn match_document_with(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = self.parse_query(raw_query)?;
        let data = self.catalog.get(id).ok_or_else(|| {
            Error::unknown_document(format!("document {} is not in the index", id.value()))
        })?;
        let Some(doc_terms) = self.forward.get(id) else {
            return Ok((Vec::new(), data.status));
        };
        let mut matched = match mode {
            ExecutionMode::Sequential => {
                if query
                    .minus_terms
                    .iter()
                    .any(|term| doc_terms.contains_key(term))
                {
                    return Ok((Vec::new(), data.status));
                }
                query
                    .plus_terms
                    .iter()
                    .copied()
                    .filter(|term| doc_terms.contains_key(term))
                    .map(|term| self.vocabulary.resolve(term).to_string())
                    .collect::<Vec<String>>()
            }
            ExecutionMode::Parallel => {
                let minus: Vec<TermId> = query.minus_terms.iter().copied().collect();
                if minus
                    .par_iter()
                    .any(|term| doc_terms.contains_key(term))
                {
                    return Ok((Vec::new(), data.status));
                }
                let plus: Vec<TermId> = query.plus_terms.iter().copied().collect();
                plus.par_iter()
                    .copied()
                    .filter(|term| doc_terms.contains_key(term))
                    .map(|term| self.vocabulary.resolve(term).to_string())
                    .collect()
            }
        };
        matched.sort();
        Ok((matched, data.status))
    }

    /// Term → frequency mapping of one document; empty for a non-live id
    pub fn word_frequencies(&self, id: DocId) -> BTreeMap<String, f64> {
        match self.forward.get(id) {
            Some(frequencies) => frequencies
                .iter()
                .map(|(&term, &frequency)| {
                    (self.vocabulary.resolve(term).to_string(), frequency)
                })
                .collect(),
            None => BTreeMap::new(),
        }
    }

    /// The document's vocabulary as sorted term handles; `None` for a
    /// non-live id. This is what duplicate detection compares.
    pub fn word_set(&self, id: DocId) -> Option<Vec<TermId>> {
        self.forward
            .get(id)
            .map(|frequencies| frequencies.keys().copied().collect())
    }

    /// Remove a document and its postings; no-op for a non-live id
    pub fn remove_document(&mut self, id: DocId) {
        self.remove_document_with(ExecutionMode::Sequential, id);
    }

    /// Parallel mode fans out over the document's own term set, which
    /// names each posting list at most once. Removing several documents
    /// concurrently is out of contract (`&mut self` rules it out anyway).
    pub fn remove_document_with(&mut self, mode: ExecutionMode, id: DocId) {
        let Some(doc_terms) = self.forward.remove(id) else {
            return;
        };
        match mode {
            ExecutionMode::Sequential => {
                for &term in doc_terms.keys() {
                    self.inverted.remove_posting(term, id);
                }
            }
            ExecutionMode::Parallel => {
                let terms: HashSet<TermId> = doc_terms.keys().copied().collect();
                self.inverted.remove_postings_parallel(id, &terms);
            }
        }
        self.catalog.remove(id);
        debug!(id = id.value(), "document removed");
    }

    /// Ascending iteration over currently live ids
    pub fn live_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.catalog.ids()
    }

    pub fn document_count(&self) -> usize {
        self.catalog.len()
    }

    fn parse_query(&self, raw_query: &str) -> Result<Query> {
        QueryParser::new(&self.vocabulary, &self.stop_words).parse(raw_query)
    }

    fn is_stop_word(&self, word: &str) -> bool {
        self.vocabulary
            .lookup(word)
            .is_some_and(|term| self.stop_words.contains(&term))
    }

    fn rank_sequential<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        for &term in &query.plus_terms {
            let Some(postings) = self.inverted.postings(term) else {
                continue;
            };
            let idf = scorer::inverse_document_freq(self.document_count(), postings.len());
            for (&doc_id, &term_freq) in postings {
                let Some(data) = self.catalog.get(doc_id) else {
                    continue;
                };
                if predicate(doc_id, data.status, data.rating) {
                    *relevance.entry(doc_id).or_insert(0.0) += term_freq * idf;
                }
            }
        }
        for &term in &query.minus_terms {
            let Some(postings) = self.inverted.postings(term) else {
                continue;
            };
            for &doc_id in postings.keys() {
                relevance.remove(&doc_id);
            }
        }
        relevance
    }

    /// Same two passes as `rank_sequential`, fanned out over terms. Two
    /// plus-terms can both score the same document, so accumulation goes
    /// through the lock-striped map; rayon joins each pass before the
    /// next one starts and before the drain.
    fn rank_parallel<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let accumulator: ConcurrentMap<DocId, f64> =
            ConcurrentMap::new(self.config.accumulator_shards);
        let plus: Vec<TermId> = query.plus_terms.iter().copied().collect();
        plus.par_iter().for_each(|&term| {
            let Some(postings) = self.inverted.postings(term) else {
                return;
            };
            let idf = scorer::inverse_document_freq(self.document_count(), postings.len());
            for (&doc_id, &term_freq) in postings {
                let Some(data) = self.catalog.get(doc_id) else {
                    continue;
                };
                if predicate(doc_id, data.status, data.rating) {
                    *accumulator.access_or_insert(doc_id) += term_freq * idf;
                }
            }
        });
        let minus: Vec<TermId> = query.minus_terms.iter().copied().collect();
        minus.par_iter().for_each(|&term| {
            let Some(postings) = self.inverted.postings(term) else {
                return;
            };
            for &doc_id in postings.keys() {
                accumulator.erase(doc_id);
            }
        });
        accumulator.drain_to_ordered()
    }
}
