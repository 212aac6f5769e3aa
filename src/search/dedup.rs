use std::collections::HashSet;
use tracing::info;

use crate::core::engine::SearchEngine;
use crate::core::types::DocId;
use crate::index::interner::TermId;

/// Remove every document whose vocabulary duplicates an earlier one.
///
/// Live ids iterate in ascending order, so the first-seen holder of a
/// vocabulary is always the lowest id and survives. Two documents count as
/// duplicates when their term sets are equal; frequencies and word order
/// are ignored. Returns the removed ids in ascending order.
pub fn remove_duplicate_documents(engine: &mut SearchEngine) -> Vec<DocId> {
    let mut seen: HashSet<Vec<TermId>> = HashSet::new();
    let mut to_remove = Vec::new();
    let live: Vec<DocId> = engine.live_ids().collect();
    for id in live {
        let Some(vocabulary) = engine.word_set(id) else {
            continue;
        };
        if !seen.insert(vocabulary) {
            to_remove.push(id);
        }
    }
    for &id in &to_remove {
        info!(id = id.value(), "found duplicate document");
        engine.remove_document(id);
    }
    to_remove
}
