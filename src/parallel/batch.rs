use rayon::prelude::*;

use crate::core::engine::SearchEngine;
use crate::core::error::Result;
use crate::core::types::Document;

/// Run every query against the engine, one rayon task per query. Each
/// task is read-only, so no locking happens at this layer. The output is
/// index-aligned with the input: element `i` equals
/// `engine.find_top_documents(&queries[i])`.
pub fn process_queries(
    engine: &SearchEngine,
    queries: &[String],
) -> Result<Vec<Vec<Document>>> {
    queries
        .par_iter()
        .map(|query| engine.find_top_documents(query))
        .collect()
}

/// Flatten the per-query result lists into one list, concatenating in
/// input-query order. The join itself is sequential: concatenation is not
/// commutative, so an arbitrary-order parallel reduction would scramble it.
pub fn process_queries_joined(
    engine: &SearchEngine,
    queries: &[String],
) -> Result<Vec<Document>> {
    Ok(process_queries(engine, queries)?
        .into_iter()
        .flatten()
        .collect())
}
