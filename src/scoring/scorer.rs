use std::cmp::Ordering;

use crate::core::types::Document;

/// Relevance gaps below this are ties, broken by rating instead
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// idf = ln(live documents / documents containing the term)
pub fn inverse_document_freq(total_docs: usize, doc_freq: usize) -> f64 {
    (total_docs as f64 / doc_freq as f64).ln()
}

/// Ranking order: relevance descending, near-equal relevance falls back to
/// rating descending
pub fn compare_ranked(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance
            .partial_cmp(&lhs.relevance)
            .unwrap_or(Ordering::Equal)
    }
}
