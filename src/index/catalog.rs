use std::collections::BTreeMap;

use crate::core::types::{DocId, DocumentStatus};

/// Per-document metadata held by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// Document catalog: id → metadata, with ascending iteration over live ids.
/// Its key set always equals the forward index's key set.
#[derive(Debug)]
pub struct Catalog {
    documents: BTreeMap<DocId, DocumentData>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            documents: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, id: DocId, data: DocumentData) {
        self.documents.insert(id, data);
    }

    pub fn remove(&mut self, id: DocId) -> Option<DocumentData> {
        self.documents.remove(&id)
    }

    pub fn get(&self, id: DocId) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Live ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.documents.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new()
    }
}

/// Truncated integer mean of the caller-supplied rating samples, 0 if none
pub fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    (sum / ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_iterate_ascending() {
        let mut catalog = Catalog::new();
        for id in [7, 1, 4] {
            catalog.insert(
                DocId(id),
                DocumentData {
                    rating: 0,
                    status: DocumentStatus::Actual,
                },
            );
        }
        let ids: Vec<i64> = catalog.ids().map(|id| id.value()).collect();
        assert_eq!(ids, vec![1, 4, 7]);
    }

    #[test]
    fn average_rating_truncates() {
        assert_eq!(average_rating(&[]), 0);
        assert_eq!(average_rating(&[5]), 5);
        assert_eq!(average_rating(&[1, 2, 3]), 2);
        assert_eq!(average_rating(&[1, 2]), 1);
        assert_eq!(average_rating(&[-1, -2]), -1);
    }
}
