use serde::{Deserialize, Serialize};

/// Caller-assigned document identifier. Must be non-negative; the add path
/// rejects negative and duplicate ids before touching any index structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub i64);

impl DocId {
    pub fn new(id: i64) -> Self {
        DocId(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }
}

impl From<i64> for DocId {
    fn from(id: i64) -> Self {
        DocId(id)
    }
}

/// Lifecycle status attached to every catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// One ranked search hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

/// How a query or removal distributes its work. Chosen explicitly by the
/// caller; both modes produce identical results for identical index state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
}
