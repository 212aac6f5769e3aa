use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable handle to an interned term. Both indices store handles instead of
/// string slices, so nothing ever dangles into the interner's backing storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TermId(pub u32);

/// Vocabulary interner: one entry per distinct word seen in any added
/// document or in the stop-word list. Entries are never evicted.
#[derive(Debug)]
pub struct Interner {
    terms: Vec<String>,
    handles: HashMap<String, TermId>,
}

impl Interner {
    pub fn new() -> Self {
        Interner {
            terms: Vec::new(),
            handles: HashMap::new(),
        }
    }

    /// Return the handle for `word`, interning it on first sight
    pub fn intern(&mut self, word: &str) -> TermId {
        if let Some(&id) = self.handles.get(word) {
            return id;
        }
        let id = TermId(self.terms.len() as u32);
        self.terms.push(word.to_string());
        self.handles.insert(word.to_string(), id);
        id
    }

    /// Look a word up without interning it. Query words outside the
    /// vocabulary stay un-interned, so lookups never grow the table.
    pub fn lookup(&self, word: &str) -> Option<TermId> {
        self.handles.get(word).copied()
    }

    pub fn resolve(&self, id: TermId) -> &str {
        &self.terms[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Interner::new()
    }
}
