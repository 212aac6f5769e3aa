pub mod analysis;
pub mod core;
pub mod index;
pub mod parallel;
pub mod query;
pub mod scoring;
pub mod search;

pub use crate::core::config::EngineConfig;
pub use crate::core::engine::{MAX_RESULT_DOCUMENT_COUNT, SearchEngine};
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::types::{DocId, Document, DocumentStatus, ExecutionMode};
pub use crate::parallel::batch::{process_queries, process_queries_joined};
pub use crate::search::dedup::remove_duplicate_documents;
pub use crate::search::request_log::RequestLog;

/*
┌──────────────────────────── FINDEX STRUCT ARCHITECTURE ────────────────────────────┐

┌──────────────────────────────────── CORE LAYER ────────────────────────────────────┐
│  struct SearchEngine                                                               │
│  ┌──────────────────────────────────────────────────────────────────────────────┐  │
│  │ config: EngineConfig            // accumulator shard count                   │  │
│  │ vocabulary: Interner            // word → TermId, never evicted              │  │
│  │ stop_words: HashSet<TermId>     // immutable after construction              │  │
│  │ inverted: InvertedIndex         // TermId → (DocId → tf)                     │  │
│  │ forward: ForwardIndex           // DocId → (TermId → tf), mirror of above    │  │
│  │ catalog: Catalog                // DocId → {rating, status}, ascending ids   │  │
│  └──────────────────────────────────────────────────────────────────────────────┘  │
│                                                                                    │
│  ┌──────────────────┐  ┌─────────────────────┐  ┌───────────────────────────────┐  │
│  │ struct DocId     │  │ enum DocumentStatus │  │ struct Document               │  │
│  │ • 0: i64         │  │ • Actual            │  │ • id: DocId                   │  │
│  └──────────────────┘  │ • Irrelevant        │  │ • relevance: f64              │  │
│                        │ • Banned            │  │ • rating: i32                 │  │
│  ┌──────────────────┐  │ • Removed           │  └───────────────────────────────┘  │
│  │ ExecutionMode    │  └─────────────────────┘                                     │
│  │ • Sequential     │                                                              │
│  │ • Parallel       │                                                              │
│  └──────────────────┘                                                              │
└────────────────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────────── QUERY / SCORING ─────────────────────────────────┐
│  QueryParser ──parses──> Query { plus_terms, minus_terms } : BTreeSet<TermId>      │
│  SearchEngine ──ranks──> tf · idf sums, epsilon ties by rating, top 5              │
└────────────────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────────── PARALLEL LAYER ───────────────────────────────────┐
│  ConcurrentMap<K, V>                                                               │
│  ┌──────────────────────────────────────────────────────────────────────────────┐  │
│  │ shards: Vec<Mutex<BTreeMap<K, V>>>  // shard = key mod N, fixed count        │  │
│  │ access_or_insert() → MappedMutexGuard   erase()   drain_to_ordered()         │  │
│  └──────────────────────────────────────────────────────────────────────────────┘  │
│  process_queries ──rayon fan-out──> find_top_documents per query, index-aligned    │
│  process_queries_joined ──sequential flatten──> one list in input order            │
└────────────────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────────── SEARCH UTILITIES ─────────────────────────────────┐
│  remove_duplicate_documents ──compares──> word_set() signatures, lowest id wins    │
│  RequestLog ──wraps──> find_top_documents, 1440-slot window of empty results       │
└────────────────────────────────────────────────────────────────────────────────────┘
*/
