use std::collections::VecDeque;

use crate::core::engine::SearchEngine;
use crate::core::error::Result;
use crate::core::types::{Document, DocumentStatus};

/// One request window: a minute per slot, a day of history
const WINDOW_SIZE: usize = 1440;

struct QueryOutcome {
    is_empty: bool,
}

/// Sliding-window tracker over the engine's query entry point. Records
/// whether each query produced results and reports how many queries in
/// the current window came back empty.
pub struct RequestLog<'a> {
    engine: &'a SearchEngine,
    requests: VecDeque<QueryOutcome>,
    no_result_count: usize,
}

impl<'a> RequestLog<'a> {
    pub fn new(engine: &'a SearchEngine) -> Self {
        RequestLog {
            engine,
            requests: VecDeque::with_capacity(WINDOW_SIZE),
            no_result_count: 0,
        }
    }

    pub fn add_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let results = self.engine.find_top_documents(raw_query)?;
        self.record(&results);
        Ok(results)
    }

    pub fn add_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let results = self.engine.find_top_documents_with_status(raw_query, status)?;
        self.record(&results);
        Ok(results)
    }

    /// Number of empty-result queries in the current window
    pub fn no_result_requests(&self) -> usize {
        self.no_result_count
    }

    fn record(&mut self, results: &[Document]) {
        if self.requests.len() == WINDOW_SIZE {
            if let Some(oldest) = self.requests.pop_front() {
                if oldest.is_empty {
                    self.no_result_count -= 1;
                }
            }
        }
        let is_empty = results.is_empty();
        if is_empty {
            self.no_result_count += 1;
        }
        self.requests.push_back(QueryOutcome { is_empty });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SearchEngine {
        let mut engine = SearchEngine::from_text("and in at").unwrap();
        engine
            .add_document(
                crate::core::types::DocId(0),
                "curly dog and fancy collar",
                DocumentStatus::Actual,
                &[1, 2, 3],
            )
            .unwrap();
        engine
    }

    #[test]
    fn counts_empty_results_within_the_window() {
        let engine = engine();
        let mut log = RequestLog::new(&engine);
        for _ in 0..WINDOW_SIZE - 1 {
            log.add_request("empty").unwrap();
        }
        assert_eq!(log.no_result_requests(), WINDOW_SIZE - 1);
        // a hit enters the window without evicting anything yet
        log.add_request("curly dog").unwrap();
        assert_eq!(log.no_result_requests(), WINDOW_SIZE - 1);
        // the window is full now, each new request evicts the oldest
        log.add_request("collar").unwrap();
        assert_eq!(log.no_result_requests(), WINDOW_SIZE - 2);
        log.add_request("empty").unwrap();
        assert_eq!(log.no_result_requests(), WINDOW_SIZE - 2);
    }
}
