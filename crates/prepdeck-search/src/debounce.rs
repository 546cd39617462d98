//! Debounced search driver.
//!
//! Queries are pushed as the user types. A background task waits until no new
//! query has arrived for the debounce delay and then publishes results for the
//! latest query only. Superseded queries are never run.

use std::{sync::Arc, time::Duration};

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::{
    query::{SearchHit, SearchQuery},
    service::SearchService,
};

/// Default quiet period before a query runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Results published for one settled query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// The query these results answer.
    pub query: String,

    /// Hits, title matches first.
    pub hits: Vec<SearchHit>,
}

impl SearchResults {
    /// Whether the query was an active search (not empty or blank).
    pub fn is_active(&self) -> bool {
        SearchQuery::parse(&self.query).is_active()
    }
}

/// Handle to a running debounced search task.
///
/// Must be created inside a Tokio runtime. Dropping the handle stops the task.
#[derive(Debug)]
pub struct DebouncedSearch {
    queries: watch::Sender<String>,
    results: watch::Receiver<SearchResults>,
}

impl DebouncedSearch {
    /// Spawn the driver task over `service`.
    pub fn spawn(service: Arc<SearchService>, delay: Duration) -> Self {
        let (queries, query_rx) = watch::channel(String::new());
        let (results_tx, results) = watch::channel(SearchResults::default());

        tokio::spawn(run(service, delay, query_rx, results_tx));

        Self { queries, results }
    }

    /// Submit the current input. Replaces any pending query.
    pub fn submit(&self, query: impl Into<String>) {
        let query = query.into();
        trace!(query = %query, "query submitted");
        self.queries.send_replace(query);
    }

    /// Wait for the next published results.
    ///
    /// Returns `None` once the driver task has stopped.
    pub async fn next_results(&mut self) -> Option<SearchResults> {
        self.results.changed().await.ok()?;
        Some(self.results.borrow_and_update().clone())
    }

    /// The most recently published results, without waiting.
    pub fn latest(&self) -> SearchResults {
        self.results.borrow().clone()
    }

    /// A receiver that observes every publication.
    pub fn subscribe(&self) -> watch::Receiver<SearchResults> {
        self.results.clone()
    }
}

async fn run(
    service: Arc<SearchService>,
    delay: Duration,
    mut queries: watch::Receiver<String>,
    results: watch::Sender<SearchResults>,
) {
    while queries.changed().await.is_ok() {
        // restart the quiet period on every new keystroke
        loop {
            match tokio::time::timeout(delay, queries.changed()).await {
                Ok(Ok(())) => continue,
                Ok(Err(_)) => return,
                Err(_) => break,
            }
        }

        let query = queries.borrow_and_update().clone();
        let hits = service.hits(&query);
        debug!(query = %query, hits = hits.len(), "debounced search settled");

        if results.send(SearchResults { query, hits }).is_err() {
            return;
        }
    }
}
