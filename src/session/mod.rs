//! Session context: result cache and search history
//!
//! The original tool kept both in ambient framework state; here they live
//! in an explicit [`SessionContext`] whose lifecycle the caller owns.
//!
//! The cache memoizes the outcome of a full retrieval per request key
//! (the region filter) and expires purely by elapsed time. There is no
//! lock around the cache fill: the context is held by one caller through
//! `&mut self`, which rules out a concurrent fill by construction. Shared
//! multi-caller surfaces (the HTTP server) wrap the whole context in a
//! mutex instead.

use crate::error::Result;
use crate::fetch::{PagedFetcher, PageSource};
use crate::search::search_majors;
use crate::types::{SchoolRecord, SearchHistoryEntry};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cache key: the request-parameter identity of a retrieval.
///
/// The endpoint selectors are fixed per process, so the region filter is
/// the only part that varies.
pub type CacheKey = Option<String>;

#[derive(Debug, Clone)]
struct CacheEntry {
    records: Arc<Vec<SchoolRecord>>,
    fetched_at: Instant,
}

/// Caller-owned session state
#[derive(Debug)]
pub struct SessionContext {
    cache: HashMap<CacheKey, CacheEntry>,
    history: Vec<SearchHistoryEntry>,
    ttl: Duration,
}

impl SessionContext {
    /// Create a context whose cache entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: HashMap::new(),
            history: Vec::new(),
            ttl,
        }
    }

    /// Load the full record set for the given request key.
    ///
    /// Returns the cached result when one exists within the TTL window;
    /// otherwise runs a full retrieval and caches it on success only.
    /// Failures are never cached.
    pub async fn load_schools<S: PageSource>(
        &mut self,
        key: CacheKey,
        fetcher: &PagedFetcher<S>,
    ) -> Result<Arc<Vec<SchoolRecord>>> {
        if let Some(entry) = self.cache.get(&key) {
            if entry.fetched_at.elapsed() < self.ttl {
                debug!(?key, "serving records from cache");
                return Ok(Arc::clone(&entry.records));
            }
            debug!(?key, "cache entry expired");
        }

        let records = Arc::new(fetcher.fetch_all().await?);
        self.cache.insert(
            key,
            CacheEntry {
                records: Arc::clone(&records),
                fetched_at: Instant::now(),
            },
        );
        Ok(records)
    }

    /// Filter records by major and record the query in the history
    pub fn search<'a>(
        &mut self,
        records: &'a [SchoolRecord],
        query: &str,
    ) -> Vec<&'a SchoolRecord> {
        self.record_search(query);
        search_majors(records, query)
    }

    /// Prepend a history entry for each new distinct query
    pub fn record_search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() || self.history.iter().any(|e| e.query == query) {
            return;
        }
        self.history.insert(0, SearchHistoryEntry::now(query));
    }

    /// Search history, newest first
    pub fn history(&self) -> &[SearchHistoryEntry] {
        &self.history
    }

    /// Forget the search history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Drop all cached results regardless of age
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(Duration::from_secs(3_600))
    }
}
