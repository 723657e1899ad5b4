//! The paginated retrieval loop

use super::source::{CareerNetSource, PageSource};
use crate::config::{ApiConfig, FetchPolicy};
use crate::decode::{parse_page, ParsedPage};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::types::SchoolRecord;
use tracing::{debug, warn};

/// Drains a [`PageSource`] into one complete, ordered record set.
///
/// There is no partial-success path: any unrecoverable error discards all
/// already-fetched pages for that call.
pub struct PagedFetcher<S> {
    source: S,
    policy: FetchPolicy,
    page_size: u32,
}

impl PagedFetcher<CareerNetSource> {
    /// Build a fetcher over the real CareerNet endpoint
    pub fn careernet(config: ApiConfig, policy: FetchPolicy, client: HttpClient) -> Result<Self> {
        let page_size = config.page_size;
        let source = CareerNetSource::new(config, client)?;
        Ok(Self::new(source, policy, page_size))
    }
}

impl<S: PageSource> PagedFetcher<S> {
    /// Create a fetcher over an arbitrary page source
    pub fn new(source: S, policy: FetchPolicy, page_size: u32) -> Self {
        Self {
            source,
            policy,
            page_size,
        }
    }

    /// The retrieval policy in effect
    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// The page source backing this fetcher
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Retrieve every record the source has, in page order.
    ///
    /// Zero records with no errors is a legitimate empty result. A nonzero
    /// total below the minimum-yield threshold is a failure: sources have
    /// been observed collapsing to a short, spuriously "complete" stream.
    pub async fn fetch_all(&self) -> Result<Vec<SchoolRecord>> {
        let mut records: Vec<SchoolRecord> = Vec::new();
        let mut prev_body: Option<String> = None;
        let mut page_bound: Option<u32> = None;
        let mut page: u32 = 1;

        loop {
            let (body, parsed) = self.fetch_page_with_retry(page).await?;

            if prev_body.as_deref() == Some(body.as_str()) {
                // The server re-serves the last page instead of ending the
                // stream; do not append this page's records again.
                debug!(page, "duplicate of previous page, treating as end of data");
                break;
            }

            if parsed.records.is_empty() {
                debug!(page, "empty page, end of data");
                break;
            }

            if page == 1 {
                if let Some(total) = parsed.total_count {
                    let bound = total.div_ceil(u64::from(self.page_size)) as u32;
                    debug!(total, bound, "first page advertised a total count");
                    page_bound = Some(bound);
                }
            }

            records.extend(parsed.records);
            prev_body = Some(body);

            if page_bound.is_some_and(|bound| page >= bound) {
                debug!(page, "reached advertised page bound");
                break;
            }
            page += 1;
        }

        if !records.is_empty() && records.len() < self.policy.min_yield {
            warn!(
                records = records.len(),
                minimum = self.policy.min_yield,
                "suspiciously short stream, rejecting"
            );
            return Err(Error::ShortYield {
                records: records.len(),
                minimum: self.policy.min_yield,
            });
        }

        debug!(records = records.len(), pages = page, "retrieval complete");
        Ok(records)
    }

    /// Fetch and parse one page within the retry budget.
    ///
    /// An attempt only counts as good once the body parses; transport
    /// errors, retryable statuses, and malformed bodies all consume
    /// attempts. A non-retryable error escalates immediately.
    async fn fetch_page_with_retry(&self, page: u32) -> Result<(String, ParsedPage)> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error: Option<Error> = None;

        for attempt in 0..max_attempts {
            if attempt > 0 {
                tokio::time::sleep(self.policy.retry_delay(attempt - 1)).await;
            }
            // Pacing applies to every outgoing request, retries included.
            tokio::time::sleep(self.policy.page_delay()).await;

            match self.attempt(page).await {
                Ok(ok) => return Ok(ok),
                Err(e) if e.is_retryable() => {
                    warn!(
                        page,
                        attempt = attempt + 1,
                        max_attempts,
                        error = %e,
                        "page attempt failed"
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        let cause = last_error.unwrap_or_else(|| Error::Other("unknown failure".to_string()));
        Err(Error::page_exhausted(page, max_attempts, &cause))
    }

    async fn attempt(&self, page: u32) -> Result<(String, ParsedPage)> {
        let body = self.source.fetch_page(page).await?;
        let parsed = parse_page(&body)?;
        Ok((body, parsed))
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for PagedFetcher<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedFetcher")
            .field("source", &self.source)
            .field("policy", &self.policy)
            .field("page_size", &self.page_size)
            .finish()
    }
}
