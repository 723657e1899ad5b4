//! Page sources
//!
//! [`PageSource`] abstracts "give me the raw body of page N" so the
//! retrieval loop can be exercised against scripted in-memory sources.
//! [`CareerNetSource`] is the real one, backed by the paced HTTP client.

use crate::config::ApiConfig;
use crate::error::Result;
use crate::http::HttpClient;
use async_trait::async_trait;

/// A paginated remote source of raw page bodies
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the raw body of the given page (1-based). One attempt only;
    /// the caller owns retries.
    async fn fetch_page(&self, page: u32) -> Result<String>;
}

/// The CareerNet open API as a page source
#[derive(Debug)]
pub struct CareerNetSource {
    client: HttpClient,
    config: ApiConfig,
    api_key: String,
}

impl CareerNetSource {
    /// Create a source over the given endpoint config and client.
    ///
    /// Resolves the API key eagerly so a missing key fails before the
    /// first request.
    pub fn new(config: ApiConfig, client: HttpClient) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// The endpoint configuration backing this source
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn query_for(&self, page: u32) -> Vec<(String, String)> {
        let mut query = vec![
            ("apiKey".to_string(), self.api_key.clone()),
            ("svcType".to_string(), self.config.svc_type.clone()),
            ("svcCode".to_string(), self.config.svc_code.clone()),
            ("contentType".to_string(), self.config.content_type.clone()),
            ("gubun".to_string(), self.config.gubun.clone()),
            ("perPage".to_string(), self.config.page_size.to_string()),
            ("currentPage".to_string(), page.to_string()),
        ];
        if let Some(region) = &self.config.region {
            query.push(("region".to_string(), region.clone()));
        }
        query
    }
}

#[async_trait]
impl PageSource for CareerNetSource {
    async fn fetch_page(&self, page: u32) -> Result<String> {
        let query = self.query_for(page);
        self.client.get_text(&self.config.base_url, &query).await
    }
}
