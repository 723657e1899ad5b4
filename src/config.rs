//! Configuration for the CareerNet API and the retrieval policy
//!
//! Two pieces: [`ApiConfig`] describes the remote endpoint and fixed query
//! selectors, [`FetchPolicy`] tunes the paginated retrieval defenses.
//! Both load from a JSON file or inline JSON.

use crate::error::{Error, Result};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default base endpoint of the CareerNet open API
pub const DEFAULT_BASE_URL: &str = "https://www.career.go.kr/cnet/openapi/getOpenApi";

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "CAREERSCAN_API_KEY";

/// Remote endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the open API
    pub base_url: String,
    /// API key (falls back to `CAREERSCAN_API_KEY` when empty)
    pub api_key: String,
    /// Service type selector
    pub svc_type: String,
    /// Service code selector
    pub svc_code: String,
    /// Response content type selector
    pub content_type: String,
    /// List-kind selector
    pub gubun: String,
    /// Optional region filter
    pub region: Option<String>,
    /// Records per page
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            svc_type: "api".to_string(),
            svc_code: "SCHOOL".to_string(),
            content_type: "xml".to_string(),
            gubun: "high_list".to_string(),
            region: None,
            page_size: 100,
        }
    }
}

impl ApiConfig {
    /// Load config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Load config from an inline JSON string
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        Ok(config)
    }

    /// Resolve the API key, consulting the environment as a fallback.
    ///
    /// Errors when neither the config nor the environment provides one.
    pub fn resolve_api_key(&self) -> Result<String> {
        if !self.api_key.is_empty() {
            return Ok(self.api_key.clone());
        }
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::missing_field("api_key"))
    }

    /// Set the region filter
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }
}

/// Tuning knobs for the paginated retrieval defenses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchPolicy {
    /// Attempts per page before the whole retrieval fails
    pub max_attempts: u32,
    /// Delay before a retry attempt, in milliseconds
    pub retry_delay_ms: u64,
    /// How the retry delay grows across attempts
    pub backoff_type: BackoffType,
    /// Pacing delay before every page request, in milliseconds
    pub page_delay_ms: u64,
    /// Below this nonzero total record count the retrieval is rejected
    pub min_yield: usize,
    /// How long a completed retrieval stays cached, in seconds
    pub cache_ttl_secs: u64,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_ms: 1_000,
            backoff_type: BackoffType::Constant,
            page_delay_ms: 200,
            min_yield: 10,
            cache_ttl_secs: 3_600,
        }
    }
}

impl FetchPolicy {
    /// Delay before the given retry attempt (0-based)
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let base = Duration::from_millis(self.retry_delay_ms);
        match self.backoff_type {
            BackoffType::Constant => base,
            BackoffType::Linear => base * (attempt + 1),
            BackoffType::Exponential => base * 2u32.saturating_pow(attempt),
        }
    }

    /// Pacing delay inserted before every page request
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// Cache time-to-live
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// A policy with no sleeps, for tests
    pub fn immediate() -> Self {
        Self {
            retry_delay_ms: 0,
            page_delay_ms: 0,
            ..Default::default()
        }
    }
}
