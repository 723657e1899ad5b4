//! # careerscan
//!
//! Harvests the CareerNet public directory of vocational and
//! special-purpose high schools and searches the major/department field.
//!
//! The remote API is paginated XML with rough edges: the total count is
//! reported inconsistently, the last page may be re-served forever, and
//! bodies occasionally arrive truncated. The retrieval loop treats all of
//! that as expected weather and either returns the complete directory or
//! fails closed.
//!
//! ## Features
//!
//! - **Resilient pagination**: duplicate-page and empty-page termination,
//!   per-page retry budget, minimum-yield sanity check
//! - **Request pacing**: token bucket limiter before every page request
//! - **Session cache**: completed retrievals memoized per request key
//!   for a fixed time window
//! - **Major search**: case-insensitive substring search with a
//!   session-scoped history
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use careerscan::{ApiConfig, FetchPolicy, HttpClient, PagedFetcher, SessionContext};
//!
//! #[tokio::main]
//! async fn main() -> careerscan::Result<()> {
//!     let config = ApiConfig::default().with_api_key("...");
//!     let fetcher = PagedFetcher::careernet(config, FetchPolicy::default(), HttpClient::new())?;
//!
//!     let mut session = SessionContext::default();
//!     let records = session.load_schools(None, &fetcher).await?;
//!     let hits = session.search(&records, "디자인");
//!     println!("{} matching departments", hits.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types
pub mod types;

/// Endpoint configuration and retrieval policy
pub mod config;

/// HTTP client with request pacing
pub mod http;

/// XML page decoding
pub mod decode;

/// Paginated retrieval
pub mod fetch;

/// Session cache and search history
pub mod session;

/// Keyword search over majors
pub mod search;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ApiConfig, FetchPolicy};
pub use error::{Error, Result};
pub use fetch::{CareerNetSource, PagedFetcher, PageSource};
pub use http::HttpClient;
pub use search::search_majors;
pub use session::SessionContext;
pub use types::{SchoolRecord, SearchHistoryEntry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
