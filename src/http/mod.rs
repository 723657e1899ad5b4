//! HTTP client module
//!
//! Provides a thin HTTP client with request pacing.
//!
//! # Features
//!
//! - **Single-attempt semantics**: the client never retries on its own;
//!   the retrieval loop owns the per-page retry budget so that transport,
//!   status, and parse failures all draw from one budget
//! - **Request pacing**: token bucket rate limiter using governor,
//!   awaited before every outgoing request

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
