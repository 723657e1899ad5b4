//! Paginated retrieval
//!
//! The heart of the crate: [`PagedFetcher`] drains a page-oriented remote
//! source of unknown total length into one complete in-memory result set,
//! or fails closed. Defenses, in the order they are checked:
//!
//! - a page byte-identical to the previous one ends the data (the server
//!   re-serves its last page indefinitely instead of signaling exhaustion)
//! - a page with zero parsed records ends the data
//! - an advertised `totalCount` bounds the loop, but is never the only stop
//! - each page gets a fixed retry budget over transport, status, and parse
//!   failures; exhausting it fails the whole call, discarding everything
//! - a nonzero total below the minimum-yield threshold fails the call
//!
//! Pages come from a [`PageSource`], so tests can script a source without
//! a network.

mod fetcher;
mod source;

pub use fetcher::PagedFetcher;
pub use source::{CareerNetSource, PageSource};
