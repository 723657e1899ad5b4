//! Common types used throughout careerscan
//!
//! This module contains shared type definitions and utility types
//! used across multiple modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// School Record
// ============================================================================

/// One row of the school directory.
///
/// Every field is optional: the source routinely omits children of a
/// `<content>` block, and a record stays valid with any subset present.
/// Records are immutable once constructed and compare structurally.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolRecord {
    /// School name
    pub school_name: Option<String>,
    /// Administrative region
    pub region: Option<String>,
    /// Major/department name (the search key)
    pub major: Option<String>,
    /// What the department teaches
    pub subject: Option<String>,
    /// Career outcomes after graduation
    pub chart: Option<String>,
    /// Certifications obtainable
    pub cert: Option<String>,
}

// ============================================================================
// Search History
// ============================================================================

/// A single entry in the session search history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    /// When the query was first issued
    pub at: DateTime<Utc>,
    /// The query string
    pub query: String,
}

impl SearchHistoryEntry {
    /// Create an entry timestamped now
    pub fn now(query: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            query: query.into(),
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff between retry attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    #[default]
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    Exponential,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
