//! Validated search parameters
//!
//! Raw tool input is turned into a [`JobQuery`] before any network call is
//! made. Empty queries are rejected; out-of-range result counts are clamped
//! rather than rejected so that agent-driven input degrades gracefully.

use thiserror::Error;

/// Number of results requested when the caller does not specify one
pub const DEFAULT_MAX_RESULTS: i32 = 10;

/// Smallest accepted result count
pub const MIN_RESULTS: i32 = 1;

/// Largest accepted result count (the Retrieve API limit)
pub const MAX_RESULTS: i32 = 100;

/// Parameter validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The query text was empty or whitespace-only
    #[error("query_text must not be empty")]
    EmptyQueryText,
}

/// A validated job-openings query
#[derive(Debug, Clone, PartialEq)]
pub struct JobQuery {
    query_text: String,
    max_results: i32,
}

impl JobQuery {
    /// Validate raw tool parameters into a query.
    ///
    /// `query_text` is trimmed and must be non-empty afterwards.
    /// `max_results` defaults to [`DEFAULT_MAX_RESULTS`] and is clamped into
    /// `[MIN_RESULTS, MAX_RESULTS]`.
    pub fn new(
        query_text: impl Into<String>,
        max_results: Option<i32>,
    ) -> Result<Self, QueryError> {
        let query_text = query_text.into().trim().to_string();
        if query_text.is_empty() {
            return Err(QueryError::EmptyQueryText);
        }

        let max_results = max_results
            .unwrap_or(DEFAULT_MAX_RESULTS)
            .clamp(MIN_RESULTS, MAX_RESULTS);

        Ok(Self {
            query_text,
            max_results,
        })
    }

    /// The trimmed search query
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// The effective result count, always within `[1, 100]`
    pub fn max_results(&self) -> i32 {
        self.max_results
    }
}
