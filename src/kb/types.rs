//! Retrieved job-opening records
//!
//! Every value here is request-scoped: built from one `Retrieve` response
//! and discarded once the report has been rendered.

use std::collections::BTreeMap;

/// Where a retrieved chunk originated
#[derive(Debug, Clone, PartialEq)]
pub struct JobSource {
    /// Source type reported by the service (S3, WEB, CUSTOM_DOCUMENT, ...)
    pub source_type: String,
    /// String locator for the source document, when one was reported
    pub location: Option<String>,
}

/// A single job opening retrieved from the knowledge base
#[derive(Debug, Clone, PartialEq)]
pub struct JobOpening {
    /// Text excerpt of the job opening
    pub content: String,
    /// Relevance score in `[0, 1]`, when the service reported one
    pub score: Option<f64>,
    /// Job attributes attached to the source document, keyed by name.
    /// Sorted so report output is deterministic.
    pub metadata: BTreeMap<String, String>,
    /// Source descriptor, when the service reported one
    pub source: Option<JobSource>,
}
