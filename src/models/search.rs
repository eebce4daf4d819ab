//! Search request and response models for the preprint server.

use serde::{Deserialize, Serialize};

/// Parameters sent to the preprint search API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprintQuery {
    /// Fielded query, e.g. `ti:"attention is all you need" AND au:Vaswani`
    pub search_query: String,

    /// Offset of the first result
    pub start: usize,

    /// Maximum number of candidates to return
    pub max_results: usize,
}

impl PreprintQuery {
    /// Create a query starting at offset 0
    pub fn new(search_query: impl Into<String>, max_results: usize) -> Self {
        Self {
            search_query: search_query.into(),
            start: 0,
            max_results,
        }
    }
}

/// One entry returned by the preprint search API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Entry title, whitespace collapsed
    pub title: String,

    /// Canonical abstract-page URL
    pub url: String,
}

impl Candidate {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}
