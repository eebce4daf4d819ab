//! Network boundaries: the listing page and the preprint search API.
//!
//! Both are traits so the pipeline can run against real HTTP endpoints
//! ([`HttpListingSource`], [`ArxivSource`]) or canned responses
//! ([`MockSource`]).

mod arxiv;
mod listing;
pub mod mock;

pub use arxiv::ArxivSource;
pub use listing::HttpListingSource;
pub use mock::MockSource;

use async_trait::async_trait;

use crate::models::{Candidate, PreprintQuery};

/// Something that can fetch a listing page's markup
#[async_trait]
pub trait ListingSource: Send + Sync + std::fmt::Debug {
    /// Fetch the page at `url` and return its body
    async fn fetch_page(&self, url: &str) -> Result<String, SourceError>;
}

/// A preprint search API
#[async_trait]
pub trait PreprintSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g., "arxiv")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Run a query and return candidates in the order the server ranked them
    async fn search(&self, query: &PreprintQuery) -> Result<Vec<Candidate>, SourceError>;
}

/// Errors that can occur when talking to a remote source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// Parsing error (XML, HTML, etc.)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<url::ParseError> for SourceError {
    fn from(err: url::ParseError) -> Self {
        SourceError::InvalidRequest(format!("URL: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SourceError::Status {
            status: 503,
            url: "https://example.org".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP status 503 from https://example.org");

        let err: SourceError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, SourceError::InvalidRequest(_)));
    }
}
