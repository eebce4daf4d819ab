//! arXiv search API client.

use async_trait::async_trait;
use feed_rs::parser;
use std::sync::Arc;

use crate::models::{Candidate, PreprintQuery};
use crate::sources::{PreprintSource, SourceError};
use crate::utils::{collapse_whitespace, HttpClient};

/// arXiv research source
///
/// Queries the Atom API and turns each `<entry>` into a [`Candidate`].
/// One request per query: no paging, no retries.
#[derive(Debug, Clone)]
pub struct ArxivSource {
    client: Arc<HttpClient>,
    api_url: String,
}

impl ArxivSource {
    /// Create a source against the given API endpoint
    pub fn new(client: Arc<HttpClient>, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl PreprintSource for ArxivSource {
    fn id(&self) -> &str {
        "arxiv"
    }

    fn name(&self) -> &str {
        "arXiv"
    }

    async fn search(&self, query: &PreprintQuery) -> Result<Vec<Candidate>, SourceError> {
        tracing::debug!(query = %query.search_query, "Querying arXiv");

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("search_query", query.search_query.clone()),
                ("start", query.start.to_string()),
                ("max_results", query.max_results.to_string()),
            ])
            .header("Accept", "application/atom+xml")
            .send()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to fetch arXiv results: {}", e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status().as_u16(),
                url: self.api_url.clone(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::Network(format!("Failed to read response: {}", e)))?;

        parse_feed(bytes.as_ref())
    }
}

/// Parse an arXiv Atom feed into candidates, keeping feed order
pub(crate) fn parse_feed(body: &[u8]) -> Result<Vec<Candidate>, SourceError> {
    let feed = parser::parse(body)
        .map_err(|e| SourceError::Parse(format!("Failed to parse Atom feed: {}", e)))?;

    let candidates = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = entry
                .title
                .map(|t| collapse_whitespace(&t.content))
                .unwrap_or_default();
            let url = entry.id.trim().to_string();
            if title.is_empty() || url.is_empty() {
                return None;
            }
            Some(Candidate::new(title, url))
        })
        .collect();

    Ok(candidates)
}
