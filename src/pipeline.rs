//! Fetch, filter and match in one sequential run.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, ListingSelectors};
use crate::filter::filter_by_keywords;
use crate::listing::fetch_listing;
use crate::matcher::{lookup, MatcherConfig};
use crate::models::{PaperRecord, ResultTable};
use crate::sources::{ArxivSource, HttpListingSource, ListingSource, PreprintSource, SourceError};
use crate::utils::HttpClient;

/// Reasons a run stops before matching anything
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("No papers found at {url}")]
    NoPapersFound { url: String },

    #[error("No papers matched the keywords: {}", keywords.join(", "))]
    NoKeywordMatches { keywords: Vec<String> },
}

/// The listing and preprint sources plus the knobs for one run
///
/// Lookups are awaited one at a time; with a non-zero delay the pipeline
/// pauses after every lookup, the last one included.
#[derive(Debug, Clone)]
pub struct Pipeline {
    listing: Arc<dyn ListingSource>,
    preprints: Arc<dyn PreprintSource>,
    selectors: ListingSelectors,
    matcher: MatcherConfig,
    delay: Duration,
}

impl Pipeline {
    pub fn new(listing: Arc<dyn ListingSource>, preprints: Arc<dyn PreprintSource>) -> Self {
        Self {
            listing,
            preprints,
            selectors: ListingSelectors::default(),
            matcher: MatcherConfig::default(),
            delay: Duration::ZERO,
        }
    }

    /// Build HTTP-backed sources from `config`, sharing one client
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let client = Arc::new(HttpClient::with_timeout(config.requests.timeout())?);
        let listing = Arc::new(HttpListingSource::new(Arc::clone(&client)));
        let preprints = Arc::new(ArxivSource::new(client, config.arxiv.api_url.clone()));

        Ok(Self::new(listing, preprints)
            .with_selectors(config.listing.selectors.clone())
            .with_matcher(config.matcher.clone())
            .with_delay(config.requests.delay()))
    }

    pub fn with_selectors(mut self, selectors: ListingSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn with_matcher(mut self, matcher: MatcherConfig) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Fetch the listing and apply the keyword filter
    pub async fn collect<S: AsRef<str>>(&self, url: &str, keywords: &[S]) -> Result<Vec<PaperRecord>, PipelineError> {
        let records = fetch_listing(self.listing.as_ref(), url, &self.selectors).await;
        if records.is_empty() {
            return Err(PipelineError::NoPapersFound { url: url.to_string() });
        }

        let filtered = filter_by_keywords(records, keywords);
        if filtered.is_empty() {
            return Err(PipelineError::NoKeywordMatches {
                keywords: keywords.iter().map(|k| k.as_ref().to_string()).collect(),
            });
        }

        Ok(filtered)
    }

    /// Look up every record in order
    ///
    /// `on_progress` is called before each lookup with the 1-based position,
    /// the total and the record about to be searched.
    pub async fn match_records_with<F>(&self, records: &[PaperRecord], mut on_progress: F) -> ResultTable
    where
        F: FnMut(usize, usize, &PaperRecord) + Send,
    {
        let total = records.len();
        let mut rows = Vec::with_capacity(total);

        for (idx, record) in records.iter().enumerate() {
            on_progress(idx + 1, total, record);
            rows.push(lookup(self.preprints.as_ref(), record, &self.matcher).await);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let table = ResultTable::new(rows);
        tracing::info!(
            "Matched {} of {} papers on {}",
            table.matched_count(),
            table.len(),
            self.preprints.name()
        );
        table
    }

    pub async fn match_records(&self, records: &[PaperRecord]) -> ResultTable {
        self.match_records_with(records, |_, _, _| {}).await
    }

    /// [`collect`](Self::collect) then [`match_records`](Self::match_records)
    pub async fn run<S: AsRef<str>>(&self, url: &str, keywords: &[S]) -> Result<ResultTable, PipelineError> {
        let records = self.collect(url, keywords).await?;
        Ok(self.match_records(&records).await)
    }
}
