//! Mock source for testing purposes.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::models::{Candidate, PreprintQuery};
use crate::sources::{ListingSource, PreprintSource, SourceError};

/// A mock source for testing that returns predefined responses.
///
/// Serves both boundaries: a canned listing page and canned search
/// results. Queued search responses are consumed first, one per query;
/// once the queue is empty every query gets the default candidates.
#[derive(Debug, Default)]
pub struct MockSource {
    page: Mutex<Option<String>>,
    default_candidates: Mutex<Vec<Candidate>>,
    queued: Mutex<VecDeque<Result<Vec<Candidate>, String>>>,
    queries: Mutex<Vec<PreprintQuery>>,
}

impl MockSource {
    /// Create a new mock source with no page and no candidates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the listing page body to return.
    pub fn set_page(&self, html: impl Into<String>) {
        *self.page.lock().unwrap() = Some(html.into());
    }

    /// Set the candidates returned once the queue is exhausted.
    pub fn set_candidates(&self, candidates: Vec<Candidate>) {
        *self.default_candidates.lock().unwrap() = candidates;
    }

    /// Queue the candidates for the next unanswered query.
    pub fn queue_candidates(&self, candidates: Vec<Candidate>) {
        self.queued.lock().unwrap().push_back(Ok(candidates));
    }

    /// Make the next unanswered query fail with a network error.
    pub fn queue_error(&self, message: impl Into<String>) {
        self.queued.lock().unwrap().push_back(Err(message.into()));
    }

    /// Queries received so far, in order.
    pub fn queries(&self) -> Vec<PreprintQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListingSource for MockSource {
    async fn fetch_page(&self, url: &str) -> Result<String, SourceError> {
        self.page
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| SourceError::Network(format!("mock has no page for {}", url)))
    }
}

#[async_trait]
impl PreprintSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search(&self, query: &PreprintQuery) -> Result<Vec<Candidate>, SourceError> {
        self.queries.lock().unwrap().push(query.clone());

        match self.queued.lock().unwrap().pop_front() {
            Some(Ok(candidates)) => Ok(candidates),
            Some(Err(message)) => Err(SourceError::Network(message)),
            None => Ok(self.default_candidates.lock().unwrap().clone()),
        }
    }
}

/// Helper function to create an arXiv-style candidate for testing.
pub fn make_candidate(arxiv_id: &str, title: &str) -> Candidate {
    Candidate::new(title, format!("http://arxiv.org/abs/{}", arxiv_id))
}
