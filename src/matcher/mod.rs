//! Matching listing records against preprint search results.
//!
//! A lookup builds a fielded title (and first-author) query, sends it once
//! and accepts the first returned candidate whose title shares enough words
//! with the listing title. Anything else, errors included, is "Not Found".

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::models::{Candidate, MatchResult, PaperRecord, PreprintQuery};
use crate::sources::PreprintSource;
use crate::utils::{normalize_words, strip_non_word};

static SURNAME: OnceLock<Regex> = OnceLock::new();

fn surname_pattern() -> &'static Regex {
    SURNAME.get_or_init(|| Regex::new(r"[A-Za-z]+").expect("valid surname pattern"))
}

/// Tunables for the matcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Word overlap a candidate must exceed to be accepted
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Leading title tokens kept in the search phrase
    #[serde(default = "default_max_title_tokens")]
    pub max_title_tokens: usize,

    /// Candidates requested per lookup
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_similarity_threshold() -> f64 {
    0.5
}

fn default_max_title_tokens() -> usize {
    8
}

fn default_max_results() -> usize {
    5
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            max_title_tokens: default_max_title_tokens(),
            max_results: default_max_results(),
        }
    }
}

/// Punctuation becomes whitespace, then the first `max_tokens` words are kept
pub fn build_search_phrase(title: &str, max_tokens: usize) -> String {
    strip_non_word(title, " ")
        .split_whitespace()
        .take(max_tokens)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First run of ASCII letters in the author string
///
/// For `"J. Smith, A. Lee"` this is `"J"`: the listing usually puts initials
/// first, and the query still narrows on it.
pub fn first_author_surname(authors: &str) -> Option<String> {
    surname_pattern()
        .find(authors)
        .map(|m| m.as_str().to_string())
}

/// Build the search API query for a record
pub fn build_query(record: &PaperRecord, config: &MatcherConfig) -> PreprintQuery {
    let phrase = build_search_phrase(record.title(), config.max_title_tokens);
    let mut search_query = format!("ti:\"{}\"", phrase);
    if let Some(surname) = first_author_surname(record.authors()) {
        search_query.push_str(" AND au:");
        search_query.push_str(&surname);
    }
    PreprintQuery::new(search_query, config.max_results)
}

/// Word-overlap similarity: `|a ∩ b| / max(|a|, |b|)`
///
/// Returns `None` when both titles normalize to no words at all.
pub fn title_similarity(a: &str, b: &str) -> Option<f64> {
    let words_a = normalize_words(a);
    let words_b = normalize_words(b);

    let denominator = words_a.len().max(words_b.len());
    if denominator == 0 {
        return None;
    }

    let shared = words_a.intersection(&words_b).count();
    Some(shared as f64 / denominator as f64)
}

pub fn are_titles_similar(a: &str, b: &str, threshold: f64) -> bool {
    title_similarity(a, b).is_some_and(|score| score > threshold)
}

/// The first candidate, in server order, similar enough to `title`
pub fn find_first_match<'a>(title: &str, candidates: &'a [Candidate], threshold: f64) -> Option<&'a Candidate> {
    candidates
        .iter()
        .find(|candidate| are_titles_similar(title, &candidate.title, threshold))
}

/// Derive the PDF URL from an abstract-page URL
pub fn pdf_url_for(abs_url: &str) -> String {
    format!("{}.pdf", abs_url.replacen("/abs/", "/pdf/", 1))
}

/// Look up one record, never failing
///
/// Query errors are logged and reported as a [`MatchResult::not_found`] row
/// so the rest of the batch carries on.
pub async fn lookup(source: &dyn PreprintSource, record: &PaperRecord, config: &MatcherConfig) -> MatchResult {
    let query = build_query(record, config);

    let candidates = match source.search(&query).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::warn!("Error searching {} for '{}': {}", source.name(), record.title(), e);
            return MatchResult::not_found(record);
        }
    };

    match find_first_match(record.title(), &candidates, config.similarity_threshold) {
        Some(candidate) => {
            tracing::debug!(url = %candidate.url, "Matched '{}'", record.title());
            MatchResult::matched(record, candidate, pdf_url_for(&candidate.url))
        }
        None => MatchResult::not_found(record),
    }
}
