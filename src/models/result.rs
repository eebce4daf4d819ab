//! Match results and the table handed to the exporters.

use serde::{Deserialize, Serialize};

use super::paper::PaperRecord;
use super::search::Candidate;

/// Placeholder written into every preprint field when no match was found
pub const NOT_FOUND: &str = "Not Found";

/// Column headers, in export order
pub const COLUMNS: [&str; 5] = [
    "Conference Title",
    "Conference Authors",
    "arXiv Link",
    "PDF Link",
    "arXiv Title",
];

/// Indices into [`COLUMNS`] holding URLs
pub const LINK_COLUMNS: [usize; 2] = [2, 3];

/// Returns true if the column at `index` holds URLs
pub fn is_link_column(index: usize) -> bool {
    LINK_COLUMNS.contains(&index)
}

/// The outcome of looking up one listing record on the preprint server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "Conference Title")]
    pub source_title: String,

    #[serde(rename = "Conference Authors")]
    pub source_authors: String,

    #[serde(rename = "arXiv Link")]
    pub preprint_url: String,

    #[serde(rename = "PDF Link")]
    pub pdf_url: String,

    #[serde(rename = "arXiv Title")]
    pub preprint_title: String,
}

impl MatchResult {
    /// A result pairing `record` with the accepted candidate
    pub fn matched(record: &PaperRecord, candidate: &Candidate, pdf_url: impl Into<String>) -> Self {
        Self {
            source_title: record.title().to_string(),
            source_authors: record.authors().to_string(),
            preprint_url: candidate.url.clone(),
            pdf_url: pdf_url.into(),
            preprint_title: candidate.title.clone(),
        }
    }

    /// A result with every preprint field set to [`NOT_FOUND`]
    pub fn not_found(record: &PaperRecord) -> Self {
        Self {
            source_title: record.title().to_string(),
            source_authors: record.authors().to_string(),
            preprint_url: NOT_FOUND.to_string(),
            pdf_url: NOT_FOUND.to_string(),
            preprint_title: NOT_FOUND.to_string(),
        }
    }

    pub fn is_match(&self) -> bool {
        self.preprint_url != NOT_FOUND
    }

    /// Cell values in [`COLUMNS`] order
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.source_title,
            &self.source_authors,
            &self.preprint_url,
            &self.pdf_url,
            &self.preprint_title,
        ]
    }
}

/// Ordered rows ready for export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    rows: Vec<MatchResult>,
}

impl ResultTable {
    pub fn new(rows: Vec<MatchResult>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[MatchResult] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows that found a preprint
    pub fn matched_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_match()).count()
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }
}

impl FromIterator<MatchResult> for ResultTable {
    fn from_iter<I: IntoIterator<Item = MatchResult>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
