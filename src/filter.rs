//! Keyword filtering over scraped records.

use crate::models::PaperRecord;

/// Keep records whose title or authors mention at least one keyword
///
/// Matching is a case-insensitive substring test against
/// [`PaperRecord::search_text`]. Blank keywords are ignored, and with no
/// usable keywords every record is kept. Order is preserved.
pub fn filter_by_keywords<S: AsRef<str>>(records: Vec<PaperRecord>, keywords: &[S]) -> Vec<PaperRecord> {
    let needles: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    if needles.is_empty() {
        return records;
    }

    let filtered: Vec<PaperRecord> = records
        .into_iter()
        .filter(|record| {
            let haystack = record.search_text();
            needles.iter().any(|needle| haystack.contains(needle.as_str()))
        })
        .collect();

    tracing::info!("Filtered to {} papers matching keywords", filtered.len());
    filtered
}
