//! Extracting paper records from a conference listing page.
//!
//! Two independent heuristics run over the parsed document:
//!
//! - [`parse_table_rows`]: one record per row element, title from the first
//!   bold node, authors from the first italic node, abstract from the
//!   second cell.
//! - [`parse_emphasis_fallback`]: every bold node is a title; authors come
//!   from the first italic node under the same parent.
//!
//! [`extract_records`] runs the second only when the first finds nothing.

use scraper::{ElementRef, Html, Selector};

use crate::config::ListingSelectors;
use crate::models::PaperRecord;
use crate::sources::{ListingSource, SourceError};

/// Compiled form of [`ListingSelectors`]
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    row: Selector,
    title: Selector,
    authors: Selector,
    cell: Selector,
}

impl CompiledSelectors {
    pub fn compile(selectors: &ListingSelectors) -> Result<Self, SourceError> {
        Ok(Self {
            row: parse_selector(&selectors.row)?,
            title: parse_selector(&selectors.title)?,
            authors: parse_selector(&selectors.authors)?,
            cell: parse_selector(&selectors.cell)?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css)
        .map_err(|e| SourceError::InvalidRequest(format!("Bad CSS selector {:?}: {:?}", css, e)))
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Structural pass: one candidate record per row
pub fn parse_table_rows(document: &Html, selectors: &CompiledSelectors) -> Vec<PaperRecord> {
    document
        .select(&selectors.row)
        .filter_map(|row| {
            let title = row.select(&selectors.title).next().map(element_text)?;
            let authors = row
                .select(&selectors.authors)
                .next()
                .map(element_text)
                .unwrap_or_default();
            let abstract_text = row
                .select(&selectors.cell)
                .nth(1)
                .map(element_text)
                .unwrap_or_default();

            PaperRecord::try_new(title, authors).map(|r| r.with_abstract(abstract_text))
        })
        .collect()
}

/// Fallback pass: every bold node is a title candidate
pub fn parse_emphasis_fallback(document: &Html, selectors: &CompiledSelectors) -> Vec<PaperRecord> {
    document
        .select(&selectors.title)
        .filter_map(|title_node| {
            let title = element_text(title_node);
            let authors = title_node
                .parent()
                .and_then(ElementRef::wrap)
                .and_then(|parent| parent.select(&selectors.authors).next())
                .map(element_text)
                .unwrap_or_default();

            PaperRecord::try_new(title, authors)
        })
        .collect()
}

/// Run the structural pass, falling back to the emphasis scan when it is empty
pub fn extract_records(html: &str, selectors: &CompiledSelectors) -> Vec<PaperRecord> {
    let document = Html::parse_document(html);

    let records = parse_table_rows(&document, selectors);
    if !records.is_empty() {
        return records;
    }

    tracing::debug!("No records found in table rows, scanning bold nodes");
    parse_emphasis_fallback(&document, selectors)
}

/// Fetch a listing page and extract its records
///
/// Never fails: fetch and selector errors are logged and yield no records.
pub async fn fetch_listing(
    source: &dyn ListingSource,
    url: &str,
    selectors: &ListingSelectors,
) -> Vec<PaperRecord> {
    tracing::info!("Fetching papers from {}", url);

    let html = match source.fetch_page(url).await {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("Error fetching papers list from {}: {}", url, e);
            return Vec::new();
        }
    };

    let compiled = match CompiledSelectors::compile(selectors) {
        Ok(compiled) => compiled,
        Err(e) => {
            tracing::error!("Error preparing listing selectors: {}", e);
            return Vec::new();
        }
    };

    let records = extract_records(&html, &compiled);
    tracing::info!("Found {} papers", records.len());
    records
}
