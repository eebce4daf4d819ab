//! # paper-harvest
//!
//! Scrapes a conference accepted-papers listing, narrows it down by
//! keyword, finds each paper on arXiv and exports the matches.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`listing`]: Extracting paper records from listing markup
//! - [`filter`]: Keyword filtering
//! - [`matcher`]: Query building and title similarity
//! - [`export`]: CSV, Excel, HTML and Markdown writers
//! - [`pipeline`]: Fetch, filter and match in one run
//! - [`sources`]: Listing and preprint search boundaries (HTTP and mock)
//! - [`web`]: Form-based front end
//! - [`models`]: Records, candidates and result tables
//! - [`config`]: Configuration management

pub mod config;
pub mod export;
pub mod filter;
pub mod listing;
pub mod matcher;
pub mod models;
pub mod pipeline;
pub mod sources;
pub mod ui;
pub mod utils;
pub mod web;

// Re-export commonly used types
pub use export::{ExportFormat, Exporter};
pub use models::{MatchResult, PaperRecord, ResultTable};
pub use pipeline::{Pipeline, PipelineError};
pub use sources::{ListingSource, PreprintSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
