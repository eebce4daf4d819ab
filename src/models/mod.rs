//! Core data models for listing records, search candidates and results.

mod paper;
mod result;
mod search;

pub use paper::{is_plausible_title, PaperRecord, MIN_TITLE_CHARS};
pub use result::{is_link_column, MatchResult, ResultTable, COLUMNS, LINK_COLUMNS, NOT_FOUND};
pub use search::{Candidate, PreprintQuery};
