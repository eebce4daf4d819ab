//! Utility modules shared by the sources and front ends.
//!
//! - [`HttpClient`]: shared `reqwest` client with a user agent and timeouts
//! - [`normalize_words`]: the word normalization used by title matching
//! - [`truncate_chars`]: character-safe truncation with an ellipsis

mod http;
mod text;

pub use http::{HttpClient, DEFAULT_TIMEOUT_SECS};
pub use text::{collapse_whitespace, normalize_words, strip_non_word, truncate_chars};
