//! Writing a starter configuration file.
//!
//! # Configuration File Format
//!
//! ```toml
//! [listing]
//! url = "https://cvpr.thecvf.com/Conferences/2025/AcceptedPapers"
//!
//! [listing.selectors]
//! row = "tr"
//! title = "strong"
//! authors = "i"
//! cell = "td"
//!
//! [matcher]
//! similarity_threshold = 0.5
//! max_title_tokens = 8
//! max_results = 5
//!
//! [arxiv]
//! api_url = "https://export.arxiv.org/api/query"
//!
//! [requests]
//! delay_seconds = 1.0
//! timeout_seconds = 30
//!
//! [output]
//! directory = "results"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 5019
//! ```

use std::path::Path;

use super::Config;

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Refusing to overwrite existing file: {0}")]
    Exists(String),
}

/// Write the default configuration as TOML
///
/// Parent directories are created; an existing file is left untouched.
pub fn write_default_config(path: &Path) -> Result<(), ConfigFileError> {
    if path.exists() {
        return Err(ConfigFileError::Exists(path.display().to_string()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(&Config::default())?;
    std::fs::write(path, content)?;
    Ok(())
}
