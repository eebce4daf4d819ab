//! Configuration management.
//!
//! Every setting has a default, so the tool runs without a config file.
//! A TOML file (see [`find_config_file`]) and `PAPER_HARVEST__SECTION__KEY`
//! environment variables are layered on top by [`load_config`].

mod file_config;

pub use file_config::{write_default_config, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::matcher::MatcherConfig;

/// Accepted-papers page used when no URL is given
pub const DEFAULT_LISTING_URL: &str = "https://cvpr.thecvf.com/Conferences/2025/AcceptedPapers";

/// arXiv Atom API endpoint
pub const DEFAULT_ARXIV_API_URL: &str = "https://export.arxiv.org/api/query";

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "paper-harvest.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "PAPER_HARVEST";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Listing page and scraping selectors
    #[serde(default)]
    pub listing: ListingConfig,

    /// Title matching parameters
    #[serde(default)]
    pub matcher: MatcherConfig,

    /// Preprint server settings
    #[serde(default)]
    pub arxiv: ArxivConfig,

    /// Outbound request settings
    #[serde(default)]
    pub requests: RequestConfig,

    /// Export settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Form front end settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Listing page configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Page enumerating the accepted papers
    #[serde(default = "default_listing_url")]
    pub url: String,

    /// CSS selectors used to pull records out of the page
    #[serde(default)]
    pub selectors: ListingSelectors,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            url: default_listing_url(),
            selectors: ListingSelectors::default(),
        }
    }
}

fn default_listing_url() -> String {
    DEFAULT_LISTING_URL.to_string()
}

/// CSS selectors for the two scraping passes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSelectors {
    /// One element per paper in the structural pass
    #[serde(default = "default_row_selector")]
    pub row: String,

    /// Bold node holding the title
    #[serde(default = "default_title_selector")]
    pub title: String,

    /// Italic node holding the authors
    #[serde(default = "default_authors_selector")]
    pub authors: String,

    /// Cells of a row; the second one is taken as the abstract
    #[serde(default = "default_cell_selector")]
    pub cell: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            row: default_row_selector(),
            title: default_title_selector(),
            authors: default_authors_selector(),
            cell: default_cell_selector(),
        }
    }
}

fn default_row_selector() -> String {
    "tr".to_string()
}

fn default_title_selector() -> String {
    "strong".to_string()
}

fn default_authors_selector() -> String {
    "i".to_string()
}

fn default_cell_selector() -> String {
    "td".to_string()
}

/// Preprint server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArxivConfig {
    /// Atom API endpoint
    #[serde(default = "default_arxiv_api_url")]
    pub api_url: String,
}

impl Default for ArxivConfig {
    fn default() -> Self {
        Self {
            api_url: default_arxiv_api_url(),
        }
    }
}

fn default_arxiv_api_url() -> String {
    DEFAULT_ARXIV_API_URL.to_string()
}

/// Outbound request configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Pause after each preprint lookup in batch runs, in seconds
    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: f64,

    /// Per-request timeout, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            delay_seconds: default_delay_seconds(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl RequestConfig {
    /// Courtesy delay as a [`Duration`] (negative or non-finite values become zero)
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_seconds.max(0.0)).unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_delay_seconds() -> f64 {
    1.0
}

fn default_timeout_seconds() -> u64 {
    crate::utils::DEFAULT_TIMEOUT_SECS
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory exports are written to, created on demand
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

/// Form front end configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5019
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from environment overrides and defaults only
pub fn get_config() -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    settings.try_deserialize()
}

/// Look for a config file in the working directory, then the user config dir
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("paper-harvest").join("config.toml"))
        .filter(|path| path.is_file())
}
