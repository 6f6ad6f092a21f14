//! Shirt-Scraper: a single-pass product scraper
//!
//! This crate fetches a product listing page, follows the item links it
//! finds, extracts one record per item page, and writes the records to a
//! dated CSV snapshot. Failures are appended to a plain-text error log.

pub mod config;
pub mod output;
pub mod scrape;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Shirt-Scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Connection error: There's been a {status} error. Cannot connect to {url}.")]
    Connection { status: u16, url: String },

    #[error("request to {url} failed, reason: {reason}")]
    Network { url: String, reason: String },

    #[error("CSV serialization error: {0}")]
    Serialization(#[from] csv::Error),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Coarse classification of a [`ScrapeError`], used by the error log to pick
/// a message format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server answered with a non-success HTTP status
    Connection,
    /// The request never completed (DNS, refused connection, timeout)
    Network,
    /// Serializing or persisting the CSV snapshot failed
    Write,
    /// Anything else
    Unknown,
}

impl ScrapeError {
    /// Returns the kind of failure this error represents
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScrapeError::Connection { .. } => ErrorKind::Connection,
            ScrapeError::Network { .. } => ErrorKind::Network,
            ScrapeError::Serialization(_) | ScrapeError::Io { .. } => ErrorKind::Write,
            ScrapeError::Selector { .. } | ScrapeError::Config(_) | ScrapeError::Client(_) => {
                ErrorKind::Unknown
            }
        }
    }

    /// Wraps an IO error together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScrapeError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Shirt-Scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use output::{CsvWriter, ErrorLog};
pub use scrape::{ItemOutcome, Pipeline, Record, RunReport};
