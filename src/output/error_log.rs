//! Append-only, human-readable error log
//!
//! Each entry is a blank-line-separated block:
//!
//! ```text
//! Tue Mar 05 2024 09:30:00 GMT+0100
//! Connection error: There's been a 404 error. Cannot connect to http://shirts4mike.com/shirts.php.
//!
//! ```

use crate::{ErrorKind, ScrapeError};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Error log backed by a plain text file
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reports `error` on the console and appends it to the log file
    ///
    /// Best-effort: if the file cannot be appended to, that is reported on
    /// the console and otherwise ignored.
    pub fn log_error(&self, error: &ScrapeError) {
        tracing::error!("{}", error);

        let entry = format_entry(error, &Local::now());
        if let Err(e) = self.append(&entry) {
            tracing::warn!(
                "Could not append to error log {}: {}",
                self.path.display(),
                e
            );
        }
    }

    fn append(&self, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.as_bytes())
    }
}

/// Human-readable message for an error, chosen by its kind
pub fn format_message(error: &ScrapeError) -> String {
    match (error.kind(), error) {
        (ErrorKind::Connection, _) => error.to_string(),
        (ErrorKind::Network, ScrapeError::Network { url, .. }) => {
            format!("Request to {} failed.", url)
        }
        _ => format!(
            "There has been a problem with your fetch operation: {}",
            error
        ),
    }
}

/// Formats one log entry stamped with `at`
pub fn format_entry<Tz>(error: &ScrapeError, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{}\n{}\n\n",
        at.format("%a %b %d %Y %H:%M:%S GMT%z"),
        format_message(error)
    )
}
