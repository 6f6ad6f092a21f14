//! Dated CSV snapshot writer
//!
//! The data directory holds a single snapshot named after the run date.
//! Writing a new snapshot first removes the previous one.

use crate::scrape::Record;
use crate::{Result, ScrapeError};
use chrono::NaiveDate;
use std::io;
use std::path::{Path, PathBuf};

/// Column headers, in output order
pub const CSV_HEADERS: [&str; 5] = ["title", "price", "imageURL", "URL", "time"];

/// Writes records to `<data-dir>/<YYYY-MM-DD>.csv`
#[derive(Debug, Clone)]
pub struct CsvWriter {
    data_dir: PathBuf,
}

impl CsvWriter {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Creates the data directory if it is missing
    ///
    /// Failure is only logged; the write at the end of the run will report
    /// the real problem if the directory is still unusable.
    pub fn ensure_dir(&self) {
        if let Err(e) = std::fs::create_dir_all(&self.data_dir) {
            tracing::warn!(
                "Could not create data directory {}: {}",
                self.data_dir.display(),
                e
            );
        }
    }

    /// Path of the snapshot for `date`
    pub fn output_path(&self, date: NaiveDate) -> PathBuf {
        self.data_dir
            .join(format!("{}.csv", date.format("%Y-%m-%d")))
    }

    /// Serializes `records` and replaces the previous snapshot
    ///
    /// The first `*.csv` file found in the data directory (if any) is deleted
    /// before the new file is written.
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Path of the written snapshot
    /// * `Err(ScrapeError)` - Serialization, removal, or write failed
    pub fn write(&self, records: &[Record], date: NaiveDate) -> Result<PathBuf> {
        let csv = records_to_csv(records)?;

        if let Some(previous) = self.find_previous_snapshot()? {
            std::fs::remove_file(&previous).map_err(|e| ScrapeError::io(&previous, e))?;
            tracing::info!("Removed previous snapshot {}", previous.display());
        }

        let path = self.output_path(date);
        std::fs::write(&path, csv).map_err(|e| ScrapeError::io(&path, e))?;
        tracing::info!("Wrote {} records to {}", records.len(), path.display());

        Ok(path)
    }

    /// Returns the first CSV file in the data directory, in glob order
    fn find_previous_snapshot(&self) -> Result<Option<PathBuf>> {
        let dir = self.data_dir.to_str().ok_or_else(|| {
            ScrapeError::io(
                &self.data_dir,
                io::Error::new(io::ErrorKind::InvalidData, "data directory is not valid UTF-8"),
            )
        })?;

        let pattern = format!("{}/*.csv", glob::Pattern::escape(dir));
        let mut matches = glob::glob(&pattern).map_err(|e| {
            ScrapeError::io(
                &self.data_dir,
                io::Error::new(io::ErrorKind::InvalidInput, e.to_string()),
            )
        })?;

        match matches.next() {
            Some(Ok(path)) => Ok(Some(path)),
            Some(Err(e)) => {
                let path = e.path().to_path_buf();
                Err(ScrapeError::io(path, e.into()))
            }
            None => Ok(None),
        }
    }
}

/// Serializes records to CSV bytes with a header row
///
/// The header is written even when `records` is empty.
pub fn records_to_csv(records: &[Record]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| ScrapeError::Serialization(csv::Error::from(e.into_error())))
}
